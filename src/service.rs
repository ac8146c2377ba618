use crate::ServiceType;
use derive_more::Display;
use std::error::Error;

#[cfg(feature = "rc")]
macro_rules! feature_unique {
    ({ $($common:tt)* }, { $($rc:tt)* }, { $($_arc:tt)* }) => {
        $($common)*
        $($rc)*
    };
}

#[cfg(feature = "arc")]
macro_rules! feature_unique {
    ({ $($common:tt)* }, { $($_rc:tt)* }, { $($arc:tt)* }) => {
        $($common)*
        $($arc)*
    };
}

feature_unique!(
    {
        /// A reference-counted pointer used to share bindings, strategies and
        /// type metadata. The pointer type is determined by the feature flags
        /// passed to this crate.
        ///
        /// - **rc**: Pointer type is [`Rc<T>`](std::rc::Rc)
        /// - **arc**: Pointer type is [`Arc<T>`](std::sync::Arc) (default)
    },
    {
        #[cfg_attr(
            not(doc),
            doc = "",
            doc = "The current pointer type is [`Rc<T>`](std::rc::Rc)."
        )]
        pub type Svc<T> = std::rc::Rc<T>;
    },
    {
        #[cfg_attr(
            not(doc),
            doc = "",
            doc = "The current pointer type is [`Arc<T>`](std::sync::Arc)."
        )]
        pub type Svc<T> = std::sync::Arc<T>;
    }
);

/// A shared pointer holding an instance of `dyn Service`.
pub type DynSvc = Svc<dyn Service>;

feature_unique!(
    {
        /// Implemented automatically on types that can be shared with the
        /// engine. With the "arc" feature enabled, this requires [`Send`] and
        /// [`Sync`] so that resolution can run on several threads at once.
    },
    {
        pub trait Service: downcast_rs::Downcast {}
        impl<T: ?Sized + downcast_rs::Downcast> Service for T {}
    },
    {
        pub trait Service: downcast_rs::DowncastSync {}
        impl<T: ?Sized + downcast_rs::DowncastSync> Service for T {}
    }
);

#[cfg(feature = "arc")]
downcast_rs::impl_downcast!(sync Service);

#[cfg(feature = "rc")]
downcast_rs::impl_downcast!(Service);

/// A result from resolving bindings or selecting members.
pub type InjectResult<T> = Result<T, InjectError>;

/// An error that occurred while resolving bindings or selecting members.
///
/// The engine itself only produces [`InvalidArgument`] and
/// [`AmbiguousConstructor`]. Errors returned by resolvers, heuristics and
/// scorers are handed back to the caller exactly as the strategy returned
/// them.
///
/// [`InvalidArgument`]: InjectError::InvalidArgument
/// [`AmbiguousConstructor`]: InjectError::AmbiguousConstructor
#[derive(Debug, Display)]
#[non_exhaustive]
pub enum InjectError {
    /// An argument was malformed, for example an unparseable type name or a
    /// generic substitution with the wrong number of type arguments.
    #[display(fmt = "invalid argument {}: {}", argument, reason)]
    InvalidArgument {
        /// The argument that was rejected.
        argument: String,

        /// Why the argument was rejected.
        reason: String,
    },

    /// More than one constructor received the highest score.
    #[display(
        fmt = "{} has {} constructors sharing the highest score",
        service_type,
        count
    )]
    AmbiguousConstructor {
        /// The type whose constructors were scored.
        service_type: ServiceType,

        /// How many constructors share the highest score.
        count: usize,
    },

    /// A user-supplied resolver, heuristic or scorer failed with its own
    /// error.
    #[display(fmt = "{}", inner)]
    ExtensionFailed {
        /// The error raised by the extension.
        inner: Box<dyn Error + Send + Sync + 'static>,
    },
}

impl InjectError {
    /// Creates an [`InjectError::InvalidArgument`].
    pub fn invalid_argument(
        argument: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        InjectError::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    /// Wraps an error raised inside a user-supplied strategy.
    pub fn extension(
        inner: impl Into<Box<dyn Error + Send + Sync + 'static>>,
    ) -> Self {
        InjectError::ExtensionFailed {
            inner: inner.into(),
        }
    }
}

impl Error for InjectError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            InjectError::ExtensionFailed { inner } => Some(inner.as_ref()),
            _ => None,
        }
    }
}
