use crate::MemberAccess;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

/// Options that control which members the [`Selector`](crate::Selector)
/// considers.
///
/// Missing fields take their default value when deserializing, so hosts can
/// load only the options they care about from their own configuration:
///
/// ```
/// use injection_engine::InjectionSettings;
///
/// let settings: InjectionSettings =
///     serde_json::from_str(r#"{ "inject_non_public": true }"#).unwrap();
/// assert!(settings.inject_non_public);
/// assert!(!settings.inject_parent_private_properties);
/// ```
#[derive(
    Clone, Copy, PartialEq, Eq, Debug, Default, Hash, Serialize, Deserialize,
)]
#[serde(default)]
pub struct InjectionSettings {
    /// Whether non-public constructors, properties and methods can be
    /// injected.
    pub inject_non_public: bool,

    /// Whether private properties declared on base types can be injected.
    /// This only has an effect when `inject_non_public` is also set.
    pub inject_parent_private_properties: bool,
}

impl InjectionSettings {
    /// Gets the member access these settings allow.
    #[must_use]
    pub fn member_access(&self) -> MemberAccess {
        if self.inject_non_public {
            MemberAccess::All
        } else {
            MemberAccess::Public
        }
    }
}

pub(crate) trait SettingsCellEx<T> {
    fn new(value: T) -> Self;
    fn with_inner<R, F: FnOnce(&T) -> R>(&self, f: F) -> R;
    fn with_inner_mut<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R;
}

#[cfg(feature = "rc")]
mod types {
    use super::SettingsCellEx;
    use std::{cell::RefCell, rc::Rc};

    pub type SettingsCell<T> = Rc<RefCell<T>>;

    impl<T> SettingsCellEx<T> for SettingsCell<T> {
        fn new(value: T) -> Self {
            Rc::new(RefCell::new(value))
        }

        fn with_inner<R, F: FnOnce(&T) -> R>(&self, f: F) -> R {
            f(&*self.borrow())
        }

        fn with_inner_mut<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
            f(&mut *self.borrow_mut())
        }
    }
}

#[cfg(feature = "arc")]
mod types {
    use super::SettingsCellEx;
    use std::sync::{Arc, PoisonError, RwLock};

    pub type SettingsCell<T> = Arc<RwLock<T>>;

    // Settings are plain data, so a poisoned lock still holds a usable value
    impl<T> SettingsCellEx<T> for SettingsCell<T> {
        fn new(value: T) -> Self {
            Arc::new(RwLock::new(value))
        }

        fn with_inner<R, F: FnOnce(&T) -> R>(&self, f: F) -> R {
            f(&*self.read().unwrap_or_else(PoisonError::into_inner))
        }

        fn with_inner_mut<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
            f(&mut *self.write().unwrap_or_else(PoisonError::into_inner))
        }
    }
}

#[allow(clippy::wildcard_imports)]
pub(crate) use types::*;

/// A handle to [`InjectionSettings`] that can be changed at runtime.
///
/// Cloning the handle does not clone the settings inside of it. Instead,
/// both handles refer to the same settings, so a host can keep one handle
/// and reconfigure a [`Selector`](crate::Selector) that holds another. The
/// selector reads the settings at the start of every call, so a change is
/// seen by the next call.
///
/// ```
/// use injection_engine::{InjectionSettings, SharedSettings};
///
/// let settings = SharedSettings::default();
/// let handle = settings.clone();
///
/// handle.update(|settings| settings.inject_non_public = true);
/// assert!(settings.get().inject_non_public);
/// ```
#[derive(Clone)]
pub struct SharedSettings {
    inner: SettingsCell<InjectionSettings>,
}

impl SharedSettings {
    /// Creates a new handle holding `settings`.
    #[must_use]
    pub fn new(settings: InjectionSettings) -> Self {
        SharedSettings {
            inner: SettingsCellEx::new(settings),
        }
    }

    /// Gets a copy of the current settings.
    #[must_use]
    pub fn get(&self) -> InjectionSettings {
        self.inner.with_inner(|settings| *settings)
    }

    /// Replaces the current settings.
    pub fn set(&self, settings: InjectionSettings) {
        self.inner.with_inner_mut(|current| *current = settings);
    }

    /// Modifies a copy of the current settings and stores it back.
    ///
    /// `f` runs without the settings borrowed, so it may read or set the
    /// settings through any handle. The copy it returns replaces whatever
    /// was stored in the meantime.
    pub fn update<R>(&self, f: impl FnOnce(&mut InjectionSettings) -> R) -> R {
        let mut settings = self.get();
        let result = f(&mut settings);
        self.set(settings);
        result
    }
}

impl Default for SharedSettings {
    fn default() -> Self {
        SharedSettings::new(InjectionSettings::default())
    }
}

impl From<InjectionSettings> for SharedSettings {
    fn from(settings: InjectionSettings) -> Self {
        SharedSettings::new(settings)
    }
}

impl Debug for SharedSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedSettings").field(&self.get()).finish()
    }
}
