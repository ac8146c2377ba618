use crate::{
    ConstructorDescriptor, Inject, InjectResult, Member, ParameterDescriptor,
    Service, Svc,
};
use std::fmt::{Debug, Formatter};

/// Ranks constructor candidates. The candidate with the highest score is
/// the one that should be used to activate the type.
pub trait ConstructorScorer: Service {
    /// Scores `constructor`. Higher scores win.
    fn score(&self, constructor: &ConstructorDescriptor) -> InjectResult<i64>;
}

/// Decides whether a value can be supplied for a constructor parameter.
/// Implemented automatically for closures taking a [`ParameterDescriptor`].
pub trait ParameterCheck: Service {
    /// Returns `true` if a value can be supplied for `parameter`.
    fn is_resolvable(&self, parameter: &ParameterDescriptor) -> bool;
}

impl<F> ParameterCheck for F
where
    F: Service + Fn(&ParameterDescriptor) -> bool,
{
    fn is_resolvable(&self, parameter: &ParameterDescriptor) -> bool {
        self(parameter)
    }
}

/// Scores constructors by how many dependencies they take.
///
/// A constructor marked with [`Inject`] always wins with [`i64::MAX`].
/// Otherwise the score is the number of parameters, so the greediest
/// constructor is preferred. When a resolvability check is configured, a
/// constructor with a parameter that can neither be resolved nor falls back
/// to a default value scores [`i64::MIN`].
///
/// ```
/// use injection_engine::{
///     ConstructorDescriptor, ConstructorScorer, ParameterDescriptor,
///     StandardConstructorScorer,
/// };
///
/// let scorer = StandardConstructorScorer::with_resolvability(
///     |parameter: &ParameterDescriptor| parameter.parameter_type().name() != "Leash",
/// );
///
/// let constructor = ConstructorDescriptor::new([
///     ParameterDescriptor::new("leash", "Leash".parse().unwrap()),
/// ]);
/// assert_eq!(i64::MIN, scorer.score(&constructor).unwrap());
/// ```
#[derive(Clone, Default)]
pub struct StandardConstructorScorer {
    resolvability: Option<Svc<dyn ParameterCheck>>,
}

impl StandardConstructorScorer {
    /// Creates a scorer that assumes every parameter can be resolved.
    #[must_use]
    pub fn new() -> Self {
        StandardConstructorScorer::default()
    }

    /// Creates a scorer that rejects constructors with parameters `check`
    /// cannot resolve.
    #[must_use]
    pub fn with_resolvability(check: impl ParameterCheck) -> Self {
        StandardConstructorScorer {
            resolvability: Some(Svc::new(check)),
        }
    }
}

impl ConstructorScorer for StandardConstructorScorer {
    fn score(&self, constructor: &ConstructorDescriptor) -> InjectResult<i64> {
        if constructor.has_attribute::<Inject>() {
            return Ok(i64::MAX);
        }

        if let Some(check) = &self.resolvability {
            let unresolvable = constructor.parameters().iter().any(|parameter| {
                !parameter.has_default() && !check.is_resolvable(parameter)
            });
            if unresolvable {
                return Ok(i64::MIN);
            }
        }

        Ok(i64::try_from(constructor.parameters().len()).unwrap_or(i64::MAX))
    }
}

impl Debug for StandardConstructorScorer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandardConstructorScorer")
            .field("checks_resolvability", &self.resolvability.is_some())
            .finish()
    }
}
