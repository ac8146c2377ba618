use crate::{Inject, InjectResult, Member, MemberRef, PropertyDescriptor, Service};
use std::fmt::{Debug, Formatter};

/// Decides whether a property or method should receive an injected value.
///
/// A [`Selector`](crate::Selector) consults every heuristic it holds and
/// injects a member if any one of them approves it. Heuristics should be
/// pure predicates over the member. An error returned from a heuristic ends
/// the selection and is returned to the caller as is.
pub trait InjectionHeuristic: Service {
    /// Returns `true` if `member` should be injected.
    fn should_inject(&self, member: MemberRef<'_>) -> InjectResult<bool>;
}

/// Injects writable properties and methods marked with [`Inject`].
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardInjectionHeuristic;

impl InjectionHeuristic for StandardInjectionHeuristic {
    fn should_inject(&self, member: MemberRef<'_>) -> InjectResult<bool> {
        let writable = member
            .as_property()
            .map_or(true, PropertyDescriptor::can_write);
        Ok(writable && member.has_attribute::<Inject>())
    }
}

/// An injection heuristic backed by a closure.
///
/// ```
/// use injection_engine::{
///     InjectionHeuristic, Member, MemberRef, PredicateHeuristic,
///     PropertyDescriptor, ServiceType,
/// };
///
/// let loggers = PredicateHeuristic::new(|member: MemberRef<'_>| {
///     member.name().ends_with("Logger")
/// });
///
/// let property = PropertyDescriptor::new("AuditLogger", ServiceType::named("ILogger"));
/// assert!(loggers.should_inject(MemberRef::Property(&property)).unwrap());
/// ```
pub struct PredicateHeuristic<F> {
    predicate: F,
}

impl<F> PredicateHeuristic<F>
where
    F: Service + Fn(MemberRef<'_>) -> bool,
{
    /// Creates a heuristic that approves the members `predicate` accepts.
    #[must_use]
    pub fn new(predicate: F) -> Self {
        PredicateHeuristic { predicate }
    }
}

impl<F> InjectionHeuristic for PredicateHeuristic<F>
where
    F: Service + Fn(MemberRef<'_>) -> bool,
{
    fn should_inject(&self, member: MemberRef<'_>) -> InjectResult<bool> {
        Ok((self.predicate)(member))
    }
}

impl<F> Debug for PredicateHeuristic<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredicateHeuristic").finish_non_exhaustive()
    }
}
