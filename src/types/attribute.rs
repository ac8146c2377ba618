use crate::Service;
use std::fmt::Debug;

/// Metadata attached to a constructor, property or method.
///
/// Attributes are arbitrary types. Heuristics and scorers look them up by
/// type, usually through [`Member::attribute`](crate::Member::attribute).
///
/// ```
/// use injection_engine::{
///     Attribute, ConfigureMember, Member, PropertyDescriptor, ServiceType,
/// };
///
/// #[derive(Debug)]
/// struct Named(&'static str);
/// impl Attribute for Named {}
///
/// let property = PropertyDescriptor::new("Logger", ServiceType::named("ILogger"))
///     .with_attribute(Named("audit"));
///
/// assert_eq!("audit", property.attribute::<Named>().unwrap().0);
/// ```
pub trait Attribute: Service + Debug {}

#[cfg(feature = "arc")]
downcast_rs::impl_downcast!(sync Attribute);

#[cfg(feature = "rc")]
downcast_rs::impl_downcast!(Attribute);

/// Marks a member for injection. The [`StandardInjectionHeuristic`] injects
/// properties and methods carrying this attribute, and the
/// [`StandardConstructorScorer`] always prefers a constructor carrying it.
///
/// [`StandardInjectionHeuristic`]: crate::StandardInjectionHeuristic
/// [`StandardConstructorScorer`]: crate::StandardConstructorScorer
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub struct Inject;

impl Attribute for Inject {}
