use crate::{
    DynSvc, InjectError, InjectResult, Multimap, RequestInfo, Service,
    ServiceType, Svc,
};
use std::{
    fmt::{Debug, Formatter},
    sync::Arc,
};

/// A map from the exact service type a binding was registered for to every
/// binding registered for it, in registration order.
pub type BindingMap = Multimap<ServiceType, Svc<Binding>>;

impl BindingMap {
    /// Registers a binding under its own service type.
    pub fn register(&mut self, binding: Binding) -> Svc<Binding> {
        let binding = Svc::new(binding);
        self.add(binding.service().clone(), binding.clone());
        binding
    }
}

/// Decides whether a binding applies to a particular request. Implemented
/// automatically for closures taking a [`RequestInfo`].
pub trait BindingCondition: Service {
    /// Returns `true` if the binding applies to `request`.
    fn matches(&self, request: &RequestInfo) -> bool;
}

impl<F> BindingCondition for F
where
    F: Service + Fn(&RequestInfo) -> bool,
{
    fn matches(&self, request: &RequestInfo) -> bool {
        self(request)
    }
}

/// How the instance for a binding is produced.
#[derive(Clone)]
pub enum BindingTarget {
    /// The service type is its own implementation.
    SelfType,

    /// An implementation type is activated. For bindings registered against
    /// an open generic definition, the implementation type may refer to the
    /// definition's generic parameters.
    Type(ServiceType),

    /// A pre-built instance is returned.
    Constant(DynSvc),
}

impl Debug for BindingTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BindingTarget::SelfType => f.write_str("SelfType"),
            BindingTarget::Type(ty) => f.debug_tuple("Type").field(ty).finish(),
            BindingTarget::Constant(_) => f.write_str("Constant(..)"),
        }
    }
}

/// A registered mapping from a service type to the way instances of it are
/// produced.
///
/// Bindings are configured with the builder-style methods below and then
/// registered. Once registered they are shared and never modified; resolvers
/// that need a different binding, like the open generic resolver, produce a
/// new one.
///
/// ```
/// use injection_engine::{Binding, BindingMap, RequestInfo, ServiceType};
///
/// let mut bindings = BindingMap::new();
/// let binding = bindings.register(
///     Binding::new("ILogger".into())
///         .to("FileLogger".into())
///         .named("audit")
///         .when(|request: &RequestInfo| request.name() == Some("audit")),
/// );
///
/// assert_eq!(Some(&ServiceType::named("FileLogger")), binding.target_type());
/// assert!(binding.is_conditional());
/// assert!(!binding.matches(&RequestInfo::new()));
/// ```
#[derive(Clone)]
pub struct Binding {
    service: ServiceType,
    target: BindingTarget,
    condition: Option<Svc<dyn BindingCondition>>,
    name: Option<Arc<str>>,
    is_default: bool,
}

impl Binding {
    /// Creates an unconditional binding of `service` to itself.
    #[must_use]
    pub fn new(service: ServiceType) -> Self {
        Binding {
            service,
            target: BindingTarget::SelfType,
            condition: None,
            name: None,
            is_default: false,
        }
    }

    /// Binds to an implementation type.
    #[must_use]
    pub fn to(mut self, implementation: ServiceType) -> Self {
        self.target = BindingTarget::Type(implementation);
        self
    }

    /// Binds to a pre-built instance.
    #[must_use]
    pub fn to_constant(mut self, value: impl Service) -> Self {
        self.target = BindingTarget::Constant(Svc::new(value));
        self
    }

    /// Sets the target directly.
    #[must_use]
    pub fn with_target(mut self, target: BindingTarget) -> Self {
        self.target = target;
        self
    }

    /// Names this binding.
    #[must_use]
    pub fn named(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Restricts this binding to requests matching `condition`.
    #[must_use]
    pub fn when(mut self, condition: impl BindingCondition) -> Self {
        self.condition = Some(Svc::new(condition));
        self
    }

    /// Marks this binding as the default for its service.
    #[must_use]
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Gets the service type this binding was registered for.
    #[must_use]
    pub fn service(&self) -> &ServiceType {
        &self.service
    }

    /// Gets how instances for this binding are produced.
    #[must_use]
    pub fn target(&self) -> &BindingTarget {
        &self.target
    }

    /// Gets the implementation type activated by this binding. For
    /// self-bindings this is the service type. Constants have no
    /// implementation type.
    #[must_use]
    pub fn target_type(&self) -> Option<&ServiceType> {
        match &self.target {
            BindingTarget::SelfType => Some(&self.service),
            BindingTarget::Type(ty) => Some(ty),
            BindingTarget::Constant(_) => None,
        }
    }

    /// Gets the name of this binding, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns `true` if this binding is the default for its service.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// Returns `true` if this binding has a condition.
    #[must_use]
    pub fn is_conditional(&self) -> bool {
        self.condition.is_some()
    }

    /// Evaluates this binding's condition against a request. Unconditional
    /// bindings match every request. Resolution never calls this; it is for
    /// the planner choosing between resolved bindings.
    #[must_use]
    pub fn matches(&self, request: &RequestInfo) -> bool {
        self.condition
            .as_ref()
            .map_or(true, |condition| condition.matches(request))
    }

    /// Creates a copy of this binding for a constructed generic `service`,
    /// where this binding was registered against the open definition of
    /// `service`. Generic parameters in the target type are replaced with the
    /// type arguments of `service`.
    pub fn specialize(&self, service: &ServiceType) -> InjectResult<Binding> {
        let arguments = service
            .type_arguments()
            .filter(|_| service.is_constructed())
            .ok_or_else(|| {
                InjectError::invalid_argument(
                    service.to_string(),
                    "bindings can only be specialized for constructed generic types",
                )
            })?;

        let target = match &self.target {
            BindingTarget::Type(ty) => {
                BindingTarget::Type(ty.substitute(&arguments)?)
            }
            target => target.clone(),
        };

        Ok(Binding {
            service: service.clone(),
            target,
            ..self.clone()
        })
    }
}

impl Debug for Binding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("service", &self.service)
            .field("target", &self.target)
            .field("name", &self.name)
            .field("is_default", &self.is_default)
            .field("is_conditional", &self.is_conditional())
            .finish()
    }
}
