use crate::{Binding, BindingMap, InjectResult, Service, ServiceType, Svc};

/// A lazily evaluated sequence of bindings produced by a resolver.
pub type Bindings<'a> = Box<dyn Iterator<Item = InjectResult<Svc<Binding>>> + 'a>;

/// Decides which bindings could satisfy a request for a service.
///
/// Resolvers only read the binding map. They are queried independently of
/// each other, so a resolver never needs to consider what other resolvers
/// return. Any error a resolver yields is passed to the caller unchanged.
///
/// ```
/// use injection_engine::{
///     Binding, BindingMap, BindingResolver, Bindings, ResolverChain,
///     ServiceType,
/// };
///
/// // Resolves requests for `Option<T>` to the bindings for `T`
/// struct OptionResolver;
///
/// impl BindingResolver for OptionResolver {
///     fn resolve<'a>(
///         &'a self,
///         bindings: &'a BindingMap,
///         service: &'a ServiceType,
///     ) -> Bindings<'a> {
///         match service.type_arguments() {
///             Some(arguments) if service.name() == "Option" && arguments.len() == 1 => {
///                 Box::new(bindings.get(&arguments[0]).iter().cloned().map(Ok))
///             }
///             _ => Box::new(std::iter::empty()),
///         }
///     }
/// }
///
/// let mut bindings = BindingMap::new();
/// bindings.register(Binding::new("Clock".into()));
///
/// let mut chain = ResolverChain::new();
/// chain.add(OptionResolver);
///
/// let request = "Option<Clock>".parse().unwrap();
/// assert_eq!(1, chain.resolve_all(&bindings, &request).unwrap().len());
/// ```
pub trait BindingResolver: Service {
    /// Returns the bindings from `bindings` that could satisfy a request for
    /// `service`.
    fn resolve<'a>(
        &'a self,
        bindings: &'a BindingMap,
        service: &'a ServiceType,
    ) -> Bindings<'a>;
}
