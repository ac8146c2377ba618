use crate::{BindingMap, BindingResolver, Bindings, ServiceType, Svc};
use tracing::trace;

/// Resolves requests for constructed generic types to the bindings
/// registered for their open definition.
///
/// A request for `IRepository<Customer>` looks up the bindings registered
/// for `IRepository<!0>` and yields a specialized copy of each one, so a
/// binding to `SqlRepository<!0>` becomes a binding to
/// `SqlRepository<Customer>`. Requests for non-generic types, open
/// definitions, and partially open types yield nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenGenericBindingResolver;

impl BindingResolver for OpenGenericBindingResolver {
    fn resolve<'a>(
        &'a self,
        bindings: &'a BindingMap,
        service: &'a ServiceType,
    ) -> Bindings<'a> {
        if !service.is_constructed() {
            return Box::new(std::iter::empty());
        }

        let definition = match service.generic_definition() {
            Some(definition) => definition,
            None => return Box::new(std::iter::empty()),
        };

        let group = bindings.get(&definition);
        trace!(
            %definition,
            service = %service,
            count = group.len(),
            "found open generic bindings"
        );

        Box::new(
            group
                .iter()
                .map(move |binding| binding.specialize(service).map(Svc::new)),
        )
    }
}
