use crate::{InjectResult, ServiceType, Svc, TypeDescriptor};
use std::collections::HashMap;
use tracing::trace;

/// A runtime registry of type metadata.
///
/// Implementation types must be described before members can be selected
/// from them. Generic implementation types only need their open definition
/// registered: [`describe`](TypeCatalog::describe) specializes it for each
/// constructed type requested.
#[derive(Clone, Debug, Default)]
pub struct TypeCatalog {
    types: HashMap<ServiceType, Svc<TypeDescriptor>>,
}

impl TypeCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        TypeCatalog::default()
    }

    /// Registers a descriptor under its own service type, replacing any
    /// descriptor registered for that type before.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> Svc<TypeDescriptor> {
        self.register_shared(Svc::new(descriptor))
    }

    /// Registers a shared descriptor under its own service type, replacing
    /// any descriptor registered for that type before.
    pub fn register_shared(
        &mut self,
        descriptor: Svc<TypeDescriptor>,
    ) -> Svc<TypeDescriptor> {
        self.types
            .insert(descriptor.service_type().clone(), descriptor.clone());
        descriptor
    }

    /// Gets the descriptor registered for exactly `service_type`.
    #[must_use]
    pub fn get(&self, service_type: &ServiceType) -> Option<&Svc<TypeDescriptor>> {
        self.types.get(service_type)
    }

    /// Describes `service_type`. If no descriptor is registered for it but
    /// it is a constructed generic type whose open definition is registered,
    /// the definition is specialized with the type's arguments. Returns
    /// `None` when neither is registered.
    pub fn describe(
        &self,
        service_type: &ServiceType,
    ) -> InjectResult<Option<Svc<TypeDescriptor>>> {
        if let Some(descriptor) = self.types.get(service_type) {
            return Ok(Some(descriptor.clone()));
        }

        let arguments = match service_type.type_arguments() {
            Some(arguments) if service_type.is_constructed() => arguments,
            _ => return Ok(None),
        };
        let definition = match service_type
            .generic_definition()
            .and_then(|definition| self.types.get(&definition))
        {
            Some(definition) => definition,
            None => return Ok(None),
        };

        trace!(
            definition = %definition.service_type(),
            service_type = %service_type,
            "specializing generic type definition"
        );
        definition.specialize(&arguments).map(|descriptor| Some(Svc::new(descriptor)))
    }

    /// Gets the number of registered descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no descriptors are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PropertyDescriptor, TypeArg};

    #[test]
    fn describe_prefers_exact_registration() {
        let mut catalog = TypeCatalog::new();
        catalog.register(TypeDescriptor::class(ServiceType::open("Box", 1)).build());
        let exact = catalog.register(
            TypeDescriptor::class("Box<int>".parse::<ServiceType>().unwrap()).build(),
        );

        let described = catalog
            .describe(&"Box<int>".parse().unwrap())
            .unwrap()
            .unwrap();
        assert!(Svc::ptr_eq(&exact, &described));
    }

    #[test]
    fn describe_specializes_open_definition() {
        let mut catalog = TypeCatalog::new();
        catalog.register(
            TypeDescriptor::class(ServiceType::open("Box", 1))
                .property(PropertyDescriptor::new(
                    "Contents",
                    ServiceType::with_arguments("Option", [TypeArg::Param(0)]),
                ))
                .build(),
        );

        let described = catalog
            .describe(&"Box<string>".parse().unwrap())
            .unwrap()
            .unwrap();
        assert_eq!("Box<string>", described.service_type().to_string());
        assert_eq!(
            "Option<string>",
            described.properties()[0].property_type().to_string()
        );
    }

    #[test]
    fn describe_returns_none_for_unknown_types() {
        let catalog = TypeCatalog::new();
        assert!(catalog.describe(&ServiceType::named("Dog")).unwrap().is_none());
        assert!(catalog
            .describe(&"Box<string>".parse().unwrap())
            .unwrap()
            .is_none());
        assert!(catalog
            .describe(&ServiceType::open("Box", 1))
            .unwrap()
            .is_none());
    }
}
