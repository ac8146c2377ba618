use crate::{BindingMap, BindingResolver, Bindings, ServiceType};

/// Resolves the bindings registered for exactly the requested service type.
///
/// Matching is by identity, not assignability: a binding registered for
/// `Animal` is never returned for a request for `Dog`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardBindingResolver;

impl BindingResolver for StandardBindingResolver {
    fn resolve<'a>(
        &'a self,
        bindings: &'a BindingMap,
        service: &'a ServiceType,
    ) -> Bindings<'a> {
        Box::new(bindings.get(service).iter().cloned().map(Ok))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Binding, InjectResult, Svc};

    #[test]
    fn returns_group_in_registration_order() {
        let mut bindings = BindingMap::new();
        let first = bindings.register(Binding::new("IClock".into()).named("utc"));
        let second = bindings.register(Binding::new("IClock".into()).named("local"));

        let resolved = StandardBindingResolver
            .resolve(&bindings, &"IClock".into())
            .collect::<InjectResult<Vec<_>>>()
            .unwrap();
        assert_eq!(2, resolved.len());
        assert!(Svc::ptr_eq(&first, &resolved[0]));
        assert!(Svc::ptr_eq(&second, &resolved[1]));
    }

    #[test]
    fn does_not_match_other_types() {
        let mut bindings = BindingMap::new();
        bindings.register(Binding::new("Animal".into()).to("Dog".into()));

        let dog = ServiceType::named("Dog");
        assert_eq!(0, StandardBindingResolver.resolve(&bindings, &dog).count());
    }

    #[test]
    fn open_definition_only_matches_itself() {
        let mut bindings = BindingMap::new();
        bindings.register(Binding::new(ServiceType::open("IBox", 1)));

        let constructed = "IBox<string>".parse().unwrap();
        assert_eq!(0, StandardBindingResolver.resolve(&bindings, &constructed).count());

        let open = ServiceType::open("IBox", 1);
        assert_eq!(1, StandardBindingResolver.resolve(&bindings, &open).count());
    }
}
