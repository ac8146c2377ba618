use crate::{
    Binding, BindingMap, BindingResolver, Bindings, ConfigureMember,
    ConstructorDescriptor, Inject, InjectionSettings, Member, MemberRef,
    Multimap, ParameterDescriptor, PredicateHeuristic, PropertyDescriptor,
    ResolverChain, Selector, ServiceType, SharedSettings,
    StandardBindingResolver, Svc, TypeCatalog, TypeDescriptor, Visibility,
};
use proptest::prelude::*;

fn animal() -> Svc<TypeDescriptor> {
    TypeDescriptor::class("Animal")
        .constructor(ConstructorDescriptor::new([]))
        .property(
            PropertyDescriptor::new("Name", "string".into())
                .with_visibility(Visibility::Private),
        )
        .build_shared()
}

fn dog() -> Svc<TypeDescriptor> {
    TypeDescriptor::class("Dog")
        .extends(&animal())
        .constructor(ConstructorDescriptor::new([ParameterDescriptor::new(
            "leash",
            "Leash".into(),
        )]))
        .build_shared()
}

fn names(properties: &[&PropertyDescriptor]) -> Vec<String> {
    properties
        .iter()
        .map(|property| property.name().to_owned())
        .collect()
}

fn selector_approving(
    names: &'static [&'static str],
    settings: SharedSettings,
) -> Selector {
    let mut builder = Selector::builder();
    builder.add_heuristic(PredicateHeuristic::new(move |member: MemberRef<'_>| {
        names.iter().any(|name| *name == member.name())
    }));
    builder.use_settings(settings);
    builder.build()
}

#[test]
fn dog_sees_animal_name_only_with_parent_private_injection() {
    let dog = dog();
    let settings = SharedSettings::default();
    let selector = selector_approving(&["Name"], settings.clone());

    let candidates = selector.select_constructor_candidates(&dog).unwrap();
    assert_eq!(1, candidates.len());
    assert_eq!("leash", candidates[0].parameters()[0].name());

    assert!(selector.select_properties_for_injection(&dog).unwrap().is_empty());

    settings.set(InjectionSettings {
        inject_non_public: true,
        inject_parent_private_properties: true,
    });
    let selected = selector.select_properties_for_injection(&dog).unwrap();
    assert_eq!(vec!["Name"], names(&selected));
    assert_eq!(
        Some("Animal"),
        selected[0].declaring_type().map(ServiceType::name)
    );
}

#[test]
fn settings_changes_apply_to_the_next_call() {
    let service = TypeDescriptor::class("Service")
        .constructor(ConstructorDescriptor::new([]))
        .constructor(
            ConstructorDescriptor::new([ParameterDescriptor::new(
                "clock",
                "IClock".into(),
            )])
            .with_visibility(Visibility::Protected),
        )
        .build();

    let settings = SharedSettings::default();
    let selector = selector_approving(&[], settings.clone());
    assert_eq!(
        1,
        selector.select_constructor_candidates(&service).unwrap().len()
    );

    settings.update(|settings| settings.inject_non_public = true);
    assert_eq!(
        2,
        selector.select_constructor_candidates(&service).unwrap().len()
    );

    settings.update(|settings| settings.inject_non_public = false);
    assert_eq!(
        1,
        selector.select_constructor_candidates(&service).unwrap().len()
    );
}

#[test]
fn ancestor_private_properties_are_appended_nearest_first() {
    let animal = TypeDescriptor::class("Animal")
        .property(
            PropertyDescriptor::new("Name", "string".into())
                .with_visibility(Visibility::Private),
        )
        .property(
            PropertyDescriptor::new("Species", "string".into())
                .with_visibility(Visibility::Private),
        )
        .build_shared();
    let dog = TypeDescriptor::class("Dog")
        .extends(&animal)
        .property(
            PropertyDescriptor::new("Breed", "string".into())
                .with_visibility(Visibility::Private),
        )
        .build_shared();
    let puppy = TypeDescriptor::class("Puppy")
        .extends(&dog)
        .property(PropertyDescriptor::new("Toy", "Toy".into()))
        .property(
            PropertyDescriptor::new("Age", "int".into())
                .with_visibility(Visibility::Private),
        )
        .build();

    let selector = selector_approving(
        &["Toy", "Age", "Breed", "Name"],
        SharedSettings::new(InjectionSettings {
            inject_non_public: true,
            inject_parent_private_properties: true,
        }),
    );

    let selected = selector.select_properties_for_injection(&puppy).unwrap();
    assert_eq!(vec!["Toy", "Age", "Breed", "Name"], names(&selected));
}

#[test]
fn heuristic_union_selects_each_member_once() {
    let service = TypeDescriptor::class("Service")
        .property(PropertyDescriptor::new("Clock", "IClock".into()))
        .property(PropertyDescriptor::new("Log", "ILogger".into()).with_attribute(Inject))
        .property(PropertyDescriptor::new("Cache", "ICache".into()))
        .build();

    let mut builder = Selector::builder();
    builder.add_heuristic(PredicateHeuristic::new(|member: MemberRef<'_>| {
        member.has_attribute::<Inject>()
    }));
    builder.add_heuristic(PredicateHeuristic::new(|member: MemberRef<'_>| {
        member.name() != "Cache"
    }));
    let selector = builder.build();

    let selected = selector.select_properties_for_injection(&service).unwrap();
    assert_eq!(vec!["Clock", "Log"], names(&selected));
}

#[test]
fn exact_match_does_not_consider_subtypes() {
    let mut bindings = BindingMap::new();
    bindings.register(Binding::new("Animal".into()).to("Dog".into()));

    let chain = ResolverChain::default();
    assert!(chain
        .resolve_all(&bindings, &"Dog".into())
        .unwrap()
        .is_empty());
    assert_eq!(
        1,
        chain.resolve_all(&bindings, &"Animal".into()).unwrap().len()
    );
}

#[test]
fn open_generic_binding_serves_each_construction() {
    let mut bindings = BindingMap::new();
    bindings.register(
        Binding::new(ServiceType::open("IBox", 1)).to(ServiceType::open("Box", 1)),
    );

    let chain = ResolverChain::default();
    let strings = chain
        .resolve_all(&bindings, &"IBox<string>".parse().unwrap())
        .unwrap();
    let ints = chain
        .resolve_all(&bindings, &"IBox<int>".parse().unwrap())
        .unwrap();

    assert_eq!(1, strings.len());
    assert_eq!(1, ints.len());
    assert_eq!("Box<string>", strings[0].target_type().unwrap().to_string());
    assert_eq!("Box<int>", ints[0].target_type().unwrap().to_string());
    assert_eq!("IBox<string>", strings[0].service().to_string());
}

#[test]
fn open_generic_resolution_feeds_member_selection() {
    let base = TypeDescriptor::class(ServiceType::open("RepositoryBase", 1))
        .property(
            PropertyDescriptor::new(
                "Cache",
                "ICache<!0>".parse().unwrap(),
            )
            .with_attribute(Inject),
        )
        .build_shared();

    let mut catalog = TypeCatalog::new();
    catalog.register(
        TypeDescriptor::class(ServiceType::open("SqlRepository", 1))
            .extends_generic("RepositoryBase<!0>".parse().unwrap(), &base)
            .constructor(ConstructorDescriptor::new([ParameterDescriptor::new(
                "connection",
                "Connection".into(),
            )]))
            .build(),
    );

    let mut bindings = BindingMap::new();
    bindings.register(
        Binding::new(ServiceType::open("IRepository", 1))
            .to(ServiceType::open("SqlRepository", 1)),
    );

    let request = "IRepository<Customer>".parse().unwrap();
    let resolved = ResolverChain::default()
        .resolve_all(&bindings, &request)
        .unwrap();
    let implementation = resolved[0].target_type().unwrap();

    let descriptor = catalog.describe(implementation).unwrap().unwrap();
    assert_eq!("SqlRepository<Customer>", descriptor.service_type().to_string());

    let selector = Selector::default();
    let constructor = selector.select_constructor(&descriptor).unwrap().unwrap();
    assert_eq!("connection", constructor.parameters()[0].name());

    let properties = selector.select_properties_for_injection(&descriptor).unwrap();
    assert_eq!(1, properties.len());
    assert_eq!("ICache<Customer>", properties[0].property_type().to_string());
}

/// Resolves every request to a fixed list of bindings.
struct ListResolver(Vec<Svc<Binding>>);

impl BindingResolver for ListResolver {
    fn resolve<'a>(
        &'a self,
        _bindings: &'a BindingMap,
        _service: &'a ServiceType,
    ) -> Bindings<'a> {
        Box::new(self.0.iter().cloned().map(Ok))
    }
}

#[test]
fn chain_keeps_duplicates_from_different_resolvers() {
    let mut bindings = BindingMap::new();
    let registered = bindings.register(Binding::new("IClock".into()));

    let mut chain = ResolverChain::new();
    chain.add(StandardBindingResolver);
    chain.add(ListResolver(vec![registered.clone()]));

    let resolved = chain.resolve_all(&bindings, &"IClock".into()).unwrap();
    assert_eq!(2, resolved.len());
    assert!(Svc::ptr_eq(&resolved[0], &resolved[1]));
}

#[cfg(feature = "arc")]
#[test]
fn resolution_and_selection_run_concurrently() {
    let mut bindings = BindingMap::new();
    bindings.register(
        Binding::new(ServiceType::open("IBox", 1)).to(ServiceType::open("Box", 1)),
    );
    let chain = ResolverChain::default();
    let selector = selector_approving(
        &["Name"],
        SharedSettings::new(InjectionSettings {
            inject_non_public: true,
            inject_parent_private_properties: true,
        }),
    );
    let dog = dog();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|index| {
                let (chain, bindings, selector, dog) =
                    (&chain, &bindings, &selector, &dog);
                scope.spawn(move || {
                    let request: ServiceType =
                        format!("IBox<Item{}>", index).parse().unwrap();
                    let resolved = chain.resolve_all(bindings, &request).unwrap();
                    let selected =
                        selector.select_properties_for_injection(dog).unwrap();
                    (
                        resolved[0].target_type().unwrap().to_string(),
                        selected.len(),
                    )
                })
            })
            .collect();

        for (index, handle) in handles.into_iter().enumerate() {
            let (target, selected) = handle.join().unwrap();
            assert_eq!(format!("Box<Item{}>", index), target);
            assert_eq!(1, selected);
        }
    });
}

proptest! {
    #[test]
    fn multimap_groups_keep_insertion_order(
        entries in prop::collection::vec((0..4_u8, any::<u16>()), 0..64)
    ) {
        let mut map = Multimap::new();
        for (key, value) in &entries {
            map.add(*key, *value);
        }

        for key in 0..4_u8 {
            let expected: Vec<u16> = entries
                .iter()
                .filter(|(entry_key, _)| *entry_key == key)
                .map(|(_, value)| *value)
                .collect();
            prop_assert_eq!(expected.as_slice(), map.get(&key));
        }
        prop_assert_eq!(entries.len(), map.len());
    }

    #[test]
    fn chain_concatenates_in_resolver_order(
        sizes in prop::collection::vec(0..5_usize, 0..6)
    ) {
        let mut chain = ResolverChain::new();
        let mut expected = Vec::new();
        for (resolver, size) in sizes.iter().enumerate() {
            let produced: Vec<_> = (0..*size)
                .map(|index| {
                    Svc::new(Binding::new("IClock".into()).named(format!("{}.{}", resolver, index)))
                })
                .collect();
            expected.extend(produced.iter().cloned());
            chain.add(ListResolver(produced));
        }

        let resolved = chain
            .resolve_all(&BindingMap::new(), &"IClock".into())
            .unwrap();
        prop_assert_eq!(expected.len(), resolved.len());
        for (wanted, actual) in expected.iter().zip(&resolved) {
            prop_assert!(Svc::ptr_eq(wanted, actual));
        }
    }
}
