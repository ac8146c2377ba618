use crate::{
    ConstructorDescriptor, InjectError, InjectResult, Member,
    MethodDescriptor, PropertyDescriptor, ServiceType, Svc,
    TypeDescriptorBuilder, Visibility,
};

/// The kind of a described type.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum TypeKind {
    /// A reference type that can be instantiated and derived from.
    Class,

    /// A value type.
    Struct,

    /// A contract with no implementation of its own.
    Interface,

    /// A callable type such as a function pointer or closure signature. These
    /// are activated by wrapping a callable, never through a constructor.
    Delegate,
}

/// Which members a query returns, based on their visibility.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum MemberAccess {
    /// Only public members.
    Public,

    /// Public and non-public members. Private members of base types remain
    /// hidden, since they are not accessible through the derived type.
    All,
}

impl MemberAccess {
    fn includes(self, visibility: Visibility, inherited: bool) -> bool {
        match self {
            MemberAccess::Public => visibility.is_public(),
            MemberAccess::All => !(inherited && visibility == Visibility::Private),
        }
    }
}

/// The base type of a [`TypeDescriptor`].
#[derive(Clone, Debug)]
pub struct BaseType {
    service_type: ServiceType,
    descriptor: Svc<TypeDescriptor>,
}

impl BaseType {
    pub(crate) fn new(
        service_type: ServiceType,
        descriptor: Svc<TypeDescriptor>,
    ) -> Self {
        BaseType {
            service_type,
            descriptor,
        }
    }

    /// Gets the base type as seen from the derived type. For a generic
    /// derived type, this may refer to the derived type's own generic
    /// parameters, as in `RepositoryBase<!0>`.
    #[must_use]
    pub fn service_type(&self) -> &ServiceType {
        &self.service_type
    }

    /// Gets the descriptor of the base type.
    #[must_use]
    pub fn descriptor(&self) -> &Svc<TypeDescriptor> {
        &self.descriptor
    }
}

/// Metadata describing a type: its identity, its base type and the members
/// it declares.
///
/// The members stored on a descriptor are the ones declared by that type.
/// Inherited members are reached through [`TypeDescriptor::base`], and the
/// `get_*` queries combine both the way a reflective runtime would.
#[derive(Clone, Debug)]
pub struct TypeDescriptor {
    pub(crate) service_type: ServiceType,
    pub(crate) kind: TypeKind,
    pub(crate) base: Option<BaseType>,
    pub(crate) constructors: Vec<ConstructorDescriptor>,
    pub(crate) properties: Vec<PropertyDescriptor>,
    pub(crate) methods: Vec<MethodDescriptor>,
}

impl TypeDescriptor {
    /// Starts describing a type of the given kind.
    #[must_use]
    pub fn builder(
        service_type: impl Into<ServiceType>,
        kind: TypeKind,
    ) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder::new(service_type.into(), kind)
    }

    /// Starts describing a class.
    #[must_use]
    pub fn class(service_type: impl Into<ServiceType>) -> TypeDescriptorBuilder {
        TypeDescriptor::builder(service_type, TypeKind::Class)
    }

    /// Starts describing a delegate type.
    #[must_use]
    pub fn delegate(
        service_type: impl Into<ServiceType>,
    ) -> TypeDescriptorBuilder {
        TypeDescriptor::builder(service_type, TypeKind::Delegate)
    }

    /// Gets the identity of this type.
    #[must_use]
    pub fn service_type(&self) -> &ServiceType {
        &self.service_type
    }

    /// Gets the kind of this type.
    #[must_use]
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Returns `true` if this is a delegate type.
    #[must_use]
    pub fn is_delegate(&self) -> bool {
        self.kind == TypeKind::Delegate
    }

    /// Gets the base type, if any.
    #[must_use]
    pub fn base_type(&self) -> Option<&BaseType> {
        self.base.as_ref()
    }

    /// Gets the descriptor of the base type, if any.
    #[must_use]
    pub fn base(&self) -> Option<&TypeDescriptor> {
        self.base.as_ref().map(|base| base.descriptor.as_ref())
    }

    /// Iterates over the base type chain, starting with the immediate base
    /// type.
    #[must_use]
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: self.base() }
    }

    /// Gets the constructors declared on this type, in declaration order.
    #[must_use]
    pub fn constructors(&self) -> &[ConstructorDescriptor] {
        &self.constructors
    }

    /// Gets the properties declared on this type, in declaration order.
    #[must_use]
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    /// Gets the methods declared on this type, in declaration order.
    #[must_use]
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    /// Gets the instance constructors accessible under `access`. Static
    /// constructors are never returned.
    #[must_use]
    pub fn get_constructors(
        &self,
        access: MemberAccess,
    ) -> Vec<&ConstructorDescriptor> {
        self.constructors
            .iter()
            .filter(|constructor| {
                !constructor.is_static()
                    && access.includes(constructor.visibility(), false)
            })
            .collect()
    }

    /// Gets the instance properties accessible under `access`, including
    /// inherited ones. Properties are listed for this type first and then
    /// for each ancestor, each in declaration order. A property that a more
    /// derived type redeclares with the same name is represented only by the
    /// most derived declaration.
    #[must_use]
    pub fn get_properties(
        &self,
        access: MemberAccess,
    ) -> Vec<&PropertyDescriptor> {
        let mut found: Vec<&PropertyDescriptor> = Vec::new();
        for (depth, ty) in self.hierarchy().enumerate() {
            for property in &ty.properties {
                if property.is_static()
                    || !access.includes(property.visibility(), depth > 0)
                    || found.iter().any(|seen| seen.name() == property.name())
                {
                    continue;
                }

                found.push(property);
            }
        }

        found
    }

    /// Gets the instance methods accessible under `access`, including
    /// inherited ones. Ordering and hiding follow
    /// [`get_properties`](TypeDescriptor::get_properties), except that a
    /// method is hidden by a method with the same signature rather than
    /// just the same name.
    #[must_use]
    pub fn get_methods(&self, access: MemberAccess) -> Vec<&MethodDescriptor> {
        let mut found: Vec<&MethodDescriptor> = Vec::new();
        for (depth, ty) in self.hierarchy().enumerate() {
            for method in &ty.methods {
                if method.is_static()
                    || !access.includes(method.visibility(), depth > 0)
                    || found.iter().any(|seen| seen.has_same_signature(method))
                {
                    continue;
                }

                found.push(method);
            }
        }

        found
    }

    /// Gets the properties declared on exactly this type with the given
    /// visibility, ignoring access rules.
    #[must_use]
    pub fn declared_properties_with(
        &self,
        visibility: Visibility,
    ) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter().filter(move |property| {
            !property.is_static() && property.visibility() == visibility
        })
    }

    /// Creates the descriptor of a constructed generic type from this open
    /// definition, replacing every generic parameter in the type, its
    /// members and its base types with `arguments`.
    ///
    /// ```
    /// use injection_engine::{
    ///     PropertyDescriptor, ServiceType, TypeArg, TypeDescriptor,
    /// };
    ///
    /// let definition = TypeDescriptor::class(ServiceType::open("Box", 1))
    ///     .property(PropertyDescriptor::new(
    ///         "Items",
    ///         ServiceType::with_arguments("List", [TypeArg::Param(0)]),
    ///     ))
    ///     .build();
    ///
    /// let specialized = definition.specialize(&[ServiceType::named("int")]).unwrap();
    /// assert_eq!("Box<int>", specialized.service_type().to_string());
    /// assert_eq!(
    ///     "List<int>",
    ///     specialized.properties()[0].property_type().to_string()
    /// );
    /// ```
    pub fn specialize(
        &self,
        arguments: &[ServiceType],
    ) -> InjectResult<TypeDescriptor> {
        if !self.service_type.is_generic_definition() {
            return Err(InjectError::invalid_argument(
                self.service_type.to_string(),
                "only open generic definitions can be specialized",
            ));
        }

        if arguments.len() != self.service_type.arity() {
            return Err(InjectError::invalid_argument(
                self.service_type.to_string(),
                format!(
                    "expected {} type arguments but got {}",
                    self.service_type.arity(),
                    arguments.len()
                ),
            ));
        }

        if let Some(open) =
            arguments.iter().find(|ty| ty.contains_generic_parameters())
        {
            return Err(InjectError::invalid_argument(
                open.to_string(),
                "type arguments must not contain generic parameters",
            ));
        }

        let base = self
            .base
            .as_ref()
            .map(|base| specialize_base(base, arguments))
            .transpose()?;

        Ok(TypeDescriptor {
            service_type: self.service_type.substitute(arguments)?,
            kind: self.kind,
            base,
            constructors: self
                .constructors
                .iter()
                .map(|constructor| constructor.specialize(arguments))
                .collect::<InjectResult<_>>()?,
            properties: self
                .properties
                .iter()
                .map(|property| property.specialize(arguments))
                .collect::<InjectResult<_>>()?,
            methods: self
                .methods
                .iter()
                .map(|method| method.specialize(arguments))
                .collect::<InjectResult<_>>()?,
        })
    }

    fn hierarchy(&self) -> impl Iterator<Item = &TypeDescriptor> {
        std::iter::once(self).chain(self.ancestors())
    }
}

fn specialize_base(
    base: &BaseType,
    arguments: &[ServiceType],
) -> InjectResult<BaseType> {
    let service_type = base.service_type.substitute(arguments)?;
    if !base.descriptor.service_type.is_generic_definition() {
        return Ok(BaseType::new(service_type, base.descriptor.clone()));
    }

    let base_arguments = service_type.type_arguments().ok_or_else(|| {
        InjectError::invalid_argument(
            service_type.to_string(),
            "base type is still open after specialization",
        )
    })?;
    let descriptor = base.descriptor.specialize(&base_arguments)?;
    Ok(BaseType::new(service_type, Svc::new(descriptor)))
}

/// An iterator over the ancestors of a type, nearest first.
#[derive(Clone, Debug)]
pub struct Ancestors<'a> {
    next: Option<&'a TypeDescriptor>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a TypeDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.base();
        Some(current)
    }
}

impl std::iter::FusedIterator for Ancestors<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConfigureMember, ParameterDescriptor, TypeArg};

    fn animal() -> Svc<TypeDescriptor> {
        Svc::new(
            TypeDescriptor::class("Animal")
                .constructor(ConstructorDescriptor::new([]))
                .property(
                    PropertyDescriptor::new("Name", "string".into())
                        .with_visibility(Visibility::Private),
                )
                .property(
                    PropertyDescriptor::new("Age", "int".into())
                        .with_visibility(Visibility::Protected),
                )
                .property(PropertyDescriptor::new("Owner", "Person".into()))
                .method(MethodDescriptor::new("Feed", []))
                .build(),
        )
    }

    #[test]
    fn constructors_are_not_inherited() {
        let dog = TypeDescriptor::class("Dog").extends(&animal()).build();
        assert!(dog.get_constructors(MemberAccess::All).is_empty());
    }

    #[test]
    fn static_and_non_public_constructors_are_filtered() {
        let ty = TypeDescriptor::class("Service")
            .constructor(ConstructorDescriptor::new([]).as_static())
            .constructor(
                ConstructorDescriptor::new([]).with_visibility(Visibility::Internal),
            )
            .constructor(ConstructorDescriptor::new([ParameterDescriptor::new(
                "leash",
                "Leash".into(),
            )]))
            .build();

        assert_eq!(1, ty.get_constructors(MemberAccess::Public).len());
        assert_eq!(2, ty.get_constructors(MemberAccess::All).len());
    }

    #[test]
    fn inherited_private_properties_are_hidden() {
        let dog = TypeDescriptor::class("Dog").extends(&animal()).build();

        let public: Vec<_> = dog
            .get_properties(MemberAccess::Public)
            .into_iter()
            .map(Member::name)
            .collect();
        assert_eq!(vec!["Owner"], public);

        let all: Vec<_> = dog
            .get_properties(MemberAccess::All)
            .into_iter()
            .map(Member::name)
            .collect();
        assert_eq!(vec!["Age", "Owner"], all);
    }

    #[test]
    fn own_private_properties_are_visible_with_non_public_access() {
        let animal = animal();
        let names: Vec<_> = animal
            .get_properties(MemberAccess::All)
            .into_iter()
            .map(Member::name)
            .collect();
        assert_eq!(vec!["Name", "Age", "Owner"], names);
    }

    #[test]
    fn redeclared_property_resolves_to_most_derived() {
        let dog = TypeDescriptor::class("Dog")
            .extends(&animal())
            .property(PropertyDescriptor::new("Owner", "Trainer".into()))
            .build();

        let properties = dog.get_properties(MemberAccess::Public);
        assert_eq!(1, properties.len());
        assert_eq!(Some(&ServiceType::named("Dog")), properties[0].declaring_type());
        assert_eq!(&ServiceType::named("Trainer"), properties[0].property_type());
    }

    #[test]
    fn ancestors_are_nearest_first() {
        let dog = Svc::new(TypeDescriptor::class("Dog").extends(&animal()).build());
        let puppy = TypeDescriptor::class("Puppy").extends(&dog).build();

        let names: Vec<_> = puppy
            .ancestors()
            .map(|ty| ty.service_type().to_string())
            .collect();
        assert_eq!(vec!["Dog", "Animal"], names);
    }

    #[test]
    fn specialize_rewrites_members_and_generic_bases() {
        let base = Svc::new(
            TypeDescriptor::class(ServiceType::open("RepositoryBase", 1))
                .property(PropertyDescriptor::new(
                    "Items",
                    ServiceType::with_arguments("List", [TypeArg::Param(0)]),
                ))
                .build(),
        );
        let repository = TypeDescriptor::class(ServiceType::open("SqlRepository", 1))
            .extends_generic(
                ServiceType::with_arguments("RepositoryBase", [TypeArg::Param(0)]),
                &base,
            )
            .constructor(ConstructorDescriptor::new([ParameterDescriptor::new(
                "seed",
                ServiceType::with_arguments("Seed", [TypeArg::Param(0)]),
            )]))
            .build();

        let specialized = repository
            .specialize(&[ServiceType::named("Customer")])
            .unwrap();
        assert_eq!("SqlRepository<Customer>", specialized.service_type().to_string());
        assert_eq!(
            "Seed<Customer>",
            specialized.constructors()[0].parameters()[0]
                .parameter_type()
                .to_string()
        );

        let base = specialized.base().unwrap();
        assert_eq!("RepositoryBase<Customer>", base.service_type().to_string());
        assert_eq!("List<Customer>", base.properties()[0].property_type().to_string());
        assert_eq!(
            Some(&"RepositoryBase<Customer>".parse::<ServiceType>().unwrap()),
            base.properties()[0].declaring_type()
        );
    }

    #[test]
    fn specialize_rejects_non_definitions_and_wrong_arity() {
        let animal = animal();
        assert!(animal.specialize(&[ServiceType::named("int")]).is_err());

        let open = TypeDescriptor::class(ServiceType::open("Pair", 2)).build();
        assert!(open.specialize(&[ServiceType::named("int")]).is_err());
        assert!(open
            .specialize(&[ServiceType::named("int"), ServiceType::open("List", 1)])
            .is_err());
    }
}
