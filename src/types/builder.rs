use crate::{
    BaseType, ConfigureMember, ConstructorDescriptor, MethodDescriptor,
    PropertyDescriptor, ServiceType, Svc, TypeDescriptor, TypeKind,
};

/// A builder for a [`TypeDescriptor`]. Members are recorded in the order
/// they are added, which becomes their declaration order.
#[derive(Debug)]
pub struct TypeDescriptorBuilder {
    descriptor: TypeDescriptor,
}

impl TypeDescriptorBuilder {
    pub(crate) fn new(service_type: ServiceType, kind: TypeKind) -> Self {
        TypeDescriptorBuilder {
            descriptor: TypeDescriptor {
                service_type,
                kind,
                base: None,
                constructors: Vec::new(),
                properties: Vec::new(),
                methods: Vec::new(),
            },
        }
    }

    /// Sets a non-generic base type.
    #[must_use]
    pub fn extends(self, base: &Svc<TypeDescriptor>) -> Self {
        let service_type = base.service_type().clone();
        self.extends_generic(service_type, base)
    }

    /// Sets the base type as seen from this type. For a generic base type,
    /// `service_type` may refer to this type's own generic parameters, for
    /// example `RepositoryBase<!0>` as the base of `SqlRepository<!0>`.
    #[must_use]
    pub fn extends_generic(
        mut self,
        service_type: ServiceType,
        base: &Svc<TypeDescriptor>,
    ) -> Self {
        self.descriptor.base = Some(BaseType::new(service_type, base.clone()));
        self
    }

    /// Declares a constructor.
    #[must_use]
    pub fn constructor(mut self, constructor: ConstructorDescriptor) -> Self {
        self.descriptor.constructors.push(constructor);
        self
    }

    /// Declares a property.
    #[must_use]
    pub fn property(mut self, property: PropertyDescriptor) -> Self {
        self.descriptor.properties.push(property);
        self
    }

    /// Declares a method.
    #[must_use]
    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.descriptor.methods.push(method);
        self
    }

    /// Builds the descriptor, recording this type as the declaring type of
    /// every member.
    #[must_use]
    pub fn build(self) -> TypeDescriptor {
        let mut descriptor = self.descriptor;
        let declaring_type = descriptor.service_type.clone();
        for constructor in &mut descriptor.constructors {
            constructor.info_mut().set_declaring_type(&declaring_type);
        }
        for property in &mut descriptor.properties {
            property.info_mut().set_declaring_type(&declaring_type);
        }
        for method in &mut descriptor.methods {
            method.info_mut().set_declaring_type(&declaring_type);
        }

        descriptor
    }

    /// Builds the descriptor into a shared pointer, ready to be used as the
    /// base of another type or registered in a catalog.
    #[must_use]
    pub fn build_shared(self) -> Svc<TypeDescriptor> {
        Svc::new(self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Member;

    #[test]
    fn build_sets_declaring_type() {
        let ty = TypeDescriptor::class("Dog")
            .constructor(ConstructorDescriptor::new([]))
            .property(PropertyDescriptor::new("Name", "string".into()))
            .method(MethodDescriptor::new("Bark", []))
            .build();

        let dog = ServiceType::named("Dog");
        assert_eq!(Some(&dog), ty.constructors()[0].declaring_type());
        assert_eq!(Some(&dog), ty.properties()[0].declaring_type());
        assert_eq!(Some(&dog), ty.methods()[0].declaring_type());
    }

    #[test]
    fn members_keep_declaration_order() {
        let ty = TypeDescriptor::class("Options")
            .property(PropertyDescriptor::new("B", "int".into()))
            .property(PropertyDescriptor::new("A", "int".into()))
            .property(PropertyDescriptor::new("C", "int".into()))
            .build();

        let names: Vec<_> = ty.properties().iter().map(Member::name).collect();
        assert_eq!(vec!["B", "A", "C"], names);
    }

    #[test]
    fn members_have_no_declaring_type_before_build() {
        let property = PropertyDescriptor::new("Name", "string".into());
        assert_eq!(None, property.declaring_type());
    }
}
