use crate::{Attribute, InjectResult, ServiceType, Svc};
use std::sync::Arc;

/// How accessible a member is from outside its declaring type.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum Visibility {
    /// Accessible from anywhere.
    #[default]
    Public,

    /// Accessible from the declaring type and types derived from it.
    Protected,

    /// Accessible from within the declaring type's module or assembly.
    Internal,

    /// Accessible only from the declaring type itself. Private members are
    /// not visible through derived types.
    Private,
}

impl Visibility {
    /// Returns `true` for [`Visibility::Public`].
    #[must_use]
    pub fn is_public(self) -> bool {
        self == Visibility::Public
    }
}

/// Information common to every kind of member.
#[derive(Clone, Debug)]
pub struct MemberInfo {
    name: Arc<str>,
    declaring_type: Option<ServiceType>,
    visibility: Visibility,
    is_static: bool,
    attributes: Vec<Svc<dyn Attribute>>,
}

impl MemberInfo {
    fn new(name: impl Into<Arc<str>>) -> Self {
        MemberInfo {
            name: name.into(),
            declaring_type: None,
            visibility: Visibility::Public,
            is_static: false,
            attributes: Vec::new(),
        }
    }

    pub(crate) fn set_declaring_type(&mut self, declaring_type: &ServiceType) {
        self.declaring_type = Some(declaring_type.clone());
    }

    fn specialize(&self, arguments: &[ServiceType]) -> InjectResult<Self> {
        Ok(MemberInfo {
            declaring_type: self
                .declaring_type
                .as_ref()
                .map(|ty| ty.substitute(arguments))
                .transpose()?,
            ..self.clone()
        })
    }
}

/// Read access to the information every member carries.
pub trait Member {
    /// Gets the information shared by all members.
    fn info(&self) -> &MemberInfo;

    /// Gets the name of this member.
    fn name(&self) -> &str {
        &self.info().name
    }

    /// Gets the type this member was declared on. This is `None` until the
    /// member has been added to a [`TypeDescriptor`](crate::TypeDescriptor).
    fn declaring_type(&self) -> Option<&ServiceType> {
        self.info().declaring_type.as_ref()
    }

    /// Gets the visibility of this member.
    fn visibility(&self) -> Visibility {
        self.info().visibility
    }

    /// Returns `true` if this member belongs to the type rather than to its
    /// instances.
    fn is_static(&self) -> bool {
        self.info().is_static
    }

    /// Gets every attribute attached to this member.
    fn attributes(&self) -> &[Svc<dyn Attribute>] {
        &self.info().attributes
    }

    /// Gets the first attached attribute of type `A`.
    fn attribute<A: Attribute>(&self) -> Option<&A> {
        self.info()
            .attributes
            .iter()
            .find_map(|attribute| attribute.downcast_ref::<A>())
    }

    /// Returns `true` if an attribute of type `A` is attached.
    fn has_attribute<A: Attribute>(&self) -> bool {
        self.attribute::<A>().is_some()
    }
}

/// Builder-style configuration of member descriptors.
pub trait ConfigureMember: Member + Sized {
    #[doc(hidden)]
    fn info_mut(&mut self) -> &mut MemberInfo;

    /// Sets the visibility of this member.
    #[must_use]
    fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.info_mut().visibility = visibility;
        self
    }

    /// Attaches an attribute to this member.
    #[must_use]
    fn with_attribute(mut self, attribute: impl Attribute) -> Self {
        self.info_mut().attributes.push(Svc::new(attribute));
        self
    }

    /// Makes this member static.
    #[must_use]
    fn as_static(mut self) -> Self {
        self.info_mut().is_static = true;
        self
    }
}

macro_rules! impl_member {
    ($($descriptor:ty),*) => {
        $(
            impl Member for $descriptor {
                fn info(&self) -> &MemberInfo {
                    &self.info
                }
            }

            impl ConfigureMember for $descriptor {
                fn info_mut(&mut self) -> &mut MemberInfo {
                    &mut self.info
                }
            }
        )*
    };
}

impl_member!(ConstructorDescriptor, PropertyDescriptor, MethodDescriptor);

/// A parameter of a constructor or method.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ParameterDescriptor {
    name: Arc<str>,
    parameter_type: ServiceType,
    has_default: bool,
}

impl ParameterDescriptor {
    /// Creates a required parameter.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, parameter_type: ServiceType) -> Self {
        ParameterDescriptor {
            name: name.into(),
            parameter_type,
            has_default: false,
        }
    }

    /// Marks this parameter as having a default value.
    #[must_use]
    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    /// Gets the name of this parameter.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the type of this parameter.
    #[must_use]
    pub fn parameter_type(&self) -> &ServiceType {
        &self.parameter_type
    }

    /// Returns `true` if a value can be omitted for this parameter.
    #[must_use]
    pub fn has_default(&self) -> bool {
        self.has_default
    }

    fn specialize(&self, arguments: &[ServiceType]) -> InjectResult<Self> {
        Ok(ParameterDescriptor {
            parameter_type: self.parameter_type.substitute(arguments)?,
            ..self.clone()
        })
    }
}

fn specialize_parameters(
    parameters: &[ParameterDescriptor],
    arguments: &[ServiceType],
) -> InjectResult<Vec<ParameterDescriptor>> {
    parameters
        .iter()
        .map(|parameter| parameter.specialize(arguments))
        .collect()
}

/// A constructor of a type.
#[derive(Clone, Debug)]
pub struct ConstructorDescriptor {
    info: MemberInfo,
    parameters: Vec<ParameterDescriptor>,
}

impl ConstructorDescriptor {
    /// Creates a public instance constructor.
    #[must_use]
    pub fn new(parameters: impl IntoIterator<Item = ParameterDescriptor>) -> Self {
        ConstructorDescriptor {
            info: MemberInfo::new("new"),
            parameters: parameters.into_iter().collect(),
        }
    }

    /// Gets the parameters of this constructor in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    pub(crate) fn specialize(
        &self,
        arguments: &[ServiceType],
    ) -> InjectResult<Self> {
        Ok(ConstructorDescriptor {
            info: self.info.specialize(arguments)?,
            parameters: specialize_parameters(&self.parameters, arguments)?,
        })
    }
}

/// A property of a type.
#[derive(Clone, Debug)]
pub struct PropertyDescriptor {
    info: MemberInfo,
    property_type: ServiceType,
    can_write: bool,
}

impl PropertyDescriptor {
    /// Creates a public, writable instance property.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, property_type: ServiceType) -> Self {
        PropertyDescriptor {
            info: MemberInfo::new(name),
            property_type,
            can_write: true,
        }
    }

    /// Marks this property as having no setter.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.can_write = false;
        self
    }

    /// Gets the type of this property.
    #[must_use]
    pub fn property_type(&self) -> &ServiceType {
        &self.property_type
    }

    /// Returns `true` if this property has a setter.
    #[must_use]
    pub fn can_write(&self) -> bool {
        self.can_write
    }

    pub(crate) fn specialize(
        &self,
        arguments: &[ServiceType],
    ) -> InjectResult<Self> {
        Ok(PropertyDescriptor {
            info: self.info.specialize(arguments)?,
            property_type: self.property_type.substitute(arguments)?,
            can_write: self.can_write,
        })
    }
}

/// A method of a type.
#[derive(Clone, Debug)]
pub struct MethodDescriptor {
    info: MemberInfo,
    parameters: Vec<ParameterDescriptor>,
}

impl MethodDescriptor {
    /// Creates a public instance method.
    #[must_use]
    pub fn new(
        name: impl Into<Arc<str>>,
        parameters: impl IntoIterator<Item = ParameterDescriptor>,
    ) -> Self {
        MethodDescriptor {
            info: MemberInfo::new(name),
            parameters: parameters.into_iter().collect(),
        }
    }

    /// Gets the parameters of this method in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    /// Returns `true` if both methods have the same name and parameter
    /// types, meaning one hides or overrides the other.
    #[must_use]
    pub fn has_same_signature(&self, other: &MethodDescriptor) -> bool {
        self.name() == other.name()
            && self.parameters.len() == other.parameters.len()
            && self
                .parameters
                .iter()
                .zip(&other.parameters)
                .all(|(a, b)| a.parameter_type == b.parameter_type)
    }

    pub(crate) fn specialize(
        &self,
        arguments: &[ServiceType],
    ) -> InjectResult<Self> {
        Ok(MethodDescriptor {
            info: self.info.specialize(arguments)?,
            parameters: specialize_parameters(&self.parameters, arguments)?,
        })
    }
}

/// A property or method being considered for injection.
#[derive(Clone, Copy, Debug)]
pub enum MemberRef<'a> {
    /// A property.
    Property(&'a PropertyDescriptor),

    /// A method.
    Method(&'a MethodDescriptor),
}

impl<'a> MemberRef<'a> {
    /// Gets the property, if this is one.
    #[must_use]
    pub fn as_property(self) -> Option<&'a PropertyDescriptor> {
        match self {
            MemberRef::Property(property) => Some(property),
            MemberRef::Method(_) => None,
        }
    }

    /// Gets the method, if this is one.
    #[must_use]
    pub fn as_method(self) -> Option<&'a MethodDescriptor> {
        match self {
            MemberRef::Method(method) => Some(method),
            MemberRef::Property(_) => None,
        }
    }
}

impl Member for MemberRef<'_> {
    fn info(&self) -> &MemberInfo {
        match self {
            MemberRef::Property(property) => property.info(),
            MemberRef::Method(method) => method.info(),
        }
    }
}
