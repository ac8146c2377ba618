use crate::{InjectError, InjectResult};
use std::{
    any::Any,
    fmt::{Debug, Display, Formatter},
    str::FromStr,
    sync::Arc,
};

/// Structural identity of a type.
///
/// A service type is a name plus an ordered list of generic arguments. Each
/// argument is either another concrete type or a positional generic
/// parameter. Two service types are equal when their names and arguments are
/// equal, so lookups keyed by a service type match by exact identity only.
///
/// - `Animal` is a non-generic type.
/// - `IBox<!0>` is the open definition of a generic type with one parameter.
/// - `IBox<string>` is a generic type constructed with `string`.
///
/// ```
/// use injection_engine::ServiceType;
///
/// let open = ServiceType::open("IBox", 1);
/// let constructed: ServiceType = "IBox<string>".parse().unwrap();
///
/// assert!(open.is_generic_definition());
/// assert!(constructed.is_constructed());
/// assert_eq!(Some(open), constructed.generic_definition());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ServiceType {
    name: Arc<str>,
    arguments: Vec<TypeArg>,
}

/// A generic argument of a [`ServiceType`].
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum TypeArg {
    /// The generic parameter at the given position of the open definition
    /// this argument belongs to.
    Param(usize),

    /// A type.
    Type(ServiceType),
}

impl ServiceType {
    /// Creates a non-generic service type.
    #[must_use]
    pub fn named(name: impl Into<Arc<str>>) -> Self {
        ServiceType {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    /// Creates a service type named after the given Rust type, as reported
    /// by [`std::any::type_name`]. Generic Rust types keep their arguments,
    /// so `of::<Vec<i32>>()` is `alloc::vec::Vec<i32>` with one argument and
    /// parses back to an equal value.
    ///
    /// Names outside the syntax [`FromStr`] understands, such as tuples
    /// (`(i32, u8)`) or trait objects (`dyn Fn(i32)`), are kept as a single
    /// opaque name. Those are the only service types whose displayed form
    /// does not parse back.
    #[must_use]
    pub fn of<T: ?Sized + Any>() -> Self {
        let name = std::any::type_name::<T>();
        name.parse().unwrap_or_else(|_| ServiceType::named(name))
    }

    /// Creates a generic type constructed with the given type arguments.
    #[must_use]
    pub fn generic(
        name: impl Into<Arc<str>>,
        arguments: impl IntoIterator<Item = ServiceType>,
    ) -> Self {
        ServiceType::with_arguments(
            name,
            arguments.into_iter().map(TypeArg::Type),
        )
    }

    /// Creates the open definition of a generic type with `arity`
    /// parameters.
    #[must_use]
    pub fn open(name: impl Into<Arc<str>>, arity: usize) -> Self {
        ServiceType::with_arguments(name, (0..arity).map(TypeArg::Param))
    }

    /// Creates a generic type from arbitrary arguments, which may mix
    /// parameters and types.
    #[must_use]
    pub fn with_arguments(
        name: impl Into<Arc<str>>,
        arguments: impl IntoIterator<Item = TypeArg>,
    ) -> Self {
        ServiceType {
            name: name.into(),
            arguments: arguments.into_iter().collect(),
        }
    }

    /// Gets the name of this type, without its generic arguments.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the generic arguments of this type.
    #[must_use]
    pub fn arguments(&self) -> &[TypeArg] {
        &self.arguments
    }

    /// Gets the number of generic arguments of this type.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.arguments.len()
    }

    /// Returns `true` if this type has any generic arguments.
    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.arguments.is_empty()
    }

    /// Returns `true` if this type is an open generic definition, meaning
    /// each argument is the parameter for its own position.
    #[must_use]
    pub fn is_generic_definition(&self) -> bool {
        self.is_generic()
            && self.arguments.iter().enumerate().all(|(index, arg)| {
                matches!(arg, TypeArg::Param(param) if *param == index)
            })
    }

    /// Returns `true` if a generic parameter appears anywhere in this type.
    #[must_use]
    pub fn contains_generic_parameters(&self) -> bool {
        self.arguments.iter().any(|arg| match arg {
            TypeArg::Param(_) => true,
            TypeArg::Type(ty) => ty.contains_generic_parameters(),
        })
    }

    /// Returns `true` if this is a generic type whose arguments are all
    /// concrete.
    #[must_use]
    pub fn is_constructed(&self) -> bool {
        self.is_generic() && !self.contains_generic_parameters()
    }

    /// Gets the open definition of this generic type, or `None` if it isn't
    /// generic.
    #[must_use]
    pub fn generic_definition(&self) -> Option<ServiceType> {
        self.is_generic()
            .then(|| ServiceType::open(self.name.clone(), self.arity()))
    }

    /// Gets the type arguments of a constructed generic type. Returns `None`
    /// if any argument is a generic parameter.
    #[must_use]
    pub fn type_arguments(&self) -> Option<Vec<ServiceType>> {
        self.arguments
            .iter()
            .map(|arg| match arg {
                TypeArg::Type(ty) if !ty.contains_generic_parameters() => {
                    Some(ty.clone())
                }
                _ => None,
            })
            .collect()
    }

    /// Replaces each generic parameter `!n` in this type with
    /// `arguments[n]`.
    ///
    /// ```
    /// use injection_engine::ServiceType;
    ///
    /// let target: ServiceType = "Cache<!1, List<!0>>".parse().unwrap();
    /// let specialized = target
    ///     .substitute(&[ServiceType::named("Order"), ServiceType::named("int")])
    ///     .unwrap();
    ///
    /// assert_eq!("Cache<int, List<Order>>", specialized.to_string());
    /// ```
    pub fn substitute(
        &self,
        arguments: &[ServiceType],
    ) -> InjectResult<ServiceType> {
        let substituted = self
            .arguments
            .iter()
            .map(|arg| match arg {
                TypeArg::Param(index) => arguments
                    .get(*index)
                    .cloned()
                    .map(TypeArg::Type)
                    .ok_or_else(|| {
                        InjectError::invalid_argument(
                            self.to_string(),
                            format!(
                                "generic parameter !{} has no argument ({} supplied)",
                                index,
                                arguments.len()
                            ),
                        )
                    }),
                TypeArg::Type(ty) => ty.substitute(arguments).map(TypeArg::Type),
            })
            .collect::<InjectResult<Vec<_>>>()?;

        Ok(ServiceType {
            name: self.name.clone(),
            arguments: substituted,
        })
    }
}

impl From<&str> for ServiceType {
    fn from(name: &str) -> Self {
        ServiceType::named(name)
    }
}

impl Display for ServiceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if self.arguments.is_empty() {
            return Ok(());
        }

        write!(f, "<")?;
        for (index, arg) in self.arguments.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }

            match arg {
                TypeArg::Param(param) => write!(f, "!{}", param)?,
                TypeArg::Type(ty) => write!(f, "{}", ty)?,
            }
        }
        write!(f, ">")
    }
}

impl Debug for ServiceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ServiceType")
            .field(&format_args!("{}", self))
            .finish()
    }
}

/// Parses the format produced by [`Display`]: `Name`, `Name<Arg, ...>`, with
/// `!n` standing for the generic parameter at position `n`. Opaque names
/// created by [`ServiceType::of`] for tuples and trait objects are the
/// exception and do not parse.
impl FromStr for ServiceType {
    type Err = InjectError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser { input, position: 0 };
        let ty = parser.parse_type()?;
        parser.skip_whitespace();
        if parser.position < input.len() {
            return Err(parser.error("unexpected trailing characters"));
        }

        Ok(ty)
    }
}

struct Parser<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.position += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.position += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn error(&self, reason: &str) -> InjectError {
        InjectError::invalid_argument(
            self.input,
            format!("{} at offset {}", reason, self.position),
        )
    }

    fn parse_name(&mut self) -> InjectResult<&'a str> {
        self.skip_whitespace();
        let rest = self.rest();
        let length = rest
            .find(|c: char| matches!(c, '<' | '>' | ',' | '!') || c.is_whitespace())
            .unwrap_or(rest.len());
        if length == 0 {
            return Err(self.error("expected a type name"));
        }

        self.position += length;
        Ok(&rest[..length])
    }

    fn parse_type(&mut self) -> InjectResult<ServiceType> {
        let name = self.parse_name()?;
        let mut arguments = Vec::new();
        if self.eat('<') {
            loop {
                arguments.push(self.parse_argument()?);
                if self.eat(',') {
                    continue;
                }
                if self.eat('>') {
                    break;
                }
                return Err(self.error("expected ',' or '>'"));
            }
        }

        Ok(ServiceType::with_arguments(name, arguments))
    }

    fn parse_argument(&mut self) -> InjectResult<TypeArg> {
        if !self.eat('!') {
            return self.parse_type().map(TypeArg::Type);
        }

        let rest = self.rest();
        let length = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let index = rest[..length]
            .parse()
            .map_err(|_| self.error("expected a generic parameter index"))?;
        self.position += length;
        Ok(TypeArg::Param(index))
    }
}
