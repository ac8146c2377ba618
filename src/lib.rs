//! # Binding resolution and member selection.
//!
//! This crate is the decision procedure at the heart of a runtime dependency
//! injection container. Given a registry of bindings and a requested service
//! type, it decides which bindings could satisfy the request. Given the
//! implementation type a planner settled on, it decides which constructor,
//! properties and methods of that type should receive injected values.
//!
//! Activation itself (calling constructors, caching instances in scopes,
//! formatting friendly error messages) belongs to the container wrapped
//! around this engine and is not provided here.
//!
//! By default, bindings and strategies are shared through thread-safe
//! pointers. This is because [`Arc<T>`](std::sync::Arc) is used to hold
//! them. This can be changed to [`Rc<T>`](std::rc::Rc) by disabling default
//! features and enabling the "rc" feature:
//!
//! ```text
//! [dependencies.injection_engine]
//! version = "*" # Replace with the version you want to use
//! default-features = false
//! features = ["rc"]
//! ```
//!
//! ## Type metadata
//!
//! Rust has no runtime reflection, so the engine works over explicit type
//! metadata. A [`ServiceType`] identifies a type structurally (a name plus
//! generic arguments, where open generic slots are positional parameters),
//! and a [`TypeDescriptor`] lists the constructors, properties and methods
//! of an implementation type together with its base type. Descriptors can
//! be collected into a [`TypeCatalog`], which also produces descriptors of
//! constructed generic types from their registered definitions.
//!
//! ## Binding resolution
//!
//! Bindings are stored in a [`BindingMap`], a [`Multimap`] from the exact
//! service type a binding was registered for to the ordered list of
//! bindings for that type. A [`ResolverChain`] asks each of its
//! [`BindingResolver`]s in turn which bindings apply to a request and
//! concatenates their answers:
//!
//! - [`StandardBindingResolver`] returns the bindings registered for exactly
//!   the requested type.
//! - [`OpenGenericBindingResolver`] returns, for a constructed generic
//!   request like `IRepository<Customer>`, specialized copies of the
//!   bindings registered for the open definition `IRepository<!0>`.
//!
//! ## Member selection
//!
//! A [`Selector`] enumerates constructor candidates and picks the
//! properties and methods that its [`InjectionHeuristic`]s approve. A
//! [`ConstructorScorer`] ranks candidates so a planner can choose one.
//!
//! ## Example
//!
//! ```
//! use injection_engine::{
//!     Binding, BindingMap, ConstructorDescriptor, Inject, InjectResult,
//!     ParameterDescriptor, PropertyDescriptor, ResolverChain, Selector,
//!     ServiceType, Svc, TypeCatalog, TypeDescriptor, ConfigureMember,
//! };
//!
//! fn main() -> InjectResult<()> {
//!     // Describe an open generic implementation type
//!     let mut catalog = TypeCatalog::new();
//!     catalog.register(
//!         TypeDescriptor::class(ServiceType::open("SqlRepository", 1))
//!             .constructor(ConstructorDescriptor::new([
//!                 ParameterDescriptor::new("connection", "Connection".parse()?),
//!             ]))
//!             .property(
//!                 PropertyDescriptor::new("Logger", ServiceType::named("ILogger"))
//!                     .with_attribute(Inject),
//!             )
//!             .build(),
//!     );
//!
//!     // Bind the open contract to the open implementation
//!     let mut bindings = BindingMap::new();
//!     bindings.register(
//!         Binding::new(ServiceType::open("IRepository", 1))
//!             .to(ServiceType::open("SqlRepository", 1)),
//!     );
//!
//!     // Resolve a constructed request
//!     let request: ServiceType = "IRepository<Customer>".parse()?;
//!     let chain = ResolverChain::default();
//!     let matches = chain.resolve_all(&bindings, &request)?;
//!     assert_eq!(1, matches.len());
//!
//!     let implementation = matches[0].target_type().unwrap().clone();
//!     assert_eq!("SqlRepository<Customer>", implementation.to_string());
//!
//!     // Plan the activation of the implementation
//!     let descriptor = catalog.describe(&implementation)?.unwrap();
//!     let selector = Selector::default();
//!     let constructor = selector.select_constructor(&descriptor)?.unwrap();
//!     assert_eq!(1, constructor.parameters().len());
//!
//!     let properties = selector.select_properties_for_injection(&descriptor)?;
//!     assert_eq!(1, properties.len());
//!
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![warn(missing_docs)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::doc_markdown,
    clippy::needless_doctest_main
)]

#[cfg(not(any(feature = "arc", feature = "rc")))]
compile_error!(
    "Either the 'arc' or 'rc' feature must be enabled (but not both)."
);

#[cfg(all(feature = "arc", feature = "rc"))]
compile_error!(
    "The 'arc' and 'rc' features are mutually exclusive and cannot be enabled together."
);

mod bindings;
mod resolution;
mod selection;
mod service;
mod types;

pub use bindings::*;
pub use resolution::*;
pub use selection::*;
pub use service::*;
pub use types::*;

#[cfg(test)]
mod tests;
