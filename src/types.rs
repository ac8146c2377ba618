mod attribute;
mod builder;
mod catalog;
mod descriptor;
mod members;
mod service_type;

pub use attribute::*;
pub use builder::*;
pub use catalog::*;
pub use descriptor::*;
pub use members::*;
pub use service_type::*;
