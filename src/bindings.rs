mod binding;
mod multimap;
mod request;

pub use binding::*;
pub use multimap::*;
pub use request::*;
