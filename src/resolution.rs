mod chain;
mod open_generic;
mod resolver;
mod standard;

pub use chain::*;
pub use open_generic::*;
pub use resolver::*;
pub use standard::*;
