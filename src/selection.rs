mod builder;
mod heuristic;
mod scorer;
mod selector;
mod settings;

pub use builder::*;
pub use heuristic::*;
pub use scorer::*;
pub use selector::*;
pub use settings::*;
