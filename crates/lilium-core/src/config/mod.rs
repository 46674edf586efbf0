mod control;
mod env;
mod search;

pub use control::ControlConfig;
pub use search::SearchConfig;
