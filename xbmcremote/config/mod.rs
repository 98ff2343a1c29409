pub mod options;
pub mod store;

pub use options::{descriptor, Descriptor, OptionKind, OptionMap};
pub use store::{load, save};
