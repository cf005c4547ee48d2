// Adapters layer: concrete implementations of the domain ports.

pub mod clock;
pub mod form;
pub mod relay;
pub mod store;
pub mod terminal;
