//! Serde models for Winged API resources.

pub mod container;
pub mod item;

pub use container::Container;
pub use item::Item;
