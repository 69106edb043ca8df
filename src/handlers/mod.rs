//! HTTP handlers, one per endpoint.

pub mod baked_good;
pub mod bakery;
pub mod index;

pub use index::index;
