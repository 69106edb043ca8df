//! Request extractors.

mod form;

pub use form::ValidForm;
