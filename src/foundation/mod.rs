pub(crate) mod bands;
pub(crate) mod core;
pub(crate) mod error;
