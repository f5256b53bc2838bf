pub(crate) mod coords;
pub(crate) mod core;
pub(crate) mod error;
