pub(crate) mod driver;
pub(crate) mod intro;
pub(crate) mod timer;
