pub(crate) mod backend;
pub(crate) mod tree;
