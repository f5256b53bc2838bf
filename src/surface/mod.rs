pub(crate) mod binding;
pub(crate) mod props;
