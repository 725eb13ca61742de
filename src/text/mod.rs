pub(crate) mod anchor;
pub(crate) mod dynamic;
pub(crate) mod format;
