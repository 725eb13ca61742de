pub(crate) mod aspect_set;
pub(crate) mod fingerprint;
pub(crate) mod model;
