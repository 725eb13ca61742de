pub(crate) mod reticle_session;
