pub(crate) mod builder;
pub(crate) mod hydrate;
pub(crate) mod model;
