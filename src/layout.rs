pub(crate) mod measure;
pub(crate) mod pose;
pub(crate) mod provider;
