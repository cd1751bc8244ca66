pub(crate) mod ease;
pub(crate) mod engine;
pub(crate) mod scene;
pub(crate) mod timeline;
pub(crate) mod tween;
