pub(crate) mod ease;
pub(crate) mod path;
pub(crate) mod timeline;
