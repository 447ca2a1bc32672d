pub(crate) mod auth_header;
pub(crate) mod lifecycle;
pub(crate) mod notice;
pub(crate) mod pagination;
pub(crate) mod remote;
pub(crate) mod session;
