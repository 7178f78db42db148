pub(crate) mod info;
pub(crate) mod list;
pub(crate) mod quest;
pub(crate) mod status;
pub(crate) mod user;
