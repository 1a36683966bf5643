//! Command implementations.

pub(crate) mod doctor;
pub(crate) mod init;
pub(crate) mod up;
