//! Shared helpers.

pub(crate) mod retry;
