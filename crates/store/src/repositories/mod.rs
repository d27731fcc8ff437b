//! Repositories: one type per entity, one method per atomic operation.

pub mod account;
pub mod journal;
pub mod load;
pub mod withdrawal;
