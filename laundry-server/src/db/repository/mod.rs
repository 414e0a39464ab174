//! Repository Module
//!
//! SQL for each table as free functions over a `SqlitePool` (or an open
//! transaction where a read-modify-write needs one).

pub mod customer;
pub mod notification;
pub mod order;
pub mod setting;

pub use crate::store::{StoreError as RepoError, StoreResult as RepoResult};
