//! Trait definitions for Bugspad operations.
//!
//! Catalog entity types implement the traits they support, encapsulating
//! endpoint differences in the implementations. Bug-scoped operations
//! live on [`crate::BugspadClient`] itself because they depend on the
//! client's bug id.

mod create;
mod list;

pub use create::Create;
pub use list::List;
