//! Bugspad API client library.
//!
//! A Rust library for interacting with the Bugspad bug tracker's REST
//! API. One client type, [`BugspadClient`], wraps the authenticated
//! HTTP calls; it is either *general* (create bugs, manage the catalog,
//! read listings) or *bug-scoped* (comment, update, CC management on a
//! specific bug). Catalog entities implement the [`Create`] and
//! [`List`] traits.
//!
//! # Quick Start
//!
//! ```no_run
//! use bugspad::{list_recent_created, BugspadClient, List, NewBug, Release};
//!
//! #[tokio::main]
//! async fn main() -> bugspad::Result<()> {
//!     // Create client from environment variables
//!     let client = BugspadClient::from_env()?;
//!
//!     // File a bug; the returned client is scoped to it
//!     let bug = client
//!         .create_bug(&NewBug::new("Panic on boot", "Full details here", 7))
//!         .await?;
//!     println!("Filed bug {}", bug.bug_id().unwrap());
//!
//!     bug.add_comment("Reproduced on the latest build").await?;
//!     bug.add_cc("qa@example.org").await?;
//!
//!     // General listings need no bug scope
//!     let recent = list_recent_created(&client).await?;
//!     println!("{} recently filed bugs", recent.len());
//!
//!     let releases = Release::list(&client, &()).await?;
//!     println!("{} releases", releases.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - Bug-scoped operations ([`BugspadClient::add_comment`],
//!   [`BugspadClient::update_bug`], [`BugspadClient::add_cc`],
//!   [`BugspadClient::remove_cc`]) are methods on the client and fail
//!   with a usage error when the client carries no bug id.
//! - [`BugspadClient::create_bug`] returns a fresh client scoped to the
//!   newly assigned bug id.
//! - [`Component`], [`Product`] and [`Release`] implement [`Create`]
//!   and, where a listing endpoint exists, [`List`].
//! - Optional bug attributes go through [`BugFields`]: the whitelist is
//!   enforced before any request leaves the process.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `BUGSPAD_URL` (required) - Base URL of the Bugspad server
//! - `BUGSPAD_USER` (required) - Account email for mutating calls
//! - `BUGSPAD_PASSWORD` (required) - Account password

mod client;
mod error;
mod models;
mod traits;

pub mod cli;
pub mod output;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::BugspadClient;
pub use error::{BugspadError, Result};

// Re-export traits
pub use traits::{Create, List};

// Re-export models
pub use models::{
    // Bug types
    BugFields,
    BugSummary,
    EmailList,
    NewBug,
    OPTIONAL_FIELDS,
    // Component types
    Component,
    ComponentQuery,
    NewComponent,
    // Product types
    NewProduct,
    Product,
    // Release types
    NewRelease,
    Release,
};

// Re-export convenience functions
pub use models::{list_components, list_recent_created, list_recent_updated, list_releases};
