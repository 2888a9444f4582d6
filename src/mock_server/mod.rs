//! Mock Bugspad server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates a Bugspad
//! instance for integration and end-to-end testing. Unlike wiremock which
//! mocks at the HTTP level per-test, this server maintains state across
//! requests, enabling realistic workflow testing (file a bug, comment on
//! it, update it, read it back from the recent listings).
//!
//! # Example
//!
//! ```ignore
//! use bugspad::mock_server::{Fixtures, MockServer};
//! use bugspad::{BugspadClient, NewBug};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let (user, password) = Fixtures::user();
//!     let client = BugspadClient::new(server.url(), user, password).unwrap();
//!
//!     let bug = client.create_bug(&NewBug::new("s", "d", 1)).await.unwrap();
//!     assert!(bug.bug_id().is_some());
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::{BugRecord, MockState};
