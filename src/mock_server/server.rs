//! Mock Bugspad server.
//!
//! Provides an axum-based HTTP server that simulates a Bugspad instance.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A mock Bugspad server for testing.
///
/// The server runs in the background and can be used to test the client
/// against a realistic wire-format implementation, including the
/// plain-text `"Authentication failure."` / `"Success"` responses.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL and [`Fixtures::user`] for
    /// credentials the default scenario accepts.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    /// Note that an empty state accepts no credentials, so mutating
    /// calls will fail until a user is added.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating a `BugspadClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        let scenario = Fixtures::default_scenario();
        Self::state_from_scenario(scenario)
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for (user, password) in &scenario.users {
            state = state.with_user(user, password);
        }
        for product in scenario.products {
            state = state.with_product(product);
        }
        for component in scenario.components {
            state = state.with_component(component);
        }
        for release in &scenario.releases {
            state = state.with_release(release);
        }
        for bug in scenario.bugs {
            state = state.with_bug(bug);
        }

        state
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Bug routes
            .route("/bug/", post(handlers::create_bug))
            .route("/comment/", post(handlers::add_comment))
            .route("/updatebug/", post(handlers::update_bug))
            .route("/bug/cc", post(handlers::bug_cc))
            .route("/latestcreated/", get(handlers::latest_created))
            .route("/latestupdated/", get(handlers::latest_updated))
            // Catalog routes
            .route("/components/:product_id/", get(handlers::list_components))
            .route("/component/", post(handlers::add_component))
            .route(
                "/releases/",
                get(handlers::list_releases).post(handlers::add_release),
            )
            .route("/product/", post(handlers::add_product))
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
