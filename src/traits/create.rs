//! Create trait for registering new catalog entities.

use async_trait::async_trait;

use crate::client::BugspadClient;
use crate::error::Result;

/// Create a new entity on the server.
///
/// Implement this trait for entity types that can be registered through
/// a dedicated endpoint (components, products, releases). Creation is a
/// mutating call, so the client's credentials travel with the payload.
///
/// # Example
///
/// ```ignore
/// use bugspad::{BugspadClient, Component, Create, NewComponent};
///
/// let client = BugspadClient::from_env()?;
/// let component = Component::create(
///     &client,
///     &NewComponent::new("kernel", "The kernel component", 1),
/// ).await?;
/// ```
#[async_trait]
pub trait Create: Sized {
    /// Parameters describing the entity to create.
    type Params: Send + Sync;

    /// Create the entity and return the server's record of it.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected, a referenced
    /// entity does not exist, or the request fails.
    async fn create(client: &BugspadClient, params: &Self::Params) -> Result<Self>;
}
