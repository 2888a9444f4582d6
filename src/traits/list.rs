//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::client::BugspadClient;
use crate::error::Result;

/// List entities of a given type.
///
/// Implement this trait for entity types that have a listing endpoint.
/// Bugspad listings are small and unpaginated; the server returns the
/// full collection in one response.
///
/// # Example
///
/// ```ignore
/// use bugspad::{BugspadClient, List, Release};
///
/// let client = BugspadClient::from_env()?;
/// let releases = Release::list(&client, &()).await?;
/// ```
#[async_trait]
pub trait List: Sized {
    /// Query parameters for the listing (use `()` when none apply).
    type Query: Send + Sync;

    /// List entities matching the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be
    /// decoded.
    async fn list(client: &BugspadClient, query: &Self::Query) -> Result<Vec<Self>>;
}
