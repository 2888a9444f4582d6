//! Release model and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::{BugspadClient, Credentials, SUCCESS};
use crate::error::{BugspadError, Result};
use crate::traits::{Create, List};

/// A release name known to the server.
///
/// Releases are plain names; the server keeps no further record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Release {
    /// The release name (e.g., "BP-2").
    pub name: String,
}

/// Parameters for registering a new release.
#[derive(Debug, Clone)]
pub struct NewRelease {
    /// The release name.
    pub name: String,
}

impl NewRelease {
    /// Create parameters for a new release.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Serialize)]
struct CreateReleasePayload<'a> {
    #[serde(flatten)]
    auth: &'a Credentials,
    name: &'a str,
}

#[async_trait]
impl Create for Release {
    type Params = NewRelease;

    #[tracing::instrument(skip(client, params))]
    async fn create(client: &BugspadClient, params: &NewRelease) -> Result<Self> {
        let payload = CreateReleasePayload {
            auth: client.credentials(),
            name: &params.name,
        };

        let text = client.post_text("releases/", &payload).await?;
        if text != SUCCESS {
            return Err(BugspadError::UnexpectedResponse { message: text });
        }

        Ok(Release {
            name: params.name.clone(),
        })
    }
}

#[async_trait]
impl List for Release {
    type Query = ();

    #[tracing::instrument(skip(client))]
    async fn list(client: &BugspadClient, _query: &()) -> Result<Vec<Self>> {
        let names: Vec<String> = client.get_json("releases/").await?;
        Ok(names.into_iter().map(|name| Release { name }).collect())
    }
}

/// List the known release names.
pub async fn list_releases(client: &BugspadClient) -> Result<Vec<String>> {
    let releases = Release::list(client, &()).await?;
    Ok(releases.into_iter().map(|r| r.name).collect())
}
