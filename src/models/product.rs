//! Product model and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::{BugspadClient, Credentials};
use crate::error::{BugspadError, Result};
use crate::models::id_from_value;
use crate::traits::Create;

/// A product tracked by the server.
///
/// Products are the top-level containers: components belong to
/// products, and bugs are filed against components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// The product id.
    pub id: u64,
    /// Product name.
    pub name: String,
    /// Free-text description.
    pub description: String,
}

/// Parameters for registering a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Product name.
    pub name: String,
    /// Free-text description.
    pub description: String,
}

impl NewProduct {
    /// Create parameters for a new product.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

#[derive(Serialize)]
struct CreateProductPayload<'a> {
    #[serde(flatten)]
    auth: &'a Credentials,
    name: &'a str,
    description: &'a str,
}

#[derive(Deserialize)]
struct ProductResponse {
    id: serde_json::Value,
    name: String,
    description: String,
}

#[async_trait]
impl Create for Product {
    type Params = NewProduct;

    #[tracing::instrument(skip(client, params))]
    async fn create(client: &BugspadClient, params: &NewProduct) -> Result<Self> {
        let payload = CreateProductPayload {
            auth: client.credentials(),
            name: &params.name,
            description: &params.description,
        };

        let raw: ProductResponse = client.post_json("product/", &payload).await?;

        let id = id_from_value(&raw.id).ok_or_else(|| BugspadError::UnexpectedResponse {
            message: format!("product id is not an integer: {}", raw.id),
        })?;

        Ok(Product {
            id,
            name: raw.name,
            description: raw.description,
        })
    }
}
