//! Component model and trait implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::{BugspadClient, Credentials};
use crate::error::{BugspadError, Result};
use crate::models::id_from_value;
use crate::traits::{Create, List};

/// The marker the server puts in the id field when the owning product
/// does not exist.
const NO_SUCH_PRODUCT: &str = "No such product.";

/// A component of a product.
///
/// Bugs are filed against components; every component belongs to one
/// product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// The component id.
    pub id: u64,
    /// Component name, unique within its product.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// The owning product, when known. The listing endpoint implies it
    /// from the request; the create response does not repeat it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,
}

/// Parameters for registering a new component.
#[derive(Debug, Clone)]
pub struct NewComponent {
    /// Component name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// The product this component belongs to.
    pub product_id: u64,
}

impl NewComponent {
    /// Create parameters for a new component.
    pub fn new(name: impl Into<String>, description: impl Into<String>, product_id: u64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            product_id,
        }
    }
}

/// Query for listing the components of a product.
#[derive(Debug, Clone)]
pub struct ComponentQuery {
    /// The product whose components to list.
    pub product_id: u64,
}

#[derive(Serialize)]
struct CreateComponentPayload<'a> {
    #[serde(flatten)]
    auth: &'a Credentials,
    name: &'a str,
    description: &'a str,
    product_id: u64,
}

/// Raw create response; the id field doubles as the error channel.
#[derive(Deserialize)]
struct ComponentResponse {
    id: serde_json::Value,
    name: String,
    description: String,
}

#[async_trait]
impl Create for Component {
    type Params = NewComponent;

    #[tracing::instrument(skip(client, params), fields(product_id = params.product_id))]
    async fn create(client: &BugspadClient, params: &NewComponent) -> Result<Self> {
        let payload = CreateComponentPayload {
            auth: client.credentials(),
            name: &params.name,
            description: &params.description,
            product_id: params.product_id,
        };

        let raw: ComponentResponse = client.post_json("component/", &payload).await?;

        if raw.id == serde_json::Value::String(NO_SUCH_PRODUCT.to_string()) {
            return Err(BugspadError::NoSuchProduct {
                product_id: params.product_id,
            });
        }

        let id = id_from_value(&raw.id).ok_or_else(|| BugspadError::UnexpectedResponse {
            message: format!("component id is not an integer: {}", raw.id),
        })?;

        Ok(Component {
            id,
            name: raw.name,
            description: raw.description,
            product_id: Some(params.product_id),
        })
    }
}

#[async_trait]
impl List for Component {
    type Query = ComponentQuery;

    #[tracing::instrument(skip(client, query), fields(product_id = query.product_id))]
    async fn list(client: &BugspadClient, query: &ComponentQuery) -> Result<Vec<Self>> {
        let listing = list_components(client, query.product_id).await?;
        let mut components: Vec<Component> = listing.into_values().collect();
        components.sort_by_key(|c| c.id);
        Ok(components)
    }
}

/// List a product's components, keyed by name.
///
/// The server answers with a mapping of name to an (id, name,
/// description) triple; an unknown product yields an empty mapping.
///
/// # Example
///
/// ```no_run
/// use bugspad::{list_components, BugspadClient};
///
/// # async fn example() -> bugspad::Result<()> {
/// let client = BugspadClient::from_env()?;
/// let components = list_components(&client, 1).await?;
/// if let Some(kernel) = components.get("kernel") {
///     println!("kernel component id: {}", kernel.id);
/// }
/// # Ok(())
/// # }
/// ```
#[tracing::instrument(skip(client))]
pub async fn list_components(
    client: &BugspadClient,
    product_id: u64,
) -> Result<HashMap<String, Component>> {
    let path = format!("components/{product_id}/");
    let raw: HashMap<String, (u64, String, String)> = client.get_json(&path).await?;

    Ok(raw
        .into_iter()
        .map(|(key, (id, name, description))| {
            (
                key,
                Component {
                    id,
                    name,
                    description,
                    product_id: Some(product_id),
                },
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_payload_includes_auth() {
        let auth = Credentials {
            user: "dev@example.org".to_string(),
            password: "secret".to_string(),
        };
        let payload = CreateComponentPayload {
            auth: &auth,
            name: "kernel",
            description: "The kernel component",
            product_id: 1,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "user": "dev@example.org",
                "password": "secret",
                "name": "kernel",
                "description": "The kernel component",
                "product_id": 1,
            })
        );
    }

    #[test]
    fn test_component_response_tolerates_string_id() {
        let raw: ComponentResponse =
            serde_json::from_value(json!({ "id": "12", "name": "n", "description": "d" }))
                .unwrap();
        assert_eq!(id_from_value(&raw.id), Some(12));
    }
}
