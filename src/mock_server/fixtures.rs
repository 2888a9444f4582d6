//! Test fixtures for the mock Bugspad server.

use serde_json::Map;

use super::state::BugRecord;
use crate::{Component, Product};

/// The data a default mock server starts with.
pub struct DefaultScenario {
    pub users: Vec<(String, String)>,
    pub products: Vec<Product>,
    pub components: Vec<Component>,
    pub releases: Vec<String>,
    pub bugs: Vec<BugRecord>,
}

/// Fixture builders for mock server tests.
pub struct Fixtures;

impl Fixtures {
    /// The account the default scenario accepts.
    pub fn user() -> (&'static str, &'static str) {
        ("dev@example.org", "hunter2")
    }

    /// A small but realistic scenario: one product with two components,
    /// two releases, and three bugs.
    pub fn default_scenario() -> DefaultScenario {
        let (user, password) = Self::user();

        DefaultScenario {
            users: vec![(user.to_string(), password.to_string())],
            products: vec![Self::product(1, "Bugspad")],
            components: vec![
                Self::component(1, "server", 1),
                Self::component(2, "client", 1),
            ],
            releases: vec!["BP-1".to_string(), "BP-2".to_string()],
            bugs: vec![
                Self::bug(1, "new", "Login page renders twice"),
                Self::bug(2, "open", "Comment timestamps are off by one hour"),
                Self::bug(3, "new", "Component list is unsorted"),
            ],
        }
    }

    /// A minimal bug record.
    pub fn bug(id: u64, status: &str, summary: &str) -> BugRecord {
        BugRecord {
            id,
            summary: summary.to_string(),
            description: format!("Description of: {summary}"),
            component_id: 1,
            status: status.to_string(),
            fields: Map::new(),
            cc: Vec::new(),
        }
    }

    /// A minimal component.
    pub fn component(id: u64, name: &str, product_id: u64) -> Component {
        Component {
            id,
            name: name.to_string(),
            description: format!("The {name} component"),
            product_id: Some(product_id),
        }
    }

    /// A minimal product.
    pub fn product(id: u64, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: format!("The {name} product"),
        }
    }
}
