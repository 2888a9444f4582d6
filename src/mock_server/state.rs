//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Bugspad server.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::{Component, Product};

/// A bug as stored by the mock server.
#[derive(Debug, Clone)]
pub struct BugRecord {
    /// The bug id.
    pub id: u64,
    /// One-line summary.
    pub summary: String,
    /// Full description.
    pub description: String,
    /// The component the bug is filed against.
    pub component_id: u64,
    /// Current status.
    pub status: String,
    /// Merged optional fields (everything except status).
    pub fields: Map<String, Value>,
    /// CC addresses.
    pub cc: Vec<String>,
}

impl BugRecord {
    /// The JSON-encoded {id, status, summary} string the recent-bugs
    /// endpoints put in their arrays.
    pub fn summary_line(&self) -> String {
        serde_json::json!({
            "id": self.id,
            "status": self.status,
            "summary": self.summary,
        })
        .to_string()
    }
}

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Accounts allowed to make mutating calls (user -> password).
    pub users: HashMap<String, String>,

    /// Bugs indexed by id. Ids are assigned in creation order, so key
    /// order is creation order.
    pub bugs: BTreeMap<u64, BugRecord>,

    /// Comments indexed by id: (bug id, text).
    pub comments: BTreeMap<u64, (u64, String)>,

    /// Components indexed by id.
    pub components: BTreeMap<u64, Component>,

    /// Products indexed by id.
    pub products: BTreeMap<u64, Product>,

    /// Known release names, in registration order.
    pub releases: Vec<String>,

    /// Bug ids in touch order, most recent last.
    updated: Vec<u64>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add an account.
    pub fn with_user(mut self, user: &str, password: &str) -> Self {
        self.users.insert(user.to_string(), password.to_string());
        self
    }

    /// Add a product.
    pub fn with_product(mut self, product: Product) -> Self {
        self.products.insert(product.id, product);
        self
    }

    /// Add a component.
    pub fn with_component(mut self, component: Component) -> Self {
        self.components.insert(component.id, component);
        self
    }

    /// Add a release name.
    pub fn with_release(mut self, name: &str) -> Self {
        self.releases.push(name.to_string());
        self
    }

    /// Add a bug.
    pub fn with_bug(mut self, bug: BugRecord) -> Self {
        self.updated.push(bug.id);
        self.bugs.insert(bug.id, bug);
        self
    }

    /// Check the credentials of a mutating request.
    pub fn authenticate(&self, user: &str, password: &str) -> bool {
        self.users.get(user).map(String::as_str) == Some(password)
    }

    /// File a bug and return its id.
    pub fn create_bug(
        &mut self,
        summary: String,
        description: String,
        component_id: u64,
        mut fields: Map<String, Value>,
    ) -> u64 {
        let id = self.bugs.keys().next_back().copied().unwrap_or(0) + 1;

        let status = fields
            .remove("status")
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| "new".to_string());
        let cc = fields
            .remove("emails")
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();

        self.bugs.insert(
            id,
            BugRecord {
                id,
                summary,
                description,
                component_id,
                status,
                fields,
                cc,
            },
        );
        self.updated.push(id);
        id
    }

    /// Record a comment on a bug. Returns the comment id, or None for
    /// an unknown bug.
    pub fn add_comment(&mut self, bug_id: u64, text: String) -> Option<u64> {
        if !self.bugs.contains_key(&bug_id) {
            return None;
        }
        let id = self.comments.keys().next_back().copied().unwrap_or(0) + 1;
        self.comments.insert(id, (bug_id, text));
        self.touch(bug_id);
        Some(id)
    }

    /// Overwrite-merge fields into a bug. Returns false for an unknown bug.
    pub fn update_bug(&mut self, bug_id: u64, fields: Map<String, Value>) -> bool {
        let Some(bug) = self.bugs.get_mut(&bug_id) else {
            return false;
        };

        for (name, value) in fields {
            if name == "status" {
                if let Some(status) = value.as_str() {
                    bug.status = status.to_string();
                }
            } else {
                bug.fields.insert(name, value);
            }
        }

        self.touch(bug_id);
        true
    }

    /// Apply a CC change. Returns false for an unknown bug or action.
    pub fn change_cc(&mut self, bug_id: u64, action: &str, emails: &[String]) -> bool {
        let Some(bug) = self.bugs.get_mut(&bug_id) else {
            return false;
        };

        match action {
            "add" => {
                for email in emails {
                    if !bug.cc.contains(email) {
                        bug.cc.push(email.clone());
                    }
                }
            }
            "remove" => bug.cc.retain(|e| !emails.contains(e)),
            _ => return false,
        }

        self.touch(bug_id);
        true
    }

    /// The ten most recently filed bugs, newest first, each as a
    /// JSON-encoded summary string.
    pub fn latest_created(&self) -> Vec<String> {
        self.bugs
            .values()
            .rev()
            .take(10)
            .map(BugRecord::summary_line)
            .collect()
    }

    /// The ten most recently touched bugs, most recent first.
    pub fn latest_updated(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for id in self.updated.iter().rev() {
            if !seen.contains(id) {
                seen.push(*id);
            }
            if seen.len() == 10 {
                break;
            }
        }
        seen.iter()
            .filter_map(|id| self.bugs.get(id))
            .map(BugRecord::summary_line)
            .collect()
    }

    /// The components of a product in the listing wire format:
    /// name -> (id, name, description). Unknown products yield an
    /// empty mapping.
    pub fn components_of(&self, product_id: u64) -> HashMap<String, (u64, String, String)> {
        self.components
            .values()
            .filter(|c| c.product_id == Some(product_id))
            .map(|c| {
                (
                    c.name.clone(),
                    (c.id, c.name.clone(), c.description.clone()),
                )
            })
            .collect()
    }

    /// Register a component. Returns None when the product is unknown.
    pub fn add_component(
        &mut self,
        name: String,
        description: String,
        product_id: u64,
    ) -> Option<Component> {
        if !self.products.contains_key(&product_id) {
            return None;
        }
        let id = self.components.keys().next_back().copied().unwrap_or(0) + 1;
        let component = Component {
            id,
            name,
            description,
            product_id: Some(product_id),
        };
        self.components.insert(id, component.clone());
        Some(component)
    }

    /// Register a product.
    pub fn add_product(&mut self, name: String, description: String) -> Product {
        let id = self.products.keys().next_back().copied().unwrap_or(0) + 1;
        let product = Product {
            id,
            name,
            description,
        };
        self.products.insert(id, product.clone());
        product
    }

    /// Register a release name.
    pub fn add_release(&mut self, name: String) {
        self.releases.push(name);
    }

    fn touch(&mut self, bug_id: u64) {
        self.updated.push(bug_id);
    }
}
