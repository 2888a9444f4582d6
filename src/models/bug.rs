//! Bug operations and the bug summary record.
//!
//! Bug filing and the bug-scoped operations (comment, update, CC) are
//! methods on [`BugspadClient`] because they read or produce the
//! client's bug scope. The recent-bugs listings are free functions,
//! since they take no parameters beyond the client.

use serde::{Deserialize, Serialize};

use crate::client::{BugspadClient, Credentials, SUCCESS};
use crate::error::{BugspadError, Result};
use crate::models::fields::{BugFields, EmailList};

/// A bug as returned by the recent-bugs listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugSummary {
    /// The bug id.
    pub id: u64,
    /// Current status (e.g., "new").
    pub status: String,
    /// One-line summary.
    pub summary: String,
}

/// Parameters for filing a new bug.
#[derive(Debug, Clone)]
pub struct NewBug {
    /// One-line summary.
    pub summary: String,
    /// Full description.
    pub description: String,
    /// The component the bug is filed against.
    pub component_id: u64,
    /// Optional whitelisted attributes.
    pub fields: BugFields,
}

impl NewBug {
    /// Create parameters with the three required attributes.
    pub fn new(summary: impl Into<String>, description: impl Into<String>, component_id: u64) -> Self {
        Self {
            summary: summary.into(),
            description: description.into(),
            component_id,
            fields: BugFields::default(),
        }
    }

    /// Attach optional attributes.
    #[must_use]
    pub fn with_fields(mut self, fields: BugFields) -> Self {
        self.fields = fields;
        self
    }
}

#[derive(Serialize)]
struct CreateBugPayload<'a> {
    #[serde(flatten)]
    auth: &'a Credentials,
    summary: &'a str,
    description: &'a str,
    component_id: u64,
    #[serde(flatten)]
    fields: &'a BugFields,
}

#[derive(Serialize)]
struct CommentPayload<'a> {
    #[serde(flatten)]
    auth: &'a Credentials,
    bug_id: u64,
    desc: &'a str,
}

#[derive(Serialize)]
struct UpdateBugPayload<'a> {
    #[serde(flatten)]
    auth: &'a Credentials,
    bug_id: u64,
    #[serde(flatten)]
    fields: &'a BugFields,
}

#[derive(Serialize)]
struct CcPayload<'a> {
    #[serde(flatten)]
    auth: &'a Credentials,
    bug_id: u64,
    emails: &'a EmailList,
    action: &'static str,
}

impl BugspadClient {
    /// File a new bug and return a client scoped to it.
    ///
    /// The server answers with the new bug's id; the returned client is
    /// a clone of this one carrying that id, ready for [`add_comment`],
    /// [`update_bug`] and the CC operations.
    ///
    /// [`add_comment`]: BugspadClient::add_comment
    /// [`update_bug`]: BugspadClient::update_bug
    ///
    /// # Example
    ///
    /// ```no_run
    /// use bugspad::{BugspadClient, NewBug};
    ///
    /// # async fn example() -> bugspad::Result<()> {
    /// let client = BugspadClient::from_env()?;
    /// let bug = client
    ///     .create_bug(&NewBug::new("Kernel panics on boot", "Details...", 7))
    ///     .await?;
    /// bug.add_comment("Reproduced on 6.8").await?;
    /// # Ok(())
    /// # }
    /// ```
    #[tracing::instrument(skip(self, bug), fields(component_id = bug.component_id))]
    pub async fn create_bug(&self, bug: &NewBug) -> Result<BugspadClient> {
        let payload = CreateBugPayload {
            auth: self.credentials(),
            summary: &bug.summary,
            description: &bug.description,
            component_id: bug.component_id,
            fields: &bug.fields,
        };

        let text = self.post_text("bug/", &payload).await?;
        let id: u64 = text
            .parse()
            .map_err(|_| BugspadError::UnexpectedResponse { message: text })?;

        tracing::debug!(bug_id = id, "bug created");
        Ok(self.with_bug_id(id))
    }

    /// Add a comment to the bug this client is scoped to.
    ///
    /// Returns the new comment's id.
    ///
    /// # Errors
    ///
    /// Fails with [`BugspadError::MissingBugId`] on a general client,
    /// before any request is made.
    #[tracing::instrument(skip(self, text))]
    pub async fn add_comment(&self, text: &str) -> Result<u64> {
        let bug_id = self.require_bug_id("add_comment")?;

        let payload = CommentPayload {
            auth: self.credentials(),
            bug_id,
            desc: text,
        };

        let text = self.post_text("comment/", &payload).await?;
        text.parse()
            .map_err(|_| BugspadError::UnexpectedResponse { message: text })
    }

    /// Update the bug this client is scoped to.
    ///
    /// Overwrite-merge semantics: exactly the fields set in `fields` are
    /// sent and replaced on the server; everything else is untouched.
    ///
    /// # Errors
    ///
    /// Fails with [`BugspadError::MissingBugId`] on a general client,
    /// before any request is made.
    #[tracing::instrument(skip(self, fields))]
    pub async fn update_bug(&self, fields: &BugFields) -> Result<()> {
        let bug_id = self.require_bug_id("update_bug")?;

        let payload = UpdateBugPayload {
            auth: self.credentials(),
            bug_id,
            fields,
        };

        let text = self.post_text("updatebug/", &payload).await?;
        expect_success(text)
    }

    /// Add addresses to the bug's CC list.
    ///
    /// Accepts a single address, a fixed-size array, or a vector; all
    /// produce the same payload shape (see [`EmailList`]).
    #[tracing::instrument(skip(self, emails))]
    pub async fn add_cc(&self, emails: impl Into<EmailList>) -> Result<()> {
        self.change_cc("add", emails.into()).await
    }

    /// Remove addresses from the bug's CC list.
    #[tracing::instrument(skip(self, emails))]
    pub async fn remove_cc(&self, emails: impl Into<EmailList>) -> Result<()> {
        self.change_cc("remove", emails.into()).await
    }

    async fn change_cc(&self, action: &'static str, emails: EmailList) -> Result<()> {
        let bug_id = self.require_bug_id("cc")?;

        let payload = CcPayload {
            auth: self.credentials(),
            bug_id,
            emails: &emails,
            action,
        };

        let text = self.post_text("bug/cc", &payload).await?;
        // The server answers CC changes with an empty body
        if text.is_empty() {
            return Ok(());
        }
        expect_success(text)
    }
}

/// The ten most recently filed bugs, newest first.
///
/// The server returns an array of JSON-encoded strings, one per bug;
/// each is decoded individually into a [`BugSummary`].
#[tracing::instrument(skip(client))]
pub async fn list_recent_created(client: &BugspadClient) -> Result<Vec<BugSummary>> {
    let raw: Vec<String> = client.get_json("latestcreated/").await?;
    decode_bug_list(raw)
}

/// The ten most recently updated bugs, most recent first.
#[tracing::instrument(skip(client))]
pub async fn list_recent_updated(client: &BugspadClient) -> Result<Vec<BugSummary>> {
    let raw: Vec<String> = client.get_json("latestupdated/").await?;
    decode_bug_list(raw)
}

fn decode_bug_list(raw: Vec<String>) -> Result<Vec<BugSummary>> {
    raw.iter()
        .map(|entry| serde_json::from_str(entry).map_err(BugspadError::Parse))
        .collect()
}

fn expect_success(text: String) -> Result<()> {
    if text == SUCCESS {
        Ok(())
    } else {
        Err(BugspadError::UnexpectedResponse { message: text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn credentials() -> Credentials {
        Credentials {
            user: "dev@example.org".to_string(),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn test_create_payload_flattens_auth_and_fields() {
        let auth = credentials();
        let bug = NewBug::new("A summary", "A description", 7).with_fields(BugFields {
            priority: Some("high".to_string()),
            ..Default::default()
        });
        let payload = CreateBugPayload {
            auth: &auth,
            summary: &bug.summary,
            description: &bug.description,
            component_id: bug.component_id,
            fields: &bug.fields,
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "user": "dev@example.org",
                "password": "secret",
                "summary": "A summary",
                "description": "A description",
                "component_id": 7,
                "priority": "high",
            })
        );
    }

    #[test]
    fn test_cc_payload_shape_is_identical_for_all_input_forms() {
        let auth = credentials();
        let inputs: Vec<EmailList> = vec![
            "a@example.org".into(),
            ["a@example.org"].into(),
            vec!["a@example.org".to_string()].into(),
        ];

        let expected = json!({
            "user": "dev@example.org",
            "password": "secret",
            "bug_id": 3,
            "emails": ["a@example.org"],
            "action": "add",
        });

        for emails in &inputs {
            let payload = CcPayload {
                auth: &auth,
                bug_id: 3,
                emails,
                action: "add",
            };
            assert_eq!(serde_json::to_value(&payload).unwrap(), expected);
        }
    }

    #[test]
    fn test_decode_bug_list_decodes_each_entry() {
        let raw = vec![
            r#"{"id": 12, "status": "new", "summary": "twelfth"}"#.to_string(),
            r#"{"id": 11, "status": "open", "summary": "eleventh"}"#.to_string(),
        ];
        let bugs = decode_bug_list(raw).unwrap();
        assert_eq!(bugs.len(), 2);
        assert_eq!(bugs[0].id, 12);
        assert_eq!(bugs[1].status, "open");
    }

    #[test]
    fn test_decode_bug_list_surfaces_bad_entries() {
        let raw = vec!["not json".to_string()];
        assert!(matches!(
            decode_bug_list(raw),
            Err(BugspadError::Parse(_))
        ));
    }

    #[test]
    fn test_expect_success() {
        assert!(expect_success("Success".to_string()).is_ok());
        let err = expect_success("Wrong input".to_string()).unwrap_err();
        assert!(matches!(err, BugspadError::UnexpectedResponse { ref message } if message == "Wrong input"));
    }
}
