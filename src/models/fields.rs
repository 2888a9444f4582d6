//! Optional bug fields and the field whitelist.
//!
//! Create and update calls accept a fixed set of extra attributes. The
//! typed [`BugFields`] struct makes unknown names unrepresentable; the
//! dynamic [`BugFields::from_pairs`] constructor validates arbitrary
//! name/value pairs against [`OPTIONAL_FIELDS`] before any request is
//! built.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BugspadError, Result};

/// The optional field names accepted by bug create/update calls.
///
/// Any other name fails client-side with [`BugspadError::UnknownField`],
/// before any network access occurs.
pub const OPTIONAL_FIELDS: &[&str] = &[
    "priority",
    "severity",
    "status",
    "hardware",
    "whiteboard",
    "fixedinver",
    "version",
    "subcomponent_id",
    "emails",
];

/// A list of CC email addresses.
///
/// Normalization wrapper: a single address, a fixed-size array, or a
/// vector all convert into the same one-or-many collection, so every
/// call site produces an identical payload shape.
///
/// # Example
///
/// ```
/// use bugspad::EmailList;
///
/// let one: EmailList = "dev@example.org".into();
/// let many: EmailList = ["dev@example.org", "qa@example.org"].into();
/// assert_eq!(one.len(), 1);
/// assert_eq!(many.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailList(Vec<String>);

impl EmailList {
    /// The addresses in this list.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of addresses.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no addresses are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build from a dynamic JSON value: a string becomes a one-element
    /// list, an array of strings passes through.
    pub(crate) fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(Self(vec![s])),
            Value::Array(items) => {
                let mut emails = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) => emails.push(s),
                        _ => {
                            return Err(BugspadError::InvalidFieldValue {
                                field: "emails",
                                expected: "a string or an array of strings",
                            })
                        }
                    }
                }
                Ok(Self(emails))
            }
            _ => Err(BugspadError::InvalidFieldValue {
                field: "emails",
                expected: "a string or an array of strings",
            }),
        }
    }
}

impl From<&str> for EmailList {
    fn from(email: &str) -> Self {
        Self(vec![email.to_string()])
    }
}

impl From<String> for EmailList {
    fn from(email: String) -> Self {
        Self(vec![email])
    }
}

impl From<Vec<String>> for EmailList {
    fn from(emails: Vec<String>) -> Self {
        Self(emails)
    }
}

impl From<&[&str]> for EmailList {
    fn from(emails: &[&str]) -> Self {
        Self(emails.iter().map(|e| e.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for EmailList {
    fn from(emails: [&str; N]) -> Self {
        Self(emails.iter().map(|e| e.to_string()).collect())
    }
}

impl FromIterator<String> for EmailList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Optional attributes for bug create/update calls.
///
/// Only set fields are serialized, so an empty `BugFields` adds nothing
/// to the payload. Update semantics are overwrite-merge: the server
/// replaces exactly the fields that are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BugFields {
    /// Bug priority (e.g., "high").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,

    /// Bug severity (e.g., "high").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    /// Bug status (e.g., "new").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Hardware platform (e.g., "x86_64").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware: Option<String>,

    /// Whiteboard free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whiteboard: Option<String>,

    /// Release the bug was fixed in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixedinver: Option<String>,

    /// Release the bug was reported against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Subcomponent id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcomponent_id: Option<u64>,

    /// Initial CC addresses. A single value normalizes to a one-element
    /// list (see [`EmailList`]).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emails: Option<EmailList>,
}

impl BugFields {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.priority.is_none()
            && self.severity.is_none()
            && self.status.is_none()
            && self.hardware.is_none()
            && self.whiteboard.is_none()
            && self.fixedinver.is_none()
            && self.version.is_none()
            && self.subcomponent_id.is_none()
            && self.emails.is_none()
    }

    /// Build fields from dynamic name/value pairs.
    ///
    /// Validates every name against [`OPTIONAL_FIELDS`] and fails on the
    /// first unknown one, regardless of how many valid fields were also
    /// supplied. No request is made on failure.
    ///
    /// # Example
    ///
    /// ```
    /// use bugspad::BugFields;
    /// use serde_json::json;
    ///
    /// let fields = BugFields::from_pairs([
    ///     ("status", json!("new")),
    ///     ("hardware", json!("x86_64")),
    /// ])?;
    /// assert_eq!(fields.status.as_deref(), Some("new"));
    /// # Ok::<(), bugspad::BugspadError>(())
    /// ```
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let mut fields = Self::default();
        for (name, value) in pairs {
            fields.set(name.as_ref(), value)?;
        }
        Ok(fields)
    }

    /// Set a single field by wire name.
    ///
    /// # Errors
    ///
    /// Returns [`BugspadError::UnknownField`] for a name outside
    /// [`OPTIONAL_FIELDS`], or [`BugspadError::InvalidFieldValue`] when
    /// the value has the wrong shape.
    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        match name {
            "priority" => self.priority = Some(text_value("priority", value)?),
            "severity" => self.severity = Some(text_value("severity", value)?),
            "status" => self.status = Some(text_value("status", value)?),
            "hardware" => self.hardware = Some(text_value("hardware", value)?),
            "whiteboard" => self.whiteboard = Some(text_value("whiteboard", value)?),
            "fixedinver" => self.fixedinver = Some(text_value("fixedinver", value)?),
            "version" => self.version = Some(text_value("version", value)?),
            "subcomponent_id" => {
                self.subcomponent_id =
                    Some(
                        crate::models::id_from_value(&value).ok_or(
                            BugspadError::InvalidFieldValue {
                                field: "subcomponent_id",
                                expected: "an integer id",
                            },
                        )?,
                    )
            }
            "emails" => self.emails = Some(EmailList::from_value(value)?),
            other => return Err(BugspadError::UnknownField(other.to_string())),
        }
        Ok(())
    }
}

/// Accept a string, or stringify a scalar (versions are often typed as
/// numbers by callers).
fn text_value(field: &'static str, value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(BugspadError::InvalidFieldValue {
            field,
            expected: "a scalar value",
        }),
    }
}
