//! Bugspad API model types.

mod bug;
mod component;
mod fields;
mod product;
mod release;

pub use bug::*;
pub use component::*;
pub use fields::*;
pub use product::*;
pub use release::*;

/// Coerce an id the server may return as a number or numeric string.
pub(crate) fn id_from_value(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
