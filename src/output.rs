//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{BugSummary, Component, Product};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for BugSummary {
    fn pretty_print(&self) -> String {
        let header = format!("Bug #{}", self.id);
        let divider = "─".repeat(header.len().max(30));

        [
            header,
            divider,
            format!("Status:         {}", self.status),
            format!("Summary:        {}", self.summary),
        ]
        .join("\n")
    }
}

impl PrettyPrint for Component {
    fn pretty_print(&self) -> String {
        let header = format!("Component: {}", self.name);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("Id:             {}", self.id),
            format!("Description:    {}", self.description),
        ];

        if let Some(product_id) = self.product_id {
            lines.push(format!("Product:        {}", product_id));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Product {
    fn pretty_print(&self) -> String {
        let header = format!("Product: {}", self.name);
        let divider = "─".repeat(header.len().max(30));

        [
            header,
            divider,
            format!("Id:             {}", self.id),
            format!("Description:    {}", self.description),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bug_summary_pretty_print_format() {
        let bug = BugSummary {
            id: 12,
            status: "new".to_string(),
            summary: "Panic on boot".to_string(),
        };

        let output = bug.pretty_print();
        assert!(output.starts_with("Bug #12"));
        assert!(output.contains("Status:"));
        assert!(output.contains("Panic on boot"));
    }

    #[test]
    fn test_component_pretty_print_includes_product() {
        let component = Component {
            id: 3,
            name: "kernel".to_string(),
            description: "The kernel component".to_string(),
            product_id: Some(1),
        };

        let output = component.pretty_print();
        assert!(output.starts_with("Component: kernel"));
        assert!(output.contains("Product:        1"));
    }
}
