//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the bugspad binary.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::BugFields;

/// Bugspad API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "bugspad", about = "Bugspad API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// File a new bug and print its id.
    New {
        /// One-line summary.
        summary: String,

        /// Full description.
        description: String,

        /// Component to file the bug against.
        #[arg(long)]
        component: u64,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Add a comment to a bug.
    Comment {
        /// The bug id.
        bug: u64,

        /// Comment text.
        text: String,
    },

    /// Update a bug's optional fields.
    Update {
        /// The bug id.
        bug: u64,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Add or remove CC addresses on a bug.
    Cc {
        /// The bug id.
        bug: u64,

        /// Remove the addresses instead of adding them.
        #[arg(long)]
        remove: bool,

        /// One or more email addresses.
        #[arg(required = true)]
        emails: Vec<String>,
    },

    /// List entities.
    List {
        /// The type of entity to list.
        entity: Entity,

        /// Product id (required for components).
        #[arg(long)]
        product: Option<u64>,
    },

    /// Register a new component under a product.
    AddComponent {
        /// Component name.
        name: String,

        /// Component description.
        description: String,

        /// The owning product id.
        #[arg(long)]
        product: u64,
    },

    /// Register a new product.
    AddProduct {
        /// Product name.
        name: String,

        /// Product description.
        description: String,
    },

    /// Register a new release name.
    AddRelease {
        /// The release name (e.g., "BP-2").
        name: String,
    },
}

/// Entity types that can be listed.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    /// Components of a product (requires --product).
    #[value(alias = "component")]
    Components,
    /// Known release names.
    #[value(alias = "release")]
    Releases,
    /// The ten most recently filed bugs.
    RecentCreated,
    /// The ten most recently updated bugs.
    RecentUpdated,
}

/// The optional bug field flags shared by `new` and `update`.
#[derive(Args, Debug, Default)]
pub struct FieldArgs {
    /// Bug priority (e.g., "high").
    #[arg(long)]
    pub priority: Option<String>,

    /// Bug severity (e.g., "high").
    #[arg(long)]
    pub severity: Option<String>,

    /// Bug status (e.g., "new").
    #[arg(long)]
    pub status: Option<String>,

    /// Hardware platform (e.g., "x86_64").
    #[arg(long)]
    pub hardware: Option<String>,

    /// Whiteboard free text.
    #[arg(long)]
    pub whiteboard: Option<String>,

    /// Release the bug was fixed in.
    #[arg(long)]
    pub fixedinver: Option<String>,

    /// Release the bug was reported against.
    #[arg(long)]
    pub version: Option<String>,

    /// Subcomponent id.
    #[arg(long)]
    pub subcomponent: Option<u64>,

    /// CC address; repeat the flag for several.
    #[arg(long = "cc")]
    pub cc: Vec<String>,
}

impl FieldArgs {
    /// Convert the parsed flags into the library's field set.
    pub fn into_fields(self) -> BugFields {
        BugFields {
            priority: self.priority,
            severity: self.severity,
            status: self.status,
            hardware: self.hardware,
            whiteboard: self.whiteboard,
            fixedinver: self.fixedinver,
            version: self.version,
            subcomponent_id: self.subcomponent,
            emails: if self.cc.is_empty() {
                None
            } else {
                Some(self.cc.into())
            },
        }
    }
}
