//! CLI argument parsing tests.
//!
//! These pin the expected command-line interface of the bugspad binary.

use bugspad::cli::{Cli, Command, Entity};
use clap::Parser;

#[test]
fn test_cli_parses_new_subcommand() {
    let cli = Cli::parse_from([
        "bugspad",
        "new",
        "Panic on boot",
        "Full description",
        "--component",
        "7",
        "--priority",
        "high",
        "--cc",
        "qa@example.org",
    ]);

    assert!(!cli.json);
    match cli.command {
        Command::New {
            summary,
            description,
            component,
            fields,
        } => {
            assert_eq!(summary, "Panic on boot");
            assert_eq!(description, "Full description");
            assert_eq!(component, 7);

            let fields = fields.into_fields();
            assert_eq!(fields.priority.as_deref(), Some("high"));
            assert_eq!(fields.emails.unwrap().len(), 1);
        }
        _ => panic!("Expected New command"),
    }
}

#[test]
fn test_cli_parses_comment_subcommand() {
    let cli = Cli::parse_from(["bugspad", "comment", "12", "this is a comment"]);

    match cli.command {
        Command::Comment { bug, text } => {
            assert_eq!(bug, 12);
            assert_eq!(text, "this is a comment");
        }
        _ => panic!("Expected Comment command"),
    }
}

#[test]
fn test_cli_parses_update_subcommand() {
    let cli = Cli::parse_from([
        "bugspad",
        "update",
        "12",
        "--status",
        "new",
        "--hardware",
        "x86_64",
        "--fixedinver",
        "18",
    ]);

    match cli.command {
        Command::Update { bug, fields } => {
            assert_eq!(bug, 12);
            let fields = fields.into_fields();
            assert_eq!(fields.status.as_deref(), Some("new"));
            assert_eq!(fields.hardware.as_deref(), Some("x86_64"));
            assert_eq!(fields.fixedinver.as_deref(), Some("18"));
            assert!(fields.emails.is_none());
        }
        _ => panic!("Expected Update command"),
    }
}

#[test]
fn test_cli_parses_cc_subcommand() {
    let cli = Cli::parse_from([
        "bugspad",
        "cc",
        "12",
        "--remove",
        "a@example.org",
        "b@example.org",
    ]);

    match cli.command {
        Command::Cc { bug, remove, emails } => {
            assert_eq!(bug, 12);
            assert!(remove);
            assert_eq!(emails, vec!["a@example.org", "b@example.org"]);
        }
        _ => panic!("Expected Cc command"),
    }
}

#[test]
fn test_cli_cc_requires_at_least_one_address() {
    let result = Cli::try_parse_from(["bugspad", "cc", "12"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_parses_list_subcommand() {
    let cli = Cli::parse_from(["bugspad", "list", "components", "--product", "1"]);

    match cli.command {
        Command::List { entity, product } => {
            assert!(matches!(entity, Entity::Components));
            assert_eq!(product, Some(1));
        }
        _ => panic!("Expected List command"),
    }

    let cli = Cli::parse_from(["bugspad", "list", "recent-created"]);
    match cli.command {
        Command::List { entity, .. } => assert!(matches!(entity, Entity::RecentCreated)),
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_json_flag_is_global() {
    let cli = Cli::parse_from(["bugspad", "list", "releases", "--json"]);
    assert!(cli.json);
    match cli.command {
        Command::List { entity, .. } => assert!(matches!(entity, Entity::Releases)),
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_catalog_add_subcommands() {
    let cli = Cli::parse_from([
        "bugspad",
        "add-component",
        "kernel",
        "The kernel component",
        "--product",
        "1",
    ]);
    match cli.command {
        Command::AddComponent {
            name,
            description,
            product,
        } => {
            assert_eq!(name, "kernel");
            assert_eq!(description, "The kernel component");
            assert_eq!(product, 1);
        }
        _ => panic!("Expected AddComponent command"),
    }

    let cli = Cli::parse_from(["bugspad", "add-release", "BP-2"]);
    match cli.command {
        Command::AddRelease { name } => assert_eq!(name, "BP-2"),
        _ => panic!("Expected AddRelease command"),
    }
}
