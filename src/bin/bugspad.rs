//! Bugspad API CLI binary.
//!
//! A command-line interface for interacting with a Bugspad server.

use std::process::ExitCode;

use bugspad::cli::{Cli, Command, Entity};
use bugspad::output::PrettyPrint;
use bugspad::{
    list_components, list_recent_created, list_recent_updated, BugSummary, BugspadClient,
    Component, Create, List, NewBug, NewComponent, NewProduct, NewRelease, Product, Release,
};
use clap::Parser;
use tabled::{Table, Tabled};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let client = match BugspadClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set BUGSPAD_URL, BUGSPAD_USER and BUGSPAD_PASSWORD");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &BugspadClient, cli: Cli) -> bugspad::Result<()> {
    match cli.command {
        Command::New {
            summary,
            description,
            component,
            fields,
        } => {
            let new_bug =
                NewBug::new(summary, description, component).with_fields(fields.into_fields());
            let bug = client.create_bug(&new_bug).await?;
            // bug_id is always set on the client create_bug returns
            let id = bug.bug_id().unwrap_or_default();
            if cli.json {
                println!("{}", serde_json::json!({ "bug_id": id }));
            } else {
                println!("Filed bug {id}");
            }
        }

        Command::Comment { bug, text } => {
            let comment_id = client.with_bug_id(bug).add_comment(&text).await?;
            if cli.json {
                println!("{}", serde_json::json!({ "comment_id": comment_id }));
            } else {
                println!("Added comment {comment_id} to bug {bug}");
            }
        }

        Command::Update { bug, fields } => {
            client.with_bug_id(bug).update_bug(&fields.into_fields()).await?;
            if !cli.json {
                println!("Updated bug {bug}");
            }
        }

        Command::Cc { bug, remove, emails } => {
            let scoped = client.with_bug_id(bug);
            if remove {
                scoped.remove_cc(emails).await?;
            } else {
                scoped.add_cc(emails).await?;
            }
            if !cli.json {
                println!("CC list updated for bug {bug}");
            }
        }

        Command::List { entity, product } => handle_list(client, entity, product, cli.json).await?,

        Command::AddComponent {
            name,
            description,
            product,
        } => {
            let component =
                Component::create(client, &NewComponent::new(name, description, product)).await?;
            output_single(&component, cli.json)?;
        }

        Command::AddProduct { name, description } => {
            let created = Product::create(client, &NewProduct::new(name, description)).await?;
            output_single(&created, cli.json)?;
        }

        Command::AddRelease { name } => {
            let release = Release::create(client, &NewRelease::new(name)).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&release)?);
            } else {
                println!("Added release {}", release.name);
            }
        }
    }
    Ok(())
}

async fn handle_list(
    client: &BugspadClient,
    entity: Entity,
    product: Option<u64>,
    json: bool,
) -> bugspad::Result<()> {
    match entity {
        Entity::Components => {
            let product_id = product.ok_or_else(|| bugspad::BugspadError::ConfigMissing(
                "--product is required when listing components".to_string(),
            ))?;
            let components = list_components(client, product_id).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&components)?);
            } else {
                let mut rows: Vec<ComponentRow> =
                    components.values().map(ComponentRow::from).collect();
                rows.sort_by_key(|r| r.id);
                println!("{}", Table::new(rows));
            }
        }
        Entity::Releases => {
            let releases = Release::list(client, &()).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&releases)?);
            } else {
                for release in &releases {
                    println!("{}", release.name);
                }
            }
        }
        Entity::RecentCreated => {
            let bugs = list_recent_created(client).await?;
            output_bugs(&bugs, json)?;
        }
        Entity::RecentUpdated => {
            let bugs = list_recent_updated(client).await?;
            output_bugs(&bugs, json)?;
        }
    }
    Ok(())
}

fn output_single<T: serde::Serialize + PrettyPrint>(item: &T, json: bool) -> bugspad::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_bugs(bugs: &[BugSummary], json: bool) -> bugspad::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(bugs)?);
    } else {
        let rows: Vec<BugRow> = bugs.iter().map(BugRow::from).collect();
        println!("{}", Table::new(rows));
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct BugRow {
    id: u64,
    status: String,
    summary: String,
}

impl From<&BugSummary> for BugRow {
    fn from(b: &BugSummary) -> Self {
        Self {
            id: b.id,
            status: b.status.clone(),
            summary: b.summary.clone(),
        }
    }
}

#[derive(Tabled)]
struct ComponentRow {
    id: u64,
    name: String,
    description: String,
}

impl From<&Component> for ComponentRow {
    fn from(c: &Component) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            description: c.description.clone(),
        }
    }
}
