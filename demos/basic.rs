//! Basic example demonstrating the Bugspad API client.
//!
//! Run with:
//! ```
//! BUGSPAD_URL=http://127.0.0.1:9998 \
//! BUGSPAD_USER=you@example.org \
//! BUGSPAD_PASSWORD=secret \
//! cargo run --example basic
//! ```

use bugspad::{
    list_components, list_recent_created, BugFields, BugspadClient, List, NewBug, Release,
};

#[tokio::main]
async fn main() -> bugspad::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Bugspad client...");
    let client = BugspadClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // List releases
    println!("\n--- Releases ---");
    let releases = Release::list(&client, &()).await?;
    println!("Found {} releases", releases.len());
    for release in &releases {
        println!("  - {}", release.name);
    }

    // Recently filed bugs
    println!("\n--- Recently Filed Bugs ---");
    let recent = list_recent_created(&client).await?;
    for bug in &recent {
        println!("  #{:<6} {:<10} {}", bug.id, bug.status, bug.summary);
    }

    // Components of product 1
    println!("\n--- Components of Product 1 ---");
    let components = list_components(&client, 1).await?;
    println!("Found {} components", components.len());
    for (name, component) in &components {
        println!("  - {} (id {})", name, component.id);
    }

    // File a bug against the first component, if any
    if let Some(component) = components.values().next() {
        println!("\n--- Filing a Bug ---");
        let fields = BugFields {
            priority: Some("low".to_string()),
            hardware: Some("x86_64".to_string()),
            ..Default::default()
        };
        let bug = client
            .create_bug(
                &NewBug::new(
                    "Demo bug from the basic example",
                    "Filed by demos/basic.rs; safe to close.",
                    component.id,
                )
                .with_fields(fields),
            )
            .await?;

        let bug_id = bug.bug_id().expect("create_bug returns a scoped client");
        println!("Filed bug {bug_id}");

        let comment_id = bug.add_comment("First comment from the example").await?;
        println!("Added comment {comment_id}");

        bug.add_cc("qa@example.org").await?;
        println!("CC'd qa@example.org");
    }

    println!("\nDone!");
    Ok(())
}
