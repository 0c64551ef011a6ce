//! CLI for generating a single digest from the terminal.
//!
//! Runs the same fetch, summarize and moderate pipeline as the server,
//! without the response cache, and prints the result as plain text.

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;
use digest_core::domains::digest::{run_pipeline, DigestProgress, DigestResponse};
use digest_core::{kernel::ServerDeps, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "digest-cli")]
#[command(about = "Summarize recent posts about a topic")]
struct Cli {
    /// Topic to search for; multiple words are joined with spaces
    #[arg(required = true)]
    topic: Vec<String>,
}

fn print_report(response: &DigestResponse) {
    println!(
        "Fetched {} tweets from unique authors.",
        response.tweets.len()
    );
    println!();

    for (i, post) in response.tweets.iter().enumerate() {
        let when = post
            .created_at
            .map(|at| {
                format!(
                    " - {}",
                    at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
                )
            })
            .unwrap_or_default();
        println!(
            "{}. {} (@{}){}",
            i + 1,
            post.author_name,
            post.author_username,
            when
        );
        println!("   {}", digest_core::common::collapse_whitespace(&post.text));
        println!();
    }

    println!("Summary:");
    println!("{}", response.summary.summary);
    println!();

    println!("Suggested Post:");
    println!("{}", response.summary.suggested_post);
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let topic = cli.topic.join(" ");
    if topic.trim().is_empty() {
        bail!("Topic is required");
    }

    let config = Config::from_env().context("Failed to load configuration")?;
    if let Some(name) = config.missing_credential() {
        eprintln!("Missing {} environment variable.", name);
        std::process::exit(1);
    }

    let deps = ServerDeps::from_config(&config);
    let response = run_pipeline(topic.trim(), &deps, &|_: DigestProgress| {})
        .await
        .context("Digest generation failed")?;

    print_report(&response);
    Ok(())
}
