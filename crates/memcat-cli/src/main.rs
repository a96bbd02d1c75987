//! Memcat CLI - Command-line interface for memory categorization
//!
//! Usage:
//!     memcat [OPTIONS] [MEMORY]
//!
//! Environment Variables:
//!     SILICONFLOW_API_KEY: SiliconFlow API key (checked first, selects DeepSeek-V3.1)
//!     OPENAI_API_KEY: OpenAI API key (fallback, selects gpt-4o-mini)
//!     OPENAI_BASE_URL: Endpoint override for the OpenAI provider
//!     MEMCAT_MAX_ATTEMPTS: Maximum attempts per memory (default: 3)
//!     RUST_LOG: Log filter (default: warn)

use anyhow::{Context, Result};
use clap::Parser;
use memory_categorizer::{Categorizer, ClientConfig, ModelClient, RetryPolicy};
use std::io::{self, Write};
use tokio::io::AsyncReadExt;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Memcat - tag memories with topical categories
#[derive(Parser, Debug)]
#[command(name = "memcat")]
#[command(about = "Memcat - tag memories with topical categories")]
#[command(after_help = r#"Examples:
    # Categorize a memory given as an argument
    memcat "Booked a table at the new ramen place for Friday"

    # Read the memory from stdin and print JSON
    echo "Renewed my passport" | memcat --json

    # Use a different model on the resolved endpoint
    memcat --model gpt-4o "Switched teams at work"

    # Check that the model API is reachable
    memcat --check
"#)]
struct Cli {
    /// Override the model name
    #[arg(long)]
    model: Option<String>,

    /// Override the model API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Maximum attempts per memory
    #[arg(long, env = "MEMCAT_MAX_ATTEMPTS", default_value = "3")]
    max_attempts: u32,

    /// Print categories as a JSON array
    #[arg(long)]
    json: bool,

    /// Check the model API and exit
    #[arg(long)]
    check: bool,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Memory text (read from stdin if not provided)
    memory: Option<String>,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "memory_categorizer=debug,memcat=debug,warn"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Check the model API by sending a minimal request
async fn check_model_api(config: ClientConfig) -> Result<()> {
    eprintln!("\u{1F50D} Checking model API...");
    eprintln!("{}", "-".repeat(50));
    eprint!(
        "Provider: {}, model: {}, endpoint: {}... ",
        config.provider.as_str(),
        config.model_name,
        config.base_url.as_deref().unwrap_or("default")
    );
    io::stderr().flush().ok();

    let client = ModelClient::new(config);
    match client.test_connection().await {
        Ok(()) => {
            eprintln!("\u{2705} OK");
            Ok(())
        }
        Err(e) => {
            eprintln!("\u{274C} FAILED");
            Err(e).context("Model API check failed")
        }
    }
}

async fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    tokio::io::stdin()
        .read_to_string(&mut buffer)
        .await
        .context("Failed to read memory from stdin")?;
    Ok(buffer)
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let args = Cli::parse();
    init_tracing(args.verbose);

    let mut config = ClientConfig::from_env().context("Failed to resolve API configuration")?;
    if let Some(model) = &args.model {
        config = config.with_model(model);
    }
    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url);
    }

    if args.check {
        return check_model_api(config).await;
    }

    let memory = match args.memory {
        Some(memory) => memory,
        None => read_stdin().await?,
    };

    debug!(
        provider = config.provider.as_str(),
        model = %config.model_name,
        "Categorizing memory"
    );

    let categorizer =
        Categorizer::new(config).with_retry_policy(RetryPolicy::new(args.max_attempts));
    let categories = categorizer
        .get_categories_for_memory(&memory)
        .await
        .context("Failed to categorize memory")?;

    if args.json {
        println!("{}", serde_json::to_string(&categories)?);
    } else {
        for category in &categories {
            println!("{}", category);
        }
    }

    Ok(())
}
