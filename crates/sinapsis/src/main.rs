use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, EnvFilter};

mod agenda;
mod config;
mod error;
mod html;
mod llm;
mod parser;
mod prompt;
mod scheduler;
mod server;
mod types;
mod variant;

use agenda::AgendaState;
use llm::GeminiClient;
use parser::Placement;
use types::{Priority, TaskDuration, TaskRequest};
use variant::Variant;

#[derive(Parser, Debug)]
#[command(name = "sinapsis")]
#[command(about = "Weekly agenda assistant that asks a language model where to fit new tasks")]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Secrets file with GOOGLE_API_KEY (environment variables take precedence)
    #[arg(long, default_value = config::DEFAULT_SECRETS_PATH, global = true)]
    secrets: PathBuf,

    /// Prompt and parsing behaviour: compact or strict
    #[arg(long, default_value = "compact", global = true)]
    variant: Variant,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the web server (default)
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Schedule one task against the fixed week and print the result
    Ask {
        /// What you want to do
        task: String,

        /// Duration, e.g. "30 min", "1h 30min", "90m"
        #[arg(short, long, default_value = "1h")]
        duration: TaskDuration,

        /// Priority: Baja, Media or Alta
        #[arg(short, long, default_value = "Media")]
        priority: Priority,

        /// Print the prompt instead of sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Write the fixed week as a static HTML page
    Render {
        /// Output file
        #[arg(short, long, default_value = "index.html")]
        output: PathBuf,
    },
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level))
        .add_directive("hyper=warn".parse().unwrap())
        .add_directive("tower_http=warn".parse().unwrap());

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_max_level(Level::TRACE)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(&args.log_level);

    match args.command {
        None => serve_command(8080, &args.secrets, args.variant).await?,
        Some(Commands::Serve { port }) => serve_command(port, &args.secrets, args.variant).await?,
        Some(Commands::Ask {
            task,
            duration,
            priority,
            dry_run,
        }) => {
            let request = TaskRequest::new(task, duration, priority);
            ask_command(&request, &args.secrets, args.variant, dry_run).await?;
        }
        Some(Commands::Render { output }) => {
            html::generate_html(&AgendaState::new(), &output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!(path = %output.display(), "HTML saved");
        }
    }

    Ok(())
}

async fn serve_command(port: u16, secrets: &std::path::Path, variant: Variant) -> Result<()> {
    let settings = config::load_settings(secrets).context("Failed to load settings")?;
    let client = GeminiClient::new(settings);
    check_startup_credential(&client, variant, secrets)?;

    info!(model = %client.settings().model, "Using model");
    server::serve(port, server::AppState::new(client, variant)).await
}

/// Compact refuses to start without a key; strict only warns and lets each
/// submission report it.
fn check_startup_credential(client: &GeminiClient, variant: Variant, secrets: &std::path::Path) -> Result<()> {
    if client.has_credential() {
        return Ok(());
    }

    if variant.requires_credential_at_startup() {
        bail!(
            "{} is not set; add it to the environment, .env or {}",
            config::API_KEY_VAR,
            secrets.display()
        );
    }

    warn!("{} is not set; submissions will fail until it is", config::API_KEY_VAR);
    Ok(())
}

async fn ask_command(
    request: &TaskRequest,
    secrets: &std::path::Path,
    variant: Variant,
    dry_run: bool,
) -> Result<()> {
    let mut agenda = AgendaState::new();

    if dry_run {
        println!("{}", prompt::build_prompt(agenda.items(), request, variant));
        return Ok(());
    }

    let settings = config::load_settings(secrets).context("Failed to load settings")?;
    let client = GeminiClient::new(settings);

    let placement = scheduler::schedule_task(&mut agenda, request, &client, variant)
        .await
        .context("Failed to schedule task")?;

    match &placement {
        Placement::Scheduled { item, reason } => {
            println!("{} {}: {}", item.day, item.time_range, item.label);
            if let Some(reason) = reason {
                println!("  {}", reason);
            }
        }
        Placement::Unassigned { item } => {
            println!("{}: {} ({})", item.day, item.label, item.time_range);
        }
    }

    Ok(())
}
