use clap::{Args, Parser, Subcommand};
use colored::*;
use std::net::IpAddr;
use std::path::PathBuf;
use std::process;

use ideaflow_cli::config::Config;
use ideaflow_cli::{inspect, logging, run_server};

#[derive(Parser)]
#[command(name = "ideaflow")]
#[command(about = "Ideaflow - track ideas from triage to go-live")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server (default)
    Serve(ServeArgs),
    /// Print every stored idea without modifying the database
    Inspect {
        /// Database file to read (defaults to DATABASE_PATH or ~/.ideaflow/ideas.db)
        #[arg(long)]
        db: Option<PathBuf>,
        /// Print one JSON object per line instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Default)]
struct ServeArgs {
    /// Port to listen on
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    port: Option<u16>,
    /// Address to bind
    #[arg(long)]
    host: Option<IpAddr>,
    /// Database file
    #[arg(long)]
    db: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    logging::init_tracing(config.log_format);

    match cli.command.unwrap_or(Commands::Serve(ServeArgs::default())) {
        Commands::Serve(args) => {
            if let Some(port) = args.port {
                config.port = port;
            }
            if let Some(host) = args.host {
                config.host = host;
            }
            if let Some(db) = args.db {
                config.database_path = db;
            }
            run_server(config).await
        }
        Commands::Inspect { db, json } => {
            let path = db.unwrap_or(config.database_path);
            let ideas = inspect::load_ideas(&path).await?;

            if json {
                if !ideas.is_empty() {
                    println!("{}", inspect::render_json_lines(&ideas)?);
                }
                return Ok(());
            }

            if ideas.is_empty() {
                println!("{}", "No ideas found".yellow());
                return Ok(());
            }

            println!("{}", format!("Ideas in {}", path.display()).blue().bold());
            println!("{}", inspect::render_table(&ideas));
            println!("Total: {} ideas", ideas.len().to_string().cyan());
            Ok(())
        }
    }
}
