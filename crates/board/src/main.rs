use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use taskboard::{build_cards, dedup::dedup_file, load_board, render_board, BoardState, TaskFeedClient};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "taskboard", version, about = "Task board for the agent task feed")]
struct Args {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Fetch the feed once and print the board.
    Show {
        /// Daemon base URL, e.g. http://127.0.0.1:3000
        #[arg(long, default_value = "http://127.0.0.1:3000")]
        daemon_url: String,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        #[arg(long, default_value_t = 10)]
        timeout_seconds: u64,
    },
    /// Write a copy of a feed keeping the first record per task_id.
    Dedup {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    match args.cmd {
        Cmd::Show {
            daemon_url,
            format,
            timeout_seconds,
        } => {
            let client = TaskFeedClient::new(&daemon_url, Duration::from_secs(timeout_seconds))
                .context("build http client")?;

            if matches!(format, Format::Text) {
                eprintln!("{}", render_board(&BoardState::Loading));
            }
            let state = load_board(&client).await;

            match (format, &state) {
                (Format::Text, _) => println!("{}", render_board(&state)),
                (Format::Json, BoardState::Ready(records)) => {
                    println!("{}", serde_json::to_string_pretty(&build_cards(records))?);
                }
                (Format::Json, BoardState::Error(msg)) => {
                    println!("{}", serde_json::json!({ "error": msg }));
                }
                (Format::Json, BoardState::Loading) => {}
            }

            if matches!(state, BoardState::Error(_)) {
                return Ok(ExitCode::FAILURE);
            }
        }
        Cmd::Dedup { input, output } => {
            let summary = dedup_file(&input, &output)?;
            println!(
                "Deduplicated {} tasks to {}",
                summary.written,
                output.display()
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}
