// src/main.rs
mod utils;
mod extractors;
mod storage;

use clap::Parser;
use utils::AppError;
use extractors::RecordAssembler;
use storage::{QuoteMode, StorageManager};

/// Extracts investigation request fields from a GitHub issue body into shell variables
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File holding the raw issue body
    #[arg(short, long, default_value = "issue_body.txt")]
    input: String,

    /// File to write the AGENT_* assignments to
    #[arg(short, long, default_value = "issue_vars.sh")]
    output: String,

    /// Backslash-escape \ " $ and ` inside the quoted values
    #[arg(long)]
    escape: bool,

    /// Also print the extracted record as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting extraction for args: {:?}", args);

    // 3. Read the issue body; nothing is written if this fails
    let storage = StorageManager::new(&args.input, &args.output);
    let body = storage.read_issue_body()?;

    // 4. Extract the record
    let record = RecordAssembler::new().assemble(&body)?;
    if record.tools.is_empty() {
        tracing::warn!("No methodology items are checked");
    }

    // 5. Write shell variables
    let mode = if args.escape { QuoteMode::Escaped } else { QuoteMode::Verbatim };
    let path = storage.save_shell_vars(&record, mode)?;
    tracing::info!("Extraction finished: {}", path.display());

    if args.json {
        println!("{}", storage::render_json(&record)?);
    }

    Ok(())
}
