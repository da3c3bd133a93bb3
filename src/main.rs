use anyhow::Result;
use clap::{Parser, Subcommand};
use hugo::agent::{Agent, SUGGESTED_PROMPTS};
use hugo::browser::DatasetBrowser;
use hugo::catalog::SchemaCatalog;
use hugo::config::Config;
use hugo::gateway::Gateway;
use hugo::resolver::{LlmClient, TableResolver};
use hugo::session::ChatSession;
use hugo::uploader::{UploadBatch, Uploader};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "hugo")]
#[command(about = "Conversational assistant over a procurement database")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive chat session
    Chat,
    /// Ask a single question and exit
    Ask { question: String },
    /// Ask the backend to modify the database
    Modify { instruction: String },
    /// List the tables in the schema catalog
    Tables,
    /// Show up to --limit rows of a table
    Browse {
        table: String,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Upload files to populate the database
    Upload { paths: Vec<PathBuf> },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env();
    let catalog = SchemaCatalog::procurement();

    match args.command {
        Command::Chat => chat_loop(&config, catalog).await?,
        Command::Ask { question } => {
            let agent = build_agent(&config, catalog)?;
            let mut session = ChatSession::new(config.max_history);
            let outcome = run_with_indicator(&agent, &mut session, &question).await;
            print_candidates(&outcome.candidates);
            println!("{}", outcome.answer);
        }
        Command::Modify { instruction } => {
            let gateway = Gateway::new(config.server_url.clone());
            match gateway.modify(&instruction).await {
                Ok(outcome) => println!("{}", outcome.summary()),
                Err(e) => println!("Failed: {}", e),
            }
        }
        Command::Tables => {
            for table in catalog.tables() {
                println!("{}", table.name);
                println!("  {}", table.description);
                println!("  columns: {}", table.columns.join(", "));
            }
        }
        Command::Browse { table, limit } => {
            let (store_url, store_key) = config.require_store()?;
            let browser = DatasetBrowser::new(store_url.to_string(), store_key.to_string());
            let rows = browser
                .fetch(&catalog, &table, limit.unwrap_or(config.browse_limit))
                .await?;
            if rows.is_empty() {
                println!("No data in table {}.", table);
            } else {
                for row in &rows {
                    println!("{}", serde_json::to_string(row)?);
                }
                info!("Fetched {} row(s) from {}", rows.len(), table);
            }
        }
        Command::Upload { paths } => {
            let mut batch = UploadBatch::new();
            for path in &paths {
                let name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or_default()
                    .to_string();
                let bytes = std::fs::read(path)?;
                batch.push(name, bytes);
            }
            if batch.is_empty() {
                println!("Nothing to upload.");
            } else {
                let uploader = Uploader::new(config.server_url.clone());
                uploader.upload(batch).await?;
                println!("Files uploaded successfully!");
            }
        }
    }

    Ok(())
}

fn build_agent(config: &Config, catalog: SchemaCatalog) -> Result<Agent> {
    let api_key = config.require_openai_key()?.to_string();
    let llm = LlmClient::new(
        api_key,
        config.openai_model.clone(),
        config.openai_base_url.clone(),
    );
    let resolver = TableResolver::new(llm, config.max_input_chars);
    let gateway = Gateway::new(config.server_url.clone());
    Ok(Agent::new(resolver, gateway, catalog))
}

async fn chat_loop(config: &Config, catalog: SchemaCatalog) -> Result<()> {
    let agent = build_agent(config, catalog)?;
    let mut session = ChatSession::new(config.max_history);

    println!("Ask Hugo about your data. Type /reset to clear the session, /quit to exit.");
    println!("Try one of:");
    for prompt in SUGGESTED_PROMPTS {
        println!("  - {}", prompt);
    }

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line {
            "/quit" | "/exit" => break,
            "/reset" => {
                session.reset();
                println!("Session cleared.");
                continue;
            }
            _ => {}
        }

        let outcome = run_with_indicator(&agent, &mut session, line).await;
        print_candidates(&outcome.candidates);
        println!("{}", outcome.answer);
    }

    Ok(())
}

/// Run one turn with a cosmetic "thinking" ticker. The ticker task is
/// aborted the moment the turn's future completes; there is no shared
/// readiness flag to poll.
async fn run_with_indicator(
    agent: &Agent,
    session: &mut ChatSession,
    input: &str,
) -> hugo::agent::TurnOutcome {
    let indicator = tokio::spawn(async {
        let dots = ["", ".", "..", "..."];
        let mut ticks = 0usize;
        let mut interval = tokio::time::interval(Duration::from_millis(200));
        loop {
            interval.tick().await;
            print!("\rHugo is thinking{}   ", dots[ticks % dots.len()]);
            let _ = std::io::stdout().flush();
            ticks += 1;
        }
    });

    let outcome = agent.run_turn(session, input).await;

    indicator.abort();
    print!("\r{}\r", " ".repeat(24));
    let _ = std::io::stdout().flush();
    outcome
}

fn print_candidates(candidates: &[hugo::resolver::RelevanceCandidate]) {
    if candidates.is_empty() {
        return;
    }
    println!("Relevant tables:");
    for c in candidates {
        println!("  - {}: {}", c.table_name, c.reason);
    }
}
