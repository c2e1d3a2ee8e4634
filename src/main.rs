use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pgdiagram::config::Settings;
use pgdiagram::document;
use pgdiagram::llm::{ChatRequest, chat_endpoint};
use pgdiagram::prompt::{build_system_prompt, schema_text};
use pgdiagram::render_diagram;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "pgdiagram",
    version,
    about = "Render a PostgreSQL schema document as an ASCII diagram"
)]
struct Args {
    /// Schema JSON document ({"tables": ..., "fks": [...]})
    input: PathBuf,

    /// Table (schema.table) placed first
    #[arg(short = 'f', long = "focus")]
    focus: Option<String>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// What to print
    #[arg(long = "format", value_enum, default_value = "ascii")]
    format: OutputFormat,

    /// Question for the `chat` format
    #[arg(short = 'a', long = "ask", default_value = "")]
    ask: String,

    /// Settings JSON file
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum OutputFormat {
    /// Boxes and routed foreign keys
    Ascii,
    /// System prompt for the language model
    Prompt,
    /// Normalised schema document
    Json,
    /// Model endpoint and chat request body for --ask
    Chat,
}

fn run() -> Result<()> {
    let args = Args::parse();

    let input = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let catalog = document::from_json(&input)?;

    let output = match args.format {
        OutputFormat::Ascii => render_diagram(&catalog, args.focus.as_deref()),
        OutputFormat::Prompt => build_system_prompt(&schema_text(&catalog)),
        OutputFormat::Json => document::to_json(&catalog)?,
        OutputFormat::Chat => {
            let settings = Settings::load(args.config.as_deref())?;
            let system_prompt = build_system_prompt(&schema_text(&catalog));
            let request = ChatRequest::new(&settings, &system_prompt, &args.ask);
            format!("POST {}\n{}", chat_endpoint(&settings.ollama_host), request.to_json()?)
        }
    };

    match args.output {
        Some(path) => fs::write(&path, &output)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", output),
    }
    Ok(())
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
