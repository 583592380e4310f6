mod backend;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use caption_curator::compose::{compose, copy_id};
use caption_curator::config::ClientConfig;
use caption_curator::feedback::CopyFeedback;
use caption_curator::normalize::normalize;
use caption_curator::selection::SelectionStore;
use caption_curator::session::SessionStore;
use caption_curator::{AnalysisView, Platform};

use backend::BackendClient;

#[derive(Parser)]
#[command(name = "caption-curator", about = "Content moderation results and caption curation")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Analyze(AnalyzeArgs),
    Show,
    Compose(ComposeArgs),
    Clear,
    Health,
}

#[derive(Args, Debug, Clone)]
struct AnalyzeArgs {
    #[arg(long)]
    text: Option<String>,
    #[arg(long)]
    image: Option<PathBuf>,
    #[arg(long)]
    platform: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct ComposeArgs {
    #[arg(long)]
    platform: String,
    #[arg(long, default_value_t = 0)]
    caption: usize,
    #[arg(long = "tag")]
    tags: Vec<String>,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let (config, _) = ClientConfig::load(cli.config)?;
    let store = SessionStore::new(config.session.path.clone());

    match cli.command {
        Command::Analyze(args) => run_analyze(args, &config, &store).await,
        Command::Show => run_show(&store).await,
        Command::Compose(args) => run_compose(args, &store).await,
        Command::Clear => run_clear(&store).await,
        Command::Health => run_health(&config).await,
    }
}

async fn run_analyze(
    args: AnalyzeArgs,
    config: &ClientConfig,
    store: &SessionStore,
) -> Result<(), String> {
    let platform_label = args.platform.unwrap_or_else(|| config.platform.clone());
    let platform = Platform::from_str(&platform_label)
        .ok_or_else(|| format!("invalid platform: {}", platform_label))?;

    let text = read_text(args.text)?;
    let image = match args.image.as_deref() {
        Some(path) => encode_image(path).await?,
        None => String::new(),
    };

    let client = BackendClient::from_config(config)?;
    let raw = client.analyze(&text, &image, platform.label()).await?;

    store.save(&raw, &text, &image).await?;

    let saved = store
        .load()
        .await?
        .ok_or_else(|| "session write was not readable back".to_string())?;
    let view = normalize(&saved).map_err(|err| err.to_string())?;
    print_view(&view);
    Ok(())
}

async fn run_show(store: &SessionStore) -> Result<(), String> {
    let raw = load_session(store).await?;
    let view = normalize(&raw).map_err(|err| err.to_string())?;
    print_view(&view);
    Ok(())
}

async fn run_compose(args: ComposeArgs, store: &SessionStore) -> Result<(), String> {
    let platform = Platform::from_str(&args.platform)
        .ok_or_else(|| format!("invalid platform: {}", args.platform))?;

    let raw = load_session(store).await?;
    let view = normalize(&raw).map_err(|err| err.to_string())?;

    // A fresh selection per invocation: selections never outlive the view
    // they were made against.
    let mut selection = SelectionStore::new();
    for tag in &args.tags {
        selection.toggle(platform, tag);
    }

    let text = compose(&view, &selection, platform, args.caption).map_err(|err| err.to_string())?;

    // stdout plays the clipboard here: write-only, no read-back.
    println!("{}", text);

    let mut feedback = CopyFeedback::new();
    let id = copy_id(platform, args.caption);
    feedback.mark_copied(&id);
    if feedback.is_copied(&id) {
        eprintln!("Copied {}!", id);
    }
    Ok(())
}

async fn run_clear(store: &SessionStore) -> Result<(), String> {
    store.clear().await?;
    println!("Session cleared.");
    Ok(())
}

async fn run_health(config: &ClientConfig) -> Result<(), String> {
    let client = BackendClient::from_config(config)?;
    let health = client.health().await?;
    let status = health
        .get("status")
        .and_then(|value| value.as_str())
        .unwrap_or("unknown");
    println!("Backend status: {}", status);
    Ok(())
}

async fn load_session(store: &SessionStore) -> Result<serde_json::Value, String> {
    store
        .load()
        .await?
        .ok_or_else(|| "no analysis session found: run `caption-curator analyze` first".to_string())
}

fn print_view(view: &AnalysisView) {
    let verdict = if view.decision.approved {
        "Content Approved"
    } else {
        "Content Flagged"
    };
    println!("{} (confidence {:.1}%)", verdict, view.decision.confidence_percent);
    println!("{}", view.decision.reason);

    if !view.original_text.is_empty() {
        println!("\nOriginal text: {}", view.original_text);
    }

    if !view.insights.is_empty() {
        println!("\nInsights:");
        for (name, value) in &view.insights {
            println!("  {}: {}", name, value);
        }
    }

    if let Some(schedule) = &view.schedule {
        println!("\nBest time to post:");
        for (day, time) in schedule {
            println!("  {}: {}", day, time);
        }
    }

    for block in &view.platforms {
        println!("\n{} captions:", block.platform.label());
        if block.captions.is_empty() {
            println!("  (no captions available)");
            continue;
        }
        for (index, entry) in block.captions.iter().enumerate() {
            println!("  [{}] {}", index, entry.text);
            if !entry.default_hashtags.is_empty() {
                println!("      {}", entry.default_hashtags.join(" "));
            }
        }
    }
}

fn read_text(arg: Option<String>) -> Result<String, String> {
    if let Some(text) = arg {
        if !text.trim().is_empty() {
            return Ok(text);
        }
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|err| format!("failed reading stdin: {}", err))?;
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Err("missing content text: pass --text or pipe stdin".to_string());
    }
    Ok(trimmed.to_string())
}

async fn encode_image(path: &Path) -> Result<String, String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| format!("failed to read image: {}", err))?;
    let mime = match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/png",
    };
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
