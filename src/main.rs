//! promptdeck - Turn language-model answers into PowerPoint decks.
//!
//! This binary starts the HTTP server or runs one of the offline commands.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use promptdeck::{
    config::{Cli, Command, HistoryConfig, RenderConfig, ServeConfig},
    create_router, parse_input,
    pptx::serialize,
    DeckWriter, GeminiClient, GenerationService, HistoryStore, JsonlHistoryStore, RouterConfig,
    DEFAULT_RESPONSE_HEADING,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Serve(config) => run_serve(config).await,
        Command::Render(config) => run_render(config).await,
        Command::History(config) => run_history(config).await,
    }
}

// =============================================================================
// Serve Command
// =============================================================================

async fn run_serve(config: ServeConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("promptdeck v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Model: {}", config.gemini_model);
    info!("  Endpoint: {}", config.gemini_endpoint);
    info!("  Uploads: {}", config.uploads_dir.display());
    info!("  History: {}", config.history_file.display());
    if config.fixed_file_name {
        warn!(
            "  File naming: fixed ({}), concurrent requests overwrite each other",
            config.file_name
        );
    } else {
        info!("  File naming: unique per request");
    }
    if let Some(max) = config.max_lines_per_slide {
        info!("  Pagination: {} lines per slide", max);
    }

    let generator = match GeminiClient::new(config.gemini_config()) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create Gemini client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let service = GenerationService::new(
        generator,
        JsonlHistoryStore::new(&config.history_file),
        DeckWriter::new(&config.uploads_dir).with_default_file_name(&config.file_name),
    )
    .with_compiler(config.compiler())
    .with_naming(config.file_naming());

    let router = create_router(service, build_router_config(&config));

    let addr = config.bind_address();

    info!("");
    info!("────────────────────────────────────────────────────────────────");
    info!("  Server listening on: http://{}", addr);
    info!("");
    info!("  Try these endpoints:");
    info!("    curl http://{}/health", addr);
    info!(
        "    curl -X POST http://{}/api/chat -H 'Content-Type: application/json' -d '{{\"prompt\":\"explain recursion\"}}'",
        addr
    );
    info!("    curl http://{}/api/chat/history", addr);
    info!("────────────────────────────────────────────────────────────────");
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "promptdeck=debug,tower_http=debug"
    } else {
        "promptdeck=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application ServeConfig.
fn build_router_config(config: &ServeConfig) -> RouterConfig {
    let router_config = match config.cors_origins() {
        Some(origins) => RouterConfig::new().with_cors_origins(origins),
        None => RouterConfig::new().with_cors_any_origin(),
    };

    router_config.with_tracing(!config.no_tracing)
}

// =============================================================================
// Render Command
// =============================================================================

async fn run_render(config: RenderConfig) -> ExitCode {
    if config.verbose {
        init_logging(true);
    }

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let input = match tokio::fs::read_to_string(&config.input).await {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error: cannot read {}: {}", config.input.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let mut result = match parse_input(&input, DEFAULT_RESPONSE_HEADING) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(ref title) = config.title {
        result = result.with_title(title);
    }

    let deck = config.compiler().compile(&result);
    let slide_count = deck.slide_count();

    match serialize(deck, &config.output_dir, Some(&config.file_name)).await {
        Ok(path) => {
            println!("Wrote {} slide(s) to {}", slide_count, path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// History Command
// =============================================================================

async fn run_history(config: HistoryConfig) -> ExitCode {
    let store = JsonlHistoryStore::new(&config.history_file);
    let limit = promptdeck::clamp_history_limit(Some(config.limit));

    let records = match store.list_recent(limit).await {
        Ok(records) => records,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if config.json {
        match serde_json::to_string_pretty(&records) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    if records.is_empty() {
        println!("(no history in {})", config.history_file.display());
        return ExitCode::SUCCESS;
    }

    for record in &records {
        println!(
            "{}  {}  {}",
            record.created_at.format("%Y-%m-%d %H:%M:%S"),
            record.id,
            record.ppt_path.display()
        );
        println!("    {}", first_line(&record.prompt, 80));
    }
    println!();
    println!("Total: {} record(s)", records.len());

    ExitCode::SUCCESS
}

/// First line of `text`, shortened to at most `max` characters.
fn first_line(text: &str, max: usize) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() > max {
        let cut: String = line.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        line.to_string()
    }
}
