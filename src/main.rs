// This is the entry point of the compliance checker.
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Check one piece of text and print the verdict as JSON
//
// Usage:
//   geeks_moderation [post|comment|reply] <text...>
//   echo "some text" | geeks_moderation comment
//   geeks_moderation --dump-patterns > patterns.json

use anyhow::{Context, Result};
use geeks_moderation::core::moderation::{
    ContentKind, ContentModerator, PatternConfig, PatternLibrary,
};
use geeks_moderation::core::submission::{Submission, SubmissionService};
use geeks_moderation::core::telemetry::TelemetrySink;
use geeks_moderation::infra::moderation::load_pattern_library;
use geeks_moderation::infra::telemetry::{JsonLinesTelemetrySink, TracingTelemetrySink};
use std::io::Read;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Parsed command line.
struct CliRequest {
    kind: ContentKind,
    text: String,
}

fn parse_args(args: Vec<String>) -> Result<CliRequest> {
    let mut args = args.into_iter().peekable();

    let kind = match args.peek().map(|a| a.parse::<ContentKind>()) {
        Some(Ok(kind)) => {
            args.next();
            kind
        }
        _ => ContentKind::Post,
    };

    let rest: Vec<String> = args.collect();
    let text = if rest.is_empty() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read text from stdin")?;
        buf.trim_end_matches(['\r', '\n']).to_string()
    } else {
        rest.join(" ")
    };

    Ok(CliRequest { kind, text })
}

async fn run<S: TelemetrySink>(
    moderator: ContentModerator,
    sink: S,
    request: CliRequest,
) -> Result<()> {
    let service = SubmissionService::new(moderator, sink);

    // The CLI has no real content store; stamp something unique enough for logs.
    let content_id = format!("cli-{}", chrono::Utc::now().timestamp_millis());
    let author_id = std::env::var("MODERATION_AUTHOR_ID").unwrap_or_else(|_| "cli".to_string());

    let result = service
        .submit(Submission::new(content_id, author_id, request.kind, request.text))
        .await;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    // Logs go to stderr so stdout stays clean JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.first().map(String::as_str) == Some("--dump-patterns") {
        println!("{}", serde_json::to_string_pretty(&PatternConfig::default())?);
        return Ok(());
    }

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================

    let library = match std::env::var("MODERATION_PATTERNS_FILE") {
        Ok(path) => Arc::new(
            load_pattern_library(&path)
                .with_context(|| format!("Failed to load moderation patterns from {}", path))?,
        ),
        Err(_) => PatternLibrary::builtin(),
    };
    let moderator = ContentModerator::new(library);

    let request = parse_args(args)?;

    match std::env::var("TELEMETRY_LOG_FILE") {
        Ok(path) => {
            tracing::debug!(path = %path, "Writing telemetry to file");
            run(moderator, JsonLinesTelemetrySink::new(path), request).await
        }
        Err(_) => run(moderator, TracingTelemetrySink::new(), request).await,
    }
}
