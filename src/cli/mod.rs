//! Command-line interface for claimcheck.
//!
//! Provides commands for checking a document end to end, inspecting the
//! extracted text or claims, and showing the resolved configuration.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::adapters::OpenAiReasoning;
use crate::config::{self, redact, Credentials, ResolvedConfig};
use crate::core::{ClaimExtractor, Orchestrator, TextExtractor};
use crate::domain::{ClaimExtraction, Document, ProgressEvent, RunOutcome};

pub mod render;

/// claimcheck - extract factual claims from a PDF and check them against the web
#[derive(Parser, Debug)]
#[command(name = "claimcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to .claimcheck/config.yaml in this or a parent directory)
    #[arg(long, global = true, env = "CLAIMCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Reasoning service API key
    #[arg(long, global = true, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Search service API key
    #[arg(long, global = true, env = "TAVILY_API_KEY", hide_env_values = true)]
    pub tavily_api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract claims from a document and verify each one
    Check {
        /// PDF file to check
        file: Option<PathBuf>,

        /// Read the PDF from stdin
        #[arg(long)]
        stdin: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Claims verified at once (default from config, normally 1)
        #[arg(short, long)]
        concurrency: Option<usize>,
    },

    /// Print the text extracted from a document
    Extract {
        /// PDF file to read
        file: Option<PathBuf>,

        /// Read the PDF from stdin
        #[arg(long)]
        stdin: bool,
    },

    /// Extract claims without verifying them
    Claims {
        /// PDF file to read
        file: Option<PathBuf>,

        /// Read the PDF from stdin
        #[arg(long)]
        stdin: bool,

        /// Print the claims as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let resolved = config::load_config(self.config.as_deref())?;

        match self.command {
            Commands::Check {
                file,
                stdin,
                json,
                concurrency,
            } => {
                let credentials = Credentials::new(
                    require_key(self.openai_api_key, "OPENAI_API_KEY", "--openai-api-key")?,
                    require_key(self.tavily_api_key, "TAVILY_API_KEY", "--tavily-api-key")?,
                );
                let document = open_document(file, stdin)?;
                check_document(resolved, credentials, document, json, concurrency).await
            }
            Commands::Extract { file, stdin } => {
                let document = open_document(file, stdin)?;
                extract_text(&resolved, document).await
            }
            Commands::Claims { file, stdin, json } => {
                let api_key = require_key(self.openai_api_key, "OPENAI_API_KEY", "--openai-api-key")?;
                let document = open_document(file, stdin)?;
                list_claims(&resolved, api_key, document, json).await
            }
            Commands::Config => show_config(
                &resolved,
                self.openai_api_key.as_deref(),
                self.tavily_api_key.as_deref(),
            ),
        }
    }
}

fn require_key(value: Option<String>, env: &str, flag: &str) -> Result<String> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(key),
        _ => anyhow::bail!("Missing API key. Set {} or pass {}", env, flag),
    }
}

/// Resolve the input document from a path or stdin
fn open_document(file: Option<PathBuf>, use_stdin: bool) -> Result<Document> {
    match (file, use_stdin) {
        (Some(_), true) => anyhow::bail!("Pass either a file or --stdin, not both"),
        (Some(path), false) => Ok(Document::from_path(path)),
        (None, true) => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .context("Failed to read from stdin")?;
            if buffer.is_empty() {
                anyhow::bail!("Input is empty");
            }
            Ok(Document::from_bytes(buffer))
        }
        (None, false) => anyhow::bail!("No input provided. Pass a file or use --stdin"),
    }
}

fn print_progress(event: &ProgressEvent) {
    eprintln!("{}", render::render_progress(event));
}

/// Run the full pipeline on one document
async fn check_document(
    resolved: ResolvedConfig,
    credentials: Credentials,
    document: Document,
    json: bool,
    concurrency: Option<usize>,
) -> Result<()> {
    let mut settings = resolved.settings;
    if let Some(n) = concurrency {
        settings.limits.max_concurrent_claims = n;
        settings
            .limits
            .validate()
            .context("Invalid --concurrency")?;
    }

    let orchestrator = Orchestrator::new(credentials, &settings)?;

    match orchestrator.run(document, &print_progress).await {
        RunOutcome::Completed(report) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render::render_report(&report));
            }
        }
        RunOutcome::NoClaims => {
            eprintln!("\n[No verifiable claims found]");
        }
        RunOutcome::ExtractionFailed { detail } => {
            eprintln!("\n[Could not extract claims: {}]", detail);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Print extracted text
async fn extract_text(resolved: &ResolvedConfig, document: Document) -> Result<()> {
    let extractor = TextExtractor::new().with_timeout(resolved.settings.limits.request_timeout());
    let text = extractor.extract(document).await;

    if text.is_read_error() {
        eprintln!("[{}]", text);
        std::process::exit(1);
    }

    println!("{}", text);
    Ok(())
}

/// Print extracted claims without verifying them
async fn list_claims(
    resolved: &ResolvedConfig,
    api_key: String,
    document: Document,
    json: bool,
) -> Result<()> {
    let settings = &resolved.settings;
    let timeout = settings.limits.request_timeout();

    let reasoning = OpenAiReasoning::new(api_key, settings.reasoning.clone(), timeout)?;
    let extractor = ClaimExtractor::new(Arc::new(reasoning), &settings.limits, settings.retry.clone());

    let text = TextExtractor::new().with_timeout(timeout).extract(document).await;
    if text.is_read_error() {
        eprintln!("[{}]", text);
    }

    let extraction = extractor.extract(&text).await;

    if json {
        let body = serde_json::json!({ "claims": extraction.to_legacy_list() });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        match &extraction {
            ClaimExtraction::Claims(claims) if claims.is_empty() => {
                eprintln!("[No verifiable claims found]");
            }
            ClaimExtraction::Claims(claims) => {
                for (idx, claim) in claims.iter().enumerate() {
                    println!("{}. {}", idx + 1, claim);
                }
            }
            ClaimExtraction::Failed { .. } => eprintln!("[{}]", extraction),
        }
    }

    if extraction.is_failed() {
        std::process::exit(1);
    }

    Ok(())
}

fn display_path(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none - using defaults)".to_string())
}

fn show_config(
    resolved: &ResolvedConfig,
    openai_api_key: Option<&str>,
    tavily_api_key: Option<&str>,
) -> Result<()> {
    let settings = &resolved.settings;

    println!("═══════════════════════════════════════════════════════");
    println!("  claimcheck Configuration");
    println!("═══════════════════════════════════════════════════════");
    println!();
    println!("Config file: {}", display_path(resolved.config_file.as_deref()));
    println!();
    println!("Reasoning:");
    println!("  Model:       {}", settings.reasoning.model);
    println!("  Endpoint:    {}", settings.reasoning.endpoint);
    println!("  Temperature: {}", settings.reasoning.temperature);
    println!("  JSON mode:   {}", settings.reasoning.json_mode);
    println!("  API key:     {}", redact(openai_api_key.unwrap_or_default()));
    println!();
    println!("Search:");
    println!("  Endpoint:    {}", settings.search.endpoint);
    println!("  Depth:       {}", settings.search.search_depth);
    println!("  API key:     {}", redact(tavily_api_key.unwrap_or_default()));
    println!();
    println!("Limits:");
    println!("  Max text chars:     {}", settings.limits.max_text_chars);
    println!("  Max claims:         {}", settings.limits.max_claims);
    println!("  Max search results: {}", settings.limits.max_search_results);
    println!("  Request timeout:    {}s", settings.limits.request_timeout_seconds);
    println!("  Concurrent claims:  {}", settings.limits.max_concurrent_claims);
    println!();
    println!("Retry:");
    println!("  Max attempts:  {}", settings.retry.max_attempts);
    println!("  Initial delay: {}ms", settings.retry.initial_delay_ms);
    println!("  Max delay:     {}ms", settings.retry.max_delay_ms);
    println!("  Multiplier:    {}", settings.retry.backoff_multiplier);

    Ok(())
}
