use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use crate::clients::gemini::GeminiRemote;
use crate::clients::web::WebFetcher;
use crate::content::{flashcards, LessonPlanner, McqGenerator};
use crate::domain::Difficulty;
use crate::infra::config::{AppConfig, Config};
use crate::prep::{input, PrepInput, PrepService};

#[derive(Parser)]
#[command(name = "edu-mcp-gateway")]
#[command(about = "Educational content MCP gateway - server and admin CLI")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the gateway (default when no subcommand is given)
    Serve,
    /// Health check the service
    Health {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:5000")]
        url: String,
    },
    /// Validate configuration
    Config {
        /// Validate config without starting service
        #[arg(long)]
        validate: bool,
    },
    /// Show service status and registered tools
    Status {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:5000")]
        url: String,
    },
    /// Print multiple-choice question stubs for a topic
    Mcqs {
        topic: String,
        #[arg(short, long, default_value_t = crate::content::mcq::DEFAULT_NUM_QUESTIONS)]
        num: usize,
    },
    /// Print the lesson plan for a subject as JSON
    LessonPlan { subject: String },
    /// Print the flashcard deck for a subject as JSON
    Flashcards { subject: String },
    /// Generate consulting interview prep content with the language model
    Prep(PrepArgs),
}

#[derive(Args, Clone)]
#[group(required = true, multiple = false)]
pub struct PrepSource {
    /// Case prompt, eg. "Profitability case for an e-commerce company"
    #[arg(long)]
    pub prompt: Option<String>,
    /// PDF casebook (max 10MB)
    #[arg(long)]
    pub pdf: Option<PathBuf>,
    /// Website to extract cases from
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(Args, Clone)]
pub struct PrepArgs {
    #[command(flatten)]
    pub source: PrepSource,
    /// Beginner, Intermediate or Advanced
    #[arg(short, long, default_value = "Beginner")]
    pub difficulty: Difficulty,
    /// Emit the report as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub async fn run_commands(command: Commands) -> ExitCode {
    match command {
        Commands::Serve => match crate::infra::boot::run_server().await {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("❌ Server failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Health { url } => match health_check(&url).await {
            Ok(_) => {
                println!("✅ Service is healthy");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Health check failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Config { validate: _ } => match validate_config() {
            Ok(_) => {
                println!("✅ Configuration is valid");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Configuration validation failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Status { url } => match show_status(&url).await {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("❌ Status check failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Mcqs { topic, num } => {
            for q in McqGenerator.generate(&topic, num) {
                println!("{q}");
            }
            ExitCode::SUCCESS
        }
        Commands::LessonPlan { subject } => print_json(&LessonPlanner.create(&subject)),
        Commands::Flashcards { subject } => print_json(&flashcards(&subject)),
        Commands::Prep(args) => match run_prep(args).await {
            Ok(out) => {
                println!("{out}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(s) => {
            println!("{s}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn health_check(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/healthz", url))
        .timeout(std::time::Duration::from_millis(500))
        .send()
        .await?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(format!("HTTP {}", response.status()).into())
    }
}

fn validate_config() -> Result<(), Box<dyn std::error::Error>> {
    Config::from_env().validate()?;
    if let Ok(path) = std::env::var("CONFIG_PATH") {
        let raw = std::fs::read_to_string(&path).map_err(|e| format!("{path}: {e}"))?;
        AppConfig::from_toml_str(&raw)?;
    }
    Ok(())
}

async fn show_status(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();

    // Health check
    let health_response = client
        .get(format!("{}/healthz", url))
        .timeout(std::time::Duration::from_secs(5))
        .send()
        .await?;

    println!(
        "🏥 Health Status: {}",
        if health_response.status().is_success() {
            "✅ Healthy"
        } else {
            "❌ Unhealthy"
        }
    );

    // Try to get tools list through the JSON-RPC shim
    let tools_response = client
        .post(format!("{}/rpc", url))
        .json(&serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/list",
            "params": {}
        }))
        .timeout(std::time::Duration::from_millis(500))
        .send()
        .await;

    match tools_response {
        Ok(resp) if resp.status().is_success() => {
            let names: Vec<String> = resp
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v["result"]["tools"].as_array().cloned())
                .unwrap_or_default()
                .iter()
                .filter_map(|t| t["name"].as_str().map(str::to_owned))
                .collect();
            println!("🔧 Tools: ✅ Available {:?}", names);
        }
        Ok(resp) => {
            println!("🔧 Tools: ❌ HTTP {}", resp.status());
        }
        Err(_) => {
            println!("🔧 Tools: ❌ Unavailable");
        }
    }

    // Configuration summary
    let app_cfg = AppConfig::from_env_and_toml();
    println!("\n📋 Configuration:");
    println!(
        "  Mode: {}",
        std::env::var("MODE").unwrap_or_else(|_| "server".into())
    );
    println!(
        "  Port: {}",
        std::env::var("PORT").unwrap_or_else(|_| crate::infra::config::DEFAULT_PORT.to_string())
    );
    println!(
        "  Log Level: {}",
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into())
    );
    if app_cfg.llm.api_key().is_some() {
        println!("  Language Model: {} via {}", app_cfg.llm.model(), app_cfg.llm.base_url());
    } else {
        println!("  Language Model: Not configured");
    }

    Ok(())
}

fn prep_input(source: &PrepSource) -> Result<PrepInput, Box<dyn std::error::Error>> {
    let input = match (&source.prompt, &source.pdf, &source.url) {
        (Some(prompt), _, _) => input::validate_prompt(prompt)?,
        (_, Some(path), _) => input::load_pdf(path)?,
        (_, _, Some(url)) => input::validate_url(url)?,
        _ => return Err("Please provide valid input to generate content.".into()),
    };
    Ok(input)
}

async fn run_prep(args: PrepArgs) -> Result<String, Box<dyn std::error::Error>> {
    let input = prep_input(&args.source)?;
    let app_cfg = AppConfig::from_env_and_toml();
    let llm = GeminiRemote::from_config(&app_cfg.llm)
        .ok_or("GOOGLE_API_KEY not configured; set it to generate prep content")?;
    let prep = PrepService::new(Arc::new(llm), WebFetcher::from_config(&app_cfg.fetch));
    let report = prep.run(&input, args.difficulty).await?;
    if args.json {
        Ok(serde_json::to_string_pretty(&report)?)
    } else {
        Ok(report.render())
    }
}
