//! ollama-cli — Ollama 服务的命令行客户端
//!
//! Usage:
//!   ollama-cli version                          Show server version
//!   ollama-cli list                             List local models
//!   ollama-cli ps                               List models loaded in memory
//!   ollama-cli generate <model> <prompt>        Stream a completion
//!   ollama-cli chat <model> <message>           Stream a chat reply
//!   ollama-cli pull <model>                     Pull a model with progress
//!   ollama-cli show <model>                     Show model details
//!   ollama-cli blob-exists <digest|file>        Check whether a blob is on the server

use anyhow::{bail, Context};
use futures::StreamExt;
use ollama_lib_rust::requests::{
    ChatCompletionRequest, GenerateCompletionRequest, PullModelRequest, ShowModelRequest,
};
use ollama_lib_rust::types::{
    file_digest, ChatMessage, ChatMessages, ChatResponse, GenerateResponse, ModelList,
    ProgressResponse, RunningModelList, ShowModelResponse, VersionResponse,
};
use ollama_lib_rust::OllamaClient;
use std::io::Write;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let result = match args[1].as_str() {
        "version" | "--version" | "-V" => cmd_version().await,
        "list" => cmd_list().await,
        "ps" => cmd_ps().await,
        "generate" => cmd_generate(&args[2..]).await,
        "chat" => cmd_chat(&args[2..]).await,
        "pull" => cmd_pull(&args[2..]).await,
        "show" => cmd_show(&args[2..]).await,
        "blob-exists" => cmd_blob_exists(&args[2..]).await,
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"ollama-cli — Ollama 命令行客户端

USAGE:
    ollama-cli <COMMAND> [OPTIONS]

COMMANDS:
    version                              Show client and server version
    list                                 List local models
    ps                                   List models loaded in memory
    generate <model> <prompt> [--no-stream] [--system <text>]
    chat <model> <message> [--system <text>]
    pull <model> [--insecure]            Pull a model, printing progress
    show <model> [--verbose]             Show model details
    blob-exists <digest|file>            Check a blob by digest or local file
    help                                 Show this help message

ENVIRONMENT:
    OLLAMA_HOST                          Server address (default http://localhost:11434)
    OLLAMA_TIMEOUT_SECS                  Request timeout in seconds (default 300)
    RUST_LOG                             Log filter (default warn)"#
    );
}

fn client() -> anyhow::Result<OllamaClient> {
    OllamaClient::builder()
        .build()
        .context("failed to configure client")
}

fn positional(args: &[String], index: usize, name: &str) -> anyhow::Result<String> {
    let values: Vec<&String> = positionals(args);
    match values.get(index) {
        Some(v) => Ok((*v).clone()),
        None => bail!("missing <{name}> argument"),
    }
}

/// Arguments that are neither flags nor flag values.
fn positionals(args: &[String]) -> Vec<&String> {
    let mut out = Vec::new();
    let mut skip = false;
    for arg in args {
        if skip {
            skip = false;
            continue;
        }
        if arg == "--system" {
            skip = true;
            continue;
        }
        if arg.starts_with("--") {
            continue;
        }
        out.push(arg);
    }
    out
}

fn flag(args: &[String], name: &str) -> bool {
    args.iter().any(|a| a == name)
}

fn option(args: &[String], name: &str) -> Option<String> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

async fn cmd_version() -> anyhow::Result<()> {
    let version: VersionResponse = client()?.api().version().await?.json().await?;
    println!("{}", version_line(&version.version));
    Ok(())
}

async fn cmd_list() -> anyhow::Result<()> {
    let list: ModelList = client()?.management().list().await?.json().await?;
    if list.models.is_empty() {
        println!("No local models.");
    }
    for model in &list.models {
        println!(
            "{:<40} {:>10}  {}",
            model.name,
            human_size(model.size),
            model.modified_at.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

async fn cmd_ps() -> anyhow::Result<()> {
    let list: RunningModelList = client()?.management().running().await?.json().await?;
    if list.models.is_empty() {
        println!("No models loaded.");
    }
    for model in &list.models {
        println!(
            "{:<40} {:>10}  until {}",
            model.name,
            human_size(model.size),
            model.expires_at.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

async fn cmd_generate(args: &[String]) -> anyhow::Result<()> {
    let model = positional(args, 0, "model")?;
    let prompt = positional(args, 1, "prompt")?;
    let mut request = GenerateCompletionRequest::new(model, prompt);
    if let Some(system) = option(args, "--system") {
        request = request.system(system);
    }
    if flag(args, "--no-stream") {
        request = request.stream(false);
    }

    let reply = client()?
        .generation()
        .generate(&request)
        .await?
        .reply::<GenerateResponse>()
        .await?;
    let mut stream = reply.into_stream();
    let mut stdout = std::io::stdout();
    let mut last = None;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        print!("{}", chunk.response);
        stdout.flush()?;
        last = Some(chunk);
    }
    println!();
    if let Some(tps) = last.and_then(|c| c.stats.tokens_per_second()) {
        eprintln!("[{tps:.1} tokens/s]");
    }
    Ok(())
}

async fn cmd_chat(args: &[String]) -> anyhow::Result<()> {
    let model = positional(args, 0, "model")?;
    let message = positional(args, 1, "message")?;
    let mut messages = ChatMessages::new();
    if let Some(system) = option(args, "--system") {
        messages.push(ChatMessage::system(system));
    }
    messages.push(ChatMessage::user(message));

    let request = ChatCompletionRequest::new(model, messages);
    let mut stream = client()?
        .generation()
        .chat(&request)
        .await?
        .stream::<ChatResponse>()
        .await?;
    let mut stdout = std::io::stdout();
    while let Some(chunk) = stream.next().await {
        print!("{}", chunk?.content());
        stdout.flush()?;
    }
    println!();
    Ok(())
}

async fn cmd_pull(args: &[String]) -> anyhow::Result<()> {
    let model = positional(args, 0, "model")?;
    let mut request = PullModelRequest::new(model);
    if flag(args, "--insecure") {
        request = request.insecure(true);
    }

    let mut stream = client()?
        .management()
        .pull(&request)
        .await?
        .stream::<ProgressResponse>()
        .await?;
    while let Some(update) = stream.next().await {
        let update = update?;
        match update.fraction() {
            Some(f) => eprint!("\r{} {:>5.1}%", update.status, f * 100.0),
            None => eprintln!("\r{}", update.status),
        }
    }
    eprintln!();
    Ok(())
}

async fn cmd_show(args: &[String]) -> anyhow::Result<()> {
    let model = positional(args, 0, "model")?;
    let mut request = ShowModelRequest::new(model);
    if flag(args, "--verbose") {
        request = request.verbose(true);
    }
    let info: ShowModelResponse = client()?.management().show(&request).await?.json().await?;
    println!("{}", serde_json::to_string_pretty(&info.details)?);
    if let Some(parameters) = &info.parameters {
        println!("\nparameters:\n{parameters}");
    }
    if let Some(template) = &info.template {
        println!("\ntemplate:\n{template}");
    }
    Ok(())
}

async fn cmd_blob_exists(args: &[String]) -> anyhow::Result<()> {
    let target = positional(args, 0, "digest|file")?;
    let digest = if Path::new(&target).is_file() {
        file_digest(&target).await?
    } else {
        target
    };

    let resp = client()?.management().blob_exists(&digest).await?;
    match resp.status().as_u16() {
        200 => println!("{digest}: present"),
        404 => {
            println!("{digest}: missing");
            std::process::exit(2);
        }
        other => bail!("unexpected status {other} for {digest}"),
    }
    Ok(())
}

fn version_line(server: &str) -> String {
    format!("ollama-cli {}, server {}", env!("CARGO_PKG_VERSION"), server)
}

fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1000.0 && unit < UNITS.len() - 1 {
        size /= 1000.0;
        unit += 1;
    }
    format!("{size:.1} {}", UNITS[unit])
}
