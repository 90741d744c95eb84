use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use ai_plugin::providers::adapters::get_provider_adapter;
use ai_plugin::{AiClientFactory, AiConfig, ChatOptions, Provider, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Send one prompt to a configured AI provider
#[derive(Debug, Parser)]
#[command(name = "ai-chat", version)]
struct Cli {
    /// TOML config file; defaults to AI_* environment variables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Provider name; defaults to the configured default
    #[arg(long)]
    provider: Option<String>,

    #[arg(long)]
    system: Option<String>,

    #[arg(long)]
    temperature: Option<f64>,

    #[arg(long)]
    max_tokens: Option<u32>,

    /// Print raw response chunks as they arrive
    #[arg(long)]
    stream: bool,

    /// List supported providers with their defaults and exit
    #[arg(long)]
    list: bool,

    prompt: Option<String>,
}

/// Forwards stream chunks to a writer, keeping the first write error and
/// skipping later chunks once one has occurred
struct ChunkWriter<W: Write> {
    out: W,
    error: Option<std::io::Error>,
}

impl<W: Write> ChunkWriter<W> {
    fn new(out: W) -> Self {
        Self { out, error: None }
    }

    fn write(&mut self, chunk: &[u8]) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.out.write_all(chunk).and_then(|()| self.out.flush()) {
            self.error = Some(err);
        }
    }

    fn finish(self) -> std::io::Result<()> {
        self.error.map_or(Ok(()), Err)
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<AiConfig> {
    match path {
        Some(path) => AiConfig::load(path),
        None => AiConfig::from_env(),
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    if cli.list {
        for provider in Provider::ALL {
            let defaults = get_provider_adapter(provider).config();
            println!(
                "{:<10} {:<16} {}",
                provider,
                defaults.default_model.unwrap_or_default(),
                defaults.endpoint.unwrap_or_default()
            );
        }
        return Ok(ExitCode::SUCCESS);
    }

    let Some(prompt) = cli.prompt else {
        eprintln!("No prompt given; see --help.");
        return Ok(ExitCode::FAILURE);
    };

    let config = load_config(cli.config.as_ref())?;
    let provider = cli.provider.unwrap_or_else(|| config.default.clone());
    let client = AiClientFactory::create(&provider, config.provider_config(&provider))?;

    let mut options = ChatOptions::new();
    options.system = cli.system;
    options.temperature = cli.temperature;
    options.max_tokens = cli.max_tokens;

    if cli.stream {
        let mut writer = ChunkWriter::new(std::io::stdout());
        client
            .stream_chat(&prompt, |chunk| writer.write(chunk), &options)
            .await?;
        if let Err(err) = writer.finish() {
            eprintln!("Failed to write output: {err}");
            return Ok(ExitCode::FAILURE);
        }
        println!();
        return Ok(ExitCode::SUCCESS);
    }

    let result = client.chat(&prompt, &options).await?;
    println!("{}", result.text);
    let info = client.model_info();
    eprintln!(
        "[{} / {}] tokens: prompt={} completion={} total={}",
        info.provider,
        result.model,
        result.usage.prompt_tokens,
        result.usage.completion_tokens,
        result.usage.total_tokens
    );
    if let Some(error) = result.error {
        eprintln!("vendor error {}: {}", error.code, error.message);
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
