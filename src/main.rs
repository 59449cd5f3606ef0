use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    net::TcpListener,
};

use promptreel::{
    api,
    client::{
        after_done, run_generation, save_result, AfterDone, GenerateClient, GeneratorView, Phase,
        SessionSettings, TerminalRenderer,
    },
    config::Config,
    logging,
    state::AppState,
};

#[derive(Parser)]
#[command(name = "promptreel", version, about = "Demo AI video generator")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the generation API (default)
    Serve,
    /// Submit prompts to a running server
    Generate(GenerateArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Video description; prompts are read from stdin when omitted
    #[arg(short, long)]
    prompt: Option<String>,

    /// Target length in minutes (30-60)
    #[arg(short, long, default_value_t = 30)]
    duration: u32,

    #[arg(long, env = "PROMPTREEL_SERVER", default_value = "http://127.0.0.1:8080")]
    server: String,

    /// Save the video after a one-shot generation
    #[arg(long)]
    download: bool,

    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    #[arg(long, default_value_t = 200)]
    tick_ms: u64,

    #[arg(long, default_value_t = 500)]
    settle_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let _guard = logging::init("promptreel=debug,tower_http=debug");
            serve().await
        }
        Command::Generate(args) => {
            let _guard = logging::init("promptreel=warn");
            generate(args).await
        }
    }
}

async fn serve() -> anyhow::Result<()> {
    let config = Config::load();
    let listener = TcpListener::bind(&config.server_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server_addr))?;
    api::serve(listener, AppState::new(config)).await?;
    Ok(())
}

async fn generate(args: GenerateArgs) -> anyhow::Result<()> {
    let client = GenerateClient::new(&args.server)
        .with_context(|| format!("invalid server url {}", args.server))?;
    let settings = SessionSettings {
        tick: Duration::from_millis(args.tick_ms),
        settle: Duration::from_millis(args.settle_ms),
    };
    let mut renderer = TerminalRenderer::stderr();
    let mut view = GeneratorView::new();
    view.set_duration(args.duration);

    if let Some(prompt) = args.prompt {
        view.set_prompt(prompt);
        let phase = run_generation(&mut view, &client, settings, &mut renderer).await?;
        if phase == Phase::Done && args.download {
            if let Some(path) = save_result(client.http(), &view, &args.output_dir).await? {
                eprintln!("Saved {}", path.display());
            }
        }
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        eprintln!("Describe your video ({} minutes), empty line to quit:", view.duration());
        let Some(prompt) = lines.next_line().await? else {
            return Ok(());
        };
        if prompt.trim().is_empty() {
            return Ok(());
        }
        view.set_prompt(prompt);
        let phase = run_generation(&mut view, &client, settings, &mut renderer).await?;
        if phase != Phase::Done {
            eprintln!("Generation did not complete, try again.");
            continue;
        }
        if after_done(&mut lines, client.http(), &mut view, &args.output_dir).await?
            == AfterDone::Quit
        {
            return Ok(());
        }
    }
}
