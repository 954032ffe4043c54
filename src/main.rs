use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use live_translate::session::{Capabilities, CaptureSession, SessionState, ViewUpdate};
use live_translate::speech::{AlwaysGranted, ConsoleSpeechOutput, StdinRecognizer};
use live_translate::{
    create_router, AppState, Config, GoogleTranslator, LanguageSelection, RelayClient, Translator,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::services::ServeDir;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "live-translate", version, about = "Speech capture → translate → speak relay")]
struct Cli {
    /// Configuration file (without extension)
    #[arg(long, global = true, default_value = "config/live-translate")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the translation relay (REST + socket)
    Serve,
    /// Run one capture session on stdin (`~` prefixes an interim line)
    Console {
        /// Recognition locale
        #[arg(long)]
        source: Option<String>,
        /// Translation target code
        #[arg(long)]
        target: Option<String>,
        /// Relay base URL; translates in-process when omitted
        #[arg(long)]
        relay: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    match cli.command {
        Command::Serve => serve(cfg).await,
        Command::Console {
            source,
            target,
            relay,
        } => console(cfg, source, target, relay).await,
    }
}

fn upstream_translator(cfg: &Config) -> Result<Arc<dyn Translator>> {
    let translator = GoogleTranslator::new(
        cfg.translation.endpoint.clone(),
        Duration::from_secs(cfg.translation.timeout_secs),
    )
    .context("Failed to create upstream translator")?;
    Ok(Arc::new(translator))
}

async fn serve(cfg: Config) -> Result<()> {
    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    let state = AppState::new(upstream_translator(&cfg)?);
    let mut app = create_router(state);
    if let Some(dir) = &cfg.service.static_dir {
        info!("Serving static files from {}", dir);
        app = app.fallback_service(ServeDir::new(dir));
    }

    let addr = cfg.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running on {}", addr);

    axum::serve(listener, app).await.context("HTTP server failed")?;
    Ok(())
}

async fn console(
    cfg: Config,
    source: Option<String>,
    target: Option<String>,
    relay: Option<String>,
) -> Result<()> {
    let translator: Arc<dyn Translator> = match relay {
        Some(url) => {
            info!("Translating through relay at {}", url);
            let client =
                RelayClient::new(url, Duration::from_secs(cfg.translation.timeout_secs))
                    .context("Failed to create relay client")?;
            Arc::new(client)
        }
        None => upstream_translator(&cfg)?,
    };

    let languages = LanguageSelection::new(
        source.unwrap_or_else(|| cfg.capture.default_source.clone()),
        target.unwrap_or_else(|| cfg.capture.default_target.clone()),
    );

    let session = CaptureSession::spawn(
        cfg.capture.to_capture_config(),
        Capabilities {
            recognizer: Some(Box::new(StdinRecognizer::stdin())),
            output: Arc::new(ConsoleSpeechOutput),
            translator,
            permission: Arc::new(AlwaysGranted),
        },
    );

    let mut updates = session.subscribe();
    session.start(languages).await?;

    // Print the live view until the session goes idle and the last
    // translation has been shown
    let mut idle = false;
    loop {
        let update = match tokio::time::timeout(Duration::from_secs(30), updates.recv()).await {
            Ok(Ok(update)) => update,
            Ok(Err(tokio::sync::broadcast::error::RecvError::Lagged(n))) => {
                warn!("Skipped {} view updates", n);
                continue;
            }
            Ok(Err(_)) => break,
            Err(_) if idle => break,
            Err(_) => continue,
        };

        match update {
            ViewUpdate::Transcript(text) => println!("> {}", text),
            ViewUpdate::Translating => println!("Translating..."),
            ViewUpdate::Translated(text) => {
                println!("= {}", text);
                if idle {
                    break;
                }
            }
            ViewUpdate::TranslationFailed(message) => {
                println!("! {}", message);
                if idle {
                    break;
                }
            }
            ViewUpdate::State(SessionState::Idle) => {
                idle = true;
                let stats = session.stats().await?;
                if stats.commits == 0 {
                    break;
                }
            }
            ViewUpdate::State(_) | ViewUpdate::Preparing => {}
        }
    }

    session.shutdown();
    Ok(())
}
