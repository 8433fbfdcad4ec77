//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use gs_lesson_deck::adapters::ai::{GeminiAdapter, MockAiAdapter, OpenAiAdapter};
use gs_lesson_deck::adapters::export::PptxRenderer;
use gs_lesson_deck::adapters::persistence::FsDeckStore;
use gs_lesson_deck::adapters::ui::tui::TuiInputPort;
use gs_lesson_deck::ports::{DeckRenderer, DeckStore, InputPort, LessonGenerator};
use gs_lesson_deck::shared::config::{AiProvider, AppConfig};
use gs_lesson_deck::usecases::{ExportService, LessonSession};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    // Logs go to stderr at warn by default so they stay out of the prompts.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    gs_lesson_deck::adapters::ui::init_ui();

    // --- Generator ---
    let provider = cfg.provider().map_err(|e| anyhow::anyhow!("{}", e))?;
    let generator: Arc<dyn LessonGenerator> = match provider {
        AiProvider::Gemini if cfg.api_key().is_none() => {
            warn!("no API key set (LESSON_DECK_API_KEY / GEMINI_API_KEY / API_KEY), using mock generator");
            Arc::new(MockAiAdapter::new())
        }
        AiProvider::Gemini => {
            let model = cfg.model_or_default(provider);
            info!(%model, "lesson generation via Gemini");
            Arc::new(GeminiAdapter::new(
                cfg.http_client().map_err(|e| anyhow::anyhow!("{}", e))?,
                cfg.api_url_or_default(provider),
                cfg.api_key().unwrap_or_default(),
                model,
            ))
        }
        AiProvider::OpenAi => {
            let model = cfg.model_or_default(provider);
            let url = cfg.api_url_or_default(provider);
            info!(%model, %url, "lesson generation via OpenAI-compatible endpoint");
            Arc::new(OpenAiAdapter::new(
                cfg.http_client().map_err(|e| anyhow::anyhow!("{}", e))?,
                url,
                cfg.api_key().unwrap_or_default(),
                model,
            ))
        }
        AiProvider::Mock => {
            warn!("mock generator selected; lessons are sample content");
            Arc::new(MockAiAdapter::new())
        }
    };

    // --- Export ---
    let renderer = Arc::new(PptxRenderer::new());
    let output_dir = cfg.output_dir_or_default();
    info!(path = %output_dir.display(), "output directory");
    let store: Arc<dyn DeckStore> = Arc::new(FsDeckStore::new(&output_dir, renderer.extension()));
    let renderer: Arc<dyn DeckRenderer> = renderer;
    let export_service = ExportService::new(renderer, store);

    // --- Session + UI ---
    let session = LessonSession::new(generator, export_service);
    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(session));

    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
