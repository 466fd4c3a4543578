use anyhow::{Context, Result};
use json_i18n::config::Config;
use json_i18n::i18n::Translator;
use json_i18n::server;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("json_i18n=info".parse()?),
        )
        .init();

    info!("Starting translation service");

    // Load configuration from environment
    let config = Config::from_env()?;

    info!(
        "Loading translations from {}",
        config.translations_file.display()
    );
    let translator = Translator::from_file(&config.translations_file)
        .with_context(|| {
            format!(
                "Failed to load translations from {}",
                config.translations_file.display()
            )
        })?
        .with_language(config.default_language.as_str());

    info!(
        "Serving {} languages, default '{}'",
        translator.languages().len(),
        translator.language()
    );

    server::run_server(&config, translator).await
}
