use anyhow::Context;
use biblioteca_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load settings")?;
    biblioteca_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.url,
        "biblioteca-app starting"
    );

    biblioteca_app::bootstrap::serve(&settings).await
}
