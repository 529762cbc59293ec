use anyhow::Context;
use bookhouse_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load bookhouse settings")?;
    bookhouse_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.endpoint,
        "bookhouse-app bootstrap starting"
    );

    bookhouse_app::run(settings).await
}
