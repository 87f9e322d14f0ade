//! Process-level wiring shared by the server binary and the CLI.

use anyhow::Context;
use biblioteca_db::Database;
use biblioteca_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// Connect to the store and register every module against it.
async fn assemble(settings: &Settings) -> anyhow::Result<(Database, ModuleRegistry)> {
    let db = Database::connect(&settings.database.url, settings.database.max_connections)
        .await
        .context("failed to open the library database")?;

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &db)?;

    Ok((db, registry))
}

/// Create any missing tables and return how many schema steps ran.
pub async fn migrate(settings: &Settings) -> anyhow::Result<usize> {
    let (db, registry) = assemble(settings).await?;
    let applied = db.apply_migrations(&registry.collect_migrations()).await?;
    db.close().await;
    Ok(applied)
}

/// Run the API until a shutdown signal, then stop modules and close the pool.
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    let (db, registry) = assemble(settings).await?;

    let applied = db.apply_migrations(&registry.collect_migrations()).await?;
    tracing::info!(applied, "schema up to date");

    let ctx = InitCtx {
        settings,
        db: &db,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    let served = biblioteca_http::start_server(&registry, settings).await;

    registry.stop_all().await?;
    db.close().await;
    served
}
