//! Migrate command - Schema management without starting the server.

use sea_orm::DbErr;

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

fn migration_error(action: &str) -> impl FnOnce(DbErr) -> AppError + '_ {
    move |e| AppError::internal(format!("{} failed: {}", action, e))
}

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(migration_error("Database connection"))?;

    match args.action {
        MigrateAction::Up => {
            db.run_migrations().await.map_err(migration_error("Migration"))?;
            tracing::info!("Schema is up to date");
        }
        MigrateAction::Down => {
            db.rollback_migration()
                .await
                .map_err(migration_error("Rollback"))?;
            tracing::info!("Rolled back the latest migration");
        }
        MigrateAction::Status => {
            let states = db
                .migration_status()
                .await
                .map_err(migration_error("Status check"))?;
            let pending = states.iter().filter(|s| !s.applied).count();

            for state in &states {
                let label = if state.applied { "applied" } else { "pending" };
                println!("{:<8} {}", label, state.name);
            }
            tracing::info!(total = states.len(), pending, "Migration status");
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables and re-running every migration");
            db.fresh_migrations()
                .await
                .map_err(migration_error("Fresh migration"))?;
            tracing::info!("Database recreated");
        }
    }

    Ok(())
}
