//! `migrate` subcommand.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;

pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = Database::open(&config).await?;

    match args.action {
        MigrateAction::Up => {
            db.upgrade().await?;
            tracing::info!("users schema is up to date");
        }
        MigrateAction::Down => {
            db.downgrade().await?;
            tracing::info!("Reverted the latest migration");
        }
        MigrateAction::Status => {
            let history = db.history().await?;
            let pending = history.iter().filter(|m| !m.applied).count();

            for migration in &history {
                let mark = if migration.applied { "x" } else { " " };
                println!("[{}] {}", mark, migration.name);
            }
            tracing::info!(total = history.len(), pending, "Migration status");
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables in {}", redacted_target(&config.database_url));
            db.reset().await?;
            tracing::info!("Schema rebuilt from scratch");
        }
    }

    Ok(())
}

/// Host and database part of a connection URL, without credentials.
fn redacted_target(url: &str) -> &str {
    url.rsplit_once('@').map(|(_, target)| target).unwrap_or("the configured database")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacted_target_drops_credentials() {
        assert_eq!(
            redacted_target("postgres://admin:hunter2@db:5432/users"),
            "db:5432/users"
        );
        assert_eq!(redacted_target("postgres:///users"), "the configured database");
    }
}
