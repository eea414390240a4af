//! PostgreSQL connection handle and schema management.

use sea_orm::{ConnectOptions, Database as SeaDatabase, DatabaseConnection, DbErr};
use sea_orm_migration::{MigrationStatus, MigratorTrait};

use crate::config::Config;

pub mod migrations;

pub use migrations::Migrator;

/// One entry of the schema history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationState {
    pub name: String,
    pub applied: bool,
}

/// Shared PostgreSQL pool. Cloning is cheap.
#[derive(Clone)]
pub struct Database {
    conn: DatabaseConnection,
}

impl Database {
    /// Open the pool and apply any pending migration before returning.
    pub async fn connect(config: &Config) -> Result<Self, DbErr> {
        let db = Self::open(config).await?;

        db.upgrade()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Schema migration failed"))?;
        tracing::info!("Connected to PostgreSQL, users schema is current");

        Ok(db)
    }

    /// Open the pool and leave the schema as it is.
    pub async fn open(config: &Config) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.database_url.clone());
        options.sqlx_logging(false);

        let conn = SeaDatabase::connect(options).await?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> DatabaseConnection {
        self.conn.clone()
    }

    /// Apply every pending migration.
    pub async fn upgrade(&self) -> Result<(), DbErr> {
        Migrator::up(&self.conn, None).await
    }

    /// Revert the most recent migration.
    pub async fn downgrade(&self) -> Result<(), DbErr> {
        Migrator::down(&self.conn, Some(1)).await
    }

    /// Drop every table and rebuild the schema from scratch.
    pub async fn reset(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.conn).await
    }

    /// Known migrations in order, each flagged with whether it is applied.
    pub async fn history(&self) -> Result<Vec<MigrationState>, DbErr> {
        let migrations = Migrator::get_migration_with_status(&self.conn).await?;

        Ok(migrations
            .iter()
            .map(|m| MigrationState {
                name: m.name().to_string(),
                applied: m.status() == MigrationStatus::Applied,
            })
            .collect())
    }

    pub async fn ping(&self) -> Result<(), DbErr> {
        self.conn.ping().await
    }
}
