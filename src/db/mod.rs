pub mod portfolio;
pub mod profiles;
pub mod requests;

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};

/// Create a SeaORM connection pool and optionally bring the schema up to date.
pub async fn create_pool(
    database_url: &str,
    run_migrations: bool,
) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    if run_migrations {
        Migrator::up(&db, None).await?;
        tracing::info!("Database migrations applied");
    }

    Ok(db)
}
