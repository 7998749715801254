use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use tokio::sync::OnceCell;

/// Database connection and configuration tests
pub mod db_tests;


// Migrations run once per test process; `false` means no database.
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

/// Connect and migrate, or `None` when no database is reachable.
pub(crate) async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let ready = *MIGRATED
        .get_or_init(|| async {
            let db = match crate::db::connect().await {
                Ok(db) => db,
                Err(e) => {
                    eprintln!("skip: cannot connect to db: {}", e);
                    return false;
                }
            };
            if let Err(e) = migration::Migrator::up(&db, None).await {
                eprintln!("skip: migrate up failed: {}", e);
                return false;
            }
            true
        })
        .await;
    if !ready {
        return None;
    }
    // fresh connection bound to the current test's runtime
    crate::db::connect().await.ok()
}
