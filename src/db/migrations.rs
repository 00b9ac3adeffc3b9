//! Opening price databases. Only the default one is created and migrated.

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

const SCHEMA: &str = include_str!("schema.sql");

/// Reads dominate, so a handful of connections is plenty per database.
const MAX_CONNECTIONS: u32 = 4;

/// Open (creating if needed) the SQLite file at `db_path` and apply the schema.
///
/// The parent directory is created when missing; failing to create it is
/// reported as an I/O error rather than deferred to the connect call.
pub async fn init_db(db_path: &str) -> Result<SqlitePool, sqlx::Error> {
    let path = Path::new(db_path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await?;

    apply_schema(&pool).await?;

    info!("Opened price database at {}", db_path);
    Ok(pool)
}

/// Open an existing SQLite file without creating it or touching its schema.
pub async fn open_existing(db_path: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(false)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await?;

    info!("Opened existing price database at {}", db_path);
    Ok(pool)
}

/// Every statement is `IF NOT EXISTS`, so re-applying is a no-op.
async fn apply_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let statements = schema_statements(SCHEMA);
    for statement in &statements {
        sqlx::query(statement).execute(pool).await?;
    }
    debug!("Applied {} schema statements", statements.len());
    Ok(())
}

/// Split a SQL script on `;` after dropping `--` line comments.
fn schema_statements(sql: &str) -> Vec<String> {
    let stripped: String = sql
        .lines()
        .map(|line| match line.find("--") {
            Some(idx) => &line[..idx],
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n");
    stripped
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn db_path(temp_dir: &TempDir, parts: &[&str]) -> String {
        let mut path = temp_dir.path().to_path_buf();
        for part in parts {
            path.push(part);
        }
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_schema_statements_ignore_comments() {
        let sql = concat!(
            "-- header; with a semicolon\n",
            "CREATE TABLE a (x INTEGER); -- trailing; note\n",
            "\n",
            "CREATE INDEX i ON a (x);\n",
        );
        assert_eq!(
            schema_statements(sql),
            vec!["CREATE TABLE a (x INTEGER)", "CREATE INDEX i ON a (x)"]
        );
    }

    #[test]
    fn test_bundled_schema_statements_are_ddl() {
        let statements = schema_statements(SCHEMA);
        assert_eq!(statements.len(), 3);
        for statement in &statements {
            assert!(statement.starts_with("CREATE "), "statement: {}", statement);
        }
    }

    #[tokio::test]
    async fn test_init_db_creates_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = db_path(&temp_dir, &["networks", "porcini", "vortex.db"]);

        let pool = init_db(&path).await.expect("init_db failed");
        assert!(Path::new(&path).exists());

        let (one,): (i64,) = sqlx::query_as("SELECT 1").fetch_one(&pool).await.unwrap();
        assert_eq!(one, 1);
    }

    #[tokio::test]
    async fn test_init_db_fails_when_parent_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let path = db_path(&temp_dir, &["blocker", "vortex.db"]);

        assert!(init_db(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_open_existing_does_not_create() {
        let temp_dir = TempDir::new().unwrap();
        let path = db_path(&temp_dir, &["missing.db"]);

        assert!(open_existing(&path).await.is_err());
        assert!(!Path::new(&path).exists());
    }

    #[tokio::test]
    async fn test_open_existing_reads_without_migrating() {
        let temp_dir = TempDir::new().unwrap();
        let path = db_path(&temp_dir, &["archive.db"]);
        let seeded = init_db(&path).await.unwrap();
        sqlx::query("DROP TABLE reward_cycles")
            .execute(&seeded)
            .await
            .unwrap();
        seeded.close().await;

        let pool = open_existing(&path).await.unwrap();
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'reward_cycles'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_schema_has_price_and_cycle_tables() {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_db(&db_path(&temp_dir, &["vortex.db"])).await.unwrap();

        let names: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master \
             WHERE type IN ('table', 'index') AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        let names: Vec<&str> = names.iter().map(|n| n.0.as_str()).collect();
        assert_eq!(
            names,
            vec!["asset_prices", "idx_asset_prices_distribution", "reward_cycles"]
        );
    }

    #[tokio::test]
    async fn test_reopening_keeps_existing_prices() {
        let temp_dir = TempDir::new().unwrap();
        let path = db_path(&temp_dir, &["vortex.db"]);

        let pool = init_db(&path).await.unwrap();
        sqlx::query(
            "INSERT INTO asset_prices (vtx_distribution_id, asset_id, price) \
             VALUES (6, 1, '0.0521')",
        )
        .execute(&pool)
        .await
        .unwrap();
        apply_schema(&pool).await.expect("re-applying schema failed");
        pool.close().await;

        let pool = init_db(&path).await.unwrap();
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM asset_prices")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_connection_options_applied() {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_db(&db_path(&temp_dir, &["vortex.db"])).await.unwrap();

        let (timeout,): (i64,) = sqlx::query_as("PRAGMA busy_timeout")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(timeout, 5000);

        let (mode,): (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&pool)
            .await
            .unwrap();
        // WAL can fall back on filesystems without shared memory support.
        assert!(matches!(mode.as_str(), "wal" | "delete"), "journal_mode: {}", mode);
    }
}
