//! Database migrations for Modeldesk.
//!
//! Simple migration system that tracks applied migrations and runs each only once.

use rusqlite::Connection;

/// SQL for the initial schema migration.
const MIGRATION_001_SETTINGS: &str = r#"
-- Settings table (key-value store for app preferences)
CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (unixepoch())
);
"#;

/// All migrations in order. Each is (name, sql).
const MIGRATIONS: &[(&str, &str)] = &[("001_settings", MIGRATION_001_SETTINGS)];

/// Run all pending migrations.
///
/// Creates the migrations tracking table if needed, then applies any migrations
/// that haven't been run yet.
pub fn run_migrations(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS migrations (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL DEFAULT (unixepoch())
        );",
    )?;

    for (name, sql) in MIGRATIONS {
        let applied: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM migrations WHERE name = ?)",
            [name],
            |row| row.get(0),
        )?;

        if !applied {
            tracing::info!(migration = %name, "Running migration");
            conn.execute_batch(sql)?;
            conn.execute("INSERT INTO migrations (name) VALUES (?)", [name])?;
        }
    }

    Ok(())
}
