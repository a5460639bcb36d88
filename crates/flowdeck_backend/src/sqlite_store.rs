use anyhow::Context as _;
use flowdeck_domain::SettingsStore;
use rusqlite::{Connection, OptionalExtension as _, params};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const LATEST_SCHEMA_VERSION: u32 = 1;

const MIGRATIONS: &[(u32, &str)] = &[(
    1,
    include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/migrations/0001_init.sql"
    )),
)];

/// Local sqlite-backed settings store. The column registry persists
/// here under its fixed key.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new(db_path: PathBuf) -> anyhow::Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let conn = Connection::open(&db_path)
            .with_context(|| format!("failed to open {}", db_path.display()))?;
        migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn get_setting(&self, key: &str) -> anyhow::Result<Option<String>> {
        let conn = self.lock_conn()?;
        conn.query_row(
            "SELECT value FROM app_settings WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .with_context(|| format!("failed to read setting {key}"))
    }

    pub fn set_setting(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let conn = self.lock_conn()?;
        conn.execute(
            "INSERT INTO app_settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )
        .with_context(|| format!("failed to write setting {key}"))?;
        Ok(())
    }

    fn lock_conn(&self) -> anyhow::Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("settings store lock poisoned"))
    }
}

impl SettingsStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.get_setting(key).map_err(|err| err.to_string())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.set_setting(key, value).map_err(|err| err.to_string())
    }
}

fn schema_version(conn: &Connection) -> anyhow::Result<u32> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .context("failed to read schema version")
}

fn migrate(conn: &Connection) -> anyhow::Result<()> {
    let mut version = schema_version(conn)?;
    if version >= LATEST_SCHEMA_VERSION {
        return Ok(());
    }

    for (target, sql) in MIGRATIONS {
        if *target <= version {
            continue;
        }
        conn.execute_batch(sql)
            .with_context(|| format!("migration {target} failed"))?;
        conn.pragma_update(None, "user_version", target)
            .with_context(|| format!("failed to record schema version {target}"))?;
        version = *target;
    }

    Ok(())
}

/// Resolves the data root: `FLOWDECK_ROOT` when set, otherwise
/// `~/.flowdeck`.
pub fn default_db_path() -> anyhow::Result<PathBuf> {
    if let Some(root) = std::env::var_os(flowdeck_domain::paths::FLOWDECK_ROOT_ENV) {
        return Ok(flowdeck_domain::paths::sqlite_path(Path::new(&root)));
    }
    let home = std::env::var_os("HOME").context("HOME is not set")?;
    Ok(flowdeck_domain::paths::sqlite_path(
        &Path::new(&home).join(".flowdeck"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_round_trips_and_overwrites() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SqliteStore::new(dir.path().join("flowdeck.db")).expect("store");

        assert_eq!(store.get_setting("board_columns").expect("get"), None);

        store.set_setting("board_columns", "[]").expect("set");
        assert_eq!(
            store.get_setting("board_columns").expect("get").as_deref(),
            Some("[]")
        );

        store
            .set_setting("board_columns", "[{\"id\":\"todo\"}]")
            .expect("overwrite");
        assert_eq!(
            store.get_setting("board_columns").expect("get").as_deref(),
            Some("[{\"id\":\"todo\"}]")
        );
    }

    #[test]
    fn values_survive_reopen_and_migrations_are_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db_path = dir.path().join("flowdeck.db");

        {
            let store = SqliteStore::new(db_path.clone()).expect("store");
            store.set_setting("board_columns", "persisted").expect("set");
        }

        let reopened = SqliteStore::new(db_path).expect("reopen");
        assert_eq!(
            reopened
                .get_setting("board_columns")
                .expect("get")
                .as_deref(),
            Some("persisted")
        );
    }

    #[test]
    fn trait_surface_maps_errors_to_strings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SqliteStore::new(dir.path().join("flowdeck.db")).expect("store");
        let store: &dyn SettingsStore = &store;

        store.set("k", "v").expect("set through trait");
        assert_eq!(store.get("k").expect("get through trait").as_deref(), Some("v"));
        assert_eq!(store.get("missing").expect("get missing"), None);
    }
}
