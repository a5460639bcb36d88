mod sqlite_store;

pub use sqlite_store::{SqliteStore, default_db_path};
