mod actions;
pub use actions::Action;

mod adapters;
pub use adapters::{
    BoardService, Notice, NoticeSeverity, RemoteError, SettingsStore, TaskDraft,
};

mod columns;
pub use columns::{Column, column_slug, create_column, default_columns};

mod effects;
pub use effects::Effect;

pub mod paths;

mod persistence;
pub use persistence::{COLUMNS_SETTING_KEY, decode_columns, encode_columns};

mod records;
pub use records::{LaneRepair, TaskRecord, ensure_task_fields, lane_repair};

mod reducer;
mod state;
pub use state::*;
