use crate::ColumnId;

/// A named lane on the board. Columns are append-only: `position` is
/// assigned at creation and never reshuffled.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub position: u32,
}

/// The registry every board starts with when nothing has been persisted.
pub fn default_columns() -> Vec<Column> {
    vec![
        Column {
            id: ColumnId::new("todo"),
            title: "To Do".to_owned(),
            position: 0,
        },
        Column {
            id: ColumnId::new("in-progress"),
            title: "In Progress".to_owned(),
            position: 1,
        },
        Column {
            id: ColumnId::new("done"),
            title: "Done".to_owned(),
            position: 2,
        },
    ]
}

/// Column ids are the lowercased title with whitespace runs collapsed
/// to a single hyphen.
pub fn column_slug(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut prev_gap = false;

    for ch in title.trim().chars() {
        if ch.is_whitespace() {
            if !prev_gap && !out.is_empty() {
                out.push('-');
                prev_gap = true;
            }
        } else {
            out.extend(ch.to_lowercase());
            prev_gap = false;
        }
    }

    out
}

/// Returns `None` for empty/whitespace-only titles and for titles whose
/// slug collides with an existing column. New columns always append:
/// `position = existing.len()`.
pub fn create_column(title: &str, existing: &[Column]) -> Option<Column> {
    let title = title.trim();
    if title.is_empty() {
        return None;
    }

    let id = ColumnId::new(column_slug(title));
    if existing.iter().any(|column| column.id == id) {
        return None;
    }

    Some(Column {
        id,
        title: title.to_owned(),
        position: existing.len() as u32,
    })
}
