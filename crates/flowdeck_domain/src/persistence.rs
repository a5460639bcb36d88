use crate::{Column, columns::default_columns};

/// The one settings key the column registry lives under.
pub const COLUMNS_SETTING_KEY: &str = "board_columns";

/// Saves are whole-collection overwrites; there is no incremental diff.
pub fn encode_columns(columns: &[Column]) -> String {
    serde_json::to_string(columns).unwrap_or_else(|_| "[]".to_owned())
}

/// A missing or unparsable value falls back to the default registry.
pub fn decode_columns(raw: Option<&str>) -> Vec<Column> {
    let Some(raw) = raw else {
        return default_columns();
    };
    match serde_json::from_str::<Vec<Column>>(raw) {
        Ok(columns) => columns,
        Err(_) => default_columns(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColumnId;

    #[test]
    fn encode_decode_round_trips() {
        let columns = vec![
            Column {
                id: ColumnId::new("todo"),
                title: "To Do".to_owned(),
                position: 0,
            },
            Column {
                id: ColumnId::new("review"),
                title: "Review".to_owned(),
                position: 1,
            },
        ];

        let decoded = decode_columns(Some(&encode_columns(&columns)));
        assert_eq!(decoded, columns);
    }

    #[test]
    fn decode_falls_back_to_defaults_when_absent() {
        let columns = decode_columns(None);
        let ids: Vec<&str> = columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["todo", "in-progress", "done"]);
        assert_eq!(
            columns.iter().map(|c| c.position).collect::<Vec<_>>(),
            [0, 1, 2]
        );
    }

    #[test]
    fn decode_falls_back_to_defaults_on_corrupt_input() {
        for raw in ["", "not json", "{\"id\":", "42"] {
            let ids: Vec<String> = decode_columns(Some(raw))
                .iter()
                .map(|c| c.id.as_str().to_owned())
                .collect();
            assert_eq!(ids, ["todo", "in-progress", "done"], "input: {raw:?}");
        }
    }
}
