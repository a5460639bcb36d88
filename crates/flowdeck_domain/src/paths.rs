use std::path::{Path, PathBuf};

pub const FLOWDECK_ROOT_ENV: &str = "FLOWDECK_ROOT";

pub fn sqlite_path(flowdeck_root: &Path) -> PathBuf {
    flowdeck_root.join("flowdeck.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_path_joins_under_root() {
        let base = PathBuf::from("flowdeck-root");
        assert_eq!(sqlite_path(&base), base.join("flowdeck.db"));
        assert_eq!(FLOWDECK_ROOT_ENV, "FLOWDECK_ROOT");
    }
}
