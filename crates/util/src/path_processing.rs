use dirs_next::{data_local_dir, home_dir};
use std::path::PathBuf;

/// Expands a leading `~` to the current user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    if let Some(rest) = p.strip_prefix("~\\") {
        // Windows-style
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// Directory for console-owned files such as the log file.
pub fn data_dir() -> PathBuf {
    data_local_dir().unwrap_or_else(|| PathBuf::from(".")).join("driverconnect")
}

#[cfg(test)]
mod tests {
    use super::expand_tilde;
    use std::path::PathBuf;

    #[test]
    fn leaves_plain_paths_untouched() {
        assert_eq!(expand_tilde(" seed.json "), PathBuf::from("seed.json"));
        assert_eq!(expand_tilde("/tmp/seed.json"), PathBuf::from("/tmp/seed.json"));
    }
}
