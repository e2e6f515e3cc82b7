use std::env;
use std::path::PathBuf;

use dirs_next::{data_dir, home_dir};

/// Environment variable overriding where the TUI writes its log file.
pub const LOG_PATH_ENV: &str = "EVOQUE_LOG_PATH";

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

/// Log file used while the terminal UI owns the screen.
pub fn default_log_path() -> PathBuf {
    if let Ok(path) = env::var(LOG_PATH_ENV)
        && !path.trim().is_empty()
    {
        return expand_tilde(&path);
    }
    data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("evoque")
        .join("evoque.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_are_only_trimmed() {
        assert_eq!(expand_tilde("  /tmp/nav.json "), PathBuf::from("/tmp/nav.json"));
        assert_eq!(expand_tilde("nav.yaml"), PathBuf::from("nav.yaml"));
    }

    #[test]
    fn tilde_expands_to_home() {
        if let Some(home) = home_dir() {
            assert_eq!(expand_tilde("~/nav.json"), home.join("nav.json"));
            assert_eq!(expand_tilde("~"), home);
        }
    }

    #[test]
    fn log_path_honours_env_override() {
        temp_env::with_var(LOG_PATH_ENV, Some("/tmp/evoque-test.log"), || {
            assert_eq!(default_log_path(), PathBuf::from("/tmp/evoque-test.log"));
        });
        temp_env::with_var_unset(LOG_PATH_ENV, || {
            assert!(default_log_path().ends_with("evoque/evoque.log"));
        });
    }
}
