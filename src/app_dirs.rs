use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "pomo";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// `$HOME/.local/state/pomo`, or the platform data-local dir without a HOME
    pub fn state_dir() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home).join(".local").join("state").join(APP_NAME)
        } else {
            ProjectDirs::from("", "", APP_NAME)
                .map(|proj_dirs| proj_dirs.data_local_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("."))
        }
    }

    pub fn store_path() -> PathBuf {
        Self::state_dir().join("state.db")
    }

    pub fn log_path() -> PathBuf {
        Self::state_dir().join("pomo.log")
    }

    pub fn config_path() -> PathBuf {
        if let Some(pd) = ProjectDirs::from("", "", APP_NAME) {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("pomo_config.json")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_in_state_dir() {
        let state = AppDirs::state_dir();
        assert_eq!(AppDirs::store_path().parent(), Some(state.as_path()));
        assert_eq!(AppDirs::log_path().parent(), Some(state.as_path()));
    }

    #[test]
    fn test_config_file_name() {
        assert!(AppDirs::config_path()
            .to_string_lossy()
            .ends_with("config.json"));
    }
}
