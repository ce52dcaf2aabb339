use std::env;
use std::path::PathBuf;

/// Port the API server listens on when nothing else is configured
pub const DEFAULT_PORT: u16 = 3001;

/// File name of the SQLite database inside the Ideaflow directory
pub const DATABASE_FILE_NAME: &str = "ideas.db";

/// Get the path to the Ideaflow directory (~/.ideaflow)
pub fn ideaflow_dir() -> PathBuf {
    // First try HOME environment variable (useful for tests)
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".ideaflow")
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ideaflow")
    }
}

/// Get the default database path (~/.ideaflow/ideas.db)
pub fn database_file() -> PathBuf {
    ideaflow_dir().join(DATABASE_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_ideaflow_dir_follows_home() {
        let original_home = env::var("HOME").ok();
        env::set_var("HOME", "/tmp/ideaflow-home");

        assert_eq!(ideaflow_dir(), PathBuf::from("/tmp/ideaflow-home/.ideaflow"));
        assert_eq!(
            database_file(),
            PathBuf::from("/tmp/ideaflow-home/.ideaflow/ideas.db")
        );

        match original_home {
            Some(home) => env::set_var("HOME", home),
            None => env::remove_var("HOME"),
        }
    }
}
