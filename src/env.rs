//! Environment snapshot with dotenv-file merging.
//!
//! The resolver never mutates the process environment: it works on an owned
//! [`EnvSnapshot`] captured once at startup (or built directly by tests), and
//! `.env` entries are merged into that snapshot with real environment
//! variables always taking precedence.

use std::collections::HashMap;
use std::env;
use std::path::Path;

use tracing::warn;

/// Owned key/value view of an environment.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    pub fn from_process() -> Self {
        Self { vars: env::vars().collect() }
    }

    /// Build a snapshot from explicit pairs. Tests use this instead of
    /// mutating process env vars.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// `NODE_ENV=production` disables `.env` loading and the sidecar
    /// fallback in the resolver.
    pub fn is_production(&self) -> bool {
        self.get("NODE_ENV") == Some("production")
    }

    /// Merge entries from a dotenv-style file (`KEY=VALUE` lines, `#`
    /// comments, optional surrounding quotes stripped).
    ///
    /// Keys already present in the snapshot are left untouched. A missing
    /// file is silently ignored; an unreadable or malformed one is logged as
    /// a warning — never fatal.
    pub fn merge_env_file(&mut self, path: &Path) {
        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(e) => {
                if path.exists() {
                    warn!(path = %path.display(), error = %e, "could not read env file");
                }
                return;
            }
        };

        for item in iter {
            match item {
                Ok((key, value)) => {
                    self.vars.entry(key).or_insert(value);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping malformed env file line");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_env(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(".env");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn parses_pairs_and_skips_comments_and_blanks() {
        let dir = TempDir::new().unwrap();
        let path = write_env(&dir, "# comment\n\nFOO=bar\n");
        let mut env = EnvSnapshot::default();
        env.merge_env_file(&path);
        assert_eq!(env.get("FOO"), Some("bar"));
        assert_eq!(env.get("# comment"), None);
    }

    #[test]
    fn strips_surrounding_quotes() {
        let dir = TempDir::new().unwrap();
        let path = write_env(&dir, "FOO=\"bar\"\nBAZ='qux'\n");
        let mut env = EnvSnapshot::default();
        env.merge_env_file(&path);
        assert_eq!(env.get("FOO"), Some("bar"));
        assert_eq!(env.get("BAZ"), Some("qux"));
    }

    #[test]
    fn real_env_wins_over_file() {
        let dir = TempDir::new().unwrap();
        let path = write_env(&dir, "FOO=from-file\nNEW=added\n");
        let mut env = EnvSnapshot::from_pairs([("FOO", "from-env")]);
        env.merge_env_file(&path);
        assert_eq!(env.get("FOO"), Some("from-env"));
        assert_eq!(env.get("NEW"), Some("added"));
    }

    #[test]
    fn missing_file_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let mut env = EnvSnapshot::from_pairs([("FOO", "bar")]);
        env.merge_env_file(&dir.path().join("does-not-exist"));
        assert_eq!(env.get("FOO"), Some("bar"));
    }

    #[test]
    fn production_flag_detected() {
        let env = EnvSnapshot::from_pairs([("NODE_ENV", "production")]);
        assert!(env.is_production());
        let env = EnvSnapshot::from_pairs([("NODE_ENV", "development")]);
        assert!(!env.is_production());
        assert!(!EnvSnapshot::default().is_production());
    }
}
