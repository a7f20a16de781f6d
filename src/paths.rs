//! Fixed project-root-relative locations used by the tools.
//!
//! Layout under the project root:
//! ```text
//! site/
//! ├── .env                   (optional, development credentials)
//! ├── sdk/
//! │   ├── config.js          (generated browser artifact)
//! │   └── config.json        (generated sidecar, development fallback source)
//! ├── index.html
//! ├── blog/index.html
//! └── blog-post/index.html
//! ```

use std::path::{Path, PathBuf};

/// Resolved locations of every file the tools touch, rooted at one project
/// directory. Binaries root this at the current working directory; tests at
/// a temp directory.
#[derive(Debug, Clone)]
pub struct SitePaths {
    pub root: PathBuf,
    /// Optional dotenv-style credential file.
    pub env_file: PathBuf,
    /// Generated browser artifact (`window.SUPABASE_CONFIG`).
    pub artifact: PathBuf,
    /// Structured sidecar written next to the artifact on every successful
    /// build; the development fallback credential source.
    pub sidecar: PathBuf,
    /// HTML entry points whose script ordering the verifier checks.
    pub html_entry_points: Vec<PathBuf>,
}

impl SitePaths {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            env_file: root.join(".env"),
            artifact: root.join("sdk").join("config.js"),
            sidecar: root.join("sdk").join("config.json"),
            html_entry_points: vec![
                root.join("index.html"),
                root.join("blog").join("index.html"),
                root.join("blog-post").join("index.html"),
            ],
        }
    }

    /// Display name for a path relative to the project root (e.g.
    /// `blog/index.html`), used in human-readable reports.
    pub fn display_name(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}
