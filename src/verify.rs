//! Read-only setup checks for the `verify-setup` binary.
//!
//! Every check returns data; printing is the binary's job. Nothing here is
//! fatal — findings are advisory and the verifier always exits normally.

use std::fs;

use tracing::warn;

use crate::paths::SitePaths;

/// Script reference the pages must load first.
pub const CONFIG_SCRIPT: &str = "config.js";
/// Script reference that constructs the Supabase client in the browser.
pub const CLIENT_SCRIPT: &str = "blog-supabase.js";
/// Marker of the generated configuration object.
pub const CONFIG_MARKER: &str = "SUPABASE_CONFIG";

const SUPABASE_DOMAIN: &str = "supabase.co";
const MIN_KEY_LEN: usize = 50;

/// Structural and best-effort sanity findings for the generated artifact.
#[derive(Debug, Default)]
pub struct ArtifactReport {
    pub exists: bool,
    pub has_marker: bool,
    pub has_keys: bool,
    /// Extracted endpoint URL, when the artifact yields one.
    pub url: Option<String>,
    /// Extracted anon key, when the artifact yields one.
    pub anon_key: Option<String>,
}

impl ArtifactReport {
    /// "Basic configuration" verdict for the summary block.
    pub fn basic_ok(&self) -> bool {
        self.exists && self.has_marker && self.has_keys
    }

    /// `None` when no URL was extracted; otherwise whether it contains the
    /// Supabase hosting domain. A miss is a warning, not a failure.
    pub fn url_looks_supabase(&self) -> Option<bool> {
        self.url.as_deref().map(|u| u.contains(SUPABASE_DOMAIN))
    }

    /// `None` when no key was extracted; otherwise whether its length clears
    /// the minimal threshold. A miss is a warning, not a failure.
    pub fn key_length_ok(&self) -> Option<bool> {
        self.anon_key.as_deref().map(|k| k.len() > MIN_KEY_LEN)
    }
}

/// Inspect the generated artifact.
pub fn check_artifact(paths: &SitePaths) -> ArtifactReport {
    let mut report = ArtifactReport::default();
    if !paths.artifact.exists() {
        return report;
    }
    report.exists = true;

    let content = match fs::read_to_string(&paths.artifact) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %paths.artifact.display(), error = %e, "could not read artifact");
            return report;
        }
    };

    report.has_marker = content.contains(CONFIG_MARKER);
    report.has_keys = content.contains("url:") && content.contains("anonKey:");
    report.url = extract_quoted(&content, "url:");
    report.anon_key = extract_quoted(&content, "anonKey:");
    report
}

/// Extract the quoted value following `key` (single or double quotes — the
/// generator emits double quotes, older hand-written configs used single).
fn extract_quoted(content: &str, key: &str) -> Option<String> {
    let at = content.find(key)?;
    let rest = content[at + key.len()..].trim_start();
    let quote = rest.chars().next()?;
    if quote != '\'' && quote != '"' {
        return None;
    }
    let rest = &rest[1..];
    let end = rest.find(quote)?;
    Some(rest[..end].to_string())
}

/// Outcome of the script-ordering check for one HTML entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlStatus {
    Ok,
    MissingConfigRef,
    MissingClientRef,
    ConfigAfterClient,
}

#[derive(Debug, Clone)]
pub struct HtmlCheck {
    /// Root-relative file name, e.g. `blog/index.html`.
    pub file: String,
    pub status: HtmlStatus,
}

impl HtmlCheck {
    /// Human-readable issue line, `None` when the file is fine.
    pub fn problem(&self) -> Option<String> {
        match self.status {
            HtmlStatus::Ok => None,
            HtmlStatus::MissingConfigRef => {
                Some(format!("{}: no reference to {CONFIG_SCRIPT}", self.file))
            }
            HtmlStatus::MissingClientRef => {
                Some(format!("{}: no reference to {CLIENT_SCRIPT}", self.file))
            }
            HtmlStatus::ConfigAfterClient => Some(format!(
                "{}: {CONFIG_SCRIPT} must be loaded BEFORE {CLIENT_SCRIPT}",
                self.file
            )),
        }
    }
}

/// Check script ordering in every entry point that exists.
///
/// The config script must appear strictly before the client script so that
/// `window.SUPABASE_CONFIG` is defined when the client constructs its handle.
/// Missing files are skipped, not flagged.
pub fn check_html(paths: &SitePaths) -> Vec<HtmlCheck> {
    let mut checks = Vec::new();
    for path in &paths.html_entry_points {
        if !path.exists() {
            continue;
        }
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read HTML file");
                continue;
            }
        };
        let status = match (content.find(CONFIG_SCRIPT), content.find(CLIENT_SCRIPT)) {
            (None, _) => HtmlStatus::MissingConfigRef,
            (_, None) => HtmlStatus::MissingClientRef,
            (Some(config_at), Some(client_at)) if config_at > client_at => {
                HtmlStatus::ConfigAfterClient
            }
            _ => HtmlStatus::Ok,
        };
        checks.push(HtmlCheck {
            file: paths.display_name(path),
            status,
        });
    }
    checks
}

/// Informational `.env` findings.
#[derive(Debug, Default)]
pub struct EnvFileReport {
    pub exists: bool,
    pub has_url_var: bool,
    pub has_key_var: bool,
}

impl EnvFileReport {
    pub fn complete(&self) -> bool {
        self.has_url_var && self.has_key_var
    }
}

/// Check `.env` presence and rough completeness. Informational only.
pub fn check_env_file(paths: &SitePaths) -> EnvFileReport {
    let mut report = EnvFileReport::default();
    if !paths.env_file.exists() {
        return report;
    }
    report.exists = true;
    match fs::read_to_string(&paths.env_file) {
        Ok(content) => {
            report.has_url_var = content.contains("VITE_SUPABASE_URL");
            report.has_key_var = content.contains("VITE_SUPABASE_ANON_KEY");
        }
        Err(e) => {
            warn!(path = %paths.env_file.display(), error = %e, "could not read .env file");
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact;
    use crate::resolve::Credentials;
    use std::fs;
    use tempfile::TempDir;

    fn site(dir: &TempDir) -> SitePaths {
        SitePaths::new(dir.path())
    }

    fn long_key() -> String {
        "k".repeat(60)
    }

    #[test]
    fn missing_artifact_reported() {
        let dir = TempDir::new().unwrap();
        let report = check_artifact(&site(&dir));
        assert!(!report.exists);
        assert!(!report.basic_ok());
    }

    #[test]
    fn generated_artifact_passes_all_checks() {
        let dir = TempDir::new().unwrap();
        let paths = site(&dir);
        let creds = Credentials {
            url: "https://x.supabase.co".into(),
            anon_key: long_key(),
        };
        artifact::write(&paths, &creds).unwrap();

        let report = check_artifact(&paths);
        assert!(report.basic_ok());
        assert_eq!(report.url.as_deref(), Some("https://x.supabase.co"));
        assert_eq!(report.url_looks_supabase(), Some(true));
        assert_eq!(report.key_length_ok(), Some(true));
    }

    #[test]
    fn single_quoted_legacy_artifact_is_extracted() {
        let dir = TempDir::new().unwrap();
        let paths = site(&dir);
        fs::create_dir_all(paths.artifact.parent().unwrap()).unwrap();
        fs::write(
            &paths.artifact,
            "window.SUPABASE_CONFIG = {\n    url: 'https://x.supabase.co',\n    anonKey: 'short'\n};\n",
        )
        .unwrap();

        let report = check_artifact(&paths);
        assert!(report.basic_ok());
        assert_eq!(report.url.as_deref(), Some("https://x.supabase.co"));
        assert_eq!(report.key_length_ok(), Some(false));
    }

    #[test]
    fn non_supabase_url_and_short_key_warn() {
        let dir = TempDir::new().unwrap();
        let paths = site(&dir);
        let creds = Credentials {
            url: "https://example.com".into(),
            anon_key: "tiny".into(),
        };
        artifact::write(&paths, &creds).unwrap();

        let report = check_artifact(&paths);
        assert!(report.basic_ok());
        assert_eq!(report.url_looks_supabase(), Some(false));
        assert_eq!(report.key_length_ok(), Some(false));
    }

    #[test]
    fn html_correct_order_is_ok() {
        let dir = TempDir::new().unwrap();
        let paths = site(&dir);
        fs::write(
            &paths.html_entry_points[0],
            r#"<script src="sdk/config.js"></script><script src="sdk/blog-supabase.js"></script>"#,
        )
        .unwrap();

        let checks = check_html(&paths);
        assert_eq!(checks.len(), 1);
        assert_eq!(checks[0].status, HtmlStatus::Ok);
        assert!(checks[0].problem().is_none());
    }

    #[test]
    fn html_wrong_order_is_flagged_with_file_name() {
        let dir = TempDir::new().unwrap();
        let paths = site(&dir);
        fs::create_dir_all(dir.path().join("blog")).unwrap();
        fs::write(
            &paths.html_entry_points[1],
            r#"<script src="sdk/blog-supabase.js"></script><script src="sdk/config.js"></script>"#,
        )
        .unwrap();

        let checks = check_html(&paths);
        assert_eq!(checks.len(), 1);
        assert_eq!(checks[0].status, HtmlStatus::ConfigAfterClient);
        let problem = checks[0].problem().unwrap();
        assert!(problem.contains("blog/index.html"));
        assert!(problem.contains("BEFORE"));
    }

    #[test]
    fn html_missing_references_are_flagged() {
        let dir = TempDir::new().unwrap();
        let paths = site(&dir);
        fs::write(
            &paths.html_entry_points[0],
            r#"<script src="sdk/blog-supabase.js"></script>"#,
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("blog")).unwrap();
        fs::write(
            &paths.html_entry_points[1],
            r#"<script src="sdk/config.js"></script>"#,
        )
        .unwrap();

        let checks = check_html(&paths);
        assert_eq!(checks[0].status, HtmlStatus::MissingConfigRef);
        assert_eq!(checks[1].status, HtmlStatus::MissingClientRef);
    }

    #[test]
    fn html_missing_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        assert!(check_html(&site(&dir)).is_empty());
    }

    #[test]
    fn env_file_report() {
        let dir = TempDir::new().unwrap();
        let paths = site(&dir);

        let report = check_env_file(&paths);
        assert!(!report.exists);

        fs::write(&paths.env_file, "VITE_SUPABASE_URL=x\n").unwrap();
        let report = check_env_file(&paths);
        assert!(report.exists);
        assert!(report.has_url_var);
        assert!(!report.has_key_var);
        assert!(!report.complete());

        fs::write(
            &paths.env_file,
            "VITE_SUPABASE_URL=x\nVITE_SUPABASE_ANON_KEY=y\n",
        )
        .unwrap();
        assert!(check_env_file(&paths).complete());
    }
}
