//! Generation of the browser config artifact and its structured sidecar.
//!
//! Two files are written together on every successful build:
//! - `sdk/config.js` — loaded by the pages, defines `window.SUPABASE_CONFIG`;
//! - `sdk/config.json` — same pair serialized as JSON; this is what the
//!   resolver reads back as its development fallback, through a real parser
//!   instead of pattern matching on generated source.
//!
//! Credential values are embedded into the JS as JSON string literals, so a
//! quote character in a value cannot break or inject into the artifact.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::AppError;
use crate::paths::SitePaths;
use crate::resolve::Credentials;

/// Render the browser artifact for the given credential pair.
pub fn render(credentials: &Credentials) -> String {
    let url = js_string(&credentials.url);
    let anon_key = js_string(&credentials.anon_key);
    format!(
        "// Supabase configuration for the browser pages.\n\
         //\n\
         // Generated by `build-config`. Do NOT edit by hand — the next build\n\
         // overwrites this file.\n\
         //\n\
         // To change the credentials:\n\
         //   - development: put them in a .env file at the project root\n\
         //   - production: set them in the deploy environment\n\
         window.SUPABASE_CONFIG = {{\n\
         \x20   url: {url},\n\
         \x20   anonKey: {anon_key}\n\
         }};\n"
    )
}

/// A JSON string literal is also a valid (escaped) JS string literal.
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Write artifact and sidecar, overwriting any previous content.
///
/// Returns the absolute path of the artifact. Write failures are fatal to
/// the caller (the resolver exits non-zero on them).
pub fn write(paths: &SitePaths, credentials: &Credentials) -> Result<PathBuf, AppError> {
    if let Some(dir) = paths.artifact.parent() {
        fs::create_dir_all(dir)
            .map_err(|e| AppError::Artifact(format!("cannot create {}: {e}", dir.display())))?;
    }

    fs::write(&paths.artifact, render(credentials)).map_err(|e| {
        AppError::Artifact(format!("cannot write {}: {e}", paths.artifact.display()))
    })?;

    let sidecar = serde_json::to_string_pretty(credentials)
        .map_err(|e| AppError::Artifact(format!("cannot serialize sidecar: {e}")))?;
    fs::write(&paths.sidecar, sidecar + "\n").map_err(|e| {
        AppError::Artifact(format!("cannot write {}: {e}", paths.sidecar.display()))
    })?;

    paths.artifact.canonicalize().map_err(|e| {
        AppError::Artifact(format!("cannot resolve {}: {e}", paths.artifact.display()))
    })
}

/// Read the sidecar of a previous build, if usable.
///
/// Returns `None` (with a warning where relevant) on a missing file, a parse
/// failure, or empty fields — the pair is only reused as a whole.
pub fn read_sidecar(path: &Path) -> Option<Credentials> {
    if !path.exists() {
        return None;
    }
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read sidecar");
            return None;
        }
    };
    match serde_json::from_str::<Credentials>(&raw) {
        Ok(creds) if !creds.url.is_empty() && !creds.anon_key.is_empty() => Some(creds),
        Ok(_) => {
            warn!(path = %path.display(), "sidecar has empty fields, ignoring");
            None
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "sidecar is not valid JSON, ignoring");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn creds() -> Credentials {
        Credentials {
            url: "https://x.supabase.co".into(),
            anon_key: "anon-key-123".into(),
        }
    }

    #[test]
    fn render_embeds_both_values() {
        let out = render(&creds());
        assert!(out.contains("window.SUPABASE_CONFIG"));
        assert!(out.contains(r#"url: "https://x.supabase.co""#));
        assert!(out.contains(r#"anonKey: "anon-key-123""#));
        assert!(out.contains("Do NOT edit"));
    }

    #[test]
    fn render_escapes_quotes_in_values() {
        let tricky = Credentials {
            url: "https://x.supabase.co".into(),
            anon_key: "ke'y\"with-quotes".into(),
        };
        let out = render(&tricky);
        // The double quote must be escaped; the artifact stays one statement.
        assert!(out.contains(r#"ke'y\"with-quotes"#));
        assert_eq!(out.matches("};").count(), 1);
    }

    #[test]
    fn write_then_read_sidecar_round_trips() {
        let dir = TempDir::new().unwrap();
        let paths = SitePaths::new(dir.path());
        let out = write(&paths, &creds()).unwrap();
        assert!(out.is_absolute());
        assert!(paths.artifact.exists());

        let loaded = read_sidecar(&paths.sidecar).unwrap();
        assert_eq!(loaded, creds());
    }

    #[test]
    fn write_overwrites_previous_content() {
        let dir = TempDir::new().unwrap();
        let paths = SitePaths::new(dir.path());
        write(&paths, &creds()).unwrap();

        let newer = Credentials {
            url: "https://new.supabase.co".into(),
            anon_key: "new-key".into(),
        };
        write(&paths, &newer).unwrap();
        let content = std::fs::read_to_string(&paths.artifact).unwrap();
        assert!(content.contains("new.supabase.co"));
        assert!(!content.contains("x.supabase.co"));
        assert_eq!(read_sidecar(&paths.sidecar).unwrap(), newer);
    }

    #[test]
    fn missing_sidecar_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_sidecar(&dir.path().join("config.json")).is_none());
    }

    #[test]
    fn malformed_sidecar_is_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json at all").unwrap();
        assert!(read_sidecar(&path).is_none());
    }

    #[test]
    fn quoted_credentials_survive_sidecar_round_trip() {
        let dir = TempDir::new().unwrap();
        let paths = SitePaths::new(dir.path());
        let tricky = Credentials {
            url: "https://x.supabase.co".into(),
            anon_key: "a\"b'c".into(),
        };
        write(&paths, &tricky).unwrap();
        assert_eq!(read_sidecar(&paths.sidecar).unwrap(), tricky);
    }
}
