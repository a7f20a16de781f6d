//! Credential Pair resolution for the `build-config` binary.
//!
//! Sources, in priority order:
//!   1. real environment variables (`VITE_`-prefixed name preferred, then
//!      the unprefixed name, independently per field),
//!   2. a `.env` file at the project root (merged without overriding),
//!   3. the structured sidecar left by a previous successful build
//!      (development only).
//!
//! `NODE_ENV=production` disables sources 2 and 3.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::artifact;
use crate::env::EnvSnapshot;
use crate::error::AppError;
use crate::paths::SitePaths;

/// Accepted variable names for the endpoint URL, in priority order.
pub const URL_VARS: [&str; 2] = ["VITE_SUPABASE_URL", "SUPABASE_URL"];
/// Accepted variable names for the anon access token, in priority order.
pub const ANON_KEY_VARS: [&str; 2] = ["VITE_SUPABASE_ANON_KEY", "SUPABASE_ANON_KEY"];

/// Resolved Supabase credential pair. Both fields are non-empty.
///
/// Serde names match the generated config object (`url` / `anonKey`), which
/// is also the sidecar's JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub url: String,
    #[serde(rename = "anonKey")]
    pub anon_key: String,
}

/// Resolve the credential pair from the snapshot, the `.env` file, and the
/// sidecar of a previous build.
///
/// Fails with [`AppError::Resolve`] naming every accepted variable name for
/// each still-missing field.
pub fn resolve(env: &EnvSnapshot, paths: &SitePaths) -> Result<Credentials, AppError> {
    let production = env.is_production();

    let mut merged = env.clone();
    if !production {
        merged.merge_env_file(&paths.env_file);
    }

    let mut url = lookup(&merged, &URL_VARS);
    let mut anon_key = lookup(&merged, &ANON_KEY_VARS);

    if url.is_some() && lookup(env, &URL_VARS).is_none() {
        info!("endpoint URL sourced from .env file");
    }
    if anon_key.is_some() && lookup(env, &ANON_KEY_VARS).is_none() {
        info!("anon key sourced from .env file");
    }

    // Development fallback: reuse the sidecar of a previous build, and only
    // as a whole pair — a partial sidecar is ignored.
    if (url.is_none() || anon_key.is_none()) && !production {
        if let Some(prior) = artifact::read_sidecar(&paths.sidecar) {
            info!(
                path = %paths.sidecar.display(),
                "using credentials from a previous build (development fallback)"
            );
            url = Some(prior.url);
            anon_key = Some(prior.anon_key);
        }
    }

    match (url, anon_key) {
        (Some(url), Some(anon_key)) => Ok(Credentials { url, anon_key }),
        (url, anon_key) => Err(AppError::Resolve(missing_message(
            url.is_none(),
            anon_key.is_none(),
        ))),
    }
}

/// First non-empty value among `names`. An empty string does not shadow a
/// lower-priority name.
fn lookup(env: &EnvSnapshot, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env.get(name))
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

fn missing_message(url_missing: bool, key_missing: bool) -> String {
    let mut msg = String::from("Supabase credentials not found. Define:\n");
    if url_missing {
        msg.push_str(&format!("  - {} or {}\n", URL_VARS[0], URL_VARS[1]));
    }
    if key_missing {
        msg.push_str(&format!("  - {} or {}\n", ANON_KEY_VARS[0], ANON_KEY_VARS[1]));
    }
    msg.push_str("or create a .env file at the project root with these variables");
    msg
}
