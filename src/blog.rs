//! Read-only blog post client over the Supabase REST (PostgREST) interface.
//!
//! Built once from an explicit [`Credentials`] value — no globals, no
//! embedded literals. Records are passed through as opaque JSON values; no
//! local schema is imposed. Both read operations convert any failure
//! (transport, HTTP, parse) into a logged safe fallback: callers only ever
//! see data, an empty vec, or `None`.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::error::AppError;
use crate::resolve::Credentials;

const POSTS_TABLE: &str = "blog_posts";
/// All post columns plus the category display name, exposed under the
/// `categoria` alias via the `blog_categorias` foreign key.
const SELECT_WITH_CATEGORY: &str = "*,categoria:blog_categorias(nome)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the `blog_posts` collection.
///
/// Cheap to clone — `reqwest::Client` is an `Arc` internally. Concurrent
/// page loads each construct their own handle; no shared state exists.
#[derive(Debug, Clone)]
pub struct BlogClient {
    http: Client,
    rest_url: String,
    anon_key: String,
}

impl BlogClient {
    /// Build a client from resolved credentials.
    ///
    /// The anon key is sent as both `apikey` and `Authorization: Bearer` on
    /// every request, per the Supabase REST convention.
    pub fn new(credentials: &Credentials) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Client(format!("failed to build HTTP client: {e}")))?;
        let rest_url = format!("{}/rest/v1", credentials.url.trim_end_matches('/'));
        Ok(Self {
            http,
            rest_url,
            anon_key: credentials.anon_key.clone(),
        })
    }

    /// Fetch all posts with their category name.
    ///
    /// Order is whatever the store returns — no filtering, sorting, or
    /// pagination. Any error yields an empty vec, never a panic or a
    /// propagated error.
    pub async fn list_posts(&self) -> Vec<Value> {
        match self.fetch(&[], false).await {
            Ok(Value::Array(posts)) => {
                debug!(posts = posts.len(), "fetched blog posts");
                posts
            }
            Ok(other) => {
                error!(got = %value_kind(&other), "unexpected response shape for post list");
                Vec::new()
            }
            Err(e) => {
                error!(error = %e, "failed to fetch blog posts");
                Vec::new()
            }
        }
    }

    /// Fetch the single post matching `slug`, with its category name.
    ///
    /// Single-object semantics are requested from the store, so zero matches
    /// come back as an error and map to `None` — as does any other failure.
    pub async fn post_by_slug(&self, slug: &str) -> Option<Value> {
        let filter = format!("eq.{slug}");
        match self.fetch(&[("slug", filter.as_str())], true).await {
            Ok(post @ Value::Object(_)) => Some(post),
            Ok(other) => {
                error!(slug, got = %value_kind(&other), "unexpected response shape for post");
                None
            }
            Err(e) => {
                error!(slug, error = %e, "failed to fetch post by slug");
                None
            }
        }
    }

    /// One GET against the posts collection. `single` asserts at-most-one
    /// row via the PostgREST object representation.
    async fn fetch(&self, query: &[(&str, &str)], single: bool) -> Result<Value, AppError> {
        let url = format!("{}/{POSTS_TABLE}", self.rest_url);
        let mut req = self
            .http
            .get(&url)
            .query(&[("select", SELECT_WITH_CATEGORY)])
            .query(query)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key);
        if single {
            req = req.header(reqwest::header::ACCEPT, "application/vnd.pgrst.object+json");
        }

        debug!(%url, single, "sending REST request");
        let response = req
            .send()
            .await
            .map_err(|e| AppError::Client(format!("request failed: {e}")))?;
        let response = check_status(response).await?;

        response
            .json::<Value>()
            .await
            .map_err(|e| AppError::Client(format!("failed to parse response body: {e}")))
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// Error envelope returned by PostgREST.
#[derive(Debug, Deserialize)]
struct RestError {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

/// Consume the response and return it if successful, or a structured error.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());

    let message = match serde_json::from_str::<RestError>(&body) {
        Ok(err) => {
            let code = err.code.map(|c| format!(" [code={c}]")).unwrap_or_default();
            format!("HTTP {status}{code}: {}", err.message)
        }
        Err(_) => format!("HTTP {status}: {body}"),
    };

    Err(AppError::Client(message))
}
