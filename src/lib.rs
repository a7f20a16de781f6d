//! supablog — build-time configuration tooling and a read-only data client
//! for a Supabase-backed static blog.
//!
//! Three independent pieces share this crate:
//! - [`resolve`] + [`artifact`]: credential resolution and generation of the
//!   browser config artifact (`build-config` binary).
//! - [`verify`]: read-only setup diagnostics (`verify-setup` binary).
//! - [`blog`]: async client for blog posts over the Supabase REST interface.

pub mod artifact;
pub mod blog;
pub mod env;
pub mod error;
pub mod logger;
pub mod paths;
pub mod resolve;
pub mod verify;
