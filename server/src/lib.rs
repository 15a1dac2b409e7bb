//! Job Search Proxy
//!
//! Forwards keyword/location searches to the USAJOBS search API and renders
//! the matches as a server-side HTML page.

pub mod classify;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod routes;
pub mod upstream;

pub use classify::{ResultOutcome, classify};
pub use config::Config;
pub use render::{RenderedPage, render};
pub use routes::{AppState, router};
pub use upstream::{UpstreamClient, UpstreamOutcome};
