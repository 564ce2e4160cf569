//! # Advisor Service
//!
//! Everything that talks to (or stands in for) the remote query endpoint.
//!
//! - [`client`]: the `AdvisorClient` trait seam and `AdvisorError`
//! - [`http`]: the reqwest-backed client for `POST {"query": ...}`
//! - [`types`]: wire types for the request and response bodies
//! - [`fallback`]: canned "Demo Mode" answers used when a request fails

pub mod client;
pub mod fallback;
pub mod http;
pub mod types;

pub use client::{AdvisorClient, AdvisorError};
pub use http::HttpAdvisorClient;
pub use types::{QueryRequest, QueryResponse};
