//! HTTP client and request plumbing for the fredtools FRED API client.
//!
//! This crate provides the request pipeline:
//!
//! - [`url::endpoint_url`] - Joins the base URL and endpoint paths
//! - [`Params`] - Ordered query parameters that skip absent values
//! - [`Transport`] - Seam between the client and the network
//! - [`HttpTransport`] - Blocking `reqwest` implementation
//! - [`FredClient`] - Injects API key and format, delegates to the transport
//! - [`context`] - Per-thread current client with scoped overrides

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/fredtools/fredtools/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod config;
pub mod context;
mod params;
mod transport;
pub mod url;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use client::FredClient;
pub use config::{API_KEY_ENV, BASE_URL_ENV, FredConfig};
pub use context::{
    ClientGuard, clear_default_client, current_client, set_default_client, use_client, with_client,
};
pub use params::Params;
pub use transport::{FnTransport, HttpTransport, Transport};
