//! Single-page web fetcher.
//!
//! Requests one URL with a browser-like `User-Agent`, saves the raw body, and
//! when the body is JSON saves a pretty-printed copy next to it.

pub mod cli;
pub mod driver;
pub mod http;
pub mod persist;
