//! One fetch-parse-save cycle.
//!
//! ```text
//! FETCHING ──> FETCH_FAILED
//!     └──────> SAVED_RAW ──> PARSED_AND_SAVED
//!                  └───────> PARSE_FAILED
//! ```
//!
//! Progress and results go to the console writer handed to [`run`].
//! Diagnostics from the fetcher and persister go through `tracing`.
//! Every branch ends normally; only a failing console write is an error.

use std::io::{self, Write};
use std::path::PathBuf;

use tracing::{info, warn};

use crate::http::PageClient;
use crate::persist;

mod json;

pub use json::format_json;

pub const RAW_OUTPUT_FILE: &str = "raw_content.txt";
pub const FORMATTED_OUTPUT_FILE: &str = "formatted_content.json";

/// Where the two result files are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub raw: PathBuf,
    pub formatted: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            raw: PathBuf::from(RAW_OUTPUT_FILE),
            formatted: PathBuf::from(FORMATTED_OUTPUT_FILE),
        }
    }
}

/// Terminal state of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    FetchFailed,
    /// The raw body was handed to the persister but is not JSON.
    ParseFailed,
    ParsedAndSaved { formatted: String },
}

/// Fetch `url`, store the raw body, and store a formatted copy if it is JSON.
///
/// The result of the raw save does not gate the parse step, so a run whose
/// raw write failed still reports the parse outcome.
///
/// # Errors
/// Returns an error only if writing to `console` fails
pub async fn run<W: Write>(
    client: &PageClient,
    url: &str,
    paths: &OutputPaths,
    console: &mut W,
) -> io::Result<Outcome> {
    writeln!(console, "Fetching content...")?;

    let content = match client.fetch_page(url).await {
        Some(content) if !content.is_empty() => content,
        Some(_) => {
            warn!("Empty response body from {}", url);
            writeln!(console, "Failed to fetch content")?;
            return Ok(Outcome::FetchFailed);
        }
        None => {
            writeln!(console, "Failed to fetch content")?;
            return Ok(Outcome::FetchFailed);
        }
    };

    if persist::save(&content, &paths.raw).await {
        info!("Saved raw content to {}", paths.raw.display());
    }

    let formatted = match format_json(&content) {
        Ok(formatted) => formatted,
        Err(e) => {
            info!("Response is not JSON: {}", e);
            writeln!(console, "Could not parse JSON content")?;
            return Ok(Outcome::ParseFailed);
        }
    };

    if persist::save(&formatted, &paths.formatted).await {
        info!("Saved formatted content to {}", paths.formatted.display());
    }

    writeln!(console, "Content successfully downloaded and saved!")?;
    writeln!(console, "\nSample of retrieved content:")?;
    writeln!(console, "{formatted}")?;

    Ok(Outcome::ParsedAndSaved { formatted })
}
