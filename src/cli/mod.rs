use anyhow::Result;
use clap::Parser;
use core::time::Duration;
use std::path::PathBuf;

use crate::driver::{FORMATTED_OUTPUT_FILE, OutputPaths, RAW_OUTPUT_FILE};
use crate::http::{DEFAULT_USER_AGENT, FetchConfig};

pub const DEFAULT_TARGET_URL: &str =
    "https://www.examtopics.com/discussions/microsoft/view/151778-exam-az-900-topic-1-question-474-discussion";

#[derive(Debug, Parser)]
#[command(name = "page-fetcher")]
#[command(
    version,
    about = "Fetch one web page and save the raw and pretty-printed JSON results"
)]
pub struct Cli {
    /// Page to fetch
    #[arg(value_name = "URL", default_value = DEFAULT_TARGET_URL)]
    pub url: String,

    /// File that receives the response body as-is
    #[arg(long, value_name = "PATH", default_value = RAW_OUTPUT_FILE)]
    pub raw_output: PathBuf,

    /// File that receives the pretty-printed JSON
    #[arg(long, value_name = "PATH", default_value = FORMATTED_OUTPUT_FILE)]
    pub formatted_output: PathBuf,

    /// User-Agent header sent with the request
    #[arg(long, value_name = "UA", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Give up on the request after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl Cli {
    /// # Errors
    /// Returns an error if the user agent is not a valid header value
    pub fn fetch_config(&self) -> Result<FetchConfig> {
        let config = FetchConfig::default().user_agent(&self.user_agent)?;
        Ok(match self.timeout {
            Some(secs) => config.timeout(Duration::from_secs(secs)),
            None => config,
        })
    }

    pub fn output_paths(&self) -> OutputPaths {
        OutputPaths {
            raw: self.raw_output.clone(),
            formatted: self.formatted_output.clone(),
        }
    }
}
