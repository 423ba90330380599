use anyhow::Result;
use clap::Parser as _;
use page_fetcher::cli::Cli;
use page_fetcher::driver;
use page_fetcher::http::PageClient;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();
    info!("Page fetcher starting");

    let client = PageClient::new(cli.fetch_config()?)?;
    let mut stdout = std::io::stdout();
    let outcome = driver::run(&client, &cli.url, &cli.output_paths(), &mut stdout).await?;

    debug!("Run finished: {:?}", outcome);
    Ok(())
}
