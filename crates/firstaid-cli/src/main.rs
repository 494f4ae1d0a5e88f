//! Interactive terminal entry point.

use anyhow::Result;
use firstaid_config::ProxyConfig;
use firstaid_llm::InferenceProxy;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the conversation.
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .compact()
        .init();

    let proxy = InferenceProxy::new(ProxyConfig::from_env()?)?;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    firstaid_cli::run(stdin, &mut stdout, &proxy).await?;

    Ok(())
}
