// FlexItOut form feedback - stdin/stdout front end
// One JSON request per input line, one JSON reply per output line.

use anyhow::Context;
use flexitout_core::config::Config;
use flexitout_core::service::FeedbackServiceHandle;
use flexitout_core::telemetry;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    telemetry::init(&config).context("Failed to initialize logging")?;

    info!(
        log_format = ?config.log_format,
        request_timeout_ms = config.request_timeout_ms,
        max_keypoints = config.max_keypoints,
        "Starting FlexItOut form feedback"
    );

    let handle = FeedbackServiceHandle::new(&config);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut served: u64 = 0;

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if let Some(reply) = handle.respond_to_line(&line).await {
            stdout.write_all(reply.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
            served += 1;
        }
    }

    handle.shutdown().await.ok();
    info!(served, "Input closed, exiting");
    Ok(())
}
