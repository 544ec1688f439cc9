use std::sync::Arc;
use std::time::Duration;

use ipsieve_common::{info, success, warn};
use ipsieve_core::driver::RefreshDriver;

use crate::commands::Context;

pub async fn daemon(ctx: &Context, interval: Option<u64>) -> anyhow::Result<()> {
    ctx.require_admin().await?;

    let pipeline = Arc::new(ctx.pipeline(None)?);
    let every = interval.map_or_else(|| ctx.config.refresh_interval(), Duration::from_secs);
    info!(
        "refreshing every {}s{}, ctrl-c to stop",
        every.as_secs(),
        if ctx.config.strict { " (strict)" } else { "" }
    );

    let driver = RefreshDriver::new(pipeline, every);
    let ticks = driver
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("cannot listen for ctrl-c: {e}");
                std::future::pending::<()>().await;
            }
        })
        .await;

    success!("stopped after {ticks} refreshes");
    Ok(())
}
