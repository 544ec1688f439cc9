use std::time::{Duration, Instant};

use colored::*;
use ipsieve_common::{success, warn};
use ipsieve_core::pipeline::RefreshSummary;
use tracing::{Instrument, info_span};

use crate::commands::Context;
use crate::commands::view;
use crate::mprint;
use crate::terminal::{colors, print, spinner};

pub async fn refresh(ctx: &Context) -> anyhow::Result<()> {
    ctx.require_admin().await?;

    let span = info_span!("refresh", indicatif.pb_show = true);
    spinner::spin(&span, "aggregating sources...");
    let pipeline = ctx.pipeline(Some(spinner::batch_progress(span.clone())))?;

    let start = Instant::now();
    let summary = pipeline.trigger_aggregation_and_probe().instrument(span.clone()).await?;
    drop(span);

    view::print_sources(&summary.sources);
    refresh_ends(&summary, start.elapsed(), ctx.quiet);

    if summary.ranked.is_some() && !ctx.quiet {
        mprint!();
        if let Some(set) = pipeline.backend_ranked_set().await? {
            view::print_ranked("fastest addresses", &set);
        }
    }
    Ok(())
}

pub async fn update(ctx: &Context) -> anyhow::Result<()> {
    ctx.require_admin().await?;

    let span = info_span!("update", indicatif.pb_show = true);
    spinner::spin(&span, "aggregating sources...");
    let pipeline = ctx.pipeline(None)?;
    let pool = pipeline.refresh_pool().instrument(span.clone()).await?;
    drop(span);

    view::print_pool(&pool);
    if pool.is_empty() {
        warn!("every source came back empty");
    } else {
        success!("pool replaced with {} addresses", pool.count);
    }
    Ok(())
}

fn refresh_ends(summary: &RefreshSummary, total_time: Duration, quiet: bool) {
    if summary.skipped {
        warn!("no source succeeded, probing skipped");
        return;
    }

    let ranked = match summary.ranked {
        Some(n) => format!("{n} ranked").bold().green(),
        None => "nothing ranked".bold().red(),
    };
    let pool: ColoredString = format!("{} pooled", summary.pool_size).bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output = format!(
        "Refresh Complete: {pool}, {} probed, {ranked} in {total_time}",
        summary.probed
    )
    .color(colors::TEXT_DEFAULT);

    if quiet {
        success!("{}", output);
    } else {
        print::fat_separator();
        print::centerln(&output.to_string());
    }
}
