use std::net::Ipv4Addr;

use ipsieve_common::{success, warn};
use tracing::{Instrument, info_span};

use crate::commands::Context;
use crate::terminal::{format, print, spinner};

pub async fn probe(ctx: &Context, addr: Ipv4Addr) -> anyhow::Result<()> {
    let pipeline = ctx.pipeline(None)?;

    let span = info_span!("probe", indicatif.pb_show = true);
    spinner::spin(&span, &format!("probing {addr} via {}...", ctx.config.probe_host));
    let outcome = pipeline.probe_one_address(addr).instrument(span.clone()).await;
    drop(span);

    print::header("probe");
    print::tree_head(0, &format::addr(addr).to_string());
    print::as_tree_one_level(format::outcome_details(&outcome));

    match outcome.latency_ms() {
        Some(ms) => success!("{addr} answered in {ms}ms"),
        None => warn!("{addr} is not usable"),
    }
    Ok(())
}
