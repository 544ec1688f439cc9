use anyhow::Context as _;
use colored::*;
use ipsieve_common::models::pool::{PoolSnapshot, SourceResult};
use ipsieve_common::models::ranked::RankedSet;
use ipsieve_common::warn;
use ipsieve_protocols::export;
use serde::Serialize;

use crate::commands::{Context, ViewArgs};
use crate::terminal::{colors, format, print};

#[derive(Debug, Clone, Copy)]
pub enum View {
    Pool,
    Fast,
    Client,
}

impl View {
    fn name(self) -> &'static str {
        match self {
            View::Pool => "pool",
            View::Fast => "backend ranked set",
            View::Client => "client ranked set",
        }
    }
}

pub async fn view(ctx: &Context, which: View, args: &ViewArgs) -> anyhow::Result<()> {
    ctx.require_admin().await?;
    let pipeline = ctx.pipeline(None)?;

    match which {
        View::Pool => match pipeline.pool_snapshot().await? {
            Some(pool) if args.json => print_json(&pool),
            Some(pool) if args.text => {
                println!("{}", export::pool_lines(&pool));
                Ok(())
            }
            Some(pool) => {
                print_pool(&pool);
                Ok(())
            }
            None => nothing(which, args),
        },
        View::Fast | View::Client => {
            let set = match which {
                View::Client => pipeline.client_ranked_set().await?,
                _ => pipeline.backend_ranked_set().await?,
            };
            match set {
                Some(set) if args.json => print_json(&set),
                Some(set) if args.text => {
                    println!("{}", export::ranked_lines(&set));
                    Ok(())
                }
                Some(set) => {
                    print_ranked(which.name(), &set);
                    Ok(())
                }
                None => nothing(which, args),
            }
        }
    }
}

fn nothing(which: View, args: &ViewArgs) -> anyhow::Result<()> {
    if args.json || args.text {
        warn!("no {} stored yet", which.name());
    } else {
        print::nothing_stored(which.name());
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize")?;
    println!("{json}");
    Ok(())
}

pub fn print_pool(pool: &PoolSnapshot) {
    print::header("pool");
    print::set_key_width(["Addresses", "Updated", "Sources"]);
    print::aligned_line("Addresses", pool.count.to_string().color(colors::ACCENT).bold());
    print::aligned_line("Updated", pool.last_updated.to_rfc3339());
    print::aligned_line("Sources", pool.sources.len().to_string());
    print_sources(&pool.sources);
}

pub fn print_sources(sources: &[SourceResult]) {
    print::header("sources");
    for (idx, result) in sources.iter().enumerate() {
        print::tree_head(idx, &result.name);
        print::as_tree_one_level(format::source_details(result));
    }
}

pub fn print_ranked(title: &str, set: &RankedSet) {
    print::header(title);
    print::set_key_width(["Entries", "Tested", "Source"]);
    print::aligned_line("Entries", set.count.to_string().color(colors::ACCENT).bold());
    print::aligned_line("Tested", set.last_tested.to_rfc3339());
    print::aligned_line("Source", format!("{:?}", set.provenance));

    for (idx, entry) in set.entries.iter().enumerate() {
        print::tree_head(idx, &format::addr(entry.addr).to_string());
        print::as_tree_one_level(format::ranked_entry_details(entry));
    }
}
