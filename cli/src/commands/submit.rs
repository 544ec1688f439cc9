use std::path::Path;

use anyhow::Context as _;
use ipsieve_common::success;
use serde_json::Value;
use tokio::io::AsyncReadExt;

use crate::commands::Context;

pub async fn submit(ctx: &Context, file: &Path) -> anyhow::Result<()> {
    let raw = if file == Path::new("-") {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("failed to read stdin")?;
        buf
    } else {
        tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("failed to read {}", file.display()))?
    };

    let payload: Value = serde_json::from_str(&raw).context("submission is not valid JSON")?;
    let pipeline = ctx.pipeline(None)?;
    let stored = pipeline
        .submit_client_ranked_set(ctx.credential.as_ref(), &unwrap_envelope(payload))
        .await?;

    success!("stored {} client entries", stored.count);
    Ok(())
}

/// Accepts a whole exported ranked set as well as a bare list.
fn unwrap_envelope(payload: Value) -> Value {
    match payload {
        Value::Object(mut map) => match map.remove("fastIPs") {
            Some(list) => list,
            None => Value::Object(map),
        },
        other => other,
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
