use anyhow::Context as _;
use colored::*;
use ipsieve_common::{info, success};
use ipsieve_core::access::{TokenConfig, TokenExpiry};

use crate::commands::{Context, TokenCommand};
use crate::terminal::{colors, print};

pub async fn login(ctx: &Context, password: Option<&str>) -> anyhow::Result<()> {
    let password = password.context("pass --password or set IPSIEVE_ADMIN_PASSWORD")?;
    let grant = ctx.gate.login(password).await?;

    print::header("session");
    print::set_key_width(["Session", "Token", "Expires"]);
    print::aligned_line("Session", grant.session_id.color(colors::ACCENT).bold());
    print_token(&grant.token);
    info!("pass --session {} to privileged commands", grant.session_id);
    Ok(())
}

pub async fn token(ctx: &Context, command: &TokenCommand) -> anyhow::Result<()> {
    ctx.require_admin().await?;

    match command {
        TokenCommand::Set { token, days, never } => {
            let expiry = if *never {
                TokenExpiry::Never
            } else {
                TokenExpiry::Days(days.unwrap_or(ctx.config.token_ttl_days))
            };
            let config = ctx.gate.set_token(token, expiry).await?;
            print::header("token");
            print::set_key_width(["Token", "Expires"]);
            print_token(&config);
            success!("token updated");
        }
        TokenCommand::Show => match ctx.gate.token_config().await? {
            Some(config) => {
                print::header("token");
                print::set_key_width(["Token", "Expires", "Last used"]);
                print_token(&config);
                let last_used = config.last_used.map_or_else(|| "never".to_string(), |t| t.to_rfc3339());
                print::aligned_line("Last used", last_used);
            }
            None => print::nothing_stored("token"),
        },
    }
    Ok(())
}

pub async fn status(ctx: &Context) -> anyhow::Result<()> {
    let status = ctx.gate.status().await?;

    print::header("access");
    print::set_key_width(["Admin password", "API token", "Expires"]);
    print::aligned_line("Admin password", yes_no(status.has_admin_password));
    print::aligned_line("API token", yes_no(status.has_token));
    if let Some(config) = &status.token_config {
        print::aligned_line("Expires", expires(config));
    }
    if !status.has_admin_password {
        info!("no admin password set, every operation is open");
    }
    Ok(())
}

fn print_token(config: &TokenConfig) {
    print::aligned_line("Token", config.token.color(colors::ACCENT));
    print::aligned_line("Expires", expires(config));
}

fn expires(config: &TokenConfig) -> ColoredString {
    if config.never_expire {
        "never".color(colors::PRIMARY)
    } else if config.is_expired(chrono::Utc::now()) {
        format!("{} (expired)", config.expires.to_rfc3339()).color(colors::FAILURE)
    } else {
        config.expires.to_rfc3339().color(colors::TEXT_DEFAULT)
    }
}

fn yes_no(flag: bool) -> ColoredString {
    if flag { "yes".color(colors::PRIMARY) } else { "no".color(colors::SEPARATOR) }
}
