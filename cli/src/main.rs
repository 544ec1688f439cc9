mod commands;
mod terminal;

use commands::view::View;
use commands::{CommandLine, Commands, Context, access, daemon, probe, refresh, submit, view};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLine::parse_args();
    logging::init(cli.quiet);

    let ctx = Context::build(&cli)?;

    match &cli.command {
        Commands::Refresh { .. } => {
            print::header("refreshing candidates");
            refresh::refresh(&ctx).await
        }
        Commands::Update => {
            print::header("updating pool");
            refresh::update(&ctx).await
        }
        Commands::Probe { addr } => probe::probe(&ctx, *addr).await,
        Commands::Pool(args) => view::view(&ctx, View::Pool, args).await,
        Commands::Fast(args) => view::view(&ctx, View::Fast, args).await,
        Commands::Client(args) => view::view(&ctx, View::Client, args).await,
        Commands::Submit { file } => submit::submit(&ctx, file).await,
        Commands::Login { password } => {
            let password = password.as_deref().or(cli.admin_password.as_deref());
            access::login(&ctx, password).await
        }
        Commands::Token(command) => access::token(&ctx, command).await,
        Commands::Status => access::status(&ctx).await,
        Commands::Daemon { interval, .. } => {
            print::header("refresh daemon");
            daemon::daemon(&ctx, *interval).await
        }
    }
}
