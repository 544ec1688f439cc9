pub mod access;
pub mod daemon;
pub mod probe;
pub mod refresh;
pub mod submit;
pub mod view;

use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use ipsieve_common::config::Config;
use ipsieve_common::error::PipelineError;
use ipsieve_common::network::address;
use ipsieve_common::store::KeyValueStore;
use ipsieve_core::access::{AccessGate, AdminGate, Credential};
use ipsieve_core::batch::ProgressCallback;
use ipsieve_core::pipeline::Pipeline;
use ipsieve_core::probe::HttpProber;
use ipsieve_core::sources::HttpSourceFetcher;
use ipsieve_core::storage::FileStore;

#[derive(Parser)]
#[command(name = "ipsieve")]
#[command(about = "Collects candidate IPv4 addresses and ranks them by latency.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the persisted pool, ranked sets and credentials
    #[arg(long, global = true, default_value = "./.ipsieve", env = "IPSIEVE_DATA_DIR")]
    pub data_dir: PathBuf,

    /// JSON configuration file
    #[arg(short, long, global = true, env = "IPSIEVE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Extra source document URL (repeatable, replaces the configured list)
    #[arg(long = "source", global = true)]
    pub sources: Vec<String>,

    /// Session id obtained from `login`
    #[arg(long, global = true, env = "IPSIEVE_SESSION")]
    pub session: Option<String>,

    /// API token
    #[arg(long, global = true, env = "IPSIEVE_TOKEN")]
    pub token: Option<String>,

    /// Admin password; unset means every operation is allowed
    #[arg(long, global = true, env = "IPSIEVE_ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate the sources, then probe and rank a sample of the pool
    #[command(alias = "r")]
    Refresh {
        /// Skip probing when no source could be fetched
        #[arg(long)]
        strict: bool,
    },
    /// Aggregate the sources and replace the pool, without probing
    #[command(alias = "u")]
    Update,
    /// Probe a single address
    #[command(alias = "p")]
    Probe {
        #[arg(value_parser = parse_addr)]
        addr: Ipv4Addr,
    },
    /// Show the persisted pool
    Pool(ViewArgs),
    /// Show the backend ranked set
    Fast(ViewArgs),
    /// Show the client-submitted ranked set
    Client(ViewArgs),
    /// Store a client-computed ranked set read from a JSON file ("-" for stdin)
    Submit { file: PathBuf },
    /// Exchange the admin password for a session id
    Login {
        /// Falls back to --admin-password
        #[arg(long)]
        password: Option<String>,
    },
    /// Manage the API token
    #[command(subcommand)]
    Token(TokenCommand),
    /// Show whether a password and a token are configured
    Status,
    /// Refresh on a fixed interval until interrupted
    #[command(alias = "d")]
    Daemon {
        /// Seconds between refreshes, overrides the configured interval
        #[arg(long)]
        interval: Option<u64>,
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Args)]
pub struct ViewArgs {
    /// Plain text, one entry per line
    #[arg(long, conflicts_with = "json")]
    pub text: bool,
    /// The persisted JSON document
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum TokenCommand {
    /// Replace the API token
    Set {
        token: String,
        /// Days until the token expires
        #[arg(long, conflicts_with = "never")]
        days: Option<i64>,
        #[arg(long)]
        never: bool,
    },
    /// Print the current token and its expiry
    Show,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn credential(&self) -> Option<Credential> {
        match (&self.session, &self.token) {
            (Some(id), _) => Some(Credential::Session(id.clone())),
            (None, Some(token)) => Some(Credential::Token(token.clone())),
            (None, None) => None,
        }
    }
}

fn parse_addr(s: &str) -> Result<Ipv4Addr, String> {
    address::parse_address(s).ok_or_else(|| format!("'{s}' is not a dotted-quad IPv4 address"))
}

/// Everything a command handler needs, built once from the command line.
pub struct Context {
    pub config: Arc<Config>,
    pub store: Arc<dyn KeyValueStore>,
    pub gate: Arc<AdminGate>,
    pub credential: Option<Credential>,
    pub quiet: bool,
}

impl Context {
    pub fn build(cli: &CommandLine) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if !cli.sources.is_empty() {
            config.source_urls = cli.sources.clone();
        }
        match &cli.command {
            Commands::Refresh { strict: true } | Commands::Daemon { strict: true, .. } => config.strict = true,
            _ => {}
        }

        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&cli.data_dir));
        let gate = Arc::new(AdminGate::new(cli.admin_password.clone(), Arc::clone(&store), &config));

        Ok(Self {
            config: Arc::new(config),
            store,
            gate,
            credential: cli.credential(),
            quiet: cli.quiet,
        })
    }

    pub fn pipeline(&self, on_progress: Option<ProgressCallback>) -> anyhow::Result<Pipeline> {
        let fetcher = HttpSourceFetcher::new(&self.config).context("failed to build the HTTP client")?;
        let prober = HttpProber::new(&self.config);
        let pipeline = Pipeline::new(
            Arc::clone(&self.config),
            Arc::clone(&self.store),
            Arc::new(fetcher),
            Arc::new(prober),
            self.gate.clone(),
        );
        Ok(match on_progress {
            Some(cb) => pipeline.with_progress(cb),
            None => pipeline,
        })
    }

    /// Fails with a readable error unless the credential passes the gate.
    pub async fn require_admin(&self) -> anyhow::Result<()> {
        if self.gate.authorize(self.credential.as_ref()).await {
            return Ok(());
        }
        Err(PipelineError::Unauthorized).context("this operation needs a valid --session or --token")
    }
}
