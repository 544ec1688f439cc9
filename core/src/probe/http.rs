use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use ipsieve_common::config::Config;
use ipsieve_common::error::ProbeError;
use ipsieve_common::models::probe::ProbeOutcome;
use ipsieve_protocols::trace;
use reqwest::Client;
use tokio::time::{Instant, timeout};

use super::Prober;

/// Downloads a fixed number of bytes from the probe endpoint, connecting to
/// the candidate address while keeping the endpoint's host name for TLS and
/// routing.
///
/// Latency is wall-clock time from sending the request until the body has been
/// read completely, in whole milliseconds.
pub struct HttpProber {
    url: String,
    host: String,
    port: u16,
    trace_header: String,
    user_agent: String,
    timeout: Duration,
}

impl HttpProber {
    pub fn new(cfg: &Config) -> Self {
        Self {
            url: cfg.probe_url(),
            host: cfg.probe_host.clone(),
            port: cfg.probe_port,
            trace_header: cfg.trace_header.clone(),
            user_agent: cfg.user_agent.clone(),
            timeout: cfg.probe_timeout(),
        }
    }

    fn client_for(&self, addr: Ipv4Addr) -> Result<Client, ProbeError> {
        let pinned = SocketAddr::new(IpAddr::V4(addr), self.port);
        Client::builder()
            .resolve(&self.host, pinned)
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(|e| ProbeError::Network(e.to_string()))
    }

    async fn download(&self, client: &Client) -> Result<(u64, Option<String>), ProbeError> {
        let started = Instant::now();

        let response = client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| classify(e, ProbeError::Network))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::Status(status.as_u16()));
        }

        let location = response
            .headers()
            .get(self.trace_header.as_str())
            .and_then(|value| value.to_str().ok())
            .and_then(trace::location_code)
            .map(str::to_owned);

        response
            .bytes()
            .await
            .map_err(|e| classify(e, ProbeError::Body))?;

        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        Ok((latency_ms, location))
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, addr: Ipv4Addr) -> ProbeOutcome {
        let client = match self.client_for(addr) {
            Ok(client) => client,
            Err(e) => return ProbeOutcome::failure(addr, e),
        };

        let outcome = match timeout(self.timeout, self.download(&client)).await {
            Ok(Ok((latency_ms, location))) => ProbeOutcome::success(addr, latency_ms, location),
            Ok(Err(e)) => ProbeOutcome::failure(addr, e),
            Err(_elapsed) => ProbeOutcome::failure(addr, ProbeError::Timeout),
        };

        match &outcome.result {
            Ok(success) => tracing::debug!(
                addr = %addr,
                latency_ms = success.latency_ms,
                location = success.location.as_deref().unwrap_or("-"),
                "probe success"
            ),
            Err(e) => tracing::debug!(addr = %addr, error = %e, "probe failed"),
        }

        outcome
    }
}

fn classify(err: reqwest::Error, otherwise: fn(String) -> ProbeError) -> ProbeError {
    if err.is_timeout() {
        ProbeError::Timeout
    } else {
        otherwise(err.to_string())
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
