//! Source aggregation.
//!
//! A source is a URL serving free-form text. The only thing read from it is
//! whatever matches the address/CIDR token pattern. A failing source yields an
//! error [`SourceResult`] and zero tokens; it never stops the other sources.

use async_trait::async_trait;
use ipsieve_common::error::SourceFetchError;
use ipsieve_common::models::pool::SourceResult;
use ipsieve_protocols::tokens;

mod http;

pub use http::HttpSourceFetcher;

#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Fetches the document body. Implementations must bound the call with a
    /// timeout and treat non-2xx responses as errors.
    async fn fetch_text(&self, url: &str) -> Result<String, SourceFetchError>;
}

/// Fetches one source and extracts its tokens.
///
/// On success the result carries the raw match count (duplicates and
/// not-yet-validated tokens included).
pub async fn fetch_tokens(fetcher: &dyn SourceFetcher, url: &str) -> (Vec<String>, SourceResult) {
    match fetcher.fetch_text(url).await {
        Ok(body) => {
            let found: Vec<String> = tokens::scan(&body).into_iter().map(str::to_owned).collect();
            tracing::debug!(source = url, tokens = found.len(), "source fetched");
            let result = SourceResult::success(url, found.len());
            (found, result)
        }
        Err(e) => {
            tracing::warn!(source = url, error = %e, "source fetch failed");
            (Vec::new(), SourceResult::failure(url, e))
        }
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
