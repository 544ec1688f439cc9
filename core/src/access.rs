//! # Access Gate
//!
//! Privileged operations ask an [`AccessGate`] one question: is this
//! credential allowed? The pipeline never looks further than that boolean.
//!
//! [`AdminGate`] is the stock implementation. With no admin password
//! configured the deployment is open and everything is authorized. Otherwise
//! a credential must be either a live session (created by [`AdminGate::login`],
//! expiring after the configured session TTL) or the current API token, which
//! carries its own expiry.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ipsieve_common::config::Config;
use ipsieve_common::error::AccessError;
use ipsieve_common::store::{self, KeyValueStore, keys};
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};

const TOKEN_LEN: usize = 32;
const NEVER_EXPIRE_DAYS: i64 = 100 * 365;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    Session(String),
    Token(String),
}

#[async_trait]
pub trait AccessGate: Send + Sync {
    async fn authorize(&self, credential: Option<&Credential>) -> bool;
}

/// Authorizes everything.
pub struct OpenGate;

#[async_trait]
impl AccessGate for OpenGate {
    async fn authorize(&self, _credential: Option<&Credential>) -> bool {
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenConfig {
    pub token: String,
    pub expires: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_used: Option<DateTime<Utc>>,
    #[serde(default)]
    pub never_expire: bool,
}

impl TokenConfig {
    fn new(token: String, expiry: TokenExpiry) -> Result<Self, AccessError> {
        let now = Utc::now();
        let (days, never_expire) = match expiry {
            TokenExpiry::Days(days) => (days, false),
            TokenExpiry::Never => (NEVER_EXPIRE_DAYS, true),
        };
        let expires = chrono::Duration::try_days(days)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or(AccessError::InvalidExpiry(days))?;
        Ok(Self {
            token,
            expires,
            created_at: now,
            last_used: None,
            never_expire,
        })
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        !self.never_expire && self.expires < now
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenExpiry {
    Days(i64),
    Never,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecord {
    logged_in: bool,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct LoginGrant {
    pub session_id: String,
    pub token: TokenConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateStatus {
    pub has_admin_password: bool,
    pub has_token: bool,
    pub token_config: Option<TokenConfig>,
}

pub struct AdminGate {
    password: Option<String>,
    store: Arc<dyn KeyValueStore>,
    session_ttl: Duration,
    token_ttl_days: i64,
}

impl AdminGate {
    pub fn new(password: Option<String>, store: Arc<dyn KeyValueStore>, cfg: &Config) -> Self {
        Self {
            password: password.filter(|p| !p.is_empty()),
            store,
            session_ttl: cfg.session_ttl(),
            token_ttl_days: cfg.token_ttl_days,
        }
    }

    pub fn is_open(&self) -> bool {
        self.password.is_none()
    }

    /// Exchanges the admin password for a new session. Creates the API token
    /// on first login.
    pub async fn login(&self, password: &str) -> Result<LoginGrant, AccessError> {
        let Some(expected) = &self.password else {
            return Err(AccessError::NoPasswordConfigured);
        };
        if password != expected {
            return Err(AccessError::WrongPassword);
        }

        let token = match self.token_config().await? {
            Some(existing) => existing,
            None => {
                let fresh = TokenConfig::new(generate_token(), TokenExpiry::Days(self.token_ttl_days))?;
                store::save(self.store.as_ref(), keys::TOKEN_CONFIG, &fresh, None).await?;
                fresh
            }
        };

        let session_id = generate_token();
        let record = SessionRecord {
            logged_in: true,
            created_at: Utc::now(),
        };
        store::save(
            self.store.as_ref(),
            &keys::session(&session_id),
            &record,
            Some(self.session_ttl),
        )
        .await?;

        tracing::info!("admin session created");
        Ok(LoginGrant { session_id, token })
    }

    /// Replaces the API token. Callers must have been authorized already.
    pub async fn set_token(&self, token: &str, expiry: TokenExpiry) -> Result<TokenConfig, AccessError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AccessError::EmptyToken);
        }
        let config = TokenConfig::new(token.to_string(), expiry)?;
        store::save(self.store.as_ref(), keys::TOKEN_CONFIG, &config, None).await?;
        Ok(config)
    }

    pub async fn token_config(&self) -> Result<Option<TokenConfig>, AccessError> {
        Ok(store::load(self.store.as_ref(), keys::TOKEN_CONFIG).await?)
    }

    pub async fn status(&self) -> Result<GateStatus, AccessError> {
        let token_config = self.token_config().await?;
        Ok(GateStatus {
            has_admin_password: self.password.is_some(),
            has_token: token_config.is_some(),
            token_config,
        })
    }

    async fn check(&self, credential: &Credential) -> Result<bool, AccessError> {
        match credential {
            Credential::Session(id) => {
                let record: Option<SessionRecord> =
                    store::load(self.store.as_ref(), &keys::session(id)).await?;
                Ok(record.is_some_and(|r| r.logged_in))
            }
            Credential::Token(presented) => {
                let Some(mut config) = self.token_config().await? else {
                    return Ok(false);
                };
                let now = Utc::now();
                if config.is_expired(now) || config.token != *presented {
                    return Ok(false);
                }
                config.last_used = Some(now);
                store::save(self.store.as_ref(), keys::TOKEN_CONFIG, &config, None).await?;
                Ok(true)
            }
        }
    }
}

#[async_trait]
impl AccessGate for AdminGate {
    async fn authorize(&self, credential: Option<&Credential>) -> bool {
        if self.is_open() {
            return true;
        }
        let Some(credential) = credential else {
            return false;
        };
        match self.check(credential).await {
            Ok(allowed) => allowed,
            Err(e) => {
                tracing::warn!(error = %e, "credential check failed");
                false
            }
        }
    }
}

fn generate_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
