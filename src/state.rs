//! Application state management
//!
//! The dependency root. Everything shared across consumers (the market
//! data service with its cache and rate limiter, the backend client, the
//! user session) is constructed exactly once here and passed around by
//! `Arc`, so there are no hidden globals and tests get fresh instances.

use crate::api::{ApiClient, TokenStore, User};
use crate::config::AppConfig;
use crate::error::Result;
use crate::market::{AlphaVantageProvider, MarketDataService};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;

/// User session information
#[derive(Debug, Clone)]
pub struct UserSession {
    pub user: User,
    pub authenticated_at: DateTime<Utc>,
}

/// Application state shared across all consumers
pub struct AppState {
    pub config: AppConfig,

    /// Backend REST API client
    pub api: Arc<ApiClient>,

    /// Market data service (quote cache + rate limiter live inside)
    pub market: Arc<MarketDataService>,

    /// Current user session
    user_session: RwLock<Option<UserSession>>,

    /// Application data directory
    pub data_dir: PathBuf,
}

impl AppState {
    /// Create new application state
    pub fn new(config: AppConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;
        tracing::info!("Data directory: {:?}", config.data_dir);

        let store = TokenStore::new(config.data_dir.join("session.json"));
        let api = Arc::new(ApiClient::new(config.backend_url.clone(), store));

        let provider = Arc::new(AlphaVantageProvider::new(&config.market));
        let market = Arc::new(MarketDataService::new(provider, &config.market));

        Ok(Self {
            data_dir: config.data_dir.clone(),
            api,
            market,
            user_session: RwLock::new(None),
            config,
        })
    }

    /// Check if a user is logged in
    pub fn is_authenticated(&self) -> bool {
        self.user_session.read().is_some()
    }

    /// Get current user session
    pub fn get_user_session(&self) -> Option<UserSession> {
        self.user_session.read().clone()
    }

    /// Set user session
    pub fn set_user_session(&self, session: Option<UserSession>) {
        *self.user_session.write() = session;
    }

    /// Authenticate against the backend and record the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        self.api.login(username, password).await?;
        let user = self.api.current_user().await?;
        self.set_user_session(Some(UserSession {
            user: user.clone(),
            authenticated_at: Utc::now(),
        }));
        Ok(user)
    }

    /// Drop the session and the persisted token.
    pub fn logout(&self) -> Result<()> {
        self.set_user_session(None);
        self.api.logout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_new_creates_data_dir() {
        let dir = tempdir().unwrap();
        let config = AppConfig {
            data_dir: dir.path().join("nested").join("data"),
            ..AppConfig::default()
        };

        let state = AppState::new(config).unwrap();
        assert!(state.data_dir.exists());
        assert!(!state.is_authenticated());
        assert_eq!(state.market.cached_symbols(), 0);
    }
}
