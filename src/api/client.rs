//! Backend REST API client
//!
//! Thin typed client over the tracker backend. Attaches the bearer token
//! to every request when a session exists; a 401 from any endpoint clears
//! the stored token so the UI can route back to login.

use crate::api::token_store::TokenStore;
use crate::api::types::*;
use crate::error::{AppError, Result};
use parking_lot::RwLock;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

pub struct ApiClient {
    http: Client,
    base_url: String,
    token: RwLock<Option<String>>,
    store: TokenStore,
}

impl ApiClient {
    /// Create a client, resuming any session persisted by a previous run.
    pub fn new(base_url: impl Into<String>, store: TokenStore) -> Self {
        let base_url = base_url.into();
        Self {
            http: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(store.load()),
            store,
        }
    }

    /// Whether a bearer token is on hand (not validated against the
    /// backend until the next request).
    pub fn has_session(&self) -> bool {
        self.token.read().is_some()
    }

    // ========================================================================
    // Auth
    // ========================================================================

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = self
            .request(Method::POST, "/auth/login")
            .json(&request)
            .send()
            .await?;
        let auth: AuthResponse = self.handle(response).await?;

        *self.token.write() = Some(auth.access_token.clone());
        if let Err(e) = self.store.save(&auth.access_token) {
            warn!(error = %e, "failed to persist session token");
        }
        info!(%username, "logged in");
        Ok(auth)
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<User> {
        let response = self
            .request(Method::POST, "/auth/register")
            .json(&request)
            .send()
            .await?;
        self.handle(response).await
    }

    pub async fn current_user(&self) -> Result<User> {
        let response = self.request(Method::GET, "/users/me").send().await?;
        self.handle(response).await
    }

    /// Drop the session locally. The backend keeps no session state.
    pub fn logout(&self) -> Result<()> {
        *self.token.write() = None;
        self.store.clear()
    }

    // ========================================================================
    // Investments
    // ========================================================================

    pub async fn investments(&self) -> Result<Vec<Investment>> {
        let response = self.request(Method::GET, "/investments/").send().await?;
        self.handle(response).await
    }

    pub async fn create_investment(&self, investment: InvestmentCreate) -> Result<Investment> {
        let response = self
            .request(Method::POST, "/investments/")
            .json(&investment)
            .send()
            .await?;
        self.handle(response).await
    }

    pub async fn update_investment(
        &self,
        id: i64,
        update: InvestmentUpdate,
    ) -> Result<Investment> {
        let response = self
            .request(Method::PUT, &format!("/investments/{}", id))
            .json(&update)
            .send()
            .await?;
        self.handle(response).await
    }

    pub async fn delete_investment(&self, id: i64) -> Result<()> {
        let response = self
            .request(Method::DELETE, &format!("/investments/{}", id))
            .send()
            .await?;
        self.check(response).await.map(|_| ())
    }

    // ========================================================================
    // Transactions
    // ========================================================================

    pub async fn transactions(&self, skip: u32, limit: u32) -> Result<Vec<Transaction>> {
        let response = self
            .request(
                Method::GET,
                &format!("/transactions/?skip={}&limit={}", skip, limit),
            )
            .send()
            .await?;
        self.handle(response).await
    }

    pub async fn create_transaction(&self, transaction: TransactionCreate) -> Result<Transaction> {
        let response = self
            .request(Method::POST, "/transactions/")
            .json(&transaction)
            .send()
            .await?;
        self.handle(response).await
    }

    pub async fn delete_transaction(&self, id: i64) -> Result<()> {
        let response = self
            .request(Method::DELETE, &format!("/transactions/{}", id))
            .send()
            .await?;
        self.check(response).await.map(|_| ())
    }

    // ========================================================================
    // Portfolio
    // ========================================================================

    pub async fn portfolio_summary(&self) -> Result<PortfolioSummary> {
        let response = self
            .request(Method::GET, "/portfolio/summary")
            .send()
            .await?;
        self.handle(response).await
    }

    // ========================================================================
    // Private Helper Methods
    // ========================================================================

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = self.token.read().as_ref() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn handle<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let response = self.check(response).await?;
        Ok(response.json().await?)
    }

    /// Map error statuses; on success hand the response back for body
    /// decoding.
    async fn check(&self, response: Response) -> Result<Response> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            // Stale token: drop it so the UI routes back to login
            *self.token.write() = None;
            if let Err(e) = self.store.clear() {
                warn!(error = %e, "failed to clear persisted token");
            }
            return Err(AppError::Auth("session expired".to_string()));
        }

        if !status.is_success() {
            let detail = response
                .json::<ApiErrorBody>()
                .await
                .map(|body| body.detail)
                .unwrap_or_else(|_| "unexpected backend error".to_string());
            return Err(AppError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(response)
    }
}

/// Backend error body shape (`{"detail": "..."}`).
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_resumes_persisted_session() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("session.json"));
        store.save("token-abc").unwrap();

        let client = ApiClient::new("http://localhost:8000", store);
        assert!(client.has_session());
    }

    #[test]
    fn test_logout_clears_memory_and_disk() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("session.json"));
        store.save("token-abc").unwrap();

        let client = ApiClient::new("http://localhost:8000", store.clone());
        client.logout().unwrap();

        assert!(!client.has_session());
        assert!(store.load().is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("session.json"));
        let client = ApiClient::new("http://localhost:8000/", store);
        assert_eq!(client.base_url, "http://localhost:8000");
    }
}
