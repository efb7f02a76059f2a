use async_trait::async_trait;
use log::debug;

use crate::api::http::{build_http_client, get_json};
use crate::config::Config;
use crate::core::constants::{error_messages, storage};
use crate::core::error::{GscoutError, Result};
use crate::core::types::UserInfo;
use crate::storage::LocalStore;

/// Token acquisition and account lookup, delegated to an identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Obtain a bearer token. Silent mode never prompts.
    async fn acquire_token(&self, interactive: bool) -> Result<String>;

    /// Forget a token locally, then revoke it remotely on a best-effort basis.
    async fn revoke_token(&self, token: &str) -> Result<()>;

    async fn user_info(&self, token: &str) -> Result<UserInfo>;
}

/// Google OAuth tokens obtained out of band.
///
/// Lookup order: explicit token, the configured environment variable, the
/// token cached in the local store, then (interactive mode only) a hidden
/// prompt. Interactive acquisition caches the token it returns.
pub struct GoogleIdentity {
    http: reqwest::Client,
    userinfo_url: String,
    revoke_url: String,
    token_env: String,
    explicit_token: Option<String>,
    store: LocalStore,
}

impl GoogleIdentity {
    pub fn from_config(config: &Config, store: LocalStore) -> Result<Self> {
        Ok(Self {
            http: build_http_client(config)?,
            userinfo_url: config.userinfo_url().to_string(),
            revoke_url: config.revoke_url().to_string(),
            token_env: config.token_env().to_string(),
            explicit_token: None,
            store,
        })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.explicit_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    fn non_interactive_token(&self) -> Result<Option<String>> {
        if let Some(ref token) = self.explicit_token {
            return Ok(Some(token.clone()));
        }
        if let Ok(token) = std::env::var(&self.token_env)
            && !token.trim().is_empty()
        {
            debug!("Using token from ${}", self.token_env);
            return Ok(Some(token.trim().to_string()));
        }
        self.store.get_string(storage::AUTH_TOKEN_KEY)
    }
}

fn token_prompt() -> String {
    format!(
        "Paste an OAuth access token with the {} scopes",
        error_messages::REQUIRED_SCOPES
    )
}

fn prompt_for_token() -> Result<String> {
    let token = dialoguer::Password::new()
        .with_prompt(token_prompt())
        .interact()
        .map_err(|e| GscoutError::Auth(e.to_string()))?;
    Ok(token.trim().to_string())
}

#[async_trait]
impl IdentityProvider for GoogleIdentity {
    async fn acquire_token(&self, interactive: bool) -> Result<String> {
        let token = match self.non_interactive_token()? {
            Some(token) => token,
            None if interactive => prompt_for_token()?,
            None => return Err(GscoutError::Auth(error_messages::NO_TOKEN.to_string())),
        };
        if token.is_empty() {
            return Err(GscoutError::Auth(error_messages::NO_TOKEN.to_string()));
        }

        if interactive {
            self.store.set_string(storage::AUTH_TOKEN_KEY, &token)?;
        }
        Ok(token)
    }

    async fn revoke_token(&self, token: &str) -> Result<()> {
        if self.store.get_string(storage::AUTH_TOKEN_KEY)?.as_deref() == Some(token) {
            self.store.remove(storage::AUTH_TOKEN_KEY)?;
        }

        // Local removal already happened; the remote call is best-effort.
        let outcome = self
            .http
            .get(&self.revoke_url)
            .query(&[("token", token)])
            .send()
            .await;
        match outcome {
            Ok(response) if !response.status().is_success() => {
                debug!("Token revocation returned {}", response.status());
            }
            Err(e) => debug!("Token revocation failed: {e}"),
            Ok(_) => debug!("Token revoked"),
        }
        Ok(())
    }

    async fn user_info(&self, token: &str) -> Result<UserInfo> {
        get_json(self.http.get(&self.userinfo_url), token).await
    }
}
