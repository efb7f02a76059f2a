//! Authenticated session lifecycle

use log::{debug, info};

use crate::api::IdentityProvider;
use crate::core::constants::error_messages;
use crate::core::error::{GscoutError, Result};
use crate::core::types::UserInfo;

/// Credentials and profile of the signed-in account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    user: UserInfo,
}

impl Session {
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> &UserInfo {
        &self.user
    }
}

/// Owns the current [`Session`]: created on authentication success,
/// cleared on logout.
pub struct SessionManager<P: IdentityProvider> {
    provider: P,
    session: Option<Session>,
}

impl<P: IdentityProvider> SessionManager<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            session: None,
        }
    }

    pub fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Token of the current session, or an auth error when signed out.
    pub fn token(&self) -> Result<&str> {
        self.session
            .as_ref()
            .map(Session::token)
            .ok_or_else(|| GscoutError::Auth(error_messages::NO_TOKEN.to_string()))
    }

    /// Silent sign-in. Any failure leaves the manager signed out without
    /// surfacing an error.
    pub async fn restore(&mut self) -> Option<&Session> {
        match self.authenticate(false).await {
            Ok(session) => self.session = Some(session),
            Err(e) => debug!("No session restored: {e}"),
        }
        self.session.as_ref()
    }

    /// Interactive sign-in; failures are returned for display.
    pub async fn login(&mut self) -> Result<&Session> {
        let session = self.authenticate(true).await?;
        info!("Signed in as {}", session.user.email);
        Ok(self.session.insert(session))
    }

    /// Sign out. The session is cleared even when revocation fails. Without
    /// a session, a stale stored credential is still revoked.
    pub async fn logout(&mut self) -> Result<()> {
        match self.session.take() {
            Some(session) => {
                info!("Signing out {}", session.user.email);
                self.provider.revoke_token(&session.token).await
            }
            None => match self.provider.acquire_token(false).await {
                Ok(token) => {
                    debug!("Revoking credential without an active session");
                    self.provider.revoke_token(&token).await
                }
                Err(_) => Ok(()),
            },
        }
    }

    async fn authenticate(&self, interactive: bool) -> Result<Session> {
        let token = self.provider.acquire_token(interactive).await?;
        let user = self.provider.user_info(&token).await?;
        Ok(Session { token, user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeIdentity {
        token: Option<String>,
        reject_profile: bool,
        revoked: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl IdentityProvider for FakeIdentity {
        async fn acquire_token(&self, _interactive: bool) -> Result<String> {
            self.token
                .clone()
                .ok_or_else(|| GscoutError::Auth("No token received".to_string()))
        }

        async fn revoke_token(&self, token: &str) -> Result<()> {
            self.revoked.lock().unwrap().push(token.to_string());
            Ok(())
        }

        async fn user_info(&self, _token: &str) -> Result<UserInfo> {
            if self.reject_profile {
                return Err(GscoutError::Auth("Failed to get user info".to_string()));
            }
            Ok(UserInfo {
                email: "owner@example.com".to_string(),
                name: None,
                picture: None,
            })
        }
    }

    #[tokio::test]
    async fn test_restore_without_token_stays_signed_out() {
        let mut manager = SessionManager::new(FakeIdentity::default());

        assert!(manager.restore().await.is_none());
        assert!(!manager.is_authenticated());
        assert!(manager.token().unwrap_err().is_auth());
    }

    #[tokio::test]
    async fn test_restore_with_rejected_profile_stays_signed_out() {
        let mut manager = SessionManager::new(FakeIdentity {
            token: Some("tok".to_string()),
            reject_profile: true,
            ..Default::default()
        });

        assert!(manager.restore().await.is_none());
    }

    #[tokio::test]
    async fn test_login_creates_session() {
        let mut manager = SessionManager::new(FakeIdentity {
            token: Some("tok".to_string()),
            ..Default::default()
        });

        let session = manager.login().await.unwrap();
        assert_eq!(session.token(), "tok");
        assert_eq!(session.user().email, "owner@example.com");
        assert_eq!(manager.token().unwrap(), "tok");
    }

    #[tokio::test]
    async fn test_login_failure_is_returned() {
        let mut manager = SessionManager::new(FakeIdentity::default());

        assert!(manager.login().await.unwrap_err().is_auth());
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_and_revokes() {
        let mut manager = SessionManager::new(FakeIdentity {
            token: Some("tok".to_string()),
            ..Default::default()
        });
        manager.login().await.unwrap();

        manager.logout().await.unwrap();

        assert!(!manager.is_authenticated());
        assert_eq!(*manager.provider.revoked.lock().unwrap(), vec!["tok"]);
    }

    #[tokio::test]
    async fn test_logout_revokes_stale_credential() {
        let mut manager = SessionManager::new(FakeIdentity {
            token: Some("stale".to_string()),
            reject_profile: true,
            ..Default::default()
        });
        assert!(manager.restore().await.is_none());

        manager.logout().await.unwrap();
        assert_eq!(*manager.provider.revoked.lock().unwrap(), vec!["stale"]);
    }

    #[tokio::test]
    async fn test_logout_when_signed_out_is_noop() {
        let mut manager = SessionManager::new(FakeIdentity::default());
        manager.logout().await.unwrap();
        assert!(manager.provider.revoked.lock().unwrap().is_empty());
    }
}
