//! Wallet session: the authorized account and its capability provider.

use std::sync::Arc;

use crate::error::ClientError;
use crate::provider::EthereumProvider;

/// A connected wallet session.
///
/// Created once by [`Session::connect`] and never mutated afterwards;
/// reconnecting replaces the session wholesale.  All flows read the same
/// session, so there is exactly one active account at a time.
#[derive(Clone)]
pub struct Session {
    account: String,
    provider: Arc<dyn EthereumProvider>,
}

impl Session {
    /// Request account authorization and bind the first authorized account.
    ///
    /// May prompt the user on the wallet side.  A rejection surfaces as
    /// [`ClientError::AuthorizationRejected`] and no session exists
    /// afterwards; no retry is attempted.
    pub async fn connect(provider: Arc<dyn EthereumProvider>) -> Result<Self, ClientError> {
        let accounts = provider.request_accounts().await?;
        let account = accounts
            .into_iter()
            .next()
            .ok_or(ClientError::NoAccounts)?
            .to_lowercase();
        tracing::info!(%account, "wallet connected");
        Ok(Self { account, provider })
    }

    /// The active account address (lowercase hex).
    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn provider(&self) -> &Arc<dyn EthereumProvider> {
        &self.provider
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("account", &self.account)
            .finish_non_exhaustive()
    }
}
