//! Error taxonomy for the sponsorbook client.

/// Errors surfaced by the client library.
///
/// Input validation (`InvalidName`, `InvalidAmount`) fails before any
/// network traffic.  Everything else is terminal for the current user
/// action; there are no retries anywhere in the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("no wallet provider is configured")]
    ProviderMissing,
    #[error("wallet authorization was rejected")]
    AuthorizationRejected,
    #[error("provider returned no authorized accounts")]
    NoAccounts,
    #[error("sponsor name must not be empty")]
    InvalidName,
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("RPC request failed: {0}")]
    Rpc(#[from] reqwest::Error),
    #[error("remote error {code}: {message}")]
    Remote { code: i64, message: String },
    #[error("failed to decode contract response: {0}")]
    Decode(String),
}
