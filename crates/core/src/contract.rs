//! Typed proxy for the sponsorship contract.

use crate::abi::{self, SponsorRecord};
use crate::error::ClientError;
use crate::provider::{CallRequest, TransactionRequest};
use crate::session::Session;

/// Proxy bound to a fixed on-chain address, issuing reads and transactions
/// through the session's provider.
///
/// Immutable after construction.  Nothing is cached; every method
/// round-trips to the network.
pub struct SponsorshipContract {
    address: String,
    session: Session,
}

impl SponsorshipContract {
    pub fn new(address: impl Into<String>, session: Session) -> Self {
        Self {
            address: address.into(),
            session,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Paid transaction: register `name` as a sponsor with `value_wei`
    /// attached, originating from the session account.
    pub async fn add_sponsor(&self, name: &str, value_wei: u128) -> Result<String, ClientError> {
        let tx = TransactionRequest {
            from: self.session.account().to_string(),
            to: self.address.clone(),
            value: Some(format!("{value_wei:#x}")),
            data: hex_calldata(&abi::encode_add_sponsor(name)),
        };
        let hash = self.session.provider().send_transaction(tx).await?;
        tracing::debug!(%hash, method = abi::ADD_SPONSOR.name, "transaction submitted");
        Ok(hash)
    }

    /// Read call: the sponsor list exactly as the contract reports it
    /// (order and completeness are the contract's business).
    pub async fn get_sponsors(&self) -> Result<Vec<SponsorRecord>, ClientError> {
        let req = CallRequest {
            to: self.address.clone(),
            data: hex_calldata(&abi::encode_get_sponsors()),
        };
        let raw = self.session.provider().call(req).await?;
        abi::decode_sponsors(&raw)
    }

    /// Zero-value transaction to the withdrawal method, authorized by the
    /// session account.  All access control lives in the contract.
    pub async fn withdraw(&self) -> Result<String, ClientError> {
        let tx = TransactionRequest {
            from: self.session.account().to_string(),
            to: self.address.clone(),
            value: None,
            data: hex_calldata(&abi::encode_withdraw()),
        };
        let hash = self.session.provider().send_transaction(tx).await?;
        tracing::debug!(%hash, method = abi::WITHDRAW.name, "transaction submitted");
        Ok(hash)
    }
}

fn hex_calldata(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use crate::abi::encode_sponsor_return;
    use crate::provider::MockProvider;

    const CONTRACT: &str = "0xef48eb47752dcd2d7bb8fb2c2889ae11a4ca39df";

    async fn contract_with(provider: Arc<MockProvider>) -> SponsorshipContract {
        let session = Session::connect(provider).await.unwrap();
        SponsorshipContract::new(CONTRACT, session)
    }

    #[tokio::test]
    async fn test_add_sponsor_attaches_value_and_origin() {
        let provider = Arc::new(MockProvider::new(&["0xAAAA"]));
        let contract = contract_with(provider.clone()).await;

        contract
            .add_sponsor("Alice", 1_500_000_000_000_000_000)
            .await
            .unwrap();

        let sent = provider.sent_transactions();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].from, "0xaaaa");
        assert_eq!(sent[0].to, CONTRACT);
        assert_eq!(sent[0].value.as_deref(), Some("0x14d1120d7b160000"));
        assert!(sent[0].data.starts_with("0x"));
        let selector = hex::encode(abi::ADD_SPONSOR.selector());
        assert!(sent[0].data[2..].starts_with(&selector));
    }

    #[tokio::test]
    async fn test_get_sponsors_decodes_records() {
        let provider = Arc::new(
            MockProvider::new(&["0xAAAA"])
                .with_call_result(encode_sponsor_return(&[("Alice", 1), ("Bob", 2)])),
        );
        let contract = contract_with(provider).await;

        let sponsors = contract.get_sponsors().await.unwrap();
        assert_eq!(sponsors.len(), 2);
        assert_eq!(sponsors[0].name, "Alice");
        assert_eq!(sponsors[1].amount, 2);
    }

    #[tokio::test]
    async fn test_withdraw_sends_zero_value() {
        let provider = Arc::new(MockProvider::new(&["0xAAAA"]));
        let contract = contract_with(provider.clone()).await;

        contract.withdraw().await.unwrap();

        let sent = provider.sent_transactions();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].value, None);
        assert_eq!(sent[0].data, "0x3ccfd60b");
    }
}
