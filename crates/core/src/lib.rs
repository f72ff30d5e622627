//! Client library for an on-chain sponsorship ledger.
//!
//! ## Architecture
//!
//! A [`Session`](session::Session) is established once against a wallet
//! capability provider ([`provider::EthereumProvider`]); it holds the
//! authorized account and the provider handle.  A
//! [`SponsorshipContract`](contract::SponsorshipContract) proxy bound to a
//! fixed address issues reads and transactions through that session, and
//! the [`flows`] module glues validation, unit conversion and rendering
//! together: submit a sponsorship payment, list sponsors, withdraw funds.
//!
//! All ledger state lives in the external contract; the wallet provider
//! keeps key management and signing.  This crate is deliberately a thin
//! sequence of remote calls with exact amount conversion at the edges.

pub mod abi;
pub mod config;
pub mod contract;
pub mod error;
pub mod flows;
pub mod provider;
pub mod session;
pub mod units;
pub mod view;

pub use config::ClientConfig;
pub use contract::SponsorshipContract;
pub use error::ClientError;
pub use session::Session;
