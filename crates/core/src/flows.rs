//! User-facing flows: sponsor submission, listing refresh, withdrawal.
//!
//! Each flow is one asynchronous sequence over the session/proxy pair.
//! Input validation happens before any network traffic; every remote
//! failure is terminal for the current action (the user retries by
//! repeating it).

use crate::contract::SponsorshipContract;
use crate::error::ClientError;
use crate::units;
use crate::view::SponsorView;

/// Currency unit shown next to listed amounts.
const DISPLAY_UNIT: &str = "ETH";

/// Validate submission input and return the wei value to attach.
///
/// The name must be non-empty and the amount must parse to a value
/// strictly greater than zero.  Rejected input never reaches the network.
fn validate_submission(name: &str, amount: &str) -> Result<u128, ClientError> {
    if name.trim().is_empty() {
        return Err(ClientError::InvalidName);
    }
    let value = units::parse_eth(amount)?;
    if value == 0 {
        return Err(ClientError::InvalidAmount(
            "amount must be greater than zero".into(),
        ));
    }
    Ok(value)
}

/// Submit a sponsorship payment, then refresh the listing once.
pub async fn submit_sponsorship(
    contract: &SponsorshipContract,
    view: &dyn SponsorView,
    name: &str,
    amount: &str,
) -> Result<(), ClientError> {
    let value = validate_submission(name, amount)?;
    let hash = contract.add_sponsor(name, value).await?;
    tracing::info!(%hash, name, amount, "sponsorship submitted");
    view.confirm("Sponsor added successfully");
    refresh_sponsors(contract, view).await
}

/// Fetch the sponsor list and replace the rendered view.
///
/// Each record renders as `"<name> - <decimal amount> ETH"`, in the order
/// the contract reported.  The view is replaced only after a successful
/// fetch; a failed call leaves the previous rendering untouched.
pub async fn refresh_sponsors(
    contract: &SponsorshipContract,
    view: &dyn SponsorView,
) -> Result<(), ClientError> {
    let sponsors = contract.get_sponsors().await?;
    let entries: Vec<String> = sponsors
        .iter()
        .map(|s| format!("{} - {} {DISPLAY_UNIT}", s.name, units::format_wei(s.amount)))
        .collect();
    tracing::debug!(count = entries.len(), "sponsor list fetched");
    view.replace_sponsors(entries);
    Ok(())
}

/// Submit a zero-value withdrawal transaction.
///
/// No client-side precondition; the contract decides who may withdraw.
pub async fn withdraw_funds(
    contract: &SponsorshipContract,
    view: &dyn SponsorView,
) -> Result<(), ClientError> {
    let hash = contract.withdraw().await?;
    tracing::info!(%hash, "withdrawal submitted");
    view.confirm("Funds withdrawn successfully");
    Ok(())
}
