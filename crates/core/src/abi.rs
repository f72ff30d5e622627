//! Method schema and minimal ABI codec for the sponsorship contract.
//!
//! The contract exposes three callable methods:
//!
//! ```text
//! addSponsor(string)   payable      sponsor under a name, value attached
//! getSponsors()        view         -> (string name, uint256 amount)[]
//! withdraw()           nonpayable   move contract funds to the caller
//! ```
//!
//! Selectors are derived from the canonical signatures with Keccak-256, so
//! the descriptors below stay the single source of truth.  Only the shapes
//! above are encoded/decoded; this is not a general ABI implementation.

use sha3::{Digest, Keccak256};

use crate::error::ClientError;

const WORD: usize = 32;

/// State mutability of a contract method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    Payable,
    NonPayable,
    View,
}

/// Descriptor for one callable contract method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Method {
    pub name: &'static str,
    /// Canonical signature the selector is derived from.
    pub signature: &'static str,
    pub mutability: Mutability,
}

pub const ADD_SPONSOR: Method = Method {
    name: "addSponsor",
    signature: "addSponsor(string)",
    mutability: Mutability::Payable,
};

pub const GET_SPONSORS: Method = Method {
    name: "getSponsors",
    signature: "getSponsors()",
    mutability: Mutability::View,
};

pub const WITHDRAW: Method = Method {
    name: "withdraw",
    signature: "withdraw()",
    mutability: Mutability::NonPayable,
};

impl Method {
    /// First four bytes of the Keccak-256 hash of the canonical signature.
    pub fn selector(&self) -> [u8; 4] {
        let digest = Keccak256::digest(self.signature.as_bytes());
        [digest[0], digest[1], digest[2], digest[3]]
    }
}

/// One sponsor record as returned by `getSponsors()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SponsorRecord {
    pub name: String,
    /// Sponsored amount in wei.
    pub amount: u128,
}

/// Calldata for `addSponsor(string)`: selector, one head word holding the
/// offset to the string, then its length and right-padded UTF-8 bytes.
pub fn encode_add_sponsor(name: &str) -> Vec<u8> {
    let bytes = name.as_bytes();
    let padded = bytes.len().div_ceil(WORD) * WORD;
    let mut data = Vec::with_capacity(4 + 2 * WORD + padded);
    data.extend_from_slice(&ADD_SPONSOR.selector());
    data.extend_from_slice(&encode_word(WORD as u128));
    data.extend_from_slice(&encode_word(bytes.len() as u128));
    data.extend_from_slice(bytes);
    data.resize(4 + 2 * WORD + padded, 0);
    data
}

/// Calldata for `getSponsors()` (no arguments).
pub fn encode_get_sponsors() -> Vec<u8> {
    GET_SPONSORS.selector().to_vec()
}

/// Calldata for `withdraw()` (no arguments).
pub fn encode_withdraw() -> Vec<u8> {
    WITHDRAW.selector().to_vec()
}

/// Decode `getSponsors()` return data: a dynamic array of dynamic
/// `(string, uint256)` tuples, in the order the contract reported them.
pub fn decode_sponsors(data: &[u8]) -> Result<Vec<SponsorRecord>, ClientError> {
    let array_offset = read_usize(data, 0)?;
    let len = read_usize(data, array_offset)?;
    let elems_base = checked_offset(array_offset, WORD)?;

    // Cap preallocation; a malformed length word must not OOM us.
    let mut records = Vec::with_capacity(len.min(1024));
    for i in 0..len {
        let elem_offset = read_usize(data, checked_offset(elems_base, i * WORD)?)?;
        let tuple_base = checked_offset(elems_base, elem_offset)?;

        let name_offset = read_usize(data, tuple_base)?;
        let amount = read_u128(data, checked_offset(tuple_base, WORD)?)?;

        let name_base = checked_offset(tuple_base, name_offset)?;
        let name_len = read_usize(data, name_base)?;
        let name_start = checked_offset(name_base, WORD)?;
        let name_bytes = data
            .get(name_start..checked_offset(name_start, name_len)?)
            .ok_or_else(|| truncated(name_start))?;
        let name = String::from_utf8(name_bytes.to_vec())
            .map_err(|e| ClientError::Decode(format!("sponsor name is not UTF-8: {e}")))?;

        records.push(SponsorRecord { name, amount });
    }
    Ok(records)
}

fn encode_word(value: u128) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 16..].copy_from_slice(&value.to_be_bytes());
    word
}

fn checked_offset(base: usize, add: usize) -> Result<usize, ClientError> {
    base.checked_add(add)
        .ok_or_else(|| ClientError::Decode("offset overflow in return data".into()))
}

fn truncated(offset: usize) -> ClientError {
    ClientError::Decode(format!("return data truncated at offset {offset}"))
}

fn word_at(data: &[u8], offset: usize) -> Result<&[u8], ClientError> {
    data.get(offset..checked_offset(offset, WORD)?)
        .ok_or_else(|| truncated(offset))
}

/// Read a word that must fit a `usize` (offsets and lengths).
fn read_usize(data: &[u8], offset: usize) -> Result<usize, ClientError> {
    let word = word_at(data, offset)?;
    if word[..WORD - 8].iter().any(|&b| b != 0) {
        return Err(ClientError::Decode(format!(
            "offset or length at {offset} exceeds u64"
        )));
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&word[WORD - 8..]);
    usize::try_from(u64::from_be_bytes(buf))
        .map_err(|_| ClientError::Decode(format!("offset or length at {offset} exceeds usize")))
}

/// Read a `uint256` word that must fit a `u128`; larger amounts are a
/// decode error rather than a silent truncation.
fn read_u128(data: &[u8], offset: usize) -> Result<u128, ClientError> {
    let word = word_at(data, offset)?;
    if word[..WORD - 16].iter().any(|&b| b != 0) {
        return Err(ClientError::Decode(format!(
            "amount at offset {offset} exceeds u128"
        )));
    }
    let mut buf = [0u8; 16];
    buf.copy_from_slice(&word[WORD - 16..]);
    Ok(u128::from_be_bytes(buf))
}

/// Build `getSponsors()` return data from `(name, amount)` pairs.
///
/// Used by the mock provider and fixture-driven tests.
#[cfg(any(test, feature = "testing"))]
pub fn encode_sponsor_return(records: &[(&str, u128)]) -> Vec<u8> {
    let mut tuples: Vec<Vec<u8>> = Vec::with_capacity(records.len());
    for (name, amount) in records {
        let bytes = name.as_bytes();
        let padded = bytes.len().div_ceil(WORD) * WORD;
        let mut tuple = Vec::with_capacity(3 * WORD + padded);
        // Tuple head: offset to the string, then the amount.
        tuple.extend_from_slice(&encode_word(2 * WORD as u128));
        tuple.extend_from_slice(&encode_word(*amount));
        tuple.extend_from_slice(&encode_word(bytes.len() as u128));
        tuple.extend_from_slice(bytes);
        tuple.resize(3 * WORD + padded, 0);
        tuples.push(tuple);
    }

    let mut out = Vec::new();
    out.extend_from_slice(&encode_word(WORD as u128));
    out.extend_from_slice(&encode_word(records.len() as u128));
    // Element offsets are relative to the start of the offset section.
    let mut elem_offset = records.len() * WORD;
    for tuple in &tuples {
        out.extend_from_slice(&encode_word(elem_offset as u128));
        elem_offset += tuple.len();
    }
    for tuple in tuples {
        out.extend_from_slice(&tuple);
    }
    out
}
