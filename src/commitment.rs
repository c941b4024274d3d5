//! Attribute and battle-stats commitments.
//!
//! A commitment is the keccak-256 digest of a plaintext value's decimal
//! string representation, submitted in place of the value itself. There is
//! no decryption path: the client computes and submits the hash and never
//! reveals the raw value on-chain. The battle stats commitment is a constant
//! placeholder, not derived from deck contents (see DESIGN.md).

use sha3::{Digest, Keccak256};

use crate::models::CharacterDefinition;

const BATTLE_STATS_PREIMAGE: &[u8] = b"battle-stats";

/// keccak-256 digest as a 0x-prefixed hex string.
pub fn keccak_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(Keccak256::digest(bytes)))
}

/// Commit a single numeric attribute.
pub fn attribute_commitment(value: u8) -> String {
    keccak_hex(value.to_string().as_bytes())
}

/// The three attribute commitments submitted by `mintCharacter`, in
/// (strength, intelligence, agility) order.
pub fn mint_commitments(definition: &CharacterDefinition) -> (String, String, String) {
    (
        attribute_commitment(definition.strength),
        attribute_commitment(definition.intelligence),
        attribute_commitment(definition.agility),
    )
}

/// Placeholder stats commitment submitted by `createBattle`/`acceptBattle`.
pub fn battle_stats_commitment() -> String {
    keccak_hex(BATTLE_STATS_PREIMAGE)
}
