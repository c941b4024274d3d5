use serde::{Deserialize, Serialize};

use super::{field_str, field_u64, Address, DecodeError};

/// Attribute value used for characters resolved from the ledger instead of
/// the catalog: the ledger only stores commitments, never the plaintext.
pub const UNKNOWN_ATTRIBUTE: u8 = 50;

/// An immutable character template. Catalog-sourced; the ledger stores only
/// id, name, ability and opaque attribute commitments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDefinition {
    pub id: u64,
    pub name: String,
    pub ability: String,
    pub strength: u8,
    pub intelligence: u8,
    pub agility: u8,
}

impl CharacterDefinition {
    /// Decode the `getCharacter` tuple `(id, name, ability)`.
    ///
    /// Attributes are not recoverable from the ledger, so they come back as
    /// [`UNKNOWN_ATTRIBUTE`]. Only reached for ids missing from the catalog.
    pub fn from_chain_tuple(value: &serde_json::Value) -> Result<Self, DecodeError> {
        Ok(Self {
            id: field_u64(value, 0, "character id")?,
            name: field_str(value, 1, "character name")?,
            ability: field_str(value, 2, "character ability")?,
            strength: UNKNOWN_ATTRIBUTE,
            intelligence: UNKNOWN_ATTRIBUTE,
            agility: UNKNOWN_ATTRIBUTE,
        })
    }
}

/// A character definition bound to an owner once minted. Never mutated and
/// never destroyed; there is no burn operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedCharacter {
    pub owner: Address,
    #[serde(flatten)]
    pub definition: CharacterDefinition,
}

impl OwnedCharacter {
    pub fn id(&self) -> u64 {
        self.definition.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_chain_tuple() {
        let tuple = serde_json::json!([7, "Berserker", "Rage"]);
        let def = CharacterDefinition::from_chain_tuple(&tuple).unwrap();

        assert_eq!(def.id, 7);
        assert_eq!(def.name, "Berserker");
        assert_eq!(def.ability, "Rage");
        assert_eq!(def.strength, UNKNOWN_ATTRIBUTE);
        assert_eq!(def.intelligence, UNKNOWN_ATTRIBUTE);
        assert_eq!(def.agility, UNKNOWN_ATTRIBUTE);
    }

    #[test]
    fn test_from_chain_tuple_rejects_malformed() {
        assert!(CharacterDefinition::from_chain_tuple(&serde_json::json!([7])).is_err());
        assert!(CharacterDefinition::from_chain_tuple(&serde_json::json!("not a tuple")).is_err());
        assert!(CharacterDefinition::from_chain_tuple(&serde_json::json!([7, 42, "Rage"])).is_err());
    }
}
