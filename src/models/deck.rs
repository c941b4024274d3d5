use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{field_bool, field_str, field_u64_array, Address, DecodeError};

pub const MIN_DECK_SIZE: usize = 1;
pub const MAX_DECK_SIZE: usize = 10;

/// A deck as recorded on the ledger. Immutable in this client: there is no
/// edit or delete surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub id: u64,
    pub owner: Address,
    pub name: String,
    pub character_ids: Vec<u64>,
    pub is_active: bool,
}

impl Deck {
    /// Decode the `getDeck` tuple `(owner, name, characterIds[], isActive)`.
    pub fn from_tuple(id: u64, value: &serde_json::Value) -> Result<Self, DecodeError> {
        Ok(Self {
            id,
            owner: field_str(value, 0, "deck owner")?,
            name: field_str(value, 1, "deck name")?,
            character_ids: field_u64_array(value, 2, "deck character ids")?,
            is_active: field_bool(value, 3, "deck active flag")?,
        })
    }
}

/// Create Deck Request DTO
#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct CreateDeckRequest {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[validate(length(min = 1, max = 10))]
    pub character_ids: Vec<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tuple() {
        let tuple = serde_json::json!(["0xabc", "Vanguard", [0, 3, 7], true]);
        let deck = Deck::from_tuple(4, &tuple).unwrap();

        assert_eq!(deck.id, 4);
        assert_eq!(deck.owner, "0xabc");
        assert_eq!(deck.name, "Vanguard");
        assert_eq!(deck.character_ids, vec![0, 3, 7]);
        assert!(deck.is_active);
    }

    #[test]
    fn test_from_tuple_rejects_malformed() {
        // Wrong arity
        assert!(Deck::from_tuple(1, &serde_json::json!(["0xabc", "Vanguard"])).is_err());
        // Non-integer id inside the array
        assert!(Deck::from_tuple(1, &serde_json::json!(["0xabc", "V", ["x"], true])).is_err());
    }

    #[test]
    fn test_create_deck_request_validation() {
        let valid = CreateDeckRequest {
            name: "Squad".to_string(),
            character_ids: vec![1, 2, 3],
        };
        assert!(Validate::validate(&valid).is_ok());

        let empty_name = CreateDeckRequest {
            name: String::new(),
            character_ids: vec![1],
        };
        assert!(Validate::validate(&empty_name).is_err());

        let oversized = CreateDeckRequest {
            name: "Squad".to_string(),
            character_ids: (1..=11).collect(),
        };
        assert!(Validate::validate(&oversized).is_err());

        let empty_ids = CreateDeckRequest {
            name: "Squad".to_string(),
            character_ids: vec![],
        };
        assert!(Validate::validate(&empty_ids).is_err());
    }
}
