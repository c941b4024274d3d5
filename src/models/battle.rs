use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{field_str, field_u64, is_zero_address, Address, DecodeError};

/// Battle State - represents the finite state machine states
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BattleStatus {
    Pending,
    Active,
    Completed,
}

impl BattleStatus {
    /// Decode the ledger's u8 status discriminant.
    pub fn from_u8(raw: u64) -> Result<Self, DecodeError> {
        match raw {
            0 => Ok(BattleStatus::Pending),
            1 => Ok(BattleStatus::Active),
            2 => Ok(BattleStatus::Completed),
            other => Err(DecodeError(format!("unknown battle status {}", other))),
        }
    }

    /// Check if transition to another state is valid. The machine is linear:
    /// PENDING -> ACTIVE -> COMPLETED, no back-transitions, no cancellation.
    pub fn can_transition_to(&self, to: &BattleStatus) -> bool {
        matches!(
            (self, to),
            (BattleStatus::Pending, BattleStatus::Active)
                | (BattleStatus::Active, BattleStatus::Completed)
        )
    }

    /// Get all valid next states from current state
    pub fn valid_next_states(&self) -> Vec<BattleStatus> {
        match self {
            BattleStatus::Pending => vec![BattleStatus::Active],
            BattleStatus::Active => vec![BattleStatus::Completed],
            BattleStatus::Completed => vec![], // Terminal state
        }
    }

    /// Check if state is terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, BattleStatus::Completed)
    }
}

/// A battle as recorded on the ledger. `winner` stays the zero address until
/// the battle reaches COMPLETED.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battle {
    pub id: u64,
    pub player1: Address,
    pub player2: Address,
    pub deck1_id: u64,
    pub deck2_id: u64,
    pub status: BattleStatus,
    pub winner: Address,
}

impl Battle {
    /// Decode the `getBattle` tuple
    /// `(player1, player2, deck1Id, deck2Id, status u8, winner)`.
    pub fn from_tuple(id: u64, value: &serde_json::Value) -> Result<Self, DecodeError> {
        Ok(Self {
            id,
            player1: field_str(value, 0, "battle player1")?,
            player2: field_str(value, 1, "battle player2")?,
            deck1_id: field_u64(value, 2, "battle deck1 id")?,
            deck2_id: field_u64(value, 3, "battle deck2 id")?,
            status: BattleStatus::from_u8(field_u64(value, 4, "battle status")?)?,
            winner: field_str(value, 5, "battle winner")?,
        })
    }

    pub fn has_winner(&self) -> bool {
        !is_zero_address(&self.winner)
    }
}

/// Create Battle Request DTO
#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct CreateBattleRequest {
    #[validate(length(min = 1))]
    pub opponent: String,
    pub deck_id: Option<u64>,
}
