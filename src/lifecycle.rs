//! Deck and battle lifecycle rules, checked before any submission.
//!
//! The ledger enforces only minimal constraints, so every violation that
//! reaches it wastes a paid round trip. These checks fail fast with
//! [`ClientError::Validation`] and never touch the network.

use std::collections::HashSet;

use crate::error::ClientError;
use crate::models::{
    Battle, BattleStatus, CharacterDefinition, CreateBattleRequest, CreateDeckRequest, Deck,
    OwnedCharacter, MAX_DECK_SIZE, MIN_DECK_SIZE,
};

/// Mint needs a non-empty definition and a connected identity. Minting an
/// already-minted id is allowed through here; the ledger rejects it as a
/// uniqueness violation.
pub fn validate_mint(
    definition: &CharacterDefinition,
    signer_attached: bool,
) -> Result<(), ClientError> {
    if definition.name.trim().is_empty() {
        return Err(ClientError::validation("character definition has no name"));
    }
    if !signer_attached {
        return Err(ClientError::validation(
            "connect a wallet before minting a character",
        ));
    }
    Ok(())
}

/// Deck preconditions: trimmed name non-empty, 1..=10 ids, ids unique, every
/// id owned by the submitter right now.
pub fn validate_create_deck(
    request: &CreateDeckRequest,
    owned: &[OwnedCharacter],
) -> Result<(), ClientError> {
    if request.name.trim().is_empty() {
        return Err(ClientError::validation("deck name must not be empty"));
    }
    let count = request.character_ids.len();
    if !(MIN_DECK_SIZE..=MAX_DECK_SIZE).contains(&count) {
        return Err(ClientError::Validation(format!(
            "deck must hold between {} and {} characters, got {}",
            MIN_DECK_SIZE, MAX_DECK_SIZE, count
        )));
    }

    let mut seen = HashSet::new();
    for &id in &request.character_ids {
        if !seen.insert(id) {
            return Err(ClientError::Validation(format!(
                "character {} appears more than once",
                id
            )));
        }
    }

    let owned_ids: HashSet<u64> = owned.iter().map(|c| c.id()).collect();
    for &id in &request.character_ids {
        if !owned_ids.contains(&id) {
            return Err(ClientError::Validation(format!(
                "character {} is not in your collection",
                id
            )));
        }
    }

    Ok(())
}

/// Battle creation preconditions: opponent present, a deck selected, and the
/// deck owned by the submitter and active. Returns the validated deck id.
pub fn validate_create_battle(
    request: &CreateBattleRequest,
    decks: &[Deck],
    submitter: &str,
) -> Result<u64, ClientError> {
    if request.opponent.trim().is_empty() {
        return Err(ClientError::validation("opponent address must not be empty"));
    }
    let deck_id = request
        .deck_id
        .ok_or_else(|| ClientError::validation("select a deck for the battle"))?;

    let deck = decks
        .iter()
        .find(|d| d.id == deck_id)
        .ok_or_else(|| ClientError::Validation(format!("deck {} not found", deck_id)))?;

    if deck.owner != submitter {
        return Err(ClientError::Validation(format!(
            "deck {} does not belong to you",
            deck_id
        )));
    }
    if !deck.is_active {
        return Err(ClientError::Validation(format!(
            "deck {} is not active",
            deck_id
        )));
    }

    Ok(deck_id)
}

/// Accepting requires a PENDING battle addressed to the acceptor and an
/// owned, active deck.
pub fn validate_accept_battle(
    battle: &Battle,
    acceptor: &str,
    deck_id: u64,
    decks: &[Deck],
) -> Result<(), ClientError> {
    if !battle.status.can_transition_to(&BattleStatus::Active) {
        return Err(ClientError::Validation(format!(
            "battle {} cannot be accepted in its current state",
            battle.id
        )));
    }
    if battle.player2 != acceptor {
        return Err(ClientError::Validation(format!(
            "battle {} is not addressed to you",
            battle.id
        )));
    }

    let deck = decks
        .iter()
        .find(|d| d.id == deck_id)
        .ok_or_else(|| ClientError::Validation(format!("deck {} not found", deck_id)))?;
    if deck.owner != acceptor {
        return Err(ClientError::Validation(format!(
            "deck {} does not belong to you",
            deck_id
        )));
    }
    if !deck.is_active {
        return Err(ClientError::Validation(format!(
            "deck {} is not active",
            deck_id
        )));
    }

    Ok(())
}

/// Resolution requires an ACTIVE battle and a winner who actually played in
/// it. Who may call the resolver is the ledger's policy, not checked here.
pub fn validate_resolve_battle(battle: &Battle, winner: &str) -> Result<(), ClientError> {
    if !battle.status.can_transition_to(&BattleStatus::Completed) {
        return Err(ClientError::Validation(format!(
            "battle {} cannot be resolved in its current state",
            battle.id
        )));
    }
    if winner != battle.player1 && winner != battle.player2 {
        return Err(ClientError::Validation(format!(
            "{} is not a player in battle {}",
            winner, battle.id
        )));
    }
    Ok(())
}
