//! Transaction Orchestrator
//!
//! Runs every user-initiated write as one observable unit of work: lifecycle
//! validation, a single gateway submission, confirmation, then a targeted
//! snapshot refresh. Writes are strictly serialized behind a busy flag;
//! while one is in flight, further writes are rejected with `Busy` rather
//! than queued. Form state is cleared only on success so a failed action can
//! be retried without re-entry.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{error, info};
use validator::Validate;

use super::chain_gateway::{ChainGateway, GatewayError};
use super::entity_sync::{EntityKind, EntitySync};
use crate::commitment::{battle_stats_commitment, mint_commitments};
use crate::error::ClientError;
use crate::lifecycle;
use crate::models::{Address, CharacterDefinition, CreateBattleRequest, CreateDeckRequest};
use crate::store::{Action, Store};

pub struct TransactionOrchestrator {
    gateway: Arc<dyn ChainGateway>,
    sync: Arc<EntitySync>,
    store: Arc<Store>,
    busy: AtomicBool,
}

/// Clears the busy flag on every exit path.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl TransactionOrchestrator {
    pub fn new(gateway: Arc<dyn ChainGateway>, sync: Arc<EntitySync>, store: Arc<Store>) -> Self {
        Self {
            gateway,
            sync,
            store,
            busy: AtomicBool::new(false),
        }
    }

    /// True while a write is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Take the single-flight slot or reject immediately.
    fn begin(&self) -> Result<BusyGuard<'_>, ClientError> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| ClientError::Busy)?;
        let guard = BusyGuard(&self.busy);
        if !self.gateway.is_ready() {
            return Err(ClientError::validation(
                "ledger contract is not deployed yet",
            ));
        }
        Ok(guard)
    }

    fn signer(&self) -> Result<Address, ClientError> {
        self.gateway
            .signer()
            .ok_or(ClientError::Gateway(GatewayError::SigningUnavailable))
    }

    // =========================================================================
    // MINT
    // =========================================================================

    /// Mint a catalog character for the connected account. The attributes go
    /// on-chain only as commitments.
    pub async fn mint_character(
        &self,
        definition: &CharacterDefinition,
    ) -> Result<(), ClientError> {
        let _guard = self.begin()?;

        lifecycle::validate_mint(definition, self.gateway.signer().is_some())?;
        let owner = self.signer()?;

        info!(character = %definition.name, owner = %owner, "Minting character");

        let (str_hash, int_hash, agi_hash) = mint_commitments(definition);
        self.gateway
            .submit(
                "mintCharacter",
                vec![
                    serde_json::json!(definition.name),
                    serde_json::json!(definition.ability),
                    serde_json::json!(str_hash),
                    serde_json::json!(int_hash),
                    serde_json::json!(agi_hash),
                ],
            )
            .await
            .map_err(|e| {
                error!(error = %e, "Mint failed");
                e
            })?;

        self.sync.refresh(&owner, EntityKind::Characters).await?;
        info!(character = %definition.name, "Character minted");
        Ok(())
    }

    // =========================================================================
    // CREATE DECK
    // =========================================================================

    pub async fn create_deck(&self, request: CreateDeckRequest) -> Result<(), ClientError> {
        let _guard = self.begin()?;
        let owner = self.signer()?;

        request
            .validate()
            .map_err(|e| ClientError::Validation(e.to_string()))?;
        lifecycle::validate_create_deck(&request, &self.store.characters())?;

        let name = request.name.trim().to_string();
        info!(deck = %name, cards = request.character_ids.len(), "Creating deck");

        self.gateway
            .submit(
                "createDeck",
                vec![
                    serde_json::json!(name),
                    serde_json::json!(request.character_ids),
                ],
            )
            .await
            .map_err(|e| {
                error!(error = %e, "Deck creation failed");
                e
            })?;

        self.sync.refresh(&owner, EntityKind::Decks).await?;
        // Success: the draft is spent. On failure it stays for retry.
        self.store.dispatch(Action::DeckDraftCleared);
        info!(deck = %name, "Deck created");
        Ok(())
    }

    // =========================================================================
    // CREATE BATTLE
    // =========================================================================

    pub async fn create_battle(&self, request: CreateBattleRequest) -> Result<(), ClientError> {
        let _guard = self.begin()?;
        let owner = self.signer()?;

        request
            .validate()
            .map_err(|e| ClientError::Validation(e.to_string()))?;
        let deck_id = lifecycle::validate_create_battle(&request, &self.store.decks(), &owner)?;

        let opponent = request.opponent.trim().to_string();
        info!(opponent = %opponent, deck_id = deck_id, "Creating battle");

        self.gateway
            .submit(
                "createBattle",
                vec![
                    serde_json::json!(opponent),
                    serde_json::json!(deck_id),
                    serde_json::json!(battle_stats_commitment()),
                ],
            )
            .await
            .map_err(|e| {
                error!(error = %e, "Battle creation failed");
                e
            })?;

        self.sync.refresh(&owner, EntityKind::Battles).await?;
        self.store.dispatch(Action::BattleFormCleared);
        info!(opponent = %opponent, "Battle created, waiting for opponent");
        Ok(())
    }

    // =========================================================================
    // ACCEPT / RESOLVE
    // =========================================================================

    /// Accept a pending battle with one of the acceptor's decks
    /// (PENDING -> ACTIVE).
    pub async fn accept_battle(&self, battle_id: u64, deck_id: u64) -> Result<(), ClientError> {
        let _guard = self.begin()?;
        let owner = self.signer()?;

        let battles = self.store.battles();
        let battle = battles.iter().find(|b| b.id == battle_id).ok_or_else(|| {
            ClientError::Validation(format!("battle {} not found", battle_id))
        })?;
        lifecycle::validate_accept_battle(battle, &owner, deck_id, &self.store.decks())?;

        info!(battle_id = battle_id, deck_id = deck_id, "Accepting battle");

        self.gateway
            .submit(
                "acceptBattle",
                vec![
                    serde_json::json!(battle_id),
                    serde_json::json!(deck_id),
                    serde_json::json!(battle_stats_commitment()),
                ],
            )
            .await
            .map_err(|e| {
                error!(error = %e, "Battle accept failed");
                e
            })?;

        self.sync.refresh(&owner, EntityKind::Battles).await?;
        info!(battle_id = battle_id, "Battle accepted");
        Ok(())
    }

    /// Report a winner for an active battle (ACTIVE -> COMPLETED). The
    /// ledger decides who is allowed to call this.
    pub async fn resolve_battle(&self, battle_id: u64, winner: &str) -> Result<(), ClientError> {
        let _guard = self.begin()?;
        let owner = self.signer()?;

        let battles = self.store.battles();
        let battle = battles.iter().find(|b| b.id == battle_id).ok_or_else(|| {
            ClientError::Validation(format!("battle {} not found", battle_id))
        })?;
        lifecycle::validate_resolve_battle(battle, winner)?;

        info!(battle_id = battle_id, winner = %winner, "Resolving battle");

        self.gateway
            .submit(
                "resolveBattle",
                vec![serde_json::json!(battle_id), serde_json::json!(winner)],
            )
            .await
            .map_err(|e| {
                error!(error = %e, "Battle resolution failed");
                e
            })?;

        self.sync.refresh(&owner, EntityKind::Battles).await?;
        info!(battle_id = battle_id, "Battle resolved");
        Ok(())
    }
}
