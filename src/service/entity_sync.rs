//! Entity Sync
//!
//! Reconciles authoritative on-chain state into local snapshots. A refresh
//! pulls the owner's id list for one entity kind, resolves every id
//! concurrently (catalog first for characters), and publishes the result as
//! a wholesale snapshot replacement. All-or-nothing: if any single id fails
//! to resolve, nothing is published and the previous snapshot stays visible.

use std::sync::Arc;

use futures::future::try_join_all;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::chain_gateway::ChainGateway;
use crate::catalog::Catalog;
use crate::error::ClientError;
use crate::models::{Battle, CharacterDefinition, Deck, OwnedCharacter};
use crate::store::{Action, Store};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Characters,
    Decks,
    Battles,
}

impl EntityKind {
    /// Ledger accessor returning the owner's id list for this kind.
    fn id_list_method(&self) -> &'static str {
        match self {
            EntityKind::Characters => "getUserCharacters",
            EntityKind::Decks => "getUserDecks",
            EntityKind::Battles => "getUserBattles",
        }
    }
}

pub struct EntitySync {
    gateway: Arc<dyn ChainGateway>,
    store: Arc<Store>,
}

impl EntitySync {
    pub fn new(gateway: Arc<dyn ChainGateway>, store: Arc<Store>) -> Self {
        Self { gateway, store }
    }

    /// Rebuild the snapshot for one entity kind from the ledger. A no-op
    /// while the contract is not yet deployed.
    pub async fn refresh(&self, owner: &str, kind: EntityKind) -> Result<(), ClientError> {
        if !self.gateway.is_ready() {
            debug!(owner = owner, "Contract not deployed; skipping refresh");
            return Ok(());
        }

        let ids = self.id_list(owner, kind).await?;
        debug!(owner = owner, kind = ?kind, count = ids.len(), "Resolving entity ids");

        match kind {
            EntityKind::Characters => {
                let characters = self.resolve_characters(owner, ids).await?;
                self.store.dispatch(Action::CharactersLoaded(characters));
            }
            EntityKind::Decks => {
                let decks = self.resolve_decks(ids).await?;
                self.store.dispatch(Action::DecksLoaded(decks));
            }
            EntityKind::Battles => {
                // The ledger returns creation order; the UI convention is
                // most-recent-first.
                let mut battles = self.resolve_battles(ids).await?;
                battles.reverse();
                self.store.dispatch(Action::BattlesLoaded(battles));
            }
        }

        info!(owner = owner, kind = ?kind, "Snapshot refreshed");
        Ok(())
    }

    /// Refresh all three kinds, as done after connecting a wallet.
    pub async fn refresh_all(&self, owner: &str) -> Result<(), ClientError> {
        self.refresh(owner, EntityKind::Characters).await?;
        self.refresh(owner, EntityKind::Decks).await?;
        self.refresh(owner, EntityKind::Battles).await?;
        Ok(())
    }

    async fn id_list(&self, owner: &str, kind: EntityKind) -> Result<Vec<u64>, ClientError> {
        let value = self
            .gateway
            .query(kind.id_list_method(), vec![json!(owner)])
            .await?;
        decode_id_list(&value)
    }

    /// Catalog hits never touch the network; only ids absent from the
    /// catalog fall through to a per-id ledger query.
    async fn resolve_characters(
        &self,
        owner: &str,
        ids: Vec<u64>,
    ) -> Result<Vec<OwnedCharacter>, ClientError> {
        let lookups = ids.into_iter().map(|id| {
            let gateway = Arc::clone(&self.gateway);
            let owner = owner.to_string();
            async move {
                if let Some(definition) = Catalog::get(id) {
                    return Ok(OwnedCharacter {
                        owner,
                        definition: definition.clone(),
                    });
                }
                let tuple = gateway
                    .query("getCharacter", vec![json!(id)])
                    .await
                    .map_err(|e| ClientError::resolution(e.to_string()))?;
                let definition = CharacterDefinition::from_chain_tuple(&tuple)
                    .map_err(|e| ClientError::resolution(e.to_string()))?;
                Ok::<_, ClientError>(OwnedCharacter { owner, definition })
            }
        });
        try_join_all(lookups).await
    }

    async fn resolve_decks(&self, ids: Vec<u64>) -> Result<Vec<Deck>, ClientError> {
        let lookups = ids.into_iter().map(|id| {
            let gateway = Arc::clone(&self.gateway);
            async move {
                let tuple = gateway
                    .query("getDeck", vec![json!(id)])
                    .await
                    .map_err(|e| ClientError::resolution(e.to_string()))?;
                Deck::from_tuple(id, &tuple).map_err(|e| ClientError::resolution(e.to_string()))
            }
        });
        try_join_all(lookups).await
    }

    async fn resolve_battles(&self, ids: Vec<u64>) -> Result<Vec<Battle>, ClientError> {
        let lookups = ids.into_iter().map(|id| {
            let gateway = Arc::clone(&self.gateway);
            async move {
                let tuple = gateway
                    .query("getBattle", vec![json!(id)])
                    .await
                    .map_err(|e| ClientError::resolution(e.to_string()))?;
                Battle::from_tuple(id, &tuple).map_err(|e| ClientError::resolution(e.to_string()))
            }
        });
        try_join_all(lookups).await
    }
}

fn decode_id_list(value: &Value) -> Result<Vec<u64>, ClientError> {
    value
        .as_array()
        .ok_or_else(|| ClientError::resolution("id list is not an array"))?
        .iter()
        .map(|v| {
            v.as_u64()
                .ok_or_else(|| ClientError::resolution("id list holds a non-integer"))
        })
        .collect()
}
