//! Client-side synchronization and transaction-orchestration layer for the
//! card-battle ledger contract.
//!
//! The ledger is the sole source of truth for characters, decks, and
//! battles; this crate reconciles that state into local snapshots, enforces
//! deck and battle lifecycle rules before anything is submitted, and runs
//! each write as a single-flight validate -> submit -> confirm -> refresh
//! sequence. Presentation, wallet connection, and the contract itself are
//! external collaborators behind narrow interfaces.

pub mod catalog;
pub mod commitment;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod service;
pub mod store;
pub mod telemetry;

pub use catalog::Catalog;
pub use config::Config;
pub use error::ClientError;
pub use models::{
    Address, Battle, BattleStatus, CharacterDefinition, CreateBattleRequest, CreateDeckRequest,
    Deck, OwnedCharacter, ZERO_ADDRESS,
};
pub use service::{
    ChainGateway, EntityKind, EntitySync, GatewayError, LedgerGateway, TransactionOrchestrator,
    TxReceipt,
};
pub use store::{Action, Store, StoreState, ViewTab};
