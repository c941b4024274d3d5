// Service layer: gateway, sync, and write orchestration
pub mod chain_gateway;
pub mod entity_sync;
pub mod orchestrator;

#[cfg(test)]
pub mod mock_gateway;

pub use chain_gateway::{ChainGateway, GatewayError, LedgerGateway, ReceiptStatus, TxReceipt};
pub use entity_sync::{EntityKind, EntitySync};
pub use orchestrator::TransactionOrchestrator;
