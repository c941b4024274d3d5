use serde::Deserialize;
use std::env;

use crate::models::{is_zero_address, Address, ZERO_ADDRESS};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub network: NetworkConfig,
    pub contract: ContractConfig,
    pub signer: SignerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NetworkConfig {
    /// Read-only JSON-RPC endpoint used for view calls.
    pub read_rpc_url: String,
    /// Wallet-backed endpoint used for state-changing calls.
    pub signing_rpc_url: String,
    /// Chain id the client requires before submitting any write.
    pub chain_id: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContractConfig {
    pub address: Address,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SignerConfig {
    /// Connected account, if any. Absent until a wallet is attached.
    pub account: Option<Address>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let read_rpc_url =
            env::var("READ_RPC_URL").unwrap_or_else(|_| "https://rpc.sepolia.org".to_string());
        let signing_rpc_url = env::var("SIGNING_RPC_URL").unwrap_or_else(|_| read_rpc_url.clone());
        let chain_id: u64 = env::var("CHAIN_ID")
            .unwrap_or_else(|_| "11155111".to_string())
            .parse()?;
        // Placeholder address means "not yet deployed": sync and writes are
        // disabled rather than failing.
        let contract_address = env::var("GAME_CONTRACT_ADDRESS")
            .unwrap_or_else(|_| ZERO_ADDRESS.to_string())
            .trim()
            .to_string();
        let signer_account = env::var("SIGNER_ACCOUNT").ok();

        Ok(Config {
            network: NetworkConfig {
                read_rpc_url,
                signing_rpc_url,
                chain_id,
            },
            contract: ContractConfig {
                address: contract_address,
            },
            signer: SignerConfig {
                account: signer_account,
            },
        })
    }

    /// False when the contract address is missing or all-zero.
    pub fn is_deployed(&self) -> bool {
        !is_zero_address(&self.contract.address)
    }
}
