//! In-memory ledger stand-in used by the service tests. Submits mutate the
//! mock ledger the way the real contract would, so the refresh-after-write
//! paths can be exercised end to end without a network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Notify;

use super::chain_gateway::{ChainGateway, GatewayError, ReceiptStatus, TxReceipt};
use crate::catalog::Catalog;
use crate::models::{Address, ZERO_ADDRESS};

pub const TEST_OWNER: &str = "0x1111111111111111111111111111111111111111";

#[derive(Default)]
pub struct MockLedger {
    pub user_characters: Vec<u64>,
    /// Characters known to the chain but absent from the catalog:
    /// id -> (name, ability).
    pub chain_only_characters: HashMap<u64, (String, String)>,
    /// id -> `getDeck` tuple, in creation order.
    pub decks: Vec<(u64, Value)>,
    /// id -> `getBattle` tuple, in creation order.
    pub battles: Vec<(u64, Value)>,
    pub next_id: u64,
}

pub struct MockGateway {
    pub ledger: Mutex<MockLedger>,
    pub submitted: Mutex<Vec<(String, Vec<Value>)>>,
    pub character_queries: AtomicUsize,
    pub signer_account: Option<Address>,
    /// When set, `submit` blocks until notified. Used by the single-flight
    /// tests to hold a write open.
    pub submit_gate: Option<Arc<Notify>>,
    /// Force `getDeck` to fail, to exercise the all-or-nothing refresh path.
    pub fail_deck_queries: bool,
    pub ready: bool,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            ledger: Mutex::new(MockLedger {
                next_id: 1,
                ..Default::default()
            }),
            submitted: Mutex::new(Vec::new()),
            character_queries: AtomicUsize::new(0),
            signer_account: Some(TEST_OWNER.to_string()),
            submit_gate: None,
            fail_deck_queries: false,
            ready: true,
        }
    }

    pub fn submitted_methods(&self) -> Vec<String> {
        self.submitted
            .lock()
            .unwrap()
            .iter()
            .map(|(method, _)| method.clone())
            .collect()
    }

    pub fn add_deck(&self, id: u64, owner: &str, name: &str, ids: &[u64], is_active: bool) {
        self.ledger
            .lock()
            .unwrap()
            .decks
            .push((id, json!([owner, name, ids, is_active])));
    }

    pub fn add_battle(&self, id: u64, player1: &str, player2: &str, deck1: u64) {
        self.ledger
            .lock()
            .unwrap()
            .battles
            .push((id, json!([player1, player2, deck1, 0, 0, ZERO_ADDRESS])));
    }

    fn apply_submit(&self, method: &str, args: &[Value]) -> Result<(), GatewayError> {
        let mut ledger = self.ledger.lock().unwrap();
        let signer = self.signer_account.clone().unwrap_or_default();
        match method {
            "mintCharacter" => {
                // The real contract assigns the id; the mock recovers it from
                // the catalog by name so scenario tests line up.
                let name = args[0].as_str().unwrap_or_default();
                let id = Catalog::all()
                    .iter()
                    .find(|def| def.name == name)
                    .map(|def| def.id)
                    .ok_or_else(|| {
                        GatewayError::RemoteRejected("unknown character".to_string())
                    })?;
                if ledger.user_characters.contains(&id) {
                    return Err(GatewayError::RemoteRejected(
                        "character already minted".to_string(),
                    ));
                }
                ledger.user_characters.push(id);
            }
            "createDeck" => {
                let name = args[0].as_str().unwrap_or_default().to_string();
                let ids = args[1].clone();
                let id = ledger.next_id;
                ledger.next_id += 1;
                ledger.decks.push((id, json!([signer, name, ids, true])));
            }
            "createBattle" => {
                let opponent = args[0].as_str().unwrap_or_default().to_string();
                let deck_id = args[1].as_u64().unwrap_or_default();
                let id = ledger.next_id;
                ledger.next_id += 1;
                ledger
                    .battles
                    .push((id, json!([signer, opponent, deck_id, 0, 0, ZERO_ADDRESS])));
            }
            "acceptBattle" => {
                let battle_id = args[0].as_u64().unwrap_or_default();
                let deck_id = args[1].as_u64().unwrap_or_default();
                let entry = ledger
                    .battles
                    .iter_mut()
                    .find(|(id, _)| *id == battle_id)
                    .ok_or_else(|| GatewayError::RemoteRejected("no such battle".to_string()))?;
                let fields = entry.1.as_array_mut().unwrap();
                fields[3] = json!(deck_id);
                fields[4] = json!(1);
            }
            "resolveBattle" => {
                let battle_id = args[0].as_u64().unwrap_or_default();
                let winner = args[1].as_str().unwrap_or_default().to_string();
                let entry = ledger
                    .battles
                    .iter_mut()
                    .find(|(id, _)| *id == battle_id)
                    .ok_or_else(|| GatewayError::RemoteRejected("no such battle".to_string()))?;
                let fields = entry.1.as_array_mut().unwrap();
                fields[4] = json!(2);
                fields[5] = json!(winner);
            }
            other => {
                return Err(GatewayError::RemoteRejected(format!(
                    "unknown method {}",
                    other
                )))
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ChainGateway for MockGateway {
    async fn query(&self, method: &str, args: Vec<Value>) -> Result<Value, GatewayError> {
        let ledger = self.ledger.lock().unwrap();
        match method {
            "getUserCharacters" => Ok(json!(ledger.user_characters)),
            "getCharacter" => {
                self.character_queries.fetch_add(1, Ordering::SeqCst);
                let id = args[0].as_u64().unwrap_or_default();
                match ledger.chain_only_characters.get(&id) {
                    Some((name, ability)) => Ok(json!([id, name, ability])),
                    None => Err(GatewayError::RemoteRejected(
                        "character does not exist".to_string(),
                    )),
                }
            }
            "getUserDecks" => Ok(json!(ledger
                .decks
                .iter()
                .map(|(id, _)| *id)
                .collect::<Vec<_>>())),
            "getDeck" => {
                if self.fail_deck_queries {
                    return Err(GatewayError::RemoteRejected(
                        "deck lookup failed".to_string(),
                    ));
                }
                let id = args[0].as_u64().unwrap_or_default();
                ledger
                    .decks
                    .iter()
                    .find(|(deck_id, _)| *deck_id == id)
                    .map(|(_, tuple)| tuple.clone())
                    .ok_or_else(|| GatewayError::RemoteRejected("no such deck".to_string()))
            }
            "getUserBattles" => Ok(json!(ledger
                .battles
                .iter()
                .map(|(id, _)| *id)
                .collect::<Vec<_>>())),
            "getBattle" => {
                let id = args[0].as_u64().unwrap_or_default();
                ledger
                    .battles
                    .iter()
                    .find(|(battle_id, _)| *battle_id == id)
                    .map(|(_, tuple)| tuple.clone())
                    .ok_or_else(|| GatewayError::RemoteRejected("no such battle".to_string()))
            }
            other => Err(GatewayError::RemoteRejected(format!(
                "unknown method {}",
                other
            ))),
        }
    }

    async fn submit(&self, method: &str, args: Vec<Value>) -> Result<TxReceipt, GatewayError> {
        if self.signer_account.is_none() {
            return Err(GatewayError::SigningUnavailable);
        }
        if let Some(gate) = &self.submit_gate {
            gate.notified().await;
        }

        self.submitted
            .lock()
            .unwrap()
            .push((method.to_string(), args.clone()));
        self.apply_submit(method, &args)?;

        Ok(TxReceipt {
            tx_hash: format!("0xmock{}", self.submitted.lock().unwrap().len()),
            status: ReceiptStatus::Confirmed,
            return_value: None,
        })
    }

    fn signer(&self) -> Option<Address> {
        self.signer_account.clone()
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}
