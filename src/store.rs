//! Explicit state container for snapshots and form state.
//!
//! The store replaces framework-bound mutable UI state with a plain
//! snapshot-plus-actions container, so the sync and orchestration layers can
//! be tested without any UI harness. Snapshots are replaced wholesale, never
//! patched; per-kind `loaded` flags distinguish "not yet loaded" from
//! "confirmed empty".

use std::sync::RwLock;

use crate::models::{Battle, Deck, OwnedCharacter, MAX_DECK_SIZE};

/// Closed set of views the presentation layer can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewTab {
    #[default]
    Collection,
    Decks,
    Battles,
}

/// Draft state for the deck-creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckDraft {
    pub name: String,
    pub selected_ids: Vec<u64>,
}

/// Draft state for the battle-creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BattleForm {
    pub opponent: String,
    pub deck_id: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct StoreState {
    pub characters: Vec<OwnedCharacter>,
    pub decks: Vec<Deck>,
    pub battles: Vec<Battle>,
    pub characters_loaded: bool,
    pub decks_loaded: bool,
    pub battles_loaded: bool,
    pub deck_draft: DeckDraft,
    pub battle_form: BattleForm,
    pub active_tab: ViewTab,
}

/// State mutations. Everything the UI or the services do to local state goes
/// through one of these.
#[derive(Debug, Clone)]
pub enum Action {
    CharactersLoaded(Vec<OwnedCharacter>),
    DecksLoaded(Vec<Deck>),
    BattlesLoaded(Vec<Battle>),
    DeckDraftRenamed(String),
    /// Add the id when absent, remove it when present. Ignored beyond the
    /// 10-card ceiling.
    DeckDraftToggled(u64),
    DeckDraftCleared,
    BattleOpponentChanged(String),
    BattleDeckSelected(Option<u64>),
    BattleFormCleared,
    TabSelected(ViewTab),
}

#[derive(Default)]
pub struct Store {
    state: RwLock<StoreState>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&self, action: Action) {
        let mut state = self.state.write().expect("store lock poisoned");
        reduce(&mut state, action);
    }

    /// Cloned copy of the whole state.
    pub fn snapshot(&self) -> StoreState {
        self.state.read().expect("store lock poisoned").clone()
    }

    pub fn characters(&self) -> Vec<OwnedCharacter> {
        self.state
            .read()
            .expect("store lock poisoned")
            .characters
            .clone()
    }

    pub fn decks(&self) -> Vec<Deck> {
        self.state.read().expect("store lock poisoned").decks.clone()
    }

    pub fn battles(&self) -> Vec<Battle> {
        self.state
            .read()
            .expect("store lock poisoned")
            .battles
            .clone()
    }
}

fn reduce(state: &mut StoreState, action: Action) {
    match action {
        Action::CharactersLoaded(characters) => {
            state.characters = characters;
            state.characters_loaded = true;
        }
        Action::DecksLoaded(decks) => {
            state.decks = decks;
            state.decks_loaded = true;
        }
        Action::BattlesLoaded(battles) => {
            state.battles = battles;
            state.battles_loaded = true;
        }
        Action::DeckDraftRenamed(name) => {
            state.deck_draft.name = name;
        }
        Action::DeckDraftToggled(id) => {
            let selected = &mut state.deck_draft.selected_ids;
            if let Some(pos) = selected.iter().position(|&s| s == id) {
                selected.remove(pos);
            } else if selected.len() < MAX_DECK_SIZE {
                selected.push(id);
            }
        }
        Action::DeckDraftCleared => {
            state.deck_draft = DeckDraft::default();
        }
        Action::BattleOpponentChanged(opponent) => {
            state.battle_form.opponent = opponent;
        }
        Action::BattleDeckSelected(deck_id) => {
            state.battle_form.deck_id = deck_id;
        }
        Action::BattleFormCleared => {
            state.battle_form = BattleForm::default();
        }
        Action::TabSelected(tab) => {
            state.active_tab = tab;
        }
    }
}
