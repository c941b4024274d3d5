use std::sync::OnceLock;

use crate::models::CharacterDefinition;

// Static character catalog. The ledger only stores id/name/ability plus
// attribute commitments; the plaintext attributes live here. Every minted
// character id maps to exactly one definition.

#[rustfmt::skip]
const DEFINITIONS: &[(u64, &str, &str, u8, u8, u8)] = &[
    (0,  "Warrior",      "Double Strike",    90, 40, 50),
    (1,  "Mage",         "Fireball",         30, 95, 45),
    (2,  "Rogue",        "Stealth Attack",   50, 60, 90),
    (3,  "Paladin",      "Divine Shield",    85, 70, 40),
    (4,  "Assassin",     "Critical Hit",     70, 55, 85),
    (5,  "Necromancer",  "Life Drain",       40, 90, 50),
    (6,  "Archer",       "Piercing Shot",    60, 50, 85),
    (7,  "Berserker",    "Rage",             95, 25, 60),
    (8,  "Druid",        "Nature's Call",    55, 80, 65),
    (9,  "Monk",         "Stunning Fist",    65, 70, 80),
    (10, "Warlock",      "Dark Pact",        45, 85, 55),
    (11, "Ranger",       "Beast Companion",  70, 60, 75),
    (12, "Sorcerer",     "Arcane Blast",     35, 95, 50),
    (13, "Barbarian",    "Frenzy",           90, 30, 70),
    (14, "Cleric",       "Heal",             60, 75, 50),
    (15, "Bard",         "Inspiration",      50, 75, 70),
    (16, "Fighter",      "Second Wind",      85, 45, 60),
    (17, "Wizard",       "Spell Mastery",    30, 100, 45),
    (18, "Ninja",        "Shadow Step",      55, 65, 95),
    (19, "Knight",       "Charge",           80, 55, 55),
    (20, "Alchemist",    "Potion Mix",       40, 85, 60),
    (21, "Samurai",      "Iaijutsu",         75, 65, 75),
    (22, "Enchanter",    "Mind Control",     35, 90, 55),
    (23, "Valkyrie",     "Valkyrie Strike",  80, 60, 70),
    (24, "Demon Hunter", "Demon Slayer",     75, 70, 80),
    (25, "Templar",      "Smite",            85, 65, 50),
    (26, "Shadowmancer", "Shadow Bind",      50, 80, 75),
    (27, "Gladiator",    "Victory Roar",     88, 40, 65),
    (28, "Elementalist", "Elemental Fury",   45, 88, 58),
    (29, "Dragoon",      "Jump",             78, 50, 85),
    (30, "Inquisitor",   "Purge",            72, 75, 62),
    (31, "Summoner",     "Summon Creature",  38, 92, 52),
    (32, "Shaman",       "Totem Power",      58, 82, 68),
    (33, "Crusader",     "Holy Strike",      82, 68, 55),
    (34, "Spellblade",   "Spell Strike",     65, 78, 72),
    (35, "Beastmaster",  "Wild Companion",   68, 62, 82),
    (36, "Chronomancer", "Time Warp",        42, 88, 65),
    (37, "Reaper",       "Soul Harvest",     72, 75, 78),
    (38, "Guardian",     "Protect",          88, 55, 48),
    (39, "Phantom",      "Ghost Strike",     58, 72, 92),
];

fn table() -> &'static Vec<CharacterDefinition> {
    static TABLE: OnceLock<Vec<CharacterDefinition>> = OnceLock::new();
    TABLE.get_or_init(|| {
        DEFINITIONS
            .iter()
            .map(
                |&(id, name, ability, strength, intelligence, agility)| CharacterDefinition {
                    id,
                    name: name.to_string(),
                    ability: ability.to_string(),
                    strength,
                    intelligence,
                    agility,
                },
            )
            .collect()
    })
}

pub struct Catalog;

impl Catalog {
    /// Look up a pre-defined character template by id.
    pub fn get(id: u64) -> Option<&'static CharacterDefinition> {
        table().iter().find(|def| def.id == id)
    }

    pub fn contains(id: u64) -> bool {
        Self::get(id).is_some()
    }

    pub fn all() -> &'static [CharacterDefinition] {
        table()
    }

    pub fn len() -> usize {
        DEFINITIONS.len()
    }
}
