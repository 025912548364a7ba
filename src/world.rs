use crate::parser::Stack;
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Name-keyed item counts: ingredients, potions or trophies.
///
/// Entries that drop to zero stay in the table; listings skip them.
#[derive(Debug, Clone, Default)]
pub struct Stock {
    items: HashMap<String, u64>,
}

impl Stock {
    /// Adds `qty` to `name`, creating the entry if needed.
    pub(crate) fn add(&mut self, name: &str, qty: u64) {
        let slot = self.items.entry(name.to_string()).or_insert(0);
        *slot = slot.saturating_add(qty);
    }

    /// Current quantity, 0 when the name was never seen.
    pub fn get(&self, name: &str) -> u64 {
        self.items.get(name).copied().unwrap_or(0)
    }

    /// Takes `qty` away. Returns false and leaves the stock untouched when
    /// there is not enough.
    pub(crate) fn subtract(&mut self, name: &str, qty: u64) -> bool {
        match self.items.get_mut(name) {
            Some(have) if *have >= qty => {
                *have -= qty;
                true
            }
            _ => qty == 0,
        }
    }

    /// True when every stack can be taken at once.
    ///
    /// Repeated names must already be summed (see [`crate::parser::aggregate`]).
    pub fn covers(&self, stacks: &[Stack]) -> bool {
        stacks.iter().all(|s| self.get(&s.name) >= s.quantity)
    }

    /// All entries with a positive quantity, in no particular order.
    pub fn in_stock(&self) -> impl Iterator<Item = Stack> + '_ {
        self.items
            .iter()
            .filter(|(_, qty)| **qty > 0)
            .map(|(name, qty)| Stack::new(*qty, name.clone()))
    }
}

/// Which kind of counter a bestiary fact names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterKind {
    Potion,
    Sign,
}

/// What [`World::add_effectiveness`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Learned {
    /// The monster was unknown; an entry was created for it.
    NewEntry,
    /// A new fact was added to a known monster.
    Updated,
    /// The fact was already recorded. Nothing changed.
    AlreadyKnown,
}

/// Known counters for one monster.
#[derive(Debug, Clone, Default)]
pub struct BestiaryEntry {
    pub potions: HashSet<String>,
    pub signs: HashSet<String>,
}

impl BestiaryEntry {
    pub fn is_empty(&self) -> bool {
        self.potions.is_empty() && self.signs.is_empty()
    }

    fn set_mut(&mut self, kind: CounterKind) -> &mut HashSet<String> {
        match kind {
            CounterKind::Potion => &mut self.potions,
            CounterKind::Sign => &mut self.signs,
        }
    }
}

/// Everything Geralt carries and knows.
///
/// Created empty at startup and threaded through every command by the
/// [`crate::Interpreter`]. The stocks are public for reading; only this crate
/// can change them, through the methods below.
///
/// ```compile_fail
/// let mut world = witcher_tracker::World::new();
/// world.ingredients.add("Rebis", 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct World {
    pub ingredients: Stock,
    pub potions: Stock,
    pub trophies: Stock,
    formulas: HashMap<String, Vec<Stack>>,
    bestiary: HashMap<String, BestiaryEntry>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_ingredient(&mut self, name: &str, qty: u64) {
        trace!(name, qty, "ingredient added");
        self.ingredients.add(name, qty);
    }

    pub fn get_ingredient(&self, name: &str) -> u64 {
        self.ingredients.get(name)
    }

    pub fn subtract_ingredient(&mut self, name: &str, qty: u64) -> bool {
        self.ingredients.subtract(name, qty)
    }

    pub fn add_potion(&mut self, name: &str, qty: u64) {
        trace!(name, qty, "potion added");
        self.potions.add(name, qty);
    }

    pub fn get_potion(&self, name: &str) -> u64 {
        self.potions.get(name)
    }

    /// Drinks one dose if there is any. Returns whether a dose was used.
    pub fn use_potion(&mut self, name: &str) -> bool {
        self.potions.subtract(name, 1)
    }

    pub fn add_trophy(&mut self, monster: &str, qty: u64) {
        trace!(monster, qty, "trophy added");
        self.trophies.add(monster, qty);
    }

    pub fn get_trophy(&self, monster: &str) -> u64 {
        self.trophies.get(monster)
    }

    pub fn subtract_trophy(&mut self, monster: &str, qty: u64) -> bool {
        self.trophies.subtract(monster, qty)
    }

    pub fn find_formula(&self, potion: &str) -> Option<&[Stack]> {
        self.formulas.get(potion).map(Vec::as_slice)
    }

    /// Records a formula. Returns false, leaving the old one in place, when the
    /// potion already has one.
    pub fn add_formula(&mut self, potion: &str, ingredients: Vec<Stack>) -> bool {
        if self.formulas.contains_key(potion) {
            return false;
        }
        trace!(potion, count = ingredients.len(), "formula added");
        self.formulas.insert(potion.to_string(), ingredients);
        true
    }

    pub fn find_bestiary(&self, monster: &str) -> Option<&BestiaryEntry> {
        self.bestiary.get(monster)
    }

    pub fn add_effectiveness(&mut self, monster: &str, kind: CounterKind, name: &str) -> Learned {
        match self.bestiary.get_mut(monster) {
            None => {
                let mut entry = BestiaryEntry::default();
                entry.set_mut(kind).insert(name.to_string());
                self.bestiary.insert(monster.to_string(), entry);
                Learned::NewEntry
            }
            Some(entry) => {
                if entry.set_mut(kind).insert(name.to_string()) {
                    Learned::Updated
                } else {
                    Learned::AlreadyKnown
                }
            }
        }
    }
}
