//! Argument clause parsing: comma-separated `<qty> <name>` lists.
//!
//! Parsing is all-or-nothing. The first bad entry rejects the whole clause and
//! nothing is handed to the world, so a rejected line never mutates state.

use crate::lexer::{trim, words};
use thiserror::Error;

/// A quantity of one named item, as written in a list clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack {
    pub quantity: u64,
    pub name: String,
}

impl Stack {
    pub fn new(quantity: u64, name: impl Into<String>) -> Self {
        Self {
            quantity,
            name: name.into(),
        }
    }
}

/// Why a line was rejected as invalid.
///
/// Never shown to the user (they only see `INVALID`), but logged at debug level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// The line matches none of the sentence templates.
    #[error("line matches no known sentence")]
    NoTemplate,
    /// A list entry is not exactly `<integer> <name>`.
    #[error("malformed list entry `{0}`")]
    MalformedEntry(String),
    /// A list entry carries zero or a negative number.
    #[error("quantity must be positive in `{0}`")]
    NonPositiveQuantity(String),
    /// A trade entry is not exactly `<integer> <monster> trophy`.
    #[error("malformed trophy entry `{0}`")]
    MalformedTrophy(String),
    /// A potion name with characters other than letters and single spaces.
    #[error("illegal potion name `{0}`")]
    IllegalPotionName(String),
    /// A monster or sign name spanning more than one word.
    #[error("expected a single word, got `{0}`")]
    ExpectedSingleWord(String),
    /// A trade without a ` for ` splitting valid trophy and ingredient clauses.
    #[error("trade has no valid `for` boundary")]
    MissingTradeBoundary,
    /// A query with nothing between the keyword and the question mark.
    #[error("missing name")]
    EmptyName,
}

fn parse_quantity(raw: &str, entry: &str) -> Result<u64, GrammarError> {
    let qty: i64 = raw
        .parse()
        .map_err(|_| GrammarError::MalformedEntry(entry.to_string()))?;
    if qty <= 0 {
        return Err(GrammarError::NonPositiveQuantity(entry.to_string()));
    }
    Ok(qty as u64)
}

/// Parses `"5 Rebis, 3 Vitriol"` into stacks, keeping input order.
///
/// Every entry must be exactly one integer and one name token. Quantities
/// must be positive. An empty clause or an empty entry (`"5 Rebis,"`) is
/// malformed.
pub fn parse_stack_list(clause: &str) -> Result<Vec<Stack>, GrammarError> {
    clause
        .split(',')
        .map(|raw| {
            let entry = trim(raw);
            let parts: Vec<&str> = words(entry).collect();
            match parts.as_slice() {
                [qty, name] => Ok(Stack::new(parse_quantity(qty, entry)?, *name)),
                _ => Err(GrammarError::MalformedEntry(entry.to_string())),
            }
        })
        .collect()
}

/// Parses `"2 Harpy trophy, 1 Wraith trophy"` into stacks keyed by monster.
///
/// The trailing word must be exactly `trophy` (case-sensitive).
pub fn parse_trophy_list(clause: &str) -> Result<Vec<Stack>, GrammarError> {
    clause
        .split(',')
        .map(|raw| {
            let entry = trim(raw);
            let parts: Vec<&str> = words(entry).collect();
            match parts.as_slice() {
                [qty, monster, "trophy"] => Ok(Stack::new(parse_quantity(qty, entry)?, *monster)),
                _ => Err(GrammarError::MalformedTrophy(entry.to_string())),
            }
        })
        .collect()
}

/// Sums quantities of repeated names, keeping first-seen order.
///
/// Used for availability checks so `1 A, 2 A` requires three `A`.
pub fn aggregate(stacks: &[Stack]) -> Vec<Stack> {
    let mut out: Vec<Stack> = Vec::with_capacity(stacks.len());
    for stack in stacks {
        match out.iter_mut().find(|s| s.name == stack.name) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(stack.quantity),
            None => out.push(stack.clone()),
        }
    }
    out
}
