//! Read-only sentences: `Total ...?` and `What is ...?`.

use crate::command::{Template, group};
use crate::format::{formula_listing, name_listing, stock_listing};
use crate::lexer::strip_question_mark_and_trim;
use crate::parser::GrammarError;
use crate::world::World;
use regex::Captures;

/// Name between a query keyword and its question mark.
fn queried_name(caps: &Captures<'_>) -> Result<String, GrammarError> {
    match strip_question_mark_and_trim(group(caps, 1)) {
        "" => Err(GrammarError::EmptyName),
        name => Ok(name.to_string()),
    }
}

/// `Total ingredient?`
pub struct TotalIngredients;

impl Template for TotalIngredients {
    const NAME: &'static str = "total-ingredients";
    const PATTERN: &'static str = r"^Total ingredient\?$";

    fn from_captures(_caps: &Captures<'_>) -> Result<Self, GrammarError> {
        Ok(Self)
    }

    fn execute(self, world: &mut World) -> String {
        stock_listing(world.ingredients.in_stock())
    }
}

/// `Total potion?`
pub struct TotalPotions;

impl Template for TotalPotions {
    const NAME: &'static str = "total-potions";
    const PATTERN: &'static str = r"^Total potion\?$";

    fn from_captures(_caps: &Captures<'_>) -> Result<Self, GrammarError> {
        Ok(Self)
    }

    fn execute(self, world: &mut World) -> String {
        stock_listing(world.potions.in_stock())
    }
}

/// `Total trophy?`
pub struct TotalTrophies;

impl Template for TotalTrophies {
    const NAME: &'static str = "total-trophies";
    const PATTERN: &'static str = r"^Total trophy\?$";

    fn from_captures(_caps: &Captures<'_>) -> Result<Self, GrammarError> {
        Ok(Self)
    }

    fn execute(self, world: &mut World) -> String {
        stock_listing(world.trophies.in_stock())
    }
}

/// `Total potion Swallow?`
pub struct TotalPotion {
    pub potion: String,
}

impl Template for TotalPotion {
    const NAME: &'static str = "total-potion";
    const PATTERN: &'static str = r"^Total potion (.*)$";

    fn from_captures(caps: &Captures<'_>) -> Result<Self, GrammarError> {
        Ok(Self {
            potion: queried_name(caps)?,
        })
    }

    fn execute(self, world: &mut World) -> String {
        world.get_potion(&self.potion).to_string()
    }
}

/// `Total trophy Harpy?`
pub struct TotalTrophy {
    pub monster: String,
}

impl Template for TotalTrophy {
    const NAME: &'static str = "total-trophy";
    const PATTERN: &'static str = r"^Total trophy (.*)$";

    fn from_captures(caps: &Captures<'_>) -> Result<Self, GrammarError> {
        Ok(Self {
            monster: queried_name(caps)?,
        })
    }

    fn execute(self, world: &mut World) -> String {
        world.get_trophy(&self.monster).to_string()
    }
}

/// `What is in Swallow?`
pub struct WhatIsIn {
    pub potion: String,
}

impl Template for WhatIsIn {
    const NAME: &'static str = "what-is-in";
    const PATTERN: &'static str = r"^What is in (.*)$";

    fn from_captures(caps: &Captures<'_>) -> Result<Self, GrammarError> {
        Ok(Self {
            potion: queried_name(caps)?,
        })
    }

    fn execute(self, world: &mut World) -> String {
        match world.find_formula(&self.potion) {
            Some(formula) => formula_listing(formula),
            None => format!("No formula for {}", self.potion),
        }
    }
}

/// `What is effective against Harpy?`
pub struct WhatIsEffective {
    pub monster: String,
}

impl Template for WhatIsEffective {
    const NAME: &'static str = "what-is-effective";
    const PATTERN: &'static str = r"^What is effective against (.*)$";

    fn from_captures(caps: &Captures<'_>) -> Result<Self, GrammarError> {
        Ok(Self {
            monster: queried_name(caps)?,
        })
    }

    fn execute(self, world: &mut World) -> String {
        match world.find_bestiary(&self.monster) {
            Some(entry) if !entry.is_empty() => {
                name_listing(entry.potions.iter().chain(entry.signs.iter()))
            }
            _ => format!("No knowledge of {}", self.monster),
        }
    }
}
