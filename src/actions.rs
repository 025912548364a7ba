//! Sentences that change the world: `Geralt loots`, `learns`, `brews`,
//! `encounters` and `trades`.

use crate::command::{Template, group};
use crate::lexer::{is_space, is_valid_potion_name, single_word, trim};
use crate::parser::{GrammarError, Stack, aggregate, parse_stack_list, parse_trophy_list};
use crate::world::{CounterKind, Learned, World};
use regex::Captures;

/// Potion name sitting in front of a keyword phrase, e.g. `Black Blood ` in
/// `Black Blood potion consists of`. The phrase must be preceded by whitespace.
fn potion_before_keyword(raw: &str) -> Result<&str, GrammarError> {
    let name = trim(raw);
    if !raw.ends_with(is_space) || !is_valid_potion_name(name) {
        return Err(GrammarError::IllegalPotionName(raw.to_string()));
    }
    Ok(name)
}

fn word_before_keyword(raw: &str) -> Result<&str, GrammarError> {
    match single_word(raw) {
        Some(word) if raw.ends_with(is_space) => Ok(word),
        _ => Err(GrammarError::ExpectedSingleWord(raw.to_string())),
    }
}

fn word_after_keyword(raw: &str) -> Result<&str, GrammarError> {
    match single_word(raw) {
        Some(word) if raw.starts_with(is_space) => Ok(word),
        _ => Err(GrammarError::ExpectedSingleWord(raw.to_string())),
    }
}

fn learned_message(learned: Learned, monster: &str) -> String {
    match learned {
        Learned::NewEntry => format!("New bestiary entry added: {monster}"),
        Learned::Updated => format!("Bestiary entry updated: {monster}"),
        Learned::AlreadyKnown => "Already known effectiveness".to_string(),
    }
}

/// `Geralt loots 5 Rebis, 3 Vitriol`
pub struct Loot {
    pub ingredients: Vec<Stack>,
}

impl Template for Loot {
    const NAME: &'static str = "loot";
    const PATTERN: &'static str = r"^Geralt loots (.+)$";

    fn from_captures(caps: &Captures<'_>) -> Result<Self, GrammarError> {
        Ok(Self {
            ingredients: parse_stack_list(group(caps, 1))?,
        })
    }

    fn execute(self, world: &mut World) -> String {
        for stack in &self.ingredients {
            world.add_ingredient(&stack.name, stack.quantity);
        }
        "Alchemy ingredients obtained".to_string()
    }
}

/// `Geralt learns Swallow potion consists of 3 Rebis, 1 Vitriol`
///
/// Any `learns` line mentioning `potion consists of` belongs here, even if the
/// rest of it would fit another `learns` form.
pub struct LearnFormula {
    pub potion: String,
    pub ingredients: Vec<Stack>,
}

impl Template for LearnFormula {
    const NAME: &'static str = "learn-formula";
    const PATTERN: &'static str = r"^Geralt learns (.*?)potion consists of(.*)$";

    fn from_captures(caps: &Captures<'_>) -> Result<Self, GrammarError> {
        let potion = potion_before_keyword(group(caps, 1))?;
        let list = group(caps, 2);
        if !list.starts_with(is_space) {
            return Err(GrammarError::MalformedEntry(list.to_string()));
        }
        Ok(Self {
            potion: potion.to_string(),
            ingredients: parse_stack_list(list)?,
        })
    }

    fn execute(self, world: &mut World) -> String {
        if world.add_formula(&self.potion, self.ingredients) {
            format!("New alchemy formula obtained: {}", self.potion)
        } else {
            "Already known formula".to_string()
        }
    }
}

/// `Geralt learns Igni sign is effective against Harpy`
pub struct LearnSign {
    pub sign: String,
    pub monster: String,
}

impl Template for LearnSign {
    const NAME: &'static str = "learn-sign";
    const PATTERN: &'static str = r"^Geralt learns (.*?)sign is effective against(.*)$";

    fn from_captures(caps: &Captures<'_>) -> Result<Self, GrammarError> {
        Ok(Self {
            sign: word_before_keyword(group(caps, 1))?.to_string(),
            monster: word_after_keyword(group(caps, 2))?.to_string(),
        })
    }

    fn execute(self, world: &mut World) -> String {
        let learned = world.add_effectiveness(&self.monster, CounterKind::Sign, &self.sign);
        learned_message(learned, &self.monster)
    }
}

/// `Geralt learns Black Blood potion is effective against Vampire`
pub struct LearnPotion {
    pub potion: String,
    pub monster: String,
}

impl Template for LearnPotion {
    const NAME: &'static str = "learn-potion";
    const PATTERN: &'static str = r"^Geralt learns (.*?)potion is effective against(.*)$";

    fn from_captures(caps: &Captures<'_>) -> Result<Self, GrammarError> {
        Ok(Self {
            potion: potion_before_keyword(group(caps, 1))?.to_string(),
            monster: word_after_keyword(group(caps, 2))?.to_string(),
        })
    }

    fn execute(self, world: &mut World) -> String {
        let learned = world.add_effectiveness(&self.monster, CounterKind::Potion, &self.potion);
        learned_message(learned, &self.monster)
    }
}

/// `Geralt brews Swallow`
pub struct Brew {
    pub potion: String,
}

impl Template for Brew {
    const NAME: &'static str = "brew";
    const PATTERN: &'static str = r"^Geralt brews (.+)$";

    fn from_captures(caps: &Captures<'_>) -> Result<Self, GrammarError> {
        match trim(group(caps, 1)) {
            "" => Err(GrammarError::EmptyName),
            potion => Ok(Self {
                potion: potion.to_string(),
            }),
        }
    }

    fn execute(self, world: &mut World) -> String {
        let Some(formula) = world.find_formula(&self.potion) else {
            return format!("No formula for {}", self.potion);
        };
        let required = aggregate(formula);
        if !world.ingredients.covers(&required) {
            return "Not enough ingredients".to_string();
        }
        for stack in &required {
            world.subtract_ingredient(&stack.name, stack.quantity);
        }
        world.add_potion(&self.potion, 1);
        format!("Alchemy item created: {}", self.potion)
    }
}

/// `Geralt encounters a Harpy`
pub struct Encounter {
    pub monster: String,
}

impl Template for Encounter {
    const NAME: &'static str = "encounter";
    const PATTERN: &'static str = r"^Geralt encounters a (.+)$";

    fn from_captures(caps: &Captures<'_>) -> Result<Self, GrammarError> {
        let raw = group(caps, 1);
        let monster =
            single_word(raw).ok_or_else(|| GrammarError::ExpectedSingleWord(raw.to_string()))?;
        Ok(Self {
            monster: monster.to_string(),
        })
    }

    fn execute(self, world: &mut World) -> String {
        let potions: Vec<String> = match world.find_bestiary(&self.monster) {
            Some(entry) if !entry.is_empty() => entry.potions.iter().cloned().collect(),
            _ => return "Geralt is unprepared and barely escapes with his life".to_string(),
        };
        // Out-of-stock counters are simply not drunk.
        for potion in &potions {
            world.use_potion(potion);
        }
        world.add_trophy(&self.monster, 1);
        format!("Geralt defeats {}", self.monster)
    }
}

/// `Geralt trades 2 Harpy trophy, 1 Wraith trophy for 4 Rebis, 2 Vitriol`
pub struct Trade {
    pub trophies: Vec<Stack>,
    pub ingredients: Vec<Stack>,
}

impl Trade {
    /// Splits at the first ` for ` whose left side is a valid trophy list.
    ///
    /// A plain first-match split would break on a monster called `for`.
    fn split_clauses(clause: &str) -> Result<(Vec<Stack>, Vec<Stack>), GrammarError> {
        let mut last_err = GrammarError::MissingTradeBoundary;
        for (idx, sep) in clause.match_indices(" for ") {
            match parse_trophy_list(&clause[..idx]) {
                Ok(trophies) => {
                    let ingredients = parse_stack_list(&clause[idx + sep.len()..])?;
                    return Ok((trophies, ingredients));
                }
                Err(e) => last_err = e,
            }
        }
        Err(last_err)
    }
}

impl Template for Trade {
    const NAME: &'static str = "trade";
    const PATTERN: &'static str = r"^Geralt trades (.+)$";

    fn from_captures(caps: &Captures<'_>) -> Result<Self, GrammarError> {
        let (trophies, ingredients) = Self::split_clauses(group(caps, 1))?;
        Ok(Self {
            trophies,
            ingredients,
        })
    }

    fn execute(self, world: &mut World) -> String {
        let required = aggregate(&self.trophies);
        if !world.trophies.covers(&required) {
            return "Not enough trophies".to_string();
        }
        for stack in &required {
            world.subtract_trophy(&stack.name, stack.quantity);
        }
        for stack in &self.ingredients {
            world.add_ingredient(&stack.name, stack.quantity);
        }
        "Trade successful".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Factory;
    use crate::command::{CommandFactory, ExecutableCommand};

    fn run<T: Template + 'static>(
        world: &mut World,
        line: &str,
    ) -> Option<Result<String, GrammarError>> {
        let factory = Factory::<T>::new().unwrap();
        factory
            .try_create(line)
            .map(|res| res.map(|cmd| ExecutableCommand::execute(cmd, world)))
    }

    #[test]
    fn test_loot_adds_ingredients() {
        let mut world = World::new();
        let out = run::<Loot>(&mut world, "Geralt loots 5 Rebis, 3 Vitriol");
        assert_eq!(out, Some(Ok("Alchemy ingredients obtained".to_string())));
        assert_eq!(world.get_ingredient("Rebis"), 5);
        assert_eq!(world.get_ingredient("Vitriol"), 3);
    }

    #[test]
    fn test_loot_bad_list_is_rejected_before_mutation() {
        let mut world = World::new();
        let out = run::<Loot>(&mut world, "Geralt loots 5 Rebis, -1 Vitriol");
        assert!(matches!(out, Some(Err(_))));
        assert_eq!(world.get_ingredient("Rebis"), 0);
    }

    #[test]
    fn test_learn_formula_name_rules() {
        let mut world = World::new();
        assert_eq!(
            run::<LearnFormula>(&mut world, "Geralt learns Black Blood potion consists of 3 Vitriol"),
            Some(Ok("New alchemy formula obtained: Black Blood".to_string()))
        );
        assert!(matches!(
            run::<LearnFormula>(&mut world, "Geralt learns 123 potion consists of 1 A"),
            Some(Err(GrammarError::IllegalPotionName(_)))
        ));
        assert!(matches!(
            run::<LearnFormula>(&mut world, "Geralt learns Swallowpotion consists of 1 A"),
            Some(Err(GrammarError::IllegalPotionName(_)))
        ));
        assert!(matches!(
            run::<LearnFormula>(&mut world, "Geralt learns potion consists of 1 A"),
            Some(Err(GrammarError::IllegalPotionName(_)))
        ));
    }

    #[test]
    fn test_learn_formula_twice_keeps_first() {
        let mut world = World::new();
        run::<LearnFormula>(&mut world, "Geralt learns Swallow potion consists of 2 Rebis");
        assert_eq!(
            run::<LearnFormula>(&mut world, "Geralt learns Swallow potion consists of 7 Aether"),
            Some(Ok("Already known formula".to_string()))
        );
        assert_eq!(world.find_formula("Swallow"), Some(&[Stack::new(2, "Rebis")][..]));
    }

    #[test]
    fn test_learn_sign_and_potion() {
        let mut world = World::new();
        assert_eq!(
            run::<LearnSign>(&mut world, "Geralt learns Igni sign is effective against Harpy"),
            Some(Ok("New bestiary entry added: Harpy".to_string()))
        );
        assert_eq!(
            run::<LearnPotion>(&mut world, "Geralt learns Swallow potion is effective against Harpy"),
            Some(Ok("Bestiary entry updated: Harpy".to_string()))
        );
        assert_eq!(
            run::<LearnSign>(&mut world, "Geralt learns Igni sign is effective against Harpy"),
            Some(Ok("Already known effectiveness".to_string()))
        );
        assert!(matches!(
            run::<LearnSign>(&mut world, "Geralt learns Igni Quen sign is effective against Harpy"),
            Some(Err(_))
        ));
        assert!(matches!(
            run::<LearnSign>(&mut world, "Geralt learns Igni sign is effective against"),
            Some(Err(_))
        ));
        assert!(matches!(
            run::<LearnPotion>(&mut world, "Geralt learns Sw4llow potion is effective against Harpy"),
            Some(Err(GrammarError::IllegalPotionName(_)))
        ));
    }

    #[test]
    fn test_brew_is_all_or_nothing() {
        let mut world = World::new();
        world.add_formula("Swallow", vec![Stack::new(2, "Rebis"), Stack::new(1, "Vitriol")]);
        world.add_ingredient("Rebis", 5);

        assert_eq!(
            run::<Brew>(&mut world, "Geralt brews Swallow"),
            Some(Ok("Not enough ingredients".to_string()))
        );
        assert_eq!(world.get_ingredient("Rebis"), 5);
        assert_eq!(world.get_potion("Swallow"), 0);

        world.add_ingredient("Vitriol", 1);
        assert_eq!(
            run::<Brew>(&mut world, "Geralt brews Swallow"),
            Some(Ok("Alchemy item created: Swallow".to_string()))
        );
        assert_eq!(world.get_ingredient("Rebis"), 3);
        assert_eq!(world.get_ingredient("Vitriol"), 0);
        assert_eq!(world.get_potion("Swallow"), 1);
    }

    #[test]
    fn test_brew_counts_repeated_ingredients() {
        let mut world = World::new();
        world.add_formula("Cat", vec![Stack::new(1, "A"), Stack::new(2, "A")]);
        world.add_ingredient("A", 2);
        assert_eq!(
            run::<Brew>(&mut world, "Geralt brews Cat"),
            Some(Ok("Not enough ingredients".to_string()))
        );
        assert_eq!(world.get_ingredient("A"), 2);
    }

    #[test]
    fn test_brew_without_formula() {
        let mut world = World::new();
        assert_eq!(
            run::<Brew>(&mut world, "Geralt brews Thunderbolt"),
            Some(Ok("No formula for Thunderbolt".to_string()))
        );
    }

    #[test]
    fn test_encounter_consumes_counters_in_stock() {
        let mut world = World::new();
        world.add_effectiveness("Harpy", CounterKind::Potion, "Swallow");
        world.add_effectiveness("Harpy", CounterKind::Potion, "Thunderbolt");
        world.add_effectiveness("Harpy", CounterKind::Sign, "Igni");
        world.add_potion("Swallow", 2);

        assert_eq!(
            run::<Encounter>(&mut world, "Geralt encounters a Harpy"),
            Some(Ok("Geralt defeats Harpy".to_string()))
        );
        assert_eq!(world.get_potion("Swallow"), 1);
        assert_eq!(world.get_potion("Thunderbolt"), 0);
        assert_eq!(world.get_trophy("Harpy"), 1);
    }

    #[test]
    fn test_encounter_unknown_monster() {
        let mut world = World::new();
        assert_eq!(
            run::<Encounter>(&mut world, "Geralt encounters a Wyvern"),
            Some(Ok("Geralt is unprepared and barely escapes with his life".to_string()))
        );
        assert_eq!(world.get_trophy("Wyvern"), 0);
        assert!(matches!(
            run::<Encounter>(&mut world, "Geralt encounters a Royal Wyvern"),
            Some(Err(GrammarError::ExpectedSingleWord(_)))
        ));
    }

    #[test]
    fn test_trade_checks_all_trophies_first() {
        let mut world = World::new();
        world.add_trophy("Harpy", 2);
        assert_eq!(
            run::<Trade>(&mut world, "Geralt trades 2 Harpy trophy, 1 Wraith trophy for 4 Rebis"),
            Some(Ok("Not enough trophies".to_string()))
        );
        assert_eq!(world.get_trophy("Harpy"), 2);
        assert_eq!(world.get_ingredient("Rebis"), 0);

        assert_eq!(
            run::<Trade>(&mut world, "Geralt trades 2 Harpy trophy for 4 Rebis, 1 Aether"),
            Some(Ok("Trade successful".to_string()))
        );
        assert_eq!(world.get_trophy("Harpy"), 0);
        assert_eq!(world.get_ingredient("Rebis"), 4);
        assert_eq!(world.get_ingredient("Aether"), 1);
    }

    #[test]
    fn test_trade_rejects_malformed_clauses() {
        let mut world = World::new();
        world.add_trophy("Harpy", 2);
        for line in [
            "Geralt trades 2 Harpy for 4 Rebis",
            "Geralt trades 2 Harpy Trophy for 4 Rebis",
            "Geralt trades 2 Harpy trophy 4 Rebis",
            "Geralt trades 2 Harpy trophy for 4 Rebis, x",
        ] {
            assert!(matches!(run::<Trade>(&mut world, line), Some(Err(_))), "{line}");
        }
        assert_eq!(world.get_trophy("Harpy"), 2);
        assert_eq!(world.get_ingredient("Rebis"), 0);
    }

    #[test]
    fn test_trade_monster_named_for() {
        let mut world = World::new();
        world.add_trophy("for", 1);
        assert_eq!(
            run::<Trade>(&mut world, "Geralt trades 1 for trophy for 2 Rebis"),
            Some(Ok("Trade successful".to_string()))
        );
        assert_eq!(world.get_trophy("for"), 0);
        assert_eq!(world.get_ingredient("Rebis"), 2);
    }

    #[test]
    fn test_trade_monster_named_trophy() {
        let mut world = World::new();
        world.add_trophy("trophy", 1);
        assert_eq!(
            run::<Trade>(&mut world, "Geralt trades 1 trophy trophy for 2 Rebis"),
            Some(Ok("Trade successful".to_string()))
        );
        assert_eq!(world.get_trophy("trophy"), 0);
        assert_eq!(world.get_ingredient("Rebis"), 2);
    }

    #[test]
    fn test_learn_formula_needs_space_before_list() {
        let mut world = World::new();
        assert!(matches!(
            run::<LearnFormula>(&mut world, "Geralt learns Swallow potion consists of5 Rebis"),
            Some(Err(GrammarError::MalformedEntry(_)))
        ));
        assert!(world.find_formula("Swallow").is_none());
    }
}
