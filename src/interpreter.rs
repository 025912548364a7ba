use crate::actions::{Brew, Encounter, LearnFormula, LearnPotion, LearnSign, Loot, Trade};
use crate::command::{CommandFactory, Factory, Outcome, Template};
use crate::editor::{LineSource, ReadResult};
use crate::lexer::trim;
use crate::parser::GrammarError;
use crate::queries::{
    TotalIngredients, TotalPotion, TotalPotions, TotalTrophies, TotalTrophy, WhatIsEffective,
    WhatIsIn,
};
use crate::world::World;
use anyhow::Result;
use std::io::Write;
use tracing::debug;

/// Printed before every line read.
pub const PROMPT: &str = ">> ";

/// The exact line that ends a session.
pub const EXIT_LINE: &str = "Exit";

fn factory<T: Template + 'static>() -> Result<Box<dyn CommandFactory>, regex::Error> {
    Ok(Box::new(Factory::<T>::new()?))
}

/// Line interpreter over a [`World`].
///
/// Holds an ordered list of [`CommandFactory`] objects. Each line is offered to
/// them in turn and the first one that recognizes its shape owns it.
///
/// Example
/// ```
/// use witcher_tracker::{Interpreter, Outcome};
/// let mut tracker = Interpreter::with_default_grammar().unwrap();
/// tracker.execute_line("Geralt loots 5 Rebis, 3 Vitriol");
/// assert_eq!(
///     tracker.execute_line("Total ingredient?"),
///     Outcome::Ok("5 Rebis, 3 Vitriol".to_string())
/// );
/// ```
pub struct Interpreter {
    world: World,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create an interpreter with a custom, ordered set of sentence factories.
    pub fn new(commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self {
            world: World::new(),
            commands,
        }
    }

    /// Create an interpreter that knows every built-in sentence, in priority order:
    /// - actions: loots, learns (formula, sign, potion), brews, encounters, trades
    /// - queries: totals, `What is in`, `What is effective against`
    pub fn with_default_grammar() -> Result<Self, regex::Error> {
        Ok(Self::new(vec![
            factory::<Loot>()?,
            factory::<LearnFormula>()?,
            factory::<LearnSign>()?,
            factory::<LearnPotion>()?,
            factory::<Brew>()?,
            factory::<Encounter>()?,
            factory::<Trade>()?,
            factory::<TotalIngredients>()?,
            factory::<TotalPotions>()?,
            factory::<TotalPotion>()?,
            factory::<TotalTrophies>()?,
            factory::<TotalTrophy>()?,
            factory::<WhatIsIn>()?,
            factory::<WhatIsEffective>()?,
        ]))
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Interpret one input line.
    ///
    /// A rejected line leaves the world untouched.
    pub fn execute_line(&mut self, line: &str) -> Outcome {
        let line = trim(line);
        for factory in &self.commands {
            match factory.try_create(line) {
                None => continue,
                Some(Ok(cmd)) => {
                    let msg = cmd.execute(&mut self.world);
                    debug!(template = factory.name(), %msg, "line executed");
                    return Outcome::Ok(msg);
                }
                Some(Err(err)) => {
                    debug!(template = factory.name(), %err, line, "line rejected");
                    return Outcome::Invalid;
                }
            }
        }
        debug!(err = %GrammarError::NoTemplate, line, "line rejected");
        Outcome::Invalid
    }

    /// Read-eval-print loop.
    ///
    /// Prompts with `>> `, stops on an exact `Exit` line, end of input or Ctrl+C,
    /// and prints one line per command: `INVALID` or the command's message.
    pub fn repl(&mut self, source: &mut dyn LineSource, out: &mut dyn Write) -> Result<()> {
        loop {
            if !source.draws_prompt() {
                write!(out, "{PROMPT}")?;
                out.flush()?;
            }
            let line = match source.read_line(PROMPT)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted => {
                    debug!("interrupted");
                    break;
                }
                ReadResult::Eof => break,
            };
            if line == EXIT_LINE {
                break;
            }
            let outcome = self.execute_line(&line);
            writeln!(out, "{}", outcome.display_text())?;
            out.flush()?;
        }
        Ok(())
    }
}
