use crate::parser::GrammarError;
use crate::world::World;
use regex::{Captures, Regex};
use std::marker::PhantomData;

/// Result of feeding one line to the interpreter.
///
/// Domain refusals such as "Not enough ingredients" are still `Ok`: the line
/// was understood, it just changed nothing. Only grammar failures are `Invalid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The line matches no sentence, or its arguments are malformed.
    Invalid,
    /// The line was understood. The message has no trailing newline.
    Ok(String),
}

impl Outcome {
    /// The text a REPL prints for this outcome.
    pub fn display_text(&self) -> &str {
        match self {
            Outcome::Invalid => "INVALID",
            Outcome::Ok(msg) => msg,
        }
    }
}

/// Object-safe trait for a fully parsed command ready to run against the world.
///
/// Implemented for every [`Template`] via a blanket impl.
pub trait ExecutableCommand {
    /// Applies the command and returns the line to print.
    fn execute(self: Box<Self>, world: &mut World) -> String;
}

/// Recognizes one sentence shape and turns matching lines into commands.
pub trait CommandFactory {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Attempt to build a command from an already trimmed line.
    ///
    /// Returns `None` when the line does not have this factory's shape, so the
    /// next factory gets a chance. Returns `Some(Err(_))` when the shape matches
    /// but the arguments are bad; the line is then invalid and no other factory
    /// is consulted.
    fn try_create(&self, line: &str) -> Option<Result<Box<dyn ExecutableCommand>, GrammarError>>;
}

/// A sentence template known to the interpreter at compile time.
///
/// `PATTERN` is matched against the trimmed line; its capture groups feed
/// `from_captures`, which performs all validation. `execute` only runs on
/// validated commands, so it never rejects a line as invalid.
pub(crate) trait Template: Sized {
    const NAME: &'static str;
    const PATTERN: &'static str;

    fn from_captures(caps: &Captures<'_>) -> Result<Self, GrammarError>;

    fn execute(self, world: &mut World) -> String;
}

impl<T: Template> ExecutableCommand for T {
    fn execute(self: Box<Self>, world: &mut World) -> String {
        <T as Template>::execute(*self, world)
    }
}

/// Factory creating [`Template`] commands from lines matching `T::PATTERN`.
pub(crate) struct Factory<T> {
    pattern: Regex,
    _phantom: PhantomData<T>,
}

impl<T: Template> Factory<T> {
    pub(crate) fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(T::PATTERN)?,
            _phantom: PhantomData,
        })
    }
}

impl<T: Template + 'static> CommandFactory for Factory<T> {
    fn name(&self) -> &'static str {
        T::NAME
    }

    fn try_create(&self, line: &str) -> Option<Result<Box<dyn ExecutableCommand>, GrammarError>> {
        let caps = self.pattern.captures(line)?;
        Some(T::from_captures(&caps).map(|cmd| Box::new(cmd) as Box<dyn ExecutableCommand>))
    }
}

/// Text of capture group `idx`, empty when the group did not participate.
pub(crate) fn group<'h>(caps: &Captures<'h>, idx: usize) -> &'h str {
    caps.get(idx).map_or("", |m| m.as_str())
}
