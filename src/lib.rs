//! Inventory and bestiary tracker driven by English-like sentences.
//!
//! Each input line is either an action (`Geralt loots 5 Rebis`, `Geralt brews
//! Swallow`, ...) that changes the [`World`], or a query (`Total potion?`,
//! `What is in Swallow?`, ...) that reads it. Lines outside the grammar, or with
//! malformed arguments, yield [`Outcome::Invalid`] and change nothing.
//!
//! The main entry point is [`Interpreter`]: build one with
//! [`Interpreter::with_default_grammar`], then feed it lines through
//! [`Interpreter::execute_line`] or run the interactive loop with
//! [`Interpreter::repl`]. The public modules expose the pieces for embedding:
//! [`command`] for the sentence traits, [`world`] for the state tables,
//! [`editor`] for line sources, and [`lexer`]/[`parser`] for argument parsing.

mod actions;
pub mod command;
pub mod editor;
mod format;
mod interpreter;
pub mod lexer;
pub mod parser;
mod queries;
pub mod world;

pub use command::Outcome;
pub use interpreter::{EXIT_LINE, Interpreter, PROMPT};
pub use world::World;
