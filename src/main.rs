use anyhow::{Context, Result};
use argh::FromArgs;
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use witcher_tracker::Interpreter;
use witcher_tracker::editor::{LineSource, PlainSource, RustylineSource};

#[derive(FromArgs)]
/// Track Geralt's ingredients, potions, trophies and bestiary from sentences
/// typed one per line. Type `Exit` to quit.
struct Args {
    #[argh(option)]
    /// read sentences from this file instead of standard input
    script: Option<PathBuf>,

    #[argh(switch)]
    /// read standard input line by line even when it is a terminal
    plain: bool,

    #[argh(switch, short = 'v')]
    /// log every interpreted line to standard error
    verbose: bool,
}

fn main() -> Result<()> {
    let args: Args = argh::from_env();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let mut source: Box<dyn LineSource> = match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("can't open script {}", path.display()))?;
            Box::new(PlainSource::new(BufReader::new(file)))
        }
        None if !args.plain && io::stdin().is_terminal() => Box::new(RustylineSource::new()?),
        None => Box::new(PlainSource::new(io::stdin().lock())),
    };

    let mut tracker = Interpreter::with_default_grammar().context("grammar failed to compile")?;
    tracker.repl(source.as_mut(), &mut io::stdout().lock())
}
