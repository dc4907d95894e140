//! # chatlens CLI
//!
//! Command-line front end: loads an archive and prints one report.

use std::io::{self, Write};
use std::process;

use clap::Parser as ClapParser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use chatlens::cli::{Args, Command};
use chatlens::core::{
    FilterConfig, daily_volume, filter_author, group_engagements, most_reacted, pair_summaries, ranked_connections,
    top_writers, yearly_volume,
};
use chatlens::loader::{CorpusLoader, NameFilter};
use chatlens::report::{
    connections_table, conversations_table, daily_table, engagement_table, message_line, pairs_table, silent_line,
    writers_table, yearly_table,
};
use chatlens::{Conversation, Message, Result};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Initialize tracing subscriber with environment filter, writing to stderr.
fn init_tracing(verbose: bool) {
    let default = if verbose { "chatlens=debug" } else { "chatlens=info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(args: &Args) -> Result<()> {
    let dates = args.filter_config()?;
    let loader = CorpusLoader::new(args.loader_config());
    let filter = NameFilter::from(args.command.title_filter());

    let conversations = load(&loader, &filter, &dates)?;
    if conversations.is_empty() && !filter.is_all() {
        eprintln!("No conversations match '{}'", args.command.title_filter().unwrap_or_default());
        return Ok(());
    }
    tracing::debug!(command = ?args.command, conversations = conversations.len(), "rendering report");

    let messages: Vec<&Message> = conversations.iter().flat_map(|c| c.messages.iter()).collect();
    let mut out = io::stdout().lock();

    match &args.command {
        Command::Convos { .. } => {
            write!(out, "{}", conversations_table(&conversations))?;
        }
        Command::Daily => {
            let mine = filter_author(messages.iter().copied(), &args.me);
            writeln!(out, "Messages sent by me: {}", mine.len())?;
            write!(out, "{}", daily_table(&daily_volume(mine.iter().copied())))?;
        }
        Command::Yearly => {
            let mine = filter_author(messages.iter().copied(), &args.me);
            writeln!(out, "Messages sent by me: {}", mine.len())?;
            write!(out, "{}", yearly_table(&yearly_volume(mine.iter().copied())))?;
        }
        Command::TopWriters { .. } => {
            write!(out, "{}", writers_table(&top_writers(messages.iter().copied())))?;
        }
        Command::People { emoji } => {
            write!(out, "{}", pairs_table(&pair_summaries(messages.iter().copied(), *emoji)))?;
        }
        Command::MostReacted { limit } => {
            for message in most_reacted(messages.iter().copied()).into_iter().take(*limit) {
                writeln!(out, "{}", message_line(message))?;
            }
        }
        Command::Creeps { .. } => {
            for report in group_engagements(&conversations) {
                writeln!(out, "{}", report.title)?;
                write!(out, "{}", engagement_table(&report))?;
                if !report.silent.is_empty() {
                    writeln!(out, "{}", silent_line(&report))?;
                }
                writeln!(out)?;
            }
        }
        Command::Connections { limit } => {
            let mut ranked = ranked_connections(messages.iter().copied());
            ranked.truncate(*limit);
            write!(out, "{}", connections_table(&ranked))?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Loads the matching conversations with `--after`/`--before` applied to
/// their messages.
fn load(loader: &CorpusLoader, filter: &NameFilter, dates: &FilterConfig) -> Result<Vec<Conversation>> {
    let mut conversations = loader.conversations(filter.clone())?;
    if dates.is_active() {
        for conversation in &mut conversations {
            conversation.messages.retain(|m| dates.matches(m));
        }
    }
    Ok(conversations)
}
