//! quill - a notes core with tag indexing and [[reference]] resolution

pub mod cli;
pub mod domain;
pub mod index;
pub mod infra;
pub mod query;
pub mod service;
pub mod store;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_backlinks, handle_check, handle_completions, handle_edit, handle_list, handle_new,
        handle_rm, handle_search, handle_show, handle_tags, open_service,
    },
};

/// Maps the `-v` count to a log level. Logs go to stderr.
fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn init_logging(verbose: u8) {
    // Already initialized when embedded; keep the existing subscriber.
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(level_for(verbose))
        .try_init();
}

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Command::Completions(args) = &cli.command {
        return handle_completions(args);
    }

    let config = Config::load()?;
    let notes_dir = config.notes_dir(cli.dir.as_ref());
    let service = open_service(&notes_dir)?;

    match &cli.command {
        Command::New(args) => handle_new(args, &service, config.format(args.format)),
        Command::Show(args) => handle_show(args, &service, config.format(args.format)),
        Command::Edit(args) => handle_edit(args, &service, &config),
        Command::Rm(args) => handle_rm(args, &service),
        Command::List(args) => handle_list(args, &service, config.format(args.format)),
        Command::Search(args) => handle_search(args, &service, config.format(args.format)),
        Command::Tags(args) => handle_tags(args, &service, config.format(args.format)),
        Command::Backlinks(args) => handle_backlinks(args, &service, config.format(args.format)),
        Command::Check(args) => handle_check(args, &service, config.format(args.format)),
        Command::Completions(args) => handle_completions(args),
    }
}
