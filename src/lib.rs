//! daybook - personal markdown notes with a calendar and AI assist

pub mod ai;
pub mod cli;
pub mod domain;
pub mod export;
pub mod logging;
pub mod store;
pub mod view;

use anyhow::Result;
use chrono::Local;
use clap::{CommandFactory, Parser};
use clap_complete::generate;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_calendar, handle_edit, handle_enhance, handle_export, handle_list, handle_new,
        handle_print, handle_remove, handle_show, open_store,
    },
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Command::Completions(args) = &cli.command {
        let mut cmd = Cli::command();
        generate(args.shell, &mut cmd, "daybook", &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load()?;
    let data_dir = config.data_dir(cli.dir.as_ref());
    let backend = config.backend(cli.backend);
    log::debug!("using {:?} store in {}", backend, data_dir.display());

    let mut store = open_store(&data_dir, backend)?;

    match &cli.command {
        Command::List(args) => handle_list(args, &store),
        Command::Calendar(args) => {
            handle_calendar(args, &store, Local::now().date_naive(), &Local)
        }
        Command::New(args) => handle_new(args, &mut store, &config),
        Command::Show(args) => handle_show(args, &store),
        Command::Edit(args) => handle_edit(args, &mut store, &config),
        Command::Remove(args) => handle_remove(args, &mut store),
        Command::Export(args) => handle_export(args, &store),
        Command::Print(args) => handle_print(args, &store),
        Command::Enhance(args) => handle_enhance(args, &mut store, &config),
        Command::Completions(_) => Ok(()),
    }
}
