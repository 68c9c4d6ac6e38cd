mod command;
mod config;
mod error;
mod session;

use anyhow::{Context, Result};
use command::{Command, HELP};
use log::{error, info, warn};
use session::{Session, Status};
use std::io::{self, BufRead, Write};

fn main() -> Result<()> {
    // Initialize logger - defaults to RUST_LOG if set, otherwise INFO
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let config = config::Config::from_env()?;
    info!("Schedule desk starting (type 'help' for commands)");
    info!("Output: {}", config.output_name);

    let mut session = Session::new(config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        if stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read command")?
            == 0
        {
            break;
        }

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!("{e}");
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::List => {
                for line in session.list_lines() {
                    println!("{line}");
                }
            }
            other => {
                if let Some(status) = dispatch(&mut session, other) {
                    report(&status);
                }
            }
        }
    }

    info!("Bye");
    Ok(())
}

fn dispatch(session: &mut Session, command: Command) -> Option<Status> {
    match command {
        Command::Add(paths) => Some(session.add_files(paths)),
        Command::Clear => Some(session.clear_all()),
        Command::Select(index) => Some(session.select(index)),
        Command::Remove => session.remove_selected(),
        Command::Up => session.move_up(),
        Command::Down => session.move_down(),
        Command::Output(name) => Some(session.set_output_name(&name)),
        Command::Generate => {
            info!("Generating from {} file(s)", session.files().len());
            Some(session.generate())
        }
        Command::List | Command::Help | Command::Quit => None,
    }
}

fn report(status: &Status) {
    match status {
        Status::Info(_) | Status::Success(_) => println!("{status}"),
        Status::Warning(_) => warn!("{}", status.message()),
        Status::Error(_) => error!("{}", status.message()),
    }
}
