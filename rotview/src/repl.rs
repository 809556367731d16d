use crate::commands::{Outcome, Session, parse_line};
use crate::config::{RotviewConfig, config_dir};
use crate::display::format_status;
use crate::errors::RotviewErrors;
use crate::monitor::Monitor;
use colored::Colorize;
use log::{debug, warn};
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config, EditMode, Editor, error::ReadlineError};
use std::path::PathBuf;
use std::time::Duration;

pub struct RotviewRepl {
    session: Session,
    monitor: Option<Monitor>,
}

impl RotviewRepl {
    pub fn new(config: RotviewConfig) -> Self {
        Self { session: Session::new(config), monitor: None }
    }

    /// Prints the status from a background thread whenever the rotation changes.
    pub fn start_monitor(&mut self) {
        let config = self.session.config.clone();
        let refresh = Duration::from_millis(config.monitor_refresh_ms);
        self.monitor = Some(Monitor::spawn(
            self.session.shared.clone(),
            refresh,
            move |snapshot| println!("{}", format_status(snapshot, &config)),
        ));
    }

    pub fn run(&mut self) -> Result<(), RotviewErrors> {
        let config = Config::builder()
            .history_ignore_space(true)
            .completion_type(CompletionType::List)
            .edit_mode(EditMode::Emacs)
            .build();
        let mut rl: Editor<(), DefaultHistory> = Editor::with_config(config)?;

        let history_path = history_path()?;
        if let Some(path) = &history_path {
            if path.exists() {
                rl.load_history(path)?;
            }
        }

        println!("{}", "rotview, type 'help' for commands".bright_blue());
        if self.monitor.is_none() {
            self.print_status();
        }

        let prompt = "rotview> ";
        loop {
            match rl.readline(prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line)?;

                    let command = match parse_line(line) {
                        Ok(command) => command,
                        Err(e) => {
                            // clap renders help and version requests as errors too
                            eprintln!("{e}");
                            continue;
                        }
                    };

                    match self.session.execute(command) {
                        Ok(Outcome::Exit) => break,
                        Ok(Outcome::Print(text)) => println!("{text}"),
                        Ok(Outcome::Updated(revision)) => {
                            debug!("rotation updated to revision {revision}");
                            if self.monitor.is_none() {
                                self.print_status();
                            }
                        }
                        Err(e) => eprintln!("{}", e.to_string().red()),
                    }
                }
                // Ctrl+C
                Err(ReadlineError::Interrupted) => continue,
                // Ctrl+D
                Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            }
        }

        // joins the monitor thread
        self.monitor = None;
        if let Some(path) = &history_path {
            if let Err(e) = rl.save_history(path) {
                warn!("could not save history to {}: {e}", path.display());
            }
        }
        Ok(())
    }

    fn print_status(&self) {
        let snapshot = self.session.shared.snapshot();
        println!("{}", format_status(&snapshot, &self.session.config));
    }
}

fn history_path() -> Result<Option<PathBuf>, RotviewErrors> {
    let Some(mut path) = config_dir() else {
        return Ok(None);
    };
    if !path.exists() {
        std::fs::create_dir_all(&path)?;
    }
    path.push("history.txt");
    Ok(Some(path))
}
