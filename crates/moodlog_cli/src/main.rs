//! moodlog command-line front end.
//!
//! # Responsibility
//! - Load configuration, start file logging when configured, dispatch one
//!   command and print its response envelope as JSON.
//!
//! # Invariants
//! - Exit code is `0` for `ok: true` responses, `1` for failed operations
//!   and `2` for usage or configuration errors.

mod cli;
mod entry;

use clap::Parser;
use cli::{Cli, Command};
use log::warn;
use moodlog_core::{init_logging, AnalysisRequest, MoodlogConfig};
use serde::Serialize;
use std::process::ExitCode;

fn main() -> ExitCode {
    let invocation = Cli::parse();

    if invocation.command == Command::Version {
        println!("moodlog {}", moodlog_core::core_version());
        return ExitCode::SUCCESS;
    }

    let config = match MoodlogConfig::load(invocation.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("moodlog: {err}");
            return ExitCode::from(2);
        }
    };

    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("moodlog: logging disabled: {err}");
        }
    }

    match invocation.command {
        Command::Analyze {
            strategy,
            audio_path,
            image_path,
            save,
            words,
        } => {
            let request = AnalysisRequest {
                text: Command::analyze_text(&words),
                audio_path,
                image_path,
            };
            let response = entry::entry_analyze(&config, &request, strategy, save);
            emit(response.ok, &response)
        }
        Command::Diary { limit } => {
            let response = entry::entry_diary(&config, limit);
            emit(response.ok, &response)
        }
        Command::Export { path } => {
            let response = entry::entry_export(&config, &path);
            emit(response.ok, &response)
        }
        Command::Version => ExitCode::SUCCESS,
    }
}

fn emit<T: Serialize>(ok: bool, response: &T) -> ExitCode {
    match serde_json::to_string_pretty(response) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            warn!("event=cli_emit module=cli status=error error={}", err);
            eprintln!("moodlog: failed to render response: {err}");
            return ExitCode::FAILURE;
        }
    }
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
