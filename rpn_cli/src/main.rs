//! # RPN Calculator CLI
//!
//! Line-oriented front end for `rpn_core`. Each input line is a sequence of
//! whitespace-separated keys; after the line runs, the stack is printed in
//! calculator order (T at the top, X and the entry line at the bottom).
//!
//! ```text
//! > 5 3 +
//! 0
//! 0
//! 0
//! 8
//!
//! > 2 ÷ sto:a √ 7
//! 0
//! 0
//! 0
//! 2
//! 7
//! ```
//!
//! Numbers are typed into the entry buffer and pushed by the next key, so a
//! trailing number stays on the entry line until ENTER or an operation.
//! The line `vars` lists the stored variables.
//!
//! Logging goes to stderr and is controlled by `--log-level` or `RUST_LOG`.

mod keymap;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rpn_core::session::{load_or_new, save_session, Session};
use rpn_core::{Calculator, CalculatorSettings, DecimalSeparator, RpnError, RpnResult};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Four-register RPN calculator
#[derive(Parser, Debug)]
#[command(name = "rpn")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Session file to restore on start and save on exit
    #[arg(short, long, env = "RPN_SESSION")]
    session: Option<PathBuf>,

    /// Decimal separator for entry and display ('.' or ',')
    #[arg(long)]
    separator: Option<String>,

    /// Fixed number of decimals to display
    #[arg(long)]
    precision: Option<usize>,

    /// Log filter when RUST_LOG is not set (e.g. "debug", "rpn_core=trace")
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print calculator state as JSON instead of the stack display
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                debug!(error = %json, "fatal error");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> RpnResult<()> {
    let mut session: Option<Session> = match &cli.session {
        Some(path) => Some(load_or_new(path, Calculator::new())?),
        None => None,
    };
    let mut calc = session
        .as_ref()
        .map(|s| s.calculator.clone())
        .unwrap_or_default();
    calc.set_settings(settings_from_cli(cli, calc.settings())?)?;

    println!("RPN Calculator - type keys separated by spaces, 'quit' to exit");
    print_state(&calc, cli.json);

    let stdin = io::stdin();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "failed to read input");
                break;
            }
        }

        let line = line.trim();
        if matches!(line, "quit" | "exit" | "q") {
            break;
        }
        if line.is_empty() {
            continue;
        }
        if line == "vars" {
            println!("{}", format_variables(&calc));
            continue;
        }

        for error in run_line(&mut calc, line) {
            eprintln!("Error: {}", error);
        }
        print_state(&calc, cli.json);
    }

    if let (Some(path), Some(session)) = (&cli.session, session.as_mut()) {
        session.update(calc);
        save_session(session, path)?;
    }
    Ok(())
}

/// Merge command-line overrides onto existing settings
fn settings_from_cli(cli: &Cli, current: &CalculatorSettings) -> RpnResult<CalculatorSettings> {
    let mut settings = current.clone();
    if let Some(separator) = &cli.separator {
        settings = settings.with_separator(DecimalSeparator::from_str_flexible(separator)?);
    }
    if cli.precision.is_some() {
        settings = settings.with_precision(cli.precision);
    }
    Ok(settings)
}

/// Run every key on a line, collecting errors instead of stopping.
///
/// Operation keys commit any pending entry first. If that commit fails the
/// operation is skipped so it never runs on a stale X.
fn run_line(calc: &mut Calculator, line: &str) -> Vec<RpnError> {
    let mut errors = Vec::new();
    for token in line.split_whitespace() {
        let commands = match keymap::parse_token(token) {
            Ok(commands) => commands,
            Err(e) => {
                errors.push(e);
                continue;
            }
        };
        for command in commands {
            if keymap::commits_entry_first(&command) {
                if let Err(e) = calc.commit_entry() {
                    errors.push(e);
                    break;
                }
            }
            debug!(?command, "key");
            if let Err(e) = calc.execute(command) {
                errors.push(e);
                break;
            }
        }
    }
    errors
}

/// One `name = value` line per set slot
fn format_variables(calc: &Calculator) -> String {
    let lines: Vec<String> = calc
        .variables()
        .iter()
        .map(|(slot, value)| format!("{} = {}", slot, calc.settings().format_value(value)))
        .collect();
    if lines.is_empty() {
        "(no variables set)".to_string()
    } else {
        lines.join("\n")
    }
}

fn print_state(calc: &Calculator, json: bool) {
    if json {
        match serde_json::to_string(calc) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("Error: {}", e),
        }
    } else {
        println!("{}", calc.render());
    }
}
