//! Command-line driver for the ledger core.
//!
//! # Responsibility
//! - Open the configured ledger database and hydrate a `LedgerStore`.
//! - Apply at most one mutation from the command line, then print the ledger,
//!   totals and distribution.
//!
//! Configuration comes from `LEDGER_*` environment variables; without
//! `LEDGER_DB_PATH` the ledger lives in memory for the duration of the run.

use ledger_core::db::{open_db, open_db_in_memory};
use ledger_core::{
    core_version, init_logging, project_distribution, summarize, ExpenseId, Ledger, LedgerConfig,
    LedgerStore, SqliteLedgerRepository,
};
use log::info;
use std::process::ExitCode;

const USAGE: &str = "usage: ledger_cli [show | income <delta> | add <description> <amount> \
| edit <id> <description> <amount> | delete <id> | reset]";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Show,
    Income(String),
    Add(String, String),
    Edit(ExpenseId, String, String),
    Delete(ExpenseId),
    Reset,
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_command(&args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{message}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let config = match LedgerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return ExitCode::from(2);
        }
    };

    if let Some(log_dir) = config.log_dir.as_deref().and_then(|dir| dir.to_str()) {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let opened = match config.db_path.as_deref() {
        Some(path) => open_db(path),
        None => open_db_in_memory(),
    };
    let conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open ledger database: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut store = LedgerStore::initialize(SqliteLedgerRepository::new(&conn), &config);
    info!("event=cli_run module=cli status=start version={}", core_version());

    let applied = match command {
        Command::Show => true,
        Command::Income(delta) => store.add_income(&delta),
        Command::Add(description, amount) => store.add_expense(&description, &amount).is_some(),
        Command::Edit(id, description, amount) => store.edit_expense(id, &description, &amount),
        Command::Delete(id) => store.delete_expense(id),
        Command::Reset => {
            store.reset();
            true
        }
    };
    if !applied {
        println!("no change");
    }

    print_ledger(store.ledger());
    ExitCode::SUCCESS
}

fn parse_command(args: &[String]) -> Result<Command, String> {
    let words: Vec<&str> = args.iter().map(String::as_str).collect();
    match words.as_slice() {
        [] | ["show"] => Ok(Command::Show),
        ["income", delta] => Ok(Command::Income((*delta).to_string())),
        ["add", description, amount] => Ok(Command::Add(
            (*description).to_string(),
            (*amount).to_string(),
        )),
        ["edit", id, description, amount] => Ok(Command::Edit(
            parse_id(id)?,
            (*description).to_string(),
            (*amount).to_string(),
        )),
        ["delete", id] => Ok(Command::Delete(parse_id(id)?)),
        ["reset"] => Ok(Command::Reset),
        _ => Err(format!("unrecognized arguments: {}", words.join(" "))),
    }
}

fn parse_id(text: &str) -> Result<ExpenseId, String> {
    text.trim()
        .parse::<i64>()
        .map(ExpenseId)
        .map_err(|_| format!("invalid expense id `{text}`"))
}

fn print_ledger(ledger: &Ledger) {
    match summarize(ledger) {
        Some(summary) => {
            println!("income:   {:.2}", summary.income);
            println!(
                "expenses: {:.2} ({} items)",
                summary.total_expenses, summary.expense_count
            );
            println!("balance:  {:.2}", summary.balance);
        }
        None => println!("totals unavailable: amounts exceed the supported range"),
    }

    for expense in &ledger.expenses {
        println!("  [{}] {} - {:.2}", expense.id, expense.description, expense.amount);
    }

    let distribution = project_distribution(ledger);
    if distribution.is_empty() {
        println!("No expenses to display.");
        return;
    }
    for (label, amount) in distribution.labels.iter().zip(&distribution.amounts) {
        println!("  {label}: {amount}");
    }
}
