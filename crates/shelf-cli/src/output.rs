//! Terminal output for CLI commands.

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// `--format` values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned table or key/value listing
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Print rows, or `empty` when there are none and a table was requested.
pub fn print_list<T: Serialize + Tabled>(rows: &[T], format: OutputFormat, empty: &str) {
    match format {
        OutputFormat::Json => print_json(rows),
        OutputFormat::Table if rows.is_empty() => println!("{empty}"),
        OutputFormat::Table => {
            let mut table = Table::new(rows);
            table.with(Style::sharp());
            println!("{table}");
        }
    }
}

/// Print one value; tables fall back to the debug representation.
pub fn print_item<T: Serialize + std::fmt::Debug>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(item),
        OutputFormat::Table => println!("{item:#?}"),
    }
}

/// Pretty-print `value` as JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => print_error(&format!("Cannot encode output as JSON: {e}")),
    }
}

pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// One aligned `key: value` line.
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<12} {value}", format!("{key}:"));
}
