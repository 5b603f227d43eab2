use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;
use comfy_table::{
    modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS},
    presets::UTF8_FULL,
    Cell, Color, Table,
};
use serde::Serialize;
use tiny_types::Entry;

use crate::config::OutputFormat;

pub fn print_entries(entries: Vec<Entry>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            if entries.is_empty() {
                println!("{}", "No entries found".yellow());
                return Ok(());
            }
            print_entries_table(entries)
        }
        OutputFormat::Json => print_json(&entries),
    }
}

pub fn print_entry(entry: Entry, message: Option<&str>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            if let Some(message) = message {
                println!("{}", message.green());
            }
            if entry.is_empty() {
                return Ok(());
            }
            print_entries_table(vec![entry])
        }
        OutputFormat::Json => print_json(&entry),
    }
}

pub fn print_deleted(id: &str, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", format!("Entry {} deleted successfully!", id).green());
            Ok(())
        }
        OutputFormat::Json => print_json(&serde_json::json!({ "id": id, "deleted": true })),
    }
}

fn print_entries_table(entries: Vec<Entry>) -> Result<()> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_header(vec![
            Cell::new("ID").fg(Color::Blue),
            Cell::new("URL").fg(Color::Blue),
            Cell::new("CREATED").fg(Color::Blue),
        ]);

    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.id),
            Cell::new(&entry.target_url),
            Cell::new(format_created(&entry.created_at)).fg(Color::Grey),
        ]);
    }

    println!("{table}");
    Ok(())
}

fn format_created(created_at: &DateTime<Utc>) -> String {
    if *created_at == DateTime::<Utc>::default() {
        return "-".to_string();
    }
    created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn print_json<T: Serialize>(data: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn created_formatting() {
        let at = Utc.with_ymd_and_hms(2023, 1, 1, 8, 30, 0).unwrap();
        assert_eq!(format_created(&at), "2023-01-01 08:30:00 UTC");
        assert_eq!(format_created(&DateTime::<Utc>::default()), "-");
    }
}
