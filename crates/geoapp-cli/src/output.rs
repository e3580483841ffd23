use console::style;
use serde::Serialize;
use std::fmt::Display;
use tabled::{settings::Style, Table, Tabled};

/// Renders command results either for a terminal or as one JSON document.
///
/// In JSON mode every command prints exactly one `{"status", "data"}` object
/// on stdout; decorations (sections, notes) are suppressed.
pub struct OutputWriter {
    json: bool,
}

impl OutputWriter {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    fn envelope<T: Serialize>(data: T) -> anyhow::Result<()> {
        let output = serde_json::json!({ "status": "success", "data": data });
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    pub fn success(&self, message: impl Display) {
        if !self.json {
            println!("{} {}", style("✓").green().bold(), message);
        }
    }

    pub fn note(&self, message: impl Display) {
        if !self.json {
            println!("{} {}", style("ℹ").blue().bold(), message);
        }
    }

    pub fn section(&self, title: impl Display) {
        if !self.json {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    pub fn kv(&self, key: impl Display, value: impl Display) {
        if !self.json {
            println!("  {}: {}", style(key).bold(), value);
        }
    }

    /// Rows as a rounded table, or as the JSON `data` array
    pub fn table<T: Tabled + Serialize>(&self, rows: Vec<T>) -> anyhow::Result<()> {
        if self.json {
            return Self::envelope(rows);
        }
        if rows.is_empty() {
            println!("{}", style("(no rows)").dim());
        } else {
            println!("{}", Table::new(rows).with(Style::rounded()));
        }
        Ok(())
    }

    /// A document printed as pretty JSON in both modes
    pub fn document<T: Serialize>(&self, data: &T) -> anyhow::Result<()> {
        if self.json {
            return Self::envelope(data);
        }
        println!("{}", serde_json::to_string_pretty(data)?);
        Ok(())
    }
}
