//! Output formatting for CLI

use crate::registry::TableRecord;

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Format a number with thousands separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Summary statistics over all cells of a table.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct CellStats {
    pub min: f32,
    pub max: f32,
    pub mean: f64,
    /// Cells whose bits differ from the default value
    pub non_default: usize,
}

impl CellStats {
    /// Compute statistics, or `None` for a table with no cells.
    pub fn of(record: &TableRecord, default_value: f32) -> Option<Self> {
        let values = record.matrix().values();
        let (&first, _) = values.split_first()?;
        let mut stats = Self {
            min: first,
            max: first,
            mean: 0.0,
            non_default: 0,
        };
        let mut sum = 0.0f64;
        for &value in values {
            stats.min = stats.min.min(value);
            stats.max = stats.max.max(value);
            sum += f64::from(value);
            if value.to_bits() != default_value.to_bits() {
                stats.non_default += 1;
            }
        }
        stats.mean = sum / values.len() as f64;
        Some(stats)
    }
}
