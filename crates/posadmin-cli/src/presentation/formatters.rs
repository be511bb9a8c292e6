use is_terminal::IsTerminal;
use once_cell::sync::Lazy;
use owo_colors::OwoColorize;
use std::fmt;

static COLORS: Lazy<bool> =
    Lazy::new(|| std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none());

/// Whether stdout is a terminal that should get colors
pub fn colors_enabled() -> bool {
    !cfg!(test) && *COLORS
}

pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

pub fn money(value: f64) -> String {
    format!("{:.2}", value)
}

/// Left-aligned text table. Columns are separated by two spaces; the last
/// column is not padded.
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }
        widths
    }

    fn line(cells: &[String], widths: &[usize]) -> String {
        let mut out = String::new();
        for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
            if i > 0 {
                out.push_str("  ");
            }
            out.push_str(cell);
            if i + 1 < widths.len() {
                let pad = width.saturating_sub(cell.chars().count());
                out.push_str(&" ".repeat(pad));
            }
        }
        out.trim_end().to_string()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        let header = Self::line(&self.headers, &widths);
        if colors_enabled() {
            writeln!(f, "{}", header.bold())?;
        } else {
            writeln!(f, "{}", header)?;
        }
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", rule.join("  "))?;
        for row in &self.rows {
            writeln!(f, "{}", Self::line(row, &widths))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long product name", 10), "a very ...");
    }

    #[test]
    fn test_table_alignment() {
        let mut table = Table::new(&["ID", "NAME", "STATUS"]);
        table.push(vec!["1".into(), "Acme".into(), "enabled".into()]);
        table.push(vec!["12".into(), "Globex Corporation".into(), "disabled".into()]);

        let rendered = table.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "ID  NAME                STATUS");
        assert_eq!(lines[1], "--  ------------------  --------");
        assert_eq!(lines[2], "1   Acme                enabled");
        assert_eq!(lines[3], "12  Globex Corporation  disabled");
    }
}
