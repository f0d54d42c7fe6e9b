//! Rendering helpers for command output.

use serde::Serialize;
use valuation_pricing::RateGrid;

use crate::Result;

/// Serialises a report as pretty-printed JSON.
///
/// # Errors
///
/// Returns `Json` if the report cannot be serialised.
pub fn to_json<T: Serialize + ?Sized>(report: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Formats a fraction as a percentage with `decimals` places.
pub fn pct(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value * 100.0)
}

/// Formats a fraction as a signed percentage with one decimal place.
pub fn signed_pct(value: f64) -> String {
    format!("{:+.1}%", value * 100.0)
}

/// Renders a cost-of-equity by growth grid with `decimals` places per
/// price; undefined cells print as `n/a`.
pub fn rate_grid_table(grid: &RateGrid, title: impl Into<String>, decimals: usize) -> Table {
    let headers = std::iter::once("Ke".to_string())
        .chain(grid.growth.iter().map(|g| format!("g {}", pct(*g, 1))));
    let mut table = Table::new(headers).title(title);
    for (row, ke) in grid.cost_of_equity.iter().enumerate() {
        let cells = (0..grid.growth.len()).map(|col| {
            grid.get(row, col)
                .map_or_else(|| "n/a".to_string(), |p| format!("{:.*}", decimals, p))
        });
        table.row(std::iter::once(pct(*ke, 1)).chain(cells));
    }
    table
}

/// Box-drawn text table.
///
/// Column widths grow to fit the widest cell; the first column is
/// left-aligned and the rest right-aligned.
#[derive(Clone, Debug, Default)]
pub struct Table {
    title: Option<String>,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a table with the given column headers.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: None,
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Sets a title line printed above the table.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Appends a row. Short rows are padded with empty cells.
    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cells: Vec<String> = cells.into_iter().map(Into::into).collect();
        cells.resize(self.headers.len().max(cells.len()), String::new());
        self.rows.push(cells);
        self
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let columns = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0);
        (0..columns)
            .map(|c| {
                std::iter::once(&self.headers)
                    .chain(self.rows.iter())
                    .filter_map(|r| r.get(c))
                    .map(|s| s.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Renders the table.
    pub fn render(&self) -> String {
        let widths = self.widths();
        let rule = |left: &str, mid: &str, right: &str| -> String {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("{}{}{}\n", left, segments.join(mid), right)
        };
        let line = |cells: &[String]| -> String {
            let padded: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(c, &w)| {
                    let cell = cells.get(c).map(String::as_str).unwrap_or("");
                    if c == 0 {
                        format!(" {:<w$} ", cell, w = w)
                    } else {
                        format!(" {:>w$} ", cell, w = w)
                    }
                })
                .collect();
            format!("│{}│\n", padded.join("│"))
        };

        let mut out = String::new();
        if let Some(title) = &self.title {
            out.push_str(title);
            out.push('\n');
        }
        out.push_str(&rule("┌", "┬", "┐"));
        out.push_str(&line(&self.headers));
        out.push_str(&rule("├", "┼", "┤"));
        for row in &self.rows {
            out.push_str(&line(row));
        }
        out.push_str(&rule("└", "┴", "┘"));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_aligns_columns() {
        let mut table = Table::new(["Year", "Price"]);
        table.row(["2026", "226.46"]).row(["2027", "9.00"]);
        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "┌──────┬────────┐");
        assert_eq!(lines[1], "│ Year │  Price │");
        assert_eq!(lines[3], "│ 2026 │ 226.46 │");
        assert_eq!(lines[4], "│ 2027 │   9.00 │");
        assert_eq!(lines[5], "└──────┴────────┘");
    }

    #[test]
    fn test_title_and_padding() {
        let mut table = Table::new(["A", "B", "C"]).title("Summary");
        table.row(["x"]);
        let rendered = table.render();
        assert!(rendered.starts_with("Summary\n"));
        assert!(rendered.contains("│ x │   │   │"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_percentages() {
        assert_eq!(pct(0.11, 1), "11.0%");
        assert_eq!(pct(0.0225, 2), "2.25%");
        assert_eq!(signed_pct(0.0312), "+3.1%");
        assert_eq!(signed_pct(-0.0862), "-8.6%");
    }

    #[test]
    fn test_rate_grid_table() {
        let grid = RateGrid {
            cost_of_equity: vec![0.03, 0.11],
            growth: vec![0.03],
            prices: vec![vec![None], vec![Some(12_875.0)]],
        };
        let rendered = rate_grid_table(&grid, "Gordon", 0).render();
        assert!(rendered.starts_with("Gordon\n"));
        assert!(rendered.contains("│ Ke    │ g 3.0% │"));
        assert!(rendered.contains("│ 3.0%  │    n/a │"));
        assert!(rendered.contains("│ 11.0% │  12875 │"));
    }

    #[test]
    fn test_json() {
        let json = to_json(&[1, 2]).unwrap();
        assert_eq!(json, "[\n  1,\n  2\n]");
    }
}
