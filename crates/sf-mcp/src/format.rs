//! Markdown rendering helpers shared by the tools.

/// Make a value safe to place inside a Markdown table cell.
///
/// Line breaks become spaces and pipes are backslash-escaped.
pub fn escape_cell(value: &str) -> String {
    value
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .replace('|', "\\|")
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// `Some("")` and `None` both render as `N/A`.
pub fn or_na(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "N/A",
    }
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// A Markdown table. Every cell is escaped on insertion.
#[derive(Debug, Clone, Default)]
pub struct MarkdownTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl MarkdownTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            headers: headers.into_iter().map(|h| escape_cell(h.as_ref())).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.rows
            .push(cells.into_iter().map(|c| escape_cell(c.as_ref())).collect());
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header, separator and one line per row, each ending in a newline.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&render_line(&self.headers));

        let separator: Vec<String> = self
            .headers
            .iter()
            .map(|h| "-".repeat(h.chars().count() + 2))
            .collect();
        out.push('|');
        out.push_str(&separator.join("|"));
        out.push_str("|\n");

        for row in &self.rows {
            out.push_str(&render_line(row));
        }
        out
    }
}

fn render_line(cells: &[String]) -> String {
    format!("| {} |\n", cells.join(" | "))
}
