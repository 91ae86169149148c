//! Text and JSON rendering of the controller's view state.

use uploadhub_core::sync::{ListingRow, ViewState};

/// Output format chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Renderer {
    Text,
    Json,
}

impl Renderer {
    /// Render the whole view, newline-terminated.
    pub fn render(self, state: &ViewState) -> String {
        match self {
            Renderer::Text => render_text(state),
            Renderer::Json => match serde_json::to_string(state) {
                Ok(json) => format!("{json}\n"),
                Err(e) => render_error_json(&e),
            },
        }
    }
}

fn render_error_json(e: &dyn std::fmt::Display) -> String {
    format!("{}\n", serde_json::json!({ "renderError": e.to_string() }))
}

fn render_text(state: &ViewState) -> String {
    let rows = state.listing.rows();
    let width = rows
        .iter()
        .filter_map(|row| match row {
            ListingRow::Entry(entry) => Some(entry.name.chars().count()),
            ListingRow::Sentinel { .. } => None,
        })
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for row in &rows {
        match row {
            ListingRow::Entry(entry) => {
                out.push_str(&format!("  {:<width$}  {}\n", entry.name, entry.href));
            }
            ListingRow::Sentinel { sentinel } => {
                out.push_str(&format!("  ({})\n", sentinel.label()));
            }
        }
    }

    if let Some(status) = state.status.current() {
        let label = if status.is_error { "error" } else { "status" };
        out.push_str(&format!("{label}: {}\n", status.text));
    }
    out
}
