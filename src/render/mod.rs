//! Pure rendering of the process flow as SVG.
//!
//! Renderers never read walkthrough state. They receive the booleans derived
//! by [`crate::flow::WalkthroughController`] and produce views plus SVG
//! fragments; [`scene::FlowScene`] assembles those into a document that the
//! exporter can rasterise.

pub mod connector;
pub mod layout;
pub mod node;
pub mod scene;

pub use connector::{ConnectorView, connector_view};
pub use layout::{Layout, NodeBox, Point};
pub use node::{NodeClick, NodeFlags, NodeShape, NodeView};
pub use scene::{FlowScene, SidePanelGuard};

/// Escape text for use inside SVG character data and attribute values.
pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// A row, line or character count as a coordinate factor.
///
/// Counts beyond `u32::MAX` saturate; no diagram comes close.
pub(crate) fn count_as_f64(count: usize) -> f64 {
    f64::from(u32::try_from(count).unwrap_or(u32::MAX))
}

/// Greedy word wrap to at most `max_chars` characters per line.
///
/// Words longer than the limit are kept whole on their own line.
pub(crate) fn wrap_words(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
