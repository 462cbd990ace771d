//! The fixed vector placeholder document.

use crate::flow::FLOW_TITLE;

/// Subtitle printed under the title.
pub const SUBTITLE: &str = "Interactive process visualization - \"To Be\" Process";

/// The 800 by 1200 placeholder SVG carrying only the title and subtitle.
///
/// This is not a vector rendition of the diagram; it never reflects
/// walkthrough state.
#[must_use]
pub fn placeholder_svg() -> String {
    format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="800" height="1200" viewBox="0 0 800 1200">
  <rect width="100%" height="100%" fill="white"/>
  <text x="400" y="30" text-anchor="middle" font-size="18" font-weight="bold" fill="#030213">
    {FLOW_TITLE}
  </text>
  <text x="400" y="50" text-anchor="middle" font-size="12" fill="#717182">
    {SUBTITLE}
  </text>
</svg>"##
    )
}
