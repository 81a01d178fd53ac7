use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::services::levels::class_for_level;

/// Fixed grid geometry: 52 week columns of 7 day rows
pub const GRID_WEEKS: u32 = 52;
pub const GRID_ROWS: usize = 7;

/// Cell size and inter-cell spacing for a target total grid width.
///
/// 10% of the width is reserved for gaps and the rest is split evenly
/// across the week columns. Both values are rounded to two decimals so
/// the emitted markup stays diffable between runs.
pub fn cell_dimensions(grid_width: u32, weeks: u32) -> (f64, f64) {
    let grid_width = grid_width as f64;
    let total_spacing = grid_width * 0.1;
    let effective_width = grid_width - total_spacing;

    let cell_size = effective_width / weeks as f64;
    let cell_spacing = total_spacing / (weeks - 1) as f64;

    (round2(cell_size), round2(cell_spacing))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Render the trailing-year heatmap as one SVG `<rect>` per day.
///
/// Leading days that do not fill a 7-day column are dropped, so a
/// 365-entry trailing year renders as 52 full weeks; cells run down a
/// 7-row column, then wrap to the next week.
pub fn render_grid(levels: &BTreeMap<NaiveDate, u8>, grid_width: u32) -> String {
    let mut svg_parts: Vec<String> = Vec::new();
    svg_parts.push(r#"<g transform="translate(50, 520)">"#.to_string());

    let (cell_size, cell_spacing) = cell_dimensions(grid_width, GRID_WEEKS);

    let mut x = 0.0;
    let mut y = 0.0;
    let mut cells = 0;

    let misaligned = levels.len() % GRID_ROWS;
    for (index, (date, level)) in levels.iter().skip(misaligned).enumerate() {
        let color = class_for_level(*level);
        // Accumulated offsets are re-rounded so a long row of cells never
        // picks up floating-point dust in the emitted coordinates
        svg_parts.push(format!(
            r#"<rect class="grid-cell" x="{}" y="{}" width="{}" height="{}" fill="url(#{})" stroke="url(#{}_stroke)" rx="2" title="{}: {} contributions"/>"#,
            round2(x), round2(y), cell_size, cell_size, color, color, date, level
        ));
        cells += 1;

        y += cell_size + cell_spacing;
        if (index + 1) % GRID_ROWS == 0 {
            y = 0.0;
            x += cell_size + cell_spacing;
        }
    }

    svg_parts.push("</g>".to_string());

    log::debug!("Rendered contribution grid with {} cells", cells);

    svg_parts.join("\n")
}
