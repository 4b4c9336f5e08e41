//! Render the keypad layout as a text grid or an SVG picture.

use keypad_core::{KeypadConfig, Level, Timing, LAYOUT_4X4};

/// Key size in SVG pixels.
const U: f64 = 54.0;
/// Gap between keys.
const GAP: f64 = 8.0;
/// Step: key + gap.
const S: f64 = U + GAP;
/// Key corner radius.
const R: f64 = 6.0;
/// Margin around the keys, leaves room for the index labels.
const MARGIN: f64 = 30.0;

/// Logical pin numbers: rows first, then columns.
static ROW_INDEXES: [usize; 4] = [0, 1, 2, 3];
static COL_INDEXES: [usize; 4] = [4, 5, 6, 7];

/// The compiled-in keypad with logical pin numbers.
pub fn builtin_config(timing: Timing) -> KeypadConfig<'static, usize> {
    KeypadConfig {
        row_pins: &ROW_INDEXES,
        col_pins: &COL_INDEXES,
        keymap: &LAYOUT_4X4,
        active: Level::Low,
        timing,
    }
}

/// Text table with row and column indexes.
pub fn render_text(keymap: &[&[char]]) -> String {
    let cols = keymap.first().map_or(0, |row| row.len());
    let mut out = String::from("     ");
    for col in 0..cols {
        out.push_str(&format!(" C{col} "));
    }
    out.push('\n');

    for (row, glyphs) in keymap.iter().enumerate() {
        out.push_str(&format!(" R{row}  "));
        for glyph in glyphs.iter() {
            out.push_str(&format!("[{glyph}] "));
        }
        out.truncate(out.trim_end().len());
        out.push('\n');
    }
    out
}

fn xml_escape(c: char) -> String {
    match c {
        '&' => "&amp;".to_string(),
        '<' => "&lt;".to_string(),
        '>' => "&gt;".to_string(),
        other => other.to_string(),
    }
}

/// Standalone SVG document of the keypad.
pub fn render_svg(keymap: &[&[char]]) -> String {
    let rows = keymap.len();
    let cols = keymap.first().map_or(0, |row| row.len());
    let width = cols as f64 * S - GAP + 2.0 * MARGIN;
    let height = rows as f64 * S - GAP + 2.0 * MARGIN;

    let mut svg = format!(
        r#"<svg width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg">
<style>
  .key {{ fill: #16213e; stroke: #0f3460; stroke-width: 1.5; }}
  .key.letter {{ fill: #2d1b4e; stroke: #e94560; }}
  .label {{ fill: #eee; font-family: monospace; font-size: 20px; text-anchor: middle; dominant-baseline: middle; }}
  .index {{ fill: #888; font-family: monospace; font-size: 11px; text-anchor: middle; dominant-baseline: middle; }}
</style>
"#
    );

    for col in 0..cols {
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" class="index">C{col}</text>"#,
            MARGIN + col as f64 * S + U / 2.0,
            MARGIN / 2.0,
        ));
        svg.push('\n');
    }

    for (row, glyphs) in keymap.iter().enumerate() {
        let y = MARGIN + row as f64 * S;
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" class="index">R{row}</text>"#,
            MARGIN / 2.0,
            y + U / 2.0,
        ));
        svg.push('\n');

        for (col, &glyph) in glyphs.iter().enumerate() {
            let x = MARGIN + col as f64 * S;
            let class = if glyph.is_ascii_alphabetic() {
                "key letter"
            } else {
                "key"
            };
            svg.push_str(&format!(
                r#"<rect x="{x}" y="{y}" width="{U}" height="{U}" rx="{R}" class="{class}"/>"#
            ));
            svg.push_str(&format!(
                r#"<text x="{}" y="{}" class="label">{}</text>"#,
                x + U / 2.0,
                y + U / 2.0 + 1.0,
                xml_escape(glyph),
            ));
            svg.push('\n');
        }
    }

    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_config_is_valid() {
        assert_eq!(builtin_config(Timing::default()).validate(), Ok(()));
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&LAYOUT_4X4);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "      C0  C1  C2  C3 ");
        assert_eq!(lines[4], " R3  [*] [0] [#] [D]");
    }

    #[test]
    fn test_render_svg() {
        let svg = render_svg(&LAYOUT_4X4);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>\n"));
        assert_eq!(svg.matches("<rect").count(), 16);
        assert!(svg.contains(r#"class="label">#</text>"#));
    }

    #[test]
    fn test_xml_escape() {
        assert_eq!(xml_escape('<'), "&lt;");
        assert_eq!(xml_escape('5'), "5");
    }
}
