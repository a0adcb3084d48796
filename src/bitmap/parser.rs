//! Parser for the ASCII glyph format.
//!
//! A file holds a sequence of glyphs. Each glyph starts with a header line
//! beginning with `C` whose whitespace-separated fields 1 to 3 are
//! `h<height>`, `w<width>` and `b<baseline>`. The following `height` lines are
//! the glyph rows, where `x` marks ink and any other character is background.
//! Lines outside a glyph are ignored, and a glyph of height 0 is skipped.
//!
//! ```text
//! C h3 w3 b0
//! .x.
//! xxx
//! .x.
//! ```

use super::Bitmap;
use crate::error::{PatrecError, Result};
use std::path::Path;

/// Header of one glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GlyphHeader {
    height: usize,
    width: usize,
}

/// Parses a header line such as `C h12 w9 b2`.
fn parse_header(line: &str, line_no: usize) -> Result<GlyphHeader> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(PatrecError::parse(
            line_no,
            format!("glyph header needs height, width and baseline: '{line}'"),
        ));
    }
    let height = parse_field(fields[1], 'h', line_no)?;
    let width = parse_field(fields[2], 'w', line_no)?;
    // Baseline is validated but does not affect the padded bitmap.
    parse_field(fields[3], 'b', line_no)?;
    Ok(GlyphHeader { height, width })
}

fn parse_field(field: &str, prefix: char, line_no: usize) -> Result<usize> {
    field
        .strip_prefix(prefix)
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| {
            PatrecError::parse(line_no, format!("expected '{prefix}<number>', found '{field}'"))
        })
}

/// Parses every glyph in `content`, padding or cropping each to 16×16.
///
/// # Errors
///
/// Returns [`PatrecError::Parse`] for a malformed header or a glyph cut off by
/// the end of input.
///
/// # Examples
///
/// ```
/// use patrec::bitmap::parse_bitmaps;
///
/// let glyphs = parse_bitmaps("C h2 w2 b0\nxx\n.x\n").expect("valid glyph");
/// assert_eq!(glyphs.len(), 1);
/// assert_eq!(glyphs[0].ink(), 3.0);
/// ```
pub fn parse_bitmaps(content: &str) -> Result<Vec<Bitmap>> {
    let mut bitmaps = Vec::new();
    let mut current: Option<(GlyphHeader, usize, Vec<Vec<bool>>)> = None;

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;

        if let Some((header, _, rows)) = current.as_mut() {
            rows.push(line.chars().map(|c| c == 'x').collect());
            if rows.len() == header.height {
                bitmaps.push(Bitmap::from_rows(rows, header.height, header.width));
                current = None;
            }
            continue;
        }

        if line.starts_with('C') {
            let header = parse_header(line, line_no)?;
            // A glyph without rows yields no sample.
            if header.height > 0 {
                current = Some((header, line_no, Vec::with_capacity(header.height)));
            }
        }
    }

    if let Some((header, start, rows)) = current {
        return Err(PatrecError::parse(
            start,
            format!(
                "glyph declares {} rows but input ended after {}",
                header.height,
                rows.len()
            ),
        ));
    }

    Ok(bitmaps)
}

/// Splits a file name of the form `<dataset>-<label>.<ext>`.
///
/// # Errors
///
/// Returns [`PatrecError::Parse`] (line 0) if the name has no `-` separator or
/// an empty part.
///
/// # Examples
///
/// ```
/// use patrec::bitmap::parse_file_name;
/// use std::path::Path;
///
/// let (dataset, label) = parse_file_name(Path::new("data/A-7.txt")).expect("valid name");
/// assert_eq!(dataset, "A");
/// assert_eq!(label, "7");
/// ```
pub fn parse_file_name(path: &Path) -> Result<(String, String)> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| PatrecError::parse(0, format!("unusable file name: {}", path.display())))?;
    let stem = name.split('.').next().unwrap_or(name);
    match stem.split_once('-') {
        Some((dataset, label)) if !dataset.is_empty() && !label.is_empty() => {
            Ok((dataset.to_string(), label.to_string()))
        }
        _ => Err(PatrecError::parse(
            0,
            format!("file name '{name}' is not '<dataset>-<label>.<ext>'"),
        )),
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
