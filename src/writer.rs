//! Delimited text export of computed section point arrays
//!
//! A thin serializer for the transform's output: one line per point,
//! coordinates joined by a caller-chosen delimiter, point order preserved
//! exactly as produced (no reordering, no deduplication — downstream CAD
//! import depends on the order).

use crate::error::Result;
use crate::geometry::SectionPoints;
use std::io::Write;

/// Number of decimal places written per coordinate
const COORD_PRECISION: usize = 6;

/// Write one section's point array as delimited text
///
/// Each point becomes one `x<D>y<D>z` line in array order.
pub fn write_section_points<W: Write>(
    writer: &mut W,
    points: &SectionPoints,
    delimiter: &str,
) -> Result<()> {
    for (x, y, z) in points {
        writeln!(
            writer,
            "{:.prec$}{delim}{:.prec$}{delim}{:.prec$}",
            x,
            y,
            z,
            prec = COORD_PRECISION,
            delim = delimiter
        )?;
    }
    Ok(())
}

/// Conventional output file name for one section's points
///
/// Joins component name, 1-indexed section number and aerofoil name with
/// underscores, mapping embedded whitespace to underscores.
pub fn section_file_name(component: &str, section_index: usize, foil: &str) -> String {
    format!(
        "{}_{}_{}.txt",
        sanitize(component),
        section_index,
        sanitize(foil)
    )
}

fn sanitize(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}
