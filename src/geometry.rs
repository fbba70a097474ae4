//! Places each wing section's 2D profile into 3D space
//!
//! The transform is pure: it reads the component and the resolved library
//! and produces one new point array per section, in outboard order. The
//! per-section steps are strictly ordered — chord scaling, panel-dihedral
//! rotation, twist about the quarter-chord, sweep offset, cumulative
//! spanwise placement, axis permutation, optional component shift — and
//! must not be reordered.
//!
//! Two rules here are deliberate legacy compatibility, not general
//! geometry: every section except the innermost is rotated by the dihedral
//! of the section immediately inboard of it (the rotation describes the
//! panel between sections), and a tip section whose stored dihedral is
//! exactly zero inherits the previous section's dihedral (a zero tip
//! dihedral is a known export artifact).

use crate::error::{Error, Result};
use crate::library::AerofoilLibrary;
use crate::model::{Point3d, WingComponent, WingSection, WingType};
use nalgebra::{Rotation2, Vector2};

/// One section's computed points in the target frame
pub type SectionPoints = Vec<Point3d>;

/// Caller options for the section transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransformOptions {
    /// Add the parent component's position offset to every point
    pub shift_sections: bool,
}

/// Transform a wing component into one 3D point array per section
///
/// Output points are in the target frame (chordwise, spanwise, vertical).
/// Positive twist raises the leading edge; dihedral splits each segment's
/// span over the spanwise/vertical axes.
///
/// # Errors
///
/// [`Error::UnresolvedConflict`] when the library still has pending name
/// conflicts, and [`Error::AerofoilMissing`] when a section references a
/// profile the library does not hold; no partial arrays are returned in
/// either case.
pub fn transform_component(
    component: &WingComponent,
    library: &AerofoilLibrary,
    options: &TransformOptions,
) -> Result<Vec<SectionPoints>> {
    if let Some(conflict) = library.conflicts().first() {
        return Err(Error::UnresolvedConflict {
            name: conflict.incumbent.name.clone(),
        });
    }

    let sections = &component.sections;
    let mut result = Vec::with_capacity(sections.len());
    if sections.is_empty() {
        return Ok(result);
    }

    let spans = incremental_spans(sections);
    let dihedrals = effective_dihedrals(component);

    let mut spanwise_offset = 0.0;
    let mut vertical_offset = 0.0;

    for (i, section) in sections.iter().enumerate() {
        // Each segment contributes its incremental span split by its own
        // dihedral; the running sums place this section
        let placement = dihedrals[i].to_radians();
        spanwise_offset += spans[i] * placement.cos();
        vertical_offset += spans[i] * placement.sin();

        let points2d = resolve_profile_points(library, section, i + 1)?;

        // The rotation describes the panel between sections: every section
        // but the innermost takes the dihedral of the one inboard of it
        let panel = if i == 0 { dihedrals[0] } else { dihedrals[i - 1] }.to_radians();
        let twist = Rotation2::new(-section.twist.to_radians());
        let quarter = Vector2::new(section.chord * 0.25, 0.0);

        let mut points = Vec::with_capacity(points2d.len());
        for &(px, py) in &points2d {
            let x = px * section.chord;
            let y = py * section.chord;

            // Dihedral tilts the thickness axis out of the chord plane
            let vertical = y * panel.cos();
            let spanwise = y * panel.sin();

            // Twist pivots about the quarter-chord point in the chord plane
            let rotated = twist * (Vector2::new(x, vertical) - quarter) + quarter;

            let chordwise = rotated.x + section.x_offset;
            let vertical = rotated.y + vertical_offset;
            let spanwise = spanwise + spanwise_offset;

            // Build frame is (chordwise, vertical, spanwise); the target
            // frame orders axes (chordwise, spanwise, vertical)
            let mut point = (chordwise, spanwise, vertical);
            if options.shift_sections {
                point = (
                    point.0 + component.position.0,
                    point.1 + component.position.1,
                    point.2 + component.position.2,
                );
            }
            points.push(point);
        }
        result.push(points);
    }

    Ok(result)
}

/// Recover per-segment span lengths from absolute spanwise positions
///
/// Each section's stored position is absolute along the span; subtracting
/// the running total of prior increments recovers the segment lengths
/// regardless of how the source expressed span. Re-accumulating the
/// increments reproduces the original absolute positions.
pub fn incremental_spans(sections: &[WingSection]) -> Vec<f64> {
    let mut spans = Vec::with_capacity(sections.len());
    let mut accumulated = 0.0;
    for section in sections {
        let increment = section.span_position - accumulated;
        spans.push(increment);
        accumulated += increment;
    }
    spans
}

/// Per-section dihedrals with the fin and zero-tip fixups applied
///
/// Fin sections are declared relative to the vertical reference plane, so a
/// fixed 90° is added to each. A tip section whose stored dihedral is
/// exactly zero takes the previous section's value instead.
pub fn effective_dihedrals(component: &WingComponent) -> Vec<f64> {
    let fin = component.is_fin || component.wing_type == WingType::Fin;
    let mut dihedrals: Vec<f64> = component
        .sections
        .iter()
        .map(|s| if fin { s.dihedral + 90.0 } else { s.dihedral })
        .collect();
    if let Some(tip) = dihedrals.len().checked_sub(1) {
        if tip > 0 && component.sections[tip].dihedral == 0.0 {
            dihedrals[tip] = dihedrals[tip - 1];
        }
    }
    dihedrals
}

/// Scaled 2D profile points for one section
///
/// Matching left/right names use that one profile; mismatched names stack
/// the left profile's points followed by the right profile's as two
/// half-sets sharing the section.
fn resolve_profile_points(
    library: &AerofoilLibrary,
    section: &WingSection,
    section_index: usize,
) -> Result<Vec<(f64, f64)>> {
    let left = library
        .profile(&section.left_foil)
        .ok_or_else(|| Error::AerofoilMissing {
            name: section.left_foil.trim().to_string(),
            section: section_index,
        })?;
    if section.left_foil.trim() == section.right_foil.trim() {
        return Ok(left.points.clone());
    }
    let right = library
        .profile(&section.right_foil)
        .ok_or_else(|| Error::AerofoilMissing {
            name: section.right_foil.trim().to_string(),
            section: section_index,
        })?;
    Ok(left.points.iter().chain(right.points.iter()).copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(span: f64, dihedral: f64) -> WingSection {
        WingSection {
            span_position: span,
            chord: 1.0,
            x_offset: 0.0,
            dihedral,
            twist: 0.0,
            x_panels: 7,
            x_distribution: Default::default(),
            y_panels: 5,
            y_distribution: Default::default(),
            left_foil: "F".to_string(),
            right_foil: "F".to_string(),
        }
    }

    #[test]
    fn test_incremental_spans_difference_chain() {
        let sections = vec![section(0.0, 0.0), section(1.0, 0.0), section(2.5, 0.0)];
        assert_eq!(incremental_spans(&sections), vec![0.0, 1.0, 1.5]);
    }

    #[test]
    fn test_zero_tip_dihedral_substitution() {
        let mut component = WingComponent::new("W", WingType::MainWing);
        component.sections = vec![section(0.0, 3.0), section(1.0, 5.0), section(2.0, 0.0)];
        assert_eq!(effective_dihedrals(&component), vec![3.0, 5.0, 5.0]);
    }

    #[test]
    fn test_fin_dihedral_offset() {
        let mut component = WingComponent::new("F", WingType::Fin);
        component.sections = vec![section(0.0, 0.0), section(1.0, 2.0)];
        assert_eq!(effective_dihedrals(&component), vec![90.0, 92.0]);
    }
}
