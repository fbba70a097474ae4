//! Builds a typed [`AircraftModel`] from a parsed document tree
//!
//! The builder knows the source tool's schema: the `explane` root with its
//! `Units` declaration, the repeatable `wing` element classified by its
//! `Type` text, and the per-section leaves. Every length- and mass-valued
//! field is scaled by the document's declared to-SI factor times the
//! caller's target-unit factor. A schema-version mismatch is a warning, not
//! a failure; a missing or non-numeric required leaf fails with the full
//! field path.

use crate::error::{BuildWarning, Error, Result};
use crate::model::{
    AircraftModel, PanelDistribution, Point3d, PointMass, Rgba, WingComponent, WingSection,
    WingType,
};
use crate::tree::TreeNode;
use crate::units::UnitPreferences;

/// Schema version this builder was written against
pub const SUPPORTED_SCHEMA_VERSION: &str = "1.0";

/// Build an aircraft model from a parsed document tree
///
/// Returns the model together with any non-fatal warnings. Unrecognized
/// wing type strings are dropped silently; missing optional groups (point
/// masses, colour, description) are valid.
///
/// # Errors
///
/// [`Error::Model`] when a required leaf is missing or non-numeric; the
/// error names the full field path.
pub fn build_plane(
    root: &TreeNode,
    prefs: &UnitPreferences,
) -> Result<(AircraftModel, Vec<BuildWarning>)> {
    let mut warnings = Vec::new();

    let version = root.attr("version").map(str::to_string);
    if version.as_deref() != Some(SUPPORTED_SCHEMA_VERSION) {
        warnings.push(BuildWarning::SchemaVersion {
            found: version.clone(),
            expected: SUPPORTED_SCHEMA_VERSION,
        });
    }

    // The document declares its own to-SI factors; the target-unit factor
    // comes from the preference table
    let units = require_child(root, "Units", "")?;
    let length_to_meter = require_f64(units, "length_unit_to_meter", "Units")?;
    let mass_to_kg = require_f64(units, "mass_unit_to_kg", "Units")?;
    let length_scale = length_to_meter * prefs.length.units_per_meter();
    let mass_scale = mass_to_kg * prefs.mass.units_per_kilogram();

    let plane = require_child(root, "Plane", "")?;

    let mut model = AircraftModel::new();
    model.version = version;
    model.name = plane.child_text("Name").unwrap_or_default().to_string();
    model.description = plane
        .child_text("Description")
        .unwrap_or_default()
        .to_string();
    model.has_body = parse_bool(plane.child_text("has_body")).unwrap_or(false);

    if let Some(inertia) = plane.child("Inertia") {
        for (i, entry) in inertia.children("Point_Mass").iter().enumerate() {
            let path = format!("Plane/Inertia/Point_Mass[{}]", i);
            let mass = require_f64(entry, "Mass", &path)? * mass_scale;
            let coords = require_triple(entry, "coordinates", &path)?;
            model.point_masses.push(PointMass {
                tag: entry.child_text("Tag").unwrap_or_default().to_string(),
                mass,
                coordinates: scale_triple(coords, length_scale),
            });
        }
    }

    for (i, wing_node) in plane.children("wing").iter().enumerate() {
        let path = format!("Plane/wing[{}]", i);
        let Some(type_text) = wing_node.child_text("Type") else {
            continue;
        };
        let Some(wing_type) = WingType::from_type_str(type_text) else {
            // Unrecognized component types are dropped, not an error
            continue;
        };
        let wing = parse_wing(wing_node, wing_type, &path, length_scale, mass_scale)?;
        let slot = match wing_type {
            WingType::MainWing => &mut model.main_wing,
            WingType::SecondWing => &mut model.second_wing,
            WingType::Elevator => &mut model.elevator,
            WingType::Fin => &mut model.fin,
        };
        *slot = Some(wing);
    }

    Ok((model, warnings))
}

fn parse_wing(
    node: &TreeNode,
    wing_type: WingType,
    path: &str,
    length_scale: f64,
    mass_scale: f64,
) -> Result<WingComponent> {
    let name = node.child_text("Name").unwrap_or_default();
    let mut wing = WingComponent::new(name, wing_type);
    wing.description = node
        .child_text("Description")
        .unwrap_or_default()
        .to_string();
    wing.symmetric = parse_bool(node.child_text("Symetric")).unwrap_or(true);
    wing.is_fin = parse_bool(node.child_text("isFin")).unwrap_or(false);
    wing.is_double_fin = parse_bool(node.child_text("isDoubleFin")).unwrap_or(false);
    wing.is_sym_fin = parse_bool(node.child_text("isSymFin")).unwrap_or(false);

    if let Some(color) = node.child("Color") {
        let color_path = format!("{}/Color", path);
        wing.color = Rgba {
            red: optional_u8(color, "red", &color_path, 255)?,
            green: optional_u8(color, "green", &color_path, 255)?,
            blue: optional_u8(color, "blue", &color_path, 255)?,
            alpha: optional_u8(color, "alpha", &color_path, 255)?,
        };
    }

    if node.has_child("Position") {
        let position = require_triple(node, "Position", path)?;
        wing.position = scale_triple(position, length_scale);
    }
    wing.tilt_angle = optional_f64(node, "Tilt_angle", path, 0.0)?;

    if let Some(inertia) = node.child("Inertia") {
        let inertia_path = format!("{}/Inertia", path);
        wing.mass = optional_f64(inertia, "Volume_Mass", &inertia_path, 0.0)? * mass_scale;
    }

    let sections = require_child(node, "Sections", path)?;
    let sections_path = format!("{}/Sections", path);
    for (i, section) in sections.children("Section").iter().enumerate() {
        let spath = format!("{}/Section[{}]", sections_path, i);
        wing.sections
            .push(parse_section(section, &spath, wing.tilt_angle, length_scale)?);
    }

    Ok(wing)
}

fn parse_section(
    node: &TreeNode,
    path: &str,
    tilt_angle: f64,
    length_scale: f64,
) -> Result<WingSection> {
    Ok(WingSection {
        span_position: require_f64(node, "y_position", path)? * length_scale,
        chord: require_f64(node, "Chord", path)? * length_scale,
        x_offset: optional_f64(node, "xOffset", path, 0.0)? * length_scale,
        dihedral: optional_f64(node, "Dihedral", path, 0.0)?,
        // The component tilt is folded into every section's twist here so
        // the transform never needs the tilt separately
        twist: optional_f64(node, "Twist", path, 0.0)? + tilt_angle,
        x_panels: optional_u32(node, "x_number_of_panels", path, 7)?,
        x_distribution: parse_distribution(
            node,
            "x_panel_distribution",
            path,
            PanelDistribution::Cosine,
        )?,
        y_panels: optional_u32(node, "y_number_of_panels", path, 5)?,
        y_distribution: parse_distribution(
            node,
            "y_panel_distribution",
            path,
            PanelDistribution::Uniform,
        )?,
        left_foil: require_text(node, "Left_Side_FoilName", path)?.to_string(),
        right_foil: require_text(node, "Right_Side_FoilName", path)?.to_string(),
    })
}

fn join_path(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", path, name)
    }
}

fn require_child<'a>(node: &'a TreeNode, name: &str, path: &str) -> Result<&'a TreeNode> {
    node.child(name).ok_or_else(|| Error::Model {
        path: join_path(path, name),
        reason: "required element is missing".to_string(),
    })
}

fn require_text<'a>(node: &'a TreeNode, name: &str, path: &str) -> Result<&'a str> {
    let text = node.child_text(name).ok_or_else(|| Error::Model {
        path: join_path(path, name),
        reason: "required element is missing".to_string(),
    })?;
    if text.is_empty() {
        return Err(Error::Model {
            path: join_path(path, name),
            reason: "required element is empty".to_string(),
        });
    }
    Ok(text)
}

fn require_f64(node: &TreeNode, name: &str, path: &str) -> Result<f64> {
    let text = require_text(node, name, path)?;
    text.trim().parse::<f64>().map_err(|_| Error::Model {
        path: join_path(path, name),
        reason: format!("'{}' is not a number", text),
    })
}

fn optional_f64(node: &TreeNode, name: &str, path: &str, default: f64) -> Result<f64> {
    match node.child_text(name) {
        None => Ok(default),
        Some(text) if text.is_empty() => Ok(default),
        Some(text) => text.trim().parse::<f64>().map_err(|_| Error::Model {
            path: join_path(path, name),
            reason: format!("'{}' is not a number", text),
        }),
    }
}

fn optional_u32(node: &TreeNode, name: &str, path: &str, default: u32) -> Result<u32> {
    match node.child_text(name) {
        None => Ok(default),
        Some(text) if text.is_empty() => Ok(default),
        Some(text) => text.trim().parse::<u32>().map_err(|_| Error::Model {
            path: join_path(path, name),
            reason: format!("'{}' is not a non-negative integer", text),
        }),
    }
}

fn optional_u8(node: &TreeNode, name: &str, path: &str, default: u8) -> Result<u8> {
    match node.child_text(name) {
        None => Ok(default),
        Some(text) if text.is_empty() => Ok(default),
        Some(text) => text.trim().parse::<u8>().map_err(|_| Error::Model {
            path: join_path(path, name),
            reason: format!("'{}' is not a colour channel value (0-255)", text),
        }),
    }
}

fn parse_distribution(
    node: &TreeNode,
    name: &str,
    path: &str,
    default: PanelDistribution,
) -> Result<PanelDistribution> {
    match node.child_text(name) {
        None => Ok(default),
        Some(text) if text.is_empty() => Ok(default),
        Some(text) => PanelDistribution::from_type_str(text).ok_or_else(|| Error::Model {
            path: join_path(path, name),
            reason: format!("'{}' is not a panel distribution", text),
        }),
    }
}

fn parse_bool(text: Option<&str>) -> Option<bool> {
    match text?.trim().to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Parse a comma-separated coordinate list, stripping embedded whitespace
fn parse_coordinates(text: &str, count: usize, path: &str) -> Result<Vec<f64>> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let parts: Vec<&str> = compact.split(',').collect();
    if parts.len() != count {
        return Err(Error::Model {
            path: path.to_string(),
            reason: format!("expected {} comma-separated values, found {}", count, parts.len()),
        });
    }
    parts
        .iter()
        .map(|part| {
            part.parse::<f64>().map_err(|_| Error::Model {
                path: path.to_string(),
                reason: format!("'{}' is not a number", part),
            })
        })
        .collect()
}

fn require_triple(node: &TreeNode, name: &str, path: &str) -> Result<Point3d> {
    let full_path = join_path(path, name);
    let text = require_text(node, name, path)?;
    let values = parse_coordinates(text, 3, &full_path)?;
    Ok((values[0], values[1], values[2]))
}

fn scale_triple(point: Point3d, scale: f64) -> Point3d {
    (point.0 * scale, point.1 * scale, point.2 * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinates_strips_whitespace() {
        let values = parse_coordinates(" 1.5,  -2 , 0.25 ", 3, "p").unwrap();
        assert_eq!(values, [1.5, -2.0, 0.25]);
    }

    #[test]
    fn test_parse_coordinates_wrong_arity() {
        let err = parse_coordinates("1,2", 3, "Plane/Position").unwrap_err();
        assert!(matches!(err, Error::Model { path, .. } if path == "Plane/Position"));
    }

    #[test]
    fn test_parse_bool_vocabulary() {
        assert_eq!(parse_bool(Some("true")), Some(true));
        assert_eq!(parse_bool(Some("0")), Some(false));
        assert_eq!(parse_bool(Some("maybe")), None);
        assert_eq!(parse_bool(None), None);
    }
}
