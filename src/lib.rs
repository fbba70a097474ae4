//! # wingpoint
//!
//! Converts an XFLR5-style aircraft design document (`explane` XML) into
//! per-section 3D point sequences for downstream CAD tooling, and maintains
//! a library of 2D aerofoil profile files with automatic Selig/Lednicer
//! format detection and duplicate-name conflict reporting.
//!
//! ## Pipeline
//!
//! - [`TreeNode`] parses any XML document into an order-preserving tree.
//! - [`build_plane`] walks that tree into a typed [`AircraftModel`],
//!   applying the caller's unit preferences.
//! - [`AerofoilLibrary`] loads and resolves the 2D profile set.
//! - [`transform_component`] places each section's profile in 3D space.
//!
//! ## Example
//!
//! ```no_run
//! use wingpoint::{convert_plane, AerofoilLibrary, TransformOptions, UnitPreferences};
//!
//! # fn main() -> wingpoint::Result<()> {
//! let mut library = AerofoilLibrary::load("foils/")?;
//! library.resolve(&[])?; // no conflicts expected here
//!
//! let xml = std::fs::read_to_string("plane.xml")?;
//! let (components, warnings) = convert_plane(
//!     &xml,
//!     &UnitPreferences::default(),
//!     &library,
//!     &TransformOptions::default(),
//! )?;
//! for warning in &warnings {
//!     eprintln!("warning: {}", warning);
//! }
//! println!("converted {} wing components", components.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod builder;
pub mod error;
pub mod geometry;
pub mod library;
pub mod model;
pub mod profile;
pub mod tree;
pub mod units;
pub mod writer;

pub use builder::{SUPPORTED_SCHEMA_VERSION, build_plane};
pub use error::{BuildWarning, Error, Result};
pub use geometry::{SectionPoints, TransformOptions, transform_component};
pub use library::{AerofoilLibrary, ConflictChoice, FoilConflict};
pub use model::{
    AircraftModel, PanelDistribution, Point3d, PointMass, Rgba, WingComponent, WingSection,
    WingType,
};
pub use profile::{AerofoilProfile, FoilFormat};
pub use tree::{NodeSlot, TreeNode, escape_name, unescape_name};
pub use units::{LengthUnit, MassUnit, UnitPreferences};
pub use writer::{section_file_name, write_section_points};

/// One wing component's computed section arrays
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentPoints {
    /// Component name from the document
    pub name: String,
    /// Which of the four fixed slots the component fills
    pub wing_type: WingType,
    /// One point array per section, outboard order
    pub sections: Vec<SectionPoints>,
}

/// Convert a whole aircraft document into per-section point arrays
///
/// `source` is either an in-memory XML string or the path of a document on
/// disk. All wing components present in the document are transformed in
/// slot order (main wing, second wing, elevator, fin).
///
/// # Errors
///
/// Parse and build errors abort the conversion; a component whose transform
/// fails (missing aerofoil, unresolved library conflicts) aborts with that
/// error and no partial arrays are returned.
pub fn convert_plane(
    source: &str,
    prefs: &UnitPreferences,
    library: &AerofoilLibrary,
    options: &TransformOptions,
) -> Result<(Vec<ComponentPoints>, Vec<BuildWarning>)> {
    let root = TreeNode::parse(source)?;
    let (model, warnings) = build_plane(&root, prefs)?;

    let mut components = Vec::new();
    for wing in model.wings() {
        let sections = transform_component(wing, library, options)?;
        components.push(ComponentPoints {
            name: wing.name.clone(),
            wing_type: wing.wing_type,
            sections,
        });
    }

    Ok((components, warnings))
}
