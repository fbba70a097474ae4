//! Data structures representing a parsed aircraft design
//!
//! The model is a plain typed snapshot of one document: once built it is
//! immutable for the conversion run, and the geometry transform only reads
//! it. All length- and mass-valued fields are already converted to the
//! caller's target units by the builder.

/// A 3D point or offset as `(x, y, z)` in the document's axis convention
pub type Point3d = (f64, f64, f64);

/// The four fixed wing-component slots of an aircraft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WingType {
    /// Primary lifting surface
    MainWing,
    /// Secondary lifting surface
    SecondWing,
    /// Horizontal stabilizer
    Elevator,
    /// Vertical stabilizer
    Fin,
}

impl WingType {
    /// Classify a document type string into a slot
    ///
    /// Returns `None` for unrecognized type strings; the builder drops those
    /// components silently.
    pub fn from_type_str(s: &str) -> Option<WingType> {
        match s.trim() {
            "MAINWING" => Some(WingType::MainWing),
            "SECONDWING" => Some(WingType::SecondWing),
            "ELEVATOR" => Some(WingType::Elevator),
            "FIN" => Some(WingType::Fin),
            _ => None,
        }
    }
}

/// Chordwise/spanwise panelling distribution, passed through for meshing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelDistribution {
    /// Evenly spaced panels
    #[default]
    Uniform,
    /// Cosine-clustered panels
    Cosine,
    /// Sine-clustered panels
    Sine,
    /// Inverse-sine-clustered panels
    InverseSine,
}

impl PanelDistribution {
    /// Parse a document distribution string, `None` for unknown values
    pub fn from_type_str(s: &str) -> Option<PanelDistribution> {
        match s.trim() {
            "UNIFORM" => Some(PanelDistribution::Uniform),
            "COSINE" => Some(PanelDistribution::Cosine),
            "SINE" => Some(PanelDistribution::Sine),
            "INVERSE SINE" | "INVERSESINE" => Some(PanelDistribution::InverseSine),
            _ => None,
        }
    }
}

/// RGBA colour of a wing component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    /// Red channel
    pub red: u8,
    /// Green channel
    pub green: u8,
    /// Blue channel
    pub blue: u8,
    /// Alpha channel
    pub alpha: u8,
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba {
            red: 255,
            green: 255,
            blue: 255,
            alpha: 255,
        }
    }
}

/// A discrete mass entry used for inertia, not geometry
#[derive(Debug, Clone, PartialEq)]
pub struct PointMass {
    /// Free-form label from the document
    pub tag: String,
    /// Mass in target mass units
    pub mass: f64,
    /// Location in target length units
    pub coordinates: Point3d,
}

/// One cross-section of a wing component, outboard order as in the source
#[derive(Debug, Clone, PartialEq)]
pub struct WingSection {
    /// Absolute position along the span, in target length units
    pub span_position: f64,
    /// Chord length, in target length units
    pub chord: f64,
    /// Leading-edge chordwise offset (sweep), in target length units
    pub x_offset: f64,
    /// Dihedral angle in degrees
    pub dihedral: f64,
    /// Twist angle in degrees; the parent's tilt is already folded in
    pub twist: f64,
    /// Chordwise panel count (pass-through for meshing)
    pub x_panels: u32,
    /// Chordwise panel distribution (pass-through for meshing)
    pub x_distribution: PanelDistribution,
    /// Spanwise panel count (pass-through for meshing)
    pub y_panels: u32,
    /// Spanwise panel distribution (pass-through for meshing)
    pub y_distribution: PanelDistribution,
    /// Aerofoil profile name for the left side
    pub left_foil: String,
    /// Aerofoil profile name for the right side
    pub right_foil: String,
}

/// A wing-like component: main wing, second wing, elevator or fin
#[derive(Debug, Clone, PartialEq)]
pub struct WingComponent {
    /// Component name from the document
    pub name: String,
    /// Which of the four fixed slots this component fills
    pub wing_type: WingType,
    /// Free-form description
    pub description: String,
    /// Whether the component is mirrored across the centerline
    pub symmetric: bool,
    /// Whether the component is a fin
    pub is_fin: bool,
    /// Whether the fin is doubled
    pub is_double_fin: bool,
    /// Whether the fin is symmetric
    pub is_sym_fin: bool,
    /// Display colour
    pub color: Rgba,
    /// Position offset of the component, in target length units
    pub position: Point3d,
    /// Tilt angle in degrees (already folded into section twist)
    pub tilt_angle: f64,
    /// Total mass in target mass units
    pub mass: f64,
    /// Ordered cross-sections, root to tip
    pub sections: Vec<WingSection>,
}

impl WingComponent {
    /// An empty component in the given slot
    pub fn new(name: impl Into<String>, wing_type: WingType) -> Self {
        WingComponent {
            name: name.into(),
            wing_type,
            description: String::new(),
            symmetric: true,
            is_fin: false,
            is_double_fin: false,
            is_sym_fin: false,
            color: Rgba::default(),
            position: (0.0, 0.0, 0.0),
            tilt_angle: 0.0,
            mass: 0.0,
            sections: Vec::new(),
        }
    }
}

/// A complete parsed aircraft document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AircraftModel {
    /// Aircraft name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Schema version string as found in the document
    pub version: Option<String>,
    /// Whether the aircraft has a body component
    pub has_body: bool,
    /// Discrete inertia masses; may be empty
    pub point_masses: Vec<PointMass>,
    /// Primary lifting surface
    pub main_wing: Option<WingComponent>,
    /// Secondary lifting surface
    pub second_wing: Option<WingComponent>,
    /// Horizontal stabilizer
    pub elevator: Option<WingComponent>,
    /// Vertical stabilizer
    pub fin: Option<WingComponent>,
}

impl AircraftModel {
    /// Create an empty model
    pub fn new() -> Self {
        AircraftModel::default()
    }

    /// Iterate the wing components that are present, in slot order
    pub fn wings(&self) -> impl Iterator<Item = &WingComponent> {
        [
            self.main_wing.as_ref(),
            self.second_wing.as_ref(),
            self.elevator.as_ref(),
            self.fin.as_ref(),
        ]
        .into_iter()
        .flatten()
    }
}
