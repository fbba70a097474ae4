//! Tests for building the typed aircraft model from a document tree

use wingpoint::{
    BuildWarning, Error, LengthUnit, MassUnit, PanelDistribution, TreeNode, UnitPreferences,
    WingType, build_plane,
};

fn plane_xml(version: &str, length_to_meter: &str, mass_to_kg: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<explane version="{version}">
    <Units>
        <length_unit_to_meter>{length_to_meter}</length_unit_to_meter>
        <mass_unit_to_kg>{mass_to_kg}</mass_unit_to_kg>
    </Units>
    <Plane>
        <Name>Test Plane</Name>
        <Description>two surface demo</Description>
        <Inertia>
            <Point_Mass>
                <Tag>battery</Tag>
                <Mass>0.25</Mass>
                <coordinates>   0.1,0, 0.02</coordinates>
            </Point_Mass>
            <Point_Mass>
                <Tag>servo</Tag>
                <Mass>0.05</Mass>
                <coordinates>0.3, 0.1, 0</coordinates>
            </Point_Mass>
        </Inertia>
        <has_body>false</has_body>
        <wing>
            <Name>Main Wing</Name>
            <Type>MAINWING</Type>
            <Color>
                <red>200</red>
                <green>100</green>
                <blue>50</blue>
                <alpha>255</alpha>
            </Color>
            <Description></Description>
            <Position>0.05, 0, 0.1</Position>
            <Tilt_angle>2</Tilt_angle>
            <Symetric>true</Symetric>
            <isFin>false</isFin>
            <isDoubleFin>false</isDoubleFin>
            <isSymFin>false</isSymFin>
            <Inertia>
                <Volume_Mass>1.5</Volume_Mass>
            </Inertia>
            <Sections>
                <Section>
                    <y_position>0</y_position>
                    <Chord>1.0</Chord>
                    <xOffset>0</xOffset>
                    <Dihedral>0</Dihedral>
                    <Twist>0</Twist>
                    <x_number_of_panels>13</x_number_of_panels>
                    <x_panel_distribution>COSINE</x_panel_distribution>
                    <y_number_of_panels>2</y_number_of_panels>
                    <y_panel_distribution>UNIFORM</y_panel_distribution>
                    <Left_Side_FoilName>SYM4</Left_Side_FoilName>
                    <Right_Side_FoilName>SYM4</Right_Side_FoilName>
                </Section>
                <Section>
                    <y_position>1.0</y_position>
                    <Chord>0.8</Chord>
                    <xOffset>0.05</xOffset>
                    <Dihedral>5</Dihedral>
                    <Twist>-1</Twist>
                    <x_number_of_panels>13</x_number_of_panels>
                    <x_panel_distribution>COSINE</x_panel_distribution>
                    <y_number_of_panels>2</y_number_of_panels>
                    <y_panel_distribution>UNIFORM</y_panel_distribution>
                    <Left_Side_FoilName>SYM4</Left_Side_FoilName>
                    <Right_Side_FoilName>SYM4</Right_Side_FoilName>
                </Section>
            </Sections>
        </wing>
        <wing>
            <Name>Rudder</Name>
            <Type>FIN</Type>
            <isFin>true</isFin>
            <Sections>
                <Section>
                    <y_position>0</y_position>
                    <Chord>0.3</Chord>
                    <Left_Side_FoilName>SYM4</Left_Side_FoilName>
                    <Right_Side_FoilName>SYM4</Right_Side_FoilName>
                </Section>
            </Sections>
        </wing>
        <wing>
            <Name>Mystery</Name>
            <Type>CANARD</Type>
            <Sections>
            </Sections>
        </wing>
    </Plane>
</explane>
"#
    )
}

fn meters() -> UnitPreferences {
    UnitPreferences::new(LengthUnit::Meter, MassUnit::Kilogram)
}

/// Test a full build of a well-formed document
#[test]
fn test_build_full_document() {
    let root = TreeNode::from_xml(&plane_xml("1.0", "1", "1")).unwrap();
    let (model, warnings) = build_plane(&root, &meters()).unwrap();

    assert!(warnings.is_empty());
    assert_eq!(model.name, "Test Plane");
    assert_eq!(model.description, "two surface demo");
    assert_eq!(model.version.as_deref(), Some("1.0"));
    assert!(!model.has_body);

    assert_eq!(model.point_masses.len(), 2);
    assert_eq!(model.point_masses[0].tag, "battery");
    assert_eq!(model.point_masses[0].mass, 0.25);
    assert_eq!(model.point_masses[0].coordinates, (0.1, 0.0, 0.02));

    let wing = model.main_wing.as_ref().expect("main wing slot filled");
    assert_eq!(wing.name, "Main Wing");
    assert_eq!(wing.wing_type, WingType::MainWing);
    assert_eq!(wing.color.red, 200);
    assert_eq!(wing.color.green, 100);
    assert_eq!(wing.position, (0.05, 0.0, 0.1));
    assert_eq!(wing.tilt_angle, 2.0);
    assert_eq!(wing.mass, 1.5);
    assert_eq!(wing.sections.len(), 2);

    let tip = &wing.sections[1];
    assert_eq!(tip.span_position, 1.0);
    assert_eq!(tip.chord, 0.8);
    assert_eq!(tip.x_offset, 0.05);
    assert_eq!(tip.dihedral, 5.0);
    assert_eq!(tip.x_panels, 13);
    assert_eq!(tip.x_distribution, PanelDistribution::Cosine);
    assert_eq!(tip.y_distribution, PanelDistribution::Uniform);
    assert_eq!(tip.left_foil, "SYM4");

    let fin = model.fin.as_ref().expect("fin slot filled");
    assert!(fin.is_fin);
    assert_eq!(fin.sections.len(), 1);

    // The unrecognized CANARD type is dropped silently
    assert!(model.second_wing.is_none());
    assert!(model.elevator.is_none());
    assert_eq!(model.wings().count(), 2);
}

/// Test that the component tilt is folded into every section's twist
#[test]
fn test_tilt_folded_into_twist() {
    let root = TreeNode::from_xml(&plane_xml("1.0", "1", "1")).unwrap();
    let (model, _) = build_plane(&root, &meters()).unwrap();
    let wing = model.main_wing.unwrap();
    assert_eq!(wing.sections[0].twist, 2.0);
    assert_eq!(wing.sections[1].twist, 1.0);
}

/// Test the document-factor times target-factor unit conversion
#[test]
fn test_unit_conversion_multipliers() {
    // Document stores lengths in millimeters and masses in grams
    let xml = plane_xml("1.0", "0.001", "0.001");
    let root = TreeNode::from_xml(&xml).unwrap();

    // Target meters/kilograms: every value scales by 0.001
    let (model, _) = build_plane(&root, &meters()).unwrap();
    let wing = model.main_wing.as_ref().unwrap();
    assert!((wing.sections[0].chord - 0.001).abs() < 1e-12);
    assert!((model.point_masses[0].mass - 0.00025).abs() < 1e-12);

    // Target millimeters: document values come through unchanged
    let prefs = UnitPreferences::new(LengthUnit::Millimeter, MassUnit::Kilogram);
    let (model, _) = build_plane(&root, &prefs).unwrap();
    let wing = model.main_wing.as_ref().unwrap();
    assert!((wing.sections[0].chord - 1.0).abs() < 1e-12);
    // Angles are never unit-converted
    assert_eq!(wing.sections[1].dihedral, 5.0);
}

/// Test that a schema version mismatch is a warning, not a failure
#[test]
fn test_version_mismatch_is_warning() {
    let root = TreeNode::from_xml(&plane_xml("2.3", "1", "1")).unwrap();
    let (model, warnings) = build_plane(&root, &meters()).unwrap();
    assert_eq!(model.name, "Test Plane");
    assert_eq!(warnings.len(), 1);
    match &warnings[0] {
        BuildWarning::SchemaVersion { found, expected } => {
            assert_eq!(found.as_deref(), Some("2.3"));
            assert_eq!(*expected, "1.0");
        }
    }
}

/// Test that a missing required leaf fails with the full field path
#[test]
fn test_missing_chord_names_field_path() {
    let xml = plane_xml("1.0", "1", "1").replace("<Chord>0.8</Chord>", "");
    let root = TreeNode::from_xml(&xml).unwrap();
    let err = build_plane(&root, &meters()).unwrap_err();
    match err {
        Error::Model { path, .. } => {
            assert_eq!(path, "Plane/wing[0]/Sections/Section[1]/Chord");
        }
        other => panic!("expected Model error, got {:?}", other),
    }
}

/// Test that a non-numeric required leaf fails with the offending value
#[test]
fn test_non_numeric_leaf_is_rejected() {
    let xml = plane_xml("1.0", "1", "1").replace("<Chord>1.0</Chord>", "<Chord>wide</Chord>");
    let root = TreeNode::from_xml(&xml).unwrap();
    let err = build_plane(&root, &meters()).unwrap_err();
    match err {
        Error::Model { path, reason } => {
            assert_eq!(path, "Plane/wing[0]/Sections/Section[0]/Chord");
            assert!(reason.contains("wide"));
        }
        other => panic!("expected Model error, got {:?}", other),
    }
}

/// Test that absent point masses are valid
#[test]
fn test_absent_point_masses_are_valid() {
    let xml = r#"<explane version="1.0">
        <Units>
            <length_unit_to_meter>1</length_unit_to_meter>
            <mass_unit_to_kg>1</mass_unit_to_kg>
        </Units>
        <Plane>
            <Name>Bare</Name>
        </Plane>
    </explane>"#;
    let root = TreeNode::from_xml(xml).unwrap();
    let (model, _) = build_plane(&root, &meters()).unwrap();
    assert!(model.point_masses.is_empty());
    assert!(model.wings().next().is_none());
}

/// Test that a missing Units block is a model error
#[test]
fn test_missing_units_is_model_error() {
    let xml = r#"<explane version="1.0"><Plane><Name>X</Name></Plane></explane>"#;
    let root = TreeNode::from_xml(xml).unwrap();
    let err = build_plane(&root, &meters()).unwrap_err();
    assert!(matches!(err, Error::Model { path, .. } if path == "Units"));
}
