use profiledrill_camtools::{
    extract_profiles, CutListTable, ExtractionError, ExtractionMode, GcodeRenderer, ProgramWriter,
    ToolpathGenerator,
};
use profiledrill_core::{CellValue, FaceGroup, FaceLabel, HeightCatalog, HoleSpec, ToolpathConfig};

const CUTLIST: &str = r#"{
    "columns": ["profiel_naam", "profiel_type", "orientatie", "lengte_mm", "aantal", "zijde", "g1", "g2"],
    "rows": [
        ["Staander", "20x40", "staand", 1200, 2, null, null, null],
        [null, null, null, null, null, "BOVENKANT Y10", "390@4.3", "711.5@4.3"],
        [null, null, null, null, null, "zijkant y30", "20@5", null],
        ["Ligger", "40×40", null, 800, null, null, null, null],
        ["Afdeklat", "20x20", null, 600, 1, null, null, null],
        [null, null, null, null, null, "BOVENKANT", "notitie", 12]
    ]
}"#;

fn table() -> CutListTable {
    CutListTable::from_json_str(CUTLIST).unwrap()
}

#[test]
fn test_extraction_from_json_table() {
    let extraction = extract_profiles(&table()).unwrap();

    assert!(matches!(extraction.mode, ExtractionMode::Faced { marker_column: 5, .. }));
    assert_eq!(extraction.profiles.len(), 1);
    assert_eq!(extraction.dropped.len(), 2);

    let p = &extraction.profiles[0];
    assert_eq!(p.name, "Staander");
    assert_eq!(p.cross_section_type.as_deref(), Some("20x40"));
    assert_eq!(p.orientation.as_deref(), Some("staand"));
    assert_eq!(p.length_mm, 1200.0);
    assert_eq!(p.qty, 2);

    let top = FaceLabel::new(FaceGroup::Top, "Y10");
    assert_eq!(top.row_offset_mm(), 10.0);
    assert_eq!(
        p.holes_by_face.get(&top).unwrap(),
        &[HoleSpec::new(390.0, 4.3).unwrap(), HoleSpec::new(711.5, 4.3).unwrap()]
    );
    assert_eq!(
        p.holes_by_face.get(&FaceLabel::new(FaceGroup::Side, "Y30")).unwrap(),
        &[HoleSpec::new(20.0, 5.0).unwrap()]
    );
}

#[test]
fn test_missing_identity_columns_abort() {
    let table = CutListTable::new(vec!["type".to_string(), "zijde".to_string()])
        .with_row(vec![CellValue::from("20x20"), CellValue::from("TOP")]);
    let err = extract_profiles(&table).unwrap_err();
    assert!(matches!(err, ExtractionError::MissingColumns { ref missing } if missing.len() == 2));
}

#[test]
fn test_rendered_program() {
    let extraction = extract_profiles(&table()).unwrap();
    let config = ToolpathConfig::default();
    let catalog = HeightCatalog::default();
    let generator = ToolpathGenerator::new(&config, &catalog).unwrap();
    let program = generator.generate(&extraction.profiles[0]);
    let gcode = GcodeRenderer::new().render(&program.ops);
    let lines: Vec<&str> = gcode.lines().collect();

    assert_eq!(
        &lines[..7],
        &[
            "(Staander - 20x40 L=1200.0 mm)",
            "G90 G94 G91.1 G40 G49 G17",
            "G21",
            "G28 G91 Z0.",
            "G90",
            "G54",
            "S6000 M3",
        ]
    );
    assert!(gcode.contains("(OPERATION: TOP [height=40 -> Zc=55])"));
    assert!(gcode.contains("(ROW: TOP_Y10)"));
    assert!(gcode.contains("G0 X0.000 Y10.000\n"));
    assert!(gcode.contains("G0 X390.000\nG1 Z37.000 F50\nG1 Z-1.000 F150\nG0 Z55.000\n"));
    assert!(!gcode.contains("G0 Z40.000"));
    assert!(gcode.contains("M5\nG0 Z50.000\nM0 (<<< ROTATE PROFILE MANUALLY >>>)\nS6000 M3\nG0 Z35.000\n"));
    assert!(gcode.contains("G0 X0.000 Y300.000\n"));
    assert!(gcode.ends_with("M9\nM5\nG28 G91 Z0.\nG90\nG28 G91 X0. Y0.\nG90\nM30\n"));
    assert!(gcode.is_ascii());
}

#[test]
fn test_write_each_and_combined() {
    let extraction = extract_profiles(&table()).unwrap();
    let config = ToolpathConfig::default();
    let catalog = HeightCatalog::default();
    let generator = ToolpathGenerator::new(&config, &catalog).unwrap();
    let programs = generator.generate_all(&extraction.profiles);

    let dir = tempfile::tempdir().unwrap();
    let writer = ProgramWriter::new(dir.path().join("nc"));

    let outcomes = writer.write_each(&programs);
    assert_eq!(outcomes.len(), 1);
    let path = outcomes[0].result.as_ref().unwrap();
    assert_eq!(path.file_name().unwrap(), "Staander.tap");
    let text = std::fs::read_to_string(path).unwrap();
    assert!(text.starts_with("(Staander - 20x40 L=1200.0 mm)\n"));

    let combined = writer.write_combined(&programs).unwrap();
    assert_eq!(combined.file_name().unwrap(), "all_profiles.tap");
    assert_eq!(std::fs::read_to_string(combined).unwrap(), text);
}

#[test]
fn test_combined_file_separates_programs() {
    let table = CutListTable::from_json_str(
        r#"{"columns": ["profile", "length_mm", "zijde", "g1"],
            "rows": [["B 2", 500, "TOP", "10@5"], ["A 1", 400, "SIDE", "20@5"]]}"#,
    )
    .unwrap();
    let extraction = extract_profiles(&table).unwrap();
    let names: Vec<&str> = extraction.profiles.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["A 1", "B 2"]);

    let config = ToolpathConfig::default();
    let catalog = HeightCatalog::default();
    let generator = ToolpathGenerator::new(&config, &catalog).unwrap();
    let programs = generator.generate_all(&extraction.profiles);

    let dir = tempfile::tempdir().unwrap();
    let writer = ProgramWriter::new(dir.path());
    let text = std::fs::read_to_string(writer.write_combined(&programs).unwrap()).unwrap();
    assert_eq!(text.matches("M30\n").count(), 2);
    assert!(text.contains("M30\n\n(B 2 - L=500.0 mm)\n"));

    let outcomes = writer.write_each(&programs);
    let files: Vec<String> = outcomes
        .iter()
        .map(|o| o.result.as_ref().unwrap().file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(files, vec!["A_1.tap", "B_2.tap"]);
}

#[test]
fn test_write_failure_is_per_profile() {
    let extraction = extract_profiles(&table()).unwrap();
    let config = ToolpathConfig::default();
    let catalog = HeightCatalog::default();
    let generator = ToolpathGenerator::new(&config, &catalog).unwrap();
    let programs = generator.generate_all(&extraction.profiles);

    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not_a_dir");
    std::fs::write(&blocker, "x").unwrap();

    let writer = ProgramWriter::new(&blocker);
    let outcomes = writer.write_each(&programs);
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].result.is_err());
    assert!(writer.write_combined(&programs).is_err());
}
