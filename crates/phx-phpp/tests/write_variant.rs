
use phx_phpp::{CellValue, PhppConnection, PhppError, PhppShape};
use test_helpers::*;

fn written_single_zone() -> PhppConnection<phx_phpp::InMemoryWorkbook> {
    let project = assemble("single_zone.hbjson");
    let shape = PhppShape::english_10().unwrap();
    let mut phpp = PhppConnection::new(template(&shape), shape);
    phpp.write_variant(&project, &project.variants[0]).unwrap();
    phpp
}

#[test]
fn libraries_are_written_first() {
    let mut phpp = written_single_zone();
    assert_eq!(
        listed(phpp.workbook(), "U-Values", "M", 7..=7),
        ["Ground Slab"]
    );
    assert_eq!(
        phpp.get_glazing_phpp_id_by_name("Glazing A").unwrap().as_deref(),
        Some("1-Glazing A")
    );
    assert_eq!(
        phpp.get_frame_phpp_id_by_name("Frame A").unwrap().as_deref(),
        Some("1-Frame A")
    );
    assert_eq!(
        phpp.get_ventilator_phpp_id_by_name("ERV-1").unwrap().as_deref(),
        Some("1-ERV-1")
    );
}

#[test]
fn surfaces_reference_their_assemblies() {
    let phpp = written_single_zone();
    let wb = phpp.workbook();
    assert_eq!(
        listed(wb, "Areas", "L", 12..=111),
        ["Floor", "Roof", "South Wall", "East Wall", "North Wall", "West Wall"]
    );

    let south = find_row(wb, "Areas", "L", "South Wall");
    assert_eq!(wb.get("Areas", "M", south), CellValue::Number(8.0));
    assert_eq!(wb.get("Areas", "AC", south), CellValue::from("03ud-Exterior Wall"));
    let number = |column: &str| wb.get("Areas", column, south).as_number().unwrap();
    assert!((number("AG") - 180.0).abs() < 1e-9);
    assert!((number("U") - 30.0).abs() < 1e-9);

    let roof = find_row(wb, "Areas", "L", "Roof");
    assert_eq!(wb.get("Areas", "M", roof), CellValue::Number(10.0));
    let floor = find_row(wb, "Areas", "L", "Floor");
    assert_eq!(wb.get("Areas", "M", floor), CellValue::Number(11.0));
}

#[test]
fn windows_reference_host_glazing_and_frame() {
    let phpp = written_single_zone();
    let wb = phpp.workbook();
    let row = find_row(wb, "Windows", "M", "South Window");
    assert_eq!(wb.get("Windows", "S", row), CellValue::from("3-South Wall"));
    assert_eq!(wb.get("Windows", "T", row), CellValue::from("1-Glazing A"));
    assert_eq!(wb.get("Windows", "U", row), CellValue::from("1-Frame A"));

    let width = wb.get("Windows", "Q", row).as_number().unwrap();
    let height = wb.get("Windows", "R", row).as_number().unwrap();
    assert!((width - 2.0).abs() < 1e-9);
    assert!((height - 1.5).abs() < 1e-9);
}

#[test]
fn surfaces_sharing_a_name_keep_their_own_rows() {
    let mut project = assemble("single_zone.hbjson");
    let roof = project.variants[0]
        .building
        .components
        .iter_mut()
        .find(|c| c.display_name == "Roof")
        .unwrap();
    roof.display_name = "South Wall".into();

    let shape = PhppShape::english_10().unwrap();
    let mut phpp = PhppConnection::new(template(&shape), shape);
    phpp.write_variant(&project, &project.variants[0]).unwrap();

    let wb = phpp.workbook();
    assert_eq!(
        listed(wb, "Areas", "L", 12..=111),
        ["Floor", "South Wall", "South Wall", "East Wall", "North Wall", "West Wall"]
    );
    assert_eq!(wb.get("Areas", "M", 13), CellValue::Number(10.0));
    assert_eq!(wb.get("Areas", "M", 14), CellValue::Number(8.0));

    // The window sits in the second "South Wall", not the renamed roof.
    let row = find_row(wb, "Windows", "M", "South Window");
    assert_eq!(wb.get("Windows", "S", row), CellValue::from("3-South Wall"));
}

#[test]
fn ventilation_entries_chain_to_the_unit() {
    let phpp = written_single_zone();
    let wb = phpp.workbook();

    let unit = find_row(wb, "Additional Vent", "D", "ERV-1");
    assert_eq!(wb.get("Additional Vent", "F", unit), CellValue::from("1-ERV-1"));

    let rooms = listed(wb, "Additional Vent", "D", 12..=41);
    assert_eq!(rooms.len(), 2);
    for row in 12..=13 {
        assert_eq!(wb.get("Additional Vent", "F", row), CellValue::from("1-ERV-1"));
    }
    let supply = wb.get("Additional Vent", "J", 12).as_number().unwrap();
    assert!((supply - 36.0).abs() < 1e-6);

    assert_eq!(
        listed(wb, "Additional Vent", "D", 102..=111),
        ["Supply Duct", "Exhaust Duct"]
    );
    assert_eq!(wb.get("Additional Vent", "F", 102), CellValue::from("1-ERV-1"));
    let length = wb.get("Additional Vent", "G", 102).as_number().unwrap();
    assert!((length - 5.0).abs() < 1e-9);
}

#[test]
fn whole_write_is_one_silent_scope() {
    let phpp = written_single_zone();
    let wb = phpp.workbook();
    assert_eq!(wb.silent_transitions(), [true, false]);
    assert_eq!(wb.recalculations(), 1);
}

#[test]
fn failed_write_still_resumes_the_workbook() {
    let project = assemble("single_zone.hbjson");
    let mut shape = PhppShape::english_10().unwrap();
    let mut wb = template(&shape);
    shape.windows.locator.header_anchor = "Fenster".into();
    wb.set("Windows", "M", 10, "Beschreibung");
    let mut phpp = PhppConnection::new(wb, shape);

    let err = phpp.write_variant(&project, &project.variants[0]).unwrap_err();
    assert!(matches!(err, PhppError::ShapeNotFound { ref anchor, .. } if anchor == "Fenster"));
    let wb = phpp.workbook();
    assert!(!wb.is_silent());
    assert_eq!(wb.silent_transitions(), [true, false]);
    assert_eq!(wb.recalculations(), 1);
}
