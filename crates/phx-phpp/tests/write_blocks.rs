
use phx_phpp::{
    CellValue, GlazingRow, InMemoryWorkbook, PhppConnection, PhppError, PhppShape,
    UValueConstructor, UValueLayer,
};
use test_helpers::*;

fn glazing(description: &str, g_value: f64) -> GlazingRow {
    GlazingRow {
        description: description.into(),
        g_value,
        u_value: 0.6,
    }
}

fn connection() -> PhppConnection<InMemoryWorkbook> {
    let shape = PhppShape::english_10().unwrap();
    PhppConnection::new(template(&shape), shape)
}

#[test]
fn written_glazing_is_found_by_name() {
    let mut phpp = connection();
    phpp.write_glazings(&[glazing("Glazing A", 0.5), glazing("Glazing B", 0.45)])
        .unwrap();

    assert_eq!(
        phpp.get_glazing_phpp_id_by_name("Glazing A").unwrap().as_deref(),
        Some("1-Glazing A")
    );
    assert_eq!(
        phpp.get_glazing_phpp_id_by_name("Glazing B").unwrap().as_deref(),
        Some("2-Glazing B")
    );
    assert_eq!(phpp.get_glazing_phpp_id_by_name("Glazing C").unwrap(), None);

    let wb = phpp.workbook();
    assert_eq!(wb.get("Components", "IF", 13), CellValue::Number(0.45));
    assert_eq!(wb.get("Components", "IG", 12), CellValue::Number(0.6));
}

#[test]
fn matching_description_is_overwritten_in_place() {
    let mut phpp = connection();
    phpp.write_glazings(&[glazing("Glazing A", 0.5), glazing("Glazing B", 0.45)])
        .unwrap();
    phpp.write_glazings(&[glazing("Glazing B", 0.3), glazing("Glazing C", 0.6)])
        .unwrap();

    let wb = phpp.workbook();
    assert_eq!(
        listed(wb, "Components", "IE", 12..=111),
        ["Glazing A", "Glazing B", "Glazing C"]
    );
    assert_eq!(wb.get("Components", "IF", 13), CellValue::Number(0.3));
}

#[test]
fn repeated_descriptions_get_rows_of_their_own() {
    let mut phpp = connection();
    phpp.write_glazings(&[glazing("Same", 0.5), glazing("Same", 0.3)])
        .unwrap();
    assert_eq!(listed(phpp.workbook(), "Components", "IE", 12..=111), ["Same", "Same"]);
    assert_eq!(phpp.workbook().get("Components", "IF", 12), CellValue::Number(0.5));
    assert_eq!(phpp.workbook().get("Components", "IF", 13), CellValue::Number(0.3));

    // A second write of both reuses the same two rows.
    phpp.write_glazings(&[glazing("Same", 0.4), glazing("Same", 0.2)])
        .unwrap();
    let wb = phpp.workbook();
    assert_eq!(listed(wb, "Components", "IE", 12..=111), ["Same", "Same"]);
    assert_eq!(wb.get("Components", "IF", 12), CellValue::Number(0.4));
    assert_eq!(wb.get("Components", "IF", 13), CellValue::Number(0.2));
}

#[test]
fn hand_entered_rows_are_kept() {
    let shape = PhppShape::english_10().unwrap();
    let mut wb = template(&shape);
    wb.set("Components", "IE", 12, "From the manufacturer");
    let mut phpp = PhppConnection::new(wb, shape);

    phpp.write_glazings(&[glazing("Glazing A", 0.5)]).unwrap();
    assert_eq!(
        phpp.get_glazing_phpp_id_by_name("Glazing A").unwrap().as_deref(),
        Some("2-Glazing A")
    );
}

#[test]
fn full_block_is_an_error() {
    let mut shape = PhppShape::english_10().unwrap();
    shape.glazings.capacity = 2;
    let mut phpp = PhppConnection::new(template(&shape), shape);

    let err = phpp
        .write_glazings(&[glazing("A", 0.5), glazing("B", 0.5), glazing("C", 0.5)])
        .unwrap_err();
    assert!(matches!(err, PhppError::BlockFull { ref description, .. } if description == "C"));
}

#[test]
fn missing_anchor_names_what_was_sought() {
    let shape = PhppShape::english_10().unwrap();
    let mut phpp = PhppConnection::new(InMemoryWorkbook::new(SHEETS), shape);

    let err = phpp.write_glazings(&[glazing("A", 0.5)]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Could not find 'Glazing' in column ID of worksheet 'Components'. \
         Check that the workbook matches the selected PHPP shape."
    );
}

#[test]
fn u_value_constructors_fill_strided_slots() {
    let mut phpp = connection();
    let wall = UValueConstructor {
        description: "Wall".into(),
        r_si: 0.13,
        r_se: 0.04,
        layers: vec![UValueLayer {
            material: "Mineral wool".into(),
            conductivity: 0.035,
            thickness_mm: 240.0,
        }],
    };
    let roof = UValueConstructor {
        description: "Roof".into(),
        ..wall.clone()
    };
    phpp.write_u_value_constructors(&[wall, roof]).unwrap();

    assert_eq!(
        phpp.get_assembly_phpp_id_by_name("Roof").unwrap().as_deref(),
        Some("02ud-Roof")
    );
    let wb = phpp.workbook();
    assert_eq!(wb.get("U-Values", "M", 28), CellValue::from("Roof"));
    assert_eq!(wb.get("U-Values", "M", 30), CellValue::Number(0.13));
    assert_eq!(wb.get("U-Values", "L", 33), CellValue::from("Mineral wool"));
    assert_eq!(wb.get("U-Values", "S", 33), CellValue::Number(240.0));
}

#[test]
fn located_blocks_survive_until_invalidated() {
    let mut phpp = connection();
    phpp.write_glazings(&[glazing("A", 0.5)]).unwrap();
    phpp.invalidate();
    phpp.write_glazings(&[glazing("A", 0.4)]).unwrap();
    assert_eq!(
        listed(phpp.workbook(), "Components", "IE", 12..=111),
        ["A"]
    );
}
