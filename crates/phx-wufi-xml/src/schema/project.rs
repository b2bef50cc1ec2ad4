use crate::error::Result;
use crate::writable::{Entity, Writable, list, node, object, object_as};

pub(super) fn project<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let p = expect_entity!(e, Project, "PhxProject");
    Ok(vec![
        node("DataVersion", p.data_version),
        node("UnitSystem", p.unit_system),
        node("ProgramVersion", &p.program_version),
        node("Scope", p.scope),
        node("DimensionsVisualizedGeometry", p.visualized_geometry),
        object("ProjectData", Entity::ProjectData(&p.project_data)),
        list(
            "UtilizationPatternsVentilation",
            p.utilization_patterns_ventilation
                .iter()
                .map(|u| object("UtilizationPatternVent", Entity::VentPattern(u))),
        ),
        list(
            "Variants",
            p.variants
                .iter()
                .map(|v| object("Variant", Entity::Variant(v))),
        ),
        list(
            "Assemblies",
            p.assembly_types
                .values()
                .map(|a| object("Assembly", Entity::Assembly(a))),
        ),
        list(
            "WindowTypes",
            p.window_types
                .values()
                .map(|w| object("WindowType", Entity::WindowType(w))),
        ),
    ])
}

pub(super) fn project_data<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let d = expect_entity!(e, ProjectData, "PhxProjectData");
    let mut out = vec![
        node("Customer_Name", &d.customer.name),
        node("Customer_Street", &d.customer.street),
        node("Customer_Locality", &d.customer.city),
        node("Customer_PostalCode", &d.customer.post_code),
        node("Customer_Tel", &d.customer.telephone),
        node("Customer_Email", &d.customer.email),
        node("Building_Name", &d.building.name),
        node("Building_Street", &d.building.street),
        node("Building_Locality", &d.building.city),
        node("Building_PostalCode", &d.building.post_code),
        node("Owner_IsClient", d.owner_is_client),
        node("Owner_Name", &d.owner.name),
        node("Owner_Street", &d.owner.street),
        node("Owner_Locality", &d.owner.city),
        node("Owner_PostalCode", &d.owner.post_code),
        node("Responsible_Name", &d.designer.name),
        node("Responsible_Street", &d.designer.street),
        node("Responsible_Locality", &d.designer.city),
        node("Responsible_PostalCode", &d.designer.post_code),
        node("Responsible_Tel", &d.designer.telephone),
        node("Responsible_LicenseNr", &d.designer.license_number),
        node("Responsible_Email", &d.designer.email),
        node("Date_Project", &d.project_date),
        node("Year_Construction", d.year_constructed),
    ];
    if let Some(image) = &d.image {
        out.push(node("WhiteBackgroundPictureBuilding", image));
    }
    Ok(out)
}

pub(super) fn vent_pattern<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let u = expect_entity!(e, VentPattern, "UtilizationPatternVent");
    let p = &u.operating_periods;
    Ok(vec![
        node("Name", &u.display_name),
        node("IdentNr", u.id_num),
        node("OperatingDays", u.operating_days),
        node("OperatingWeeks", u.operating_weeks),
        node("Maximum_DOS", p.high.period_operating_hours),
        node("Maximum_PDF", p.high.period_operation_speed),
        node("Standard_DOS", p.standard.period_operating_hours),
        node("Standard_PDF", p.standard.period_operation_speed),
        node("Basic_DOS", p.basic.period_operating_hours),
        node("Basic_PDF", p.basic.period_operation_speed),
        node("Minimum_DOS", p.minimum.period_operating_hours),
        node("Minimum_PDF", p.minimum.period_operation_speed),
    ])
}

pub(super) fn variant<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let v = expect_entity!(e, Variant, "PhxVariant");
    Ok(vec![
        node("IdentNr", v.id_num),
        node("Name", &v.name),
        node("Remarks", &v.remarks),
        node("PlugIn", &v.plugin),
        object("Graphics_3D", Entity::Graphics3D(&v.graphics3d)),
        object("Building", Entity::Building(&v.building)),
        object("ClimateLocation", Entity::Site(&v.site)),
        object("PassivehouseData", Entity::Certification(&v.phius_cert)),
        object_as("HVAC", Entity::Variant(v), "PhxVariant_HVAC"),
    ])
}
