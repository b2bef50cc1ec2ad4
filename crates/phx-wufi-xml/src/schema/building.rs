use phx::model::building::NO_REFERENCE;
use phx::model::elec_equip::ElectricDeviceKind;

use crate::error::Result;
use crate::writable::{Entity, Writable, list, node, node_unit, object, round_to};

pub(super) fn building<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let b = expect_entity!(e, Building, "PhxBuilding");
    Ok(vec![
        list(
            "Components",
            b.components
                .iter()
                .map(|c| object("Component", Entity::Component(c))),
        ),
        list(
            "Zones",
            b.zones.iter().map(|z| object("Zone", Entity::Zone(z))),
        ),
    ])
}

pub(super) fn component<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let c = expect_entity!(e, Component, "PhxComponent");
    Ok(vec![
        node("IdentNr", c.id_num),
        node("Name", &c.display_name),
        node("Visual", true),
        node("Type", c.face_opacity.code()),
        node("IdentNrColorI", c.color_interior.code()),
        node("IdentNrColorE", c.color_exterior.code()),
        node("InnerAttachment", c.exposure_interior),
        node("OuterAttachment", c.exposure_exterior.code()),
        node("IdentNr_ComponentInnerSurface", c.interior_attachment_id),
        node("IdentNrAssembly", c.assembly_type_id_num),
        node("IdentNrWindowType", c.window_type_id_num),
        list(
            "IdentNrPolygons",
            c.polygon_ids.iter().map(|id| node("IdentNr", *id)),
        ),
    ])
}

pub(super) fn zone<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let z = expect_entity!(e, Zone, "PhxZone");
    Ok(vec![
        node("Name", &z.display_name),
        node("KindZone", 1),
        node("KindAttachedZone", 0),
        node("TemperatureReductionFactorUserDefined", 1),
        node("IdentNr", z.id_num),
        list(
            "RoomsVentilation",
            z.wufi_rooms
                .iter()
                .map(|r| object("Room", Entity::RoomVentilation(r))),
        ),
        list(
            "HomeDevice",
            z.elec_equipment
                .devices()
                .map(|d| object("Device", Entity::HomeDevice(d))),
        ),
        node("GrossVolume_Selection", 7),
        node_unit("GrossVolume", z.volume_gross, "m³"),
        node("NetVolume_Selection", 6),
        node_unit("NetVolume", z.volume_net, "m³"),
        node("FloorArea_Selection", 6),
        node_unit("FloorArea", z.weighted_net_floor_area, "m²"),
        node("ClearanceHeight_Selection", 1),
        node_unit("ClearanceHeight", z.clearance_height, "m"),
        node(
            "SpecificHeatCapacity_Selection",
            z.specific_heat_capacity.selection_code(),
        ),
        node_unit(
            "SpecificHeatCapacity",
            z.specific_heat_capacity.wh_per_m2k(),
            "Wh/m²K",
        ),
        node("OccupantQuantityUserDef", z.res_occupant_quantity),
        node("NumberBedrooms", z.res_number_bedrooms),
    ])
}

fn id_or_none(id: Option<u32>) -> i32 {
    id.map_or(NO_REFERENCE, |id| id as i32)
}

pub(super) fn room_ventilation<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let r = expect_entity!(e, RoomVentilation, "PhxRoomVentilation");
    Ok(vec![
        node("Name", &r.display_name),
        node("Type", r.wufi_type),
        node(
            "IdentNrUtilizationPatternVent",
            id_or_none(r.vent_pattern_id_num),
        ),
        node("IdentNrVentilationUnit", id_or_none(r.ventilation_unit_id_num)),
        node("Quantity", r.quantity),
        node_unit("AreaRoom", r.weighted_floor_area, "m²"),
        node_unit("ClearRoomHeight", r.clear_height, "m"),
        node_unit(
            "DesignVolumeFlowRateSupply",
            round_to(r.flows.supply, 2),
            "m³/h",
        ),
        node_unit(
            "DesignVolumeFlowRateExhaust",
            round_to(r.flows.extract, 2),
            "m³/h",
        ),
        node_unit(
            "DesignFlowInterzonalUserDef",
            round_to(r.flows.transfer, 2),
            "m³/h",
        ),
    ])
}

pub(super) fn home_device<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let d = expect_entity!(e, HomeDevice, "PhxElectricalDevice");
    let mut out = vec![
        node("Name", &d.display_name),
        node("Comment", &d.comment),
        node("ReferenceQuantity", d.reference_quantity),
        node("Quantity", d.quantity),
        node("InConditionedSpace", d.in_conditioned_space),
        node("ReferenceEnergyDemandNorm", d.reference_energy_norm),
        node("EnergyDemandNorm", d.energy_demand),
        node("EnergyDemandNormUse", d.energy_demand_per_use),
        node("CEF_CombinedEnergyFactor", d.combined_energy_factor),
        node("Type", d.kind.type_code()),
    ];
    match &d.kind {
        ElectricDeviceKind::Dishwasher {
            capacity_type,
            capacity,
            water_connection,
        } => out.extend([
            node("DishwasherCapacityPreselection", *capacity_type),
            node("DishwasherCapacityInPlace", *capacity),
            node("DishwasherWaterConnection", *water_connection),
        ]),
        ElectricDeviceKind::ClothesWasher {
            capacity,
            modified_energy_factor,
            connection,
            utilization_factor,
        } => out.extend([
            node("CapacityClothesWasher", *capacity),
            node("MEF_ModifiedEnergyFactor", *modified_energy_factor),
            node("ClothesWasherWaterConnection", *connection),
            node("UtilizationFactor", *utilization_factor),
        ]),
        ElectricDeviceKind::ClothesDryer {
            dryer_type,
            gas_consumption,
            gas_efficiency_factor,
            field_utilization_factor_type,
            field_utilization_factor,
        } => out.extend([
            node("Dryer_Choice", dryer_type.code()),
            node("GasConsumption", *gas_consumption),
            node("EfficiencyFactorGas", *gas_efficiency_factor),
            node(
                "FieldUtilizationFactorPreselection",
                *field_utilization_factor_type,
            ),
            node("FieldUtilizationFactor", *field_utilization_factor),
        ]),
        ElectricDeviceKind::Cooktop { cooktop_type } => {
            out.push(node("CookingWith", *cooktop_type));
        }
        ElectricDeviceKind::LightingInterior {
            frac_high_efficiency,
        }
        | ElectricDeviceKind::LightingExterior {
            frac_high_efficiency,
        }
        | ElectricDeviceKind::LightingGarage {
            frac_high_efficiency,
        } => out.push(node("FractionHightEfficiency", *frac_high_efficiency)),
        ElectricDeviceKind::Refrigerator
        | ElectricDeviceKind::Freezer
        | ElectricDeviceKind::FridgeFreezer
        | ElectricDeviceKind::MiscElectric
        | ElectricDeviceKind::CustomElectric
        | ElectricDeviceKind::CustomLighting
        | ElectricDeviceKind::CustomMel => {}
    }
    Ok(out)
}
