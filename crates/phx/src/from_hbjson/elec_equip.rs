use crate::error::{PhxError, Result};
use crate::hbjson::Room;
use crate::hbjson::ph::PhEquipment;
use crate::model::elec_equip::{
    DryerType, ElectricDeviceKind, PhxElectricDeviceCollection, PhxElectricalDevice,
};

const DEVICE_TYPES: &[&str] = &[
    "PhDishwasher",
    "PhClothesWasher",
    "PhClothesDryer",
    "PhFridge",
    "PhFreezer",
    "PhFridgeFreezer",
    "PhCooktop",
    "PhPhiusMEL",
    "PhPhiusLightingInterior",
    "PhPhiusLightingExterior",
    "PhPhiusLightingGarage",
    "PhCustomAnnualElectric",
    "PhCustomAnnualLighting",
    "PhCustomAnnualMEL",
];

fn device_kind(eq: &PhEquipment) -> Result<ElectricDeviceKind> {
    let frac_high_efficiency = eq.frac_high_efficiency.unwrap_or(1.0);
    let kind = match eq.device_type.as_str() {
        "PhDishwasher" => ElectricDeviceKind::Dishwasher {
            capacity_type: eq.capacity_type.unwrap_or(1),
            capacity: eq.capacity.unwrap_or(12.0),
            water_connection: eq.water_connection.unwrap_or(1),
        },
        "PhClothesWasher" => ElectricDeviceKind::ClothesWasher {
            capacity: eq.capacity.unwrap_or(0.1274),
            modified_energy_factor: eq.modified_energy_factor.unwrap_or(2.7),
            connection: eq.water_connection.unwrap_or(1),
            utilization_factor: eq.utilization_factor.unwrap_or(1.0),
        },
        "PhClothesDryer" => ElectricDeviceKind::ClothesDryer {
            dryer_type: match eq.dryer_type {
                Some(5) => DryerType::Gas,
                _ => DryerType::Electric,
            },
            gas_consumption: eq.gas_consumption.unwrap_or(0.0),
            gas_efficiency_factor: eq.gas_efficiency_factor.unwrap_or(2.67),
            field_utilization_factor_type: eq.field_utilization_factor_type.unwrap_or(1),
            field_utilization_factor: eq.field_utilization_factor.unwrap_or(1.18),
        },
        "PhFridge" => ElectricDeviceKind::Refrigerator,
        "PhFreezer" => ElectricDeviceKind::Freezer,
        "PhFridgeFreezer" => ElectricDeviceKind::FridgeFreezer,
        "PhCooktop" => ElectricDeviceKind::Cooktop {
            cooktop_type: eq.cooktop_type.unwrap_or(1),
        },
        "PhPhiusMEL" => ElectricDeviceKind::MiscElectric,
        "PhPhiusLightingInterior" => ElectricDeviceKind::LightingInterior { frac_high_efficiency },
        "PhPhiusLightingExterior" => ElectricDeviceKind::LightingExterior { frac_high_efficiency },
        "PhPhiusLightingGarage" => ElectricDeviceKind::LightingGarage { frac_high_efficiency },
        "PhCustomAnnualElectric" => ElectricDeviceKind::CustomElectric,
        "PhCustomAnnualLighting" => ElectricDeviceKind::CustomLighting,
        "PhCustomAnnualMEL" => ElectricDeviceKind::CustomMel,
        other => return Err(PhxError::unknown("device type", other, DEVICE_TYPES)),
    };
    Ok(kind)
}

pub(crate) fn build_device(eq: &PhEquipment) -> Result<PhxElectricalDevice> {
    let mut device = PhxElectricalDevice::new(eq.display_name(), device_kind(eq)?);
    device.comment = eq.comment.clone();
    device.reference_quantity = eq.reference_quantity;
    device.quantity = eq.quantity;
    device.in_conditioned_space = eq.in_conditioned_space;
    device.reference_energy_norm = eq.reference_energy_norm;
    device.energy_demand = eq.energy_demand;
    device.energy_demand_per_use = eq.energy_demand_per_use;
    device.combined_energy_factor = eq.combined_energy_factor;
    Ok(device)
}

/// Add the PH equipment of `room` to a zone's collection.
pub(crate) fn add_room_equipment(collection: &mut PhxElectricDeviceCollection, room: &Room) -> Result<()> {
    let Some(ee) = &room.properties.energy.electric_equipment else {
        return Ok(());
    };
    for eq in &ee.properties.ph.equipment_collection.equipment {
        collection.add_device(eq.key(), build_device(eq)?);
    }
    Ok(())
}
