use log::{debug, warn};

use crate::error::{PhxError, Result};
use crate::from_hbjson::{Assembly, MergedRoom};
use crate::hbjson::hvac::{PhCoolingParams, PhDuct, PhHeater, PhPipe, PhTank, PhUsageProfile};
use crate::hbjson::{Hvac, Room, Shw};
use crate::ids::IdClass;
use crate::model::mechanical::cooling::{
    CoolingViaDehumidification, CoolingViaPanel, CoolingViaRecirculation, CoolingViaVentilation,
    HeatPumpCoolingParams,
};
use crate::model::mechanical::distribution::{
    DuctType, PhxDistribution, PhxDuctElement, PhxPipeElement,
};
use crate::model::mechanical::heating::{
    DistrictHeatParams, FossilBoilerParams, FossilFuel, HeatPumpKind, HeatPumpParams,
    HeaterParams, WoodBoilerParams, WoodFuel,
};
use crate::model::mechanical::ventilation::VentilatorParams;
use crate::model::mechanical::water::{HotWaterTankParams, TankType};
use crate::model::mechanical::{
    DeviceParams, PhxMechanicalDevice, PhxMechanicalSubsystem, PhxMechanicalSystemCollection,
    PhxZoneCoverage, UsageProfile,
};

const HEATER_TYPES: &[&str] = &[
    "PhHeaterElectric",
    "PhHeaterBoilerFossil",
    "PhHeaterBoilerWood",
    "PhHeaterDistrictHeat",
    "PhHeatPumpAnnual",
    "PhHeatPumpRatedMonthly",
    "PhHeatPumpHotWater",
    "PhHeatPumpCombined",
];

fn room_hvac<'m>(asm: &Assembly<'m>, room: &Room) -> Result<Option<&'m Hvac>> {
    let model = asm.model;
    let Some(id) = room.properties.energy.hvac.as_deref() else {
        return Ok(None);
    };
    model
        .hvac(id)
        .map(Some)
        .ok_or_else(|| PhxError::UnresolvedReference {
            entity: room.display_name().to_string(),
            kind: "hvac",
            identifier: id.to_string(),
        })
}

fn room_shw<'m>(asm: &Assembly<'m>, room: &Room) -> Result<Option<&'m Shw>> {
    let model = asm.model;
    let Some(id) = room.properties.energy.shw.as_deref() else {
        return Ok(None);
    };
    model
        .shw(id)
        .map(Some)
        .ok_or_else(|| PhxError::UnresolvedReference {
            entity: room.display_name().to_string(),
            kind: "shw",
            identifier: id.to_string(),
        })
}

fn duct(asm: &mut Assembly<'_>, src: &PhDuct, duct_type: DuctType) -> PhxDuctElement {
    let display_name = src
        .display_name
        .clone()
        .or_else(|| src.identifier.clone())
        .unwrap_or_else(|| "_unnamed_duct_".to_string());
    PhxDuctElement {
        id_num: asm.ids.allocate(IdClass::Distribution),
        display_name,
        duct_type,
        length: src.length(),
        diameter: src.diameter,
        height: src.height,
        width: src.width,
        insulation_thickness: src.insulation_thickness,
        insulation_conductivity: src.insulation_conductivity,
        insulation_reflective: src.insulation_reflective,
        quantity: src.quantity,
    }
}

fn pipe(src: &PhPipe) -> PhxPipeElement {
    PhxPipeElement {
        display_name: src
            .display_name
            .clone()
            .unwrap_or_else(|| "_unnamed_pipe_".to_string()),
        length: src.length(),
        diameter: src.diameter_mm,
        insulation_thickness: src.insulation_thickness_mm,
        insulation_conductivity: src.insulation_conductivity,
        insulation_reflective: src.insulation_reflective,
    }
}

fn cooling(src: &PhCoolingParams) -> HeatPumpCoolingParams {
    HeatPumpCoolingParams {
        ventilation: CoolingViaVentilation {
            used: src.ventilation.used,
            min_coil_temp: src.ventilation.min_coil_temp,
            capacity: src.ventilation.capacity,
            annual_cop: src.ventilation.annual_cop,
            single_speed: src.ventilation.single_speed,
        },
        recirculation: CoolingViaRecirculation {
            used: src.recirculation.used,
            min_coil_temp: src.recirculation.min_coil_temp,
            capacity: src.recirculation.capacity,
            annual_cop: src.recirculation.annual_cop,
            single_speed: src.recirculation.single_speed,
        },
        dehumidification: CoolingViaDehumidification {
            used: src.dehumidification.used,
            annual_cop: src.dehumidification.annual_cop,
            useful_heat_loss: src.dehumidification.useful_heat_loss,
        },
        panel: CoolingViaPanel {
            used: src.panel.used,
            annual_cop: src.panel.annual_cop,
        },
    }
}

/// Kind-specific parameters of a heater, by its source type name.
pub(crate) fn heater_params(h: &PhHeater) -> Result<HeaterParams> {
    let params = match h.heating_type.as_str() {
        "PhHeaterElectric" => HeaterParams::Electric,
        "PhHeaterBoilerFossil" => HeaterParams::BoilerFossil(FossilBoilerParams {
            fuel: FossilFuel::parse(h.fuel.as_deref().unwrap_or("NATURAL_GAS"))?,
            condensing: h.condensing,
            in_conditioned_space: h.in_conditioned_space,
            effic_30_percent_load: h.effic_at_30_percent_load,
            effic_nominal_load: h.effic_at_nominal_load,
            avg_rtrn_temp_30_percent_load: h.avg_rtrn_temp_at_30_percent_load,
            avg_temp_30_percent_load: h.avg_temp_at_32c_28c,
            avg_rtrn_temp_nominal_load: h.avg_temp_at_55c_45c,
            avg_temp_nominal_load: h.avg_temp_at_70c_55c,
            standby_loss: h.standby_loss,
            rated_capacity: h.rated_capacity,
        }),
        "PhHeaterBoilerWood" => HeaterParams::BoilerWood(WoodBoilerParams {
            fuel: WoodFuel::parse(h.fuel.as_deref().unwrap_or("LOG"))?,
            in_conditioned_space: h.in_conditioned_space,
            effic_in_basic_cycle: h.effic_in_basic_cycle,
            effic_in_const_operation: h.effic_in_const_operation,
            avg_frac_heat_output: h.avg_frac_heat_output,
            temp_diff_on_off: h.temp_diff_on_off,
            rated_capacity: h.rated_capacity,
            demand_basic_cycle: h.demand_basic_cycle,
            power_stationary_run: h.power_stationary_run,
            power_standard_run: h.power_standard_run,
            only_control: h.only_control,
        }),
        "PhHeaterDistrictHeat" => HeaterParams::DistrictHeat(DistrictHeatParams {
            energy_carrier: h.energy_carrier.unwrap_or(1),
            solar_fraction: h.solar_fraction,
            util_factor_heat_transfer: h.util_fact_heat_transfer,
        }),
        "PhHeatPumpAnnual" | "PhHeatPumpRatedMonthly" | "PhHeatPumpHotWater"
        | "PhHeatPumpCombined" => {
            let kind = match h.heating_type.as_str() {
                "PhHeatPumpAnnual" => HeatPumpKind::Annual {
                    annual_cop: h.annual_cop,
                    total_system_perf_ratio: h.total_system_perf_ratio,
                },
                "PhHeatPumpRatedMonthly" => HeatPumpKind::RatedMonthly {
                    cop_1: h.cop_1,
                    ambient_temp_1: h.ambient_temp_1,
                    cop_2: h.cop_2,
                    ambient_temp_2: h.ambient_temp_2,
                },
                "PhHeatPumpHotWater" => HeatPumpKind::HotWater {
                    annual_cop: h.annual_cop,
                    total_system_perf_ratio: h.total_system_perf_ratio,
                    in_conditioned_space: h.in_conditioned_space,
                },
                _ => HeatPumpKind::Combined,
            };
            HeaterParams::HeatPump(HeatPumpParams {
                kind,
                cooling: h.cooling_params.as_ref().map(cooling),
            })
        }
        other => return Err(PhxError::unknown("heater type", other, HEATER_TYPES)),
    };
    Ok(params)
}

fn usage(src: Option<PhUsageProfile>, fallback: UsageProfile) -> UsageProfile {
    src.map_or(fallback, |u| UsageProfile {
        space_heating: u.space_heating,
        dhw_heating: u.dhw_heating,
        cooling: u.cooling,
        ..UsageProfile::default()
    })
}

fn subsystem(
    asm: &mut Assembly<'_>,
    identifier: &str,
    display_name: &str,
    usage_profile: UsageProfile,
    params: DeviceParams,
    distribution: PhxDistribution,
) -> PhxMechanicalSubsystem {
    PhxMechanicalSubsystem {
        id_num: asm.ids.allocate(IdClass::MechanicalSubsystem),
        display_name: display_name.to_string(),
        device: PhxMechanicalDevice {
            id_num: asm.ids.allocate(IdClass::MechanicalDevice),
            display_name: display_name.to_string(),
            identifier: identifier.to_string(),
            usage_profile,
            params,
        },
        distribution,
    }
}

fn add_ventilation(
    asm: &mut Assembly<'_>,
    collection: &mut PhxMechanicalSystemCollection,
    room: &Room,
    hvac: &Hvac,
) {
    let Some(system) = &hvac.properties.ph.ventilation_system else {
        return;
    };
    let Some(unit) = &system.ventilation_unit else {
        if !system.supply_ducting.is_empty() || !system.exhaust_ducting.is_empty() {
            warn!(
                "Ventilation system '{}' has ducts but no unit; ducts are dropped",
                system.identifier
            );
        }
        return;
    };
    let params = VentilatorParams {
        sensible_heat_recovery: unit.sensible_heat_recovery,
        latent_heat_recovery: unit.latent_heat_recovery,
        electric_efficiency: unit.electric_efficiency,
        quantity: unit.quantity,
        frost_protection_reqd: unit.frost_protection_reqd,
        temperature_below_defrost_used: unit.temperature_below_defrost_used,
        in_conditioned_space: unit.in_conditioned_space,
    };
    let key = params.unique_key(unit.display_name());

    let existing = collection.device_by_key(&key).map(|d| d.id_num);
    let device_id = match existing {
        Some(id_num) => id_num,
        None => {
            let mut distribution = PhxDistribution::default();
            for src in &system.supply_ducting {
                distribution.ducts.push(duct(asm, src, DuctType::Supply));
            }
            for src in &system.exhaust_ducting {
                distribution.ducts.push(duct(asm, src, DuctType::Exhaust));
            }
            let usage_profile = UsageProfile {
                ventilation: true,
                ..UsageProfile::default()
            };
            let sub = subsystem(
                asm,
                &unit.identifier,
                unit.display_name(),
                usage_profile,
                DeviceParams::Ventilator(params),
                distribution,
            );
            debug!("Ventilator '{}' ({})", unit.display_name(), sub.device.id_num);
            collection.add_subsystem(key, sub)
        }
    };
    asm.source_ids
        .room_ventilators
        .insert(room.identifier.clone(), device_id);
}

fn add_heater(
    asm: &mut Assembly<'_>,
    collection: &mut PhxMechanicalSystemCollection,
    heater: &PhHeater,
    fallback: UsageProfile,
) -> Result<()> {
    if collection.contains_key(&heater.identifier) {
        return Ok(());
    }
    let params = heater_params(heater)?;
    let mut usage_profile = usage(heater.usage_profile, fallback);
    if let HeaterParams::HeatPump(hp) = &params
        && hp.cooling.as_ref().is_some_and(HeatPumpCoolingParams::any_used)
    {
        usage_profile.cooling = true;
    }
    let sub = subsystem(
        asm,
        &heater.identifier,
        heater.display_name(),
        usage_profile,
        DeviceParams::Heater(params),
        PhxDistribution::default(),
    );
    collection.add_subsystem(heater.identifier.clone(), sub);
    Ok(())
}

fn tank_params(src: &PhTank) -> Result<HotWaterTankParams> {
    Ok(HotWaterTankParams {
        tank_type: TankType::parse(&src.tank_type)?,
        storage_capacity: src.storage_capacity,
        storage_loss_rate: src.storage_loss_rate,
        solar_losses: src.solar_losses,
        standby_losses: src.standby_losses,
        room_temp: src.room_temp,
        water_temp: src.water_temp,
        quantity: src.quantity,
        in_conditioned_space: src.in_conditioned_space,
        ..HotWaterTankParams::default()
    })
}

fn add_hot_water(
    asm: &mut Assembly<'_>,
    collection: &mut PhxMechanicalSystemCollection,
    shw: &Shw,
) -> Result<()> {
    let ph = &shw.properties.ph;
    let dhw_only = UsageProfile {
        dhw_heating: true,
        ..UsageProfile::default()
    };
    for heater in &ph.heaters {
        add_heater(asm, collection, heater, dhw_only)?;
    }

    let mut piping: Vec<PhxPipeElement> =
        ph.branch_piping.iter().chain(&ph.recirc_piping).map(pipe).collect();
    for (i, src) in ph.tanks.iter().enumerate() {
        let key = format!("{}-tank-{i}", shw.identifier);
        if collection.contains_key(&key) {
            continue;
        }
        let params = tank_params(src)?;
        let name = src.display_name.clone().unwrap_or_else(|| {
            let system = shw.display_name.as_deref().unwrap_or(&shw.identifier);
            format!("{system} tank {}", i + 1)
        });
        let distribution = PhxDistribution {
            ducts: Vec::new(),
            piping: std::mem::take(&mut piping),
        };
        let sub = subsystem(
            asm,
            &key,
            &name,
            dhw_only,
            DeviceParams::HotWaterTank(params),
            distribution,
        );
        collection.add_subsystem(key, sub);
    }
    if !piping.is_empty() {
        warn!(
            "Hot-water system '{}' has piping but no tank; piping is dropped",
            shw.identifier
        );
    }
    Ok(())
}

/// Mechanical equipment of a merged room. Ventilators are inserted first so
/// that every member room's ventilator ID is known before its spaces become
/// ventilation rooms.
pub(crate) fn build_collection(
    asm: &mut Assembly<'_>,
    merged: &MergedRoom<'_>,
    display_name: &str,
    zone_id: u32,
) -> Result<PhxMechanicalSystemCollection> {
    let id_num = asm.ids.allocate(IdClass::MechanicalCollection);
    let mut collection =
        PhxMechanicalSystemCollection::new(id_num, display_name, PhxZoneCoverage::full(zone_id));

    for &room in &merged.members {
        if let Some(hvac) = room_hvac(asm, room)? {
            add_ventilation(asm, &mut collection, room, hvac);
        }
    }

    let space_heating = UsageProfile {
        space_heating: true,
        ..UsageProfile::default()
    };
    for &room in &merged.members {
        let shw = room_shw(asm, room)?;
        if let Some(hvac) = room_hvac(asm, room)? {
            for heater in &hvac.properties.ph.heating_systems {
                let dhw = heater.usage_profile.is_some_and(|u| u.dhw_heating);
                if dhw && shw.is_none() {
                    return Err(PhxError::missing(room.display_name(), "energy.shw"));
                }
                add_heater(asm, &mut collection, heater, space_heating)?;
            }
        }
        if let Some(shw) = shw {
            add_hot_water(asm, &mut collection, shw)?;
        }
    }
    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heater(json: serde_json::Value) -> PhHeater {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn fossil_boiler_fuel_is_parsed() {
        let h = heater(serde_json::json!({
            "identifier": "b1",
            "heating_type": "PhHeaterBoilerFossil",
            "fuel": "OIL",
            "rated_capacity": 12.0
        }));
        let HeaterParams::BoilerFossil(params) = heater_params(&h).unwrap() else {
            panic!("expected a fossil boiler");
        };
        assert_eq!(params.fuel, FossilFuel::Oil);
        assert_eq!(params.rated_capacity, 12.0);
    }

    #[test]
    fn heat_pump_keeps_cooling_modes() {
        let h = heater(serde_json::json!({
            "identifier": "hp",
            "heating_type": "PhHeatPumpAnnual",
            "annual_COP": 3.2,
            "cooling_params": {"recirculation": {"used": true, "annual_COP": 4.0}}
        }));
        let HeaterParams::HeatPump(hp) = heater_params(&h).unwrap() else {
            panic!("expected a heat pump");
        };
        assert_eq!(hp.kind.code(), 1);
        let cooling = hp.cooling.unwrap();
        assert!(cooling.recirculation.used);
        assert_eq!(cooling.recirculation.annual_cop, 4.0);
        assert!(!cooling.panel.used);
    }

    #[test]
    fn unknown_heater_type_and_fuel_are_errors() {
        let h = heater(serde_json::json!({"identifier": "x", "heating_type": "PhHeaterSolar"}));
        let err = heater_params(&h).unwrap_err().to_string();
        assert!(err.contains("Unknown heater type 'PhHeaterSolar'"));
        assert!(err.contains("PhHeatPumpCombined"));

        let h = heater(serde_json::json!({
            "identifier": "x",
            "heating_type": "PhHeaterBoilerWood",
            "fuel": "COAL"
        }));
        let err = heater_params(&h).unwrap_err().to_string();
        assert!(err.contains("LOG, PELLET"));
    }
}
