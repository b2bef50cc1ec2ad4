use phx::model::mechanical::DeviceParams;
use phx::model::mechanical::cooling::HeatPumpCoolingParams;
use phx::model::mechanical::heating::{HeatPumpKind, HeaterParams};
use phx::model::mechanical::water::HotWaterTankParams;

use crate::error::{Result, XmlError};
use crate::writable::{Entity, Writable, list, node, node_unit, object, object_as};

const NO_OPTIONAL_CLIMATE: i32 = -1;

pub(super) fn variant_hvac<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let v = expect_entity!(e, Variant, "PhxVariant_HVAC");
    Ok(vec![list(
        "Systems",
        v.mech_collections
            .iter()
            .map(|c| object("System", Entity::MechCollection(c))),
    )])
}

pub(super) fn system<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let c = expect_entity!(e, MechCollection, "PhxMechanicalSystemCollection");
    Ok(vec![
        node("Name", &c.display_name),
        node("Type", c.system_type_code),
        node("IdentNr", c.id_num),
        list(
            "ZonesCoverage",
            [object("ZoneCoverage", Entity::ZoneCoverage(&c.zone_coverage))],
        ),
        list(
            "Devices",
            c.subsystems()
                .map(|s| object("Device", Entity::Subsystem(s))),
        ),
        object_as(
            "PHDistribution",
            Entity::MechCollection(c),
            "PhxMechanicalSystemCollection_PHDistribution",
        ),
    ])
}

pub(super) fn zone_coverage<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let z = expect_entity!(e, ZoneCoverage, "PhxZoneCoverage");
    Ok(vec![
        node("IdentNrZone", z.zone_num),
        node("CoverageHeating", z.heating),
        node("CoverageCooling", z.cooling),
        node("CoverageVentilation", z.ventilation),
        node("CoverageHumidification", z.humidification),
        node("CoverageDehumidification", z.dehumidification),
    ])
}

pub(super) fn device<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let s = expect_entity!(e, Subsystem, "PhxMechanicalSubsystem");
    let d = &s.device;
    let u = &d.usage_profile;
    let mut out = vec![
        node("Name", &d.display_name),
        node("IdentNr", d.id_num),
        node("SystemType", s.system_type().code()),
        node("TypeDevice", d.device_type().code()),
        node("UsedFor_Heating", u.space_heating),
        node("UsedFor_DHW", u.dhw_heating),
        node("UsedFor_Cooling", u.cooling),
        node("UsedFor_Ventilation", u.ventilation),
        node("UsedFor_Humidification", u.humidification),
        node("UsedFor_Dehumidification", u.dehumidification),
        node("UseOptionalClimate", false),
        node("IdentNr_OptionalClimate", NO_OPTIONAL_CLIMATE),
    ];
    if d.as_ventilator().is_some() {
        out.push(object_as(
            "Ventilation",
            Entity::Subsystem(s),
            "PhxMechanicalSubsystem_Ventilation",
        ));
    }
    if !matches!(d.params, DeviceParams::Heater(HeaterParams::Electric)) {
        out.push(object_as(
            "PH_Parameters",
            Entity::Subsystem(s),
            "PhxMechanicalSubsystem_PH_Parameters",
        ));
    }
    Ok(out)
}

pub(super) fn ventilation<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let s = expect_entity!(e, Subsystem, "PhxMechanicalSubsystem_Ventilation");
    let Some(v) = s.device.as_ventilator() else {
        return Err(XmlError::SchemaMismatch {
            entity: "PhxMechanicalSubsystem",
            key: "PhxMechanicalSubsystem_Ventilation",
        });
    };
    Ok(vec![
        node("Quantity", v.quantity),
        node("HeatRecovery", v.sensible_heat_recovery),
        node("MoistureRecovery", v.latent_heat_recovery),
    ])
}

fn cooling_nodes<'a>(c: &HeatPumpCoolingParams) -> Vec<Writable<'a>> {
    let vent = &c.ventilation;
    let recirc = &c.recirculation;
    let dehum = &c.dehumidification;
    let panel = &c.panel;
    vec![
        node("UsedFor_Cooling_Ventilation", vent.used),
        node("MinimumCoilTemperature_Ventilation", vent.min_coil_temp),
        node_unit("CoolingCapacity_Ventilation", vent.capacity, "kW"),
        node("AnnualCOP_Ventilation", vent.annual_cop),
        node("SingleSpeedCompressor_Ventilation", vent.single_speed),
        node("UsedFor_Cooling_Recirculation", recirc.used),
        node("MinimumCoilTemperature_Recirculation", recirc.min_coil_temp),
        node_unit("CoolingCapacity_Recirculation", recirc.capacity, "kW"),
        node("AnnualCOP_Recirculation", recirc.annual_cop),
        node("SingleSpeedCompressor_Recirculation", recirc.single_speed),
        node("UsedFor_Dehumidification", dehum.used),
        node("AnnualCOP_Dehumidification", dehum.annual_cop),
        node("UsefulDehumidificationHeatLoss", dehum.useful_heat_loss),
        node("UsedFor_PanelCooling", panel.used),
        node("AnnualCOP_PanelCooling", panel.annual_cop),
    ]
}

fn tank_nodes<'a>(t: &HotWaterTankParams) -> Vec<Writable<'a>> {
    vec![
        node("SolarThermalStorageCapacity", t.storage_capacity),
        node("StorageLossesStandby", t.standby_losses),
        node("TotalSolarThermalStorageLosses", t.solar_losses),
        node("InputOption", t.input_option),
        node("QauntityWS", t.quantity),
        node("InConditionedSpace", t.in_conditioned_space),
        node("TankRoomTemp", t.room_temp),
        node("TankWaterTemp", t.water_temp),
        node("StorageLossRate", t.storage_loss_rate),
        node("StorageType", t.tank_type.code()),
    ]
}

pub(super) fn ph_parameters<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let s = expect_entity!(e, Subsystem, "PhxMechanicalSubsystem_PH_Parameters");
    let out = match &s.device.params {
        DeviceParams::Ventilator(v) => vec![
            node("ElectricEfficiency", v.electric_efficiency),
            node("FrostProtection", v.frost_protection_reqd),
            node("Quantity", v.quantity),
            node("SubsoilHeatExchangeEfficiency", 0.0),
            node("HumidityRecoveryEfficiency", v.latent_heat_recovery),
            node("VolumeFlowRateFrom", 0.0),
            node("VolumeFlowRateTo", 0.0),
            node("TemperatureBelowDefrostUsed", v.temperature_below_defrost_used),
            node("DefrostRequired", v.frost_protection_reqd),
            node("NoSummerBypass", false),
            node("HRVCalculatorData", ""),
            node("Maximum_VOS", 0.0),
            node("Maximum_PP", 0.0),
            node("Standard_VOS", 0.0),
            node("Standard_PP", 0.0),
            node("Basic_VOS", 0.0),
            node("Basic_PP", 0.0),
            node("Minimum_VOS", 0.0),
            node("Minimum_PP", 0.0),
            node("AuxiliaryEnergy", 0.0),
            node("AuxiliaryEnergyDHW", 0.0),
            node("InConditionedSpace", v.in_conditioned_space),
        ],
        DeviceParams::Heater(HeaterParams::Electric) => Vec::new(),
        DeviceParams::Heater(HeaterParams::BoilerFossil(b)) => vec![
            node("EnergySourceBoilerType", b.fuel.code()),
            node("CondensingBoiler", b.condensing),
            node("InConditionedSpace", b.in_conditioned_space),
            node("BoilerEfficiency30", b.effic_30_percent_load),
            node("BoilerEfficiencyNominalOutput", b.effic_nominal_load),
            node("AverageReturnTemperatureMeasured30Load", b.avg_rtrn_temp_30_percent_load),
            node("AverageBoilerTemperatureDesign70_55", b.avg_temp_nominal_load),
            node("AverageBoilerTemperatureDesign35_28", b.avg_temp_30_percent_load),
            node("AverageReturnTemperatureMeasured", b.avg_rtrn_temp_nominal_load),
            node("StandbyHeatLossBoiler70", b.standby_loss),
            node_unit("MaximalBoilerPower", b.rated_capacity, "kW"),
        ],
        DeviceParams::Heater(HeaterParams::BoilerWood(b)) => vec![
            node("EnergySourceBoilerType", b.fuel.code()),
            node("InConditionedSpace", b.in_conditioned_space),
            node("EfficiencyHeatGeneratorBasicCycle", b.effic_in_basic_cycle),
            node("EfficiencyHeatGeneratorConstantOperation", b.effic_in_const_operation),
            node("AverageFractionHeatOutputReleasedHeatingCircuit", b.avg_frac_heat_output),
            node("TemperatureDifferenceOnOff", b.temp_diff_on_off),
            node_unit("MaximalBoilerPower", b.rated_capacity, "kW"),
            node("DemandBasicCycle", b.demand_basic_cycle),
            node("PowerStationaryRun", b.power_stationary_run),
            node("PowerStandardRun", b.power_standard_run),
            node("NoTransportPellets", b.only_control),
            node("OnlyControl", b.only_control),
        ],
        DeviceParams::Heater(HeaterParams::DistrictHeat(d)) => vec![
            node("EnergyCarrier", d.energy_carrier),
            node("SolarFractionHeating", d.solar_fraction),
            node("HeatTransferUtilizationFactor", d.util_factor_heat_transfer),
        ],
        DeviceParams::Heater(HeaterParams::HeatPump(hp)) => {
            let mut out = vec![node("HPType", hp.kind.code())];
            match &hp.kind {
                HeatPumpKind::Annual {
                    annual_cop,
                    total_system_perf_ratio,
                } => out.extend([
                    node("AnnualCOP", *annual_cop),
                    node("TotalSystemPerformanceRatioHeatGenerator", *total_system_perf_ratio),
                ]),
                HeatPumpKind::RatedMonthly {
                    cop_1,
                    ambient_temp_1,
                    cop_2,
                    ambient_temp_2,
                } => out.extend([
                    node("RatedCOP1", *cop_1),
                    node("AmbientTemperature1", *ambient_temp_1),
                    node("RatedCOP2", *cop_2),
                    node("AmbientTemperature2", *ambient_temp_2),
                ]),
                HeatPumpKind::HotWater {
                    annual_cop,
                    total_system_perf_ratio,
                    in_conditioned_space,
                } => out.extend([
                    node("AnnualCOP", *annual_cop),
                    node("TotalSystemPerformanceRatioHeatGenerator", *total_system_perf_ratio),
                    node("InConditionedSpace", *in_conditioned_space),
                ]),
                HeatPumpKind::Combined => {}
            }
            if let Some(cooling) = &hp.cooling {
                out.extend(cooling_nodes(cooling));
            }
            out
        }
        DeviceParams::HotWaterTank(t) => tank_nodes(t),
    };
    Ok(out)
}

pub(super) fn distribution<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let c = expect_entity!(
        e,
        MechCollection,
        "PhxMechanicalSystemCollection_PHDistribution"
    );
    let ducts = c.ventilation_subsystems().flat_map(|s| {
        s.distribution
            .ducts
            .iter()
            .map(move |d| object("Duct", Entity::Duct(d, s.device.id_num)))
    });
    let pipes = c
        .subsystems()
        .flat_map(|s| s.distribution.piping.iter())
        .map(|p| object("Pipe", Entity::Pipe(p)));
    Ok(vec![list("Ducts", ducts), list("Pipes", pipes)])
}

pub(super) fn duct<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let Entity::Duct(d, unit_id) = *e else {
        return Err(XmlError::SchemaMismatch {
            entity: e.type_name(),
            key: "PhxDuctElement",
        });
    };
    Ok(vec![
        node("Name", &d.display_name),
        node("IdentNr", d.id_num),
        node("DuctDiameter", d.diameter),
        node("DuctShapeHeight", d.height.unwrap_or(0.0)),
        node("DuctShapeWidth", d.width.unwrap_or(0.0)),
        node_unit("DuctLength", d.length, "m"),
        node("InsulationThickness", d.insulation_thickness),
        node("ThermalConductivity", d.insulation_conductivity),
        node("Quantity", d.quantity),
        node("DuctType", d.duct_type.code()),
        node("DuctShape", if d.is_round() { 1 } else { 2 }),
        node("IsReflective", d.insulation_reflective),
        list("AssignedVentUnits", [node("IdentNrVentUnit", unit_id)]),
    ])
}

pub(super) fn pipe<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let p = expect_entity!(e, Pipe, "PhxPipeElement");
    Ok(vec![
        node("Name", &p.display_name),
        node_unit("Length", p.length, "m"),
        node("Diameter", p.diameter),
        node("InsulationThickness", p.insulation_thickness),
        node("ThermalConductivity", p.insulation_conductivity),
        node("IsReflective", p.insulation_reflective),
    ])
}
