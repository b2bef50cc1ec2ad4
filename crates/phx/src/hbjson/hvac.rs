//! HVAC and hot-water systems of the source model, with their
//! Passive-House equipment.

use serde::Deserialize;

use crate::hbjson::geometry::LineSegment3D;

fn default_true() -> bool {
    true
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhVentilator {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub sensible_heat_recovery: f64,
    #[serde(default)]
    pub latent_heat_recovery: f64,
    #[serde(default = "default_electric_efficiency")]
    pub electric_efficiency: f64,
    #[serde(default = "one")]
    pub quantity: u32,
    #[serde(default = "default_true")]
    pub frost_protection_reqd: bool,
    #[serde(default = "default_defrost_temp")]
    pub temperature_below_defrost_used: f64,
    #[serde(default = "default_true")]
    pub in_conditioned_space: bool,
}

fn default_electric_efficiency() -> f64 {
    0.55
}

fn default_defrost_temp() -> f64 {
    -5.0
}

impl PhVentilator {
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.identifier)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DuctSegment {
    pub geometry: LineSegment3D,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhDuct {
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default = "one")]
    pub quantity: u32,
    /// mm
    #[serde(default = "default_duct_diameter")]
    pub diameter: f64,
    /// mm
    #[serde(default)]
    pub height: Option<f64>,
    /// mm
    #[serde(default)]
    pub width: Option<f64>,
    /// mm
    #[serde(default)]
    pub insulation_thickness: f64,
    #[serde(default = "default_insulation_conductivity")]
    pub insulation_conductivity: f64,
    #[serde(default)]
    pub insulation_reflective: bool,
    #[serde(default)]
    pub segments: Vec<DuctSegment>,
}

fn default_duct_diameter() -> f64 {
    160.0
}

fn default_insulation_conductivity() -> f64 {
    0.04
}

impl PhDuct {
    pub fn length(&self) -> f64 {
        self.segments.iter().map(|s| s.geometry.length()).sum()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhVentilationSystem {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub ventilation_unit: Option<PhVentilator>,
    #[serde(default)]
    pub supply_ducting: Vec<PhDuct>,
    #[serde(default)]
    pub exhaust_ducting: Vec<PhDuct>,
}

/// Declared uses of a heating device.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PhUsageProfile {
    #[serde(default)]
    pub space_heating: bool,
    #[serde(default)]
    pub dhw_heating: bool,
    #[serde(default)]
    pub cooling: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhCoolingMode {
    #[serde(default)]
    pub used: bool,
    #[serde(default)]
    pub min_coil_temp: f64,
    #[serde(default)]
    pub capacity: f64,
    #[serde(rename = "annual_COP", default)]
    pub annual_cop: f64,
    #[serde(default)]
    pub single_speed: bool,
    #[serde(default)]
    pub useful_heat_loss: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhCoolingParams {
    #[serde(default)]
    pub ventilation: PhCoolingMode,
    #[serde(default)]
    pub recirculation: PhCoolingMode,
    #[serde(default)]
    pub dehumidification: PhCoolingMode,
    #[serde(default)]
    pub panel: PhCoolingMode,
}

/// A heating device. Which fields apply depends on `heating_type`.
#[derive(Debug, Clone, Deserialize)]
pub struct PhHeater {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub heating_type: String,
    #[serde(default = "one_f64")]
    pub percent_coverage: f64,
    #[serde(default)]
    pub usage_profile: Option<PhUsageProfile>,
    #[serde(default = "default_true")]
    pub in_conditioned_space: bool,

    #[serde(default)]
    pub fuel: Option<String>,
    #[serde(default)]
    pub condensing: bool,
    #[serde(default)]
    pub effic_at_30_percent_load: f64,
    #[serde(default)]
    pub effic_at_nominal_load: f64,
    #[serde(default)]
    pub avg_rtrn_temp_at_30_percent_load: f64,
    #[serde(rename = "avg_temp_at_70C_55C", default)]
    pub avg_temp_at_70c_55c: f64,
    #[serde(rename = "avg_temp_at_55C_45C", default)]
    pub avg_temp_at_55c_45c: f64,
    #[serde(rename = "avg_temp_at_32C_28C", default)]
    pub avg_temp_at_32c_28c: f64,
    #[serde(default)]
    pub standby_loss: f64,
    #[serde(default)]
    pub rated_capacity: f64,

    #[serde(default)]
    pub effic_in_basic_cycle: f64,
    #[serde(default)]
    pub effic_in_const_operation: f64,
    #[serde(default)]
    pub avg_frac_heat_output: f64,
    #[serde(default)]
    pub temp_diff_on_off: f64,
    #[serde(default)]
    pub demand_basic_cycle: f64,
    #[serde(default)]
    pub power_stationary_run: f64,
    #[serde(default)]
    pub power_standard_run: f64,
    #[serde(default)]
    pub only_control: bool,

    #[serde(default)]
    pub energy_carrier: Option<i32>,
    #[serde(default)]
    pub solar_fraction: f64,
    #[serde(default)]
    pub util_fact_heat_transfer: f64,

    #[serde(rename = "annual_COP", default)]
    pub annual_cop: f64,
    #[serde(default)]
    pub total_system_perf_ratio: f64,
    #[serde(rename = "COP_1", default)]
    pub cop_1: f64,
    #[serde(default)]
    pub ambient_temp_1: f64,
    #[serde(rename = "COP_2", default)]
    pub cop_2: f64,
    #[serde(default)]
    pub ambient_temp_2: f64,
    #[serde(default)]
    pub cooling_params: Option<PhCoolingParams>,
}

fn one_f64() -> f64 {
    1.0
}

impl PhHeater {
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.identifier)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HvacPh {
    #[serde(default)]
    pub ventilation_system: Option<PhVentilationSystem>,
    #[serde(default)]
    pub heating_systems: Vec<PhHeater>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HvacProperties {
    #[serde(default)]
    pub ph: HvacPh,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hvac {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub demand_controlled_ventilation: bool,
    #[serde(default)]
    pub properties: HvacProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhTank {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default = "default_tank_type")]
    pub tank_type: String,
    #[serde(default = "default_true")]
    pub in_conditioned_space: bool,
    #[serde(default)]
    pub solar_losses: f64,
    #[serde(default)]
    pub storage_loss_rate: f64,
    #[serde(default = "default_storage_capacity")]
    pub storage_capacity: f64,
    #[serde(default = "default_standby_losses")]
    pub standby_losses: f64,
    #[serde(default = "default_room_temp")]
    pub room_temp: f64,
    #[serde(default = "default_water_temp")]
    pub water_temp: f64,
    #[serde(default = "one")]
    pub quantity: u32,
}

fn default_tank_type() -> String {
    "0-No storage tank".to_string()
}

fn default_storage_capacity() -> f64 {
    300.0
}

fn default_standby_losses() -> f64 {
    4.0
}

fn default_room_temp() -> f64 {
    20.0
}

fn default_water_temp() -> f64 {
    60.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhPipe {
    #[serde(default)]
    pub display_name: Option<String>,
    /// mm
    #[serde(default = "default_pipe_diameter")]
    pub diameter_mm: f64,
    #[serde(default)]
    pub insulation_thickness_mm: f64,
    #[serde(default = "default_insulation_conductivity")]
    pub insulation_conductivity: f64,
    #[serde(default)]
    pub insulation_reflective: bool,
    #[serde(default)]
    pub segments: Vec<DuctSegment>,
}

fn default_pipe_diameter() -> f64 {
    12.7
}

impl PhPipe {
    pub fn length(&self) -> f64 {
        self.segments.iter().map(|s| s.geometry.length()).sum()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShwPh {
    #[serde(default)]
    pub heaters: Vec<PhHeater>,
    #[serde(default)]
    pub tanks: Vec<PhTank>,
    #[serde(default)]
    pub branch_piping: Vec<PhPipe>,
    #[serde(default)]
    pub recirc_piping: Vec<PhPipe>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShwProperties {
    #[serde(default)]
    pub ph: ShwPh,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Shw {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub properties: ShwProperties,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ventilator_defaults() {
        let v: PhVentilator = serde_json::from_str(r#"{"identifier": "erv"}"#).unwrap();
        assert_eq!(v.electric_efficiency, 0.55);
        assert_eq!(v.quantity, 1);
        assert!(v.frost_protection_reqd);
        assert_eq!(v.display_name(), "erv");
    }

    #[test]
    fn duct_length_sums_segments() {
        let d: PhDuct = serde_json::from_str(
            r#"{"segments": [
                {"geometry": {"p": [0,0,0], "v": [2,0,0]}},
                {"geometry": {"p": [2,0,0], "v": [0,3,4]}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(d.length(), 7.0);
        assert_eq!(d.diameter, 160.0);
    }
}
