//! Passive-House extensions carried in the source model's `ph` property
//! blocks.

use serde::Deserialize;

use crate::error::{PhxError, Result};
use crate::hbjson::geometry::Face3D;

/// Leading integer of an enumerated option such as `"2-DHW only"`.
pub fn option_code(kind: &'static str, value: &str, accepted: &[&'static str]) -> Result<i32> {
    value
        .split('-')
        .next()
        .and_then(|head| head.trim().parse().ok())
        .ok_or_else(|| PhxError::unknown(kind, value, accepted))
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PhFrameElement {
    /// m
    pub width: f64,
    /// W/m²K
    pub u_factor: f64,
    /// W/mK
    pub psi_glazing: f64,
    /// W/mK
    pub psi_install: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhWindowFrame {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub top: PhFrameElement,
    pub right: PhFrameElement,
    pub bottom: PhFrameElement,
    pub left: PhFrameElement,
}

impl PhWindowFrame {
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.identifier)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhWindowGlazing {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// W/m²K
    pub u_factor: f64,
    pub g_value: f64,
}

impl PhWindowGlazing {
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.identifier)
    }
}

fn one() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct FloorSegment {
    pub geometry: Face3D,
    #[serde(default = "one")]
    pub weighting_factor: f64,
    #[serde(default = "one")]
    pub net_area_factor: f64,
}

impl FloorSegment {
    pub fn net_area(&self) -> f64 {
        self.geometry.area() * self.net_area_factor
    }

    pub fn weighted_area(&self) -> f64 {
        self.net_area() * self.weighting_factor
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpaceFloor {
    #[serde(default)]
    pub floor_segments: Vec<FloorSegment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpaceVolume {
    /// m
    pub avg_ceiling_height: f64,
    #[serde(default)]
    pub floor: SpaceFloor,
}

impl SpaceVolume {
    pub fn net_floor_area(&self) -> f64 {
        self.floor.floor_segments.iter().map(FloorSegment::net_area).sum()
    }

    pub fn weighted_floor_area(&self) -> f64 {
        self.floor.floor_segments.iter().map(FloorSegment::weighted_area).sum()
    }

    pub fn net_volume(&self) -> f64 {
        self.net_floor_area() * self.avg_ceiling_height
    }
}

/// Design airflows of a space, m³/s. Absent values are derived from the
/// host room's peak airflow.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpacePh {
    #[serde(rename = "_v_sup", default)]
    pub v_sup: Option<f64>,
    #[serde(rename = "_v_eta", default)]
    pub v_eta: Option<f64>,
    #[serde(rename = "_v_tran", default)]
    pub v_tran: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpaceProperties {
    #[serde(default)]
    pub ph: SpacePh,
}

fn default_wufi_type() -> i32 {
    99
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct Space {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default = "default_wufi_type")]
    pub wufi_type: i32,
    #[serde(default)]
    pub volumes: Vec<SpaceVolume>,
    #[serde(default)]
    pub properties: SpaceProperties,
}

impl Space {
    /// `"{number}-{name}"` when both are present.
    pub fn full_name(&self) -> String {
        match (&self.number, &self.name) {
            (Some(number), Some(name)) => format!("{number}-{name}"),
            (None, Some(name)) => name.clone(),
            _ => self
                .display_name
                .clone()
                .unwrap_or_else(|| self.identifier.clone()),
        }
    }

    pub fn net_floor_area(&self) -> f64 {
        self.volumes.iter().map(SpaceVolume::net_floor_area).sum()
    }

    pub fn weighted_floor_area(&self) -> f64 {
        self.volumes.iter().map(SpaceVolume::weighted_floor_area).sum()
    }

    pub fn net_volume(&self) -> f64 {
        self.volumes.iter().map(SpaceVolume::net_volume).sum()
    }

    /// Floor-area weighted ceiling height.
    pub fn avg_clear_height(&self) -> Option<f64> {
        let area = self.net_floor_area();
        (area > 0.0).then(|| self.net_volume() / area)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhLocation {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub site_elevation: Option<f64>,
    #[serde(default = "default_climate_zone")]
    pub climate_zone: i32,
    #[serde(rename = "hours_from_UTC", default)]
    pub hours_from_utc: f64,
}

fn default_climate_zone() -> i32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhGround {
    pub ground_thermal_conductivity: f64,
    pub ground_heat_capacity: f64,
    pub ground_density: f64,
    pub depth_groundwater: f64,
    pub flow_rate_groundwater: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhMonthlyValues {
    #[serde(default)]
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhMonthlyTemps {
    #[serde(default)]
    pub air_temps: PhMonthlyValues,
    #[serde(default)]
    pub dewpoints: PhMonthlyValues,
    #[serde(default)]
    pub sky_temps: PhMonthlyValues,
    #[serde(default)]
    pub ground_temps: PhMonthlyValues,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhMonthlyRadiation {
    #[serde(default)]
    pub north: PhMonthlyValues,
    #[serde(default)]
    pub east: PhMonthlyValues,
    #[serde(default)]
    pub south: PhMonthlyValues,
    #[serde(default)]
    pub west: PhMonthlyValues,
    #[serde(default)]
    pub glob: PhMonthlyValues,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhPeakLoad {
    #[serde(default)]
    pub temp: f64,
    #[serde(default)]
    pub rad_north: f64,
    #[serde(default)]
    pub rad_east: f64,
    #[serde(default)]
    pub rad_south: f64,
    #[serde(default)]
    pub rad_west: f64,
    #[serde(default)]
    pub rad_global: f64,
    #[serde(default)]
    pub dewpoint: Option<f64>,
    #[serde(default)]
    pub sky_temp: Option<f64>,
    #[serde(default)]
    pub ground_temp: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhPeakLoads {
    #[serde(default)]
    pub heat_load_1: PhPeakLoad,
    #[serde(default)]
    pub heat_load_2: PhPeakLoad,
    #[serde(default)]
    pub cooling_load_1: PhPeakLoad,
    #[serde(default)]
    pub cooling_load_2: PhPeakLoad,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhClimate {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub station_elevation: Option<f64>,
    #[serde(default)]
    pub summer_daily_temperature_swing: Option<f64>,
    #[serde(default)]
    pub average_wind_speed: Option<f64>,
    #[serde(default)]
    pub ground: Option<PhGround>,
    #[serde(default)]
    pub monthly_temps: PhMonthlyTemps,
    #[serde(default)]
    pub monthly_radiation: PhMonthlyRadiation,
    #[serde(default)]
    pub peak_loads: PhPeakLoads,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhSite {
    #[serde(default)]
    pub location: Option<PhLocation>,
    #[serde(default)]
    pub climate: Option<PhClimate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhCertification {
    #[serde(default)]
    pub building_category_type: Option<String>,
    #[serde(default)]
    pub building_use_type: Option<String>,
    #[serde(default)]
    pub building_type: Option<String>,
    #[serde(default)]
    pub building_status: Option<String>,
    #[serde(rename = "PHIUS_annual_heating_demand", default)]
    pub annual_heating_demand: Option<f64>,
    #[serde(rename = "PHIUS_annual_cooling_demand", default)]
    pub annual_cooling_demand: Option<f64>,
    #[serde(rename = "PHIUS_peak_heating_load", default)]
    pub peak_heating_load: Option<f64>,
    #[serde(rename = "PHIUS_peak_cooling_load", default)]
    pub peak_cooling_load: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhSetPoints {
    #[serde(default)]
    pub winter: Option<f64>,
    #[serde(default)]
    pub summer: Option<f64>,
}

/// A group of rooms certified together.
#[derive(Debug, Clone, Deserialize)]
pub struct BldgSegment {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default = "default_quantity")]
    pub num_floor_levels: u32,
    #[serde(default = "default_quantity")]
    pub num_dwelling_units: u32,
    #[serde(default)]
    pub site: PhSite,
    #[serde(default)]
    pub phius_certification: PhCertification,
    #[serde(default)]
    pub set_points: PhSetPoints,
    #[serde(default)]
    pub mech_room_temp: Option<f64>,
}

impl BldgSegment {
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.identifier)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomPhProperties {
    #[serde(default)]
    pub ph_bldg_segment: Option<BldgSegment>,
    #[serde(default)]
    pub spaces: Vec<Space>,
    #[serde(default)]
    pub specific_heat_capacity: Option<String>,
}

/// A household appliance or lighting/plug-load record. Kind-specific
/// fields are optional and read according to `device_type`.
#[derive(Debug, Clone, Deserialize)]
pub struct PhEquipment {
    pub device_type: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub comment: String,
    #[serde(default = "default_reference_quantity")]
    pub reference_quantity: i32,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default = "default_true")]
    pub in_conditioned_space: bool,
    #[serde(default = "default_reference_quantity")]
    pub reference_energy_norm: i32,
    #[serde(default)]
    pub energy_demand: f64,
    #[serde(default)]
    pub energy_demand_per_use: f64,
    #[serde(default)]
    pub combined_energy_factor: f64,
    #[serde(default)]
    pub capacity_type: Option<i32>,
    #[serde(default)]
    pub capacity: Option<f64>,
    #[serde(default)]
    pub water_connection: Option<i32>,
    #[serde(default)]
    pub modified_energy_factor: Option<f64>,
    #[serde(default)]
    pub utilization_factor: Option<f64>,
    #[serde(default)]
    pub dryer_type: Option<i32>,
    #[serde(default)]
    pub gas_consumption: Option<f64>,
    #[serde(default)]
    pub gas_efficiency_factor: Option<f64>,
    #[serde(default)]
    pub field_utilization_factor_type: Option<i32>,
    #[serde(default)]
    pub field_utilization_factor: Option<f64>,
    #[serde(default)]
    pub cooktop_type: Option<i32>,
    #[serde(default)]
    pub frac_high_efficiency: Option<f64>,
}

fn default_reference_quantity() -> i32 {
    2
}

fn default_true() -> bool {
    true
}

impl PhEquipment {
    /// Dedup key within a zone.
    pub fn key(&self) -> String {
        self.identifier
            .clone()
            .unwrap_or_else(|| format!("{}-{}", self.device_type, self.display_name()))
    }

    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.device_type)
    }
}
