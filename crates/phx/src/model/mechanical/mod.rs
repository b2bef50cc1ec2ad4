//! Mechanical equipment: devices, the subsystems wrapping them, and the
//! per-variant collection.

pub mod cooling;
pub mod distribution;
pub mod heating;
pub mod ventilation;
pub mod water;

use indexmap::IndexMap;

use cooling::{HeatPumpCoolingParams, roll_up};
use distribution::PhxDistribution;
use heating::HeaterParams;
use ventilation::VentilatorParams;
use water::HotWaterTankParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceType {
    Ventilation,
    Electric,
    Boiler,
    DistrictHeat,
    HeatPump,
    WaterStorage,
}

impl DeviceType {
    pub fn code(self) -> i32 {
        match self {
            Self::Ventilation => 1,
            Self::Electric => 2,
            Self::Boiler => 3,
            Self::DistrictHeat => 4,
            Self::HeatPump => 5,
            Self::WaterStorage => 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemType {
    Ventilation,
    Electric,
    Boiler,
    DistrictHeat,
    HeatPump,
    WaterStorage,
}

impl SystemType {
    pub fn code(self) -> i32 {
        match self {
            Self::Ventilation => 1,
            Self::Electric => 2,
            Self::Boiler => 3,
            Self::DistrictHeat => 4,
            Self::HeatPump => 5,
            Self::WaterStorage => 8,
        }
    }
}

impl From<DeviceType> for SystemType {
    fn from(device: DeviceType) -> Self {
        match device {
            DeviceType::Ventilation => Self::Ventilation,
            DeviceType::Electric => Self::Electric,
            DeviceType::Boiler => Self::Boiler,
            DeviceType::DistrictHeat => Self::DistrictHeat,
            DeviceType::HeatPump => Self::HeatPump,
            DeviceType::WaterStorage => Self::WaterStorage,
        }
    }
}

/// What a device is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UsageProfile {
    pub space_heating: bool,
    pub dhw_heating: bool,
    pub cooling: bool,
    pub ventilation: bool,
    pub humidification: bool,
    pub dehumidification: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeviceParams {
    Ventilator(VentilatorParams),
    Heater(HeaterParams),
    HotWaterTank(HotWaterTankParams),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhxMechanicalDevice {
    pub id_num: u32,
    pub display_name: String,
    pub identifier: String,
    pub usage_profile: UsageProfile,
    pub params: DeviceParams,
}

impl PhxMechanicalDevice {
    pub fn device_type(&self) -> DeviceType {
        match &self.params {
            DeviceParams::Ventilator(_) => DeviceType::Ventilation,
            DeviceParams::HotWaterTank(_) => DeviceType::WaterStorage,
            DeviceParams::Heater(h) => match h {
                HeaterParams::Electric => DeviceType::Electric,
                HeaterParams::BoilerFossil(_) | HeaterParams::BoilerWood(_) => DeviceType::Boiler,
                HeaterParams::DistrictHeat(_) => DeviceType::DistrictHeat,
                HeaterParams::HeatPump(_) => DeviceType::HeatPump,
            },
        }
    }

    pub fn as_ventilator(&self) -> Option<&VentilatorParams> {
        match &self.params {
            DeviceParams::Ventilator(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_heater(&self) -> Option<&HeaterParams> {
        match &self.params {
            DeviceParams::Heater(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_tank(&self) -> Option<&HotWaterTankParams> {
        match &self.params {
            DeviceParams::HotWaterTank(t) => Some(t),
            _ => None,
        }
    }

    pub fn cooling_params(&self) -> Option<&HeatPumpCoolingParams> {
        match &self.params {
            DeviceParams::Heater(HeaterParams::HeatPump(hp)) => hp.cooling.as_ref(),
            _ => None,
        }
    }
}

/// One device plus its distribution network.
#[derive(Debug, Clone, PartialEq)]
pub struct PhxMechanicalSubsystem {
    pub id_num: u32,
    pub display_name: String,
    pub device: PhxMechanicalDevice,
    pub distribution: PhxDistribution,
}

impl PhxMechanicalSubsystem {
    pub fn system_type(&self) -> SystemType {
        self.device.device_type().into()
    }
}

/// Fraction of each load type covered for one zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhxZoneCoverage {
    pub zone_num: u32,
    pub heating: f64,
    pub cooling: f64,
    pub ventilation: f64,
    pub humidification: f64,
    pub dehumidification: f64,
}

impl PhxZoneCoverage {
    pub fn full(zone_num: u32) -> Self {
        Self {
            zone_num,
            heating: 1.0,
            cooling: 1.0,
            ventilation: 1.0,
            humidification: 1.0,
            dehumidification: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhxMechanicalSystemCollection {
    pub id_num: u32,
    pub display_name: String,
    /// 1 = user defined (ideal) system.
    pub system_type_code: i32,
    pub zone_coverage: PhxZoneCoverage,
    subsystems: IndexMap<String, PhxMechanicalSubsystem>,
}

impl PhxMechanicalSystemCollection {
    pub fn new(id_num: u32, display_name: impl Into<String>, zone_coverage: PhxZoneCoverage) -> Self {
        Self {
            id_num,
            display_name: display_name.into(),
            system_type_code: 1,
            zone_coverage,
            subsystems: IndexMap::new(),
        }
    }

    /// Insert unless a subsystem with `key` exists. Returns the device ID
    /// stored under `key`.
    pub fn add_subsystem(&mut self, key: impl Into<String>, subsystem: PhxMechanicalSubsystem) -> u32 {
        self.subsystems
            .entry(key.into())
            .or_insert(subsystem)
            .device
            .id_num
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.subsystems.contains_key(key)
    }

    pub fn device_by_key(&self, key: &str) -> Option<&PhxMechanicalDevice> {
        self.subsystems.get(key).map(|s| &s.device)
    }

    pub fn device_by_id(&self, id_num: u32) -> Option<&PhxMechanicalDevice> {
        self.devices().find(|d| d.id_num == id_num)
    }

    pub fn subsystems(&self) -> impl Iterator<Item = &PhxMechanicalSubsystem> {
        self.subsystems.values()
    }

    pub fn devices(&self) -> impl Iterator<Item = &PhxMechanicalDevice> {
        self.subsystems.values().map(|s| &s.device)
    }

    pub fn ventilation_subsystems(&self) -> impl Iterator<Item = &PhxMechanicalSubsystem> {
        self.subsystems()
            .filter(|s| s.system_type() == SystemType::Ventilation)
    }

    pub fn ventilators(&self) -> impl Iterator<Item = (&PhxMechanicalDevice, &VentilatorParams)> {
        self.devices()
            .filter_map(|d| d.as_ventilator().map(|params| (d, params)))
    }

    pub fn heaters(&self) -> impl Iterator<Item = (&PhxMechanicalDevice, &HeaterParams)> {
        self.devices()
            .filter_map(|d| d.as_heater().map(|params| (d, params)))
    }

    pub fn tanks(&self) -> impl Iterator<Item = (&PhxMechanicalDevice, &HotWaterTankParams)> {
        self.devices()
            .filter_map(|d| d.as_tank().map(|params| (d, params)))
    }

    /// Cooling parameters of every cooling-capable heat pump, rolled up.
    pub fn cooling_params(&self) -> Option<HeatPumpCoolingParams> {
        let params: Vec<&HeatPumpCoolingParams> =
            self.devices().filter_map(|d| d.cooling_params()).collect();
        roll_up(params)
    }

    pub fn len(&self) -> usize {
        self.subsystems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subsystems.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::heating::{HeatPumpKind, HeatPumpParams};
    use super::*;

    fn subsystem(id: u32, params: DeviceParams) -> PhxMechanicalSubsystem {
        PhxMechanicalSubsystem {
            id_num: id,
            display_name: format!("sys-{id}"),
            device: PhxMechanicalDevice {
                id_num: id,
                display_name: format!("dev-{id}"),
                identifier: format!("dev-{id}"),
                usage_profile: UsageProfile::default(),
                params,
            },
            distribution: PhxDistribution::default(),
        }
    }

    #[test]
    fn system_type_follows_device_type() {
        let cases = [
            (DeviceParams::Ventilator(VentilatorParams::default()), 1),
            (DeviceParams::Heater(HeaterParams::Electric), 2),
            (DeviceParams::HotWaterTank(HotWaterTankParams::default()), 8),
        ];
        for (i, (params, code)) in cases.into_iter().enumerate() {
            let s = subsystem(i as u32 + 1, params);
            assert_eq!(s.system_type().code(), code);
            assert_eq!(s.system_type().code(), s.device.device_type().code());
        }
    }

    #[test]
    fn first_subsystem_with_a_key_wins() {
        let mut c = PhxMechanicalSystemCollection::new(1, "HVAC", PhxZoneCoverage::full(1));
        let first = c.add_subsystem("erv", subsystem(1, DeviceParams::Ventilator(VentilatorParams::default())));
        let second = c.add_subsystem("erv", subsystem(2, DeviceParams::Ventilator(VentilatorParams::default())));
        assert_eq!((first, second), (1, 1));
        assert_eq!(c.len(), 1);
        assert_eq!(c.ventilators().count(), 1);
    }

    #[test]
    fn cooling_params_roll_up_over_heat_pumps() {
        let hp = |cop: f64| {
            let mut cooling = HeatPumpCoolingParams::default();
            cooling.panel.used = true;
            cooling.panel.annual_cop = cop;
            DeviceParams::Heater(HeaterParams::HeatPump(HeatPumpParams {
                kind: HeatPumpKind::Annual {
                    annual_cop: 3.0,
                    total_system_perf_ratio: 0.4,
                },
                cooling: Some(cooling),
            }))
        };
        let mut c = PhxMechanicalSystemCollection::new(1, "HVAC", PhxZoneCoverage::full(1));
        c.add_subsystem("a", subsystem(1, hp(2.0)));
        c.add_subsystem("b", subsystem(2, hp(4.0)));
        c.add_subsystem("c", subsystem(3, DeviceParams::Heater(HeaterParams::Electric)));
        let rolled = c.cooling_params().unwrap();
        assert!(rolled.panel.used);
        assert_eq!(rolled.panel.annual_cop, 3.0);
    }
}
