use crate::error::{PhxError, Result};
use crate::model::mechanical::cooling::HeatPumpCoolingParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FossilFuel {
    NaturalGas,
    Oil,
    Lpg,
}

impl FossilFuel {
    pub const ACCEPTED: &'static [&'static str] = &["NATURAL_GAS", "OIL", "LPG"];

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "NATURAL_GAS" => Ok(Self::NaturalGas),
            "OIL" => Ok(Self::Oil),
            "LPG" => Ok(Self::Lpg),
            _ => Err(PhxError::unknown("fuel type", s, Self::ACCEPTED)),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::NaturalGas => 1,
            Self::Oil => 2,
            Self::Lpg => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WoodFuel {
    Log,
    Pellet,
}

impl WoodFuel {
    pub const ACCEPTED: &'static [&'static str] = &["LOG", "PELLET"];

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "LOG" => Ok(Self::Log),
            "PELLET" => Ok(Self::Pellet),
            _ => Err(PhxError::unknown("fuel type", s, Self::ACCEPTED)),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Log => 1,
            Self::Pellet => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FossilBoilerParams {
    pub fuel: FossilFuel,
    pub condensing: bool,
    pub in_conditioned_space: bool,
    pub effic_30_percent_load: f64,
    pub effic_nominal_load: f64,
    /// °C
    pub avg_rtrn_temp_30_percent_load: f64,
    /// °C
    pub avg_temp_30_percent_load: f64,
    /// °C
    pub avg_rtrn_temp_nominal_load: f64,
    /// °C
    pub avg_temp_nominal_load: f64,
    /// W
    pub standby_loss: f64,
    /// kW
    pub rated_capacity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WoodBoilerParams {
    pub fuel: WoodFuel,
    pub in_conditioned_space: bool,
    pub effic_in_basic_cycle: f64,
    pub effic_in_const_operation: f64,
    pub avg_frac_heat_output: f64,
    /// K
    pub temp_diff_on_off: f64,
    /// kW
    pub rated_capacity: f64,
    /// kWh
    pub demand_basic_cycle: f64,
    /// W
    pub power_stationary_run: f64,
    /// W
    pub power_standard_run: f64,
    pub only_control: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistrictHeatParams {
    pub energy_carrier: i32,
    pub solar_fraction: f64,
    pub util_factor_heat_transfer: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HeatPumpKind {
    Annual {
        annual_cop: f64,
        total_system_perf_ratio: f64,
    },
    /// Two rated COP points against outdoor temperature.
    RatedMonthly {
        cop_1: f64,
        ambient_temp_1: f64,
        cop_2: f64,
        ambient_temp_2: f64,
    },
    HotWater {
        annual_cop: f64,
        total_system_perf_ratio: f64,
        in_conditioned_space: bool,
    },
    Combined,
}

impl HeatPumpKind {
    pub fn code(&self) -> i32 {
        match self {
            Self::Annual { .. } => 1,
            Self::RatedMonthly { .. } => 2,
            Self::HotWater { .. } => 3,
            Self::Combined => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatPumpParams {
    pub kind: HeatPumpKind,
    /// Present only when the unit can cool.
    pub cooling: Option<HeatPumpCoolingParams>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HeaterParams {
    Electric,
    BoilerFossil(FossilBoilerParams),
    BoilerWood(WoodBoilerParams),
    DistrictHeat(DistrictHeatParams),
    HeatPump(HeatPumpParams),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_fuel_lists_accepted() {
        let err = FossilFuel::parse("COAL").unwrap_err();
        assert!(err.to_string().contains("NATURAL_GAS, OIL, LPG"));
        assert_eq!(WoodFuel::parse("PELLET").unwrap(), WoodFuel::Pellet);
    }
}
