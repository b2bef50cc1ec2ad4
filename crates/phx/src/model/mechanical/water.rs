use crate::error::{PhxError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TankType {
    #[default]
    None,
    DhwAndHeating,
    DhwOnly,
}

impl TankType {
    pub const ACCEPTED: &'static [&'static str] =
        &["0-No storage tank", "1-DHW and heating", "2-DHW only"];

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "0-No storage tank" => Ok(Self::None),
            "1-DHW and heating" => Ok(Self::DhwAndHeating),
            "2-DHW only" => Ok(Self::DhwOnly),
            _ => Err(PhxError::unknown("tank type", s, Self::ACCEPTED)),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::None => 0,
            Self::DhwAndHeating => 1,
            Self::DhwOnly => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HotWaterTankParams {
    pub tank_type: TankType,
    pub input_option: i32,
    /// litres
    pub storage_capacity: f64,
    /// W/K
    pub storage_loss_rate: f64,
    /// W/K
    pub solar_losses: f64,
    /// W/K
    pub standby_losses: f64,
    /// °C
    pub room_temp: f64,
    /// °C
    pub water_temp: f64,
    pub quantity: u32,
    pub in_conditioned_space: bool,
}

impl Default for HotWaterTankParams {
    fn default() -> Self {
        Self {
            tank_type: TankType::None,
            input_option: 1,
            storage_capacity: 300.0,
            storage_loss_rate: 0.0,
            solar_losses: 0.0,
            standby_losses: 4.0,
            room_temp: 20.0,
            water_temp: 60.0,
            quantity: 1,
            in_conditioned_space: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tank_type_parse() {
        assert_eq!(TankType::parse("2-DHW only").unwrap(), TankType::DhwOnly);
        let err = TankType::parse("3-Solar").unwrap_err();
        assert!(err.to_string().contains("tank type"));
    }
}
