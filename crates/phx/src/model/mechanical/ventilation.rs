/// Heat-recovery ventilator parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VentilatorParams {
    pub sensible_heat_recovery: f64,
    pub latent_heat_recovery: f64,
    /// Wh/m³
    pub electric_efficiency: f64,
    pub quantity: u32,
    pub frost_protection_reqd: bool,
    /// °C
    pub temperature_below_defrost_used: f64,
    pub in_conditioned_space: bool,
}

impl Default for VentilatorParams {
    fn default() -> Self {
        Self {
            sensible_heat_recovery: 0.0,
            latent_heat_recovery: 0.0,
            electric_efficiency: 0.55,
            quantity: 1,
            frost_protection_reqd: true,
            temperature_below_defrost_used: -5.0,
            in_conditioned_space: true,
        }
    }
}

impl VentilatorParams {
    /// Dedup key: ventilators with identical parameters and name are the
    /// same unit.
    pub fn unique_key(&self, display_name: &str) -> String {
        format!(
            "{}-{:.4}-{:.4}-{:.4}-{}-{}-{:.2}-{}",
            display_name,
            self.sensible_heat_recovery,
            self.latent_heat_recovery,
            self.electric_efficiency,
            self.quantity,
            self.frost_protection_reqd,
            self.temperature_below_defrost_used,
            self.in_conditioned_space,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_key_tracks_parameters() {
        let a = VentilatorParams {
            sensible_heat_recovery: 0.84,
            ..Default::default()
        };
        let b = VentilatorParams {
            sensible_heat_recovery: 0.75,
            ..Default::default()
        };
        assert_eq!(a.unique_key("ERV"), a.unique_key("ERV"));
        assert_ne!(a.unique_key("ERV"), b.unique_key("ERV"));
        assert_ne!(a.unique_key("ERV-1"), a.unique_key("ERV-2"));
    }
}
