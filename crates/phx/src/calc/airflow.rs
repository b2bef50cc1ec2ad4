//! Peak ventilation airflow of a room.

/// Outdoor-air requirements of a room, as carried by the source model.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VentilationRates {
    /// m³/s per person
    pub flow_per_person: f64,
    /// m³/s per m² floor
    pub flow_per_area: f64,
    /// 1/h
    pub air_changes_per_hour: f64,
    /// m³/s
    pub flow_per_zone: f64,
}

impl VentilationRates {
    /// Share of the peak driven by occupants, m³/s.
    pub fn occupant_peak_m3s(&self, peak_occupancy: f64) -> f64 {
        self.flow_per_person * peak_occupancy
    }

    /// Share of the peak independent of occupants, m³/s.
    pub fn base_peak_m3s(&self, floor_area: f64, volume: f64) -> f64 {
        self.flow_per_zone + self.flow_per_area * floor_area + self.air_changes_per_hour * volume / 3600.0
    }
}

/// Peak airflow in m³/h. A room without ventilation requirements has none.
pub fn peak_airflow_m3h(
    rates: Option<&VentilationRates>,
    floor_area: f64,
    volume: f64,
    peak_occupancy: f64,
) -> f64 {
    let Some(rates) = rates else {
        return 0.0;
    };
    let by_zone = rates.flow_per_zone * 3600.0;
    let by_area = rates.flow_per_area * floor_area * 3600.0;
    let by_person = rates.flow_per_person * peak_occupancy * 3600.0;
    let by_ach = rates.air_changes_per_hour * volume;
    by_zone + by_area + by_person + by_ach
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_every_contribution() {
        let rates = VentilationRates {
            flow_per_person: 0.0025,
            flow_per_area: 0.0003,
            air_changes_per_hour: 0.5,
            flow_per_zone: 0.01,
        };
        let flow = peak_airflow_m3h(Some(&rates), 100.0, 250.0, 4.0);
        // 36 + 108 + 36 + 125
        assert!((flow - 305.0).abs() < 1e-9);
        let split = (rates.base_peak_m3s(100.0, 250.0) + rates.occupant_peak_m3s(4.0)) * 3600.0;
        assert!((flow - split).abs() < 1e-9);
    }

    #[test]
    fn no_rates_no_flow() {
        assert_eq!(peak_airflow_m3h(None, 100.0, 250.0, 4.0), 0.0);
    }
}
