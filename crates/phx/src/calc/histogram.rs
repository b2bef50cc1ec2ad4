//! Compression of an annual hourly ventilation schedule into the four
//! daily operating periods (high, standard, basic, minimum) of a
//! ventilation utilization pattern.

use crate::model::schedules::{OperatingPeriod, VentOperatingPeriods};

/// Inputs for one room's effective ventilation schedule.
#[derive(Debug, Clone, Copy)]
pub struct VentilationDemand<'a> {
    /// Hourly fractions of the occupant-independent flow.
    pub vent_schedule: &'a [f64],
    /// Hourly occupancy fractions.
    pub occupancy_schedule: &'a [f64],
    /// m³/s
    pub vent_peak_m3s: f64,
    /// m³/s
    pub occupancy_peak_m3s: f64,
    /// Demand-controlled ventilation: occupant flow follows occupancy.
    pub dcv: bool,
}

impl VentilationDemand<'_> {
    /// Hourly flow as a fraction of the combined peak. `None` when the
    /// combined peak is zero.
    pub fn hourly_fractions(&self) -> Option<Vec<f64>> {
        let total = self.vent_peak_m3s + self.occupancy_peak_m3s;
        if total <= 0.0 {
            return None;
        }
        let fractions = self
            .vent_schedule
            .iter()
            .enumerate()
            .map(|(hour, vent)| {
                let occ = if self.dcv {
                    self.occupancy_schedule.get(hour).copied().unwrap_or(1.0)
                } else {
                    1.0
                };
                (self.vent_peak_m3s * vent + self.occupancy_peak_m3s * occ) / total
            })
            .collect();
        Some(fractions)
    }
}

/// Four-period pattern of `demand`. Degenerate demand (zero peak, or an
/// empty schedule) runs at full speed all day.
pub fn four_period_pattern(demand: &VentilationDemand<'_>) -> VentOperatingPeriods {
    match demand.hourly_fractions() {
        Some(values) if !values.is_empty() => bin_into_periods(&values),
        _ => VentOperatingPeriods::constant_full(),
    }
}

/// Bin `values` into four periods by distance from the maximum:
/// `bin = round((max - v) / (max - min) * 3)`, bin 0 being high.
pub fn bin_into_periods(values: &[f64]) -> VentOperatingPeriods {
    if values.is_empty() {
        return VentOperatingPeriods::constant_full();
    }
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    if (max - min).abs() < f64::EPSILON {
        return VentOperatingPeriods {
            high: OperatingPeriod::new(24.0, max.clamp(0.0, 1.0)),
            ..Default::default()
        };
    }

    let mut sums = [0.0_f64; 4];
    let mut counts = [0_usize; 4];
    for v in values {
        let bin = (((max - v) / (max - min)) * 3.0).round() as usize;
        let bin = bin.min(3);
        sums[bin] += v;
        counts[bin] += 1;
    }

    let n = values.len() as f64;
    let period = |bin: usize| {
        if counts[bin] == 0 {
            return OperatingPeriod::default();
        }
        let average = sums[bin] / counts[bin] as f64;
        let frequency = counts[bin] as f64 / n;
        OperatingPeriod::new(frequency * 24.0, average.clamp(0.0, 1.0))
    };

    let mut periods = VentOperatingPeriods {
        high: period(0),
        standard: period(1),
        basic: period(2),
        minimum: period(3),
    };
    periods.force_total_hours_to_24();
    periods
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_schedule_is_a_single_high_period() {
        let ones = vec![1.0; 8760];
        let demand = VentilationDemand {
            vent_schedule: &ones,
            occupancy_schedule: &ones,
            vent_peak_m3s: 0.05,
            occupancy_peak_m3s: 0.0,
            dcv: true,
        };
        let p = four_period_pattern(&demand);
        assert_eq!(p.high, OperatingPeriod::new(24.0, 1.0));
        assert_eq!(p.total_hours(), 24.0);
    }

    #[test]
    fn zero_peak_runs_full() {
        let ones = vec![1.0; 24];
        let demand = VentilationDemand {
            vent_schedule: &ones,
            occupancy_schedule: &ones,
            vent_peak_m3s: 0.0,
            occupancy_peak_m3s: 0.0,
            dcv: false,
        };
        assert_eq!(four_period_pattern(&demand), VentOperatingPeriods::constant_full());
    }

    #[test]
    fn four_levels_land_in_four_bins() {
        // 6 hours each at 1.0, 0.7, 0.4 and 0.1
        let values: Vec<f64> = [1.0, 0.7, 0.4, 0.1]
            .iter()
            .flat_map(|v| std::iter::repeat_n(*v, 6))
            .collect();
        let p = bin_into_periods(&values);
        for (period, speed) in p.periods().iter().zip([1.0, 0.7, 0.4, 0.1]) {
            assert!((period.period_operating_hours - 6.0).abs() < 1e-9);
            assert!((period.period_operation_speed - speed).abs() < 1e-9);
        }
    }

    #[test]
    fn hours_always_total_24_and_speeds_stay_in_range() {
        let values: Vec<f64> = (0..8760).map(|h| ((h % 7) as f64) / 6.0).collect();
        let p = bin_into_periods(&values);
        assert!((p.total_hours() - 24.0).abs() < 1e-9);
        for period in p.periods() {
            assert!((0.0..=1.0).contains(&period.period_operation_speed));
        }
    }

    #[test]
    fn occupancy_term_is_constant_without_dcv() {
        let vent = vec![1.0; 4];
        let occ = vec![0.0, 0.0, 1.0, 1.0];
        let mut demand = VentilationDemand {
            vent_schedule: &vent,
            occupancy_schedule: &occ,
            vent_peak_m3s: 0.01,
            occupancy_peak_m3s: 0.01,
            dcv: false,
        };
        assert_eq!(demand.hourly_fractions().unwrap(), vec![1.0; 4]);

        demand.dcv = true;
        assert_eq!(demand.hourly_fractions().unwrap(), vec![0.5, 0.5, 1.0, 1.0]);
    }
}
