use indexmap::IndexMap;

/// One of the four daily operating periods of a ventilation pattern.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OperatingPeriod {
    /// Hours per day spent in this period.
    pub period_operating_hours: f64,
    /// Fan speed as a fraction of design airflow, in `[0, 1]`.
    pub period_operation_speed: f64,
}

impl OperatingPeriod {
    pub fn new(hours: f64, speed: f64) -> Self {
        Self {
            period_operating_hours: hours,
            period_operation_speed: speed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VentOperatingPeriods {
    pub high: OperatingPeriod,
    pub standard: OperatingPeriod,
    pub basic: OperatingPeriod,
    pub minimum: OperatingPeriod,
}

impl VentOperatingPeriods {
    /// Single period running all day at full speed.
    pub fn constant_full() -> Self {
        Self {
            high: OperatingPeriod::new(24.0, 1.0),
            ..Default::default()
        }
    }

    pub fn periods(&self) -> [&OperatingPeriod; 4] {
        [&self.high, &self.standard, &self.basic, &self.minimum]
    }

    pub fn total_hours(&self) -> f64 {
        self.periods()
            .iter()
            .map(|p| p.period_operating_hours)
            .sum()
    }

    /// Round every period to 2 decimals and give the high period whatever
    /// remains of the 24 hour day.
    pub fn force_total_hours_to_24(&mut self) {
        self.standard.period_operating_hours = round2(self.standard.period_operating_hours);
        self.basic.period_operating_hours = round2(self.basic.period_operating_hours);
        self.minimum.period_operating_hours = round2(self.minimum.period_operating_hours);
        let rest = self.standard.period_operating_hours
            + self.basic.period_operating_hours
            + self.minimum.period_operating_hours;
        self.high.period_operating_hours = round2(24.0 - rest);
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct UtilizationPatternVent {
    pub id_num: u32,
    pub display_name: String,
    /// Source schedule identifier used as the dedup key.
    pub identifier: String,
    pub operating_days: f64,
    pub operating_weeks: f64,
    pub operating_periods: VentOperatingPeriods,
}

impl UtilizationPatternVent {
    pub fn new(id_num: u32, identifier: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id_num,
            display_name: display_name.into(),
            identifier: identifier.into(),
            operating_days: 7.0,
            operating_weeks: 52.0,
            operating_periods: VentOperatingPeriods::constant_full(),
        }
    }
}

/// Ventilation patterns keyed by schedule identifier, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UtilizationPatternCollectionVent {
    patterns: IndexMap<String, UtilizationPatternVent>,
}

impl UtilizationPatternCollectionVent {
    pub fn contains(&self, key: &str) -> bool {
        self.patterns.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&UtilizationPatternVent> {
        self.patterns.get(key)
    }

    /// Insert unless a pattern with the same key exists. Returns the ID of
    /// the pattern stored under `key`.
    pub fn add_pattern(&mut self, pattern: UtilizationPatternVent) -> u32 {
        self.patterns
            .entry(pattern.identifier.clone())
            .or_insert(pattern)
            .id_num
    }

    pub fn iter(&self) -> impl Iterator<Item = &UtilizationPatternVent> {
        self.patterns.values()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forcing_total_hours() {
        let mut p = VentOperatingPeriods {
            high: OperatingPeriod::new(5.0, 1.0),
            standard: OperatingPeriod::new(10.004, 0.77),
            basic: OperatingPeriod::new(4.333, 0.54),
            minimum: OperatingPeriod::new(4.666, 0.4),
        };
        p.force_total_hours_to_24();
        assert_eq!(p.standard.period_operating_hours, 10.0);
        assert_eq!(p.basic.period_operating_hours, 4.33);
        assert_eq!(p.minimum.period_operating_hours, 4.67);
        assert!((p.total_hours() - 24.0).abs() < 1e-9);
    }

    #[test]
    fn first_pattern_with_a_key_wins() {
        let mut c = UtilizationPatternCollectionVent::default();
        assert_eq!(c.add_pattern(UtilizationPatternVent::new(1, "sched", "A")), 1);
        assert_eq!(c.add_pattern(UtilizationPatternVent::new(2, "sched", "B")), 1);
        assert_eq!(c.len(), 1);
        assert_eq!(c.get("sched").unwrap().display_name, "A");
    }
}
