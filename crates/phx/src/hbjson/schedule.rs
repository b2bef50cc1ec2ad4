//! Source schedules and their evaluation to 8760 hourly values.
//!
//! Ruleset schedules follow the source ecosystem's convention of a
//! non-leap year starting on a Sunday. Rules listed first take priority.

use serde::Deserialize;

use crate::error::{PhxError, Result};

pub const HOURS_PER_YEAR: usize = 8760;
const DAYS_PER_YEAR: usize = 365;
const DAYS_IN_MONTH: [usize; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Zero-based day of year of a `[month, day]` pair.
fn day_of_year([month, day]: [u32; 2]) -> usize {
    let month = (month.clamp(1, 12) - 1) as usize;
    let before: usize = DAYS_IN_MONTH[..month].iter().sum();
    before + (day.max(1) as usize - 1).min(DAYS_IN_MONTH[month] - 1)
}

pub fn constant_8760(value: f64) -> Vec<f64> {
    vec![value; HOURS_PER_YEAR]
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PhOperatingPeriod {
    pub period_operating_hours: f64,
    pub period_operation_speed: f64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PhOperatingPeriods {
    #[serde(default)]
    pub high: PhOperatingPeriod,
    #[serde(default)]
    pub standard: PhOperatingPeriod,
    #[serde(default)]
    pub basic: PhOperatingPeriod,
    #[serde(default)]
    pub minimum: PhOperatingPeriod,
}

fn default_days() -> f64 {
    7.0
}

fn default_weeks() -> f64 {
    52.0
}

/// User-specified four-period ventilation operation.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulePh {
    #[serde(default)]
    pub daily_operating_periods: Option<PhOperatingPeriods>,
    #[serde(default = "default_days")]
    pub operating_days_wk: f64,
    #[serde(default = "default_weeks")]
    pub operating_weeks_year: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleProperties {
    #[serde(default)]
    pub ph: Option<SchedulePh>,
}

fn default_timestep() -> u32 {
    1
}

fn default_start_date() -> [u32; 2] {
    [1, 1]
}

fn default_end_date() -> [u32; 2] {
    [12, 31]
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixedIntervalSchedule {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub values: Vec<f64>,
    #[serde(default = "default_timestep")]
    pub timestep: u32,
    #[serde(default = "default_start_date")]
    pub start_date: [u32; 2],
    #[serde(default)]
    pub placeholder_value: f64,
    #[serde(default)]
    pub properties: ScheduleProperties,
}

impl FixedIntervalSchedule {
    pub fn values_8760(&self) -> Result<Vec<f64>> {
        if self.timestep == 0 {
            return Err(PhxError::InvalidSchedule {
                identifier: self.identifier.clone(),
                reason: "timestep must be at least 1".to_string(),
            });
        }
        let hourly: Vec<f64> = self
            .values
            .chunks(self.timestep as usize)
            .map(|c| c.iter().sum::<f64>() / c.len() as f64)
            .collect();

        let mut year = constant_8760(self.placeholder_value);
        let start = day_of_year(self.start_date) * 24;
        for (slot, value) in year[start..].iter_mut().zip(hourly) {
            *slot = value;
        }
        Ok(year)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleDay {
    pub identifier: String,
    pub values: Vec<f64>,
    /// `[hour, minute]` at which each value takes effect.
    #[serde(default)]
    pub times: Vec<[u32; 2]>,
}

impl ScheduleDay {
    pub fn hourly_values(&self) -> Result<[f64; 24]> {
        if self.values.is_empty() {
            return Err(PhxError::InvalidSchedule {
                identifier: self.identifier.clone(),
                reason: "day schedule has no values".to_string(),
            });
        }
        let times: Vec<u32> = if self.times.is_empty() {
            vec![0]
        } else {
            self.times.iter().map(|[h, m]| h * 60 + m).collect()
        };
        if times.len() != self.values.len() {
            return Err(PhxError::InvalidSchedule {
                identifier: self.identifier.clone(),
                reason: format!(
                    "{} values but {} times",
                    self.values.len(),
                    times.len()
                ),
            });
        }

        let mut hours = [0.0; 24];
        for (hour, slot) in hours.iter_mut().enumerate() {
            let minute = hour as u32 * 60;
            let idx = times.iter().rposition(|t| *t <= minute).unwrap_or(0);
            *slot = self.values[idx];
        }
        Ok(hours)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleRule {
    pub schedule_day: String,
    #[serde(default)]
    pub apply_sunday: bool,
    #[serde(default)]
    pub apply_monday: bool,
    #[serde(default)]
    pub apply_tuesday: bool,
    #[serde(default)]
    pub apply_wednesday: bool,
    #[serde(default)]
    pub apply_thursday: bool,
    #[serde(default)]
    pub apply_friday: bool,
    #[serde(default)]
    pub apply_saturday: bool,
    #[serde(default = "default_start_date")]
    pub start_date: [u32; 2],
    #[serde(default = "default_end_date")]
    pub end_date: [u32; 2],
}

impl ScheduleRule {
    /// `weekday` 0 is Sunday.
    fn applies_to(&self, day: usize, weekday: usize) -> bool {
        let flags = [
            self.apply_sunday,
            self.apply_monday,
            self.apply_tuesday,
            self.apply_wednesday,
            self.apply_thursday,
            self.apply_friday,
            self.apply_saturday,
        ];
        if !flags[weekday] {
            return false;
        }
        let start = day_of_year(self.start_date);
        let end = day_of_year(self.end_date);
        if start <= end {
            (start..=end).contains(&day)
        } else {
            day >= start || day <= end
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RulesetSchedule {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub day_schedules: Vec<ScheduleDay>,
    pub default_day_schedule: String,
    #[serde(default)]
    pub schedule_rules: Vec<ScheduleRule>,
    #[serde(default)]
    pub properties: ScheduleProperties,
}

impl RulesetSchedule {
    fn day(&self, identifier: &str) -> Result<&ScheduleDay> {
        self.day_schedules
            .iter()
            .find(|d| d.identifier == identifier)
            .ok_or_else(|| PhxError::InvalidSchedule {
                identifier: self.identifier.clone(),
                reason: format!("unknown day schedule '{identifier}'"),
            })
    }

    pub fn values_8760(&self) -> Result<Vec<f64>> {
        let default_day = self.day(&self.default_day_schedule)?.hourly_values()?;
        let rule_days = self
            .schedule_rules
            .iter()
            .map(|r| self.day(&r.schedule_day)?.hourly_values())
            .collect::<Result<Vec<_>>>()?;

        let mut values = Vec::with_capacity(HOURS_PER_YEAR);
        for day in 0..DAYS_PER_YEAR {
            let weekday = day % 7;
            let hours = self
                .schedule_rules
                .iter()
                .position(|r| r.applies_to(day, weekday))
                .map_or(&default_day, |i| &rule_days[i]);
            values.extend_from_slice(hours);
        }
        Ok(values)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Schedule {
    #[serde(rename = "ScheduleFixedIntervalAbridged")]
    FixedInterval(FixedIntervalSchedule),
    #[serde(rename = "ScheduleRulesetAbridged")]
    Ruleset(RulesetSchedule),
    #[serde(other)]
    Unsupported,
}

impl Schedule {
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::FixedInterval(s) => Some(&s.identifier),
            Self::Ruleset(s) => Some(&s.identifier),
            Self::Unsupported => None,
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::FixedInterval(s) => s.display_name.as_deref().or(Some(&s.identifier)),
            Self::Ruleset(s) => s.display_name.as_deref().or(Some(&s.identifier)),
            Self::Unsupported => None,
        }
    }

    pub fn values_8760(&self) -> Result<Vec<f64>> {
        match self {
            Self::FixedInterval(s) => s.values_8760(),
            Self::Ruleset(s) => s.values_8760(),
            Self::Unsupported => Err(PhxError::InvalidSchedule {
                identifier: String::new(),
                reason: "unsupported schedule type".to_string(),
            }),
        }
    }

    pub fn ph(&self) -> Option<&SchedulePh> {
        match self {
            Self::FixedInterval(s) => s.properties.ph.as_ref(),
            Self::Ruleset(s) => s.properties.ph.as_ref(),
            Self::Unsupported => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn office_hours() -> RulesetSchedule {
        serde_json::from_str(
            r#"{
                "identifier": "office",
                "day_schedules": [
                    {"identifier": "off", "values": [0.0]},
                    {"identifier": "on", "values": [0.0, 1.0, 0.0], "times": [[0, 0], [9, 0], [17, 0]]}
                ],
                "default_day_schedule": "off",
                "schedule_rules": [{
                    "schedule_day": "on",
                    "apply_monday": true, "apply_tuesday": true, "apply_wednesday": true,
                    "apply_thursday": true, "apply_friday": true
                }]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn day_of_year_counts_from_zero() {
        assert_eq!(day_of_year([1, 1]), 0);
        assert_eq!(day_of_year([2, 1]), 31);
        assert_eq!(day_of_year([12, 31]), 364);
    }

    #[test]
    fn day_schedule_is_a_step_function() {
        let day = &office_hours().day_schedules[1];
        let hours = day.hourly_values().unwrap();
        assert_eq!(hours[8], 0.0);
        assert_eq!(hours[9], 1.0);
        assert_eq!(hours[16], 1.0);
        assert_eq!(hours[17], 0.0);
    }

    #[test]
    fn ruleset_year_starts_on_sunday() {
        let values = office_hours().values_8760().unwrap();
        assert_eq!(values.len(), HOURS_PER_YEAR);
        // Jan 1 is a Sunday, Jan 2 a Monday.
        assert_eq!(values[12], 0.0);
        assert_eq!(values[24 + 12], 1.0);
        // 52 full weeks of 5 working days, plus the Sunday of day 365.
        let total: f64 = values.iter().sum();
        assert_eq!(total, 52.0 * 5.0 * 8.0);
    }

    #[test]
    fn rule_with_unknown_day_is_an_error() {
        let mut s = office_hours();
        s.schedule_rules[0].schedule_day = "missing".into();
        let err = s.values_8760().unwrap_err();
        assert!(err.to_string().contains("unknown day schedule 'missing'"));
    }

    #[test]
    fn fixed_interval_averages_sub_hourly_values() {
        let s = FixedIntervalSchedule {
            identifier: "fixed".into(),
            display_name: None,
            values: vec![0.0, 1.0, 1.0, 1.0],
            timestep: 2,
            start_date: [1, 1],
            placeholder_value: 0.25,
            properties: ScheduleProperties::default(),
        };
        let values = s.values_8760().unwrap();
        assert_eq!(&values[..3], &[0.5, 1.0, 0.25]);
    }

    #[test]
    fn wrapping_rule_covers_new_year() {
        let rule = ScheduleRule {
            schedule_day: "x".into(),
            apply_sunday: true,
            apply_monday: true,
            apply_tuesday: true,
            apply_wednesday: true,
            apply_thursday: true,
            apply_friday: true,
            apply_saturday: true,
            start_date: [12, 1],
            end_date: [2, 28],
        };
        assert!(rule.applies_to(0, 0));
        assert!(rule.applies_to(364, 0));
        assert!(!rule.applies_to(day_of_year([6, 1]), 0));
    }
}
