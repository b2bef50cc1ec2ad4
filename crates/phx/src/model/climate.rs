//! Site location, ground properties and the monthly/peak-load climate
//! record attached to a variant.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhxLocation {
    pub latitude: f64,
    pub longitude: f64,
    /// m
    pub weather_station_elevation: f64,
    /// m
    pub site_elevation: f64,
    pub climate_zone: i32,
    pub hours_from_utc: f64,
}

impl Default for PhxLocation {
    fn default() -> Self {
        Self {
            latitude: 40.6,
            longitude: -73.8,
            weather_station_elevation: 3.0,
            site_elevation: 3.0,
            climate_zone: 1,
            hours_from_utc: -4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhxGround {
    /// W/mK
    pub ground_thermal_conductivity: f64,
    /// J/kgK
    pub ground_heat_capacity: f64,
    /// kg/m³
    pub ground_density: f64,
    /// m
    pub depth_groundwater: f64,
    /// m/d
    pub flow_rate_groundwater: f64,
}

impl Default for PhxGround {
    fn default() -> Self {
        Self {
            ground_thermal_conductivity: 2.0,
            ground_heat_capacity: 1000.0,
            ground_density: 2000.0,
            depth_groundwater: 3.0,
            flow_rate_groundwater: 0.05,
        }
    }
}

/// Twelve named monthly values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MonthlyValueSet {
    pub january: f64,
    pub february: f64,
    pub march: f64,
    pub april: f64,
    pub may: f64,
    pub june: f64,
    pub july: f64,
    pub august: f64,
    pub september: f64,
    pub october: f64,
    pub november: f64,
    pub december: f64,
}

impl MonthlyValueSet {
    /// Build from a January-first sequence. Missing trailing months are 0.
    pub fn from_values(values: &[f64]) -> Self {
        let v = |i: usize| values.get(i).copied().unwrap_or(0.0);
        Self {
            january: v(0),
            february: v(1),
            march: v(2),
            april: v(3),
            may: v(4),
            june: v(5),
            july: v(6),
            august: v(7),
            september: v(8),
            october: v(9),
            november: v(10),
            december: v(11),
        }
    }

    pub fn values(&self) -> [f64; 12] {
        [
            self.january,
            self.february,
            self.march,
            self.april,
            self.may,
            self.june,
            self.july,
            self.august,
            self.september,
            self.october,
            self.november,
            self.december,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MonthlyTemperatures {
    pub air_temps: MonthlyValueSet,
    pub dewpoints: MonthlyValueSet,
    pub sky_temps: MonthlyValueSet,
    pub ground_temps: MonthlyValueSet,
}

/// kWh/m² per month and orientation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MonthlyRadiation {
    pub north: MonthlyValueSet,
    pub east: MonthlyValueSet,
    pub south: MonthlyValueSet,
    pub west: MonthlyValueSet,
    pub glob: MonthlyValueSet,
}

/// Design conditions for one peak-load case. Radiation in W/m².
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PeakLoadSet {
    pub temperature_air: f64,
    pub radiation_north: f64,
    pub radiation_east: f64,
    pub radiation_south: f64,
    pub radiation_west: f64,
    pub radiation_global: f64,
    pub temperature_dewpoint: Option<f64>,
    pub temperature_sky: Option<f64>,
    pub temperature_ground: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PeakLoads {
    pub heat_load_1: PeakLoadSet,
    pub heat_load_2: PeakLoadSet,
    pub cooling_load_1: PeakLoadSet,
    pub cooling_load_2: PeakLoadSet,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhxClimate {
    pub display_name: String,
    /// m
    pub station_elevation: f64,
    /// K
    pub daily_temp_swing: f64,
    /// m/s
    pub average_wind_speed: f64,
    pub ground: PhxGround,
    pub monthly_temps: MonthlyTemperatures,
    pub monthly_radiation: MonthlyRadiation,
    pub peak_loads: PeakLoads,
}

impl Default for PhxClimate {
    fn default() -> Self {
        Self {
            display_name: "default_climate".to_string(),
            station_elevation: 3.0,
            daily_temp_swing: 8.0,
            average_wind_speed: 4.0,
            ground: PhxGround::default(),
            monthly_temps: MonthlyTemperatures::default(),
            monthly_radiation: MonthlyRadiation::default(),
            peak_loads: PeakLoads::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PhxSite {
    pub location: PhxLocation,
    pub climate: PhxClimate,
}
