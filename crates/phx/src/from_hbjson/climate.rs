use crate::error::Result;
use crate::hbjson::ph::{
    BldgSegment, PhClimate, PhLocation, PhMonthlyValues, PhPeakLoad, PhSite, option_code,
};
use crate::model::certification::PhxPhBuildingData;
use crate::model::climate::{
    MonthlyRadiation, MonthlyTemperatures, MonthlyValueSet, PeakLoadSet, PeakLoads, PhxClimate,
    PhxGround, PhxLocation, PhxSite,
};

fn monthly(values: &PhMonthlyValues) -> MonthlyValueSet {
    MonthlyValueSet::from_values(&values.values)
}

fn peak_load(p: &PhPeakLoad) -> PeakLoadSet {
    PeakLoadSet {
        temperature_air: p.temp,
        radiation_north: p.rad_north,
        radiation_east: p.rad_east,
        radiation_south: p.rad_south,
        radiation_west: p.rad_west,
        radiation_global: p.rad_global,
        temperature_dewpoint: p.dewpoint,
        temperature_sky: p.sky_temp,
        temperature_ground: p.ground_temp,
    }
}

fn climate(src: &PhClimate) -> PhxClimate {
    let defaults = PhxClimate::default();
    PhxClimate {
        display_name: src.display_name.clone().unwrap_or(defaults.display_name),
        station_elevation: src.station_elevation.unwrap_or(defaults.station_elevation),
        daily_temp_swing: src
            .summer_daily_temperature_swing
            .unwrap_or(defaults.daily_temp_swing),
        average_wind_speed: src.average_wind_speed.unwrap_or(defaults.average_wind_speed),
        ground: src.ground.as_ref().map_or(defaults.ground, |g| PhxGround {
            ground_thermal_conductivity: g.ground_thermal_conductivity,
            ground_heat_capacity: g.ground_heat_capacity,
            ground_density: g.ground_density,
            depth_groundwater: g.depth_groundwater,
            flow_rate_groundwater: g.flow_rate_groundwater,
        }),
        monthly_temps: MonthlyTemperatures {
            air_temps: monthly(&src.monthly_temps.air_temps),
            dewpoints: monthly(&src.monthly_temps.dewpoints),
            sky_temps: monthly(&src.monthly_temps.sky_temps),
            ground_temps: monthly(&src.monthly_temps.ground_temps),
        },
        monthly_radiation: MonthlyRadiation {
            north: monthly(&src.monthly_radiation.north),
            east: monthly(&src.monthly_radiation.east),
            south: monthly(&src.monthly_radiation.south),
            west: monthly(&src.monthly_radiation.west),
            glob: monthly(&src.monthly_radiation.glob),
        },
        peak_loads: PeakLoads {
            heat_load_1: peak_load(&src.peak_loads.heat_load_1),
            heat_load_2: peak_load(&src.peak_loads.heat_load_2),
            cooling_load_1: peak_load(&src.peak_loads.cooling_load_1),
            cooling_load_2: peak_load(&src.peak_loads.cooling_load_2),
        },
    }
}

fn location(src: &PhLocation, station_elevation: f64) -> PhxLocation {
    PhxLocation {
        latitude: src.latitude,
        longitude: src.longitude,
        weather_station_elevation: station_elevation,
        site_elevation: src.site_elevation.unwrap_or(station_elevation),
        climate_zone: src.climate_zone,
        hours_from_utc: src.hours_from_utc,
    }
}

pub(crate) fn build_site(src: &PhSite) -> PhxSite {
    let climate = src.climate.as_ref().map(climate).unwrap_or_default();
    let location = src
        .location
        .as_ref()
        .map(|l| location(l, climate.station_elevation))
        .unwrap_or_default();
    PhxSite { location, climate }
}

const CATEGORY: &[&str] = &["1-RESIDENTIAL BUILDING", "2-NON-RESIDENTIAL BUILDING"];
const USE: &[&str] = &["1-RESIDENTIAL", "2-NON-RESIDENTIAL"];
const BUILDING_TYPE: &[&str] = &["1-NEW CONSTRUCTION", "2-RETROFIT", "3-MIXED"];
const STATUS: &[&str] = &["1-IN_PLANNING", "2-UNDER_CONSTRUCTION", "3-COMPLETE"];

fn code_or(value: Option<&str>, kind: &'static str, accepted: &[&'static str], default: i32) -> Result<i32> {
    value.map_or(Ok(default), |v| option_code(kind, v, accepted))
}

pub(crate) fn build_certification(segment: Option<&BldgSegment>) -> Result<PhxPhBuildingData> {
    let mut data = PhxPhBuildingData::default();
    let Some(segment) = segment else {
        return Ok(data);
    };
    let cert = &segment.phius_certification;
    data.building_category = code_or(
        cert.building_category_type.as_deref(),
        "building category",
        CATEGORY,
        data.building_category,
    )?;
    data.occupancy_type = code_or(cert.building_use_type.as_deref(), "building use", USE, data.occupancy_type)?;
    data.building_type = code_or(
        cert.building_type.as_deref(),
        "building type",
        BUILDING_TYPE,
        data.building_type,
    )?;
    data.building_status = code_or(
        cert.building_status.as_deref(),
        "building status",
        STATUS,
        data.building_status,
    )?;
    data.num_of_units = segment.num_dwelling_units;
    data.num_of_floors = segment.num_floor_levels;

    data.annual_heating_demand = cert.annual_heating_demand.unwrap_or(data.annual_heating_demand);
    data.annual_cooling_demand = cert.annual_cooling_demand.unwrap_or(data.annual_cooling_demand);
    data.peak_heating_load = cert.peak_heating_load.unwrap_or(data.peak_heating_load);
    data.peak_cooling_load = cert.peak_cooling_load.unwrap_or(data.peak_cooling_load);

    data.setpoint_winter = segment.set_points.winter.unwrap_or(data.setpoint_winter);
    data.setpoint_summer = segment.set_points.summer.unwrap_or(data.setpoint_summer);
    data.mechanical_room_temp = segment.mech_room_temp.unwrap_or(data.mechanical_room_temp);
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(json: &str) -> BldgSegment {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn certification_codes_and_demands_are_copied() {
        let seg = segment(
            r#"{
                "identifier": "seg",
                "num_dwelling_units": 4,
                "num_floor_levels": 2,
                "phius_certification": {
                    "building_category_type": "2-NON-RESIDENTIAL BUILDING",
                    "building_status": "3-COMPLETE",
                    "PHIUS_annual_heating_demand": 12.5,
                    "PHIUS_peak_cooling_load": 6.0
                }
            }"#,
        );
        let data = build_certification(Some(&seg)).unwrap();
        assert_eq!(data.building_category, 2);
        assert_eq!(data.building_status, 3);
        assert_eq!(data.num_of_units, 4);
        assert_eq!(data.num_of_floors, 2);
        assert_eq!(data.annual_heating_demand, 12.5);
        assert_eq!(data.peak_cooling_load, 6.0);
        assert_eq!(data.peak_heating_load, 10.0);
    }

    #[test]
    fn unknown_certification_option_is_an_error() {
        let seg = segment(r#"{"identifier": "s", "phius_certification": {"building_status": "DONE"}}"#);
        let err = build_certification(Some(&seg)).unwrap_err();
        assert!(err.to_string().contains("1-IN_PLANNING, 2-UNDER_CONSTRUCTION, 3-COMPLETE"));
    }

    #[test]
    fn site_copies_location_and_monthly_series() {
        let site: PhSite = serde_json::from_str(
            r#"{
                "location": {"latitude": 52.5, "longitude": 13.4, "hours_from_UTC": 1},
                "climate": {
                    "station_elevation": 34,
                    "monthly_temps": {"air_temps": {"values": [1,2,3,4,5,6,7,8,9,10,11,12]}},
                    "peak_loads": {"heat_load_1": {"temp": -10, "rad_south": 40}}
                }
            }"#,
        )
        .unwrap();
        let phx = build_site(&site);
        assert_eq!(phx.location.latitude, 52.5);
        assert_eq!(phx.location.site_elevation, 34.0);
        assert_eq!(phx.climate.monthly_temps.air_temps.june, 6.0);
        assert_eq!(phx.climate.peak_loads.heat_load_1.temperature_air, -10.0);
        assert_eq!(phx.climate.peak_loads.heat_load_1.radiation_south, 40.0);
        assert_eq!(phx.climate.ground, PhxGround::default());
    }
}
