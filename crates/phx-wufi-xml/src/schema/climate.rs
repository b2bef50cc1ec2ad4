use phx::model::climate::{MonthlyValueSet, PeakLoadSet};

use crate::error::Result;
use crate::writable::{Entity, Writable, list, node, node_unit, object_as};

pub(super) fn site<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let s = expect_entity!(e, Site, "PhxSite");
    let l = &s.location;
    Ok(vec![
        node("Selection", 1),
        node("Latitude_DB", l.latitude),
        node("Longitude_DB", l.longitude),
        node_unit("HeightNN_DB", l.site_elevation, "m"),
        node("dUTC_DB", l.hours_from_utc),
        object_as("PH_ClimateLocation", Entity::Site(s), "PhxSite_PH_ClimateLocation"),
    ])
}

fn monthly<'a>(name: &'static str, set: &MonthlyValueSet) -> Writable<'a> {
    list(name, set.values().into_iter().map(|v| node("Item", v)))
}

/// Temperature and the five radiations of a peak-load case, followed by
/// whichever optional temperatures are set.
fn peak_load<'a>(
    set: &PeakLoadSet,
    names: [&'static str; 6],
    optional: [&'static str; 3],
) -> Vec<Writable<'a>> {
    let [temp, north, east, south, west, global] = names;
    let mut out = vec![
        node(temp, set.temperature_air),
        node(north, set.radiation_north),
        node(east, set.radiation_east),
        node(south, set.radiation_south),
        node(west, set.radiation_west),
        node(global, set.radiation_global),
    ];
    let [dewpoint, sky, ground] = optional;
    for (name, value) in [
        (dewpoint, set.temperature_dewpoint),
        (sky, set.temperature_sky),
        (ground, set.temperature_ground),
    ] {
        if let Some(value) = value {
            out.push(node(name, value));
        }
    }
    out
}

pub(super) fn ph_climate_location<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let s = expect_entity!(e, Site, "PhxSite_PH_ClimateLocation");
    let l = &s.location;
    let c = &s.climate;
    let g = &c.ground;
    let mut out = vec![
        node("Selection", 1),
        node("Name", &c.display_name),
        node("Daily_Temp_Swing", c.daily_temp_swing),
        node("AverageWindSpeed", c.average_wind_speed),
        node("Latitude", l.latitude),
        node("Longitude", l.longitude),
        node_unit("HeightNNWeatherStation", c.station_elevation, "m"),
        node("dUTC", l.hours_from_utc),
        node("ClimateZone", l.climate_zone),
        node("GroundThermalConductivity", g.ground_thermal_conductivity),
        node("GroundHeatCapacitiy", g.ground_heat_capacity),
        node("GroundDensity", g.ground_density),
        node("DepthGroundwater", g.depth_groundwater),
        node("FlowRateGroundwater", g.flow_rate_groundwater),
        monthly("TemperatureMonthly", &c.monthly_temps.air_temps),
        monthly("DewPointTemperatureMonthly", &c.monthly_temps.dewpoints),
        monthly("SkyTemperatureMonthly", &c.monthly_temps.sky_temps),
        monthly("GroundTemperatureMonthly", &c.monthly_temps.ground_temps),
        monthly("NorthSolarRadiationMonthly", &c.monthly_radiation.north),
        monthly("EastSolarRadiationMonthly", &c.monthly_radiation.east),
        monthly("SouthSolarRadiationMonthly", &c.monthly_radiation.south),
        monthly("WestSolarRadiationMonthly", &c.monthly_radiation.west),
        monthly("GlobalSolarRadiationMonthly", &c.monthly_radiation.glob),
    ];
    let p = &c.peak_loads;
    out.extend(peak_load(
        &p.heat_load_1,
        [
            "TemperatureHeating1",
            "NorthSolarRadiationHeating1",
            "EastSolarRadiationHeating1",
            "SouthSolarRadiationHeating1",
            "WestSolarRadiationHeating1",
            "GlobalSolarRadiationHeating1",
        ],
        ["DewPointHeating1", "SkyTemperatureHeating1", "GroundTemperatureHeating1"],
    ));
    out.extend(peak_load(
        &p.heat_load_2,
        [
            "TemperatureHeating2",
            "NorthSolarRadiationHeating2",
            "EastSolarRadiationHeating2",
            "SouthSolarRadiationHeating2",
            "WestSolarRadiationHeating2",
            "GlobalSolarRadiationHeating2",
        ],
        ["DewPointHeating2", "SkyTemperatureHeating2", "GroundTemperatureHeating2"],
    ));
    out.extend(peak_load(
        &p.cooling_load_1,
        [
            "TemperatureCooling",
            "NorthSolarRadiationCooling",
            "EastSolarRadiationCooling",
            "SouthSolarRadiationCooling",
            "WestSolarRadiationCooling",
            "GlobalSolarRadiationCooling",
        ],
        ["DewPointCooling", "SkyTemperatureCooling", "GroundTemperatureCooling"],
    ));
    out.extend(peak_load(
        &p.cooling_load_2,
        [
            "TemperatureCooling2",
            "NorthSolarRadiationCooling2",
            "EastSolarRadiationCooling2",
            "SouthSolarRadiationCooling2",
            "WestSolarRadiationCooling2",
            "GlobalSolarRadiationCooling2",
        ],
        ["DewPointCooling2", "SkyTemperatureCooling2", "GroundTemperatureCooling2"],
    ));
    Ok(out)
}

pub(super) fn passivehouse_data<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let d = expect_entity!(e, Certification, "PhxPhBuildingData");
    Ok(vec![
        node("PH_CertificateCriteria", d.certification_standard),
        node("PH_SelectionTargetData", d.certification_class),
        node("AnnualHeatingDemand", d.annual_heating_demand),
        node("AnnualCoolingDemand", d.annual_cooling_demand),
        node("PeakHeatingLoad", d.peak_heating_load),
        node("PeakCoolingLoad", d.peak_cooling_load),
        list(
            "PH_Buildings",
            [object_as(
                "PH_Building",
                Entity::Certification(d),
                "PhxPhBuildingData_PH_Building",
            )],
        ),
    ])
}

pub(super) fn ph_building<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let d = expect_entity!(e, Certification, "PhxPhBuildingData_PH_Building");
    Ok(vec![
        node("IdentNr", 1),
        node("BuildingCategory", d.building_category),
        node("OccupancyTypeResidential", d.occupancy_type),
        node("BuildingStatus", d.building_status),
        node("BuildingType", d.building_type),
        node("OccupancySettingMethod", 2),
        node("NumberUnits", d.num_of_units),
        node("CountStories", d.num_of_floors),
        node("EnvelopeAirtightnessCoefficient", d.airtightness_q50),
        node("AirChangeRate_n50", d.airtightness_n50),
        node("IndoorTemperature", d.setpoint_winter),
        node("OverheatingTemperatureThreshold", d.setpoint_summer),
        node("MechanicalRoomTemperature", d.mechanical_room_temp),
        node("PrimaryEnergyType", d.primary_energy_type),
    ])
}
