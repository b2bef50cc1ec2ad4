/// Passive-House certification settings of one variant.
#[derive(Debug, Clone, PartialEq)]
pub struct PhxPhBuildingData {
    /// 1 = residential, 2 = non-residential
    pub building_category: i32,
    /// 1 = dwelling
    pub occupancy_type: i32,
    /// 1 = new construction, 2 = retrofit
    pub building_type: i32,
    /// 1 = in planning, 2 = under construction, 3 = complete
    pub building_status: i32,
    pub num_of_units: u32,
    pub num_of_floors: u32,
    /// 1 = Passive House
    pub certification_standard: i32,
    /// 1 = Classic
    pub certification_class: i32,
    /// 1 = Primary energy renewable
    pub primary_energy_type: i32,
    /// °C
    pub setpoint_winter: f64,
    pub setpoint_summer: f64,
    pub mechanical_room_temp: f64,
    pub airtightness_q50: f64,
    pub airtightness_n50: f64,
    /// kWh/m²a
    pub annual_heating_demand: f64,
    /// kWh/m²a
    pub annual_cooling_demand: f64,
    /// W/m²
    pub peak_heating_load: f64,
    /// W/m²
    pub peak_cooling_load: f64,
}

impl Default for PhxPhBuildingData {
    fn default() -> Self {
        Self {
            building_category: 1,
            occupancy_type: 1,
            building_type: 1,
            building_status: 1,
            num_of_units: 1,
            num_of_floors: 1,
            certification_standard: 1,
            certification_class: 1,
            primary_energy_type: 1,
            setpoint_winter: 20.0,
            setpoint_summer: 25.0,
            mechanical_room_temp: 20.0,
            airtightness_q50: 1.0,
            airtightness_n50: 1.0,
            annual_heating_demand: 15.0,
            annual_cooling_demand: 15.0,
            peak_heating_load: 10.0,
            peak_cooling_load: 10.0,
        }
    }
}
