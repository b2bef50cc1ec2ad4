/// Design airflow rates of one ventilated space, m³/h.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhxVentilationFlows {
    pub supply: f64,
    pub extract: f64,
    pub transfer: f64,
}

/// A ventilated space inside a zone.
#[derive(Debug, Clone, PartialEq)]
pub struct PhxRoomVentilation {
    pub id_num: u32,
    pub display_name: String,
    /// WUFI room-type code (99 = user defined).
    pub wufi_type: i32,
    pub quantity: u32,
    pub floor_area: f64,
    pub weighted_floor_area: f64,
    pub net_volume: f64,
    pub clear_height: f64,
    pub flows: PhxVentilationFlows,
    pub ventilation_unit_id_num: Option<u32>,
    pub vent_pattern_id_num: Option<u32>,
}

impl PhxRoomVentilation {
    pub fn new(id_num: u32, display_name: impl Into<String>) -> Self {
        Self {
            id_num,
            display_name: display_name.into(),
            wufi_type: 99,
            quantity: 1,
            floor_area: 0.0,
            weighted_floor_area: 0.0,
            net_volume: 0.0,
            clear_height: 2.5,
            flows: PhxVentilationFlows::default(),
            ventilation_unit_id_num: None,
            vent_pattern_id_num: None,
        }
    }
}
