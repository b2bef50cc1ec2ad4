#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuctType {
    #[default]
    Supply,
    Exhaust,
}

impl DuctType {
    pub fn code(self) -> i32 {
        match self {
            Self::Supply => 1,
            Self::Exhaust => 2,
        }
    }
}

/// A run of ventilation duct between the unit and the thermal envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct PhxDuctElement {
    pub id_num: u32,
    pub display_name: String,
    pub duct_type: DuctType,
    /// m
    pub length: f64,
    /// mm, round ducts
    pub diameter: f64,
    /// mm, rectangular ducts
    pub height: Option<f64>,
    /// mm, rectangular ducts
    pub width: Option<f64>,
    /// mm
    pub insulation_thickness: f64,
    /// W/mK
    pub insulation_conductivity: f64,
    pub insulation_reflective: bool,
    pub quantity: u32,
}

impl PhxDuctElement {
    pub fn is_round(&self) -> bool {
        self.height.is_none() || self.width.is_none()
    }
}

/// A run of hot-water pipe.
#[derive(Debug, Clone, PartialEq)]
pub struct PhxPipeElement {
    pub display_name: String,
    /// m
    pub length: f64,
    /// mm
    pub diameter: f64,
    /// mm
    pub insulation_thickness: f64,
    /// W/mK
    pub insulation_conductivity: f64,
    pub insulation_reflective: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhxDistribution {
    pub ducts: Vec<PhxDuctElement>,
    pub piping: Vec<PhxPipeElement>,
}

impl PhxDistribution {
    pub fn is_empty(&self) -> bool {
        self.ducts.is_empty() && self.piping.is_empty()
    }

    pub fn duct_length(&self, duct_type: DuctType) -> f64 {
        self.ducts
            .iter()
            .filter(|d| d.duct_type == duct_type)
            .map(|d| d.length * d.quantity as f64)
            .sum()
    }
}
