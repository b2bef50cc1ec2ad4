use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DryerType {
    #[default]
    Electric,
    Gas,
}

impl DryerType {
    pub fn code(self) -> i32 {
        match self {
            Self::Electric => 4,
            Self::Gas => 5,
        }
    }
}

/// Kind-specific parameters of a household device.
#[derive(Debug, Clone, PartialEq)]
pub enum ElectricDeviceKind {
    Dishwasher {
        capacity_type: i32,
        capacity: f64,
        water_connection: i32,
    },
    ClothesWasher {
        capacity: f64,
        modified_energy_factor: f64,
        connection: i32,
        utilization_factor: f64,
    },
    ClothesDryer {
        dryer_type: DryerType,
        gas_consumption: f64,
        gas_efficiency_factor: f64,
        field_utilization_factor_type: i32,
        field_utilization_factor: f64,
    },
    Refrigerator,
    Freezer,
    FridgeFreezer,
    Cooktop {
        cooktop_type: i32,
    },
    LightingInterior {
        frac_high_efficiency: f64,
    },
    LightingExterior {
        frac_high_efficiency: f64,
    },
    LightingGarage {
        frac_high_efficiency: f64,
    },
    MiscElectric,
    CustomElectric,
    CustomLighting,
    CustomMel,
}

impl ElectricDeviceKind {
    /// Device type code used by the target tools.
    pub fn type_code(&self) -> i32 {
        match self {
            Self::Dishwasher { .. } => 1,
            Self::ClothesWasher { .. } => 2,
            Self::ClothesDryer { .. } => 3,
            Self::Refrigerator => 4,
            Self::Freezer => 5,
            Self::FridgeFreezer => 6,
            Self::Cooktop { .. } => 7,
            Self::CustomElectric => 11,
            Self::MiscElectric => 13,
            Self::LightingInterior { .. } => 14,
            Self::LightingExterior { .. } => 15,
            Self::LightingGarage { .. } => 16,
            Self::CustomLighting => 17,
            Self::CustomMel => 18,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhxElectricalDevice {
    pub display_name: String,
    pub comment: String,
    pub reference_quantity: i32,
    pub quantity: u32,
    pub in_conditioned_space: bool,
    pub reference_energy_norm: i32,
    pub energy_demand: f64,
    pub energy_demand_per_use: f64,
    pub combined_energy_factor: f64,
    pub kind: ElectricDeviceKind,
}

impl PhxElectricalDevice {
    pub fn new(display_name: impl Into<String>, kind: ElectricDeviceKind) -> Self {
        Self {
            display_name: display_name.into(),
            comment: String::new(),
            reference_quantity: 1,
            quantity: 1,
            in_conditioned_space: true,
            reference_energy_norm: 2,
            energy_demand: 0.0,
            energy_demand_per_use: 0.0,
            combined_energy_factor: 0.0,
            kind,
        }
    }
}

/// Household devices of a zone, keyed by source identifier (first wins).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhxElectricDeviceCollection {
    devices: IndexMap<String, PhxElectricalDevice>,
}

impl PhxElectricDeviceCollection {
    pub fn add_device(&mut self, key: impl Into<String>, device: PhxElectricalDevice) {
        self.devices.entry(key.into()).or_insert(device);
    }

    pub fn devices(&self) -> impl Iterator<Item = &PhxElectricalDevice> {
        self.devices.values()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_device_with_a_key_wins() {
        let mut c = PhxElectricDeviceCollection::default();
        c.add_device("a", PhxElectricalDevice::new("Fridge", ElectricDeviceKind::Refrigerator));
        c.add_device("a", PhxElectricalDevice::new("Freezer", ElectricDeviceKind::Freezer));
        assert_eq!(c.len(), 1);
        assert_eq!(c.devices().next().unwrap().display_name, "Fridge");
    }

    #[test]
    fn type_codes() {
        assert_eq!(ElectricDeviceKind::FridgeFreezer.type_code(), 6);
        assert_eq!(
            ElectricDeviceKind::LightingInterior {
                frac_high_efficiency: 1.0
            }
            .type_code(),
            14
        );
    }
}
