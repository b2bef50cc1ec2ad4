//! Heat-pump cooling parameters and their roll-up.
//!
//! A collection may hold several cooling-capable heat pumps; the target tools
//! take one set of parameters per cooling kind. Two parameter sets of the
//! same kind combine by averaging numbers and OR-ing flags, and a list is
//! rolled up by folding `combine` over it.

pub trait Combine: Sized {
    fn combine(&self, other: &Self) -> Self;
}

/// Fold `combine` over `items`. `None` for an empty list.
pub fn roll_up<'a, T: Combine + Clone + 'a>(items: impl IntoIterator<Item = &'a T>) -> Option<T> {
    items
        .into_iter()
        .cloned()
        .reduce(|acc, next| acc.combine(&next))
}

fn avg(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoolingViaVentilation {
    pub used: bool,
    /// °C
    pub min_coil_temp: f64,
    /// kW
    pub capacity: f64,
    pub annual_cop: f64,
    pub single_speed: bool,
}

impl Combine for CoolingViaVentilation {
    fn combine(&self, other: &Self) -> Self {
        Self {
            used: self.used || other.used,
            min_coil_temp: avg(self.min_coil_temp, other.min_coil_temp),
            capacity: avg(self.capacity, other.capacity),
            annual_cop: avg(self.annual_cop, other.annual_cop),
            single_speed: self.single_speed || other.single_speed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoolingViaRecirculation {
    pub used: bool,
    pub min_coil_temp: f64,
    pub capacity: f64,
    pub annual_cop: f64,
    pub single_speed: bool,
}

impl Combine for CoolingViaRecirculation {
    fn combine(&self, other: &Self) -> Self {
        Self {
            used: self.used || other.used,
            min_coil_temp: avg(self.min_coil_temp, other.min_coil_temp),
            capacity: avg(self.capacity, other.capacity),
            annual_cop: avg(self.annual_cop, other.annual_cop),
            single_speed: self.single_speed || other.single_speed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoolingViaDehumidification {
    pub used: bool,
    pub annual_cop: f64,
    pub useful_heat_loss: bool,
}

impl Combine for CoolingViaDehumidification {
    fn combine(&self, other: &Self) -> Self {
        Self {
            used: self.used || other.used,
            annual_cop: avg(self.annual_cop, other.annual_cop),
            useful_heat_loss: self.useful_heat_loss || other.useful_heat_loss,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoolingViaPanel {
    pub used: bool,
    pub annual_cop: f64,
}

impl Combine for CoolingViaPanel {
    fn combine(&self, other: &Self) -> Self {
        Self {
            used: self.used || other.used,
            annual_cop: avg(self.annual_cop, other.annual_cop),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeatPumpCoolingParams {
    pub ventilation: CoolingViaVentilation,
    pub recirculation: CoolingViaRecirculation,
    pub dehumidification: CoolingViaDehumidification,
    pub panel: CoolingViaPanel,
}

impl HeatPumpCoolingParams {
    pub fn any_used(&self) -> bool {
        self.ventilation.used
            || self.recirculation.used
            || self.dehumidification.used
            || self.panel.used
    }
}

impl Combine for HeatPumpCoolingParams {
    fn combine(&self, other: &Self) -> Self {
        Self {
            ventilation: self.ventilation.combine(&other.ventilation),
            recirculation: self.recirculation.combine(&other.recirculation),
            dehumidification: self.dehumidification.combine(&other.dehumidification),
            panel: self.panel.combine(&other.panel),
        }
    }
}
