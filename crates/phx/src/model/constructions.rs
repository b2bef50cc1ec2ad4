/// Interior and exterior surface resistances used for opaque U-values [m²K/W].
pub const R_SI: f64 = 0.13;
pub const R_SE: f64 = 0.04;

#[derive(Debug, Clone, PartialEq)]
pub struct PhxMaterial {
    pub display_name: String,
    /// W/mK
    pub conductivity: f64,
    /// kg/m³
    pub density: f64,
    pub porosity: f64,
    /// J/kgK
    pub heat_capacity: f64,
    pub water_vapor_resistance: f64,
    pub reference_water: f64,
}

impl Default for PhxMaterial {
    fn default() -> Self {
        Self {
            display_name: String::new(),
            conductivity: 0.0,
            density: 0.0,
            porosity: 0.95,
            heat_capacity: 0.0,
            water_vapor_resistance: 1.0,
            reference_water: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhxLayer {
    pub thickness_m: f64,
    pub material: PhxMaterial,
}

impl PhxLayer {
    pub fn thickness_mm(&self) -> f64 {
        self.thickness_m * 1000.0
    }

    pub fn r_value(&self) -> f64 {
        if self.material.conductivity <= 0.0 {
            return 0.0;
        }
        self.thickness_m / self.material.conductivity
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhxConstructionOpaque {
    pub id_num: u32,
    pub display_name: String,
    /// Source identifier used as the dedup key.
    pub identifier: String,
    /// 2 = layers listed outside to inside.
    pub layer_order: i32,
    pub grid_kind: i32,
    pub layers: Vec<PhxLayer>,
}

impl PhxConstructionOpaque {
    pub fn new(id_num: u32, identifier: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id_num,
            display_name: display_name.into(),
            identifier: identifier.into(),
            layer_order: 2,
            grid_kind: 2,
            layers: Vec::new(),
        }
    }

    pub fn r_value(&self) -> f64 {
        self.layers.iter().map(PhxLayer::r_value).sum()
    }

    /// Surface-to-surface U-value including standard film resistances.
    pub fn u_value(&self) -> f64 {
        let r = self.r_value() + R_SI + R_SE;
        if r <= 0.0 { 0.0 } else { 1.0 / r }
    }
}

/// One edge of a window frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhxWindowFrameElement {
    /// m
    pub width: f64,
    /// W/m²K
    pub u_value: f64,
    /// W/mK
    pub psi_glazing: f64,
    /// W/mK
    pub psi_install: f64,
}

impl Default for PhxWindowFrameElement {
    fn default() -> Self {
        Self {
            width: 0.1,
            u_value: 1.0,
            psi_glazing: 0.04,
            psi_install: 0.04,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowFrames {
    pub top: PhxWindowFrameElement,
    pub right: PhxWindowFrameElement,
    pub bottom: PhxWindowFrameElement,
    pub left: PhxWindowFrameElement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhxConstructionWindow {
    pub id_num: u32,
    pub display_name: String,
    /// Source identifier used as the dedup key.
    pub identifier: String,
    pub use_detailed_uw: bool,
    pub use_detailed_frame: bool,
    pub frames: WindowFrames,
    pub frame_factor: f64,
    pub u_value_window: f64,
    pub u_value_glass: f64,
    pub glass_g_value: f64,
    pub glass_mean_emissivity: f64,
    /// Display names of the PH frame and glazing records, when present.
    pub frame_name: Option<String>,
    pub glazing_name: Option<String>,
}

impl PhxConstructionWindow {
    pub fn new(id_num: u32, identifier: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id_num,
            display_name: display_name.into(),
            identifier: identifier.into(),
            use_detailed_uw: true,
            use_detailed_frame: true,
            frames: WindowFrames::default(),
            frame_factor: 0.75,
            u_value_window: 1.0,
            u_value_glass: 1.0,
            glass_g_value: 0.4,
            glass_mean_emissivity: 0.1,
            frame_name: None,
            glazing_name: None,
        }
    }

    /// Name under which the glazing is listed in tools that keep glazings
    /// and frames separately.
    pub fn glazing_display_name(&self) -> &str {
        self.glazing_name.as_deref().unwrap_or(&self.display_name)
    }

    pub fn frame_display_name(&self) -> &str {
        self.frame_name.as_deref().unwrap_or(&self.display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_u_value_includes_films() {
        let mut c = PhxConstructionOpaque::new(1, "wall", "Wall");
        c.layers.push(PhxLayer {
            thickness_m: 0.2,
            material: PhxMaterial {
                display_name: "Insulation".into(),
                conductivity: 0.04,
                ..Default::default()
            },
        });
        assert!((c.r_value() - 5.0).abs() < 1e-12);
        assert!((c.u_value() - 1.0 / 5.17).abs() < 1e-12);
    }

    #[test]
    fn zero_conductivity_layer_contributes_nothing() {
        let layer = PhxLayer {
            thickness_m: 0.1,
            material: PhxMaterial::default(),
        };
        assert_eq!(layer.r_value(), 0.0);
        assert_eq!(layer.thickness_mm(), 100.0);
    }
}
