use log::warn;
use phx::model::PhxConstructionOpaque;
use phx::model::constructions::{R_SE, R_SI};

use crate::shape::UValueShape;
use crate::xl::XlItem;

#[derive(Debug, Clone, PartialEq)]
pub struct UValueLayer {
    pub material: String,
    /// W/mK
    pub conductivity: f64,
    pub thickness_mm: f64,
}

/// One assembly on the U-Values sheet: a description row, the surface
/// resistances and a stack of layer rows below it.
#[derive(Debug, Clone, PartialEq)]
pub struct UValueConstructor {
    pub description: String,
    pub r_si: f64,
    pub r_se: f64,
    pub layers: Vec<UValueLayer>,
}

impl UValueConstructor {
    pub fn from_assembly(assembly: &PhxConstructionOpaque) -> Self {
        Self {
            description: assembly.display_name.clone(),
            r_si: R_SI,
            r_se: R_SE,
            layers: assembly
                .layers
                .iter()
                .map(|layer| UValueLayer {
                    material: layer.material.display_name.clone(),
                    conductivity: layer.material.conductivity,
                    thickness_mm: layer.thickness_mm(),
                })
                .collect(),
        }
    }

    /// Writes for the constructor whose description sits on `base_row`.
    /// Layers past the sheet's capacity are dropped.
    pub fn xl_items(&self, base_row: u32, shape: &UValueShape) -> Vec<XlItem> {
        let sheet = shape.sheet.as_str();
        let c = &shape.columns;
        if self.layers.len() > shape.max_layers as usize {
            warn!(
                "Assembly '{}' has {} layers; only the first {} fit on the U-Values sheet",
                self.description,
                self.layers.len(),
                shape.max_layers
            );
        }

        let mut items = vec![
            XlItem::new(sheet, &c.description, base_row, self.description.as_str()),
            XlItem::new(sheet, &c.r_si, base_row + shape.r_si_offset, self.r_si),
            XlItem::new(sheet, &c.r_se, base_row + shape.r_se_offset, self.r_se),
        ];
        for (i, layer) in self.layers.iter().take(shape.max_layers as usize).enumerate() {
            let row = base_row + shape.first_layer_offset + i as u32;
            items.push(XlItem::new(sheet, &c.layer_material, row, layer.material.as_str()));
            items.push(XlItem::new(sheet, &c.layer_conductivity, row, layer.conductivity));
            items.push(XlItem::new(sheet, &c.layer_thickness, row, layer.thickness_mm));
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::PhppShape;

    fn constructor(layers: usize) -> UValueConstructor {
        UValueConstructor {
            description: "Wall".into(),
            r_si: R_SI,
            r_se: R_SE,
            layers: (0..layers)
                .map(|i| UValueLayer {
                    material: format!("Layer {i}"),
                    conductivity: 0.04,
                    thickness_mm: 100.0,
                })
                .collect(),
        }
    }

    #[test]
    fn layers_start_below_the_resistances() {
        let shape = PhppShape::english_10().unwrap().u_values;
        let items = constructor(2).xl_items(10, &shape);
        let cells: Vec<String> = items.iter().map(|i| i.cell.to_string()).collect();
        assert_eq!(
            cells,
            ["M10", "M12", "M13", "L15", "M15", "S15", "L16", "M16", "S16"]
        );
    }

    #[test]
    fn extra_layers_are_dropped() {
        let shape = PhppShape::english_10().unwrap().u_values;
        let items = constructor(10).xl_items(10, &shape);
        assert_eq!(items.len(), 3 + 3 * 8);
    }
}
