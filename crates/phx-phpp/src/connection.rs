//! Block writes and PHPP-ID lookups against an open workbook.

use std::collections::{HashMap, HashSet};

use log::{debug, info, warn};
use phx::model::PhxComponent;
use phx::model::building::ComponentFaceOpacity;
use phx::{PhxProject, PhxVariant};

use crate::column::{CellRef, col_offset};
use crate::error::{PhppError, Result};
use crate::locator::ShapeLocator;
use crate::rows::{
    DuctRow, FrameRow, GlazingRow, PhppRow, SurfaceRow, UValueConstructor, VentRoomRow,
    VentUnitRow, VentilatorRow, WindowRow,
};
use crate::shape::{BlockShape, PhppShape};
use crate::xl::{CellValue, SilentMode, Workbook};

/// A workbook paired with the shape describing where its blocks are.
pub struct PhppConnection<W: Workbook> {
    workbook: W,
    shape: PhppShape,
    locator: ShapeLocator,
}

impl<W: Workbook> PhppConnection<W> {
    pub fn new(workbook: W, shape: PhppShape) -> Self {
        Self {
            workbook,
            shape,
            locator: ShapeLocator::new(),
        }
    }

    pub fn workbook(&self) -> &W {
        &self.workbook
    }

    pub fn into_workbook(self) -> W {
        self.workbook
    }

    pub fn shape(&self) -> &PhppShape {
        &self.shape
    }

    /// Forget every located block. Needed after rows were inserted or
    /// removed outside this connection.
    pub fn invalidate(&mut self) {
        self.locator.invalidate_all();
    }

    fn session(&mut self) -> Session<'_, W> {
        Session {
            wb: &mut self.workbook,
            shape: &self.shape,
            locator: &mut self.locator,
        }
    }

    /// Write everything the workbook takes from `variant`: assemblies,
    /// glazings, frames and ventilators first, then the surfaces, windows
    /// and ventilation entries that reference them by PHPP ID.
    ///
    /// The workbook stays silent for the whole write and recalculates once
    /// afterwards, also when the write fails.
    pub fn write_variant(&mut self, project: &PhxProject, variant: &PhxVariant) -> Result<()> {
        let mut silent = SilentMode::new(&mut self.workbook)?;
        let mut session = Session {
            wb: &mut *silent,
            shape: &self.shape,
            locator: &mut self.locator,
        };
        session.write_variant(project, variant)
    }

    pub fn write_u_value_constructors(&mut self, constructors: &[UValueConstructor]) -> Result<()> {
        self.session().write_u_value_constructors(constructors)
    }

    pub fn write_glazings(&mut self, rows: &[GlazingRow]) -> Result<()> {
        let mut session = self.session();
        let shape = session.shape;
        session.write_block(&shape.glazings, rows)?;
        Ok(())
    }

    pub fn write_frames(&mut self, rows: &[FrameRow]) -> Result<()> {
        let mut session = self.session();
        let shape = session.shape;
        session.write_block(&shape.frames, rows)?;
        Ok(())
    }

    pub fn write_ventilators(&mut self, rows: &[VentilatorRow]) -> Result<()> {
        let mut session = self.session();
        let shape = session.shape;
        session.write_block(&shape.ventilators, rows)?;
        Ok(())
    }

    pub fn write_surfaces(&mut self, rows: &[SurfaceRow]) -> Result<()> {
        let mut session = self.session();
        let shape = session.shape;
        session.write_block(&shape.surfaces, rows)?;
        Ok(())
    }

    pub fn write_windows(&mut self, rows: &[WindowRow]) -> Result<()> {
        let mut session = self.session();
        let shape = session.shape;
        session.write_block(&shape.windows, rows)?;
        Ok(())
    }

    pub fn write_vent_units(&mut self, rows: &[VentUnitRow]) -> Result<()> {
        let mut session = self.session();
        let shape = session.shape;
        session.write_block(&shape.vent_units, rows)?;
        Ok(())
    }

    pub fn write_vent_rooms(&mut self, rows: &[VentRoomRow]) -> Result<()> {
        let mut session = self.session();
        let shape = session.shape;
        session.write_block(&shape.vent_rooms, rows)?;
        Ok(())
    }

    pub fn write_ducts(&mut self, rows: &[DuctRow]) -> Result<()> {
        let mut session = self.session();
        let shape = session.shape;
        session.write_block(&shape.vent_ducts, rows)?;
        Ok(())
    }

    /// `"{prefix}-{name}"` of the glazing listed as `name`, read from the
    /// column left of the description.
    pub fn get_glazing_phpp_id_by_name(&mut self, name: &str) -> Result<Option<String>> {
        self.session().glazing_id(name)
    }

    pub fn get_frame_phpp_id_by_name(&mut self, name: &str) -> Result<Option<String>> {
        self.session().frame_id(name)
    }

    pub fn get_assembly_phpp_id_by_name(&mut self, name: &str) -> Result<Option<String>> {
        self.session().assembly_id(name)
    }

    pub fn get_ventilator_phpp_id_by_name(&mut self, name: &str) -> Result<Option<String>> {
        self.session().ventilator_id(name)
    }

    pub fn get_surface_phpp_id_by_name(&mut self, name: &str) -> Result<Option<String>> {
        self.session().surface_id(name)
    }

    pub fn get_vent_unit_phpp_id_by_name(&mut self, name: &str) -> Result<Option<String>> {
        self.session().vent_unit_id(name)
    }
}

/// Borrowed parts of a connection, so a write can run against the
/// workbook either directly or through a [`SilentMode`] guard.
struct Session<'a, W: Workbook + ?Sized> {
    wb: &'a mut W,
    shape: &'a PhppShape,
    locator: &'a mut ShapeLocator,
}

impl<W: Workbook + ?Sized> Session<'_, W> {
    /// Write `rows` into `block`, returning the sheet row each one landed on.
    fn write_block<R: PhppRow>(&mut self, block: &BlockShape<R::Columns>, rows: &[R]) -> Result<Vec<u32>> {
        let sheet = block.sheet.as_str();
        let first = self.locator.locate(&*self.wb, sheet, &block.locator)?.first_entry_row;
        let column = R::description_column(&block.columns);
        let existing = self
            .wb
            .read_column(sheet, column, first..=first + block.capacity - 1)?;
        let mut taken = vec![false; existing.len()];

        let mut written = Vec::with_capacity(rows.len());
        for row in rows {
            let index = claim_row(&existing, &mut taken, row.description()).ok_or_else(|| {
                PhppError::BlockFull {
                    sheet: sheet.to_string(),
                    anchor: block.locator.header_anchor.clone(),
                    description: row.description().to_string(),
                }
            })?;
            let row_num = first + index as u32;
            debug!("{sheet}: '{}' -> row {row_num}", row.description());
            for item in row.xl_items(sheet, row_num, &block.columns) {
                self.wb.write(&item)?;
            }
            written.push(row_num);
        }
        Ok(written)
    }

    /// First row of each constructor slot on the U-Values sheet.
    fn u_value_base_rows(&mut self) -> Result<Vec<u32>> {
        let shape = self.shape;
        let block = &shape.u_values;
        let first = self
            .locator
            .locate(&*self.wb, &block.sheet, &block.locator)?
            .first_entry_row;
        Ok((0..block.capacity).map(|i| first + i * block.stride).collect())
    }

    fn u_value_descriptions(&self, base_rows: &[u32]) -> Result<Vec<CellValue>> {
        let block = &self.shape.u_values;
        base_rows
            .iter()
            .map(|row| {
                self.wb
                    .read(&block.sheet, &CellRef::new(&block.columns.description, *row))
            })
            .collect()
    }

    fn write_u_value_constructors(&mut self, constructors: &[UValueConstructor]) -> Result<()> {
        let base_rows = self.u_value_base_rows()?;
        let existing = self.u_value_descriptions(&base_rows)?;
        let mut taken = vec![false; existing.len()];
        let shape = self.shape;
        let block = &shape.u_values;

        for constructor in constructors {
            let index = claim_row(&existing, &mut taken, &constructor.description).ok_or_else(|| {
                PhppError::BlockFull {
                    sheet: block.sheet.clone(),
                    anchor: block.locator.header_anchor.clone(),
                    description: constructor.description.clone(),
                }
            })?;
            debug!(
                "{}: '{}' -> row {}",
                block.sheet, constructor.description, base_rows[index]
            );
            for item in constructor.xl_items(base_rows[index], block) {
                self.wb.write(&item)?;
            }
        }
        Ok(())
    }

    fn lookup<C>(&mut self, block: &BlockShape<C>, column: &str, name: &str) -> Result<Option<String>> {
        let sheet = block.sheet.as_str();
        let first = self.locator.locate(&*self.wb, sheet, &block.locator)?.first_entry_row;
        let cells = self
            .wb
            .read_column(sheet, column, first..=first + block.capacity - 1)?;
        let Some(index) = find_description(&cells, name) else {
            return Ok(None);
        };
        self.prefixed_id(sheet, column, first + index as u32, name)
            .map(Some)
    }

    fn prefixed_id(&self, sheet: &str, column: &str, row: u32, name: &str) -> Result<String> {
        let prefix = self.wb.read(sheet, &CellRef::new(col_offset(column, -1)?, row))?;
        Ok(format!("{prefix}-{name}"))
    }

    fn glazing_id(&mut self, name: &str) -> Result<Option<String>> {
        let shape = self.shape;
        let block = &shape.glazings;
        self.lookup(block, &block.columns.description, name)
    }

    fn frame_id(&mut self, name: &str) -> Result<Option<String>> {
        let shape = self.shape;
        let block = &shape.frames;
        self.lookup(block, &block.columns.description, name)
    }

    fn ventilator_id(&mut self, name: &str) -> Result<Option<String>> {
        let shape = self.shape;
        let block = &shape.ventilators;
        self.lookup(block, &block.columns.description, name)
    }

    fn surface_id(&mut self, name: &str) -> Result<Option<String>> {
        let shape = self.shape;
        let block = &shape.surfaces;
        self.lookup(block, &block.columns.description, name)
    }

    fn vent_unit_id(&mut self, name: &str) -> Result<Option<String>> {
        let shape = self.shape;
        let block = &shape.vent_units;
        self.lookup(block, &block.columns.description, name)
    }

    fn assembly_id(&mut self, name: &str) -> Result<Option<String>> {
        let base_rows = self.u_value_base_rows()?;
        let cells = self.u_value_descriptions(&base_rows)?;
        let Some(index) = find_description(&cells, name) else {
            return Ok(None);
        };
        let shape = self.shape;
        let block = &shape.u_values;
        self.prefixed_id(&block.sheet, &block.columns.description, base_rows[index], name)
            .map(Some)
    }

    fn write_variant(&mut self, project: &PhxProject, variant: &PhxVariant) -> Result<()> {
        info!("Writing variant '{}' with the {} shape", variant.name, self.shape.name);
        let shape = self.shape;
        let building = &variant.building;

        let constructors: Vec<_> = project
            .assembly_types
            .values()
            .map(UValueConstructor::from_assembly)
            .collect();
        self.write_u_value_constructors(&constructors)?;

        let glazings = unique_by_description(
            project.window_types.values().map(GlazingRow::from_window_type),
        );
        self.write_block(&shape.glazings, &glazings)?;
        let frames = unique_by_description(
            project.window_types.values().map(FrameRow::from_window_type),
        );
        self.write_block(&shape.frames, &frames)?;

        let ventilators = unique_by_description(
            variant
                .mech_collections
                .iter()
                .flat_map(|c| c.ventilators())
                .map(|(device, params)| VentilatorRow::new(device, params)),
        );
        self.write_block(&shape.ventilators, &ventilators)?;

        let mut surfaces = Vec::new();
        let mut surface_components = Vec::new();
        for component in building
            .components
            .iter()
            .filter(|c| c.face_opacity == ComponentFaceOpacity::Opaque)
        {
            let assembly = u32::try_from(component.assembly_type_id_num)
                .ok()
                .and_then(|id| project.assembly_by_id(id));
            let assembly_id = match assembly {
                Some(a) => {
                    let name = &a.display_name;
                    Some(require(self.assembly_id(name)?, "U-Values", name)?)
                }
                None => None,
            };
            surfaces.push(SurfaceRow::from_component(
                component,
                &variant.graphics3d,
                assembly_id,
            ));
            surface_components.push(component.id_num);
        }
        let surface_rows = self.write_block(&shape.surfaces, &surfaces)?;
        // Hosts are addressed by the row written for them, not by name.
        let mut surface_ids = HashMap::new();
        for ((component, row), surface) in surface_components.iter().zip(&surface_rows).zip(&surfaces) {
            let id = self.prefixed_id(
                &shape.surfaces.sheet,
                &shape.surfaces.columns.description,
                *row,
                &surface.description,
            )?;
            surface_ids.insert(*component, id);
        }

        let mut windows = Vec::new();
        for component in building.aperture_components() {
            let Some(window_type) = u32::try_from(component.window_type_id_num)
                .ok()
                .and_then(|id| project.window_type_by_id(id))
            else {
                warn!(
                    "Window '{}' has no window type; left out of the Windows sheet",
                    component.display_name
                );
                continue;
            };
            let glazing = window_type.glazing_display_name();
            let glazing_id = require(self.glazing_id(glazing)?, "glazing", glazing)?;
            let frame = window_type.frame_display_name();
            let frame_id = require(self.frame_id(frame)?, "frame", frame)?;

            for polygon in component
                .polygon_ids
                .iter()
                .filter_map(|id| variant.graphics3d.polygon_by_id(*id))
            {
                let host = match host_component(variant, polygon.id_num) {
                    Some(host) => surface_ids.get(&host.id_num).cloned(),
                    None => {
                        warn!("Window '{}' has no host surface", polygon.display_name);
                        None
                    }
                };
                windows.push(WindowRow::from_polygon(
                    polygon,
                    host,
                    glazing_id.clone(),
                    frame_id.clone(),
                ));
            }
        }
        self.write_block(&shape.windows, &windows)?;

        let mut seen = HashSet::new();
        let mut units = Vec::new();
        for (device, params) in variant.mech_collections.iter().flat_map(|c| c.ventilators()) {
            if !seen.insert(device.display_name.as_str()) {
                continue;
            }
            let selected = require(
                self.ventilator_id(&device.display_name)?,
                "ventilator",
                &device.display_name,
            )?;
            units.push(VentUnitRow::new(device, params, selected));
        }
        self.write_block(&shape.vent_units, &units)?;

        let mut rooms = Vec::new();
        for room in building.ventilation_rooms() {
            let device = room.ventilation_unit_id_num.and_then(|id| {
                variant
                    .mech_collections
                    .iter()
                    .find_map(|c| c.device_by_id(id))
            });
            let vent_unit = match device {
                Some(d) => Some(require(
                    self.vent_unit_id(&d.display_name)?,
                    "ventilation unit",
                    &d.display_name,
                )?),
                None => None,
            };
            let periods = room.vent_pattern_id_num.and_then(|id| {
                project
                    .utilization_patterns_ventilation
                    .iter()
                    .find(|p| p.id_num == id)
                    .map(|p| &p.operating_periods)
            });
            rooms.push(VentRoomRow::new(room, vent_unit, periods));
        }
        self.write_block(&shape.vent_rooms, &rooms)?;

        let mut ducts = Vec::new();
        for subsystem in variant
            .mech_collections
            .iter()
            .flat_map(|c| c.ventilation_subsystems())
        {
            if subsystem.distribution.ducts.is_empty() {
                continue;
            }
            let name = &subsystem.device.display_name;
            let unit = require(self.vent_unit_id(name)?, "ventilation unit", name)?;
            ducts.extend(
                subsystem
                    .distribution
                    .ducts
                    .iter()
                    .map(|duct| DuctRow::new(duct, unit.clone())),
            );
        }
        self.write_block(&shape.vent_ducts, &ducts)?;

        info!(
            "Wrote {} surfaces, {} windows and {} ventilated rooms",
            surfaces.len(),
            windows.len(),
            rooms.len()
        );
        Ok(())
    }
}

fn find_description(cells: &[CellValue], name: &str) -> Option<usize> {
    cells
        .iter()
        .position(|v| v.as_text().map(str::trim) == Some(name.trim()))
}

/// Row index for `description`: a row that held it before this write and
/// is not yet taken, else the first empty one. The chosen row is marked
/// taken, so repeated descriptions within one write get rows of their own.
fn claim_row(existing: &[CellValue], taken: &mut [bool], description: &str) -> Option<usize> {
    let free: Vec<usize> = (0..existing.len()).filter(|&i| !taken[i]).collect();
    let index = free
        .iter()
        .copied()
        .find(|&i| existing[i].as_text().map(str::trim) == Some(description.trim()))
        .or_else(|| free.iter().copied().find(|&i| existing[i].is_empty()))?;
    taken[index] = true;
    Some(index)
}

fn require(id: Option<String>, block: &'static str, name: &str) -> Result<String> {
    id.ok_or_else(|| PhppError::NotListed {
        block,
        name: name.to_string(),
    })
}

fn unique_by_description<R: PhppRow>(rows: impl Iterator<Item = R>) -> Vec<R> {
    let mut seen = HashSet::new();
    rows.filter(|r| seen.insert(r.description().to_string()))
        .collect()
}

/// The opaque component whose polygon hosts the aperture polygon.
fn host_component(variant: &PhxVariant, aperture_polygon: u32) -> Option<&PhxComponent> {
    variant.building.opaque_components().find(|c| {
        c.polygon_ids
            .iter()
            .filter_map(|id| variant.graphics3d.polygon_by_id(*id))
            .any(|p| p.child_polygon_ids.contains(&aperture_polygon))
    })
}
