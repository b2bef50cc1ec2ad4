use log::{debug, warn};

use crate::calc::{VentilationDemand, four_period_pattern};
use crate::error::{PhxError, Result};
use crate::from_hbjson::Assembly;
use crate::hbjson::schedule::{PhOperatingPeriod, SchedulePh, constant_8760};
use crate::hbjson::{HbModel, Room};
use crate::ids::{IdClass, derived_identifier};
use crate::model::project::PhxProject;
use crate::model::schedules::{OperatingPeriod, UtilizationPatternVent, VentOperatingPeriods};

/// Pattern key of rooms without a ventilation load.
pub(crate) const CONSTANT_PATTERN_KEY: &str = "__constant_full_ventilation__";

/// Dedup key of a room's ventilation pattern. A scheduled load shares the
/// schedule's pattern; an unscheduled load is derived from the room's own
/// occupancy and flows, so it gets a pattern of its own.
pub(crate) fn pattern_key(room: &Room) -> String {
    match &room.properties.energy.ventilation {
        None => CONSTANT_PATTERN_KEY.to_string(),
        Some(vent) => match &vent.schedule {
            Some(schedule) => schedule.clone(),
            None => derived_identifier("ventilation", &room.identifier),
        },
    }
}

/// Peak number of occupants.
pub(crate) fn room_peak_occupancy(room: &Room) -> f64 {
    room.properties
        .energy
        .people
        .as_ref()
        .map_or(0.0, |p| p.people_per_area * room.floor_area())
}

fn room_dcv(model: &HbModel, room: &Room) -> bool {
    room.properties
        .energy
        .hvac
        .as_deref()
        .and_then(|id| model.hvac(id))
        .is_some_and(|h| h.demand_controlled_ventilation)
}

fn schedule_8760(model: &HbModel, room: &Room, id: Option<&str>, what: &'static str) -> Result<Vec<f64>> {
    let Some(id) = id else {
        debug!("Room '{}' has no {what} schedule; using constant 1.0", room.display_name());
        return Ok(constant_8760(1.0));
    };
    let schedule = model.schedule(id).ok_or_else(|| PhxError::UnresolvedReference {
        entity: room.display_name().to_string(),
        kind: "schedule",
        identifier: id.to_string(),
    })?;
    schedule.values_8760()
}

fn periods_from_ph(ph: &SchedulePh) -> Option<VentOperatingPeriods> {
    let p = ph.daily_operating_periods?;
    let period = |src: PhOperatingPeriod| {
        OperatingPeriod::new(src.period_operating_hours, src.period_operation_speed)
    };
    Some(VentOperatingPeriods {
        high: period(p.high),
        standard: period(p.standard),
        basic: period(p.basic),
        minimum: period(p.minimum),
    })
}

/// Ventilation pattern of one room, from the schedule's user-specified
/// operating periods when present, else derived from hourly values.
pub(crate) fn build_pattern(
    model: &HbModel,
    room: &Room,
    id_num: u32,
    key: &str,
) -> Result<UtilizationPatternVent> {
    let energy = &room.properties.energy;
    let vent = energy.ventilation.as_ref();
    let schedule_id = vent.and_then(|v| v.schedule.as_deref());
    let schedule = schedule_id.and_then(|id| model.schedule(id));

    let name = match (schedule.and_then(|s| s.display_name()), vent) {
        (Some(name), _) => name.to_string(),
        (None, None) => "Constant Full Ventilation".to_string(),
        (None, Some(_)) => format!("{} Ventilation", room.display_name()),
    };
    let mut pattern = UtilizationPatternVent::new(id_num, key, name);

    if let Some(ph) = schedule.and_then(|s| s.ph())
        && let Some(periods) = periods_from_ph(ph)
    {
        pattern.operating_days = ph.operating_days_wk;
        pattern.operating_weeks = ph.operating_weeks_year;
        pattern.operating_periods = periods;
        return Ok(pattern);
    }

    let Some(vent) = vent else {
        warn!(
            "Room '{}' has no ventilation load; pattern runs at full speed",
            room.display_name()
        );
        return Ok(pattern);
    };

    let vent_values = schedule_8760(model, room, schedule_id, "ventilation")?;
    let occupancy_id = energy
        .people
        .as_ref()
        .and_then(|p| p.occupancy_schedule.as_deref());
    let occupancy_values = schedule_8760(model, room, occupancy_id, "occupancy")?;

    let rates = vent.rates();
    let demand = VentilationDemand {
        vent_schedule: &vent_values,
        occupancy_schedule: &occupancy_values,
        vent_peak_m3s: rates.base_peak_m3s(room.floor_area(), room.volume()),
        occupancy_peak_m3s: rates.occupant_peak_m3s(room_peak_occupancy(room)),
        dcv: room_dcv(model, room),
    };
    pattern.operating_periods = four_period_pattern(&demand);
    Ok(pattern)
}

pub(crate) fn add_ventilation_patterns(asm: &mut Assembly<'_>, project: &mut PhxProject) -> Result<()> {
    let model = asm.model;
    for room in &model.rooms {
        let key = pattern_key(room);

        let patterns = &mut project.utilization_patterns_ventilation;
        let id_num = match patterns.get(&key) {
            Some(existing) => existing.id_num,
            None => {
                let id_num = asm.ids.allocate(IdClass::VentilationPattern);
                let pattern = build_pattern(model, room, id_num, &key)?;
                debug!(
                    "Ventilation pattern '{}' ({}) for room '{}'",
                    pattern.display_name,
                    id_num,
                    room.display_name()
                );
                patterns.add_pattern(pattern)
            }
        };
        asm.source_ids
            .room_patterns
            .insert(room.identifier.clone(), id_num);
    }
    Ok(())
}
