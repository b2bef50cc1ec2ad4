//! Grouping rooms into variants.

use indexmap::IndexMap;

use crate::hbjson::ph::{BldgSegment, Space};
use crate::hbjson::{Face, Room};

/// Group key of rooms that name no building segment.
const DEFAULT_SEGMENT_KEY: &str = "__default_segment__";

/// Rooms that will become one variant, in source order.
#[derive(Debug, Clone)]
pub struct RoomGroup<'a> {
    pub key: String,
    pub members: Vec<&'a Room>,
}

impl<'a> RoomGroup<'a> {
    /// The room whose properties stand for the whole group.
    pub fn reference(&self) -> &'a Room {
        self.members[0]
    }

    pub fn segment(&self) -> Option<&'a BldgSegment> {
        self.reference().properties.ph.ph_bldg_segment.as_ref()
    }

    pub fn display_name(&self) -> &'a str {
        match (self.members.len(), self.segment()) {
            (1, _) | (_, None) => self.reference().display_name(),
            (_, Some(segment)) => segment.display_name(),
        }
    }

    pub fn merge(&self) -> MergedRoom<'a> {
        MergedRoom::new(self)
    }
}

/// Partition `rooms` by building segment, or one group per room when
/// `by_segment` is off. Groups keep the order of their first member.
pub fn group_rooms(rooms: &[Room], by_segment: bool) -> Vec<RoomGroup<'_>> {
    let mut groups: IndexMap<String, Vec<&Room>> = IndexMap::new();
    for room in rooms {
        let key = if by_segment {
            room.segment_identifier()
                .unwrap_or(DEFAULT_SEGMENT_KEY)
                .to_string()
        } else {
            room.identifier.clone()
        };
        groups.entry(key).or_default().push(room);
    }
    groups
        .into_iter()
        .map(|(key, members)| RoomGroup { key, members })
        .collect()
}

/// A face of the merged room, with the member room it came from.
#[derive(Debug, Clone, Copy)]
pub struct HostedFace<'a> {
    pub host: &'a Room,
    pub face: &'a Face,
}

/// A space of the merged room. `space` is `None` for the stand-in space
/// of a member room that defines none.
#[derive(Debug, Clone, Copy)]
pub struct HostedSpace<'a> {
    pub host: &'a Room,
    pub space: Option<&'a Space>,
}

/// The synthetic room standing for a group.
#[derive(Debug, Clone)]
pub struct MergedRoom<'a> {
    pub reference: &'a Room,
    pub members: Vec<&'a Room>,
    pub faces: Vec<HostedFace<'a>>,
    pub spaces: Vec<HostedSpace<'a>>,
}

impl<'a> MergedRoom<'a> {
    fn new(group: &RoomGroup<'a>) -> Self {
        let merging = group.members.len() > 1;
        let faces = group
            .members
            .iter()
            .flat_map(|&room| room.faces.iter().map(move |face| HostedFace { host: room, face }))
            .filter(|f| {
                !merging
                    || f.face
                        .boundary_condition
                        .parse_kind()
                        .map_or(true, |bc| bc.is_exposed())
            })
            .collect();

        let spaces = group
            .members
            .iter()
            .flat_map(|&room| {
                let spaces = &room.properties.ph.spaces;
                if spaces.is_empty() {
                    vec![HostedSpace { host: room, space: None }]
                } else {
                    spaces
                        .iter()
                        .map(|space| HostedSpace {
                            host: room,
                            space: Some(space),
                        })
                        .collect()
                }
            })
            .collect();

        Self {
            reference: group.reference(),
            members: group.members.clone(),
            faces,
            spaces,
        }
    }

    /// Spaces hosted by `room`.
    pub fn spaces_of(&self, room: &Room) -> impl Iterator<Item = &HostedSpace<'a>> {
        let id = room.identifier.clone();
        self.spaces.iter().filter(move |s| s.host.identifier == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: &str, segment: Option<&str>, bcs: &[&str]) -> Room {
        let faces: Vec<serde_json::Value> = bcs
            .iter()
            .enumerate()
            .map(|(i, bc)| {
                serde_json::json!({
                    "identifier": format!("{id}-face-{i}"),
                    "geometry": {"boundary": [[0,0,0],[1,0,0],[1,0,1]]},
                    "face_type": "Wall",
                    "boundary_condition": {"type": bc}
                })
            })
            .collect();
        let mut json = serde_json::json!({"identifier": id, "faces": faces});
        if let Some(seg) = segment {
            json["properties"] = serde_json::json!({"ph": {"ph_bldg_segment": {"identifier": seg}}});
        }
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn rooms_group_by_segment_in_source_order() {
        let rooms = vec![
            room("a", Some("s1"), &["Outdoors"]),
            room("b", Some("s2"), &["Outdoors"]),
            room("c", Some("s1"), &["Outdoors"]),
        ];
        let groups = group_rooms(&rooms, true);
        let keys: Vec<_> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, ["s1", "s2"]);
        let members: Vec<_> = groups[0].members.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(members, ["a", "c"]);
    }

    #[test]
    fn without_segment_merging_each_room_stands_alone() {
        let rooms = vec![room("a", Some("s1"), &[]), room("b", Some("s1"), &[])];
        assert_eq!(group_rooms(&rooms, false).len(), 2);
    }

    #[test]
    fn merged_room_drops_interior_faces() {
        let rooms = vec![
            room("a", Some("s1"), &["Outdoors", "Surface", "Ground"]),
            room("b", Some("s1"), &["Surface", "Adiabatic"]),
        ];
        let merged = group_rooms(&rooms, true)[0].merge();
        let faces: Vec<_> = merged.faces.iter().map(|f| f.face.identifier.as_str()).collect();
        assert_eq!(faces, ["a-face-0", "a-face-2", "b-face-1"]);
        assert_eq!(merged.reference.identifier, "a");
    }

    #[test]
    fn single_room_keeps_every_face() {
        let rooms = vec![room("a", None, &["Outdoors", "Surface"])];
        let merged = group_rooms(&rooms, true)[0].merge();
        assert_eq!(merged.faces.len(), 2);
    }

    #[test]
    fn rooms_without_spaces_get_a_stand_in() {
        let rooms = vec![room("a", Some("s1"), &[]), room("b", Some("s1"), &[])];
        let merged = group_rooms(&rooms, true)[0].merge();
        assert_eq!(merged.spaces.len(), 2);
        assert!(merged.spaces.iter().all(|s| s.space.is_none()));
        assert_eq!(merged.spaces_of(&rooms[1]).count(), 1);
    }
}
