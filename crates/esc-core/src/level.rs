use std::ops::Range;

use serde::Serialize;

use crate::error::{EscError, EscResult};
use crate::object::GameObject;

/// Name and description of a room, before its objects are laid out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomHeader {
    /// Display name.
    pub name: String,
    /// Flavor text shown on entry.
    pub description: String,
}

impl RoomHeader {
    /// Create a header.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A room and the contiguous slice of the object table it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    /// Display name.
    pub name: String,
    /// Flavor text shown on entry.
    pub description: String,
    /// Index of the room's first object in the level's object table.
    pub first_object: usize,
    /// Number of objects in the room.
    pub object_count: usize,
}

impl Room {
    /// Global object indices belonging to this room.
    pub fn object_range(&self) -> Range<usize> {
        self.first_object..self.first_object + self.object_count
    }

    /// Whether the room holds no objects at all.
    pub fn is_empty(&self) -> bool {
        self.object_count == 0
    }
}

/// An ordered sequence of rooms over a flat object table.
///
/// The room ranges partition the object table exactly, in room order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Level {
    rooms: Vec<Room>,
    objects: Vec<GameObject>,
}

impl Level {
    /// Lay out objects into per-room contiguous ranges.
    ///
    /// `placed` pairs each object with the index of the room it was defined
    /// in. Objects are counted per room, each room gets a start offset from
    /// the running sum of the counts before it, and every object is written
    /// into the next free slot of its room, so within-room order follows the
    /// order of `placed`. Objects naming a room that does not exist are
    /// dropped.
    pub fn assemble(headers: Vec<RoomHeader>, placed: Vec<(usize, GameObject)>) -> Self {
        let room_count = headers.len();

        let mut counts = vec![0usize; room_count];
        for (room, _) in &placed {
            if let Some(count) = counts.get_mut(*room) {
                *count += 1;
            }
        }

        let mut starts = Vec::with_capacity(room_count);
        let mut total = 0;
        for count in &counts {
            starts.push(total);
            total += count;
        }

        let mut slots: Vec<Option<GameObject>> = (0..total).map(|_| None).collect();
        let mut cursor = vec![0usize; room_count];
        for (room, object) in placed {
            if room >= room_count {
                continue;
            }
            slots[starts[room] + cursor[room]] = Some(object);
            cursor[room] += 1;
        }

        let rooms = headers
            .into_iter()
            .zip(starts.iter().zip(counts.iter()))
            .map(|(header, (&first_object, &object_count))| Room {
                name: header.name,
                description: header.description,
                first_object,
                object_count,
            })
            .collect();

        Self {
            rooms,
            objects: slots.into_iter().flatten().collect(),
        }
    }

    // -----------------------------------------------------------------------
    // Rooms
    // -----------------------------------------------------------------------

    /// All rooms in play order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Number of rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Look up a room by index.
    pub fn room(&self, index: usize) -> EscResult<&Room> {
        self.rooms.get(index).ok_or(EscError::RoomOutOfRange {
            index,
            count: self.rooms.len(),
        })
    }

    // -----------------------------------------------------------------------
    // Objects
    // -----------------------------------------------------------------------

    /// The whole object table.
    pub fn objects(&self) -> &[GameObject] {
        &self.objects
    }

    /// Total number of objects across all rooms.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// The objects of one room, in definition order.
    pub fn objects_in(&self, room: usize) -> EscResult<&[GameObject]> {
        let range = self.room(room)?.object_range();
        Ok(&self.objects[range])
    }

    /// Mutable access to the objects of one room.
    pub fn room_objects_mut(&mut self, room: usize) -> EscResult<&mut [GameObject]> {
        let range = self.room(room)?.object_range();
        Ok(&mut self.objects[range])
    }

    /// Translate a room-local object index into an index into the object table.
    pub fn global_index(&self, room: usize, local: usize) -> EscResult<usize> {
        let r = self.room(room)?;
        if local >= r.object_count {
            return Err(EscError::ObjectOutOfRange {
                room,
                local,
                count: r.object_count,
            });
        }
        Ok(r.first_object + local)
    }

    /// Look up an object by room and room-local index.
    pub fn object(&self, room: usize, local: usize) -> EscResult<&GameObject> {
        let index = self.global_index(room, local)?;
        Ok(&self.objects[index])
    }

    /// Number of objects that hand out an item when resolved.
    pub fn item_granting_count(&self) -> usize {
        self.objects.iter().filter(|o| o.facet.grants_item()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::PuzzleKind;
    use proptest::prelude::*;

    fn headers(n: usize) -> Vec<RoomHeader> {
        (0..n)
            .map(|i| RoomHeader::new(format!("Room {i}"), " "))
            .collect()
    }

    #[test]
    fn assemble_groups_objects_by_room() {
        let placed = vec![
            (1, GameObject::new("b0", "")),
            (0, GameObject::new("a0", "")),
            (1, GameObject::new("b1", "")),
            (0, GameObject::new("a1", "")),
        ];
        let level = Level::assemble(headers(3), placed);

        assert_eq!(level.room_count(), 3);
        assert_eq!(level.object_count(), 4);

        let names: Vec<&str> = level.objects().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["a0", "a1", "b0", "b1"]);

        assert_eq!(level.rooms()[0].object_range(), 0..2);
        assert_eq!(level.rooms()[1].object_range(), 2..4);
        assert_eq!(level.rooms()[2].object_range(), 4..4);
        assert!(level.rooms()[2].is_empty());
    }

    #[test]
    fn assemble_drops_objects_for_missing_rooms() {
        let placed = vec![(0, GameObject::new("a", "")), (5, GameObject::new("lost", ""))];
        let level = Level::assemble(headers(1), placed);
        assert_eq!(level.object_count(), 1);
        assert_eq!(level.objects()[0].name, "a");
    }

    #[test]
    fn lookups_by_room_and_local_index() {
        let placed = vec![
            (0, GameObject::new("Desk", "")),
            (1, GameObject::new("Door", "")),
            (1, GameObject::new("Safe", "").with_puzzle(PuzzleKind::Numeric, "", "7")),
        ];
        let level = Level::assemble(headers(2), placed);

        assert_eq!(level.global_index(1, 1).unwrap(), 2);
        assert_eq!(level.object(1, 0).unwrap().name, "Door");
        assert_eq!(level.objects_in(1).unwrap().len(), 2);

        assert_eq!(
            level.object(1, 2),
            Err(EscError::ObjectOutOfRange {
                room: 1,
                local: 2,
                count: 2
            })
        );
        assert_eq!(
            level.room(2),
            Err(EscError::RoomOutOfRange { index: 2, count: 2 })
        );
    }

    #[test]
    fn counts_item_granting_objects() {
        let placed = vec![
            (0, GameObject::new("Box", "").with_item("Key")),
            (0, GameObject::new("Empty box", "").with_item("")),
            (0, GameObject::new("Chair", "")),
        ];
        let level = Level::assemble(headers(1), placed);
        assert_eq!(level.item_granting_count(), 1);
    }

    proptest! {
        #[test]
        fn ranges_partition_the_object_table(
            rooms in 1usize..8,
            assignments in proptest::collection::vec(0usize..8, 0..40),
        ) {
            let placed: Vec<(usize, GameObject)> = assignments
                .iter()
                .enumerate()
                .map(|(i, &r)| (r % rooms, GameObject::new(format!("o{i}"), "")))
                .collect();
            let level = Level::assemble(headers(rooms), placed);

            let mut expected_start = 0;
            for room in level.rooms() {
                prop_assert_eq!(room.first_object, expected_start);
                expected_start += room.object_count;
            }
            prop_assert_eq!(expected_start, level.object_count());
            prop_assert_eq!(level.object_count(), assignments.len());
        }
    }
}
