/// Alias for `Result<T, EscError>`.
pub type EscResult<T> = Result<T, EscError>;

/// Errors that can occur when addressing rooms, objects, or inventory slots.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EscError {
    /// The room index is past the end of the level.
    #[error("room {index} does not exist (level has {count} rooms)")]
    RoomOutOfRange {
        /// The requested room index.
        index: usize,
        /// Number of rooms in the level.
        count: usize,
    },

    /// The object index is past the end of the room's object range.
    #[error("room {room} has no object {local} (it holds {count})")]
    ObjectOutOfRange {
        /// The room the object was looked up in.
        room: usize,
        /// The requested room-local object index.
        local: usize,
        /// Number of objects in the room.
        count: usize,
    },

    /// The inventory slot does not exist.
    #[error("no item at inventory slot {index} (inventory holds {count})")]
    ItemOutOfRange {
        /// The requested inventory slot.
        index: usize,
        /// Number of items in the inventory.
        count: usize,
    },

    /// A difficulty name or code could not be recognized.
    #[error("unknown difficulty: \"{0}\"")]
    UnknownDifficulty(String),
}
