/// Errors reported by the pullkit controllers and their builders.
///
/// Ordinary gesture input never produces an error: out-of-order or unknown pointer events are
/// ignored (and logged with the `tracing` feature).
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// An insert position past the end of the loaded data.
    #[error("insert index {index} is out of range for {len} loaded items")]
    InsertOutOfRange { index: usize, len: usize },

    /// The drag distance needed to trigger a refresh must be positive.
    #[error("trigger distance must be positive, got {0}")]
    InvalidTriggerDistance(f32),

    /// The indicator offsets must leave room for the slingshot.
    #[error("indicator offsets start={start} end={end} give a non-positive slingshot distance")]
    InvalidSlingshot { start: i32, end: i32 },

    /// A builder was finished without one of its collaborators.
    #[error("missing collaborator: {0}")]
    MissingCollaborator(&'static str),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
