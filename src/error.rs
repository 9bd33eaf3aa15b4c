use thiserror::Error;

/// Errors surfaced by cursor construction and movement.
///
/// Inserting a key that is already present is not an error; `insert` reports
/// it through the boolean half of its return value instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The tree holds no entries, so there is no first or last position.
    #[error("tree is empty")]
    Empty,
    /// A cursor was asked to step before the first or past the last entry.
    #[error("cursor step out of range")]
    OutOfRange,
}
