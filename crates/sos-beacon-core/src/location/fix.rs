use std::time::SystemTime;

/// An immutable position snapshot from the platform feed.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// When the feed produced this position.
    pub timestamp: SystemTime,
}

/// The tracker's current knowledge of the device position.
///
/// `Unavailable` means no update has arrived yet (or the feed failed
/// before ever delivering one); `Denied` means the platform capability
/// was refused. Callers that only care about "is there a position" can
/// use [`LocationFix::position`]; callers that prompt the user can
/// distinguish the two empty states.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LocationFix {
    /// No position has been received yet.
    #[default]
    Unavailable,
    /// The platform refused the location capability.
    Denied,
    /// The most recent position delivered by the feed.
    Fix(Position),
}

impl LocationFix {
    /// The position, if one is known.
    pub fn position(&self) -> Option<&Position> {
        match self {
            LocationFix::Fix(position) => Some(position),
            LocationFix::Unavailable | LocationFix::Denied => None,
        }
    }
}
