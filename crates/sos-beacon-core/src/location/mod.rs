mod fix;
mod source;
mod tracker;

pub use {
    fix::{LocationFix, Position},
    source::{FeedEvent, FeedSink, PositionSource, SourceError, Subscription},
    tracker::LocationTracker,
};
