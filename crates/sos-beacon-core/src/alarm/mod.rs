mod player;
mod rate;

pub(crate) use rate::convert_rate;

pub use player::{Alarm, AlarmPlayer};
