mod session;

pub use session::{RecordingArtifact, RecordingSession, RecordingState};
