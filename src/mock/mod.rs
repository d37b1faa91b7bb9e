mod events;

pub use events::RecordingEvents;
