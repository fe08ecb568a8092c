pub mod config;
pub mod logging;
pub mod midi;

pub use config::MidiConfig;
pub use midi::{midi_ports, Accessor, Handle, LookupError, Property, Response, SourceSpec};
