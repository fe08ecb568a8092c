use anyhow::Result;
use async_trait::async_trait;
use super::types::{Direction, Endpoint};

/// One side (inputs or outputs) of a MIDI access handle
pub trait EndpointCollection: Send + Sync {
    /// All endpoints currently reported, in provider order
    fn endpoints(&self) -> &[Endpoint];

    /// Look up a live endpoint by id
    fn lookup(&self, id: &str) -> Option<&Endpoint>;

    fn len(&self) -> usize {
        self.endpoints().len()
    }

    fn is_empty(&self) -> bool {
        self.endpoints().is_empty()
    }
}

/// Hardware-access handle the registry is built from
pub trait MidiAccess: Send + Sync {
    fn inputs(&self) -> &dyn EndpointCollection;

    fn outputs(&self) -> &dyn EndpointCollection;

    /// Whether system exclusive messages were granted
    fn sysex_enabled(&self) -> bool {
        false
    }

    fn collection(&self, direction: Direction) -> &dyn EndpointCollection {
        match direction {
            Direction::Input => self.inputs(),
            Direction::Output => self.outputs(),
        }
    }
}

/// Trait implemented by backends that hand out a MIDI access handle
#[async_trait]
pub trait MidiDriver: Send + Sync {
    /// Unique driver identifier (e.g., "snapshot")
    fn driver_id(&self) -> &str;

    /// Request access to the MIDI subsystem (async for permission prompts)
    async fn request_access(&self) -> Result<Box<dyn MidiAccess>>;
}
