pub mod accessor;
pub mod mock;
pub mod normalize;
pub mod ports;
pub mod registry;
pub mod traits;
pub mod types;

pub use accessor::{Accessor, Handle, LookupError, Property, Request, Response, DEFAULT_KEY};
pub use normalize::normalize;
pub use ports::enumerate_ports;
pub use registry::{build_registry, reconcile, Reconciliation};
pub use traits::{EndpointCollection, MidiAccess, MidiDriver};
pub use types::{
    Device, DeviceRegistry, DeviceSpec, Direction, Endpoint, NotFoundSet, Port, PortMap,
    PortRecord, SourceSpec,
};

use anyhow::{Context, Result};

/// Request access from `driver` and build the accessor over `source`
pub async fn midi_ports(driver: &dyn MidiDriver, source: SourceSpec) -> Result<Accessor> {
    let access = driver
        .request_access()
        .await
        .context(format!("Driver {} failed to grant MIDI access", driver.driver_id()))?;

    Ok(Accessor::build(access, source))
}
