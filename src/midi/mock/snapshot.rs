use crate::midi::normalize::normalize;
use crate::midi::traits::{EndpointCollection, MidiAccess, MidiDriver};
use crate::midi::types::Endpoint;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fixed list of endpoints standing in for a live provider collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotCollection {
    endpoints: Vec<Endpoint>,
}

impl SnapshotCollection {
    pub fn new(endpoints: Vec<Endpoint>) -> Self {
        Self { endpoints }
    }
}

impl EndpointCollection for SnapshotCollection {
    fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    // The registry stores normalized ids, so accept either form.
    fn lookup(&self, id: &str) -> Option<&Endpoint> {
        self.endpoints
            .iter()
            .find(|endpoint| endpoint.id == id)
            .or_else(|| self.endpoints.iter().find(|endpoint| normalize(&endpoint.id) == id))
    }
}

/// In-memory MIDI access handle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotAccess {
    #[serde(rename = "sysexEnabled", default)]
    pub sysex_enabled: bool,
    #[serde(default)]
    pub inputs: SnapshotCollection,
    #[serde(default)]
    pub outputs: SnapshotCollection,
}

impl SnapshotAccess {
    pub fn new(inputs: Vec<Endpoint>, outputs: Vec<Endpoint>) -> Self {
        Self {
            sysex_enabled: false,
            inputs: SnapshotCollection::new(inputs),
            outputs: SnapshotCollection::new(outputs),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse MIDI snapshot")
    }
}

impl MidiAccess for SnapshotAccess {
    fn inputs(&self) -> &dyn EndpointCollection {
        &self.inputs
    }

    fn outputs(&self) -> &dyn EndpointCollection {
        &self.outputs
    }

    fn sysex_enabled(&self) -> bool {
        self.sysex_enabled
    }
}

enum SnapshotSource {
    Memory(SnapshotAccess),
    File(PathBuf),
}

/// Driver handing out snapshot access, either held in memory or read from
/// a JSON file on every request
pub struct SnapshotDriver {
    source: SnapshotSource,
}

impl SnapshotDriver {
    pub fn new(access: SnapshotAccess) -> Self {
        Self {
            source: SnapshotSource::Memory(access),
        }
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: SnapshotSource::File(path.into()),
        }
    }
}

#[async_trait]
impl MidiDriver for SnapshotDriver {
    fn driver_id(&self) -> &str {
        "snapshot"
    }

    async fn request_access(&self) -> Result<Box<dyn MidiAccess>> {
        let access = match &self.source {
            SnapshotSource::Memory(access) => access.clone(),
            SnapshotSource::File(path) => {
                let json = tokio::fs::read_to_string(path)
                    .await
                    .context(format!("Failed to read MIDI snapshot from {:?}", path))?;
                SnapshotAccess::from_json(&json)?
            }
        };

        log::debug!(
            "snapshot access: {} inputs, {} outputs",
            access.inputs.len(),
            access.outputs.len()
        );
        Ok(Box::new(access))
    }
}
