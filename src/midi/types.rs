use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Endpoint direction, selects the provider collection to query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Input,
    Output,
}

impl Direction {
    /// Classify a property name as I/O related.
    ///
    /// Anything mentioning `input` reads from the inputs, anything else
    /// mentioning `output` reads from the outputs.
    pub fn classify(property: &str) -> Option<Self> {
        if property.contains("input") {
            Some(Direction::Input)
        } else if property.contains("output") {
            Some(Direction::Output)
        } else {
            None
        }
    }

    pub fn collection_name(&self) -> &'static str {
        match self {
            Direction::Input => "inputs",
            Direction::Output => "outputs",
        }
    }
}

/// Endpoint record as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub manufacturer: String,
}

impl Endpoint {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        manufacturer: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            manufacturer: manufacturer.into(),
        }
    }
}

/// One physical port: an input endpoint, optionally paired with an output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    /// Display name as reported by the provider
    pub name: String,
    #[serde(rename = "inputID")]
    pub input_id: String,
    #[serde(rename = "outputID", skip_serializing_if = "Option::is_none")]
    pub output_id: Option<String>,
    pub manufacturer: String,
}

impl Port {
    pub fn field(&self, property: &str) -> Option<Value> {
        match property {
            "name" => Some(Value::String(self.name.clone())),
            "inputID" => Some(Value::String(self.input_id.clone())),
            "outputID" => self.output_id.clone().map(Value::String),
            "manufacturer" => Some(Value::String(self.manufacturer.clone())),
            _ => None,
        }
    }
}

/// Record stored in a device slot.
///
/// Starts out as an empty placeholder declared by the caller and is filled
/// with port data during reconciliation. Custom properties written through
/// the accessor live next to the port fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "inputID", default, skip_serializing_if = "Option::is_none")]
    pub input_id: Option<String>,
    #[serde(rename = "outputID", default, skip_serializing_if = "Option::is_none")]
    pub output_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl PortRecord {
    /// True when neither a port field nor a custom property is set
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.input_id.is_none()
            && self.output_id.is_none()
            && self.manufacturer.is_none()
            && self.properties.is_empty()
    }

    /// Copy the four port fields, keeping custom properties
    pub fn fill(&mut self, port: &Port) {
        self.name = Some(port.name.clone());
        self.input_id = Some(port.input_id.clone());
        self.output_id = port.output_id.clone();
        self.manufacturer = Some(port.manufacturer.clone());
    }

    pub fn get(&self, property: &str) -> Option<Value> {
        let field = match property {
            "name" => &self.name,
            "inputID" => &self.input_id,
            "outputID" => &self.output_id,
            "manufacturer" => &self.manufacturer,
            _ => return self.properties.get(property).cloned(),
        };
        field.clone().map(Value::String)
    }

    /// Write a property. Port fields hold strings: `null` clears them and
    /// any other non-string value is stored in its JSON text form.
    pub fn set(&mut self, property: &str, value: Value) {
        let field = match property {
            "name" => &mut self.name,
            "inputID" => &mut self.input_id,
            "outputID" => &mut self.output_id,
            "manufacturer" => &mut self.manufacturer,
            _ => {
                self.properties.insert(property.to_string(), value);
                return;
            }
        };
        *field = match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        };
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl From<&Port> for PortRecord {
    fn from(port: &Port) -> Self {
        let mut record = PortRecord::default();
        record.fill(port);
        record
    }
}

/// A reconciled logical device: its slots plus device-level properties
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Device {
    #[serde(flatten)]
    pub slots: BTreeMap<String, PortRecord>,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl Device {
    pub fn from_slots(slots: DeviceSpec) -> Self {
        Self {
            slots,
            properties: Map::new(),
        }
    }

    /// Device-level property, falling back to a slot of the same name
    pub fn get(&self, property: &str) -> Option<Value> {
        self.properties
            .get(property)
            .cloned()
            .or_else(|| self.slots.get(property).map(PortRecord::to_value))
    }

    /// Write a device-level property, replacing any slot of the same name
    pub fn set(&mut self, property: &str, value: Value) {
        self.slots.remove(property);
        self.properties.insert(property.to_string(), value);
    }
}

/// Normalized port name -> port
pub type PortMap = BTreeMap<String, Port>;

/// Slot name -> placeholder record for one declared device
pub type DeviceSpec = BTreeMap<String, PortRecord>;

/// Caller declaration: device name -> slots it wants filled
pub type SourceSpec = BTreeMap<String, DeviceSpec>;

/// Device name -> reconciled device
pub type DeviceRegistry = BTreeMap<String, Device>;

/// Slot names that stayed empty for at least one declared device
pub type NotFoundSet = BTreeSet<String>;
