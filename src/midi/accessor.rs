use std::fmt;

use serde_json::Value;
use thiserror::Error;

use super::ports::enumerate_ports;
use super::registry::{reconcile, Reconciliation};
use super::traits::{EndpointCollection, MidiAccess};
use super::types::{
    Device, DeviceRegistry, Direction, Endpoint, NotFoundSet, Port, PortMap, PortRecord, SourceSpec,
};

/// Key used when the caller does not name one
pub const DEFAULT_KEY: &str = "midi";

/// Errors returned by handle lookups
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("port {key} not found")]
    NotFound { key: String },
}

impl LookupError {
    fn not_found(key: &str) -> Self {
        LookupError::NotFound {
            key: key.to_string(),
        }
    }
}

/// A parsed accessor key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// The raw provider handle
    Access,
    /// Provider pass-through, falling back to a device named `midi`
    Midi,
    Devices,
    Ports,
    NotFound,
    /// `device:slot` addressing
    DevicePort { device: String, slot: String },
    /// Bare device or port name
    Name(String),
}

impl Request {
    pub fn parse(key: &str) -> Self {
        match key {
            "access" => Request::Access,
            "midi" => Request::Midi,
            "devices" => Request::Devices,
            "ports" => Request::Ports,
            "notfound" => Request::NotFound,
            _ if key.contains(':') => {
                let mut parts = key.split(':');
                Request::DevicePort {
                    device: parts.next().unwrap_or_default().to_string(),
                    slot: parts.next().unwrap_or_default().to_string(),
                }
            }
            _ => Request::Name(key.to_string()),
        }
    }
}

/// Result of [`Accessor::call`]
pub enum Response<'a> {
    Access(&'a dyn MidiAccess),
    Devices(&'a DeviceRegistry),
    Ports(&'a PortMap),
    /// `None` when every declared slot was matched
    NotFound(Option<&'a NotFoundSet>),
    Handle(Handle<'a>),
}

/// Value produced by [`Handle::get`]
pub enum Property<'a> {
    /// A field on a registry or port record
    Value(Value),
    /// Live endpoint owned by the provider
    Endpoint(&'a Endpoint),
    /// One of the provider's endpoint collections
    Collection(&'a dyn EndpointCollection),
}

impl<'a> Property<'a> {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Property::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    pub fn as_endpoint(&self) -> Option<&'a Endpoint> {
        match self {
            Property::Endpoint(endpoint) => Some(*endpoint),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&'a dyn EndpointCollection> {
        match self {
            Property::Collection(collection) => Some(*collection),
            _ => None,
        }
    }
}

impl fmt::Debug for Property<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Property::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Property::Endpoint(endpoint) => f.debug_tuple("Endpoint").field(endpoint).finish(),
            Property::Collection(collection) => f
                .debug_tuple("Collection")
                .field(&collection.endpoints())
                .finish(),
        }
    }
}

/// Addressing context a handle closes over
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Provider,
    Slot { device: String, slot: String },
    Name(String),
}

/// Record a target resolved to
enum Resolved<'r> {
    Record(&'r PortRecord),
    Device(&'r Device),
    Port(&'r Port),
}

/// Reconciled MIDI state plus keyed access to it
pub struct Accessor {
    access: Box<dyn MidiAccess>,
    ports: PortMap,
    devices: DeviceRegistry,
    not_found: NotFoundSet,
}

impl Accessor {
    /// Expose every enumerated port as its own device
    pub fn new(access: Box<dyn MidiAccess>) -> Self {
        Self::build(access, SourceSpec::new())
    }

    /// Enumerate the provider's ports and reconcile `source` against them
    pub fn build(access: Box<dyn MidiAccess>, source: SourceSpec) -> Self {
        let ports = enumerate_ports(access.as_ref());
        let Reconciliation {
            registry,
            not_found,
        } = reconcile(&ports, source);

        log::info!(
            "{} ports, {} devices, {} slots not found",
            ports.len(),
            registry.len(),
            not_found.len()
        );

        Self {
            access,
            ports,
            devices: registry,
            not_found,
        }
    }

    pub fn access(&self) -> &dyn MidiAccess {
        self.access.as_ref()
    }

    pub fn ports(&self) -> &PortMap {
        &self.ports
    }

    pub fn devices(&self) -> &DeviceRegistry {
        &self.devices
    }

    pub fn not_found(&self) -> Option<&NotFoundSet> {
        if self.not_found.is_empty() {
            None
        } else {
            Some(&self.not_found)
        }
    }

    /// Dispatch a key: reserved words yield views, anything else a handle
    pub fn call(&mut self, key: &str) -> Response<'_> {
        match Request::parse(key) {
            Request::Access => Response::Access(self.access.as_ref()),
            Request::Devices => Response::Devices(&self.devices),
            Request::Ports => Response::Ports(&self.ports),
            Request::NotFound => Response::NotFound(self.not_found()),
            request => Response::Handle(self.handle_for(key, request)),
        }
    }

    /// Get/set handle for `key`, reserved view words are treated as names
    pub fn handle(&mut self, key: &str) -> Handle<'_> {
        let request = Request::parse(key);
        self.handle_for(key, request)
    }

    pub fn default_handle(&mut self) -> Handle<'_> {
        self.handle(DEFAULT_KEY)
    }

    fn handle_for(&mut self, key: &str, request: Request) -> Handle<'_> {
        let target = match request {
            Request::Midi => Target::Provider,
            Request::DevicePort { device, slot } => Target::Slot { device, slot },
            Request::Name(name) => Target::Name(name),
            Request::Access | Request::Devices | Request::Ports | Request::NotFound => {
                Target::Name(key.to_string())
            }
        };

        Handle {
            key: key.to_string(),
            target,
            access: self.access.as_ref(),
            ports: &self.ports,
            devices: &mut self.devices,
        }
    }
}

/// Get/set interface for one key
pub struct Handle<'a> {
    key: String,
    target: Target,
    access: &'a dyn MidiAccess,
    ports: &'a PortMap,
    devices: &'a mut DeviceRegistry,
}

impl<'a> Handle<'a> {
    /// Read `property` from the record the key resolves to.
    ///
    /// I/O properties (`input`, `output`) return the live endpoint whose id
    /// is stored under `<property>ID`. A resolved record lacking the
    /// property yields `Ok(None)`, an unresolvable key an error.
    pub fn get(&self, property: &str) -> Result<Option<Property<'a>>, LookupError> {
        if property.is_empty() {
            return Ok(None);
        }

        if self.target == Target::Provider {
            if let Some(member) = self.provider_member(property) {
                return Ok(Some(member));
            }
        }

        let direction = Direction::classify(property);
        let lookup_key = match direction {
            Some(_) => format!("{}ID", property),
            None => property.to_string(),
        };

        let value = match self.resolve()? {
            Resolved::Record(record) => record.get(&lookup_key),
            Resolved::Device(device) => device.get(&lookup_key),
            Resolved::Port(port) => port.field(&lookup_key),
        };

        Ok(match direction {
            Some(direction) => value.and_then(|id| self.endpoint(direction, &id)),
            None => value.map(Property::Value),
        })
    }

    /// Write `property` onto the resolved registry record and return the
    /// handle for chaining. Unresolvable keys are logged and ignored.
    pub fn set(&mut self, property: &str, value: impl Into<Value>) -> &mut Self {
        if let Err(err) = self.write(property, value.into()) {
            log::warn!("{}", err);
        }
        self
    }

    /// Like [`Handle::set`], reporting unresolvable keys to the caller
    pub fn try_set(
        &mut self,
        property: &str,
        value: impl Into<Value>,
    ) -> Result<&mut Self, LookupError> {
        self.write(property, value.into())?;
        Ok(self)
    }

    fn write(&mut self, property: &str, value: Value) -> Result<(), LookupError> {
        let name = match &self.target {
            Target::Slot { device, slot } => {
                let record = self
                    .devices
                    .get_mut(device)
                    .and_then(|device| device.slots.get_mut(slot))
                    .ok_or_else(|| LookupError::not_found(&self.key))?;
                record.set(property, value);
                return Ok(());
            }
            Target::Name(name) => name.as_str(),
            Target::Provider => self.key.as_str(),
        };

        let device = self
            .devices
            .get_mut(name)
            .ok_or_else(|| LookupError::not_found(&self.key))?;
        match device.slots.get_mut(name) {
            Some(nested) => nested.set(property, value),
            None => device.set(property, value),
        }
        Ok(())
    }

    /// Bare name a provider or name target falls back to
    fn name(&self) -> &str {
        match &self.target {
            Target::Name(name) => name,
            _ => &self.key,
        }
    }

    fn resolve(&self) -> Result<Resolved<'_>, LookupError> {
        let resolved = match &self.target {
            Target::Slot { device, slot } => self
                .devices
                .get(device)
                .and_then(|device| device.slots.get(slot))
                .map(Resolved::Record),
            Target::Provider | Target::Name(_) => {
                let name = self.name();
                match self.devices.get(name) {
                    Some(device) => Some(match device.slots.get(name) {
                        Some(nested) => Resolved::Record(nested),
                        None => Resolved::Device(device),
                    }),
                    None => self.ports.get(name).map(Resolved::Port),
                }
            }
        };

        resolved.ok_or_else(|| LookupError::not_found(&self.key))
    }

    fn provider_member(&self, property: &str) -> Option<Property<'a>> {
        let access = self.access;
        match property {
            "inputs" => Some(Property::Collection(access.inputs())),
            "outputs" => Some(Property::Collection(access.outputs())),
            "sysexEnabled" => Some(Property::Value(Value::Bool(access.sysex_enabled()))),
            _ => None,
        }
    }

    fn endpoint(&self, direction: Direction, id: &Value) -> Option<Property<'a>> {
        let access = self.access;
        let id = id.as_str()?;
        let endpoint = access.collection(direction).lookup(id);
        if endpoint.is_none() {
            log::debug!(
                "{} has no endpoint '{}' for {}",
                direction.collection_name(),
                id,
                self.key
            );
        }
        endpoint.map(Property::Endpoint)
    }
}
