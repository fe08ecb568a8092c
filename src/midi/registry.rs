use super::types::{Device, DeviceRegistry, DeviceSpec, NotFoundSet, PortMap, PortRecord, SourceSpec};

/// Outcome of matching a source declaration against the port map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    pub registry: DeviceRegistry,
    pub not_found: NotFoundSet,
}

/// Declaration that registers every port as a device with one slot named
/// after itself.
///
/// The `devices` view therefore nests each port under its own name,
/// `{"k-board": {"k-board": {"name": ..., "inputID": ...}}}`, rather than
/// mirroring the flat port map.
pub fn self_named(ports: &PortMap) -> SourceSpec {
    ports
        .iter()
        .map(|(name, port)| {
            let mut slots = DeviceSpec::new();
            slots.insert(name.clone(), PortRecord::from(port));
            (name.clone(), slots)
        })
        .collect()
}

/// Reconcile a source declaration, taking the declared devices from its keys
pub fn reconcile(ports: &PortMap, source: SourceSpec) -> Reconciliation {
    let declared: Vec<String> = source.keys().cloned().collect();
    build_registry(&declared, ports, source)
}

/// Fill declared slots with port data, collect the slots that stayed empty
/// and prune every device that carries one of them.
///
/// An empty `source` stands for "expose every port", in which case the
/// declared names are replaced by the port names.
pub fn build_registry(declared: &[String], ports: &PortMap, source: SourceSpec) -> Reconciliation {
    let (source, declared) = if source.is_empty() {
        let source = self_named(ports);
        let declared = source.keys().cloned().collect();
        (source, declared)
    } else {
        (source, declared.to_vec())
    };

    let mut registry: DeviceRegistry = source
        .into_iter()
        .map(|(name, slots)| (name, Device::from_slots(slots)))
        .collect();

    let mut not_found = NotFoundSet::new();

    for device_name in &declared {
        let Some(device) = registry.get_mut(device_name) else {
            continue;
        };

        for (port_name, port) in ports {
            if let Some(slot) = device.slots.get_mut(port_name) {
                slot.fill(port);
            }
        }

        for (slot_name, slot) in &device.slots {
            if slot.is_empty() {
                not_found.insert(slot_name.clone());
            }
        }
    }

    // A single unmatched slot name drops every device declaring it, not
    // just the slot.
    if !not_found.is_empty() {
        registry.retain(|name, device| {
            let keep = !device.slots.keys().any(|slot| not_found.contains(slot));
            if !keep {
                log::warn!("device '{}' dropped: declared port not found", name);
            }
            keep
        });
    }

    Reconciliation { registry, not_found }
}
