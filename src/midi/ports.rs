use super::normalize::normalize;
use super::traits::MidiAccess;
use super::types::{Port, PortMap};

/// Build the port map from the provider's inputs and outputs.
///
/// Entries originate from the input pass; an output only fills in the
/// `outputID` of an input with the same normalized name.
pub fn enumerate_ports(access: &dyn MidiAccess) -> PortMap {
    let mut ports = PortMap::new();

    for endpoint in access.inputs().endpoints() {
        ports.insert(
            normalize(&endpoint.name),
            Port {
                name: endpoint.name.clone(),
                input_id: normalize(&endpoint.id),
                output_id: None,
                manufacturer: normalize(&endpoint.manufacturer),
            },
        );
    }

    for endpoint in access.outputs().endpoints() {
        match ports.get_mut(&normalize(&endpoint.name)) {
            Some(port) => port.output_id = Some(normalize(&endpoint.id)),
            None => log::debug!("output '{}' has no matching input, skipped", endpoint.name),
        }
    }

    ports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::midi::mock::SnapshotAccess;
    use crate::midi::types::Endpoint;

    #[test]
    fn test_pairs_input_and_output_by_name() {
        let access = SnapshotAccess::new(
            vec![Endpoint::new("In 1", "K-Board", "Acme, Inc")],
            vec![Endpoint::new("Out 1", "k-board", "Acme, Inc")],
        );

        let ports = enumerate_ports(&access);
        let port = &ports["k-board"];
        assert_eq!(port.name, "K-Board");
        assert_eq!(port.input_id, "in-1");
        assert_eq!(port.output_id.as_deref(), Some("out-1"));
        assert_eq!(port.manufacturer, "acme-inc");
    }

    #[test]
    fn test_later_input_overwrites_earlier() {
        let access = SnapshotAccess::new(
            vec![
                Endpoint::new("a", "Pad", "first"),
                Endpoint::new("b", "PAD", "second"),
            ],
            vec![],
        );

        let ports = enumerate_ports(&access);
        assert_eq!(ports.len(), 1);
        assert_eq!(ports["pad"].input_id, "b");
        assert_eq!(ports["pad"].name, "PAD");
    }
}
