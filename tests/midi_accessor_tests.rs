use midi_ports::midi::mock::SnapshotAccess;
use midi_ports::midi::{
    Accessor, Endpoint, EndpointCollection, LookupError, MidiAccess, Property, Response, SourceSpec,
};
use serde_json::json;

fn access() -> Box<SnapshotAccess> {
    Box::new(SnapshotAccess::new(
        vec![
            Endpoint::new("in1", "K-Board", "Acme"),
            Endpoint::new("in2", "Pads", "Acme"),
        ],
        vec![Endpoint::new("out1", "K-Board", "Acme")],
    ))
}

fn accessor(source: serde_json::Value) -> Accessor {
    let source: SourceSpec = serde_json::from_value(source).unwrap();
    Accessor::build(access(), source)
}

#[test]
fn test_reserved_views() {
    let mut accessor = accessor(json!({ "rig": { "k-board": {} } }));

    match accessor.call("devices") {
        Response::Devices(devices) => assert!(devices.contains_key("rig")),
        _ => panic!("expected devices view"),
    }
    match accessor.call("ports") {
        Response::Ports(ports) => assert_eq!(ports.len(), 2),
        _ => panic!("expected ports view"),
    }
    match accessor.call("access") {
        Response::Access(access) => assert_eq!(access.inputs().len(), 2),
        _ => panic!("expected access handle"),
    }
    match accessor.call("notfound") {
        Response::NotFound(missing) => assert!(missing.is_none()),
        _ => panic!("expected notfound"),
    }
    assert!(matches!(accessor.call("rig"), Response::Handle(_)));
    assert!(matches!(accessor.call("midi"), Response::Handle(_)));
}

#[test]
fn test_notfound_returns_exact_set() {
    let mut accessor = accessor(json!({ "rig": { "main": {}, "aux": {} } }));

    match accessor.call("notfound") {
        Response::NotFound(Some(missing)) => {
            assert_eq!(missing.iter().collect::<Vec<_>>(), vec!["aux", "main"])
        }
        _ => panic!("expected a not-found set"),
    }
}

#[test]
fn test_midi_passes_through_provider_members() {
    let mut accessor = Accessor::new(access());
    let handle = accessor.default_handle();

    let inputs = handle.get("inputs").unwrap().unwrap();
    assert_eq!(inputs.as_collection().unwrap().len(), 2);

    let outputs = handle.get("outputs").unwrap().unwrap();
    assert_eq!(outputs.as_collection().unwrap().len(), 1);

    let sysex = handle.get("sysexEnabled").unwrap().unwrap();
    assert_eq!(sysex.as_value(), Some(&json!(false)));

    // Not a provider member and no device named "midi"
    assert_eq!(
        handle.get("name").unwrap_err(),
        LookupError::NotFound { key: "midi".to_string() }
    );
}

#[test]
fn test_device_port_get_and_set() {
    let mut accessor = accessor(json!({ "rig": { "k-board": {} } }));

    let mut handle = accessor.handle("rig:k-board");
    assert_eq!(handle.get("name").unwrap().unwrap().as_str(), Some("K-Board"));

    let input = handle.get("input").unwrap().unwrap();
    assert_eq!(input.as_endpoint().unwrap().id, "in1");
    let output = handle.get("output").unwrap().unwrap();
    assert_eq!(output.as_endpoint().unwrap().id, "out1");

    handle.set("quality", "great!");
    assert_eq!(
        handle.get("quality").unwrap().unwrap().as_value(),
        Some(&json!("great!"))
    );

    // A fresh handle sees the mutation in the shared registry
    let handle = accessor.handle("rig:k-board");
    assert_eq!(handle.get("quality").unwrap().unwrap().as_str(), Some("great!"));
}

#[test]
fn test_set_chains() {
    let mut accessor = Accessor::new(access());

    accessor
        .handle("pads")
        .set("color", "red")
        .set("velocity", 100)
        .set("name", "Drum Pads");

    let record = &accessor.devices()["pads"].slots["pads"];
    assert_eq!(record.get("color"), Some(json!("red")));
    assert_eq!(record.get("velocity"), Some(json!(100)));
    assert_eq!(record.name.as_deref(), Some("Drum Pads"));
    // The port map keeps the provider's name
    assert_eq!(accessor.ports()["pads"].name, "Pads");
}

#[test]
fn test_device_level_properties() {
    let mut accessor = accessor(json!({ "rig": { "k-board": {} } }));

    let mut handle = accessor.handle("rig");
    handle.set("color", "blue");
    assert_eq!(handle.get("color").unwrap().unwrap().as_str(), Some("blue"));

    // A slot read through the device comes back as its JSON record
    let slot = handle.get("k-board").unwrap().unwrap();
    assert_eq!(
        slot.as_value(),
        Some(&json!({
            "name": "K-Board",
            "inputID": "in1",
            "outputID": "out1",
            "manufacturer": "acme"
        }))
    );

    assert!(accessor.devices()["rig"].properties.contains_key("color"));
}

#[test]
fn test_bare_name_falls_back_to_ports() {
    let mut accessor = accessor(json!({ "rig": { "main": {} } }));
    assert!(accessor.devices().is_empty());

    let mut handle = accessor.handle("k-board");
    assert_eq!(handle.get("manufacturer").unwrap().unwrap().as_str(), Some("acme"));
    let input = handle.get("input").unwrap().unwrap();
    assert_eq!(input.as_endpoint().unwrap().name, "K-Board");

    // Ports are read-only through handles
    assert_eq!(
        handle.try_set("quality", "great!").err(),
        Some(LookupError::NotFound { key: "k-board".to_string() })
    );
    assert!(accessor.devices().is_empty());
}

#[test]
fn test_unresolved_keys() {
    let mut accessor = accessor(json!({ "rig": { "k-board": {} } }));

    let mut handle = accessor.handle("ghost");
    assert_eq!(
        handle.get("name").unwrap_err(),
        LookupError::NotFound { key: "ghost".to_string() }
    );
    // set on an unknown key is a no-op that still chains
    handle.set("a", 1).set("b", 2);

    let handle = accessor.handle("rig:missing");
    assert!(handle.get("name").is_err());
    let handle = accessor.handle("nobody:k-board");
    assert!(handle.get("name").is_err());

    assert_eq!(accessor.devices().len(), 1);
    assert!(accessor.devices()["rig"].properties.is_empty());
}

#[test]
fn test_missing_properties_are_none() {
    let mut accessor = Accessor::new(access());
    let handle = accessor.handle("pads");

    assert!(handle.get("").unwrap().is_none());
    assert!(handle.get("quality").unwrap().is_none());
    // Pads has no output side
    assert!(handle.get("output").unwrap().is_none());
    assert!(matches!(handle.get("input").unwrap(), Some(Property::Endpoint(_))));
}

#[test]
fn test_device_property_replaces_same_named_slot() {
    let mut accessor = accessor(json!({ "rig": { "k-board": {} } }));

    accessor.handle("rig").set("k-board", "shadow");

    let rig = &accessor.devices()["rig"];
    assert!(!rig.slots.contains_key("k-board"));
    assert_eq!(
        serde_json::to_value(accessor.devices()).unwrap(),
        json!({ "rig": { "k-board": "shadow" } })
    );

    let handle = accessor.handle("rig");
    assert_eq!(handle.get("k-board").unwrap().unwrap().as_str(), Some("shadow"));
    assert!(accessor.handle("rig:k-board").get("name").is_err());
}
