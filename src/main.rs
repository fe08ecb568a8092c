use std::path::PathBuf;

use anyhow::Context;
use midi_ports::midi::mock::SnapshotDriver;
use midi_ports::{logging, midi_ports, MidiConfig, Property};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let config_path = PathBuf::from(args.next().unwrap_or_else(|| "midi.json".to_string()));

    MidiConfig::ensure_config_file(&config_path).await?;
    let config = MidiConfig::load(&config_path).await?;
    logging::init_logging(&config.log_level)?;

    let snapshot = config
        .snapshot
        .clone()
        .context("Config has no \"snapshot\" entry to read ports from")?;
    let driver = SnapshotDriver::from_file(snapshot);
    let mut accessor = midi_ports(&driver, config.source).await?;

    println!("Ports:");
    println!("{}", serde_json::to_string_pretty(accessor.ports())?);
    println!("Devices:");
    println!("{}", serde_json::to_string_pretty(accessor.devices())?);
    match accessor.not_found() {
        Some(missing) => println!("Not found: {:?}", missing),
        None => println!("All declared ports found"),
    }

    // Remaining arguments are `<key> <property>` queries
    while let (Some(key), Some(property)) = (args.next(), args.next()) {
        let handle = accessor.handle(&key);
        match handle.get(&property) {
            Ok(Some(Property::Value(value))) => println!("{} {} = {}", key, property, value),
            Ok(Some(Property::Endpoint(endpoint))) => {
                println!("{} {} = {} ({})", key, property, endpoint.name, endpoint.id)
            }
            Ok(Some(Property::Collection(collection))) => {
                println!("{} {} = {} endpoints", key, property, collection.len())
            }
            Ok(None) => println!("{} {} is not set", key, property),
            Err(err) => log::warn!("{}", err),
        }
    }

    Ok(())
}
