use anyhow::Result;
use fern::colors::{Color, ColoredLevelConfig};

pub fn parse_level(level: &str) -> log::LevelFilter {
    match level.to_ascii_lowercase().as_str() {
        "off" => log::LevelFilter::Off,
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    }
}

/// Route `log` records to stderr, `MIDI_PORTS_LOG` overrides `level`
pub fn init_logging(level: &str) -> Result<()> {
    let level = std::env::var("MIDI_PORTS_LOG").unwrap_or_else(|_| level.to_string());
    let colors = ColoredLevelConfig::new()
        .trace(Color::White)
        .debug(Color::Blue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{}] [{}] {}",
                record.target(),
                colors.color(record.level()),
                message
            ))
        })
        .level(parse_level(&level))
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}
