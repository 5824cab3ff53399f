use log::LevelFilter;

use crate::config::LogSettings;

const TARGET: &str = env!("CARGO_PKG_NAME");

/// Route this crate's records to the configured log file.
///
/// The terminal is owned by the UI, so nothing is ever written to stdout or
/// stderr; without a file the logger stays uninstalled and records are dropped.
pub fn init_logger(settings: &LogSettings) -> Result<(), fern::InitError> {
    let Some(path) = settings.file.as_deref() else {
        return Ok(());
    };

    fern::Dispatch::new()
        .level(LevelFilter::Off)
        .level_for(TARGET, settings.level.into())
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{:<5} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .chain(fern::log_file(path)?)
        .apply()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_file_means_no_logger() {
        assert!(init_logger(&LogSettings::default()).is_ok());
    }
}
