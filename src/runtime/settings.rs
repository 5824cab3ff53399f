use crate::catalog::Catalog;
use crate::config;

pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("tandem: invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("tandem: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}

/// The configured catalog, or the built-in one if it does not hold up.
pub fn load_catalog(settings: &config::Settings) -> Catalog {
    settings.build_catalog().unwrap_or_else(|msg| {
        log::warn!("{msg}; using the built-in catalog");
        Catalog::default()
    })
}
