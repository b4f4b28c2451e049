use crate::error::{ConvError, Result};
use crate::settings::{load_settings_from, save_settings_to, settings_path, Settings};

pub fn run(init: bool) -> Result<()> {
    let path = settings_path();

    if init {
        if path.exists() {
            println!("Settings file already exists: {}", path.display());
        } else {
            save_settings_to(&path, &Settings::default())?;
            println!("Wrote default settings to {}", path.display());
        }
    }

    let settings = load_settings_from(&path);
    let json = serde_json::to_string_pretty(&settings).map_err(|e| ConvError::Settings(e.to_string()))?;
    println!("Settings file: {}{}", path.display(), if path.exists() { "" } else { " (not found, using defaults)" });
    println!("{json}");
    Ok(())
}
