use anyhow::Result;

use snapdeck_core::AppConfig;
use snapdeck_tui::available_themes;

pub fn run(config: &AppConfig, init: bool) -> Result<()> {
    let path = AppConfig::config_path();

    if !init {
        println!("{}", path.display());
        if !path.exists() {
            println!("(not created yet, run `snapdeck config --init`)");
        }
        println!("theme: {} (available: {})", config.ui.theme.name, available_themes().join(", "));
        return Ok(());
    }

    if path.exists() {
        println!("Configuration already exists at {}", path.display());
        return Ok(());
    }

    config.save()?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
