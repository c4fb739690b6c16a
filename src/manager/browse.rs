// Interactive browse session

use crate::cli::Context;
use crate::config::Config;
use crate::core::operations::ContactOperations;
use crate::core::state::{AppState, Effect};
use crate::ui;
use crate::utils::error::AppResult;
use std::path::Path;

pub fn handle_browse_command(ctx: Context) -> AppResult<()> {
    let Context {
        config,
        config_path,
        data_file,
    } = ctx;

    let manager = ContactOperations::new(config.clone()).with_data_file(data_file);
    let collection = manager.load_collection()?;
    let state = AppState::new(
        collection,
        manager.default_query(),
        config.general.view,
        config.general.dark_mode,
    );

    let mut config = config;
    let final_state = ui::run_session(state, |effect| apply_effect(&mut config, &config_path, effect))?;
    tracing::info!(contacts = final_state.contacts.len(), "browse session closed");

    Ok(())
}

/// Persist what the session asks to keep; a failed save is logged, not fatal
fn apply_effect(config: &mut Config, config_path: &Path, effect: Effect) {
    match effect {
        Effect::SaveTheme { dark_mode } => {
            config.general.dark_mode = dark_mode;
            match config.save_to(config_path) {
                Ok(()) => tracing::debug!(dark_mode, "theme preference saved"),
                Err(e) => tracing::warn!(error = %e, "could not save theme preference"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_effect_is_written_to_the_config_file() {
        let dir = std::env::temp_dir().join(format!("contactdeck-browse-{}", uuid::Uuid::new_v4().simple()));
        let path = dir.join("config.toml");
        let mut config = Config::default();

        apply_effect(&mut config, &path, Effect::SaveTheme { dark_mode: true });

        assert!(config.general.dark_mode);
        assert!(Config::load_custom(&path).unwrap().general.dark_mode);
        let _ = std::fs::remove_dir_all(dir);
    }
}
