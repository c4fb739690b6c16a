// Command handlers
pub mod browse; // Interactive session
pub mod config; // Configuration management
pub mod query; // One-shot list, show and tags

pub use browse::handle_browse_command;
pub use config::handle_config_command;
pub use query::{handle_list_command, handle_show_command, handle_tags_command};
