// Configuration operations

use crate::cli::{ConfigCommands, Context};
use crate::config::Config;
use crate::core::operations::ContactOperations;
use crate::utils::error::{AppResult, FlowResult, handle_flow};
use crate::utils::interactive::prompt_yes_no;
use crate::utils::output::OutputStyle;
use std::path::Path;

pub fn handle_config_command(ctx: Context, command: Option<ConfigCommands>) -> AppResult<()> {
    match command {
        Some(ConfigCommands::Show) => handle_show_command(ctx),
        Some(ConfigCommands::Reset) => handle_reset_command(&ctx.config_path),
        Some(ConfigCommands::Path) => {
            println!("{}", ctx.config_path.display());
            Ok(())
        }
        None => handle_config_help(&ctx.config_path),
    }
}

fn handle_show_command(ctx: Context) -> AppResult<()> {
    let general = &ctx.config.general;

    println!("{}", OutputStyle::title("⚙️  contactdeck Configuration"));
    println!("{}", OutputStyle::header_separator());
    println!("File: {}", OutputStyle::muted(&ctx.config_path.display().to_string()));
    println!("General:");
    OutputStyle::print_field_colored("Page size", &general.page_size.to_string(), OutputStyle::info);
    OutputStyle::print_field_colored("Sort by", general.sort_by.as_str(), OutputStyle::info);
    OutputStyle::print_field_colored("Sort order", &format!("{:?}", general.sort_order).to_lowercase(), OutputStyle::info);
    OutputStyle::print_field_colored("View", &format!("{:?}", general.view).to_lowercase(), OutputStyle::info);
    OutputStyle::print_field_colored("Color", &general.color.to_string(), OutputStyle::info);
    OutputStyle::print_field_colored("Dark mode", &general.dark_mode.to_string(), OutputStyle::info);

    let source = ContactOperations::new(ctx.config.clone())
        .with_data_file(ctx.data_file)
        .source()
        .describe();
    OutputStyle::print_field_colored("Dataset", &source, OutputStyle::info);

    Ok(())
}

fn handle_config_help(config_path: &Path) -> AppResult<()> {
    println!("{}", OutputStyle::title("⚙️  Configuration Management"));
    println!("{}", OutputStyle::header_separator());
    println!("Available configuration commands:");
    println!("  contactdeck config show    - Show current configuration");
    println!("  contactdeck config reset   - Reset configuration to defaults");
    println!("  contactdeck config path    - Print the configuration file location");
    println!();
    println!("Configuration file location: {}", config_path.display());
    Ok(())
}

fn handle_reset_command(config_path: &Path) -> AppResult<()> {
    if prompt_yes_no(
        "Are you sure you want to reset configuration to defaults? This will overwrite your current settings.",
    )? {
        Config::default().save_to(config_path)?;
        tracing::info!(path = %config_path.display(), "config reset");
        handle_flow(FlowResult::Success("Configuration reset to defaults!".to_string()));
    } else {
        handle_flow(FlowResult::Cancelled("Reset cancelled.".to_string()));
    }
    Ok(())
}
