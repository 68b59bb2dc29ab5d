//! Options command

use colored::Colorize;
use spec_db::builtin_schema;

use crate::error::Result;

/// Run the options command
pub fn run_options() -> Result<()> {
    let schema = builtin_schema()?;

    println!("{}", format!("Options of {}", schema.name()).bold());
    println!();

    for (path, option) in schema.walk() {
        let default = match option.default() {
            Some(default) => default.to_string(),
            None if option.is_required() => "required".to_string(),
            None => "-".to_string(),
        };
        let flag = option.flag_name().unwrap_or_default();

        println!(
            "  {:<40} {:<8} {:<32} {}",
            path.cyan(),
            option.kind().name(),
            default,
            flag.dimmed()
        );
        if let Some(description) = option.description() {
            println!("  {:<40} {}", "", description.dimmed());
        }
    }

    Ok(())
}
