//! `folio suggestions` command.

use anyhow::Result;
use console::style;

use folio_core::prompt::suggestions::suggestions;
use folio_types::chat::Language;

pub fn print_suggestions(lang: Option<&str>, json: bool) -> Result<()> {
    let language = Language::from_code(lang);
    let list = suggestions(language);

    if json {
        let out = serde_json::json!({
            "language": language.code(),
            "suggestions": list,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Suggestions ({})",
        style("💬").bold(),
        style(language.code()).cyan()
    );
    println!();
    for item in list {
        println!("  {} {item}", style("•").dim());
    }
    println!();
    Ok(())
}
