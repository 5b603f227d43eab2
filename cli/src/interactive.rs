use anyhow::Result;
use inquire::{Confirm, Text};

pub fn prompt_create_entry() -> Result<(String, String)> {
    let id = Text::new("Entry id (optional):")
        .with_help_message("Press Enter to let the server pick one")
        .prompt_skippable()?
        .unwrap_or_default();
    let url = Text::new("Target url:").prompt()?;
    Ok((id.trim().to_string(), url.trim().to_string()))
}

pub fn prompt_update_entry() -> Result<(String, String)> {
    let id = prompt_entry_id()?;
    let url = Text::new("New target url:").prompt()?;
    Ok((id, url.trim().to_string()))
}

pub fn prompt_entry_id() -> Result<String> {
    let id = Text::new("Entry id:").prompt()?;
    Ok(id.trim().to_string())
}

pub fn confirm_delete(id: &str) -> Result<bool> {
    let confirmed = Confirm::new(&format!("Delete entry {}?", id))
        .with_default(false)
        .prompt()?;
    Ok(confirmed)
}
