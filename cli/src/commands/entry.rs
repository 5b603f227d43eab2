use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use tiny_client::{AuthScope, Client};

use crate::{config::OutputFormat, interactive, output};

#[derive(Subcommand, Clone, Debug)]
pub enum EntryCommand {
    /// List all tiny url entries
    List,
    /// Show a single entry
    Get {
        #[arg(short, long)]
        interactive: bool,

        #[arg(required_unless_present = "interactive")]
        id: Option<String>,
    },
    /// Create an entry; without --id the server assigns one
    Create {
        #[arg(short, long)]
        interactive: bool,

        #[arg(long)]
        id: Option<String>,

        #[arg(required_unless_present = "interactive")]
        url: Option<String>,
    },
    /// Point an existing entry at a new url
    Update {
        #[arg(short, long)]
        interactive: bool,

        #[arg(required_unless_present = "interactive")]
        id: Option<String>,

        #[arg(required_unless_present = "interactive")]
        url: Option<String>,
    },
    /// Delete an entry
    Delete {
        #[arg(short, long)]
        interactive: bool,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        #[arg(required_unless_present = "interactive")]
        id: Option<String>,
    },
}

impl EntryCommand {
    /// Token the command authenticates with.
    pub fn scope(&self) -> AuthScope {
        match self {
            EntryCommand::List | EntryCommand::Get { .. } => AuthScope::Read,
            EntryCommand::Create { .. }
            | EntryCommand::Update { .. }
            | EntryCommand::Delete { .. } => AuthScope::Write,
        }
    }

    pub async fn execute(self, client: &Client, output_format: &OutputFormat) -> Result<()> {
        match self {
            EntryCommand::List => {
                let entries = client
                    .list_entries()
                    .await
                    .context("Fail list entries")?;
                output::print_entries(entries, output_format)?;
            }
            EntryCommand::Get { interactive, id } => {
                let id = resolve_id(interactive, id)?;
                let entry = client
                    .get_entry(&id)
                    .await
                    .with_context(|| format!("Fail get entry {}", id))?;
                output::print_entry(entry, None, output_format)?;
            }
            EntryCommand::Create {
                interactive,
                id,
                url,
            } => {
                let (id, url) = if interactive {
                    interactive::prompt_create_entry()?
                } else {
                    let url = url.context("Must provide url to create entry")?;
                    (id.unwrap_or_default(), url)
                };

                let created = client
                    .create_entry(&id, &url)
                    .await
                    .context("Fail create entry")?;
                output::print_entry(
                    created,
                    Some("Entry created successfully!"),
                    output_format,
                )?;
            }
            EntryCommand::Update {
                interactive,
                id,
                url,
            } => {
                let (id, url) = if interactive {
                    interactive::prompt_update_entry()?
                } else {
                    (
                        id.context("Must provide entry id to update entry")?,
                        url.context("Must provide url to update entry")?,
                    )
                };

                let updated = client
                    .update_entry(&id, &url)
                    .await
                    .with_context(|| format!("Fail update entry {}", id))?;
                output::print_entry(
                    updated,
                    Some("Entry updated successfully!"),
                    output_format,
                )?;
            }
            EntryCommand::Delete {
                interactive,
                yes,
                id,
            } => {
                let id = resolve_id(interactive, id)?;
                if !yes && !interactive::confirm_delete(&id)? {
                    println!("{}", "Delete cancelled".yellow());
                    return Ok(());
                }

                client
                    .delete_entry(&id)
                    .await
                    .with_context(|| format!("Fail delete entry {}", id))?;
                output::print_deleted(&id, output_format)?;
            }
        }
        Ok(())
    }
}

fn resolve_id(interactive: bool, id: Option<String>) -> Result<String> {
    if interactive {
        return interactive::prompt_entry_id();
    }
    id.context("Must provide entry id")
}
