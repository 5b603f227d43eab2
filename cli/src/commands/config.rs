use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use crate::config::{
    config_path, load_config, mask_token, parse_timeout, save_config, token_value, OutputFormat,
};

#[derive(Subcommand, Clone, Debug)]
pub enum ConfigCommand {
    Show,
    Path,
    Set {
        #[arg(value_enum)]
        key: ConfigKey,
        /// New value; an empty string clears a token
        value: String,
    },
    Get {
        #[arg(value_enum)]
        key: ConfigKey,
    },
}

#[derive(clap::ValueEnum, Clone, Debug)]
pub enum ConfigKey {
    ServerUrl,
    ReadToken,
    WriteToken,
    Timeout,
    OutputFormat,
}

impl ConfigCommand {
    pub fn execute(self) -> Result<()> {
        match self {
            ConfigCommand::Show => {
                let cfg = load_config()?;
                println!("{}", "Current configuration:".blue().bold());
                println!("  server_url: {}", cfg.server_url);
                println!("  read_token: {}", mask_token(cfg.read_token.as_deref()));
                println!("  write_token: {}", mask_token(cfg.write_token.as_deref()));
                println!("  timeout: {}", cfg.timeout);
                println!("  output_format: {:?}", cfg.output_format);
            }
            ConfigCommand::Path => {
                println!("{}", config_path()?.display());
            }
            ConfigCommand::Set { key, value } => {
                let mut cfg = load_config()?;
                match key {
                    ConfigKey::ServerUrl => {
                        cfg.server_url = value.trim_end_matches('/').to_string();
                        println!("{} server_url = {}", "Set".green(), cfg.server_url);
                    }
                    ConfigKey::ReadToken => {
                        cfg.read_token = token_value(&value);
                        println!(
                            "{} read_token = {}",
                            "Set".green(),
                            mask_token(cfg.read_token.as_deref())
                        );
                    }
                    ConfigKey::WriteToken => {
                        cfg.write_token = token_value(&value);
                        println!(
                            "{} write_token = {}",
                            "Set".green(),
                            mask_token(cfg.write_token.as_deref())
                        );
                    }
                    ConfigKey::Timeout => {
                        parse_timeout(&value)?;
                        cfg.timeout = value.clone();
                        println!("{} timeout = {}", "Set".green(), value);
                    }
                    ConfigKey::OutputFormat => {
                        cfg.output_format = OutputFormat::parse(&value)?;
                        println!("{} output_format = {}", "Set".green(), value);
                    }
                }
                save_config(&cfg)?;
            }
            ConfigCommand::Get { key } => {
                let cfg = load_config()?;
                match key {
                    ConfigKey::ServerUrl => println!("{}", cfg.server_url),
                    ConfigKey::ReadToken => println!("{}", mask_token(cfg.read_token.as_deref())),
                    ConfigKey::WriteToken => {
                        println!("{}", mask_token(cfg.write_token.as_deref()))
                    }
                    ConfigKey::Timeout => println!("{}", cfg.timeout),
                    ConfigKey::OutputFormat => println!("{:?}", cfg.output_format),
                }
            }
        }
        Ok(())
    }
}
