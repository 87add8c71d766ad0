//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// linkvault - URL shortener service
#[derive(Parser, Debug)]
#[command(name = "linkvault")]
#[command(version)]
#[command(about = "URL shortener service with atomic click counting", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: stdout)
        output_path: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_means_serve() {
        let cli = Cli::try_parse_from(["linkvault"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_config_flag_is_global() {
        let cli = Cli::try_parse_from(["linkvault", "serve", "-c", "custom.toml"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Serve));
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
    }

    #[test]
    fn test_config_generate() {
        let cli = Cli::try_parse_from(["linkvault", "config", "generate", "out.toml"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Config {
                action: ConfigCommands::Generate {
                    output_path: Some("out.toml".into())
                }
            })
        );
    }
}
