use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::property::Property;

#[derive(Parser)]
#[command(name = "tabletprops")]
#[command(about = "Read and apply graphics tablet properties through XInput or xsetwacom")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to config file
    #[arg(long, global = true, env = "TABLETPROPS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Timeout for a single xsetwacom call in milliseconds (overrides config file)
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Which backend serves property access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BackendKind {
    /// XInput for the properties it knows, xsetwacom for the rest
    #[default]
    Auto,
    /// XInput device properties only
    Xinput,
    /// xsetwacom only
    Xsetwacom,
}

#[derive(Args, Debug, Clone)]
pub struct Target {
    /// Device name as listed by `tabletprops devices`
    #[arg(long, short)]
    pub device: String,

    /// Backend to use
    #[arg(long, value_enum, default_value_t = BackendKind::Auto)]
    pub backend: BackendKind,
}

#[derive(Subcommand)]
pub enum Command {
    /// List attached XInput devices
    Devices,

    /// List properties supported for a device
    List {
        #[command(flatten)]
        target: Target,
    },

    /// Print the value of a property
    Get {
        #[command(flatten)]
        target: Target,

        /// Property key, e.g. Area, Rotate, Button3
        #[arg(value_parser = parse_property)]
        property: Property,
    },

    /// Apply a value to a property
    Set {
        #[command(flatten)]
        target: Target,

        /// Property key, e.g. Area, Rotate, Button3
        #[arg(value_parser = parse_property)]
        property: Property,

        /// New value; an empty string resets where the property allows it
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Print every supported property of a device as JSON
    Dump {
        #[command(flatten)]
        target: Target,
    },

    /// Print the effective configuration
    Config,
}

fn parse_property(key: &str) -> Result<Property, String> {
    Property::find(key).ok_or_else(|| format!("unknown property '{key}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set_command() {
        let cli = Cli::try_parse_from([
            "tabletprops",
            "set",
            "--device",
            "Wacom Intuos Pen stylus",
            "--backend",
            "xsetwacom",
            "area",
            "0 0 15200 9500",
        ])
        .unwrap();

        match cli.command {
            Command::Set { target, property, value } => {
                assert_eq!(target.device, "Wacom Intuos Pen stylus");
                assert_eq!(target.backend, BackendKind::Xsetwacom);
                assert_eq!(property, Property::AREA);
                assert_eq!(value, "0 0 15200 9500");
            }
            _ => panic!("expected set command"),
        }
    }

    #[test]
    fn test_negative_value_accepted() {
        let cli = Cli::try_parse_from(["tabletprops", "set", "-d", "pen", "CursorAccelProfile", "-1"]).unwrap();
        match cli.command {
            Command::Set { value, target, .. } => {
                assert_eq!(value, "-1");
                assert_eq!(target.backend, BackendKind::Auto);
            }
            _ => panic!("expected set command"),
        }
    }

    #[test]
    fn test_config_command_with_overrides() {
        let cli = Cli::try_parse_from(["tabletprops", "config", "--timeout-ms", "0", "--config", "/tmp/t.toml"]).unwrap();
        assert!(matches!(cli.command, Command::Config));
        assert_eq!(cli.timeout_ms, Some(0));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/t.toml")));
    }

    #[test]
    fn test_unknown_property_rejected() {
        assert!(Cli::try_parse_from(["tabletprops", "get", "-d", "pen", "Brightness"]).is_err());
    }
}
