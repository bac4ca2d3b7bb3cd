//! Contains [Args], which are parsed command-line flags.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Parsed command line arguments.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(about = "Create, inspect and convert compute-color parameter assets.")]
pub struct Args {
    /// Log what's happening (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the default value of every parameter kind (or of just one) as
    /// JSON.
    Defaults {
        /// A parameter tag (e.g. `ComputeColorParameterFloat3`) or short name
        /// (e.g. `float3`).
        #[arg(long)]
        kind: Option<String>,
    },

    /// List the parameters stored in an asset file.
    Show {
        /// A `.json` or `.matp` asset file.
        file: PathBuf,
    },

    /// Add or replace a parameter, creating the asset file if it's missing.
    Set {
        file: PathBuf,

        /// The parameter name.
        name: String,

        /// A parameter tag or short name.
        kind: String,

        /// The value as text: `true`, `3`, `0.5`, `1, 0, 0`, a texture URL or
        /// `Filter, AddressU, AddressV`. Leave out to use the default.
        #[arg(allow_hyphen_values = true)]
        value: Option<String>,
    },

    /// Remove a parameter from an asset file.
    Remove { file: PathBuf, name: String },

    /// Re-encode an asset file, picking both formats by file extension.
    Convert { input: PathBuf, output: PathBuf },
}

impl Default for Args {
    fn default() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_value_is_optional() {
        let args = Args::try_parse_from(["matparam", "set", "a.json", "Tint", "float3"]).unwrap();
        assert_eq!(
            args.command,
            Command::Set {
                file: PathBuf::from("a.json"),
                name: "Tint".to_string(),
                kind: "float3".to_string(),
                value: None,
            }
        );
    }

    #[test]
    fn verbose_is_counted_anywhere() {
        let args = Args::try_parse_from(["matparam", "show", "a.matp", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn command_definition_is_valid() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
