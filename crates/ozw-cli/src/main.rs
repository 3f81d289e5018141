// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! ozw-l10n - inspect the localization resources an OpenZWave install will use.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ozw_config::ConfigLayer;
use ozw_localization::{parse_hex, Localization};

mod output;

/// Inspect OpenZWave ValueHelp.xml localization data
#[derive(Parser, Debug)]
#[command(name = "ozw-l10n", version, about, long_about = None)]
struct Args {
	/// Directory containing ValueHelp.xml (overrides config)
	#[arg(short = 'p', long)]
	config_path: Option<PathBuf>,

	/// Preferred language tag (overrides config)
	#[arg(short, long)]
	language: Option<String>,

	/// Path to a TOML options file
	#[arg(short = 'c', long = "config-file")]
	config_file: Option<PathBuf>,

	/// Log filter, e.g. "warn" or "ozw_localization=debug"
	#[arg(long)]
	log_level: Option<String>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show what was loaded
	Summary,
	/// Look up a command class label
	Class {
		/// Command class id (hex)
		#[arg(value_parser = hex_arg::<u8>)]
		id: u8,
	},
	/// Look up a value label and help text
	Value {
		/// Command class id (hex)
		#[arg(value_parser = hex_arg::<u8>)]
		command_class: u8,
		/// Value index (hex)
		#[arg(value_parser = hex_arg::<u16>)]
		index: u16,
		/// Bit position (hex)
		#[arg(long, value_parser = hex_arg::<u32>)]
		pos: Option<u32>,
	},
	/// List every entry
	Dump {
		/// Output as JSON
		#[arg(long)]
		json: bool,
	},
}

fn hex_arg<T: TryFrom<u64>>(s: &str) -> Result<T, String> {
	parse_hex(s)
		.and_then(|v| T::try_from(v).ok())
		.ok_or_else(|| format!("'{s}' is not a hex number in range"))
}

fn init_logging(filter: Option<&str>) {
	let filter = match filter {
		Some(f) => EnvFilter::new(f),
		None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
	};
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}

fn main() -> Result<()> {
	let args = Args::parse();
	init_logging(args.log_level.as_deref());

	let config = ozw_config::load_config_with_overrides(
		args.config_file,
		ConfigLayer {
			config_path: args.config_path,
			language: args.language,
		},
	)
	.context("failed to load configuration")?;
	debug!(?config, "resolved configuration");

	let store = Localization::init(&config);

	match args.command {
		Command::Summary => {
			println!("{}", output::summary(store.report()));
		}
		Command::Class { id } => match store.class_entry(id) {
			Some(entry) => println!("{}", output::class_line(entry)),
			None => bail!("no localized label for command class 0x{id:02x}"),
		},
		Command::Value {
			command_class,
			index,
			pos,
		} => match store.value_entry(command_class, index, pos) {
			Some(entry) => {
				for line in output::value_lines(entry) {
					println!("{line}");
				}
			}
			None => bail!("no localized entry for value 0x{command_class:02x} 0x{index:04x}"),
		},
		Command::Dump { json } => {
			if json {
				println!(
					"{}",
					output::dump_json(store).context("failed to serialize entries")?
				);
			} else {
				for entry in store.command_classes() {
					println!("{}", output::class_line(entry));
				}
				for entry in store.values() {
					for line in output::value_lines(entry) {
						println!("{line}");
					}
				}
			}
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;
	use proptest::prelude::*;

	#[test]
	fn test_cli_definition_is_valid() {
		Args::command().debug_assert();
	}

	#[test]
	fn test_value_args_parse_hex() {
		let args = Args::try_parse_from(["ozw-l10n", "value", "0x71", "100", "--pos", "2"]).unwrap();
		match args.command {
			Command::Value {
				command_class,
				index,
				pos,
			} => {
				assert_eq!(command_class, 0x71);
				assert_eq!(index, 0x100);
				assert_eq!(pos, Some(2));
			}
			other => panic!("unexpected command: {other:?}"),
		}
	}

	#[test]
	fn test_config_file_flag() {
		let args =
			Args::try_parse_from(["ozw-l10n", "--config-file", "/tmp/options.toml", "summary"])
				.unwrap();
		assert_eq!(args.config_file, Some(PathBuf::from("/tmp/options.toml")));

		let args = Args::try_parse_from(["ozw-l10n", "-c", "/tmp/options.toml", "summary"]).unwrap();
		assert_eq!(args.config_file, Some(PathBuf::from("/tmp/options.toml")));
		assert!(Args::try_parse_from(["ozw-l10n", "--config", "/tmp/options.toml", "summary"]).is_err());
	}

	#[test]
	fn test_out_of_range_class_is_rejected() {
		assert!(Args::try_parse_from(["ozw-l10n", "class", "0x100"]).is_err());
	}

	proptest! {
		#[test]
		fn hex_arg_accepts_any_u8(n in any::<u8>()) {
			prop_assert_eq!(hex_arg::<u8>(&format!("0x{n:02x}")), Ok(n));
		}
	}
}
