/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use anyhow::{bail, Error};
use chrono::{Datelike, Local};
use clap::{Parser, ValueEnum};
use infla::calc::basket::Basket;
use infla::calc::engine::InflationEngine;
use infla::config::config_file::Config;
use infla::parsing::basket_args::BasketArgParser;
use infla::parsing::dataset::Dataset;
use infla::parsing::filesystem::Filesystem;
use infla::profile::registry::ProfileRegistry;
use infla::reports::dataset_reporter::DatasetReporter;
use infla::reports::result_reporter::{LegacyReporter, ResultReporter};
use infla::util::period::{TimePeriod, TimeRange};
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
	name = "infla",
	version,
	about = "Personal inflation from your own spending basket"
)]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	/// The command to execute
	command: Directive,

	/// The category id for the rates command
	#[arg(required = false)]
	term: Option<String>,

	// -----------
	// -- FLAGS --
	// -----------
	/// The price-index dataset (JSON)
	#[arg(short)]
	file: Option<String>,

	/// Custom config file location (default: ~/.config/infla/config.toml)
	#[arg(long)]
	config: Option<String>,

	/// Year to calculate inflation for
	#[arg(short, long)]
	year: Option<i32>,

	/// Start of the period (YYYY-MM)
	#[arg(long)]
	from: Option<String>,

	/// End of the period (YYYY-MM)
	#[arg(long)]
	to: Option<String>,

	/// Start from the basket of this profile
	#[arg(short, long)]
	profile: Option<String>,

	/// Monthly spend on a category, as category=amount; repeatable
	#[arg(short, long)]
	spend: Vec<String>,

	/// Start from a basket saved as JSON
	#[arg(long)]
	basket: Option<String>,

	/// Print results as JSON
	#[arg(long)]
	json: bool,

	/// Log debug output to stderr
	#[arg(short, long)]
	verbose: bool,
}

impl Cli {
	/// Extra validations on top of what clap does
	fn validate(&self) -> Result<(), Error> {
		if self.from.is_some() != self.to.is_some() {
			bail!("--from and --to must be given together");
		}

		if self.year.is_some() && self.from.is_some() {
			bail!("Use either --year or --from/--to, not both");
		}

		if self.profile.is_some() && self.basket.is_some() {
			bail!("Use either --profile or --basket, not both");
		}

		Ok(())
	}

	fn range(&self) -> Result<Option<TimeRange>, Error> {
		match (&self.from, &self.to) {
			(Some(from), Some(to)) => Ok(Some(TimeRange::new(
				TimePeriod::from_key(from)?,
				TimePeriod::from_key(to)?,
			)?)),
			_ => Ok(None),
		}
	}
}

#[derive(ValueEnum, Clone, PartialEq)]
enum Directive {
	Calc,   // year-over-year personal inflation
	Legacy, // weighted-average gauge

	Categories, // list category definitions
	Rates,      // index series of one category
	Coverage,   // calendar extent of the dataset

	Profiles, // list preset and configured baskets
}

fn main() -> Result<(), Error> {
	let args = Cli::parse();
	init_logging(args.verbose);
	args.validate()?;

	let fs = Filesystem::new();
	let config = fs.get_config(args.config.as_ref())?;
	let registry = ProfileRegistry::with_config(&config.profiles)?;

	match args.command {
		Directive::Calc => {
			let dataset = load_dataset(&fs, &args, &config)?;
			let basket = build_basket(&fs, &args, &registry)?;
			let engine = InflationEngine::new(&dataset.table);

			let result = match args.range()? {
				Some(range) => engine.calculate_range(&basket, &range)?,
				None => {
					let year = match args.year.or(config.default_year) {
						Some(year) => year,
						None => match dataset.table.last_complete_year() {
							Some(year) => year,
							None => bail!("The dataset has no data"),
						},
					};
					engine.calculate(&basket, year)?
				},
			};

			if args.json {
				println!("{}", serde_json::to_string_pretty(&result)?);
			} else {
				ResultReporter::new(&result, &basket, &dataset.table).print();
			}
		},
		Directive::Legacy => {
			let dataset = load_dataset(&fs, &args, &config)?;
			let basket = build_basket(&fs, &args, &registry)?;
			let range = match args.range()? {
				Some(range) => range,
				None => TimeRange::default_around(Local::now().year()),
			};

			#[allow(deprecated)]
			let result = infla::calc::legacy::weighted_average(
				&dataset.table,
				&basket,
				&range,
			)?;

			if args.json {
				println!("{}", serde_json::to_string_pretty(&result)?);
			} else {
				LegacyReporter::new(&result).print();
			}
		},
		Directive::Categories => {
			let dataset = load_dataset(&fs, &args, &config)?;
			print!("{}", DatasetReporter::new(&dataset).categories());
		},
		Directive::Rates => {
			if let Some(category_id) = &args.term {
				let dataset = load_dataset(&fs, &args, &config)?;
				let range = args.range()?;
				let reporter = DatasetReporter::new(&dataset);
				print!("{}", reporter.series(category_id, range.as_ref())?);
			} else {
				bail!("No category specified");
			}
		},
		Directive::Coverage => {
			let dataset = load_dataset(&fs, &args, &config)?;
			print!("{}", DatasetReporter::new(&dataset).coverage());
		},
		Directive::Profiles => {
			// needs no dataset
			print!("{}", DatasetReporter::profiles(&registry));
		},
	}

	Ok(())
}

/// Logs go to stderr so they never mix with report output.
fn init_logging(verbose: bool) {
	let filter = if verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}

fn load_dataset(fs: &Filesystem, args: &Cli, config: &Config) -> Result<Dataset, Error> {
	let path = match args.file.as_ref().or(config.dataset.as_ref()) {
		Some(path) => path,
		None => bail!("No dataset specified; pass -f or set `dataset` in config"),
	};

	Ok(fs.load_dataset(Path::new(path))?)
}

/// The profile or saved basket, if any, with command-line pairs appended.
fn build_basket(
	fs: &Filesystem,
	args: &Cli,
	registry: &ProfileRegistry,
) -> Result<Basket, Error> {
	let mut basket = match (&args.profile, &args.basket) {
		(Some(profile), _) => registry.basket(profile)?.clone(),
		(None, Some(path)) => fs.load_basket(Path::new(path))?,
		(None, None) => Basket::new(),
	};

	BasketArgParser::new().extend(&mut basket, &args.spend)?;
	Ok(basket)
}
