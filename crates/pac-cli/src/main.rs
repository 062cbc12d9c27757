#![warn(clippy::unwrap_used)]
#![deny(rust_2018_idioms)]

use clap::Parser;
use miette::IntoDiagnostic;
use regex::Regex;
use tracing::{debug, warn};

use crate::args::Action;

mod args;
mod create;
mod extract;
mod list;
mod logs;

fn main() -> miette::Result<()> {
	let logs_on = logs::from_env().into_diagnostic()?;

	debug!("parsing arguments");
	let args = args::Args::parse();

	if logs_on {
		warn!("ignoring logging options from args");
	} else {
		logs::from_args(&args).into_diagnostic()?;
	}

	debug!(?args, "got arguments");

	match args.action {
		Action::Create(args) => create::create(args),
		Action::Extract(args) => extract::extract(args),
		Action::List(args) => list::list(args),
	}
}

/// Whether a name passes the `--filter` regexes: any of them matches, or there are none.
pub(crate) fn matches_filters(filters: &[Regex], name: &str) -> bool {
	filters.is_empty() || filters.iter().any(|filter| filter.is_match(name))
}
