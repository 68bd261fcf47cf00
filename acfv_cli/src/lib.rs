use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Render ACF Views and Cards from a JSON site document.",
	long_about = "acfv renders ACF Views (HTML templates bound to the custom fields of a content \
	              item) and Cards (post listings that render a View for every result) from a JSON \
	              site document.\n\nQuick start:\n  acfv view 10 --object-id 1    Render a \
	              View for post 1\n  acfv card 20                  Render the first page of a \
	              Card\n  acfv render page.html         Expand shortcodes inside a file\n  acfv \
	              fields                   List the fields a View can display"
)]
pub struct AcfvCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,

	/// Site document to read, overriding `[site] data` from `acfv.toml`.
	#[arg(long, global = true)]
	pub site: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Render a View shortcode and print the HTML.
	///
	/// Shortcode errors, such as an unknown view or object id, are printed
	/// as the inline error fragment a page would show.
	View {
		/// Id of the stored View definition.
		view_id: u64,

		/// Data object: a post id, `options` or `$user$`. Defaults to the
		/// current loop post when omitted.
		#[arg(long)]
		object_id: Option<String>,

		/// Id of the logged in user, used by `$user$` and role gating.
		#[arg(long)]
		user: Option<u64>,
	},
	/// Render a Card.
	///
	/// The first page prints the whole card shortcode. Later pages print
	/// only the items, the way load more pagination appends them.
	Card {
		/// Id of the stored Card definition.
		card_id: u64,

		/// Page to render.
		#[arg(long, default_value_t = 1)]
		page: u64,
	},
	/// Expand every View and Card shortcode inside a file.
	///
	/// The collected CSS replaces the `<!--acf-views-styles-->` stub and
	/// collected JS is appended, as the page footer would print them.
	Render {
		/// File holding the page content.
		file: PathBuf,
	},
	/// Print the query a Card runs, as JSON.
	Query {
		/// Id of the stored Card definition.
		card_id: u64,

		/// Page to build the query for.
		#[arg(long, default_value_t = 1)]
		page: u64,
	},
	/// Print the responsive layout CSS generated from a Card's layout rules.
	Layout {
		/// Id of the stored Card definition.
		card_id: u64,
	},
	/// Print the markup preview of a View, as the editor shows it after
	/// saving.
	Skeleton {
		/// Id of the stored View definition.
		view_id: u64,
	},
	/// List the fields a View can display, one `key<TAB>label` per line.
	Fields,
}
