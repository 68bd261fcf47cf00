use std::path::Path;
use std::path::PathBuf;
use std::process;

use acfv_core::Acf;
use acfv_core::AcfvConfig;
use acfv_core::AcfvError;
use acfv_core::JsonSite;
use acfv_core::Renderer;
use acfv_core::RequestContext;
use acfv_core::STYLES_STUB;
use acfv_core::shortcode::ShortcodeAttributes;
use acfv_core::shortcode::find_shortcodes;
use acfv_cli::AcfvCli;
use acfv_cli::Commands;
use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
	let args = AcfvCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose, use_color);

	let result = match &args.command {
		Some(Commands::View {
			view_id,
			object_id,
			user,
		}) => run_view(&args, *view_id, object_id.as_deref(), *user),
		Some(Commands::Card { card_id, page }) => run_card(&args, *card_id, *page),
		Some(Commands::Render { file }) => run_render(&args, file),
		Some(Commands::Query { card_id, page }) => run_query(&args, *card_id, *page),
		Some(Commands::Layout { card_id }) => run_layout(&args, *card_id),
		Some(Commands::Skeleton { view_id }) => run_skeleton(&args, *view_id),
		Some(Commands::Fields) => run_fields(&args),
		None => {
			eprintln!("No subcommand specified. Run `acfv --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		match e.downcast::<AcfvError>() {
			Ok(acfv_err) => {
				let report: miette::Report = (*acfv_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Logs go to stderr so rendered output stays clean. `RUST_LOG` overrides
/// the default level.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.without_time()
		.init();
}

fn resolve_root(args: &AcfvCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Load the config and the site document it points to. `--site` wins over
/// `[site] data`.
fn load_project(args: &AcfvCli) -> Result<(AcfvConfig, JsonSite), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = AcfvConfig::load(&root)?.unwrap_or_default();

	let site_path = args
		.site
		.clone()
		.or_else(|| config.site_path(&root))
		.ok_or(AcfvError::MissingSite)?;

	let site = JsonSite::load(&site_path)?;

	tracing::debug!(
		root = %root.display(),
		site = %site_path.display(),
		"loaded project"
	);

	Ok((config, site))
}

fn run_view(args: &AcfvCli, view_id: u64, object_id: Option<&str>, user: Option<u64>) -> CliResult {
	let (config, site) = load_project(args)?;
	let renderer = Renderer::new(&site, config).with_context(RequestContext {
		current_user: user,
		..RequestContext::default()
	});

	let mut attributes = ShortcodeAttributes::new().with("view-id", view_id.to_string());
	if let Some(object_id) = object_id {
		attributes.set("object-id", object_id);
	}

	println!("{}", renderer.view_shortcode(&attributes));

	Ok(())
}

fn run_card(args: &AcfvCli, card_id: u64, page: u64) -> CliResult {
	let (config, site) = load_project(args)?;
	let renderer = Renderer::new(&site, config);

	let html = if page > 1 {
		renderer.card_page(card_id, page)?
	} else {
		renderer.card_shortcode(&ShortcodeAttributes::new().with("card-id", card_id.to_string()))
	};

	println!("{html}");

	Ok(())
}

fn run_render(args: &AcfvCli, file: &Path) -> CliResult {
	let (config, site) = load_project(args)?;
	let renderer = Renderer::new(&site, config);

	let content = std::fs::read_to_string(file)?;
	if find_shortcodes(&content).is_empty() {
		eprintln!(
			"{} no View or Card shortcodes found in {}",
			colored!("warning:", yellow),
			file.display()
		);
	}

	let page = renderer.do_shortcode(&content);
	// without a stub the styles go first
	let page = if page.contains(STYLES_STUB) {
		page
	} else {
		format!("{STYLES_STUB}{page}")
	};

	print!("{}", renderer.print_custom_assets(&page));

	Ok(())
}

fn run_query(args: &AcfvCli, card_id: u64, page: u64) -> CliResult {
	let (config, site) = load_project(args)?;
	let renderer = Renderer::new(&site, config);

	let spec = renderer.query_spec(card_id, page)?;
	println!("{}", serde_json::to_string_pretty(&spec)?);

	Ok(())
}

fn run_layout(args: &AcfvCli, card_id: u64) -> CliResult {
	let (config, site) = load_project(args)?;
	let renderer = Renderer::new(&site, config);

	println!("{}", renderer.layout_css(card_id)?);

	Ok(())
}

fn run_skeleton(args: &AcfvCli, view_id: u64) -> CliResult {
	let (config, site) = load_project(args)?;
	let renderer = Renderer::new(&site, config);

	print!("{}", renderer.save_view(view_id)?.markup);

	Ok(())
}

fn run_fields(args: &AcfvCli) -> CliResult {
	let (_, site) = load_project(args)?;

	for (key, label) in Acf::new(&site).field_choices(true, &[]) {
		if key.is_empty() {
			continue;
		}

		println!("{key}\t{label}");
	}

	Ok(())
}
