use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum AcfvError {
	#[error(transparent)]
	#[diagnostic(code(acfv::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(acfv::config_parse),
		help("check that acfv.toml is valid TOML with [site], [render] and/or [maps] sections")
	)]
	ConfigParse(String),

	#[error("failed to load site document `{path}`: {reason}")]
	#[diagnostic(
		code(acfv::site_document),
		help("the site document must be a JSON object with `posts`, `fieldGroups`, `users`, ...")
	)]
	SiteDocument { path: String, reason: String },

	#[error("no site document configured")]
	#[diagnostic(
		code(acfv::missing_site),
		help("pass `--site <file>` or set `[site] data = \"site.json\"` in acfv.toml")
	)]
	MissingSite,

	#[error("stored definition `{id}` is not valid JSON: {reason}")]
	#[diagnostic(code(acfv::definition_parse))]
	DefinitionParse { id: u64, reason: String },

	#[error("unknown view: `{0}`")]
	#[diagnostic(
		code(acfv::unknown_view),
		help("the id must reference a published `acf_views` item")
	)]
	UnknownView(u64),

	#[error("unknown card: `{0}`")]
	#[diagnostic(
		code(acfv::unknown_card),
		help("the id must reference a published `acf_cards` item")
	)]
	UnknownCard(u64),

	#[error("unsupported field type: `{0}`")]
	#[diagnostic(
		code(acfv::unsupported_field_type),
		help(
			"supported types: text, textarea, number, range, email, url, password, image, file, \
			 wysiwyg, oembed, gallery, select, checkbox, radio, button_group, true_false, link, \
			 post_object, page_link, relationship, taxonomy, user, google_map, date_picker, \
			 date_time_picker, time_picker, color_picker, repeater, group"
		)
	)]
	UnsupportedFieldType(String),
}

pub type AcfvResult<T> = Result<T, AcfvError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
