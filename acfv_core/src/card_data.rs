use std::sync::LazyLock;

use regex::NoExpand;
use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::view_data::CSS_COMMENT;
use crate::view_data::acf_field_id_by_key;

pub const LAYOUT_RULES_BEGIN: &str = "/*BEGIN LAYOUT_RULES*/";
pub const LAYOUT_RULES_END: &str = "/*END LAYOUT_RULES*/";

static LAYOUT_RULES_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?s)/\*BEGIN LAYOUT_RULES\*/.*/\*END LAYOUT_RULES\*/")
		.expect("layout rules pattern is valid")
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationType {
	#[default]
	LoadMoreButton,
	#[serde(rename = "infinity_scroll")]
	InfiniteScroll,
	PageNumbers,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
	#[default]
	Mobile,
	Tablet,
	Desktop,
	LargeDesktop,
}

impl Screen {
	/// Minimum viewport width in pixels. `0` is the base rule.
	pub fn min_width(self) -> u32 {
		match self {
			Self::Mobile => 0,
			Self::Tablet => 576,
			Self::Desktop => 992,
			Self::LargeDesktop => 1400,
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
	#[default]
	Row,
	Column,
	Grid,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutRule {
	pub screen: Screen,
	pub layout: Layout,
	pub amount_of_columns: u32,
	pub horizontal_gap: String,
	pub vertical_gap: String,
}

impl Default for LayoutRule {
	fn default() -> Self {
		Self {
			screen: Screen::Mobile,
			layout: Layout::Row,
			amount_of_columns: 0,
			horizontal_gap: String::new(),
			vertical_gap: String::new(),
		}
	}
}

/// A persisted card definition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardData {
	#[serde(skip)]
	pub id: u64,
	pub description: String,
	pub css_classes: String,
	/// View rendering every result.
	pub acf_view_id: u64,
	pub no_posts_found_message: String,

	pub post_types: Vec<String>,
	pub post_statuses: Vec<String>,
	/// `-1` is unlimited.
	pub limit: i64,
	pub post_in: Vec<u64>,
	pub post_not_in: Vec<u64>,
	pub is_ignore_sticky_posts: bool,

	pub order_by: String,
	pub order: String,
	pub order_by_meta_field_group: String,
	pub order_by_meta_field_key: String,

	pub is_with_pagination: bool,
	pub pagination_type: PaginationType,
	pub load_more_button_label: String,
	pub pagination_per_page: i64,

	pub is_use_layout_css: bool,
	pub layout_rules: Vec<LayoutRule>,

	pub markup: String,
	pub css_code: String,
	pub js_code: String,
	pub custom_markup: String,
	pub query_preview: String,
}

impl Default for CardData {
	fn default() -> Self {
		Self {
			id: 0,
			description: String::new(),
			css_classes: String::new(),
			acf_view_id: 0,
			no_posts_found_message: "No posts found".to_string(),
			post_types: Vec::new(),
			post_statuses: vec!["publish".to_string()],
			limit: -1,
			post_in: Vec::new(),
			post_not_in: Vec::new(),
			is_ignore_sticky_posts: false,
			order_by: "none".to_string(),
			order: "ASC".to_string(),
			order_by_meta_field_group: String::new(),
			order_by_meta_field_key: String::new(),
			is_with_pagination: false,
			pagination_type: PaginationType::LoadMoreButton,
			load_more_button_label: "Load more".to_string(),
			pagination_per_page: 9,
			is_use_layout_css: false,
			layout_rules: Vec::new(),
			markup: String::new(),
			css_code: String::new(),
			js_code: String::new(),
			custom_markup: String::new(),
			query_preview: String::new(),
		}
	}
}

impl CardData {
	/// Field id of the meta field used for `meta_value` ordering.
	pub fn order_by_meta_acf_field_id(&self) -> &str {
		acf_field_id_by_key(&self.order_by_meta_field_key)
	}

	pub fn is_order_by_meta(&self) -> bool {
		matches!(self.order_by.as_str(), "meta_value" | "meta_value_num")
	}

	/// The card CSS with the same minify and preview modes as views. The
	/// quoted `"1fr"` unit is always unquoted.
	pub fn css_code(&self, minify: bool, preview: bool) -> String {
		let mut css = self.css_code.clone();

		if minify {
			css = CSS_COMMENT.replace_all(&css, "").into_owned();
			css = css.replace(['\t', '\n', '\r'], "");

			let class = format!(".acf-card--id--{}", self.id);
			css = css.replace("#card ", &format!("{class} "));
			css = css.replace("#card{", &format!("{class}{{"));
			css = css.replace("#card__", &format!("{class} .acf-card__"));

			css = css.trim().to_string();
		} else if preview {
			css = css.replace("#card__", "#card .acf-card__");
		}

		css.replace("\"1fr\"", "1fr")
	}

	/// Append `layout_css` to the card CSS, or replace the previously
	/// generated block.
	pub fn apply_layout_css(&mut self, layout_css: &str) {
		if layout_css.is_empty() {
			return;
		}

		self.css_code = if self.css_code.contains(LAYOUT_RULES_BEGIN) {
			LAYOUT_RULES_BLOCK
				.replace(&self.css_code, NoExpand(layout_css))
				.into_owned()
		} else {
			format!("{}\n{layout_css}\n", self.css_code)
		};
	}
}
