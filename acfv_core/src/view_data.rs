use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::FieldMeta;
use crate::FieldType;
use crate::site::FieldSchema;

/// Separator of the parts of an item key (`group|field[|sub]`).
pub const KEY_SEPARATOR: char = '|';

pub(crate) static CSS_COMMENT: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"/\*(.?)+\*/").expect("css comment pattern is valid"));

/// Join key parts with [`KEY_SEPARATOR`].
pub fn create_key(parts: &[&str]) -> String {
	parts.join(&KEY_SEPARATOR.to_string())
}

/// The field id of an item key is its last non-empty part.
pub fn acf_field_id_by_key(key: &str) -> &str {
	key.split(KEY_SEPARATOR)
		.filter(|part| !part.is_empty())
		.next_back()
		.unwrap_or("")
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GalleryType {
	#[default]
	Plain,
	Masonry,
	Lightbox,
}

/// Display options of one field binding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Field {
	/// `group|field` or `group|field|sub`.
	pub key: String,
	/// Local identifier, unique inside a view.
	pub id: String,
	pub label: String,
	pub link_label: String,
	pub image_size: String,
	pub options_delimiter: String,
	pub is_visible_when_empty: bool,
	pub default_value: String,
	pub is_map_without_google_map: bool,
	pub gallery_type: GalleryType,
	pub masonry_row_min_height: u32,
	pub masonry_gutter: u32,
	pub masonry_mobile_gutter: u32,
	/// View used to render related posts of post object and relationship
	/// fields. `0` renders links.
	pub acf_view_id: u64,
}

impl Default for Field {
	fn default() -> Self {
		Self {
			key: String::new(),
			id: String::new(),
			label: String::new(),
			link_label: String::new(),
			image_size: String::new(),
			options_delimiter: String::new(),
			is_visible_when_empty: false,
			default_value: String::new(),
			is_map_without_google_map: false,
			gallery_type: GalleryType::Plain,
			masonry_row_min_height: 180,
			masonry_gutter: 20,
			masonry_mobile_gutter: 10,
			acf_view_id: 0,
		}
	}
}

impl Field {
	pub fn acf_field_id(&self) -> &str {
		acf_field_id_by_key(&self.key)
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Item {
	pub group: String,
	pub field: Field,
	pub repeater_fields: Vec<Field>,
}

/// A persisted view definition.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewData {
	/// Content id the definition was loaded from.
	#[serde(skip)]
	pub id: u64,
	pub description: String,
	pub css_classes: String,
	pub items: Vec<Item>,
	/// Generated skeleton, kept for the editor preview.
	pub markup: String,
	pub custom_markup: String,
	pub css_code: String,
	pub js_code: String,
	pub preview_post: u64,
	#[serde(skip)]
	pub(crate) fields_meta: HashMap<String, FieldMeta>,
}

impl ViewData {
	/// Resolve a descriptor for every referenced field.
	pub fn set_fields_meta<S: FieldSchema + ?Sized>(&mut self, schema: &S) {
		let mut fields_meta = HashMap::new();

		for item in &self.items {
			let field_id = item.field.acf_field_id();
			if !fields_meta.contains_key(field_id) {
				fields_meta.insert(field_id.to_string(), FieldMeta::resolve(field_id, schema));
			}
		}

		self.fields_meta = fields_meta;
	}

	/// Replace the descriptors, e.g. with prepared ones in tests.
	pub fn with_fields_meta(mut self, fields_meta: HashMap<String, FieldMeta>) -> Self {
		self.fields_meta = fields_meta;
		self
	}

	pub fn fields_meta(&self) -> &HashMap<String, FieldMeta> {
		&self.fields_meta
	}

	pub fn field_meta(&self, field: &Field) -> Option<&FieldMeta> {
		self.fields_meta.get(field.acf_field_id())
	}

	/// True when a map field that draws a live map is present.
	pub fn has_live_map(&self) -> bool {
		self.items.iter().any(|item| {
			!item.field.is_map_without_google_map
				&& self
					.field_meta(&item.field)
					.is_some_and(|meta| meta.is_type(FieldType::GoogleMap))
		})
	}

	/// The view CSS. Minified output drops comments and whitespace and
	/// expands the `#view` aliases. Preview output only expands `#view__`
	/// relative to `#view`.
	pub fn css_code(&self, minify: bool, preview: bool) -> String {
		let mut css = self.css_code.clone();

		if minify {
			css = CSS_COMMENT.replace_all(&css, "").into_owned();
			css = css.replace(['\t', '\n', '\r'], "");

			let class = format!(".acf-view--id--{}", self.id);
			css = css.replace("#view ", &format!("{class} "));
			css = css.replace("#view{", &format!("{class}{{"));
			css = css.replace("#view__", &format!("{class} .acf-view__"));

			css = css.trim().to_string();
		} else if preview {
			css = css.replace("#view__", "#view .acf-view__");
		}

		css
	}

	/// Sanitise item identifiers and fill in missing or duplicated ones from
	/// the field names.
	pub fn update_identifiers(&mut self) {
		for index in 0..self.items.len() {
			let id = self.items[index].field.id.clone();

			if !id.is_empty() && !is_valid_identifier(&id) {
				self.items[index].field.id.clear();
			} else if !id.is_empty() && self.unique_field_id(index, &id) == id {
				continue;
			}

			let Some(meta) = self.field_meta(&self.items[index].field) else {
				continue;
			};

			if !meta.exists() {
				continue;
			}

			// pseudo-fields start with `_`
			let name = meta.name().trim_start_matches('_').to_string();
			let id = self.unique_field_id(index, &name);
			self.items[index].field.id = id;
		}
	}

	/// `name` if no other item uses it, otherwise `name2`, `name3`, ...
	pub fn unique_field_id(&self, exclude: usize, name: &str) -> String {
		let is_taken = |candidate: &str| {
			self.items
				.iter()
				.enumerate()
				.any(|(index, item)| index != exclude && item.field.id == candidate)
		};

		if !is_taken(name) {
			return name.to_string();
		}

		(2..)
			.map(|suffix| format!("{name}{suffix}"))
			.find(|candidate| !is_taken(candidate))
			.unwrap_or_else(|| name.to_string())
	}
}

fn is_valid_identifier(id: &str) -> bool {
	!id.is_empty()
		&& id
			.chars()
			.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
