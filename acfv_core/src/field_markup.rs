//! Field value to HTML conversion.
//!
//! [`FieldMarkup::render`] dispatches on the field type. Values arrive as
//! JSON in the shape the field storage layer returns for the configured
//! return format (`id`, `array`, `url`, `value`, `label`, `object`).
//! Malformed values never fail, they render empty or partially.

use serde_json::Value;

use crate::DateFormatter;
use crate::Field;
use crate::FieldHooks;
use crate::FieldMeta;
use crate::FieldType;
use crate::date_format::parse_date;
use crate::date_format::parse_date_time;
use crate::date_format::parse_time;
use crate::html::esc_attr;
use crate::html::esc_html;
use crate::html::push_delimited;
use crate::site::Content;
use crate::value::as_list;
use crate::value::has_key;
use crate::value::id_at;
use crate::value::is_falsy;
use crate::value::is_truthy;
use crate::value::object;
use crate::value::text_at;
use crate::value::to_id;
use crate::value::to_text;
use crate::view_data::GalleryType;

/// Renders a related post through a view: `(view_id, post_id) -> html`.
pub type ViewEmbedder<'a> = &'a dyn Fn(u64, u64) -> String;

pub struct FieldMarkup<'a, S: Content + ?Sized> {
	site: &'a S,
	hooks: &'a FieldHooks,
	dates: &'a DateFormatter,
	embed: Option<ViewEmbedder<'a>>,
}

impl<'a, S: Content + ?Sized> FieldMarkup<'a, S> {
	pub fn new(site: &'a S, hooks: &'a FieldHooks, dates: &'a DateFormatter) -> Self {
		Self {
			site,
			hooks,
			dates,
			embed: None,
		}
	}

	/// Render related posts of fields with an `acfViewId` through `embed`.
	#[must_use]
	pub fn with_embedder(mut self, embed: ViewEmbedder<'a>) -> Self {
		self.embed = Some(embed);
		self
	}

	/// The markup of one field value. Empty for missing or unsupported
	/// fields and for empty values of every type except `true_false`.
	pub fn render(&self, meta: &FieldMeta, field: &Field, value: Value, view_id: u64) -> String {
		// a field can be removed or change type after the view was saved
		let Some(field_type) = meta.field_type() else {
			return String::new();
		};

		if !meta.exists() {
			return String::new();
		}

		let value = self.hooks.apply_value(meta, value, view_id);

		if field_type != FieldType::TrueFalse && is_falsy(&value) {
			return String::new();
		}

		let markup = match field_type {
			FieldType::Image => self.image_markup(meta.return_format(), field, &value, false, false),
			FieldType::File => self.file_markup(meta, field, &value),
			FieldType::Gallery => self.gallery_markup(meta, field, &value),
			FieldType::Select | FieldType::Checkbox | FieldType::Radio | FieldType::ButtonGroup => {
				Self::select_markup(meta, field, &value)
			}
			FieldType::TrueFalse => Self::true_false_markup(&value),
			FieldType::Link => Self::link_markup(field, &value, meta.return_format()),
			FieldType::PageLink => Self::page_link_markup(field, &value),
			FieldType::PostObject | FieldType::Relationship => {
				self.post_object_markup(meta, field, &value)
			}
			FieldType::Taxonomy => self.taxonomy_markup(meta, field, &value),
			FieldType::User => self.user_markup(meta, field, &value),
			FieldType::GoogleMap => Self::map_markup(&value),
			FieldType::DatePicker | FieldType::DateTimePicker | FieldType::TimePicker => {
				self.date_markup(meta, field_type, &value)
			}
			FieldType::ColorPicker => Self::color_markup(meta, &value),
			FieldType::ImageLink => self.image_link_markup(field, &value),
			FieldType::Wysiwyg | FieldType::Oembed => to_text(&value),
			FieldType::Textarea => esc_html(&to_text(&value)).replace('\n', "<br>"),
			FieldType::Text
			| FieldType::Number
			| FieldType::Range
			| FieldType::Email
			| FieldType::Url
			| FieldType::Password
			| FieldType::Repeater
			| FieldType::Group => esc_html(&to_text(&value)),
		};

		self.hooks.apply_markup(meta, markup, &value, view_id)
	}

	// content types

	fn image_size_attributes(&self, return_format: &str, value: &Value) -> String {
		let (width, height) = match return_format {
			"id" => {
				self.site
					.attachment(to_id(value))
					.map_or((0, 0), |attachment| {
						(u64::from(attachment.width), u64::from(attachment.height))
					})
			}
			"array" => (id_at(value, "width"), id_at(value, "height")),
			_ => (0, 0),
		};

		format!("data-width='{width}' data-height='{height}'")
	}

	fn image_markup(
		&self,
		return_format: &str,
		field: &Field,
		value: &Value,
		is_with_size: bool,
		is_with_full_size_url: bool,
	) -> String {
		let image_size = if field.image_size.is_empty() {
			"full"
		} else {
			field.image_size.as_str()
		};

		let (url, alt, full_url) = match return_format {
			"id" => {
				match self.site.attachment(to_id(value)) {
					Some(attachment) => {
						(
							attachment.url_for(image_size).to_string(),
							attachment.alt.clone(),
							attachment.url.clone(),
						)
					}
					None => (String::new(), String::new(), String::new()),
				}
			}
			"array" => {
				let sized = value
					.get("sizes")
					.and_then(|sizes| sizes.get(image_size))
					.map(to_text)
					.unwrap_or_default();
				let full_url = text_at(value, "url");
				let url = if sized.is_empty() {
					full_url.clone()
				} else {
					sized
				};

				(url, text_at(value, "alt"), full_url)
			}
			"url" => (to_text(value), String::new(), String::new()),
			_ => (String::new(), String::new(), String::new()),
		};

		let mut data = String::new();
		if is_with_size {
			data.push(' ');
			data.push_str(&self.image_size_attributes(return_format, value));
		}
		if is_with_full_size_url {
			data.push_str(&format!(" data-full='{}'", esc_attr(&full_url)));
		}

		format!(
			"<img class='acf-view__image' src='{}' alt='{}' loading='lazy'{data}>",
			esc_attr(&url),
			esc_attr(&alt)
		)
	}

	fn file_markup(&self, meta: &FieldMeta, field: &Field, value: &Value) -> String {
		let (url, title) = match meta.return_format() {
			"id" => {
				self.site
					.attachment(to_id(value))
					.map(|attachment| (attachment.url, attachment.title))
					.unwrap_or_default()
			}
			"array" => (text_at(value, "url"), text_at(value, "title")),
			"url" => (to_text(value), String::new()),
			_ => (String::new(), String::new()),
		};

		let title = first_non_empty(&[
			field.link_label.as_str(),
			title.as_str(),
			field.label.as_str(),
			url.as_str(),
		]);

		format!(
			"<a class='acf-view__link' href='{}'>{}</a>",
			esc_attr(&url),
			esc_html(title)
		)
	}

	fn gallery_markup(&self, meta: &FieldMeta, field: &Field, value: &Value) -> String {
		let (is_with_size, is_with_full_size_url) = match field.gallery_type {
			GalleryType::Plain => (false, false),
			GalleryType::Masonry => (true, false),
			GalleryType::Lightbox => (false, true),
		};

		let images: String = as_list(value)
			.iter()
			.map(|image| {
				self.image_markup(
					meta.return_format(),
					field,
					image,
					is_with_size,
					is_with_full_size_url,
				)
			})
			.collect();

		match field.gallery_type {
			GalleryType::Masonry => {
				format!(
					"<div class='acf-view__masonry' data-row-min-height='{}' data-gutter='{}' \
					 data-mobile-gutter='{}'>{images}</div>",
					field.masonry_row_min_height, field.masonry_gutter, field.masonry_mobile_gutter
				)
			}
			GalleryType::Plain | GalleryType::Lightbox => images,
		}
	}

	// choice types

	fn select_markup(meta: &FieldMeta, field: &Field, value: &Value) -> String {
		// a single `array` choice is an object carrying `label`
		let values = match value {
			Value::Array(values) => values.clone(),
			other => vec![other.clone()],
		};

		let labels: Vec<String> = values
			.iter()
			.map(|choice| {
				match meta.return_format() {
					"value" => meta.choices().get(&to_text(choice)).cloned().unwrap_or_default(),
					"label" => to_text(choice),
					"array" => text_at(choice, "label"),
					_ => String::new(),
				}
			})
			.collect();

		// only one value is possible for them
		if meta.is_type(FieldType::Radio) || meta.is_type(FieldType::ButtonGroup) {
			return labels.concat();
		}

		let mut markup = String::new();
		for label in &labels {
			push_delimited(
				&mut markup,
				&field.options_delimiter,
				&format!("<div class='acf-view__choice'>{}</div>", esc_html(label)),
			);
		}

		markup
	}

	fn true_false_markup(value: &Value) -> String {
		let state = if is_truthy(value) { "checked" } else { "unchecked" };

		format!("<div class='acf-view__true-false acf-view__true-false--state--{state}'></div>")
	}

	// jquery types

	fn map_markup(value: &Value) -> String {
		if !value.is_object() {
			tracing::debug!("map value is not an object");
			return String::new();
		}

		let zoom = value
			.get("zoom")
			.filter(|zoom| !zoom.is_null())
			.map_or_else(|| "16".to_string(), to_text);

		format!(
			"<div class=\"acf-views__map\" style=\"width:100%;height:400px;\" \
			 data-zoom=\"{}\"><div class=\"acf-views__map-marker\" data-lat=\"{}\" \
			 data-lng=\"{}\"></div></div>",
			esc_attr(&zoom),
			esc_attr(&text_at(value, "lat")),
			esc_attr(&text_at(value, "lng"))
		)
	}

	fn date_markup(&self, meta: &FieldMeta, field_type: FieldType, value: &Value) -> String {
		let display_format = meta.display_format();
		let raw = to_text(value);

		if raw.is_empty() || display_format.is_empty() {
			return String::new();
		}

		let date = match field_type {
			FieldType::DatePicker => parse_date(&raw),
			FieldType::DateTimePicker => parse_date_time(&raw),
			FieldType::TimePicker => parse_time(&raw),
			_ => None,
		};

		let Some(date) = date else {
			tracing::debug!(field = meta.name(), raw, "unparseable date value");
			return String::new();
		};

		self.dates.format(display_format, &date)
	}

	fn color_markup(meta: &FieldMeta, value: &Value) -> String {
		if meta.return_format() != "array" || !value.is_object() {
			return esc_html(&to_text(value));
		}

		format!(
			"rgba({},{},{},{})",
			esc_html(&text_at(value, "red")),
			esc_html(&text_at(value, "green")),
			esc_html(&text_at(value, "blue")),
			esc_html(&text_at(value, "alpha"))
		)
	}

	// relational types

	fn link_markup(field: &Field, value: &Value, return_format: &str) -> String {
		let (url, title) = match return_format {
			"array" => (text_at(value, "url"), text_at(value, "title")),
			"url" => (to_text(value), String::new()),
			_ => (String::new(), String::new()),
		};

		let target = if value.get("target").is_some_and(is_truthy) {
			"_blank"
		} else {
			"_self"
		};

		let title = first_non_empty(&[
			field.link_label.as_str(),
			title.as_str(),
			field.label.as_str(),
			url.as_str(),
		]);

		format!(
			"<a target='{target}' class='acf-view__link' href='{}'>{}</a>",
			esc_attr(&url),
			esc_html(title)
		)
	}

	fn link_from(field: &Field, url: String, title: String) -> String {
		let link = object(&[("url", Value::from(url)), ("title", Value::from(title))]);
		Self::link_markup(field, &link, "array")
	}

	fn image_link_markup(&self, field: &Field, value: &Value) -> String {
		if !has_key(value, "image_id") || !has_key(value, "permalink") {
			return String::new();
		}

		let image_id = value.get("image_id").cloned().unwrap_or(Value::Null);

		format!(
			"<a target='_self' class='acf-view__link' href='{}'>{}</a>",
			esc_attr(&text_at(value, "permalink")),
			self.image_markup("id", field, &image_id, false, false)
		)
	}

	fn post_object_markup(&self, meta: &FieldMeta, field: &Field, value: &Value) -> String {
		let mut markup = String::new();

		for post in as_list(value) {
			let post_id = if meta.return_format() == "object" {
				id_at(&post, "ID")
			} else {
				to_id(&post)
			};

			let item = match self.embed {
				Some(embed) if field.acf_view_id > 0 => embed(field.acf_view_id, post_id),
				_ => {
					let title = if field.link_label.is_empty() {
						self.site.post_title(post_id)
					} else {
						field.link_label.clone()
					};

					Self::link_from(field, self.site.permalink(post_id), title)
				}
			};

			push_delimited(&mut markup, &field.options_delimiter, &item);
		}

		markup
	}

	fn page_link_markup(field: &Field, value: &Value) -> String {
		let mut markup = String::new();

		for link in as_list(value) {
			let url = to_text(&link);
			let title = first_non_empty(&[
				field.link_label.as_str(),
				field.label.as_str(),
				url.as_str(),
			])
			.to_string();

			push_delimited(
				&mut markup,
				&field.options_delimiter,
				&Self::link_from(field, url, title),
			);
		}

		markup
	}

	fn taxonomy_markup(&self, meta: &FieldMeta, field: &Field, value: &Value) -> String {
		let is_multiple_appearance = matches!(meta.appearance(), "checkbox" | "multi_select");

		let terms = if is_multiple_appearance {
			as_list(value)
		} else {
			vec![value.clone()]
		};

		let mut markup = String::new();

		for term in &terms {
			let resolved = match meta.return_format() {
				"id" => {
					self.site
						.term(to_id(term))
						.map(|found| (found.name, found.link))
				}
				_ => {
					let term_id = id_at(term, "term_id");
					self.site
						.term(term_id)
						.map(|found| (text_at(term, "name"), found.link))
				}
			};

			// an unresolved term still renders, with an empty link
			let (label, url) = resolved
				.map(|(name, link)| {
					let label = if field.link_label.is_empty() {
						name
					} else {
						field.link_label.clone()
					};
					(label, link)
				})
				.unwrap_or_default();

			push_delimited(
				&mut markup,
				&field.options_delimiter,
				&Self::link_from(field, url, label),
			);
		}

		markup
	}

	fn user_markup(&self, meta: &FieldMeta, field: &Field, value: &Value) -> String {
		// an object carrying `display_name` is a single user
		let users = match value {
			Value::Array(users) => users.clone(),
			other => vec![other.clone()],
		};

		let mut markup = String::new();

		for user in &users {
			let (label, user_id) = match meta.return_format() {
				"object" | "array" => (text_at(user, "display_name"), id_at(user, "ID")),
				"id" => {
					self.site
						.user(to_id(user))
						.map_or((String::new(), 0), |found| (found.display_name, found.id))
				}
				_ => (String::new(), 0),
			};

			let label = if field.link_label.is_empty() {
				label
			} else {
				field.link_label.clone()
			};

			push_delimited(
				&mut markup,
				&field.options_delimiter,
				&Self::link_from(field, self.site.author_url(user_id), label),
			);
		}

		markup
	}
}

fn first_non_empty<'v>(candidates: &[&'v str]) -> &'v str {
	candidates
		.iter()
		.copied()
		.find(|candidate| !candidate.is_empty())
		.unwrap_or("")
}
