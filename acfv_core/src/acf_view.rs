use std::collections::BTreeMap;

use serde_json::Value;

use crate::FieldMarkup;
use crate::FieldMeta;
use crate::FieldType;
use crate::Item;
use crate::Post;
use crate::ViewData;
use crate::html::strip_whitespace;
use crate::site::Content;
use crate::value::is_falsy;
use crate::value::is_truthy;
use crate::view_markup::OBJECT_ID_TOKEN;
use crate::view_markup::field_token;

/// One view bound to one data object and a skeleton.
pub struct AcfView<'a, S: Content + ?Sized> {
	view: &'a ViewData,
	post: Post<'a, S>,
	markup: FieldMarkup<'a, S>,
	html: String,
}

impl<'a, S: Content + ?Sized> AcfView<'a, S> {
	pub fn new(
		view: &'a ViewData,
		post: Post<'a, S>,
		markup: FieldMarkup<'a, S>,
		skeleton: String,
	) -> Self {
		Self {
			view,
			post,
			markup,
			html: skeleton,
		}
	}

	/// Substitute every item into the skeleton, then the object id. Returns
	/// the value used for each local field id.
	pub fn insert_fields(&mut self, is_minify: bool) -> BTreeMap<String, Value> {
		if is_minify {
			// before insertion, so field values keep their whitespace
			self.html = strip_whitespace(&self.html);
		}

		let view = self.view;
		let mut field_values = BTreeMap::new();

		for item in &view.items {
			let Some(meta) = view.field_meta(&item.field) else {
				continue;
			};

			let is_without_formatting = meta.field_type().is_some_and(FieldType::is_date);
			let mut value = self.post.field_value(meta.field_id(), is_without_formatting);
			if is_falsy(&value) {
				value = Value::from(item.field.default_value.clone());
			}

			field_values.insert(item.field.id.clone(), value.clone());

			self.insert_field(meta, item, value);
		}

		self.html = self
			.html
			.replace(OBJECT_ID_TOKEN, &self.post.id().to_string());

		field_values
	}

	fn insert_field(&mut self, meta: &FieldMeta, item: &Item, value: Value) {
		// repeater and group items aren't rendered directly
		if meta.field_type().is_some_and(FieldType::is_layout) {
			return;
		}

		let is_visible = is_truthy(&value)
			|| item.field.is_visible_when_empty
			|| meta.is_type(FieldType::TrueFalse);

		let field_markup = if is_visible {
			self.markup
				.render(meta, &item.field, value, self.view.id)
		} else {
			String::new()
		};

		self.html = inject_field(
			&field_token(&item.field.id),
			&field_markup,
			&self.html,
			!is_visible,
		);
	}

	pub fn html(&self) -> &str {
		&self.html
	}

	pub fn into_html(self) -> String {
		self.html
	}
}

/// Replace the region between the first and last `<!--$id$-->` marker.
/// The region is dropped when `is_remove` is set, otherwise the `$id$`
/// token inside it is replaced with `field_markup`. Without a marker pair
/// the markup is returned unchanged.
pub fn inject_field(token: &str, field_markup: &str, markup: &str, is_remove: bool) -> String {
	let marker = format!("<!--{token}-->");

	let (Some(start), Some(last)) = (markup.find(&marker), markup.rfind(&marker)) else {
		return markup.to_string();
	};

	if last == start {
		return markup.to_string();
	}

	let end = last + marker.len();
	let inner = &markup[start + marker.len()..last];
	let replacement = if is_remove {
		String::new()
	} else {
		inner.replace(token, field_markup)
	};

	format!("{}{replacement}{}", &markup[..start], &markup[end..])
}
