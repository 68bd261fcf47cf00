use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::AcfvError;
use crate::post::PostField;
use crate::site::FieldObject;
use crate::site::FieldSchema;

/// Prefix of the taxonomy pseudo-fields, e.g. `_taxonomy_category`.
pub const TAXONOMY_PREFIX: &str = "_taxonomy_";

/// Every field type the renderer knows about. `ImageLink` is synthetic and
/// only produced by the post-field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
	Text,
	Textarea,
	Number,
	Range,
	Email,
	Url,
	Password,
	Image,
	File,
	Wysiwyg,
	Oembed,
	Gallery,
	Select,
	Checkbox,
	Radio,
	ButtonGroup,
	TrueFalse,
	Link,
	PostObject,
	PageLink,
	Relationship,
	Taxonomy,
	User,
	GoogleMap,
	DatePicker,
	DateTimePicker,
	TimePicker,
	ColorPicker,
	Repeater,
	Group,
	ImageLink,
}

impl FieldType {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Text => "text",
			Self::Textarea => "textarea",
			Self::Number => "number",
			Self::Range => "range",
			Self::Email => "email",
			Self::Url => "url",
			Self::Password => "password",
			Self::Image => "image",
			Self::File => "file",
			Self::Wysiwyg => "wysiwyg",
			Self::Oembed => "oembed",
			Self::Gallery => "gallery",
			Self::Select => "select",
			Self::Checkbox => "checkbox",
			Self::Radio => "radio",
			Self::ButtonGroup => "button_group",
			Self::TrueFalse => "true_false",
			Self::Link => "link",
			Self::PostObject => "post_object",
			Self::PageLink => "page_link",
			Self::Relationship => "relationship",
			Self::Taxonomy => "taxonomy",
			Self::User => "user",
			Self::GoogleMap => "google_map",
			Self::DatePicker => "date_picker",
			Self::DateTimePicker => "date_time_picker",
			Self::TimePicker => "time_picker",
			Self::ColorPicker => "color_picker",
			Self::Repeater => "repeater",
			Self::Group => "group",
			Self::ImageLink => "_image_link",
		}
	}

	/// Synthetic types are the ones missing from the field storage layer.
	/// Their tags start with `_`.
	pub fn is_custom(self) -> bool {
		self.as_str().starts_with('_')
	}

	/// Date and time types are fetched unformatted.
	pub fn is_date(self) -> bool {
		matches!(
			self,
			Self::DatePicker | Self::DateTimePicker | Self::TimePicker
		)
	}

	/// Layout types can't be rendered directly.
	pub fn is_layout(self) -> bool {
		matches!(self, Self::Repeater | Self::Group)
	}
}

impl fmt::Display for FieldType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for FieldType {
	type Err = AcfvError;

	fn from_str(tag: &str) -> Result<Self, Self::Err> {
		let field_type = match tag {
			"text" => Self::Text,
			"textarea" => Self::Textarea,
			"number" => Self::Number,
			"range" => Self::Range,
			"email" => Self::Email,
			"url" => Self::Url,
			"password" => Self::Password,
			"image" => Self::Image,
			"file" => Self::File,
			"wysiwyg" => Self::Wysiwyg,
			"oembed" => Self::Oembed,
			"gallery" => Self::Gallery,
			"select" => Self::Select,
			"checkbox" => Self::Checkbox,
			"radio" => Self::Radio,
			"button_group" => Self::ButtonGroup,
			"true_false" => Self::TrueFalse,
			"link" => Self::Link,
			"post_object" => Self::PostObject,
			"page_link" => Self::PageLink,
			"relationship" => Self::Relationship,
			"taxonomy" => Self::Taxonomy,
			"user" => Self::User,
			"google_map" => Self::GoogleMap,
			"date_picker" => Self::DatePicker,
			"date_time_picker" => Self::DateTimePicker,
			"time_picker" => Self::TimePicker,
			"color_picker" => Self::ColorPicker,
			"repeater" => Self::Repeater,
			"group" => Self::Group,
			"_image_link" => Self::ImageLink,
			other => return Err(AcfvError::UnsupportedFieldType(other.to_string())),
		};

		Ok(field_type)
	}
}

/// Resolved, read-only description of a field.
///
/// A descriptor is created for every field id a view references. When
/// nothing resolves, `exists()` is false and renderers skip the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMeta {
	field_id: String,
	name: String,
	type_name: String,
	field_type: Option<FieldType>,
	return_format: String,
	choices: BTreeMap<String, String>,
	display_format: String,
	multiple: bool,
	appearance: String,
}

impl FieldMeta {
	/// Resolve `field_id` through the post-field table, the taxonomy prefix
	/// and finally the live schema, in that order.
	pub fn resolve<S: FieldSchema + ?Sized>(field_id: &str, schema: &S) -> Self {
		if let Some(post_field) = PostField::from_key(field_id) {
			return Self::for_post_field(post_field);
		}

		if let Some(taxonomy) = field_id.strip_prefix(TAXONOMY_PREFIX) {
			return Self {
				field_id: field_id.to_string(),
				name: taxonomy.to_string(),
				type_name: FieldType::Taxonomy.as_str().to_string(),
				field_type: Some(FieldType::Taxonomy),
				return_format: "id".to_string(),
				// multiple values are expected
				appearance: "checkbox".to_string(),
				..Self::default()
			};
		}

		match schema.field_object(field_id) {
			Some(object) => Self::from_object(field_id, &object),
			None => {
				tracing::debug!(field_id, "field not found in schema");
				Self {
					field_id: field_id.to_string(),
					..Self::default()
				}
			}
		}
	}

	/// Build a descriptor from a schema entry.
	pub fn from_object(field_id: &str, object: &FieldObject) -> Self {
		Self {
			field_id: field_id.to_string(),
			name: object.name.clone(),
			type_name: object.field_type.clone(),
			field_type: object.field_type.parse().ok(),
			return_format: object.return_format.clone(),
			choices: object.choices.clone(),
			display_format: object.display_format.clone(),
			multiple: object.multiple,
			appearance: object.appearance.clone(),
		}
	}

	fn for_post_field(post_field: PostField) -> Self {
		let (field_type, return_format) = match post_field {
			PostField::Title | PostField::Date | PostField::Modified => (FieldType::Text, ""),
			PostField::Excerpt => (FieldType::Wysiwyg, ""),
			PostField::TitleLink | PostField::Author => (FieldType::Link, "array"),
			PostField::Thumbnail => (FieldType::Image, "id"),
			PostField::Link => (FieldType::Link, "url"),
			PostField::ThumbnailLink => (FieldType::ImageLink, ""),
		};

		Self {
			field_id: post_field.key().to_string(),
			name: post_field.key().to_string(),
			type_name: field_type.as_str().to_string(),
			field_type: Some(field_type),
			return_format: return_format.to_string(),
			..Self::default()
		}
	}

	pub fn exists(&self) -> bool {
		!self.type_name.is_empty()
	}

	pub fn field_id(&self) -> &str {
		&self.field_id
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// The type tag as stored, including tags this crate does not support.
	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	/// The parsed type, `None` for unknown tags.
	pub fn field_type(&self) -> Option<FieldType> {
		self.field_type
	}

	pub fn is_type(&self, field_type: FieldType) -> bool {
		self.field_type == Some(field_type)
	}

	pub fn is_custom_type(&self) -> bool {
		self.type_name.starts_with('_')
	}

	pub fn return_format(&self) -> &str {
		&self.return_format
	}

	pub fn display_format(&self) -> &str {
		&self.display_format
	}

	pub fn choices(&self) -> &BTreeMap<String, String> {
		&self.choices
	}

	pub fn is_multiple(&self) -> bool {
		self.multiple
	}

	pub fn appearance(&self) -> &str {
		&self.appearance
	}
}
