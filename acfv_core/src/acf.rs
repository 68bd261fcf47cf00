//! Choice lists for the definition editor: supported field types, field
//! groups, fields, sub-fields and taxonomies.

use crate::FieldType;
use crate::PostField;
use crate::field_meta::TAXONOMY_PREFIX;
use crate::site::FieldGroup;
use crate::site::FieldSchema;
use crate::view_data::create_key;

/// Pseudo-group holding the post fields.
pub const GROUP_POST: &str = "$post$";
/// Pseudo-group holding the taxonomy fields.
pub const GROUP_TAXONOMY: &str = "$taxonomy$";
/// Field groups registered by this plugin itself start with this prefix.
pub const OWN_GROUP_PREFIX: &str = "local_acf_views_";

/// Ordered `(value, label)` pairs, starting with an empty "Select" entry.
pub type Choices = Vec<(String, String)>;

/// Supported field types by category.
pub fn grouped_field_types() -> Vec<(&'static str, Vec<FieldType>)> {
	vec![
		("basic", vec![
			FieldType::Text,
			FieldType::Textarea,
			FieldType::Number,
			FieldType::Range,
			FieldType::Email,
			FieldType::Url,
			FieldType::Password,
		]),
		("content", vec![
			FieldType::Image,
			FieldType::File,
			FieldType::Wysiwyg,
			FieldType::Oembed,
			FieldType::Gallery,
		]),
		("choice", vec![
			FieldType::Select,
			FieldType::Checkbox,
			FieldType::Radio,
			FieldType::ButtonGroup,
			FieldType::TrueFalse,
		]),
		("relational", vec![
			FieldType::Link,
			FieldType::PostObject,
			FieldType::PageLink,
			FieldType::Relationship,
			FieldType::Taxonomy,
			FieldType::User,
		]),
		("jquery", vec![
			FieldType::GoogleMap,
			FieldType::DatePicker,
			FieldType::DateTimePicker,
			FieldType::TimePicker,
			FieldType::ColorPicker,
		]),
		("layout", vec![FieldType::Repeater, FieldType::Group]),
	]
}

/// Flat list of supported field types.
pub fn field_types() -> Vec<FieldType> {
	grouped_field_types()
		.into_iter()
		.flat_map(|(_, types)| types)
		.collect()
}

fn is_supported(tag: &str) -> bool {
	field_types().iter().any(|field_type| field_type.as_str() == tag)
}

fn select() -> (String, String) {
	(String::new(), "Select".to_string())
}

pub struct Acf<'a, S: FieldSchema + ?Sized> {
	schema: &'a S,
}

impl<'a, S: FieldSchema + ?Sized> Acf<'a, S> {
	pub fn new(schema: &'a S) -> Self {
		Self { schema }
	}

	/// Field groups that can be displayed: not private and not our own.
	pub fn groups(&self) -> Vec<FieldGroup> {
		self.schema
			.field_groups()
			.into_iter()
			.filter(|group| !group.private && !group.key.starts_with(OWN_GROUP_PREFIX))
			.collect()
	}

	pub fn group_choices(&self, is_with_extra: bool) -> Choices {
		let mut choices = vec![select()];

		if is_with_extra {
			choices.push((GROUP_POST.to_string(), "$Post$".to_string()));
			choices.push((GROUP_TAXONOMY.to_string(), "$Taxonomy$".to_string()));
		}

		choices.extend(self.groups().into_iter().map(|group| (group.key, group.title)));

		choices
	}

	/// Fields keyed `group|field`. With `is_with_extra` the post and taxonomy
	/// pseudo-fields come first.
	pub fn field_choices(&self, is_with_extra: bool, exclude_types: &[&str]) -> Choices {
		let mut choices = vec![select()];

		if is_with_extra {
			for post_field in [
				PostField::Title,
				PostField::TitleLink,
				PostField::Excerpt,
				PostField::Thumbnail,
				PostField::ThumbnailLink,
				PostField::Author,
				PostField::Date,
				PostField::Modified,
				PostField::Link,
			] {
				choices.push((
					create_key(&[GROUP_POST, post_field.key()]),
					post_field.label().to_string(),
				));
			}

			if !exclude_types.contains(&GROUP_TAXONOMY) {
				for taxonomy in self.schema.taxonomies() {
					let field = format!("{TAXONOMY_PREFIX}{}", taxonomy.name);
					choices.push((create_key(&[GROUP_TAXONOMY, &field]), taxonomy.label));
				}
			}
		}

		for group in self.groups() {
			for field in &group.fields {
				if !is_supported(&field.field_type) || exclude_types.contains(&field.field_type.as_str())
				{
					continue;
				}

				choices.push((
					create_key(&[&group.key, &field.key]),
					format!("{} ({})", field.label, field.field_type),
				));
			}
		}

		choices
	}

	/// Sub-fields of repeater and group fields, keyed `group|field|sub`.
	/// Nested layout fields are left out.
	pub fn sub_field_choices(&self, exclude_types: &[&str]) -> Choices {
		let mut choices = vec![select()];

		for group in self.groups() {
			for field in &group.fields {
				let is_layout = matches!(field.field_type.as_str(), "repeater" | "group");
				if !is_layout || field.sub_fields.is_empty() {
					continue;
				}

				for sub_field in &field.sub_fields {
					let tag = sub_field.field_type.as_str();
					if !is_supported(tag)
						|| matches!(tag, "repeater" | "group")
						|| exclude_types.contains(&tag)
					{
						continue;
					}

					choices.push((
						create_key(&[&group.key, &field.key, &sub_field.key]),
						format!("{} ({})", sub_field.label, sub_field.field_type),
					));
				}
			}
		}

		choices
	}

	pub fn taxonomy_choices(&self) -> Choices {
		let mut choices = vec![select()];

		choices.extend(
			self.schema
				.taxonomies()
				.into_iter()
				.map(|taxonomy| (taxonomy.name, taxonomy.label)),
		);

		choices
	}
}
