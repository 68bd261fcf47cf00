use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::DateFormatter;
use crate::field_meta::TAXONOMY_PREFIX;
use crate::site::Content;
use crate::value::object;

/// Pseudo-fields that read post properties instead of custom fields. Their
/// keys start with `_` so they never clash with schema keys (`field_x`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostField {
	Title,
	TitleLink,
	Thumbnail,
	ThumbnailLink,
	Author,
	Date,
	Modified,
	Excerpt,
	Link,
}

impl PostField {
	pub const ALL: [PostField; 9] = [
		Self::Title,
		Self::Thumbnail,
		Self::ThumbnailLink,
		Self::Author,
		Self::Date,
		Self::Modified,
		Self::Excerpt,
		Self::TitleLink,
		Self::Link,
	];

	pub fn key(self) -> &'static str {
		match self {
			Self::Title => "_post_title",
			Self::TitleLink => "_post_title_link",
			Self::Thumbnail => "_thumbnail_id",
			Self::ThumbnailLink => "_thumbnail_id_link",
			Self::Author => "_post_author",
			Self::Date => "_post_date",
			Self::Modified => "_post_modified",
			Self::Excerpt => "_post_excerpt",
			Self::Link => "_post_link",
		}
	}

	pub fn from_key(key: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|field| field.key() == key)
	}

	/// Label shown in the field choice list.
	pub fn label(self) -> &'static str {
		match self {
			Self::Title => "Title",
			Self::TitleLink => "Title with link",
			Self::Excerpt => "Excerpt",
			Self::Thumbnail => "Featured Image",
			Self::ThumbnailLink => "Featured Image with link",
			Self::Author => "Author",
			Self::Date => "Published date",
			Self::Modified => "Modified date",
			Self::Link => "Link",
		}
	}
}

/// Identifies the content item whose fields are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataObjectId {
	Post(u64),
	/// The site-wide options store.
	Options,
	/// Fields attached to a user profile.
	User(u64),
}

impl DataObjectId {
	/// Parse the string form produced by [`Display`](fmt::Display): `12`,
	/// `options` or `user_3`.
	pub fn parse(text: &str) -> Option<Self> {
		let text = text.trim();
		if text == "options" {
			return Some(Self::Options);
		}

		if let Some(user) = text.strip_prefix("user_") {
			return user.parse().ok().map(Self::User);
		}

		text.parse().ok().filter(|id| *id > 0).map(Self::Post)
	}

	pub fn post_id(&self) -> Option<u64> {
		match self {
			Self::Post(id) => Some(*id),
			Self::Options | Self::User(_) => None,
		}
	}
}

impl fmt::Display for DataObjectId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Post(id) => write!(f, "{id}"),
			Self::Options => f.write_str("options"),
			Self::User(id) => write!(f, "user_{id}"),
		}
	}
}

/// Field value accessor for one data object.
///
/// Values are cached by field name for the lifetime of the accessor, so a
/// view that shows the same field twice only reads it once.
pub struct Post<'a, S: Content + ?Sized> {
	id: DataObjectId,
	site: &'a S,
	dates: &'a DateFormatter,
	values: HashMap<String, Value>,
}

impl<'a, S: Content + ?Sized> Post<'a, S> {
	pub fn new(id: DataObjectId, site: &'a S, dates: &'a DateFormatter) -> Self {
		Self {
			id,
			site,
			dates,
			values: HashMap::new(),
		}
	}

	pub fn id(&self) -> DataObjectId {
		self.id
	}

	/// Value of `name`, which may be a post pseudo-field, a taxonomy
	/// pseudo-field or a custom field key.
	pub fn field_value(&mut self, name: &str, without_formatting: bool) -> Value {
		if let Some(value) = self.values.get(name) {
			return value.clone();
		}

		let value = if let Some(post_field) = PostField::from_key(name) {
			self.post_field(post_field)
		} else if let Some(taxonomy) = name.strip_prefix(TAXONOMY_PREFIX) {
			self.term_ids(taxonomy)
		} else {
			self.site.field_value(&self.id, name, !without_formatting)
		};

		self.values.insert(name.to_string(), value.clone());

		value
	}

	fn post_field(&self, post_field: PostField) -> Value {
		let Some(post_id) = self.id.post_id() else {
			return Self::empty_post_field(post_field);
		};

		match post_field {
			PostField::Title => Value::from(self.site.post_title(post_id)),
			PostField::Excerpt => Value::from(self.site.excerpt(post_id)),
			PostField::Link => Value::from(self.site.permalink(post_id)),
			PostField::Thumbnail => Value::from(self.site.thumbnail_id(post_id)),
			PostField::TitleLink => {
				object(&[
					("url", Value::from(self.site.permalink(post_id))),
					("title", Value::from(self.site.post_title(post_id))),
				])
			}
			PostField::ThumbnailLink => {
				object(&[
					("image_id", Value::from(self.site.thumbnail_id(post_id))),
					("permalink", Value::from(self.site.permalink(post_id))),
				])
			}
			PostField::Author => {
				let author = self
					.site
					.post_author(post_id)
					.and_then(|user_id| self.site.user(user_id));
				let (url, title) = match author {
					Some(user) => (self.site.author_url(user.id), user.display_name),
					None => (self.site.author_url(0), String::new()),
				};

				object(&[("url", Value::from(url)), ("title", Value::from(title))])
			}
			PostField::Date => {
				let date = self.site.post_date(post_id);
				Value::from(date.map(|date| self.dates.format_site_date(&date)).unwrap_or_default())
			}
			PostField::Modified => {
				let date = self.site.post_modified(post_id);
				Value::from(date.map(|date| self.dates.format_site_date(&date)).unwrap_or_default())
			}
		}
	}

	fn empty_post_field(post_field: PostField) -> Value {
		match post_field {
			PostField::Thumbnail => Value::from(0),
			PostField::TitleLink | PostField::Author => {
				object(&[("url", Value::from("")), ("title", Value::from(""))])
			}
			PostField::ThumbnailLink => {
				object(&[("image_id", Value::from(0)), ("permalink", Value::from(0))])
			}
			_ => Value::from(""),
		}
	}

	fn term_ids(&self, taxonomy: &str) -> Value {
		let Some(post_id) = self.id.post_id() else {
			return Value::Array(Vec::new());
		};

		Value::from(self.site.post_terms(post_id, taxonomy))
	}
}
