//! Contracts with the content platform.
//!
//! The rendering pipeline never talks to a database. Everything it needs is
//! obtained through the traits in this module, which a host implements (see
//! [`JsonSite`](crate::JsonSite) for a document-backed implementation).

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::DataObjectId;
use crate::QueryResult;
use crate::QuerySpec;

/// Post type of persisted view definitions.
pub const VIEW_POST_TYPE: &str = "acf_views";
/// Post type of persisted card definitions.
pub const CARD_POST_TYPE: &str = "acf_cards";
pub const PUBLISH_STATUS: &str = "publish";

/// A persisted content item as seen by the definition cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPost {
	pub id: u64,
	pub post_type: String,
	pub status: String,
	/// Raw post body. For views and cards this is the JSON definition.
	pub content: String,
}

impl StoredPost {
	pub fn is_published(&self) -> bool {
		self.status == PUBLISH_STATUS
	}
}

/// Schema information for one custom field, as the field storage layer
/// describes it.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldObject {
	pub key: String,
	pub name: String,
	pub label: String,
	#[serde(rename = "type")]
	pub field_type: String,
	pub return_format: String,
	pub choices: BTreeMap<String, String>,
	pub display_format: String,
	pub multiple: bool,
	/// UI variant, e.g. `checkbox` or `select` for taxonomy fields.
	pub appearance: String,
	pub sub_fields: Vec<FieldObject>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldGroup {
	pub key: String,
	pub title: String,
	pub private: bool,
	pub fields: Vec<FieldObject>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Taxonomy {
	pub name: String,
	pub label: String,
}

/// Media library entry.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Attachment {
	pub id: u64,
	pub title: String,
	pub url: String,
	pub alt: String,
	pub width: u32,
	pub height: u32,
	/// Image URL per registered size name.
	pub sizes: BTreeMap<String, String>,
}

impl Attachment {
	/// URL of the given size, falling back to the original file.
	pub fn url_for(&self, size: &str) -> &str {
		self.sizes.get(size).map_or(self.url.as_str(), String::as_str)
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Term {
	pub id: u64,
	pub taxonomy: String,
	pub name: String,
	pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
	pub id: u64,
	pub display_name: String,
	pub roles: Vec<String>,
}

/// Stored post lookup.
pub trait Storage {
	fn stored_post(&self, id: u64) -> Option<StoredPost>;
}

/// Custom field schema lookup.
pub trait FieldSchema {
	/// Schema of a field by its key (`field_abc123`).
	fn field_object(&self, key: &str) -> Option<FieldObject>;
	/// All field groups.
	fn field_groups(&self) -> Vec<FieldGroup>;
	fn taxonomies(&self) -> Vec<Taxonomy>;
}

/// Read access to content and field values.
pub trait Content {
	fn post_title(&self, post_id: u64) -> String;
	fn permalink(&self, post_id: u64) -> String;
	fn excerpt(&self, post_id: u64) -> String;
	fn post_date(&self, post_id: u64) -> Option<NaiveDateTime>;
	fn post_modified(&self, post_id: u64) -> Option<NaiveDateTime>;
	fn post_author(&self, post_id: u64) -> Option<u64>;
	/// Featured image attachment id, `0` when unset.
	fn thumbnail_id(&self, post_id: u64) -> u64;
	/// Term ids assigned to the post in `taxonomy`.
	fn post_terms(&self, post_id: u64, taxonomy: &str) -> Vec<u64>;
	/// Value of a custom field on a data object. With `formatted` unset the
	/// raw stored form is returned.
	fn field_value(&self, object: &DataObjectId, name: &str, formatted: bool) -> Value;
	fn attachment(&self, id: u64) -> Option<Attachment>;
	fn term(&self, id: u64) -> Option<Term>;
	fn user(&self, id: u64) -> Option<User>;
	/// Archive URL of an author.
	fn author_url(&self, user_id: u64) -> String;
}

/// Post query execution.
pub trait PostQuery {
	fn run(&self, spec: &QuerySpec) -> QueryResult;
}

/// Everything the renderer needs from the host platform.
pub trait Site: Storage + FieldSchema + Content + PostQuery {}

impl<T: Storage + FieldSchema + Content + PostQuery + ?Sized> Site for T {}
