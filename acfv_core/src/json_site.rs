//! A [`Site`](crate::site::Site) backed by a single JSON document.
//!
//! ```json
//! {
//!   "settings": { "homeUrl": "https://example.com" },
//!   "posts": [
//!     { "id": 10, "postType": "acf_views", "content": { "items": [] } },
//!     { "id": 1, "title": "Hello", "slug": "hello", "fields": { "color": "#ff0000" } }
//!   ],
//!   "fieldGroups": [{ "key": "group_1", "title": "Details", "fields": [] }],
//!   "users": [{ "id": 1, "displayName": "Ann", "slug": "ann", "roles": ["editor"] }]
//! }
//! ```
//!
//! Custom field values are stored by field name in the shape the field
//! returns, so `fields.picture` of an image field with the `array` return
//! format holds an object with `url`, `alt` and friends.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::AcfvError;
use crate::AcfvResult;
use crate::DataObjectId;
use crate::QueryResult;
use crate::QuerySpec;
use crate::site::Attachment;
use crate::site::Content;
use crate::site::FieldGroup;
use crate::site::FieldObject;
use crate::site::FieldSchema;
use crate::site::PUBLISH_STATUS;
use crate::site::PostQuery;
use crate::site::Storage;
use crate::site::StoredPost;
use crate::site::Taxonomy;
use crate::site::Term;
use crate::site::User;
use crate::value::to_text;

const DEFAULT_POST_TYPE: &str = "post";

/// The on-disk document.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteDocument {
	pub settings: SiteSettings,
	pub posts: Vec<PostRecord>,
	pub field_groups: Vec<FieldGroup>,
	pub taxonomies: Vec<Taxonomy>,
	pub terms: Vec<TermRecord>,
	pub users: Vec<UserRecord>,
	pub attachments: Vec<Attachment>,
	/// Values of option page fields, by field name.
	pub options: Map<String, Value>,
	/// Values of user profile fields, by user id then field name.
	pub user_fields: BTreeMap<String, Map<String, Value>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteSettings {
	pub home_url: String,
}

impl Default for SiteSettings {
	fn default() -> Self {
		Self {
			home_url: "http://localhost".to_string(),
		}
	}
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PostRecord {
	pub id: u64,
	pub post_type: String,
	pub status: String,
	/// The body. View and card definitions may be written as JSON objects.
	pub content: Value,
	pub title: String,
	pub slug: String,
	pub excerpt: String,
	/// `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD`.
	pub date: String,
	pub modified: String,
	pub author: u64,
	pub parent: u64,
	pub thumbnail: u64,
	pub menu_order: i64,
	pub comment_count: u64,
	pub sticky: bool,
	/// Term ids by taxonomy name.
	pub terms: BTreeMap<String, Vec<u64>>,
	/// Custom field values by field name.
	pub fields: Map<String, Value>,
}

impl Default for PostRecord {
	fn default() -> Self {
		Self {
			id: 0,
			post_type: DEFAULT_POST_TYPE.to_string(),
			status: PUBLISH_STATUS.to_string(),
			content: Value::String(String::new()),
			title: String::new(),
			slug: String::new(),
			excerpt: String::new(),
			date: String::new(),
			modified: String::new(),
			author: 0,
			parent: 0,
			thumbnail: 0,
			menu_order: 0,
			comment_count: 0,
			sticky: false,
			terms: BTreeMap::new(),
			fields: Map::new(),
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TermRecord {
	pub id: u64,
	pub taxonomy: String,
	pub name: String,
	pub slug: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserRecord {
	pub id: u64,
	pub display_name: String,
	pub slug: String,
	pub roles: Vec<String>,
}

/// An indexed [`SiteDocument`].
#[derive(Debug, Clone, Default)]
pub struct JsonSite {
	document: SiteDocument,
	posts: HashMap<u64, usize>,
	terms: HashMap<u64, usize>,
	users: HashMap<u64, usize>,
	attachments: HashMap<u64, usize>,
	field_objects: HashMap<String, FieldObject>,
}

impl JsonSite {
	/// Read and index the document at `path`.
	pub fn load(path: &Path) -> AcfvResult<Self> {
		let content = std::fs::read_to_string(path)?;
		let site = Self::parse(&content).map_err(|reason| {
			AcfvError::SiteDocument {
				path: path.display().to_string(),
				reason,
			}
		})?;

		tracing::debug!(
			path = %path.display(),
			posts = site.document.posts.len(),
			"loaded site document"
		);

		Ok(site)
	}

	fn parse(content: &str) -> Result<Self, String> {
		let document: SiteDocument = serde_json::from_str(content).map_err(|e| e.to_string())?;
		Ok(Self::new(document))
	}

	pub fn new(document: SiteDocument) -> Self {
		let index = |ids: Vec<u64>| {
			ids.into_iter()
				.enumerate()
				.map(|(position, id)| (id, position))
				.collect::<HashMap<_, _>>()
		};

		let mut field_objects = HashMap::new();
		for group in &document.field_groups {
			collect_field_objects(&group.fields, &mut field_objects);
		}

		Self {
			posts: index(document.posts.iter().map(|post| post.id).collect()),
			terms: index(document.terms.iter().map(|term| term.id).collect()),
			users: index(document.users.iter().map(|user| user.id).collect()),
			attachments: index(document.attachments.iter().map(|file| file.id).collect()),
			field_objects,
			document,
		}
	}

	pub fn document(&self) -> &SiteDocument {
		&self.document
	}

	pub fn home_url(&self) -> &str {
		self.document.settings.home_url.trim_end_matches('/')
	}

	fn post(&self, id: u64) -> Option<&PostRecord> {
		self.posts.get(&id).map(|position| &self.document.posts[*position])
	}

	fn user_record(&self, id: u64) -> Option<&UserRecord> {
		self.users.get(&id).map(|position| &self.document.users[*position])
	}

	/// Stored values of a data object.
	fn field_values(&self, object: &DataObjectId) -> Option<&Map<String, Value>> {
		match object {
			DataObjectId::Post(id) => self.post(*id).map(|post| &post.fields),
			DataObjectId::Options => Some(&self.document.options),
			DataObjectId::User(id) => self.document.user_fields.get(&id.to_string()),
		}
	}
}

fn matches(post: &PostRecord, spec: &QuerySpec) -> bool {
	let is_type = if spec.post_type.is_empty() {
		post.post_type == DEFAULT_POST_TYPE
	} else {
		spec.post_type
			.iter()
			.any(|post_type| post_type == "any" || *post_type == post.post_type)
	};

	let is_status = if spec.post_status.is_empty() {
		post.status == PUBLISH_STATUS
	} else {
		spec.post_status
			.iter()
			.any(|status| status == "any" || *status == post.status)
	};

	is_type
		&& is_status
		&& (spec.post_in.is_empty() || spec.post_in.contains(&post.id))
		&& !spec.post_not_in.contains(&post.id)
}

fn compare(a: &PostRecord, b: &PostRecord, spec: &QuerySpec) -> Ordering {
	let meta = |post: &PostRecord| {
		spec.meta_key
			.as_ref()
			.and_then(|key| post.fields.get(key))
			.map(to_text)
			.unwrap_or_default()
	};

	match spec.orderby.as_str() {
		"ID" => a.id.cmp(&b.id),
		"title" => a.title.cmp(&b.title),
		"name" => a.slug.cmp(&b.slug),
		"date" => a.date.cmp(&b.date),
		"modified" => a.modified.cmp(&b.modified),
		"menu_order" => a.menu_order.cmp(&b.menu_order),
		"author" => a.author.cmp(&b.author),
		"type" => a.post_type.cmp(&b.post_type),
		"parent" => a.parent.cmp(&b.parent),
		"comment_count" => a.comment_count.cmp(&b.comment_count),
		"meta_value" => meta(a).cmp(&meta(b)),
		"meta_value_num" => {
			let number = |post: &PostRecord| meta(post).trim().parse::<f64>().unwrap_or(0.0);
			number(a).total_cmp(&number(b))
		}
		"post__in" => {
			let position = |post: &PostRecord| spec.post_in.iter().position(|id| *id == post.id);
			position(a).cmp(&position(b))
		}
		// `none` and `rand` keep the stored order
		_ => Ordering::Equal,
	}
}

fn collect_field_objects(fields: &[FieldObject], target: &mut HashMap<String, FieldObject>) {
	for field in fields {
		target.insert(field.key.clone(), field.clone());
		collect_field_objects(&field.sub_fields, target);
	}
}

fn parse_post_date(raw: &str) -> Option<NaiveDateTime> {
	let raw = raw.trim();
	NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
		.ok()
		.or_else(|| {
			NaiveDate::parse_from_str(raw, "%Y-%m-%d")
				.ok()
				.and_then(|date| date.and_hms_opt(0, 0, 0))
		})
}

impl Storage for JsonSite {
	fn stored_post(&self, id: u64) -> Option<StoredPost> {
		self.post(id).map(|post| {
			let content = match &post.content {
				Value::String(content) => content.clone(),
				Value::Null => String::new(),
				other => other.to_string(),
			};

			StoredPost {
				id: post.id,
				post_type: post.post_type.clone(),
				status: post.status.clone(),
				content,
			}
		})
	}
}

impl FieldSchema for JsonSite {
	fn field_object(&self, key: &str) -> Option<FieldObject> {
		self.field_objects.get(key).cloned()
	}

	fn field_groups(&self) -> Vec<FieldGroup> {
		self.document.field_groups.clone()
	}

	fn taxonomies(&self) -> Vec<Taxonomy> {
		self.document.taxonomies.clone()
	}
}

impl Content for JsonSite {
	fn post_title(&self, post_id: u64) -> String {
		self.post(post_id).map(|post| post.title.clone()).unwrap_or_default()
	}

	fn permalink(&self, post_id: u64) -> String {
		let Some(post) = self.post(post_id) else {
			return String::new();
		};

		if post.slug.is_empty() {
			format!("{}/?p={}", self.home_url(), post.id)
		} else {
			format!("{}/{}/", self.home_url(), post.slug)
		}
	}

	fn excerpt(&self, post_id: u64) -> String {
		self.post(post_id).map(|post| post.excerpt.clone()).unwrap_or_default()
	}

	fn post_date(&self, post_id: u64) -> Option<NaiveDateTime> {
		self.post(post_id).and_then(|post| parse_post_date(&post.date))
	}

	fn post_modified(&self, post_id: u64) -> Option<NaiveDateTime> {
		self.post(post_id).and_then(|post| parse_post_date(&post.modified))
	}

	fn post_author(&self, post_id: u64) -> Option<u64> {
		self.post(post_id)
			.map(|post| post.author)
			.filter(|author| *author > 0)
	}

	fn thumbnail_id(&self, post_id: u64) -> u64 {
		self.post(post_id).map_or(0, |post| post.thumbnail)
	}

	fn post_terms(&self, post_id: u64, taxonomy: &str) -> Vec<u64> {
		self.post(post_id)
			.and_then(|post| post.terms.get(taxonomy))
			.cloned()
			.unwrap_or_default()
	}

	fn field_value(&self, object: &DataObjectId, name: &str, _formatted: bool) -> Value {
		let Some(values) = self.field_values(object) else {
			return Value::Null;
		};

		let storage_name = self
			.field_objects
			.get(name)
			.map_or(name, |field| field.name.as_str());

		values
			.get(storage_name)
			.or_else(|| values.get(name))
			.cloned()
			.unwrap_or(Value::Null)
	}

	fn attachment(&self, id: u64) -> Option<Attachment> {
		self.attachments
			.get(&id)
			.map(|position| self.document.attachments[*position].clone())
	}

	fn term(&self, id: u64) -> Option<Term> {
		self.terms.get(&id).map(|position| {
			let record = &self.document.terms[*position];
			Term {
				id: record.id,
				taxonomy: record.taxonomy.clone(),
				name: record.name.clone(),
				link: format!("{}/{}/{}/", self.home_url(), record.taxonomy, record.slug),
			}
		})
	}

	fn user(&self, id: u64) -> Option<User> {
		self.user_record(id).map(|record| {
			User {
				id: record.id,
				display_name: record.display_name.clone(),
				roles: record.roles.clone(),
			}
		})
	}

	fn author_url(&self, user_id: u64) -> String {
		match self.user_record(user_id) {
			Some(user) if !user.slug.is_empty() => format!("{}/author/{}/", self.home_url(), user.slug),
			_ => format!("{}/?author={user_id}", self.home_url()),
		}
	}
}

impl PostQuery for JsonSite {
	fn run(&self, spec: &QuerySpec) -> QueryResult {
		let mut posts: Vec<&PostRecord> = self
			.document
			.posts
			.iter()
			.filter(|post| matches(post, spec))
			.collect();

		let is_descending = spec.order.eq_ignore_ascii_case("DESC") && spec.orderby != "post__in";
		posts.sort_by(|a, b| {
			let ordering = compare(a, b, spec);
			if is_descending { ordering.reverse() } else { ordering }
		});

		if !spec.ignore_sticky_posts {
			// stable, so the sorted order holds within both partitions
			posts.sort_by_key(|post| !post.sticky);
		}

		let found_posts = posts.len() as u64;
		let ids = match usize::try_from(spec.posts_per_page) {
			Ok(per_page) if per_page > 0 => {
				// a page past the addressable range is empty
				let offset = usize::try_from(spec.paged.unwrap_or(1).max(1) - 1)
					.ok()
					.and_then(|skipped| skipped.checked_mul(per_page));

				match offset {
					Some(offset) => {
						posts
							.iter()
							.skip(offset)
							.take(per_page)
							.map(|post| post.id)
							.collect()
					}
					None => Vec::new(),
				}
			}
			_ => posts.iter().map(|post| post.id).collect(),
		};

		QueryResult { found_posts, ids }
	}
}

impl std::str::FromStr for JsonSite {
	type Err = AcfvError;

	fn from_str(content: &str) -> Result<Self, Self::Err> {
		Self::parse(content).map_err(|reason| {
			AcfvError::SiteDocument {
				path: "<inline>".to_string(),
				reason,
			}
		})
	}
}

