use serde::Deserialize;
use serde::Serialize;

use crate::CardData;
use crate::FieldMeta;
use crate::site::FieldSchema;
use crate::site::PostQuery;

/// A post query, in the argument shape of the host's query engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuerySpec {
	/// Always `ids`.
	pub fields: String,
	pub post_type: Vec<String>,
	pub post_status: Vec<String>,
	/// `-1` is unlimited.
	pub posts_per_page: i64,
	pub order: String,
	pub orderby: String,
	pub ignore_sticky_posts: bool,
	#[serde(rename = "post__in", default, skip_serializing_if = "Vec::is_empty")]
	pub post_in: Vec<u64>,
	#[serde(rename = "post__not_in", default, skip_serializing_if = "Vec::is_empty")]
	pub post_not_in: Vec<u64>,
	/// Storage name of the field used for `meta_value` ordering.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub meta_key: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub paged: Option<u64>,
}

/// Raw output of a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
	/// Matches across all pages.
	pub found_posts: u64,
	/// Ids of the requested page.
	pub ids: Vec<u64>,
}

/// Ids of one page of card results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostsData {
	/// `0` when the page size is unbounded.
	pub pages_amount: u64,
	pub post_ids: Vec<u64>,
}

/// Turns card filters into query specifications and runs them.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryBuilder;

impl QueryBuilder {
	pub fn query_spec<S: FieldSchema + ?Sized>(
		&self,
		card: &CardData,
		page_number: u64,
		schema: &S,
	) -> QuerySpec {
		let (posts_per_page, paged) = if card.is_with_pagination {
			(card.pagination_per_page, Some(page_number.max(1)))
		} else {
			(card.limit, None)
		};

		let meta_key = if card.is_order_by_meta() {
			let meta = FieldMeta::resolve(card.order_by_meta_acf_field_id(), schema);
			if meta.exists() {
				Some(meta.name().to_string())
			} else {
				tracing::debug!(
					card = card.id,
					field = card.order_by_meta_acf_field_id(),
					"meta order field no longer exists"
				);
				None
			}
		} else {
			None
		};

		QuerySpec {
			fields: "ids".to_string(),
			post_type: card.post_types.clone(),
			post_status: card.post_statuses.clone(),
			posts_per_page,
			order: card.order.clone(),
			orderby: card.order_by.clone(),
			ignore_sticky_posts: card.is_ignore_sticky_posts,
			post_in: card.post_in.clone(),
			post_not_in: card.post_not_in.clone(),
			meta_key,
			paged,
		}
	}

	pub fn execute<Q: PostQuery + ?Sized>(&self, spec: &QuerySpec, query: &Q) -> PostsData {
		let result = query.run(spec);
		let pages_amount = pages_amount(result.found_posts, spec.posts_per_page);

		tracing::debug!(
			found = result.found_posts,
			page_size = spec.posts_per_page,
			pages = pages_amount,
			"executed card query"
		);

		PostsData {
			pages_amount,
			post_ids: result.ids,
		}
	}

	pub fn posts_data<S: FieldSchema + PostQuery + ?Sized>(
		&self,
		card: &CardData,
		page_number: u64,
		site: &S,
	) -> PostsData {
		let spec = self.query_spec(card, page_number, site);
		self.execute(&spec, site)
	}
}

/// `ceil(found / per_page)`, or `0` when the page size is not positive.
pub fn pages_amount(found_posts: u64, posts_per_page: i64) -> u64 {
	match u64::try_from(posts_per_page) {
		Ok(per_page) if per_page > 0 => found_posts.div_ceil(per_page),
		_ => 0,
	}
}
