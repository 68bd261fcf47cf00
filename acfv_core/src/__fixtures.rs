use serde_json::Value;
use serde_json::json;

use crate::AcfvConfig;
use crate::Field;
use crate::FieldMeta;
use crate::JsonSite;
use crate::Renderer;
use crate::SiteDocument;
use crate::site::FieldObject;

pub const HOME_URL: &str = "https://example.com";

/// Field schema of the test site.
pub fn field_groups() -> Value {
	json!([
		{
			"key": "group_book",
			"title": "Book",
			"fields": [
				{ "key": "field_subtitle", "name": "subtitle", "label": "Subtitle", "type": "text" },
				{ "key": "field_summary", "name": "summary", "label": "Summary", "type": "textarea" },
				{ "key": "field_cover", "name": "cover", "label": "Cover", "type": "image", "returnFormat": "id" },
				{
					"key": "field_genre",
					"name": "genre",
					"label": "Genre",
					"type": "checkbox",
					"returnFormat": "value",
					"choices": { "sf": "Science fiction", "fantasy": "Fantasy" }
				},
				{ "key": "field_in_stock", "name": "in_stock", "label": "In stock", "type": "true_false" },
				{
					"key": "field_released",
					"name": "released",
					"label": "Released",
					"type": "date_picker",
					"displayFormat": "F j, Y"
				},
				{
					"key": "field_related",
					"name": "related",
					"label": "Related",
					"type": "relationship",
					"returnFormat": "id"
				},
				{ "key": "field_location", "name": "location", "label": "Location", "type": "google_map" },
				{ "key": "field_rating", "name": "rating", "label": "Rating", "type": "number" },
				{ "key": "field_legacy", "name": "legacy", "label": "Legacy", "type": "flexible_content" },
				{
					"key": "field_chapters",
					"name": "chapters",
					"label": "Chapters",
					"type": "repeater",
					"subFields": [
						{ "key": "field_chapter_title", "name": "chapter_title", "label": "Chapter title", "type": "text" },
						{ "key": "field_chapter_parts", "name": "chapter_parts", "label": "Parts", "type": "repeater" }
					]
				}
			]
		},
		{
			"key": "local_acf_views_view",
			"title": "View settings",
			"fields": [{ "key": "field_view_items", "name": "items", "label": "Items", "type": "repeater" }]
		},
		{
			"key": "group_internal",
			"title": "Internal",
			"private": true,
			"fields": [{ "key": "field_secret", "name": "secret", "label": "Secret", "type": "text" }]
		}
	])
}

/// Published books plus a draft. Book 3 is sticky.
pub fn book_posts() -> Vec<Value> {
	vec![
		json!({
			"id": 1,
			"title": "Dune",
			"slug": "dune",
			"date": "2024-03-05 10:00:00",
			"modified": "2024-04-01 08:30:00",
			"author": 1,
			"thumbnail": 50,
			"menuOrder": 3,
			"terms": { "category": [5] },
			"fields": {
				"subtitle": "Desert planet",
				"summary": "Line one\nLine <two>",
				"cover": 50,
				"genre": ["sf", "fantasy"],
				"in_stock": false,
				"released": "20240305",
				"related": [2],
				"rating": "4.5"
			}
		}),
		json!({
			"id": 2,
			"title": "Emma",
			"slug": "emma",
			"date": "2024-01-01 09:00:00",
			"author": 2,
			"menuOrder": 1,
			"fields": { "subtitle": "", "in_stock": true, "related": [1], "rating": "10" }
		}),
		json!({
			"id": 3,
			"title": "Arrival",
			"slug": "arrival",
			"date": "2024-02-01 09:00:00",
			"sticky": true,
			"menuOrder": 2,
			"fields": { "subtitle": "Heptapods", "rating": "9" }
		}),
		json!({ "id": 4, "title": "Unfinished", "status": "draft" }),
	]
}

/// The test site document with `extra` posts (views and cards) appended.
pub fn site_document(extra: Vec<Value>) -> Value {
	let mut posts = book_posts();
	posts.extend(extra);

	json!({
		"settings": { "homeUrl": HOME_URL },
		"posts": posts,
		"fieldGroups": field_groups(),
		"taxonomies": [{ "name": "category", "label": "Categories" }],
		"terms": [{ "id": 5, "taxonomy": "category", "name": "Novels", "slug": "novels" }],
		"users": [
			{ "id": 1, "displayName": "Ann Author", "slug": "ann", "roles": ["editor"] },
			{ "id": 2, "displayName": "Sam Reader", "slug": "sam", "roles": ["subscriber"] }
		],
		"attachments": [{
			"id": 50,
			"title": "Dune cover",
			"url": "https://example.com/cover.jpg",
			"alt": "A cover",
			"width": 600,
			"height": 800,
			"sizes": { "thumbnail": "https://example.com/cover-150.jpg" }
		}],
		"options": { "subtitle": "Site wide" },
		"userFields": { "1": { "subtitle": "Ann subtitle" } }
	})
}

pub fn site_with(extra: Vec<Value>) -> JsonSite {
	let document: SiteDocument =
		serde_json::from_value(site_document(extra)).expect("site document is valid");
	JsonSite::new(document)
}

pub fn site() -> JsonSite {
	site_with(Vec::new())
}

/// A stored view definition.
pub fn view_post(id: u64, definition: Value) -> Value {
	json!({ "id": id, "postType": "acf_views", "content": definition })
}

/// A stored card definition.
pub fn card_post(id: u64, definition: Value) -> Value {
	json!({ "id": id, "postType": "acf_cards", "content": definition })
}

/// A view item bound to `key` with the local id `id`.
pub fn item(key: &str, id: &str, label: &str) -> Value {
	json!({ "field": { "key": key, "id": id, "label": label } })
}

/// View `100` showing the subtitle of a book.
pub fn subtitle_view() -> Value {
	view_post(100, json!({ "items": [item("group_book|field_subtitle", "subtitle", "Subtitle")] }))
}

pub fn renderer(site: &JsonSite) -> Renderer<'_, JsonSite> {
	Renderer::new(site, AcfvConfig::default())
}

pub fn field_object(key: &str, name: &str, field_type: &str, return_format: &str) -> FieldObject {
	FieldObject {
		key: key.to_string(),
		name: name.to_string(),
		label: name.to_string(),
		field_type: field_type.to_string(),
		return_format: return_format.to_string(),
		..FieldObject::default()
	}
}

pub fn meta(field_type: &str, return_format: &str) -> FieldMeta {
	FieldMeta::from_object("field_test", &field_object("field_test", "test", field_type, return_format))
}

pub fn field() -> Field {
	Field {
		key: "group_book|field_test".to_string(),
		id: "test".to_string(),
		..Field::default()
	}
}

/// A minified row as produced by the generated skeleton.
pub fn row(id: &str, label: &str, content: &str) -> String {
	let label = if label.is_empty() {
		String::new()
	} else {
		format!("<div class=\"acf-view__label\">{label}</div>")
	};

	format!(
		"<div class=\"acf-view__row acf-view__{id}\">{label}<div \
		 class=\"acf-view__field\">{content}</div></div>"
	)
}

/// A minified view wrapper.
pub fn view_html(view_id: u64, object_id: &str, content: &str) -> String {
	format!(
		"<div class=\"acf-view acf-view--id--{view_id} \
		 acf-view--object-id--{object_id}\">{content}</div>"
	)
}

/// A minified card wrapper without pagination.
pub fn card_html(card_id: u64, items: &str) -> String {
	format!(
		"<div class=\"acf-card acf-card--id--{card_id}\"><div class=\"acf-card__items\">{items}</div></div>"
	)
}
