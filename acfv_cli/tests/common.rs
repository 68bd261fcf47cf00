use std::path::Path;

use assert_cmd::Command;
use serde_json::json;

pub fn acfv_cmd() -> Command {
	let mut cmd = Command::new(env!("CARGO_BIN_EXE_acfv"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("RUST_LOG");
	cmd
}

/// Write `site.json` and an `acfv.toml` pointing at it into `root`.
pub fn write_project(root: &Path) -> std::io::Result<()> {
	let site = json!({
		"settings": { "homeUrl": "https://example.com" },
		"posts": [
			{ "id": 1, "title": "Dune", "slug": "dune", "fields": { "subtitle": "Desert planet" } },
			{ "id": 2, "title": "Emma", "slug": "emma", "fields": { "subtitle": "Regency" } },
			{
				"id": 10,
				"postType": "acf_views",
				"content": {
					"cssCode": "#view { color: red; }",
					"items": [{ "field": { "key": "group_book|field_subtitle", "id": "subtitle", "label": "Subtitle" } }]
				}
			},
			{
				"id": 20,
				"postType": "acf_cards",
				"content": {
					"acfViewId": 10,
					"orderBy": "ID",
					"isWithPagination": true,
					"paginationPerPage": 1,
					"isUseLayoutCss": true,
					"layoutRules": [{ "screen": "mobile", "layout": "column", "verticalGap": "8px" }]
				}
			}
		],
		"fieldGroups": [{
			"key": "group_book",
			"title": "Book",
			"fields": [{ "key": "field_subtitle", "name": "subtitle", "label": "Subtitle", "type": "text" }]
		}],
		"options": { "subtitle": "Site wide" }
	});

	std::fs::write(root.join("site.json"), site.to_string())?;
	std::fs::write(root.join("acfv.toml"), "[site]\ndata = \"site.json\"\n")?;

	Ok(())
}
