mod common;

use acfv_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;

#[test]
fn view_renders_fields_of_a_post() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path())?;

	common::acfv_cmd()
		.arg("view")
		.arg("10")
		.arg("--object-id")
		.arg("1")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::diff(
			"<div class=\"acf-view acf-view--id--10 acf-view--object-id--1\"><div class=\"acf-view__row \
			 acf-view__subtitle\"><div class=\"acf-view__label\">Subtitle</div><div \
			 class=\"acf-view__field\">Desert planet</div></div></div>\n",
		));

	Ok(())
}

#[test]
fn view_reads_option_fields() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path())?;

	common::acfv_cmd()
		.arg("view")
		.arg("10")
		.arg("--object-id")
		.arg("options")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("acf-view--object-id--options"))
		.stdout(predicates::str::contains("Site wide"));

	Ok(())
}

#[test]
fn view_prints_inline_error_for_unknown_object() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path())?;

	common::acfv_cmd()
		.arg("view")
		.arg("10")
		.arg("--object-id")
		.arg("999")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"<p style='color:red;'>Shortcode error: object-id argument contains the wrong value",
		));

	Ok(())
}

#[test]
fn view_prints_inline_error_for_unknown_view() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path())?;

	common::acfv_cmd()
		.arg("view")
		.arg("1")
		.arg("--object-id")
		.arg("1")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"view-id attribute is missing or wrong (acf_views view-id=\"1\" object-id=\"1\")",
		));

	Ok(())
}

#[test]
fn skeleton_prints_markup_preview() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path())?;

	common::acfv_cmd()
		.arg("skeleton")
		.arg("10")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::starts_with(
			"<div class=\"acf-view acf-view--id--10 acf-view--object-id--{object-id}\">\r\n",
		))
		.stdout(predicates::str::contains("\t<!--$subtitle$-->\r\n"))
		.stdout(predicates::str::contains("$subtitle$</div>"));

	Ok(())
}

#[test]
fn fields_lists_choices() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path())?;

	common::acfv_cmd()
		.arg("fields")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::starts_with("$post$|_post_title\tTitle\n"))
		.stdout(predicates::str::contains("group_book|field_subtitle\tSubtitle (text)\n"))
		.stdout(predicates::str::contains("\tSelect").not());

	Ok(())
}

#[test]
fn render_expands_shortcodes_and_prints_assets() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path())?;
	let page = tmp.path().join("page.html");
	std::fs::write(
		&page,
		"<head><!--acf-views-styles--></head><main>[acf_views view-id=\"10\" object-id=\"2\"]</main>",
	)?;

	common::acfv_cmd()
		.arg("render")
		.arg(&page)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::starts_with(
			"<head><style data-acf-views-css='css'>\n/*view-10*/\n.acf-view--id--10 { color: red; \
			 }</style></head><main>",
		))
		.stdout(predicates::str::contains("Regency"))
		.stdout(predicates::str::contains("[acf_views").not());

	Ok(())
}

#[test]
fn render_warns_without_shortcodes() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path())?;
	let page = tmp.path().join("plain.html");
	std::fs::write(&page, "<p>plain</p>")?;

	common::acfv_cmd()
		.arg("render")
		.arg(&page)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::diff("<p>plain</p>"))
		.stderr(predicates::str::contains("warning: no View or Card shortcodes found"));

	Ok(())
}

#[test]
fn missing_site_document_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::acfv_cmd()
		.arg("fields")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure()
		.code(2)
		.stderr(predicates::str::contains("no site document configured"));

	Ok(())
}

#[test]
fn site_flag_overrides_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path())?;
	let other = tempfile::tempdir()?;

	common::acfv_cmd()
		.arg("view")
		.arg("10")
		.arg("--object-id")
		.arg("1")
		.arg("--path")
		.arg(other.path())
		.arg("--site")
		.arg(tmp.path().join("site.json"))
		.assert()
		.success()
		.stdout(predicates::str::contains("Desert planet"));

	Ok(())
}

#[test]
fn invalid_config_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("acfv.toml"), "[site\ndata = ")?;

	common::acfv_cmd()
		.arg("fields")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure()
		.code(2)
		.stderr(predicates::str::contains("failed to parse config file"));

	Ok(())
}

#[test]
fn broken_site_document_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("site.json"), "{ \"posts\": 3 }")?;
	std::fs::write(tmp.path().join("acfv.toml"), "[site]\ndata = \"site.json\"\n")?;

	common::acfv_cmd()
		.arg("fields")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure()
		.code(2)
		.stderr(predicates::str::contains("failed to load site document"));

	Ok(())
}
