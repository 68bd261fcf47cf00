mod common;

use acfv_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;
use rstest::rstest;
use serde_json::Value;
use similar_asserts::assert_eq;

#[test]
fn card_renders_first_page() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path())?;

	common::acfv_cmd()
		.arg("card")
		.arg("20")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::starts_with(
			"<div class=\"acf-card acf-card--id--20\"><div class=\"acf-card__items\"><div \
			 class=\"acf-view acf-view--id--10 acf-view--object-id--1\">",
		))
		.stdout(predicates::str::contains(
			"<button class=\"acf-card__load-more\" data-card-id=\"20\" \
			 data-pages-amount=\"2\">Load more</button>",
		))
		.stdout(predicates::str::contains("Regency").not());

	Ok(())
}

#[test]
fn card_renders_later_pages_without_wrapper() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path())?;

	common::acfv_cmd()
		.arg("card")
		.arg("20")
		.arg("--page")
		.arg("2")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::starts_with(
			"<div class=\"acf-view acf-view--id--10 acf-view--object-id--2\">",
		))
		.stdout(predicates::str::contains("Regency"))
		.stdout(predicates::str::contains("acf-card__items").not());

	Ok(())
}

#[rstest]
#[case::later_page(&["card", "999", "--page", "2"])]
#[case::query(&["query", "999"])]
#[case::layout(&["layout", "999"])]
fn unknown_card_fails(#[case] args: &[&str]) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path())?;

	common::acfv_cmd()
		.args(args)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure()
		.code(2)
		.stderr(predicates::str::contains("unknown card"));

	Ok(())
}

#[test]
fn unknown_card_shortcode_prints_inline_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path())?;

	common::acfv_cmd()
		.arg("card")
		.arg("10")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"Shortcode error: card-id attribute is missing or wrong (acf_cards card-id=\"10\")",
		));

	Ok(())
}

#[test]
fn query_prints_json_spec() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path())?;

	let output = common::acfv_cmd()
		.arg("query")
		.arg("20")
		.arg("--page")
		.arg("2")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();

	let spec: Value = serde_json::from_slice(&output)?;
	assert_eq!(spec["fields"], "ids");
	assert_eq!(spec["posts_per_page"], 1);
	assert_eq!(spec["paged"], 2);
	assert_eq!(spec["orderby"], "ID");
	assert!(spec.get("post__in").is_none());

	Ok(())
}

#[test]
fn layout_prints_generated_css() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path())?;

	common::acfv_cmd()
		.arg("layout")
		.arg("20")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::starts_with("/*BEGIN LAYOUT_RULES*/\n"))
		.stdout(predicates::str::contains(" grid-row-gap:8px;"))
		.stdout(predicates::str::ends_with("/*END LAYOUT_RULES*/\n"));

	Ok(())
}

#[test]
fn no_subcommand_exits_with_usage_hint() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path())?;

	common::acfv_cmd()
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure()
		.code(1)
		.stderr(predicates::str::contains("acfv --help"));

	Ok(())
}
