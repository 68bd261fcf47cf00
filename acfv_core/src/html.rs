//! Escaping helpers and the fixed view templates.

/// Escape text for use inside an element.
pub fn esc_html(text: &str) -> String {
	html_escape::encode_quoted_attribute(text).into_owned()
}

/// Escape text for use inside a quoted attribute value.
pub fn esc_attr(text: &str) -> String {
	html_escape::encode_quoted_attribute(text).into_owned()
}

/// Remove the tab, newline and carriage return characters used to indent
/// preview markup.
pub fn strip_whitespace(markup: &str) -> String {
	markup.replace(['\t', '\n', '\r'], "")
}

const NEW_LINE: &str = "\r\n";

/// Outer wrapper of a view. `{object-id}` is left in place and substituted
/// once the data object is known.
pub fn view_wrapper(view_id: u64, classes: &str, content: &str) -> String {
	let classes = classes.trim();
	let classes = if classes.is_empty() {
		String::new()
	} else {
		format!(" {classes}")
	};

	format!(
		"<div class=\"acf-view acf-view--id--{} acf-view--object-id--{{object-id}}\">{NEW_LINE}{content}</div>{NEW_LINE}",
		esc_attr(&format!("{view_id}{classes}"))
	)
}

/// A labelled row holding one field slot.
pub fn view_row(tabs: &str, class: &str, label: &str, field: &str) -> String {
	let mut row = format!("{tabs}<div class=\"acf-view__row {}\">{NEW_LINE}", esc_attr(class));

	if !label.is_empty() {
		row.push_str(&format!(
			"{tabs}\t<div class=\"acf-view__label\">{}</div>{NEW_LINE}",
			esc_html(label)
		));
	}

	row.push_str(&format!(
		"{tabs}\t<div class=\"acf-view__field\">{}</div>{NEW_LINE}",
		esc_html(field)
	));
	row.push_str(&format!("{tabs}</div>{NEW_LINE}"));

	row
}

/// Append `item`, preceded by a delimiter span when `delimiter` is set and
/// `markup` already has content.
pub(crate) fn push_delimited(markup: &mut String, delimiter: &str, item: &str) {
	if !delimiter.is_empty() && !markup.is_empty() {
		markup.push_str(&format!("<span class='acf-view__delimiter'>{delimiter}</span>"));
	}

	markup.push_str(item);
}
