//! Shortcode attributes, text expansion helpers, role gating and the inline
//! error fragment.

use std::ops::Range;
use std::sync::LazyLock;

use derive_more::Deref;
use regex::Regex;

use crate::html::esc_attr;

/// Shortcode rendering a view.
pub const VIEW_SHORTCODE: &str = "acf_views";
/// Shortcode rendering a card.
pub const CARD_SHORTCODE: &str = "acf_cards";

static SHORTCODE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\[(acf_views|acf_cards)((?:\s[^\]]*?)?)\s*/?\]").expect("shortcode pattern is valid")
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"([\w-]+)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s'"\]]+))"#)
		.expect("attribute pattern is valid")
});

/// Attributes in their written order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct ShortcodeAttributes(Vec<(String, String)>);

impl ShortcodeAttributes {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add or replace an attribute.
	#[must_use]
	pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.set(name, value);
		self
	}

	pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
		let name = name.into();
		let value = value.into();

		match self.0.iter_mut().find(|(existing, _)| *existing == name) {
			Some(entry) => entry.1 = value,
			None => self.0.push((name, value)),
		}
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.0
			.iter()
			.find(|(existing, _)| existing == name)
			.map(|(_, value)| value.as_str())
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0
			.iter()
			.map(|(name, value)| (name.as_str(), value.as_str()))
	}

	/// Parse `name="value" other='value' bare=value` pairs. Names are
	/// lowercased.
	pub fn parse(text: &str) -> Self {
		let mut attributes = Self::new();

		for captures in ATTRIBUTE.captures_iter(text) {
			let Some(name) = captures.get(1) else {
				continue;
			};
			let value = captures
				.get(2)
				.or_else(|| captures.get(3))
				.or_else(|| captures.get(4))
				.map_or("", |value| value.as_str());

			attributes.set(name.as_str().to_ascii_lowercase(), value);
		}

		attributes
	}
}

/// One shortcode occurrence inside content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcode {
	pub name: String,
	pub attributes: ShortcodeAttributes,
	/// Byte range of the whole tag.
	pub range: Range<usize>,
}

/// Every `[acf_views ...]` and `[acf_cards ...]` tag in `content`.
pub fn find_shortcodes(content: &str) -> Vec<Shortcode> {
	SHORTCODE
		.captures_iter(content)
		.filter_map(|captures| {
			let whole = captures.get(0)?;
			let name = captures.get(1)?.as_str().to_string();
			let attributes = captures
				.get(2)
				.map(|text| ShortcodeAttributes::parse(text.as_str()))
				.unwrap_or_default();

			Some(Shortcode {
				name,
				attributes,
				range: whole.range(),
			})
		})
		.collect()
}

/// Visible fragment returned instead of a broken view or card.
pub fn error_markup(shortcode: &str, attributes: &ShortcodeAttributes, message: &str) -> String {
	let attributes = attributes
		.iter()
		.map(|(name, value)| format!("{name}=\"{}\"", esc_attr(value)))
		.collect::<Vec<_>>()
		.join(" ");

	format!("<p style='color:red;'>Shortcode error: {message} ({shortcode} {attributes})</p>")
}

fn role_list(attributes: &ShortcodeAttributes, name: &str) -> Vec<String> {
	let list = attributes.get(name).unwrap_or("").trim();
	if list.is_empty() {
		return Vec::new();
	}

	list.split(',').map(|role| role.trim().to_string()).collect()
}

/// Apply `user-with-roles` and `user-without-roles`.
pub fn is_available_for_user(user_roles: &[String], attributes: &ShortcodeAttributes) -> bool {
	let with_roles = role_list(attributes, "user-with-roles");
	let without_roles = role_list(attributes, "user-without-roles");

	if with_roles.is_empty() && without_roles.is_empty() {
		return true;
	}

	let has_allowed = with_roles.iter().any(|role| user_roles.contains(role));
	let has_denied = without_roles.iter().any(|role| user_roles.contains(role));

	!((!with_roles.is_empty() && !has_allowed) || (!without_roles.is_empty() && has_denied))
}
