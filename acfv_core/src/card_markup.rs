use std::collections::BTreeMap;
use std::rc::Rc;

use crate::CardData;
use crate::card_data::LAYOUT_RULES_BEGIN;
use crate::card_data::LAYOUT_RULES_END;
use crate::card_data::Layout;
use crate::card_data::PaginationType;
use crate::html::esc_html;

/// Slot for the rendered items.
pub const ITEMS_TOKEN: &str = "$items$";

const LAYOUT_MESSAGE: &str = "Manually edit these rules by disabling Layout Rules, otherwise these \
                              rules are updated every time you press the 'Update' button";

/// Card skeletons, layout CSS and the registry of cards rendered on the
/// current page.
#[derive(Debug, Default)]
pub struct CardMarkup {
	rendered: Vec<Rc<CardData>>,
}

impl CardMarkup {
	pub fn new() -> Self {
		Self::default()
	}

	/// The card shell around [`ITEMS_TOKEN`]. An append-only skeleton is
	/// just the token, used for pages after the first.
	pub fn skeleton(
		&mut self,
		card: &Rc<CardData>,
		is_append_only: bool,
		is_ignore_custom_markup: bool,
		pages_amount: u64,
	) -> String {
		let markup = if is_append_only {
			format!("\t\t{ITEMS_TOKEN}\r\n")
		} else if !is_ignore_custom_markup && !card.custom_markup.trim().is_empty() {
			card.custom_markup.clone()
		} else {
			Self::full_skeleton(card, pages_amount)
		};

		self.mark_rendered(card);

		markup
	}

	/// The generated skeleton ignoring custom markup, as shown in the
	/// markup preview of the card editor.
	pub fn preview_skeleton(card: &CardData) -> String {
		Self::full_skeleton(card, 0)
	}

	fn full_skeleton(card: &CardData, pages_amount: u64) -> String {
		let extra_classes = card.css_classes.trim();
		let extra_classes = if extra_classes.is_empty() {
			String::new()
		} else {
			format!(" {extra_classes}")
		};

		let mut markup = format!(
			"<div class=\"acf-card acf-card--id--{}{extra_classes}\">\r\n",
			card.id
		);
		markup.push_str("\r\n\t<div class=\"acf-card__items\">\r\n");
		markup.push_str(&format!("\t\t{ITEMS_TOKEN}\r\n"));
		markup.push_str("\t</div>\r\n");
		markup.push_str(&Self::pagination_markup(card, pages_amount));
		markup.push_str("\r\n</div>\r\n");

		markup
	}

	fn pagination_markup(card: &CardData, pages_amount: u64) -> String {
		if !card.is_with_pagination {
			return String::new();
		}

		let data = format!(
			"data-card-id=\"{}\" data-pages-amount=\"{pages_amount}\"",
			card.id
		);

		match card.pagination_type {
			PaginationType::LoadMoreButton => {
				format!(
					"\r\n\t<button class=\"acf-card__load-more\" {data}>{}</button>\r\n",
					esc_html(&card.load_more_button_label)
				)
			}
			PaginationType::InfiniteScroll => {
				format!("\r\n\t<div class=\"acf-card__infinity-scroll\" {data}></div>\r\n")
			}
			PaginationType::PageNumbers => {
				let mut links = String::new();
				for page in 1..=pages_amount {
					links.push_str(&format!(
						"<a class=\"acf-card__page-number\" data-page=\"{page}\" href=\"#\">{page}</a>"
					));
				}

				format!("\r\n\t<div class=\"acf-card__page-numbers\" {data}>{links}</div>\r\n")
			}
		}
	}

	fn mark_rendered(&mut self, card: &Rc<CardData>) {
		if !self.rendered.iter().any(|rendered| rendered.id == card.id) {
			self.rendered.push(Rc::clone(card));
		}
	}

	/// Cards rendered so far, in first-render order.
	pub fn rendered_cards(&self) -> &[Rc<CardData>] {
		&self.rendered
	}

	/// Responsive grid CSS for the card's layout rules. Empty when layout
	/// rules are disabled.
	pub fn layout_css(card: &CardData) -> String {
		if !card.is_use_layout_css {
			return String::new();
		}

		// a later rule for the same screen replaces the earlier one
		let mut rules: BTreeMap<u32, Vec<String>> = BTreeMap::new();

		for layout_rule in &card.layout_rules {
			let mut rule = vec![" display:grid;".to_string()];

			match layout_rule.layout {
				Layout::Row => {
					rule.push(" grid-auto-flow:column;".to_string());
					rule.push(format!(" grid-column-gap:{};", layout_rule.horizontal_gap));
				}
				Layout::Column => {
					rule.push(" grid-template-columns:\"1fr\";".to_string());
					rule.push(format!(" grid-row-gap:{};", layout_rule.vertical_gap));
				}
				Layout::Grid => {
					rule.push(format!(
						" grid-template-columns:repeat({}, \"1fr\");",
						layout_rule.amount_of_columns
					));
					rule.push(format!(" grid-column-gap:{};", layout_rule.horizontal_gap));
					rule.push(format!(" grid-row-gap:{};", layout_rule.vertical_gap));
				}
			}

			rules.insert(layout_rule.screen.min_width(), rule);
		}

		let mut css = format!("{LAYOUT_RULES_BEGIN}\n/*{LAYOUT_MESSAGE}*/\n");

		for (screen, rule) in rules {
			if screen > 0 {
				css.push_str(&format!("\n@media screen and (min-width:{screen}px) {{"));
			}

			css.push_str("\n#card .acf-card__items {\n");
			css.push_str(&rule.join("\n"));
			css.push_str("\n}\n");

			if screen > 0 {
				css.push_str("}\n");
			}
		}

		css.push_str(&format!("\n{LAYOUT_RULES_END}"));

		css
	}

	/// Block shown instead of items when a query has no results.
	pub fn no_posts_message(message: &str) -> String {
		format!("<div class=\"acf-card__no-posts-message\">{message}</div>")
	}
}
