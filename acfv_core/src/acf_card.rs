use std::cell::RefCell;
use std::rc::Rc;

use crate::CardData;
use crate::CardMarkup;
use crate::QueryBuilder;
use crate::card_markup::ITEMS_TOKEN;
use crate::html::strip_whitespace;
use crate::site::FieldSchema;
use crate::site::PostQuery;

/// Renders a view for one result: `(view_id, post_id) -> html`.
pub type ItemRenderer<'a> = &'a dyn Fn(u64, u64) -> String;

/// One card bound to its query results.
pub struct AcfCard<'a, S: FieldSchema + PostQuery + ?Sized> {
	card: Rc<CardData>,
	site: &'a S,
	query_builder: &'a QueryBuilder,
	card_markup: &'a RefCell<CardMarkup>,
	html: String,
	pages_amount: u64,
	post_ids: Vec<u64>,
}

impl<'a, S: FieldSchema + PostQuery + ?Sized> AcfCard<'a, S> {
	pub fn new(
		card: Rc<CardData>,
		site: &'a S,
		query_builder: &'a QueryBuilder,
		card_markup: &'a RefCell<CardMarkup>,
	) -> Self {
		Self {
			card,
			site,
			query_builder,
			card_markup,
			html: String::new(),
			pages_amount: 0,
			post_ids: Vec::new(),
		}
	}

	/// Query the requested page, render every result through the card's
	/// view and place the items into the skeleton.
	pub fn query_posts_and_insert_data(
		&mut self,
		page_number: u64,
		is_minify: bool,
		is_append_only: bool,
		render_item: ItemRenderer<'_>,
	) {
		let posts = self
			.query_builder
			.posts_data(&self.card, page_number, self.site);
		self.pages_amount = posts.pages_amount;
		self.post_ids = posts.post_ids;

		let mut items: String = self
			.post_ids
			.iter()
			.map(|post_id| render_item(self.card.acf_view_id, *post_id))
			.collect();

		if items.is_empty() && !self.card.no_posts_found_message.is_empty() {
			items = CardMarkup::no_posts_message(&self.card.no_posts_found_message);
		}

		let mut skeleton = self.card_markup.borrow_mut().skeleton(
			&self.card,
			is_append_only,
			false,
			self.pages_amount,
		);

		if is_minify {
			skeleton = strip_whitespace(&skeleton);
		}

		self.html = skeleton.replace(ITEMS_TOKEN, &items);
	}

	pub fn pages_amount(&self) -> u64 {
		self.pages_amount
	}

	pub fn post_ids(&self) -> &[u64] {
		&self.post_ids
	}

	pub fn html(&self) -> &str {
		&self.html
	}

	pub fn into_html(self) -> String {
		self.html
	}
}
