//! Request-scoped rendering entry points.
//!
//! A [`Renderer`] owns everything that lives for one page request: the
//! definition cache, the skeleton cache and the registries of rendered views
//! and cards. Views embedding other views share a [`RenderTrail`] so that a
//! view can't re-enter itself for the same data object.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::AcfCard;
use crate::AcfView;
use crate::AcfvConfig;
use crate::AcfvError;
use crate::AcfvResult;
use crate::Cache;
use crate::CardData;
use crate::CardMarkup;
use crate::DataObjectId;
use crate::DateFormatter;
use crate::FieldHooks;
use crate::FieldMarkup;
use crate::Post;
use crate::QueryBuilder;
use crate::QuerySpec;
use crate::ViewData;
use crate::ViewMarkup;
use crate::html::esc_attr;
use crate::html::strip_whitespace;
use crate::shortcode::CARD_SHORTCODE;
use crate::shortcode::ShortcodeAttributes;
use crate::shortcode::VIEW_SHORTCODE;
use crate::shortcode::error_markup;
use crate::shortcode::find_shortcodes;
use crate::shortcode::is_available_for_user;
use crate::site::CARD_POST_TYPE;
use crate::site::Site;
use crate::site::VIEW_POST_TYPE;

/// Placeholder in the page where collected CSS is placed.
pub const STYLES_STUB: &str = "<!--acf-views-styles-->";

const VIEW_ID_ERROR: &str = "view-id attribute is missing or wrong";
const CARD_ID_ERROR: &str = "card-id attribute is missing or wrong";
const OBJECT_ID_ERROR: &str = "object-id argument contains the wrong value";

/// Keys (`view_id-object_id`) of the views currently being rendered.
#[derive(Debug, Default)]
pub struct RenderTrail {
	keys: RefCell<HashSet<String>>,
}

impl RenderTrail {
	pub fn new() -> Self {
		Self::default()
	}

	/// Enter `key`. Returns `None` when it is already on the trail; the key
	/// is left again when the guard drops.
	pub fn enter(&self, key: String) -> Option<TrailGuard<'_>> {
		if !self.keys.borrow_mut().insert(key.clone()) {
			return None;
		}

		Some(TrailGuard { trail: self, key })
	}

	pub fn contains(&self, key: &str) -> bool {
		self.keys.borrow().contains(key)
	}

	pub fn is_empty(&self) -> bool {
		self.keys.borrow().is_empty()
	}
}

#[derive(Debug)]
pub struct TrailGuard<'t> {
	trail: &'t RenderTrail,
	key: String,
}

impl Drop for TrailGuard<'_> {
	fn drop(&mut self) {
		self.trail.keys.borrow_mut().remove(&self.key);
	}
}

/// Ambient page state the host knows about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
	/// Logged in user.
	pub current_user: Option<u64>,
	/// Post of the current loop iteration.
	pub loop_post: Option<u64>,
	/// Id of the page being displayed.
	pub queried_object: Option<u64>,
}

pub struct Renderer<'s, S: Site + ?Sized> {
	site: &'s S,
	config: AcfvConfig,
	context: RequestContext,
	dates: DateFormatter,
	hooks: FieldHooks,
	query_builder: QueryBuilder,
	cache: RefCell<Cache>,
	view_markup: RefCell<ViewMarkup>,
	card_markup: RefCell<CardMarkup>,
}

impl<'s, S: Site + ?Sized> Renderer<'s, S> {
	pub fn new(site: &'s S, config: AcfvConfig) -> Self {
		Self {
			site,
			dates: DateFormatter::from_config(&config.render),
			config,
			context: RequestContext::default(),
			hooks: FieldHooks::new(),
			query_builder: QueryBuilder,
			cache: RefCell::new(Cache::new(ViewData::default(), CardData::default())),
			view_markup: RefCell::new(ViewMarkup::new()),
			card_markup: RefCell::new(CardMarkup::new()),
		}
	}

	#[must_use]
	pub fn with_context(mut self, context: RequestContext) -> Self {
		self.context = context;
		self
	}

	#[must_use]
	pub fn with_hooks(mut self, hooks: FieldHooks) -> Self {
		self.hooks = hooks;
		self
	}

	pub fn hooks_mut(&mut self) -> &mut FieldHooks {
		&mut self.hooks
	}

	pub fn config(&self) -> &AcfvConfig {
		&self.config
	}

	pub fn view_data(&self, view_id: u64) -> AcfvResult<Rc<ViewData>> {
		self.cache.borrow_mut().view_data(view_id, self.site)
	}

	pub fn card_data(&self, card_id: u64) -> AcfvResult<Rc<CardData>> {
		self.cache.borrow_mut().card_data(card_id, self.site)
	}

	fn current_user_roles(&self) -> Vec<String> {
		self.context
			.current_user
			.and_then(|user_id| self.site.user(user_id))
			.map(|user| user.roles)
			.unwrap_or_default()
	}

	fn is_published(&self, id: u64, post_type: &str) -> bool {
		self.site
			.stored_post(id)
			.is_some_and(|post| post.post_type == post_type && post.is_published())
	}

	/// The view shortcode. Starts a new recursion trail.
	pub fn view_shortcode(&self, attributes: &ShortcodeAttributes) -> String {
		self.view_shortcode_in(attributes, &RenderTrail::new())
	}

	/// The view shortcode within an existing trail.
	pub fn view_shortcode_in(&self, attributes: &ShortcodeAttributes, trail: &RenderTrail) -> String {
		if !is_available_for_user(&self.current_user_roles(), attributes) {
			return String::new();
		}

		let view_id = attribute_id(attributes, "view-id");
		if view_id == 0 || !self.is_published(view_id, VIEW_POST_TYPE) {
			return error_markup(VIEW_SHORTCODE, attributes, VIEW_ID_ERROR);
		}

		let Some(object) = self.resolve_object(attributes.get("object-id").unwrap_or("")) else {
			return error_markup(VIEW_SHORTCODE, attributes, OBJECT_ID_ERROR);
		};

		match self.render_view(view_id, object, trail) {
			Ok(html) => html,
			Err(error) => {
				tracing::warn!(view = view_id, %error, "view failed to render");
				error_markup(VIEW_SHORTCODE, attributes, VIEW_ID_ERROR)
			}
		}
	}

	/// The data object of a shortcode: `$user$`, `options`, a literal id, or
	/// the loop post and then the displayed page as fallbacks. Literal ids
	/// must name an existing post.
	fn resolve_object(&self, object_id: &str) -> Option<DataObjectId> {
		match object_id.trim() {
			"$user$" => return Some(DataObjectId::User(self.context.current_user.unwrap_or(0))),
			"options" => return Some(DataObjectId::Options),
			_ => {}
		}

		let post_id = object_id
			.trim()
			.parse::<u64>()
			.ok()
			.filter(|id| *id > 0)
			.or(self.context.loop_post)
			.or(self.context.queried_object)?;

		self.site
			.stored_post(post_id)
			.map(|_| DataObjectId::Post(post_id))
	}

	/// Render a view for a data object. Returns an empty string when the
	/// same view and object are already being rendered further up the trail.
	pub fn render_view(
		&self,
		view_id: u64,
		object: DataObjectId,
		trail: &RenderTrail,
	) -> AcfvResult<String> {
		let key = format!("{view_id}-{object}");
		let Some(_guard) = trail.enter(key) else {
			tracing::debug!(view = view_id, %object, "recursive view render suppressed");
			return Ok(String::new());
		};

		let view = self.view_data(view_id)?;
		let skeleton = self.view_markup.borrow_mut().skeleton(&view, false);

		let embed = |embedded_view: u64, post_id: u64| {
			let attributes = ShortcodeAttributes::new()
				.with("view-id", embedded_view.to_string())
				.with("object-id", post_id.to_string());
			self.view_shortcode_in(&attributes, trail)
		};

		let post = Post::new(object, self.site, &self.dates);
		let markup = FieldMarkup::new(self.site, &self.hooks, &self.dates).with_embedder(&embed);

		let mut acf_view = AcfView::new(&view, post, markup, skeleton);
		acf_view.insert_fields(self.config.render.minify);

		Ok(acf_view.into_html())
	}

	/// The card shortcode, rendering the first page.
	pub fn card_shortcode(&self, attributes: &ShortcodeAttributes) -> String {
		if !is_available_for_user(&self.current_user_roles(), attributes) {
			return String::new();
		}

		let card_id = attribute_id(attributes, "card-id");
		if card_id == 0 || !self.is_published(card_id, CARD_POST_TYPE) {
			return error_markup(CARD_SHORTCODE, attributes, CARD_ID_ERROR);
		}

		match self.render_card(card_id, 1, false) {
			Ok(html) => html,
			Err(error) => {
				tracing::warn!(card = card_id, %error, "card failed to render");
				error_markup(CARD_SHORTCODE, attributes, CARD_ID_ERROR)
			}
		}
	}

	/// Render one page of a card. Append-only renders contain the items
	/// without the card wrapper.
	pub fn render_card(&self, card_id: u64, page_number: u64, is_append_only: bool) -> AcfvResult<String> {
		let card = self.card_data(card_id)?;
		let trail = RenderTrail::new();

		let render_item = |view_id: u64, post_id: u64| {
			let attributes = ShortcodeAttributes::new()
				.with("view-id", view_id.to_string())
				.with("object-id", post_id.to_string());
			self.view_shortcode_in(&attributes, &trail)
		};

		let mut acf_card = AcfCard::new(card, self.site, &self.query_builder, &self.card_markup);
		acf_card.query_posts_and_insert_data(
			page_number,
			self.config.render.minify,
			is_append_only,
			&render_item,
		);

		Ok(acf_card.into_html())
	}

	/// A later page of a card, for load-more style pagination.
	pub fn card_page(&self, card_id: u64, page_number: u64) -> AcfvResult<String> {
		if !self.is_published(card_id, CARD_POST_TYPE) {
			return Err(AcfvError::UnknownCard(card_id));
		}

		self.render_card(card_id, page_number, page_number > 1)
	}

	/// Replace every view and card shortcode inside `content`.
	pub fn do_shortcode(&self, content: &str) -> String {
		let mut output = String::with_capacity(content.len());
		let mut offset = 0;

		for shortcode in find_shortcodes(content) {
			output.push_str(&content[offset..shortcode.range.start]);

			let rendered = if shortcode.name == CARD_SHORTCODE {
				self.card_shortcode(&shortcode.attributes)
			} else {
				self.view_shortcode(&shortcode.attributes)
			};

			output.push_str(&rendered);
			offset = shortcode.range.end;
		}

		output.push_str(&content[offset..]);

		output
	}

	/// Collect the CSS and JS of everything rendered so far into `page`.
	pub fn print_custom_assets(&self, page: &str) -> String {
		let mut css = String::new();
		let mut js = String::new();

		for view in self.view_markup.borrow().rendered_views() {
			push_chunk(&mut css, "view", view.id, &view.css_code(true, false));
			push_chunk(&mut js, "view", view.id, &minify_js(&view.js_code));
		}

		for card in self.card_markup.borrow().rendered_cards() {
			push_chunk(&mut css, "card", card.id, &card.css_code(true, false));
			push_chunk(&mut js, "card", card.id, &minify_js(&card.js_code));
		}

		let css_tag = if css.is_empty() {
			String::new()
		} else {
			format!("<style data-acf-views-css='css'>{css}</style>")
		};

		let mut page = page.replace(STYLES_STUB, &css_tag);

		if !js.is_empty() {
			page.push_str(&format!(
				"<script data-acf-views-js='js'>(function (){{{js}}}())</script>"
			));
		}

		let api_key = self.config.maps.api_key.as_deref().unwrap_or_default();
		if !api_key.is_empty() && self.view_markup.borrow().is_with_google_map() {
			page.push_str(&format!(
				"<script src='{}'></script><script \
				 src='https://maps.googleapis.com/maps/api/js?key={}&callback=acfViewsGoogleMaps'></script>",
				esc_attr(&self.config.maps.script_url),
				esc_attr(api_key)
			));
		}

		page
	}

	/// Save actions of a view: sanitise identifiers and regenerate the
	/// markup preview. The updated definition replaces the cached one.
	pub fn save_view(&self, view_id: u64) -> AcfvResult<Rc<ViewData>> {
		let mut view = (*self.view_data(view_id)?).clone();

		view.update_identifiers();
		view.markup = self
			.view_markup
			.borrow_mut()
			.generated_skeleton(&view, true);

		Ok(self.cache.borrow_mut().store_view(view))
	}

	/// Save actions of a card: regenerate the query and markup previews and
	/// refresh the layout rules block in the card CSS.
	pub fn save_card(&self, card_id: u64) -> AcfvResult<Rc<CardData>> {
		let mut card = (*self.card_data(card_id)?).clone();

		let spec = self.query_builder.query_spec(&card, 1, self.site);
		card.query_preview = serde_json::to_string_pretty(&spec).map_err(|e| {
			AcfvError::DefinitionParse {
				id: card_id,
				reason: e.to_string(),
			}
		})?;
		card.markup = CardMarkup::preview_skeleton(&card);

		let layout_css = CardMarkup::layout_css(&card);
		card.apply_layout_css(&layout_css);

		Ok(self.cache.borrow_mut().store_card(card))
	}

	pub fn query_spec(&self, card_id: u64, page_number: u64) -> AcfvResult<QuerySpec> {
		let card = self.card_data(card_id)?;
		Ok(self.query_builder.query_spec(&card, page_number, self.site))
	}

	pub fn layout_css(&self, card_id: u64) -> AcfvResult<String> {
		let card = self.card_data(card_id)?;
		Ok(CardMarkup::layout_css(&card))
	}

	pub fn is_with_google_map(&self) -> bool {
		self.view_markup.borrow().is_with_google_map()
	}
}

fn attribute_id(attributes: &ShortcodeAttributes, name: &str) -> u64 {
	attributes
		.get(name)
		.and_then(|value| value.trim().parse().ok())
		.unwrap_or(0)
}

fn minify_js(js: &str) -> String {
	strip_whitespace(js).trim().to_string()
}

fn push_chunk(target: &mut String, kind: &str, id: u64, code: &str) {
	if !code.is_empty() {
		target.push_str(&format!("\n/*{kind}-{id}*/\n{code}"));
	}
}
