use std::collections::HashMap;
use std::rc::Rc;

use crate::FieldType;
use crate::Item;
use crate::ViewData;
use crate::html::esc_html;
use crate::html::view_row;
use crate::html::view_wrapper;

/// Slot for the data object id inside a skeleton.
pub const OBJECT_ID_TOKEN: &str = "{object-id}";

/// The `$id$` token of a field slot.
pub fn field_token(field_id: &str) -> String {
	format!("${field_id}$")
}

/// Builds view skeletons and tracks the views rendered on the current page.
#[derive(Debug, Default)]
pub struct ViewMarkup {
	skeletons: HashMap<u64, String>,
	rendered: Vec<Rc<ViewData>>,
	is_with_google_map: bool,
}

impl ViewMarkup {
	pub fn new() -> Self {
		Self::default()
	}

	/// The skeleton used to render `view`: its custom markup when set,
	/// otherwise the generated one. Marks the view as rendered.
	pub fn skeleton(&mut self, view: &Rc<ViewData>, is_skip_cache: bool) -> String {
		let markup = if view.custom_markup.trim().is_empty() {
			self.generated_skeleton(view, is_skip_cache)
		} else {
			view.custom_markup.clone()
		};

		self.mark_rendered(view);

		markup
	}

	/// The generated row skeleton, cached per view id unless `is_skip_cache`
	/// is set.
	pub fn generated_skeleton(&mut self, view: &ViewData, is_skip_cache: bool) -> String {
		if !is_skip_cache {
			if let Some(markup) = self.skeletons.get(&view.id) {
				tracing::trace!(view = view.id, "skeleton cache hit");
				return markup.clone();
			}
		}

		let content: String = view
			.items
			.iter()
			.map(|item| Self::row_markup(view, item))
			.collect();
		let markup = view_wrapper(view.id, &view.css_classes, &content);

		tracing::debug!(view = view.id, rows = view.items.len(), "built view skeleton");
		self.skeletons.insert(view.id, markup.clone());

		markup
	}

	fn row_markup(view: &ViewData, item: &Item) -> String {
		let is_layout = view
			.field_meta(&item.field)
			.and_then(|meta| meta.field_type())
			.is_some_and(FieldType::is_layout);

		if is_layout {
			return String::new();
		}

		let field_id = &item.field.id;
		let marker = format!("<!--${}$-->", esc_html(field_id));

		format!("\r\n\t{marker}\r\n")
			+ &view_row(
				"\t",
				&format!("acf-view__{field_id}"),
				&item.field.label,
				&field_token(field_id),
			) + &format!("\t{marker}\r\n")
	}

	fn mark_rendered(&mut self, view: &Rc<ViewData>) {
		if self.rendered.iter().any(|rendered| rendered.id == view.id) {
			return;
		}

		if view.has_live_map() {
			self.is_with_google_map = true;
		}

		self.rendered.push(Rc::clone(view));
	}

	/// Views rendered so far, in first-render order.
	pub fn rendered_views(&self) -> &[Rc<ViewData>] {
		&self.rendered
	}

	/// True once a rendered view contains a map field that draws a live map.
	pub fn is_with_google_map(&self) -> bool {
		self.is_with_google_map
	}
}
