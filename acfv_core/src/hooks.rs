//! Filters that collaborators register to override field values and markup.
//!
//! Both chains run in fixed stages. The value chain runs generic, type, name
//! and then view filters. The markup chain runs generic, name, type (skipped
//! for synthetic types) and then view filters. Inside one stage filters run
//! in registration order.

use serde_json::Value;

use crate::FieldMeta;

pub type ValueFilter = Box<dyn Fn(Value, &FieldMeta, u64) -> Value>;
pub type MarkupFilter = Box<dyn Fn(String, &FieldMeta, &Value, u64) -> String>;

/// Which fields a filter applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookScope {
	/// Every field.
	Any,
	/// Fields with this type tag, e.g. `image` or `_image_link`.
	Type(String),
	/// Fields with this name.
	Name(String),
	/// Fields rendered by this view.
	View(u64),
}

impl HookScope {
	fn matches(&self, meta: &FieldMeta, view_id: u64) -> bool {
		match self {
			Self::Any => true,
			Self::Type(tag) => tag == meta.type_name(),
			Self::Name(name) => name == meta.name(),
			Self::View(id) => *id == view_id,
		}
	}

	fn stage(&self) -> Stage {
		match self {
			Self::Any => Stage::Any,
			Self::Type(_) => Stage::Type,
			Self::Name(_) => Stage::Name,
			Self::View(_) => Stage::View,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
	Any,
	Type,
	Name,
	View,
}

const VALUE_STAGES: [Stage; 4] = [Stage::Any, Stage::Type, Stage::Name, Stage::View];
const MARKUP_STAGES: [Stage; 4] = [Stage::Any, Stage::Name, Stage::Type, Stage::View];

#[derive(Default)]
pub struct FieldHooks {
	value_filters: Vec<(HookScope, ValueFilter)>,
	markup_filters: Vec<(HookScope, MarkupFilter)>,
}

impl std::fmt::Debug for FieldHooks {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FieldHooks")
			.field("value_filters", &self.value_filters.len())
			.field("markup_filters", &self.markup_filters.len())
			.finish()
	}
}

impl FieldHooks {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_value_filter(
		&mut self,
		scope: HookScope,
		filter: impl Fn(Value, &FieldMeta, u64) -> Value + 'static,
	) -> &mut Self {
		self.value_filters.push((scope, Box::new(filter)));
		self
	}

	pub fn add_markup_filter(
		&mut self,
		scope: HookScope,
		filter: impl Fn(String, &FieldMeta, &Value, u64) -> String + 'static,
	) -> &mut Self {
		self.markup_filters.push((scope, Box::new(filter)));
		self
	}

	pub fn is_empty(&self) -> bool {
		self.value_filters.is_empty() && self.markup_filters.is_empty()
	}

	pub(crate) fn apply_value(&self, meta: &FieldMeta, value: Value, view_id: u64) -> Value {
		let mut value = value;

		for stage in VALUE_STAGES {
			for (scope, filter) in &self.value_filters {
				if scope.stage() == stage && scope.matches(meta, view_id) {
					value = filter(value, meta, view_id);
				}
			}
		}

		value
	}

	pub(crate) fn apply_markup(
		&self,
		meta: &FieldMeta,
		markup: String,
		value: &Value,
		view_id: u64,
	) -> String {
		let mut markup = markup;

		for stage in MARKUP_STAGES {
			if stage == Stage::Type && meta.is_custom_type() {
				continue;
			}

			for (scope, filter) in &self.markup_filters {
				if scope.stage() == stage && scope.matches(meta, view_id) {
					markup = filter(markup, meta, value, view_id);
				}
			}
		}

		markup
	}
}
