//! Request-scoped memo of parsed view and card definitions.
//!
//! Each kind has a prototype holding the defaults. The first lookup of an id
//! clones the prototype, overlays the persisted JSON and keeps the result.
//! Later lookups of the same id return the same `Rc`.

use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::AcfvError;
use crate::AcfvResult;
use crate::CardData;
use crate::ViewData;
use crate::site::FieldSchema;
use crate::site::Storage;

#[derive(Debug, Default)]
pub struct Cache {
	view_prototype: ViewData,
	card_prototype: CardData,
	views: HashMap<u64, Rc<ViewData>>,
	cards: HashMap<u64, Rc<CardData>>,
}

impl Cache {
	pub fn new(view_prototype: ViewData, card_prototype: CardData) -> Self {
		Self {
			view_prototype,
			card_prototype,
			views: HashMap::new(),
			cards: HashMap::new(),
		}
	}

	/// The view definition stored under `id`, with field descriptors
	/// resolved.
	pub fn view_data<S: Storage + FieldSchema + ?Sized>(
		&mut self,
		id: u64,
		site: &S,
	) -> AcfvResult<Rc<ViewData>> {
		if let Some(view) = self.views.get(&id) {
			return Ok(Rc::clone(view));
		}

		let stored = site.stored_post(id).ok_or(AcfvError::UnknownView(id))?;
		let mut view = hydrate(&self.view_prototype, &stored.content, id)?;
		view.id = id;
		view.set_fields_meta(site);

		tracing::debug!(view = id, items = view.items.len(), "hydrated view definition");

		let view = Rc::new(view);
		self.views.insert(id, Rc::clone(&view));

		Ok(view)
	}

	pub fn card_data<S: Storage + ?Sized>(&mut self, id: u64, site: &S) -> AcfvResult<Rc<CardData>> {
		if let Some(card) = self.cards.get(&id) {
			return Ok(Rc::clone(card));
		}

		let stored = site.stored_post(id).ok_or(AcfvError::UnknownCard(id))?;
		let mut card = hydrate(&self.card_prototype, &stored.content, id)?;
		card.id = id;

		tracing::debug!(card = id, "hydrated card definition");

		let card = Rc::new(card);
		self.cards.insert(id, Rc::clone(&card));

		Ok(card)
	}

	/// Replace the cached view, e.g. after save actions changed it.
	pub fn store_view(&mut self, view: ViewData) -> Rc<ViewData> {
		let view = Rc::new(view);
		self.views.insert(view.id, Rc::clone(&view));
		view
	}

	pub fn store_card(&mut self, card: CardData) -> Rc<CardData> {
		let card = Rc::new(card);
		self.cards.insert(card.id, Rc::clone(&card));
		card
	}
}

/// Overlay the persisted document onto a copy of `prototype`. Unknown keys
/// are ignored and missing keys keep the prototype's value. An empty body
/// yields the prototype.
pub fn hydrate<T: Serialize + DeserializeOwned>(
	prototype: &T,
	content: &str,
	id: u64,
) -> AcfvResult<T> {
	let parse_error = |reason: String| AcfvError::DefinitionParse { id, reason };

	let mut merged = serde_json::to_value(prototype).map_err(|e| parse_error(e.to_string()))?;

	if !content.trim().is_empty() {
		let stored: Value = serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?;

		let Value::Object(stored) = stored else {
			return Err(parse_error("expected a JSON object".to_string()));
		};

		if let Value::Object(merged) = &mut merged {
			for (key, value) in stored {
				merged.insert(key, value);
			}
		}
	}

	serde_json::from_value(merged).map_err(|e| parse_error(e.to_string()))
}
