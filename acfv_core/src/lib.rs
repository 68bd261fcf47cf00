//! `acfv_core` renders ACF Views and Cards: reusable HTML templates bound to
//! custom field values of a content item, and post listings that render a
//! View for every query result.
//!
//! ## Rendering Pipeline
//!
//! ```text
//! [acf_views view-id="…" object-id="…"]
//!   → Cache (stored JSON definition overlaid on defaults, field descriptors resolved)
//!   → ViewMarkup (custom markup or generated skeleton with $field$ markers)
//!   → AcfView (per item: read value, substitute default, FieldMarkup, inject or remove row)
//!   → HTML
//!
//! [acf_cards card-id="…"]
//!   → QueryBuilder (card filters to QuerySpec, host query, page count)
//!   → Renderer (View entry point per result, shared recursion trail)
//!   → CardMarkup (skeleton with $items$ and pagination footer)
//!   → HTML
//! ```
//!
//! ## Modules
//!
//! - [`site`]: The traits a host platform implements: stored posts, field schema, content and post queries.
//! - [`config`]: Configuration loading from `acfv.toml`.
//! - [`shortcode`]: Shortcode attribute parsing, role gating and error markup.
//! - [`acf`]: Choice lists of field groups, fields and taxonomies for editors.
//!
//! ## Key Types
//!
//! - [`Renderer`]: Request-scoped entry point for the view and card shortcodes, assets and save actions.
//! - [`ViewData`] / [`CardData`]: Typed View and Card definitions.
//! - [`FieldMeta`]: Descriptor of a custom field, post pseudo-field or taxonomy pseudo-field.
//! - [`FieldMarkup`]: Per field type HTML conversion.
//! - [`FieldHooks`]: Host supplied value and markup filters.
//! - [`JsonSite`]: A [`site::Site`] backed by a JSON document.

pub use acf::*;
pub use acf_card::*;
pub use acf_view::*;
pub use cache::*;
pub use card_data::*;
pub use card_markup::*;
pub use config::*;
pub use date_format::*;
pub use error::*;
pub use field_markup::*;
pub use field_meta::*;
pub use hooks::*;
pub use json_site::*;
pub use post::*;
pub use query_builder::*;
pub use renderer::*;
pub use shortcode::*;
pub use site::*;
pub use view_data::*;
pub use view_markup::*;

pub mod acf;
mod acf_card;
mod acf_view;
mod cache;
mod card_data;
mod card_markup;
pub mod config;
mod date_format;
#[allow(unused_assignments)]
mod error;
mod field_markup;
mod field_meta;
mod hooks;
pub(crate) mod html;
mod json_site;
mod post;
mod query_builder;
mod renderer;
pub mod shortcode;
pub mod site;
pub(crate) mod value;
mod view_data;
mod view_markup;

#[cfg(test)]
mod __fixtures;
