//! In-memory representation of the generated code.
//!
//! Processors build a [`Model`] and the classifier produces [`Relation`]s; the
//! emitter and scaffolding renderers only ever read them. Nothing here knows
//! about the database or the filesystem.

mod model;
mod relation;

pub use model::{Capability, Method, Model, Property, Value, VirtualProperty, Visibility};
pub use relation::{DirectRelation, PivotRelation, Relation};
