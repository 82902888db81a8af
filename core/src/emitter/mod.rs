#![deny(missing_docs)]

//! # Type Emitters
//!
//! Renders generated types to an output sink. Emitters receive types in
//! emission order and must neither reorder nor deduplicate them.

pub mod json;
pub mod rust;

pub use json::JsonEmitter;
pub use rust::{render_rust, RustEmitter};

use crate::error::AppResult;
use crate::oas::models::GeneratedType;

/// A sink for generated type declarations.
pub trait TypeEmitter {
    /// Called once before the first type.
    fn begin(&mut self) -> AppResult<()> {
        Ok(())
    }

    /// Renders one type.
    fn emit(&mut self, ty: &GeneratedType) -> AppResult<()>;

    /// Called once after the last type.
    fn finish(&mut self) -> AppResult<()> {
        Ok(())
    }
}

/// Drives `emitter` over `types` in order.
pub fn emit_all<E: TypeEmitter + ?Sized>(types: &[GeneratedType], emitter: &mut E) -> AppResult<()> {
    emitter.begin()?;
    for ty in types {
        emitter.emit(ty)?;
    }
    emitter.finish()
}
