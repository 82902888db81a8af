#![deny(missing_docs)]

//! # JSON Emitter
//!
//! Writes the emitted types as one pretty-printed JSON array.

use crate::emitter::TypeEmitter;
use crate::error::{AppError, AppResult};
use crate::oas::models::GeneratedType;
use std::io::Write;

/// Buffers types and writes them as a JSON array on `finish`.
pub struct JsonEmitter<W: Write> {
    out: W,
    types: Vec<GeneratedType>,
}

impl<W: Write> JsonEmitter<W> {
    /// Creates an emitter writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            types: Vec::new(),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TypeEmitter for JsonEmitter<W> {
    fn emit(&mut self, ty: &GeneratedType) -> AppResult<()> {
        self.types.push(ty.clone());
        Ok(())
    }

    fn finish(&mut self) -> AppResult<()> {
        serde_json::to_writer_pretty(&mut self.out, &self.types)
            .map_err(|e| AppError::General(format!("Failed to serialize types: {}", e)))?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}
