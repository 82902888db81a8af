#![deny(missing_docs)]

//! # Rust Emitter
//!
//! Renders each generated type as a serde-enabled `pub struct`.
//!
//! - Type names become UpperCamelCase, field names snake_case.
//! - A field whose Rust name differs from its wire name gets `#[serde(rename)]`.
//! - Distinct names that collapse to one identifier get a numeric suffix.
//! - `Unspecified` values become `serde_json::Value`.

use crate::emitter::TypeEmitter;
use crate::error::AppResult;
use crate::oas::models::{FieldSource, GeneratedType, TypeKind};
use heck::{ToSnakeCase, ToUpperCamelCase};
use std::collections::{HashMap, HashSet};
use std::io::Write;

const HEADER: &str = "// Generated by oas-typegen. Do not edit.\n\nuse serde::{Deserialize, Serialize};\n";

/// Strict and reserved keywords that need a raw identifier.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "super", "Self"];

/// Type name -> Rust identifier, assigned on first sight for the whole output.
#[derive(Debug, Default)]
struct TypeIdents {
    assigned: HashMap<String, String>,
    used: HashSet<String>,
}

impl TypeIdents {
    fn ident(&mut self, name: &str) -> String {
        if let Some(ident) = self.assigned.get(name) {
            return ident.clone();
        }
        let ident = unique(type_ident(name), &self.used, "");
        self.used.insert(ident.clone());
        self.assigned.insert(name.to_string(), ident.clone());
        ident
    }
}

/// `base`, or the first `base{sep}N` (N >= 2) not in `used`.
fn unique(base: String, used: &HashSet<String>, sep: &str) -> String {
    if !used.contains(&base) {
        return base;
    }
    let stem = base.trim_start_matches("r#");
    (2usize..)
        .map(|n| format!("{}{}{}", stem, sep, n))
        .find(|candidate| !used.contains(candidate))
        .unwrap_or_default()
}

/// Writes Rust source to any `io::Write`.
pub struct RustEmitter<W: Write> {
    out: W,
    types: TypeIdents,
}

impl<W: Write> RustEmitter<W> {
    /// Creates an emitter writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            types: TypeIdents::default(),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TypeEmitter for RustEmitter<W> {
    fn begin(&mut self) -> AppResult<()> {
        self.out.write_all(HEADER.as_bytes())?;
        Ok(())
    }

    fn emit(&mut self, ty: &GeneratedType) -> AppResult<()> {
        self.out.write_all(b"\n")?;
        let code = generate_struct(ty, &mut self.types);
        self.out.write_all(code.as_bytes())?;
        Ok(())
    }

    fn finish(&mut self) -> AppResult<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Renders all `types` into one Rust source string.
pub fn render_rust(types: &[GeneratedType]) -> AppResult<String> {
    let mut emitter = RustEmitter::new(Vec::new());
    crate::emitter::emit_all(types, &mut emitter)?;
    Ok(String::from_utf8_lossy(&emitter.into_inner()).into_owned())
}

fn generate_struct(ty: &GeneratedType, types: &mut TypeIdents) -> String {
    let mut code = String::new();
    code.push_str("#[derive(Debug, Clone, Serialize, Deserialize)]\n");

    let name = types.ident(&ty.name);
    if ty.fields.is_empty() {
        code.push_str(&format!("pub struct {} {{}}\n", name));
        return code;
    }

    code.push_str(&format!("pub struct {} {{\n", name));
    let mut used = HashSet::new();
    for field in &ty.fields {
        if is_parameter(field.source) {
            code.push_str(&format!("    /// `in: {}`\n", field.source));
        }

        let ident = unique(field_ident(&field.name), &used, "_");
        if ident.trim_start_matches("r#") != field.name {
            code.push_str(&format!("    #[serde(rename = \"{}\")]\n", escape(&field.name)));
        }
        code.push_str(&format!("    pub {}: {},\n", ident, rust_type(&field.kind, types)));
        used.insert(ident);
    }
    code.push_str("}\n");
    code
}

fn is_parameter(source: FieldSource) -> bool {
    matches!(
        source,
        FieldSource::Path | FieldSource::Query | FieldSource::Header | FieldSource::Cookie
    )
}

/// Rust type for a field kind.
fn rust_type(kind: &TypeKind, types: &mut TypeIdents) -> String {
    match kind {
        TypeKind::String => "String".to_string(),
        TypeKind::Int32 => "i32".to_string(),
        TypeKind::Float64 => "f64".to_string(),
        TypeKind::Boolean => "bool".to_string(),
        TypeKind::Sequence(inner) => format!("Vec<{}>", rust_type(inner, types)),
        TypeKind::Named(name) => types.ident(name),
        TypeKind::Unspecified => "serde_json::Value".to_string(),
    }
}

/// UpperCamelCase type identifier. Names that already are one are kept as-is.
pub fn type_ident(name: &str) -> String {
    let already_camel = name.starts_with(|c: char| c.is_ascii_uppercase())
        && name.chars().all(|c| c.is_ascii_alphanumeric());
    let ident = if already_camel {
        name.to_string()
    } else {
        name.to_upper_camel_case()
    };
    if ident.is_empty() {
        return "Unnamed".to_string();
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("T{}", ident);
    }
    if NON_RAW_KEYWORDS.contains(&ident.as_str()) {
        return format!("{}_", ident);
    }
    ident
}

/// snake_case field identifier, raw-escaped when it is a keyword.
pub fn field_ident(name: &str) -> String {
    let ident = name.to_snake_case();
    if ident.is_empty() {
        return "field".to_string();
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("_{}", ident);
    }
    if NON_RAW_KEYWORDS.contains(&ident.as_str()) {
        return format!("{}_", ident);
    }
    if KEYWORDS.contains(&ident.as_str()) {
        return format!("r#{}", ident);
    }
    ident
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
