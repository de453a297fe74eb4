//! Tolerant JSON → [`Document`] loading.
//!
//! Documents written by older editor versions are repaired rather than rejected: missing ids are
//! generated, missing arrays defaulted, legacy global layers moved into a section, and layers that
//! cannot be decoded are dropped with a warning. Zoom points outside the canvas are dropped too.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::{Map, Value};

use crate::{
    document::model::{Document, Layer, Section},
    foundation::core::{LayerId, SectionId},
    foundation::error::{SceneError, SceneResult},
};

/// What [`hydrate_value`] had to repair.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct HydrateReport {
    /// Sections that had no `elements` array.
    pub defaulted_element_arrays: usize,
    /// Sections that received a fresh id (missing, blank or duplicate).
    pub generated_section_ids: usize,
    /// Layers that received a fresh id (missing, blank or duplicate).
    pub generated_layer_ids: usize,
    /// Layers moved from the legacy top-level pool into a section.
    pub migrated_legacy_layers: usize,
    /// Layers with geometry or paint clamped into range.
    pub clamped_layers: usize,
    /// Human-readable reasons for every dropped layer or section.
    pub dropped: Vec<String>,
}

impl HydrateReport {
    /// Return `true` when the input needed no repair.
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// Return `true` when a raw record has no sections and no layers.
///
/// Such a record is treated as "not really found" by the persistence fallback lookup.
pub fn is_empty_shell(value: &Value) -> bool {
    fn empty(v: Option<&Value>) -> bool {
        match v {
            None | Some(Value::Null) => true,
            Some(Value::Array(a)) => a.is_empty(),
            Some(_) => false,
        }
    }
    match value {
        Value::Object(map) => empty(map.get("sections")) && empty(map.get("layers")),
        _ => true,
    }
}

/// Hydrate a document from an untyped JSON value, repairing legacy shapes.
pub fn hydrate_value(value: Value) -> SceneResult<(Document, HydrateReport)> {
    let Value::Object(mut root) = value else {
        return Err(SceneError::validation("document JSON must be an object"));
    };
    let mut report = HydrateReport::default();

    let raw_sections = take_array(&mut root, "sections");
    let raw_legacy = take_array(&mut root, "layers");

    let mut doc = match serde_json::from_value::<Document>(Value::Object(root.clone())) {
        Ok(d) => d,
        Err(e) => {
            report.dropped.push(format!("document fields: {e}"));
            salvage_identity(&root)
        }
    };

    for (i, raw) in raw_sections.into_iter().enumerate() {
        if let Some(section) = hydrate_section(raw, i, &mut report) {
            doc.sections.push(section);
        }
    }

    let legacy: Vec<Layer> = raw_legacy
        .into_iter()
        .enumerate()
        .filter_map(|(i, raw)| decode_layer(raw, &format!("layers[{i}]"), &mut report))
        .collect();
    if !legacy.is_empty() {
        report.migrated_legacy_layers = legacy.len();
        if doc.sections.is_empty() {
            doc.sections.push(Section::new("Section 1"));
        }
        tracing::info!(
            count = legacy.len(),
            "migrating legacy global layers into first section"
        );
        doc.sections[0].elements.extend(legacy);
    }

    repair_ids_and_ranges(&mut doc, &mut report);

    if !report.is_clean() {
        tracing::warn!(?report, doc_id = %doc.id, "document repaired on hydrate");
    }
    Ok((doc, report))
}

fn take_array(root: &mut Map<String, Value>, key: &str) -> Vec<Value> {
    match root.remove(key) {
        Some(Value::Array(a)) => a,
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            tracing::warn!(key, kind = json_kind(&other), "expected array, ignoring");
            Vec::new()
        }
    }
}

/// Keep only the identity strings of a record whose scalar fields failed to decode.
fn salvage_identity(root: &Map<String, Value>) -> Document {
    let text = |key: &str| {
        root.get(key)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_default()
    };
    Document {
        id: text("id"),
        slug: text("slug"),
        name: text("name"),
        ..Document::default()
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn hydrate_section(raw: Value, index: usize, report: &mut HydrateReport) -> Option<Section> {
    let Value::Object(mut obj) = raw else {
        report
            .dropped
            .push(format!("sections[{index}]: not an object"));
        return None;
    };

    let raw_elements = match obj.remove("elements") {
        Some(Value::Array(a)) => a,
        _ => {
            report.defaulted_element_arrays += 1;
            Vec::new()
        }
    };

    let mut section: Section = match serde_json::from_value(Value::Object(obj)) {
        Ok(s) => s,
        Err(e) => {
            report.dropped.push(format!("sections[{index}]: {e}"));
            return None;
        }
    };

    section.elements = raw_elements
        .into_iter()
        .enumerate()
        .filter_map(|(j, raw)| {
            decode_layer(raw, &format!("sections[{index}].elements[{j}]"), report)
        })
        .collect();
    Some(section)
}

fn decode_layer(raw: Value, path: &str, report: &mut HydrateReport) -> Option<Layer> {
    match serde_json::from_value::<Layer>(raw) {
        Ok(l) => Some(l),
        Err(e) => {
            tracing::warn!(path, error = %e, "dropping undecodable layer");
            report.dropped.push(format!("{path}: {e}"));
            None
        }
    }
}

fn repair_ids_and_ranges(doc: &mut Document, report: &mut HydrateReport) {
    let mut section_ids = HashSet::new();
    let mut layer_ids = HashSet::new();
    let canvas = doc.canvas_size;
    for section in &mut doc.sections {
        if section.id.is_blank() || !section_ids.insert(section.id.clone()) {
            section.id = SectionId::generate();
            section_ids.insert(section.id.clone());
            report.generated_section_ids += 1;
        }
        for layer in &mut section.elements {
            if layer.id.is_blank() || !layer_ids.insert(layer.id.clone()) {
                layer.id = LayerId::generate();
                layer_ids.insert(layer.id.clone());
                report.generated_layer_ids += 1;
            }
            if layer.clamp_ranges() {
                report.clamped_layers += 1;
            }
        }
        if let Some(zc) = &mut section.zoom_config {
            let mut i = 0;
            zc.points.retain(|p| {
                let keep = p.target_region.fits(canvas);
                if !keep {
                    report.dropped.push(format!(
                        "section '{}' zoom point {i}: region outside the canvas",
                        section.id
                    ));
                }
                i += 1;
                keep
            });
        }
    }
    if !(doc.zoom.is_finite() && doc.zoom > 0.0) {
        doc.zoom = 1.0;
    }
}

impl Document {
    /// Parse and hydrate a document from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> SceneResult<(Self, HydrateReport)> {
        let value: Value = serde_json::from_reader(r)
            .map_err(|e| SceneError::serde(format!("parse document JSON: {e}")))?;
        hydrate_value(value)
    }

    /// Parse and hydrate a document from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SceneResult<(Self, HydrateReport)> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SceneError::validation(format!("open document JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize to the persisted record shape.
    ///
    /// The legacy `layers` pool is always written empty so older readers keep working.
    pub fn to_json_value(&self) -> SceneResult<Value> {
        let mut v = serde_json::to_value(self)
            .map_err(|e| SceneError::serde(format!("encode document: {e}")))?;
        if let Value::Object(map) = &mut v {
            map.insert("layers".to_owned(), Value::Array(Vec::new()));
        }
        Ok(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/hydrate.rs"]
mod tests;
