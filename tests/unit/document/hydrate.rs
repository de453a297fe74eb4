use serde_json::json;

use super::*;
use crate::document::model::LayerKind;

#[test]
fn sections_without_elements_or_ids_are_repaired() {
    let (doc, report) = hydrate_value(json!({
        "name": "Legacy",
        "sections": [
            {"title": "Cover"},
            {"id": "s2", "title": "Story", "elements": []}
        ]
    }))
    .unwrap();
    assert_eq!(doc.sections.len(), 2);
    assert!(doc.sections[0].elements.is_empty());
    assert!(!doc.sections[0].id.is_blank());
    assert_eq!(doc.sections[1].id.as_str(), "s2");
    assert_eq!(report.defaulted_element_arrays, 1);
    assert_eq!(report.generated_section_ids, 1);
}

#[test]
fn legacy_layers_pool_moves_into_first_section() {
    let (doc, report) = hydrate_value(json!({
        "layers": [{"id": "L1", "type": "text", "width": 10, "height": 10}]
    }))
    .unwrap();
    assert_eq!(doc.sections.len(), 1);
    assert_eq!(doc.sections[0].elements[0].id.as_str(), "L1");
    assert_eq!(report.migrated_legacy_layers, 1);
}

#[test]
fn undecodable_layers_are_dropped_not_fatal() {
    let (doc, report) = hydrate_value(json!({
        "sections": [{
            "id": "s1",
            "elements": [
                {"id": "ok", "type": "image", "imageUrl": "a.png"},
                {"id": "bad", "type": "hologram"},
                42
            ]
        }]
    }))
    .unwrap();
    assert_eq!(doc.sections[0].elements.len(), 1);
    assert_eq!(doc.sections[0].elements[0].kind(), LayerKind::Image);
    assert_eq!(report.dropped.len(), 2);
}

#[test]
fn blank_and_duplicate_layer_ids_are_regenerated() {
    let (doc, report) = hydrate_value(json!({
        "sections": [{
            "id": "s1",
            "elements": [
                {"type": "text"},
                {"id": "dup", "type": "text"},
                {"id": "dup", "type": "text"}
            ]
        }]
    }))
    .unwrap();
    let ids: Vec<&str> = doc.sections[0].elements.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids[1], "dup");
    assert_ne!(ids[2], "dup");
    assert!(!ids[0].is_empty());
    assert_eq!(report.generated_layer_ids, 2);
    doc.validate().unwrap();
}

#[test]
fn out_of_range_paint_is_clamped() {
    let (doc, report) = hydrate_value(json!({
        "sections": [{"id": "s1", "elements": [
            {"id": "L1", "type": "shape", "opacity": 3.5, "width": -4}
        ]}]
    }))
    .unwrap();
    let l = &doc.sections[0].elements[0];
    assert_eq!(l.opacity, 1.0);
    assert_eq!(l.width, 0.0);
    assert_eq!(report.clamped_layers, 1);
}

#[test]
fn bad_scalar_fields_keep_identity() {
    let (doc, report) = hydrate_value(json!({
        "id": "d1", "slug": "our-day", "zoom": "huge",
        "sections": [{"id": "s1"}]
    }))
    .unwrap();
    assert_eq!(doc.id, "d1");
    assert_eq!(doc.slug, "our-day");
    assert_eq!(doc.zoom, 1.0);
    assert_eq!(doc.sections.len(), 1);
    assert!(!report.dropped.is_empty());
}

#[test]
fn non_object_root_is_rejected() {
    assert!(hydrate_value(json!([1, 2, 3])).is_err());
}

#[test]
fn empty_shell_detection() {
    assert!(is_empty_shell(&json!({"sections": [], "layers": []})));
    assert!(is_empty_shell(&json!({"name": "x"})));
    assert!(is_empty_shell(&json!(null)));
    assert!(!is_empty_shell(&json!({"sections": [{"id": "s"}]})));
    assert!(!is_empty_shell(&json!({"layers": [{"id": "L", "type": "text"}]})));
}

#[test]
fn clean_document_reports_clean() {
    let (_, report) = hydrate_value(json!({
        "id": "d", "sections": [{"id": "s1", "elements": [
            {"id": "L1", "type": "text", "width": 10, "height": 5}
        ]}]
    }))
    .unwrap();
    assert!(report.is_clean(), "{report:?}");
}

#[test]
fn serialized_record_has_empty_legacy_pool() {
    let (doc, _) = hydrate_value(json!({"id": "d", "sections": []})).unwrap();
    let v = doc.to_json_value().unwrap();
    assert_eq!(v["layers"], json!([]));
    assert_eq!(v["zoom"], 1.0);
    assert_eq!(v["pan"], json!({"x": 0.0, "y": 0.0}));
}

#[test]
fn zoom_points_outside_the_canvas_are_dropped() {
    let (doc, report) = hydrate_value(json!({
        "id": "d", "sections": [{"id": "s1", "elements": [], "zoomConfig": {
            "enabled": true,
            "points": [
                {"label": "rings", "targetRegion": {"x": 10, "y": 10, "width": 100, "height": 100}},
                {"label": "beyond", "targetRegion": {"x": 380, "y": 10, "width": 100, "height": 100}}
            ]
        }}]
    }))
    .unwrap();
    let points = &doc.sections[0].zoom_config.as_ref().unwrap().points;
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].label, "rings");
    assert_eq!(report.dropped.len(), 1);
    assert!(report.dropped[0].contains("zoom point 1"), "{:?}", report.dropped);
    doc.validate().unwrap();
}
