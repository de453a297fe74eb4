use super::*;
use crate::document::model::ZoomPoint;

fn canvas() -> CanvasSize {
    CanvasSize {
        width: 400.0,
        height: 800.0,
    }
}

fn point(x: f64, y: f64, w: f64, h: f64) -> ZoomPoint {
    ZoomPoint {
        label: String::new(),
        color: None,
        target_region: ZoomRegion {
            x,
            y,
            width: w,
            height: h,
        },
    }
}

fn config(direction: ZoomDirection, behavior: ZoomBehavior, points: Vec<ZoomPoint>) -> ZoomConfig {
    ZoomConfig {
        enabled: true,
        direction,
        behavior,
        scale: 4.0,
        transition_duration_ms: 1000.0,
        hold_duration_ms: 500.0,
        points,
        ..ZoomConfig::default()
    }
}

#[test]
fn frame_region_centers_and_fits() {
    let cam = frame_region(point(100.0, 200.0, 200.0, 400.0).target_region, canvas(), 4.0);
    assert_eq!(cam.scale, 2.0);
    // Region center (200, 400) maps to canvas center (200, 400).
    assert_eq!(cam.translate, Vec2::new(200.0 - 400.0, 400.0 - 800.0));
}

#[test]
fn frame_region_respects_scale_cap() {
    let cam = frame_region(point(0.0, 0.0, 10.0, 10.0).target_region, canvas(), 2.5);
    assert_eq!(cam.scale, 2.5);
    let wide = frame_region(point(0.0, 0.0, 800.0, 800.0).target_region, canvas(), 2.5);
    assert_eq!(wide.scale, 1.0);
}

#[test]
fn zoom_in_with_reset_returns_to_identity() {
    let cfg = config(
        ZoomDirection::In,
        ZoomBehavior::Reset,
        vec![point(100.0, 200.0, 200.0, 400.0)],
    );
    let s = zoom_schedule(&cfg, canvas()).unwrap();
    // move + hold + move back
    assert_eq!(s.timing.duration_ms, 2500.0);
    assert_eq!(camera_at(&s, 0.0), Camera::IDENTITY);
    assert_eq!(camera_at(&s, 1200.0).scale, 2.0);
    assert_eq!(camera_at(&s, 2500.0), Camera::IDENTITY);
}

#[test]
fn zoom_in_with_stay_holds_last_point() {
    let cfg = config(
        ZoomDirection::In,
        ZoomBehavior::Stay,
        vec![point(0.0, 0.0, 100.0, 200.0), point(100.0, 200.0, 200.0, 400.0)],
    );
    let s = zoom_schedule(&cfg, canvas()).unwrap();
    assert_eq!(s.timing.duration_ms, 3000.0);
    assert_eq!(camera_at(&s, 10_000.0).scale, 2.0);
}

#[test]
fn zoom_out_starts_on_point() {
    let cfg = config(
        ZoomDirection::Out,
        ZoomBehavior::Reset,
        vec![point(0.0, 0.0, 100.0, 200.0)],
    );
    let s = zoom_schedule(&cfg, canvas()).unwrap();
    assert_eq!(camera_at(&s, 0.0).scale, 4.0);
    assert_eq!(camera_at(&s, s.timing.duration_ms), Camera::IDENTITY);
}

#[test]
fn disabled_or_empty_zoom_has_no_schedule() {
    let mut cfg = config(ZoomDirection::In, ZoomBehavior::Reset, Vec::new());
    assert!(zoom_schedule(&cfg, canvas()).is_none());
    cfg.points.push(point(0.0, 0.0, 10.0, 10.0));
    cfg.enabled = false;
    assert!(zoom_schedule(&cfg, canvas()).is_none());
}
