use super::*;

#[test]
fn fade_in_starts_transparent_and_blurred() {
    let v = EntranceVariants::new(Entrance::FadeIn, 0.0, 800.0, Ease::EaseOut);
    assert_eq!(v.hidden.opacity, 0.0);
    assert!(v.hidden.blur_px > 0.0);
    assert_eq!(v.visible, VisualState::RESTING);
    assert_eq!(v.sample(0.0), v.hidden);
    assert_eq!(v.sample(800.0), v.visible);
}

#[test]
fn slide_directions_offset_opposite_to_motion() {
    let up = EntranceVariants::new(Entrance::SlideUp, 0.0, 500.0, Ease::Linear);
    assert!(up.hidden.offset.y > 0.0);
    let down = EntranceVariants::new(Entrance::SlideDown, 0.0, 500.0, Ease::Linear);
    assert!(down.hidden.offset.y < 0.0);
    let left = EntranceVariants::new(Entrance::SlideLeft, 0.0, 500.0, Ease::Linear);
    assert!(left.hidden.offset.x > 0.0);
    let right = EntranceVariants::new(Entrance::SlideRight, 0.0, 500.0, Ease::Linear);
    assert!(right.hidden.offset.x < 0.0);
    let edge = EntranceVariants::new(Entrance::SlideInFromEdge, 0.0, 500.0, Ease::Linear);
    assert!(edge.hidden.offset.x < right.hidden.offset.x);
}

#[test]
fn zoom_styles_scale_from_opposite_sides() {
    let zin = EntranceVariants::new(Entrance::ZoomIn, 0.0, 500.0, Ease::Linear);
    let zout = EntranceVariants::new(Entrance::ZoomOut, 0.0, 500.0, Ease::Linear);
    assert!(zin.hidden.scale < 1.0);
    assert!(zout.hidden.scale > 1.0);
}

#[test]
fn bounce_and_pop_use_their_own_curves() {
    let b = EntranceVariants::new(Entrance::Bounce, 0.0, 500.0, Ease::Linear);
    assert_eq!(b.timing.ease, Ease::BounceOut);
    let p = EntranceVariants::new(Entrance::PopIn, 0.0, 500.0, Ease::Linear);
    assert_eq!(p.timing.ease, Ease::BackOut);
    assert_eq!(p.hidden.scale, 0.0);
}

#[test]
fn linear_midpoint_and_delay() {
    let v = EntranceVariants::new(Entrance::SlideUp, 100.0, 1000.0, Ease::Linear);
    assert_eq!(v.sample(50.0), v.hidden);
    let mid = v.sample(600.0);
    assert!((mid.opacity - 0.5).abs() < 1e-9);
    assert!((mid.offset.y - 25.0).abs() < 1e-9);
    assert_eq!(v.total_ms(), 1100.0);
}

#[test]
fn instant_variant_skips_transition() {
    let v = EntranceVariants::new(Entrance::FadeIn, 300.0, 800.0, Ease::EaseOut).instant();
    assert_eq!(v.timing.duration_ms, 0.0);
    assert_eq!(v.timing.delay_ms, 0.0);
    assert_eq!(v.sample(0.0), VisualState::RESTING);
}

#[test]
fn none_entrance_is_always_resting() {
    let v = EntranceVariants::new(Entrance::None, 0.0, 800.0, Ease::EaseOut);
    assert_eq!(v.hidden, VisualState::RESTING);
    assert_eq!(v.timing.duration_ms, 0.0);
}
