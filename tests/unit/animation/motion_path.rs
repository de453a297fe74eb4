use proptest::prelude::*;

use super::*;
use crate::document::model::{AnimationConfig, DecorationConfig, PathPoint, TextStyle};

fn text_layer(x: f64, y: f64, w: f64, h: f64) -> Layer {
    let mut l = Layer::new(LayerContent::Text {
        content: "hi".to_owned(),
        text_style: TextStyle::default(),
    });
    l.x = x;
    l.y = y;
    l.width = w;
    l.height = h;
    l
}

fn path(points: Vec<PathPoint>, duration: f64, looping: bool) -> MotionPathConfig {
    MotionPathConfig {
        enabled: true,
        points,
        duration,
        looping,
    }
}

#[test]
fn three_point_path_keyframes() {
    let layer = text_layer(0.0, 0.0, 80.0, 40.0);
    let (hw, hh) = (40.0, 20.0);
    let cfg = path(
        vec![
            PathPoint::at(0.0, 0.0),
            PathPoint::at(100.0, 0.0),
            PathPoint::at(100.0, 100.0),
        ],
        3000.0,
        false,
    );
    let s = path_schedule(&cfg, layer.center()).unwrap();
    assert_eq!(s.track(Property::X).unwrap(), &[-hw, 100.0 - hw, 100.0 - hw]);
    assert_eq!(s.track(Property::Y).unwrap(), &[-hh, -hh, 100.0 - hh]);
    assert_eq!(s.times, vec![0.0, 0.5, 1.0]);
    assert_eq!(s.duration_secs(), 3.0);
    assert_eq!(s.timing.repeat, Repeat::Once);
    assert_eq!(s.timing.ease, Ease::Linear);
}

#[test]
fn looping_path_repeats() {
    let cfg = path(vec![PathPoint::at(0.0, 0.0), PathPoint::at(1.0, 1.0)], 1000.0, true);
    let s = path_schedule(&cfg, Point::ZERO).unwrap();
    assert_eq!(s.timing.repeat, Repeat::Loop);
}

#[test]
fn rotation_and_scale_default_per_point() {
    let mut b = PathPoint::at(10.0, 0.0);
    b.rotation = Some(45.0);
    b.scale = Some(2.0);
    let cfg = path(vec![PathPoint::at(0.0, 0.0), b], 1000.0, false);
    let s = path_schedule(&cfg, Point::ZERO).unwrap();
    assert_eq!(s.track(Property::Rotate).unwrap(), &[0.0, 45.0]);
    assert_eq!(s.track(Property::Scale).unwrap(), &[1.0, 2.0]);
}

#[test]
fn degenerate_paths_produce_nothing() {
    let one = path(vec![PathPoint::at(0.0, 0.0)], 1000.0, false);
    assert!(path_schedule(&one, Point::ZERO).is_none());

    let mut disabled = path(vec![PathPoint::at(0.0, 0.0), PathPoint::at(1.0, 0.0)], 1000.0, false);
    disabled.enabled = false;
    assert!(path_schedule(&disabled, Point::ZERO).is_none());

    let zero = path(vec![PathPoint::at(0.0, 0.0), PathPoint::at(1.0, 0.0)], 0.0, false);
    assert!(path_schedule(&zero, Point::ZERO).is_none());
}

#[test]
fn path_takes_precedence_over_loop() {
    let mut layer = text_layer(0.0, 0.0, 10.0, 10.0);
    layer.animation = Some(AnimationConfig {
        looping: Some(LoopEffect::Float),
        ..AnimationConfig::default()
    });
    layer.motion_path_config = Some(path(
        vec![PathPoint::at(0.0, 0.0), PathPoint::at(5.0, 5.0)],
        1000.0,
        false,
    ));
    let plan = resolve_motion(&layer, 800.0).unwrap().unwrap();
    assert!(matches!(plan, MotionPlan::Path { .. }));

    layer.motion_path_config.as_mut().unwrap().enabled = false;
    let plan = resolve_motion(&layer, 800.0).unwrap().unwrap();
    assert!(matches!(
        plan,
        MotionPlan::Loop {
            effect: LoopEffect::Float,
            ..
        }
    ));
}

#[test]
fn decoration_preset_is_used_without_explicit_loop() {
    let layer = Layer::new(LayerContent::MotionDecoration {
        decoration_config: DecorationConfig {
            asset_url: "bird.png".to_owned(),
            preset: Some(LoopEffect::FlapBob),
        },
    });
    let plan = resolve_motion(&layer, 800.0).unwrap().unwrap();
    assert!(matches!(
        plan,
        MotionPlan::Loop {
            effect: LoopEffect::FlapBob,
            ..
        }
    ));
}

#[test]
fn plain_layer_has_no_motion() {
    let layer = text_layer(0.0, 0.0, 10.0, 10.0);
    assert!(resolve_motion(&layer, 800.0).unwrap().is_none());
}

proptest! {
    #[test]
    fn path_keyframes_track_points(
        pts in prop::collection::vec((-500.0f64..500.0, -500.0f64..500.0), 2..12),
        x in -200.0f64..200.0,
        y in -200.0f64..200.0,
        w in 0.0f64..300.0,
        h in 0.0f64..300.0,
        duration in 1.0f64..10_000.0,
    ) {
        let layer = text_layer(x, y, w, h);
        let cfg = path(pts.iter().map(|&(px, py)| PathPoint::at(px, py)).collect(), duration, false);
        let s = path_schedule(&cfg, layer.center()).unwrap();

        prop_assert_eq!(s.times.len(), pts.len());
        prop_assert_eq!(s.times[0], 0.0);
        prop_assert_eq!(s.times[s.times.len() - 1], 1.0);
        prop_assert!(s.times.windows(2).all(|w| w[0] < w[1]));

        let xs = s.track(Property::X).unwrap();
        let ys = s.track(Property::Y).unwrap();
        for (i, &(px, py)) in pts.iter().enumerate() {
            prop_assert!((xs[i] - (px - (x + w / 2.0))).abs() < 1e-9);
            prop_assert!((ys[i] - (py - (y + h / 2.0))).abs() < 1e-9);
        }
        prop_assert!((s.duration_secs() - duration / 1000.0).abs() < 1e-12);
    }
}
