use super::*;

fn timing(repeat: Repeat) -> Timing {
    Timing {
        duration_ms: 1000.0,
        delay_ms: 0.0,
        repeat,
        ease: Ease::Linear,
    }
}

fn x_schedule(values: Vec<f64>, repeat: Repeat) -> Schedule {
    let mut tracks = BTreeMap::new();
    tracks.insert(Property::X, values);
    Schedule::uniform(tracks, timing(repeat)).unwrap()
}

#[test]
fn uniform_partition_shapes() {
    assert!(uniform_times(0).is_empty());
    assert_eq!(uniform_times(1), vec![0.0]);
    assert_eq!(uniform_times(3), vec![0.0, 0.5, 1.0]);
    assert_eq!(uniform_times(5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
}

#[test]
fn linear_sampling_between_keys() {
    let s = x_schedule(vec![0.0, 10.0, 30.0], Repeat::Once);
    assert_eq!(s.sample(0.0).x, 0.0);
    assert!((s.sample(250.0).x - 5.0).abs() < 1e-9);
    assert!((s.sample(750.0).x - 20.0).abs() < 1e-9);
    assert_eq!(s.sample(5000.0).x, 30.0);
}

#[test]
fn unanimated_channels_sample_identity() {
    let s = x_schedule(vec![0.0, 10.0], Repeat::Once);
    let t = s.sample(500.0);
    assert_eq!(t.scale, 1.0);
    assert_eq!(t.opacity, 1.0);
    assert_eq!(t.rotate, 0.0);
}

#[test]
fn loop_restarts_and_mirror_reverses() {
    let looped = x_schedule(vec![0.0, 100.0], Repeat::Loop);
    assert!((looped.sample(1250.0).x - 25.0).abs() < 1e-9);

    let mirrored = x_schedule(vec![0.0, 100.0], Repeat::Mirror);
    assert!((mirrored.sample(1250.0).x - 75.0).abs() < 1e-9);
    assert!((mirrored.sample(2250.0).x - 25.0).abs() < 1e-9);
}

#[test]
fn delay_holds_first_keyframe() {
    let mut s = x_schedule(vec![4.0, 8.0], Repeat::Once);
    s.timing.delay_ms = 200.0;
    assert_eq!(s.sample(100.0).x, 4.0);
    assert!((s.sample(700.0).x - 6.0).abs() < 1e-9);
}

#[test]
fn validate_rejects_mismatched_track_lengths() {
    let mut tracks = BTreeMap::new();
    tracks.insert(Property::X, vec![0.0, 1.0, 2.0]);
    tracks.insert(Property::Y, vec![0.0, 1.0]);
    assert!(Schedule::uniform(tracks, timing(Repeat::Once)).is_err());
}

#[test]
fn validate_rejects_single_keyframe() {
    let mut tracks = BTreeMap::new();
    tracks.insert(Property::X, vec![1.0]);
    assert!(Schedule::uniform(tracks, timing(Repeat::Once)).is_err());
}

#[test]
fn vec2_lerp_midpoint() {
    let m = <Vec2 as Lerp>::lerp(&Vec2::new(0.0, 0.0), &Vec2::new(10.0, -4.0), 0.5);
    assert_eq!(m, Vec2::new(5.0, -2.0));
}
