use std::collections::BTreeMap;

use crate::{
    animation::ease::Ease,
    animation::keyframes::{Property, Repeat, Schedule, Timing},
    document::model::LoopEffect,
    foundation::core::{Rng64, seed_from_str},
    foundation::error::SceneResult,
};

const FLY_DISTANCE: f64 = 150.0;
const FLY_WOBBLE: f64 = 10.0;
const WANDER_RADIUS: f64 = 80.0;
const WANDER_WAYPOINTS: usize = 6;
const WANDER_PERIOD_FACTOR: f64 = 6.0;

/// Fallback base duration when a layer gives none.
pub const DEFAULT_LOOP_BASE_MS: f64 = 1_000.0;

struct LoopPreset {
    tracks: BTreeMap<Property, Vec<f64>>,
    period_factor: f64,
    repeat: Repeat,
    ease: Ease,
}

fn mirror<const N: usize>(tracks: [(Property, Vec<f64>); N], period_factor: f64) -> LoopPreset {
    LoopPreset {
        tracks: BTreeMap::from(tracks),
        period_factor,
        repeat: Repeat::Mirror,
        ease: Ease::EaseInOut,
    }
}

fn linear_loop<const N: usize>(
    tracks: [(Property, Vec<f64>); N],
    period_factor: f64,
) -> LoopPreset {
    LoopPreset {
        tracks: BTreeMap::from(tracks),
        period_factor,
        repeat: Repeat::Loop,
        ease: Ease::Linear,
    }
}

fn fly_track(distance: f64) -> Vec<f64> {
    [0.0, 0.25, 0.5, 0.75, 1.0].iter().map(|s| s * distance).collect()
}

fn wobble_track() -> Vec<f64> {
    vec![0.0, -FLY_WOBBLE, 0.0, FLY_WOBBLE, 0.0]
}

fn preset(effect: LoopEffect) -> Option<LoopPreset> {
    use Property::*;

    let p = match effect {
        LoopEffect::Float => mirror([(Y, vec![0.0, -10.0, 0.0])], 3.0),
        LoopEffect::Pulse => mirror([(Scale, vec![1.0, 1.05, 1.0])], 2.0),
        LoopEffect::Sway => mirror([(Rotate, vec![-5.0, 5.0, -5.0])], 2.5),
        LoopEffect::Spin => linear_loop([(Rotate, vec![0.0, 360.0])], 4.0),
        LoopEffect::Glow => mirror(
            [(Glow, vec![0.0, 12.0, 0.0]), (Opacity, vec![1.0, 0.85, 1.0])],
            2.0,
        ),
        LoopEffect::Heartbeat => mirror([(Scale, vec![1.0, 1.15, 1.0, 1.15, 1.0])], 1.5),
        LoopEffect::Sparkle => mirror(
            [(Opacity, vec![1.0, 0.4, 1.0]), (Scale, vec![1.0, 0.85, 1.0])],
            1.5,
        ),
        LoopEffect::FlapBob => mirror(
            [(ScaleY, vec![1.0, 0.7, 1.0]), (Y, vec![0.0, -4.0, 0.0])],
            0.6,
        ),
        LoopEffect::FloatFlap => mirror(
            [
                (Y, vec![0.0, -15.0, 0.0]),
                (ScaleY, vec![1.0, 0.8, 1.0]),
                (Rotate, vec![-3.0, 3.0, -3.0]),
            ],
            2.0,
        ),
        LoopEffect::FlyLeft => linear_loop(
            [(X, fly_track(-FLY_DISTANCE)), (Y, wobble_track())],
            5.0,
        ),
        LoopEffect::FlyRight => linear_loop(
            [(X, fly_track(FLY_DISTANCE)), (Y, wobble_track())],
            5.0,
        ),
        LoopEffect::FlyUp => linear_loop(
            [(Y, fly_track(-FLY_DISTANCE)), (X, wobble_track())],
            5.0,
        ),
        LoopEffect::FlyDown => linear_loop(
            [(Y, fly_track(FLY_DISTANCE)), (X, wobble_track())],
            5.0,
        ),
        LoopEffect::FlyRandom => return None,
    };
    Some(p)
}

/// Build the infinite schedule for a looping effect.
///
/// `base_ms` is the layer's configured duration; non-positive values fall back to
/// [`DEFAULT_LOOP_BASE_MS`]. `seed_key` feeds the `fly-random` waypoints so the same layer
/// always wanders the same route.
pub fn loop_schedule(effect: LoopEffect, base_ms: f64, seed_key: &str) -> SceneResult<Schedule> {
    let base_ms = if base_ms.is_finite() && base_ms > 0.0 {
        base_ms
    } else {
        DEFAULT_LOOP_BASE_MS
    };

    let Some(p) = preset(effect) else {
        return wander_schedule(base_ms * WANDER_PERIOD_FACTOR, seed_key);
    };

    Schedule::uniform(
        p.tracks,
        Timing {
            duration_ms: base_ms * p.period_factor,
            delay_ms: 0.0,
            repeat: p.repeat,
            ease: p.ease,
        },
    )
}

fn wander_schedule(duration_ms: f64, seed_key: &str) -> SceneResult<Schedule> {
    let mut rng = Rng64::new(seed_from_str(seed_key));
    let mut xs = vec![0.0];
    let mut ys = vec![0.0];
    let mut rs = vec![0.0];
    for _ in 0..WANDER_WAYPOINTS {
        xs.push(rng.range_f64(-WANDER_RADIUS, WANDER_RADIUS));
        ys.push(rng.range_f64(-WANDER_RADIUS, WANDER_RADIUS));
        rs.push(rng.range_f64(-15.0, 15.0));
    }
    // Close the loop so replays start where the previous pass ended.
    xs.push(0.0);
    ys.push(0.0);
    rs.push(0.0);

    let mut tracks = BTreeMap::new();
    tracks.insert(Property::X, xs);
    tracks.insert(Property::Y, ys);
    tracks.insert(Property::Rotate, rs);
    Schedule::uniform(
        tracks,
        Timing {
            duration_ms,
            delay_ms: 0.0,
            repeat: Repeat::Loop,
            ease: Ease::EaseInOut,
        },
    )
}

#[cfg(test)]
#[path = "../../tests/unit/animation/looping.rs"]
mod tests;
