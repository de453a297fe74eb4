use std::collections::BTreeMap;

use crate::{
    animation::ease::Ease,
    foundation::core::Vec2,
    foundation::error::{SceneError, SceneResult},
};

/// Interpolation contract for animation value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

/// Transform channel animated by a [`Schedule`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Property {
    /// Horizontal translation in canvas pixels.
    X,
    /// Vertical translation in canvas pixels.
    Y,
    /// Rotation in degrees.
    Rotate,
    /// Uniform scale factor.
    Scale,
    /// Vertical-only scale factor (wing flaps).
    ScaleY,
    /// Opacity multiplier in `[0, 1]`.
    Opacity,
    /// Glow (drop-shadow) radius in pixels.
    Glow,
}

impl Property {
    /// Value used when a schedule does not animate this channel.
    pub fn identity(self) -> f64 {
        match self {
            Self::Scale | Self::ScaleY | Self::Opacity => 1.0,
            Self::X | Self::Y | Self::Rotate | Self::Glow => 0.0,
        }
    }
}

/// How playback continues once a schedule reaches its end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Repeat {
    /// Play once and hold the final keyframe.
    #[default]
    Once,
    /// Restart from the first keyframe (linear replay).
    Loop,
    /// Alternate forward and backward playback.
    Mirror,
}

/// Playback timing for a keyframe schedule.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timing {
    /// Length of one pass over the keyframes.
    pub duration_ms: f64,
    /// Time before the first pass starts.
    pub delay_ms: f64,
    /// Repeat policy.
    pub repeat: Repeat,
    /// Easing applied between adjacent keyframes.
    pub ease: Ease,
}

impl Timing {
    /// Map elapsed wall time onto normalized pass progress in `[0, 1]`.
    pub fn progress_at(&self, elapsed_ms: f64) -> f64 {
        let local = elapsed_ms - self.delay_ms;
        if local <= 0.0 || !local.is_finite() {
            return 0.0;
        }
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        let passes = local / self.duration_ms;
        match self.repeat {
            Repeat::Once => passes.min(1.0),
            Repeat::Loop => passes.fract(),
            Repeat::Mirror => {
                let cycle = passes % 2.0;
                if cycle <= 1.0 { cycle } else { 2.0 - cycle }
            }
        }
    }

    /// Return `true` when playback never ends.
    pub fn is_infinite(&self) -> bool {
        !matches!(self.repeat, Repeat::Once)
    }
}

/// Keyframe values for several channels sharing one normalized time partition.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Schedule {
    /// Normalized keyframe times, non-decreasing, starting at `0` and ending at `1`.
    pub times: Vec<f64>,
    /// Per-channel keyframe values; each has the same length as `times`.
    pub tracks: BTreeMap<Property, Vec<f64>>,
    /// Playback timing.
    pub timing: Timing,
}

/// One sampled transform, with identity values for channels a schedule does not drive.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TransformSample {
    /// Horizontal translation.
    pub x: f64,
    /// Vertical translation.
    pub y: f64,
    /// Rotation in degrees.
    pub rotate: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Vertical scale.
    pub scale_y: f64,
    /// Opacity multiplier.
    pub opacity: f64,
    /// Glow radius.
    pub glow: f64,
}

impl Default for TransformSample {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotate: 0.0,
            scale: 1.0,
            scale_y: 1.0,
            opacity: 1.0,
            glow: 0.0,
        }
    }
}

/// Uniform time partition `i / (n - 1)` for `n` keyframes.
pub fn uniform_times(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let last = (n - 1) as f64;
            (0..n).map(|i| i as f64 / last).collect()
        }
    }
}

impl Schedule {
    /// Build a schedule with a uniform time partition.
    pub fn uniform(tracks: BTreeMap<Property, Vec<f64>>, timing: Timing) -> SceneResult<Self> {
        let n = tracks.values().map(Vec::len).max().unwrap_or(0);
        let s = Self {
            times: uniform_times(n),
            tracks,
            timing,
        };
        s.validate()?;
        Ok(s)
    }

    /// Validate partition shape and track lengths.
    pub fn validate(&self) -> SceneResult<()> {
        if self.times.len() < 2 {
            return Err(SceneError::animation("schedule needs at least two keyframes"));
        }
        if !self.times.windows(2).all(|w| w[0] <= w[1]) {
            return Err(SceneError::animation("schedule times must be non-decreasing"));
        }
        let first = self.times[0];
        let last = self.times[self.times.len() - 1];
        if first != 0.0 || last != 1.0 {
            return Err(SceneError::animation("schedule times must span [0, 1]"));
        }
        for (prop, values) in &self.tracks {
            if values.len() != self.times.len() {
                return Err(SceneError::animation(format!(
                    "track {prop:?} has {} keyframes, expected {}",
                    values.len(),
                    self.times.len()
                )));
            }
        }
        Ok(())
    }

    /// Keyframe values for one channel, if animated.
    pub fn track(&self, prop: Property) -> Option<&[f64]> {
        self.tracks.get(&prop).map(Vec::as_slice)
    }

    /// Total length of one pass in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.timing.duration_ms / 1000.0
    }

    /// Sample one channel at normalized pass progress `p`.
    pub fn sample_property(&self, prop: Property, p: f64) -> f64 {
        let Some(values) = self.tracks.get(&prop) else {
            return prop.identity();
        };
        if values.is_empty() {
            return prop.identity();
        }

        let p = p.clamp(0.0, 1.0);
        let idx = self.times.partition_point(|&t| t <= p);
        if idx == 0 {
            return values[0];
        }
        if idx >= values.len() {
            return values[values.len() - 1];
        }

        let (ta, tb) = (self.times[idx - 1], self.times[idx]);
        let span = tb - ta;
        if span <= 0.0 {
            return values[idx - 1];
        }
        let te = self.timing.ease.apply((p - ta) / span);
        <f64 as Lerp>::lerp(&values[idx - 1], &values[idx], te)
    }

    /// Sample every channel at `elapsed_ms` since playback start.
    pub fn sample(&self, elapsed_ms: f64) -> TransformSample {
        let p = self.timing.progress_at(elapsed_ms);
        TransformSample {
            x: self.sample_property(Property::X, p),
            y: self.sample_property(Property::Y, p),
            rotate: self.sample_property(Property::Rotate, p),
            scale: self.sample_property(Property::Scale, p),
            scale_y: self.sample_property(Property::ScaleY, p),
            opacity: self.sample_property(Property::Opacity, p),
            glow: self.sample_property(Property::Glow, p),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframes.rs"]
mod tests;
