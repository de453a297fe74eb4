use std::collections::BTreeMap;

use crate::{
    animation::ease::Ease,
    animation::keyframes::{Property, Repeat, Schedule, Timing},
    animation::looping::loop_schedule,
    document::model::{Layer, LayerContent, LoopEffect, MotionPathConfig},
    foundation::core::Point,
    foundation::error::SceneResult,
};

/// Convert a motion path into a keyframe schedule for an element anchored at `center`.
///
/// Each point names where the element *center* should be, so translations are
/// `point - center`. Rotation defaults to `0` and scale to `1` where a point omits them;
/// both compose with the layer's own transform. Returns `None` when the path is disabled,
/// has fewer than two points, or has no positive duration.
pub fn path_schedule(path: &MotionPathConfig, center: Point) -> Option<Schedule> {
    if !path.enabled || path.points.len() < 2 {
        return None;
    }
    if !(path.duration.is_finite() && path.duration > 0.0) {
        return None;
    }

    let mut tracks = BTreeMap::new();
    tracks.insert(
        Property::X,
        path.points.iter().map(|p| p.x - center.x).collect(),
    );
    tracks.insert(
        Property::Y,
        path.points.iter().map(|p| p.y - center.y).collect(),
    );
    tracks.insert(
        Property::Rotate,
        path.points
            .iter()
            .map(|p| p.rotation.unwrap_or(0.0))
            .collect(),
    );
    tracks.insert(
        Property::Scale,
        path.points.iter().map(|p| p.scale.unwrap_or(1.0)).collect(),
    );

    let timing = Timing {
        duration_ms: path.duration,
        delay_ms: 0.0,
        repeat: if path.looping {
            Repeat::Loop
        } else {
            Repeat::Once
        },
        ease: Ease::Linear,
    };
    // Track lengths all equal `points.len()`, so validation cannot fail here.
    Schedule::uniform(tracks, timing).ok()
}

/// Continuous motion a layer plays once visible.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum MotionPlan {
    /// Custom multi-point path.
    Path {
        /// Path keyframes.
        schedule: Schedule,
    },
    /// Catalogue looping effect.
    Loop {
        /// Effect name.
        effect: LoopEffect,
        /// Effect keyframes.
        schedule: Schedule,
    },
}

impl MotionPlan {
    /// Keyframes of the plan.
    pub fn schedule(&self) -> &Schedule {
        match self {
            Self::Path { schedule } | Self::Loop { schedule, .. } => schedule,
        }
    }
}

/// Resolve the continuous motion of a layer.
///
/// An enabled motion path wins over a looping effect. Motion decorations without an
/// explicit loop fall back to their preset. `default_base_ms` sizes loops whose layer
/// has no configured duration.
pub fn resolve_motion(layer: &Layer, default_base_ms: f64) -> SceneResult<Option<MotionPlan>> {
    if let Some(path) = &layer.motion_path_config
        && let Some(schedule) = path_schedule(path, layer.center())
    {
        return Ok(Some(MotionPlan::Path { schedule }));
    }

    let configured = layer.animation.as_ref().and_then(|a| a.looping);
    let preset = match &layer.content {
        LayerContent::MotionDecoration { decoration_config } => decoration_config.preset,
        _ => None,
    };
    let Some(effect) = configured.or(preset) else {
        return Ok(None);
    };

    let base_ms = layer
        .animation
        .as_ref()
        .and_then(|a| a.duration_ms)
        .unwrap_or(default_base_ms);
    let schedule = loop_schedule(effect, base_ms, layer.id.as_str())?;
    Ok(Some(MotionPlan::Loop { effect, schedule }))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/motion_path.rs"]
mod tests;
