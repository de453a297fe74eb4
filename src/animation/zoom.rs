use std::collections::BTreeMap;

use crate::{
    animation::ease::Ease,
    animation::keyframes::{Property, Repeat, Schedule, Timing},
    document::model::{CanvasSize, ZoomBehavior, ZoomConfig, ZoomDirection, ZoomRegion},
    foundation::core::Vec2,
};

/// Camera transform applied to a whole section: `screen = canvas * scale + translate`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Camera {
    /// Uniform zoom factor.
    pub scale: f64,
    /// Translation after scaling.
    pub translate: Vec2,
}

impl Camera {
    /// Unzoomed camera.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate: Vec2::ZERO,
    };
}

/// Camera that frames `region` inside `canvas`, zooming at most `max_scale`.
///
/// The region center lands on the canvas center. Degenerate regions keep the identity
/// scale.
pub fn frame_region(region: ZoomRegion, canvas: CanvasSize, max_scale: f64) -> Camera {
    let fit = if region.width > 0.0 && region.height > 0.0 {
        (canvas.width / region.width).min(canvas.height / region.height)
    } else {
        1.0
    };
    let cap = if max_scale.is_finite() && max_scale >= 1.0 {
        max_scale
    } else {
        1.0
    };
    let scale = fit.clamp(1.0, cap);
    let c = region.rect().center();
    Camera {
        scale,
        translate: Vec2::new(
            canvas.width / 2.0 - c.x * scale,
            canvas.height / 2.0 - c.y * scale,
        ),
    }
}

struct Stop {
    at_ms: f64,
    camera: Camera,
}

/// Build the camera schedule for a section zoom sequence.
///
/// `in` moves from the full view to each point in order, holding on each one.
/// `out` cuts to each point and pulls back to the full view. With
/// [`ZoomBehavior::Reset`] an `in` sequence ends back at the full view; with
/// [`ZoomBehavior::Stay`] it holds the last point. The schedule plays once.
pub fn zoom_schedule(cfg: &ZoomConfig, canvas: CanvasSize) -> Option<Schedule> {
    if !cfg.enabled || cfg.points.is_empty() {
        return None;
    }
    let transition = cfg.transition_duration_ms.max(0.0);
    let hold = cfg.hold_duration_ms.max(0.0);
    let cameras: Vec<Camera> = cfg
        .points
        .iter()
        .map(|p| frame_region(p.target_region, canvas, cfg.scale))
        .collect();

    let mut stops = Vec::new();
    let mut t = 0.0;
    match cfg.direction {
        ZoomDirection::In => {
            stops.push(Stop {
                at_ms: 0.0,
                camera: Camera::IDENTITY,
            });
            for cam in &cameras {
                t += transition;
                stops.push(Stop {
                    at_ms: t,
                    camera: *cam,
                });
                t += hold;
                stops.push(Stop {
                    at_ms: t,
                    camera: *cam,
                });
            }
            if cfg.behavior == ZoomBehavior::Reset {
                t += transition;
                stops.push(Stop {
                    at_ms: t,
                    camera: Camera::IDENTITY,
                });
            }
        }
        ZoomDirection::Out => {
            for cam in &cameras {
                stops.push(Stop {
                    at_ms: t,
                    camera: *cam,
                });
                t += hold;
                stops.push(Stop {
                    at_ms: t,
                    camera: *cam,
                });
                t += transition;
                stops.push(Stop {
                    at_ms: t,
                    camera: Camera::IDENTITY,
                });
            }
        }
    }

    if t <= 0.0 {
        return None;
    }
    let times = stops.iter().map(|s| s.at_ms / t).collect();
    let mut tracks = BTreeMap::new();
    tracks.insert(
        Property::Scale,
        stops.iter().map(|s| s.camera.scale).collect(),
    );
    tracks.insert(
        Property::X,
        stops.iter().map(|s| s.camera.translate.x).collect(),
    );
    tracks.insert(
        Property::Y,
        stops.iter().map(|s| s.camera.translate.y).collect(),
    );

    let schedule = Schedule {
        times,
        tracks,
        timing: Timing {
            duration_ms: t,
            delay_ms: 0.0,
            repeat: Repeat::Once,
            ease: Ease::EaseInOut,
        },
    };
    schedule.validate().ok()?;
    Some(schedule)
}

/// Camera at `elapsed_ms` into a zoom schedule.
pub fn camera_at(schedule: &Schedule, elapsed_ms: f64) -> Camera {
    let s = schedule.sample(elapsed_ms);
    Camera {
        scale: s.scale,
        translate: Vec2::new(s.x, s.y),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/zoom.rs"]
mod tests;
