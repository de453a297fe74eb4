use crate::{
    animation::ease::Ease,
    animation::keyframes::Lerp,
    document::model::Entrance,
    foundation::core::Vec2,
};

const SLIDE_DISTANCE: f64 = 50.0;
const EDGE_DISTANCE: f64 = 300.0;
const BOUNCE_DROP: f64 = 100.0;
const FADE_BLUR_PX: f64 = 10.0;

/// Renderable visual state of an element at one instant of its entrance.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualState {
    /// Opacity multiplier.
    pub opacity: f64,
    /// Gaussian blur radius in pixels.
    pub blur_px: f64,
    /// Translation relative to the element's resting position.
    pub offset: Vec2,
    /// Scale relative to the element's own scale.
    pub scale: f64,
}

impl VisualState {
    /// Fully shown, untransformed.
    pub const RESTING: Self = Self {
        opacity: 1.0,
        blur_px: 0.0,
        offset: Vec2::ZERO,
        scale: 1.0,
    };

    const fn hidden_at(offset: Vec2, scale: f64) -> Self {
        Self {
            opacity: 0.0,
            blur_px: 0.0,
            offset,
            scale,
        }
    }
}

impl Lerp for VisualState {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            opacity: <f64 as Lerp>::lerp(&a.opacity, &b.opacity, t),
            blur_px: <f64 as Lerp>::lerp(&a.blur_px, &b.blur_px, t),
            offset: <Vec2 as Lerp>::lerp(&a.offset, &b.offset, t),
            scale: <f64 as Lerp>::lerp(&a.scale, &b.scale, t),
        }
    }
}

/// Timing of the hidden → visible transition.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntranceTiming {
    /// Delay before the transition starts.
    pub delay_ms: f64,
    /// Transition length; zero means an instant cut.
    pub duration_ms: f64,
    /// Easing curve.
    pub ease: Ease,
}

/// Hidden and visible keyframes of an entrance plus its timing.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct EntranceVariants {
    /// Style these variants were derived from.
    pub style: Entrance,
    /// State rendered while the element is hidden.
    pub hidden: VisualState,
    /// State the element settles in once visible.
    pub visible: VisualState,
    /// Transition timing.
    pub timing: EntranceTiming,
}

impl EntranceVariants {
    /// Derive the variants for an entrance style.
    ///
    /// `bounce` and `pop-in` carry their own easing curves; other styles use `ease`.
    pub fn new(style: Entrance, delay_ms: f64, duration_ms: f64, ease: Ease) -> Self {
        let hidden = match style {
            Entrance::None => VisualState::RESTING,
            Entrance::FadeIn => VisualState {
                blur_px: FADE_BLUR_PX,
                ..VisualState::hidden_at(Vec2::ZERO, 1.0)
            },
            Entrance::SlideUp => VisualState::hidden_at(Vec2::new(0.0, SLIDE_DISTANCE), 1.0),
            Entrance::SlideDown => VisualState::hidden_at(Vec2::new(0.0, -SLIDE_DISTANCE), 1.0),
            Entrance::SlideLeft => VisualState::hidden_at(Vec2::new(SLIDE_DISTANCE, 0.0), 1.0),
            Entrance::SlideRight => VisualState::hidden_at(Vec2::new(-SLIDE_DISTANCE, 0.0), 1.0),
            Entrance::SlideInFromEdge => {
                VisualState::hidden_at(Vec2::new(-EDGE_DISTANCE, 0.0), 1.0)
            }
            Entrance::ZoomIn => VisualState::hidden_at(Vec2::ZERO, 0.5),
            Entrance::ZoomOut => VisualState::hidden_at(Vec2::ZERO, 1.5),
            Entrance::Bounce => VisualState::hidden_at(Vec2::new(0.0, -BOUNCE_DROP), 1.0),
            Entrance::PopIn => VisualState::hidden_at(Vec2::ZERO, 0.0),
        };
        let ease = match style {
            Entrance::Bounce => Ease::BounceOut,
            Entrance::PopIn => Ease::BackOut,
            _ => ease,
        };
        let duration_ms = match style {
            Entrance::None => 0.0,
            _ => duration_ms.max(0.0),
        };
        Self {
            style,
            hidden,
            visible: VisualState::RESTING,
            timing: EntranceTiming {
                delay_ms: delay_ms.max(0.0),
                duration_ms,
                ease,
            },
        }
    }

    /// Same keyframes with a zero-length transition, for elements already shown before a remount.
    pub fn instant(mut self) -> Self {
        self.timing.delay_ms = 0.0;
        self.timing.duration_ms = 0.0;
        self
    }

    /// State `elapsed_ms` after the reveal started.
    pub fn sample(&self, elapsed_ms: f64) -> VisualState {
        let local = elapsed_ms - self.timing.delay_ms;
        if self.timing.duration_ms <= 0.0 {
            return if local >= 0.0 { self.visible } else { self.hidden };
        }
        if local <= 0.0 {
            return self.hidden;
        }
        let t = self.timing.ease.apply(local / self.timing.duration_ms);
        VisualState::lerp(&self.hidden, &self.visible, t)
    }

    /// Total time from reveal until the element rests.
    pub fn total_ms(&self) -> f64 {
        self.timing.delay_ms + self.timing.duration_ms
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/entrance.rs"]
mod tests;
