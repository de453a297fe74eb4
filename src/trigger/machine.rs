//! Per-element entrance state machine.
//!
//! An [`ElementRuntime`] starts `hidden` (or `visible` on a registry hit) and moves to
//! `visible` once its trigger conditions hold and its content is ready. Scroll-triggered
//! elements can fall back to `hidden` through the directional reset so they replay on
//! re-entry. Everything is driven by [`TriggerEvent`]s; no rendering lifecycle is assumed.

use crate::{
    animation::entrance::{EntranceVariants, VisualState},
    document::model::{Entrance, Layer, Trigger},
    foundation::config::EngineConfig,
    foundation::core::LayerId,
    trigger::registry::AnimationRegistry,
};

/// Entrance phase of one element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Not yet revealed.
    Hidden,
    /// Revealed; terminal for the mount unless reset.
    Visible,
}

/// Input delivered to an [`ElementRuntime`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerEvent {
    /// The element's asset finished loading.
    ContentReady,
    /// Clock update; drives the readiness safety timeout.
    Tick {
        /// Current time in milliseconds on the same clock used at mount.
        now_ms: f64,
    },
    /// Viewport intersection change of the element's mount node.
    Intersection {
        /// Whether any part of the element is in view.
        intersecting: bool,
        /// Top edge of the element relative to the viewport top.
        top: f64,
        /// Viewport height.
        viewport_height: f64,
    },
    /// The owning section became active or inactive.
    SectionActive(bool),
    /// Parent "open invitation" flag.
    ForceTrigger(bool),
    /// The element left the tree; later events are ignored.
    Unmount,
}

/// State change reported by [`ElementRuntime::handle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// `hidden → visible`.
    Revealed,
    /// `visible`/pending → `hidden` by the directional reset.
    Reset,
}

/// Entrance runtime of one mounted element.
#[derive(Clone, Debug)]
pub struct ElementRuntime {
    id: LayerId,
    trigger: Trigger,
    phase: Phase,
    entrance: EntranceVariants,
    variants: EntranceVariants,
    awaits_content: bool,
    content_ready: bool,
    pending: bool,
    intersecting: bool,
    section_active: bool,
    force_trigger: bool,
    armed: bool,
    ready_deadline_ms: Option<f64>,
    reset_viewport_factor: f64,
    mounted: bool,
    clock_ms: f64,
    revealed_at_ms: Option<f64>,
}

impl ElementRuntime {
    /// Mount a runtime for `layer` at `now_ms`.
    ///
    /// A registry hit starts `visible` with a zero-length entrance. Layers without an
    /// animation descriptor are static and start `visible` without touching the registry.
    /// `load`-triggered layers attempt their reveal immediately.
    pub fn mount(
        layer: &Layer,
        cfg: &EngineConfig,
        registry: &mut AnimationRegistry,
        now_ms: f64,
    ) -> Self {
        let anim = layer.animation.clone();
        let (trigger, variants) = match &anim {
            Some(a) => (
                a.trigger,
                EntranceVariants::new(
                    a.entrance,
                    a.delay_ms,
                    a.duration_ms.unwrap_or(cfg.default_entrance_duration_ms as f64),
                    a.easing,
                ),
            ),
            None => (
                Trigger::Load,
                EntranceVariants::new(Entrance::None, 0.0, 0.0, Default::default()),
            ),
        };
        let awaits_content = anim.is_some() && layer.awaits_content();

        let mut rt = Self {
            id: layer.id.clone(),
            trigger,
            phase: Phase::Hidden,
            entrance: variants,
            variants,
            awaits_content,
            content_ready: !awaits_content,
            pending: false,
            intersecting: false,
            section_active: false,
            force_trigger: false,
            armed: false,
            ready_deadline_ms: awaits_content
                .then(|| now_ms + cfg.readiness_timeout_ms as f64),
            reset_viewport_factor: cfg.reset_viewport_factor,
            mounted: true,
            clock_ms: now_ms,
            revealed_at_ms: None,
        };

        if anim.is_none() {
            rt.phase = Phase::Visible;
            rt.revealed_at_ms = Some(now_ms);
            return rt;
        }
        if registry.is_visible(&rt.id) {
            tracing::debug!(layer = %rt.id, "registry hit, mounting visible");
            rt.variants = rt.variants.instant();
            rt.phase = Phase::Visible;
            rt.content_ready = true;
            rt.ready_deadline_ms = None;
            rt.revealed_at_ms = Some(now_ms);
            return rt;
        }
        if rt.trigger == Trigger::Load {
            rt.pending = true;
            rt.try_reveal(registry);
        }
        rt
    }

    /// Layer id of this runtime.
    pub fn id(&self) -> &LayerId {
        &self.id
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Return `true` when the reveal is waiting only for content readiness.
    pub fn is_pending(&self) -> bool {
        self.pending && self.phase == Phase::Hidden
    }

    /// Whether the reveal is gated by content readiness.
    pub fn awaits_content(&self) -> bool {
        self.awaits_content
    }

    /// Return `true` once content signalled readiness or the safety timeout elapsed.
    pub fn is_content_ready(&self) -> bool {
        self.content_ready
    }

    /// Return `true` until [`TriggerEvent::Unmount`] arrives.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Entrance variants used for rendering.
    pub fn variants(&self) -> &EntranceVariants {
        &self.variants
    }

    /// Visual state to render at `now_ms`.
    ///
    /// The first frame after a reveal anchors the entrance transition, so the eased
    /// `hidden → visible` blend starts at the time it is first rendered.
    pub fn frame(&mut self, now_ms: f64) -> VisualState {
        match self.phase {
            Phase::Hidden => self.variants.hidden,
            Phase::Visible => {
                let at = *self.revealed_at_ms.get_or_insert(now_ms);
                self.variants.sample(now_ms - at)
            }
        }
    }

    /// Apply one event; returns the phase change it caused, if any.
    pub fn handle(
        &mut self,
        event: TriggerEvent,
        registry: &mut AnimationRegistry,
    ) -> Option<Transition> {
        if !self.mounted {
            tracing::trace!(layer = %self.id, ?event, "event for unmounted element ignored");
            return None;
        }

        match event {
            TriggerEvent::Unmount => {
                self.mounted = false;
                self.ready_deadline_ms = None;
                return None;
            }
            TriggerEvent::ContentReady => self.mark_ready("signal"),
            TriggerEvent::Tick { now_ms } => {
                self.clock_ms = self.clock_ms.max(now_ms);
                if let Some(deadline) = self.ready_deadline_ms
                    && !self.content_ready
                    && self.clock_ms >= deadline
                {
                    self.mark_ready("timeout");
                }
            }
            TriggerEvent::Intersection {
                intersecting,
                top,
                viewport_height,
            } => {
                self.intersecting = intersecting;
                if self.trigger == Trigger::Scroll
                    && !intersecting
                    && top > self.reset_viewport_factor * viewport_height
                    && (self.phase == Phase::Visible || self.pending)
                {
                    return Some(self.reset(registry));
                }
            }
            TriggerEvent::SectionActive(active) => self.section_active = active,
            TriggerEvent::ForceTrigger(on) => {
                let rising = on && !self.force_trigger;
                self.force_trigger = on;
                if rising && matches!(self.trigger, Trigger::Click | Trigger::OpenBtn) {
                    tracing::debug!(layer = %self.id, "force trigger armed");
                    self.armed = true;
                }
            }
        }

        if self.phase == Phase::Hidden && self.conditions_met() {
            self.pending = true;
        }
        self.try_reveal(registry)
    }

    fn conditions_met(&self) -> bool {
        match self.trigger {
            Trigger::Load => true,
            Trigger::Scroll => self.intersecting && self.section_active,
            Trigger::Click | Trigger::OpenBtn => self.armed && self.section_active,
        }
    }

    fn mark_ready(&mut self, source: &'static str) {
        if !self.content_ready {
            tracing::debug!(layer = %self.id, source, "content ready");
        }
        self.content_ready = true;
        self.ready_deadline_ms = None;
    }

    fn try_reveal(&mut self, registry: &mut AnimationRegistry) -> Option<Transition> {
        if self.phase == Phase::Visible || !self.pending || !self.content_ready {
            return None;
        }
        self.phase = Phase::Visible;
        self.pending = false;
        // Anchored by the next `frame` call.
        self.revealed_at_ms = None;
        registry.mark_visible(&self.id);
        tracing::debug!(layer = %self.id, trigger = ?self.trigger, "revealed");
        Some(Transition::Revealed)
    }

    fn reset(&mut self, registry: &mut AnimationRegistry) -> Transition {
        tracing::debug!(layer = %self.id, "directional reset");
        self.phase = Phase::Hidden;
        self.pending = false;
        self.revealed_at_ms = None;
        self.variants = self.entrance;
        registry.clear(&self.id);
        Transition::Reset
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/machine.rs"]
mod tests;
