//! Sceneweave is the scene composition and animation engine behind a section-based
//! invitation builder.
//!
//! The crate is organised around five concerns:
//!
//! - A serde [`Document`] model of sections and typed layers, hydrated with
//!   [`hydrate_value`] so legacy or partial records are repaired instead of rejected
//! - An [`Editor`] applying atomic mutations with whole-snapshot undo/redo
//! - A per-element [`ElementRuntime`] state machine deciding when entrances play
//! - Pure kinematics: [`EntranceVariants`], [`loop_schedule`], [`path_schedule`] and
//!   [`zoom_schedule`] all produce keyframe [`Schedule`]s for a renderer to apply
//! - A [`SyncSession`] guarding load/save against a two-kind [`DocumentStore`]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod document;
pub(crate) mod editor;
pub(crate) mod persist;
pub(crate) mod trigger;

pub use crate::foundation::config::EngineConfig;
pub use crate::foundation::core::{LayerId, Point, Rect, SectionId, Vec2, is_uuid};
pub use crate::foundation::error::{SceneError, SceneResult, StoreAttempt};

pub use crate::animation::ease::Ease;
pub use crate::animation::entrance::{EntranceTiming, EntranceVariants, VisualState};
pub use crate::animation::keyframes::{
    Lerp, Property, Repeat, Schedule, Timing, TransformSample, uniform_times,
};
pub use crate::animation::looping::{DEFAULT_LOOP_BASE_MS, loop_schedule};
pub use crate::animation::motion_path::{MotionPlan, path_schedule, resolve_motion};
pub use crate::animation::zoom::{Camera, camera_at, frame_region, zoom_schedule};

pub use crate::document::builder::{DocumentBuilder, LayerBuilder, SectionBuilder};
pub use crate::document::hydrate::{HydrateReport, hydrate_value, is_empty_shell};
pub use crate::document::model::{
    AnimationConfig, ButtonAction, ButtonConfig, CanvasSize, CountdownConfig, CountdownParts,
    DecorationConfig, Document, Entrance, FormConfig, FormKind, IconStyle, Layer, LayerContent,
    LayerKind, LoopEffect, LottieConfig, LoveStoryConfig, LoveStoryEvent, MapPinConfig,
    MotionPathConfig, MusicRef, PathPoint, Section, ShapeConfig, ShapeKind, TextAlign, TextStyle,
    Trigger, VideoConfig, ZoomBehavior, ZoomConfig, ZoomDirection, ZoomPoint, ZoomRegion,
};

pub use crate::editor::store::{Editor, LayerPatch, SectionPatch};

pub use crate::persist::session::{LoadOutcome, LoadPhase, SaveOutcome, SaveRefusal, SyncSession};
pub use crate::persist::store::{
    DocumentStore, LookupKey, MemoryStore, RecordKind, TransportError,
};

pub use crate::trigger::machine::{ElementRuntime, Phase, Transition, TriggerEvent};
pub use crate::trigger::registry::AnimationRegistry;
