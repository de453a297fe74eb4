use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    animation::ease::Ease,
    foundation::core::{LayerId, Point, Rect, SectionId, Vec2},
    foundation::error::{SceneError, SceneResult},
};

fn one() -> f64 {
    1.0
}

fn yes() -> bool {
    true
}

/// A complete invitation document.
///
/// Layers live only inside their owning [`Section`]. The legacy top-level `layers` pool found in
/// older records is migrated into the first section on hydrate (see [`crate::hydrate_value`]).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Record id (UUID once saved; may be blank for never-saved documents).
    #[serde(default)]
    pub id: String,
    /// Human-readable address of the invitation.
    #[serde(default)]
    pub slug: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Preview image url.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Ordered scroll pages; array index is render and scroll order.
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Editor viewport zoom factor.
    #[serde(default = "one")]
    pub zoom: f64,
    /// Editor viewport pan offset.
    #[serde(default)]
    pub pan: Vec2,
    /// Logical canvas size every section is authored against.
    #[serde(default)]
    pub canvas_size: CanvasSize,
    /// Document background color (CSS color string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Background music.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music: Option<MusicRef>,
    /// Last save timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            id: String::new(),
            slug: String::new(),
            name: String::new(),
            thumbnail_url: None,
            sections: Vec::new(),
            zoom: 1.0,
            pan: Vec2::ZERO,
            canvas_size: CanvasSize::default(),
            background_color: None,
            music: None,
            updated_at: None,
        }
    }
}

/// Logical canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 414.0,
            height: 896.0,
        }
    }
}

impl CanvasSize {
    /// Canvas bounds as a rectangle anchored at the origin.
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Background music reference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicRef {
    /// Audio url.
    pub url: String,
    /// Optional track title shown in the player.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Start playback when the invitation is opened.
    #[serde(default = "yes")]
    pub autoplay: bool,
}

/// One ordered scroll page of the invitation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Section id.
    #[serde(default)]
    pub id: SectionId,
    /// Title shown in the section list.
    #[serde(default)]
    pub title: String,
    /// Layers of this section, in array order.
    #[serde(default)]
    pub elements: Vec<Layer>,
    /// Background image url.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_url: Option<String>,
    /// Background color (CSS color string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Cinematic zoom configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom_config: Option<ZoomConfig>,
    /// Whether the section is rendered.
    #[serde(default = "yes")]
    pub is_visible: bool,
}

impl Section {
    /// Create an empty visible section with a fresh id.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: SectionId::generate(),
            title: title.into(),
            elements: Vec::new(),
            background_url: None,
            background_color: None,
            zoom_config: None,
            is_visible: true,
        }
    }

    /// Find a layer by id.
    pub fn element(&self, id: &LayerId) -> Option<&Layer> {
        self.elements.iter().find(|l| &l.id == id)
    }

    /// Find a layer by id, mutably.
    pub fn element_mut(&mut self, id: &LayerId) -> Option<&mut Layer> {
        self.elements.iter_mut().find(|l| &l.id == id)
    }

    /// Layers sorted by ascending z-index (stable for equal z).
    pub fn paint_order(&self) -> Vec<&Layer> {
        let mut v: Vec<&Layer> = self.elements.iter().collect();
        v.sort_by_key(|l| l.z_index);
        v
    }

    /// Validate this section on its own: a non-blank id, valid layers and zoom regions
    /// inside `canvas`. Layer id uniqueness across sections is checked by
    /// [`Document::validate`].
    pub fn validate(&self, canvas: CanvasSize) -> SceneResult<()> {
        if self.id.is_blank() {
            return Err(SceneError::validation("section id must be non-empty"));
        }
        for l in &self.elements {
            l.validate()?;
        }
        if let Some(zc) = &self.zoom_config
            && let Some(i) = zc.points.iter().position(|p| !p.target_region.fits(canvas))
        {
            return Err(SceneError::validation(format!(
                "section '{}' zoom point {i} region must lie within the canvas",
                self.id
            )));
        }
        Ok(())
    }
}

/// Section zoom direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomDirection {
    /// Zoom into each point.
    #[default]
    In,
    /// Start zoomed on each point and pull back out.
    Out,
}

/// What the camera does after the last zoom point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomBehavior {
    /// Stay on the last point.
    Stay,
    /// Return to the full-canvas view.
    #[default]
    Reset,
}

/// Cinematic zoom configuration for a section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZoomConfig {
    /// Whether zooming runs at all.
    pub enabled: bool,
    /// Zoom direction.
    pub direction: ZoomDirection,
    /// What arms the zoom sequence.
    pub trigger: Trigger,
    /// Post-sequence behavior.
    pub behavior: ZoomBehavior,
    /// Upper bound for the zoom factor.
    pub scale: f64,
    /// Camera move duration per point.
    pub transition_duration_ms: f64,
    /// Dwell time on each point.
    pub hold_duration_ms: f64,
    /// Ordered zoom points.
    pub points: Vec<ZoomPoint>,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            direction: ZoomDirection::In,
            trigger: Trigger::Scroll,
            behavior: ZoomBehavior::Reset,
            scale: 2.0,
            transition_duration_ms: 1_200.0,
            hold_duration_ms: 1_500.0,
            points: Vec::new(),
        }
    }
}

/// A named camera target inside a section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomPoint {
    /// Editor label.
    #[serde(default)]
    pub label: String,
    /// Marker color shown in the editor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Target region in canvas coordinates.
    pub target_region: ZoomRegion,
}

/// Axis-aligned region in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoomRegion {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl ZoomRegion {
    /// Region as a kurbo rectangle.
    pub fn rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Return `true` for a non-empty region inside `canvas`.
    pub fn fits(self, canvas: CanvasSize) -> bool {
        let bounds = canvas.bounds();
        let r = self.rect();
        r.width() > 0.0 && r.height() > 0.0 && r.union(bounds) == bounds
    }
}

/// Event class that arms an entrance animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// Reveal as soon as the element mounts.
    Load,
    /// Reveal when the element scrolls into view inside the active section.
    #[default]
    Scroll,
    /// Reveal on an explicit click.
    Click,
    /// Reveal on the global "open invitation" gesture.
    OpenBtn,
}

/// One-shot entrance style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Entrance {
    /// No transform, appear instantly.
    None,
    /// Opacity and blur fade.
    #[default]
    FadeIn,
    /// Rise from below.
    SlideUp,
    /// Drop from above.
    SlideDown,
    /// Enter moving leftwards.
    SlideLeft,
    /// Enter moving rightwards.
    SlideRight,
    /// Enter from far outside the left edge.
    SlideInFromEdge,
    /// Grow from small.
    ZoomIn,
    /// Shrink from large.
    ZoomOut,
    /// Drop in with a bounce.
    Bounce,
    /// Scale up with overshoot.
    PopIn,
}

/// Indefinitely repeating effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoopEffect {
    /// Gentle vertical hover.
    Float,
    /// Subtle scale breathing.
    Pulse,
    /// Pendulum rotation.
    Sway,
    /// Continuous rotation.
    Spin,
    /// Pulsing glow.
    Glow,
    /// Double-beat scale.
    Heartbeat,
    /// Twinkle in opacity and scale.
    Sparkle,
    /// Wing flap with small bob.
    FlapBob,
    /// Hover combined with wing flap.
    FloatFlap,
    /// Fly towards the left.
    FlyLeft,
    /// Fly towards the right.
    FlyRight,
    /// Fly upwards.
    FlyUp,
    /// Fly downwards.
    FlyDown,
    /// Wander between pseudo-random waypoints.
    FlyRandom,
}

/// Entrance and looping animation descriptor of a layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationConfig {
    /// What arms the entrance.
    pub trigger: Trigger,
    /// Entrance style.
    pub entrance: Entrance,
    /// Looping effect played after the entrance.
    #[serde(rename = "loop", skip_serializing_if = "Option::is_none")]
    pub looping: Option<LoopEffect>,
    /// Entrance delay.
    pub delay_ms: f64,
    /// Entrance duration; the engine default applies when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<f64>,
    /// Entrance easing.
    pub easing: Ease,
    /// Overrides whether the entrance waits for the content-ready signal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub await_content: Option<bool>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            trigger: Trigger::Scroll,
            entrance: Entrance::FadeIn,
            looping: None,
            delay_ms: 0.0,
            duration_ms: None,
            easing: Ease::EaseOut,
            await_content: None,
        }
    }
}

/// One point of a custom motion path, in absolute canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    /// Target x of the element center.
    pub x: f64,
    /// Target y of the element center.
    pub y: f64,
    /// Rotation in degrees at this point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Scale at this point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

impl PathPoint {
    /// Point without rotation/scale overrides.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            rotation: None,
            scale: None,
        }
    }
}

/// Custom multi-point motion path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MotionPathConfig {
    /// Whether the path is active.
    pub enabled: bool,
    /// Ordered path points.
    pub points: Vec<PathPoint>,
    /// Total playback duration in milliseconds.
    pub duration: f64,
    /// Replay the path forever.
    #[serde(rename = "loop")]
    pub looping: bool,
}

impl Default for MotionPathConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            points: Vec::new(),
            duration: 3_000.0,
            looping: false,
        }
    }
}

/// Discriminant of a layer, without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayerKind {
    /// Text block.
    Text,
    /// Raster image.
    Image,
    /// Video.
    Video,
    /// Animated GIF.
    Gif,
    /// Sticker image.
    Sticker,
    /// Vector icon.
    Icon,
    /// Geometric shape.
    Shape,
    /// Call-to-action button.
    Button,
    /// Countdown to the event.
    Countdown,
    /// Location pin.
    MapPin,
    /// RSVP / guestbook form.
    Form,
    /// Love story timeline.
    LoveStoryTimeline,
    /// Decorative animated asset.
    MotionDecoration,
    /// Lottie animation.
    Lottie,
}

impl LayerKind {
    /// Whether this kind loads an external asset and emits a content-ready signal.
    ///
    /// Elements of these kinds hold their entrance until the asset is ready or the safety
    /// timeout elapses. [`AnimationConfig::await_content`] overrides this per layer.
    pub fn awaits_content(self) -> bool {
        matches!(
            self,
            Self::Image
                | Self::Video
                | Self::Gif
                | Self::Sticker
                | Self::Lottie
                | Self::MotionDecoration
        )
    }

    /// Wire name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
            Self::Gif => "gif",
            Self::Sticker => "sticker",
            Self::Icon => "icon",
            Self::Shape => "shape",
            Self::Button => "button",
            Self::Countdown => "countdown",
            Self::MapPin => "map-pin",
            Self::Form => "form",
            Self::LoveStoryTimeline => "love-story-timeline",
            Self::MotionDecoration => "motion-decoration",
            Self::Lottie => "lottie",
        }
    }
}

/// Type-specific payload of a layer; the serde tag is the layer's `type`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum LayerContent {
    /// Text block.
    Text {
        /// Text (or sanitized rich-text HTML from the external editor).
        #[serde(default)]
        content: String,
        /// Typography.
        #[serde(default)]
        text_style: TextStyle,
    },
    /// Raster image.
    Image {
        /// Image url.
        #[serde(default)]
        image_url: String,
    },
    /// Video.
    Video {
        /// Video configuration.
        #[serde(default)]
        video_config: VideoConfig,
    },
    /// Animated GIF.
    Gif {
        /// GIF url.
        #[serde(default)]
        image_url: String,
    },
    /// Sticker image.
    Sticker {
        /// Sticker url.
        #[serde(default)]
        image_url: String,
    },
    /// Vector icon.
    Icon {
        /// Icon configuration.
        #[serde(default)]
        icon_style: IconStyle,
    },
    /// Geometric shape.
    Shape {
        /// Shape configuration.
        #[serde(default)]
        shape_config: ShapeConfig,
    },
    /// Call-to-action button.
    Button {
        /// Button configuration.
        #[serde(default)]
        button_config: ButtonConfig,
    },
    /// Countdown.
    Countdown {
        /// Countdown configuration.
        #[serde(default)]
        countdown_config: CountdownConfig,
    },
    /// Location pin.
    MapPin {
        /// Pin configuration.
        #[serde(default)]
        map_pin_config: MapPinConfig,
    },
    /// RSVP / guestbook form.
    Form {
        /// Form configuration.
        #[serde(default)]
        form_config: FormConfig,
    },
    /// Love story timeline.
    LoveStoryTimeline {
        /// Timeline configuration.
        #[serde(default)]
        love_story_config: LoveStoryConfig,
    },
    /// Decorative animated asset.
    MotionDecoration {
        /// Decoration configuration.
        #[serde(default)]
        decoration_config: DecorationConfig,
    },
    /// Lottie animation.
    Lottie {
        /// Lottie configuration.
        #[serde(default)]
        lottie_config: LottieConfig,
    },
}

impl LayerContent {
    /// Discriminant of this payload.
    pub fn kind(&self) -> LayerKind {
        match self {
            Self::Text { .. } => LayerKind::Text,
            Self::Image { .. } => LayerKind::Image,
            Self::Video { .. } => LayerKind::Video,
            Self::Gif { .. } => LayerKind::Gif,
            Self::Sticker { .. } => LayerKind::Sticker,
            Self::Icon { .. } => LayerKind::Icon,
            Self::Shape { .. } => LayerKind::Shape,
            Self::Button { .. } => LayerKind::Button,
            Self::Countdown { .. } => LayerKind::Countdown,
            Self::MapPin { .. } => LayerKind::MapPin,
            Self::Form { .. } => LayerKind::Form,
            Self::LoveStoryTimeline { .. } => LayerKind::LoveStoryTimeline,
            Self::MotionDecoration { .. } => LayerKind::MotionDecoration,
            Self::Lottie { .. } => LayerKind::Lottie,
        }
    }

    /// Payload for `kind` with every configuration field defaulted.
    pub fn default_for(kind: LayerKind) -> Self {
        match kind {
            LayerKind::Text => Self::Text {
                content: String::new(),
                text_style: TextStyle::default(),
            },
            LayerKind::Image => Self::Image {
                image_url: String::new(),
            },
            LayerKind::Video => Self::Video {
                video_config: VideoConfig::default(),
            },
            LayerKind::Gif => Self::Gif {
                image_url: String::new(),
            },
            LayerKind::Sticker => Self::Sticker {
                image_url: String::new(),
            },
            LayerKind::Icon => Self::Icon {
                icon_style: IconStyle::default(),
            },
            LayerKind::Shape => Self::Shape {
                shape_config: ShapeConfig::default(),
            },
            LayerKind::Button => Self::Button {
                button_config: ButtonConfig::default(),
            },
            LayerKind::Countdown => Self::Countdown {
                countdown_config: CountdownConfig::default(),
            },
            LayerKind::MapPin => Self::MapPin {
                map_pin_config: MapPinConfig::default(),
            },
            LayerKind::Form => Self::Form {
                form_config: FormConfig::default(),
            },
            LayerKind::LoveStoryTimeline => Self::LoveStoryTimeline {
                love_story_config: LoveStoryConfig::default(),
            },
            LayerKind::MotionDecoration => Self::MotionDecoration {
                decoration_config: DecorationConfig::default(),
            },
            LayerKind::Lottie => Self::Lottie {
                lottie_config: LottieConfig::default(),
            },
        }
    }
}

/// Typography of a text layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextStyle {
    /// Font family name.
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// CSS font weight.
    pub font_weight: u16,
    /// Text color.
    pub color: String,
    /// Horizontal alignment.
    pub text_align: TextAlign,
    /// Line height multiplier.
    pub line_height: f64,
    /// Letter spacing in pixels.
    pub letter_spacing: f64,
    /// Italic style.
    pub italic: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "Inter".to_owned(),
            font_size: 16.0,
            font_weight: 400,
            color: "#000000".to_owned(),
            text_align: TextAlign::Center,
            line_height: 1.2,
            letter_spacing: 0.0,
            italic: false,
        }
    }
}

/// Horizontal text alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// Left aligned.
    Left,
    /// Centered.
    #[default]
    Center,
    /// Right aligned.
    Right,
    /// Justified.
    Justify,
}

/// Video playback configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoConfig {
    /// Video url.
    pub url: String,
    /// Start playing on reveal.
    pub autoplay: bool,
    /// Start muted.
    pub muted: bool,
    /// Restart at the end.
    #[serde(rename = "loop")]
    pub looping: bool,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            autoplay: true,
            muted: true,
            looping: true,
        }
    }
}

/// Icon configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IconStyle {
    /// Icon name in the icon set.
    pub name: String,
    /// Fill color.
    pub color: String,
}

impl Default for IconStyle {
    fn default() -> Self {
        Self {
            name: "heart".to_owned(),
            color: "#000000".to_owned(),
        }
    }
}

/// Primitive geometry of a shape layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    /// Rectangle.
    #[default]
    Rectangle,
    /// Ellipse.
    Circle,
    /// Triangle.
    Triangle,
    /// Straight line.
    Line,
    /// Heart.
    Heart,
    /// Five-point star.
    Star,
}

/// Shape configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShapeConfig {
    /// Geometry.
    pub shape: ShapeKind,
    /// Fill color.
    pub fill: String,
    /// Stroke color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Stroke width in pixels.
    pub stroke_width: f64,
    /// Corner radius in pixels (rectangles).
    pub corner_radius: f64,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            shape: ShapeKind::Rectangle,
            fill: "#cccccc".to_owned(),
            stroke: None,
            stroke_width: 0.0,
            corner_radius: 0.0,
        }
    }
}

/// What a button does when pressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    /// Open an external link.
    #[default]
    Link,
    /// Fire the global "open invitation" gesture.
    OpenInvitation,
    /// Scroll to the RSVP form.
    Rsvp,
    /// Open the map location.
    Map,
}

/// Button configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonConfig {
    /// Label.
    pub text: String,
    /// Press action.
    pub action: ButtonAction,
    /// Link target for [`ButtonAction::Link`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Background color.
    pub background_color: String,
    /// Label color.
    pub text_color: String,
    /// Corner radius in pixels.
    pub border_radius: f64,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            text: "Open Invitation".to_owned(),
            action: ButtonAction::Link,
            url: None,
            background_color: "#000000".to_owned(),
            text_color: "#ffffff".to_owned(),
            border_radius: 8.0,
        }
    }
}

/// Countdown configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CountdownConfig {
    /// Event instant counted down to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<DateTime<Utc>>,
    /// Show a seconds cell.
    pub show_seconds: bool,
    /// Digit color.
    pub color: String,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            target_date: None,
            show_seconds: true,
            color: "#000000".to_owned(),
        }
    }
}

/// Remaining time split into display cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CountdownParts {
    /// Whole days.
    pub days: i64,
    /// Hours within the day.
    pub hours: i64,
    /// Minutes within the hour.
    pub minutes: i64,
    /// Seconds within the minute.
    pub seconds: i64,
}

impl CountdownConfig {
    /// Remaining time at `now`; all zero once the target has passed or when unset.
    pub fn remaining(&self, now: DateTime<Utc>) -> CountdownParts {
        let Some(target) = self.target_date else {
            return CountdownParts::default();
        };
        let secs = (target - now).num_seconds();
        if secs <= 0 {
            return CountdownParts::default();
        }
        CountdownParts {
            days: secs / 86_400,
            hours: (secs % 86_400) / 3_600,
            minutes: (secs % 3_600) / 60,
            seconds: secs % 60,
        }
    }
}

/// Map pin configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapPinConfig {
    /// Venue address.
    pub address: String,
    /// Latitude.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    /// Longitude.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    /// Pin label.
    pub label: String,
}

/// Form flavor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    /// Attendance RSVP.
    #[default]
    Rsvp,
    /// Free-form wishes.
    Guestbook,
}

/// Form configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormConfig {
    /// Form flavor.
    pub kind: FormKind,
    /// Field names shown to guests.
    pub fields: Vec<String>,
    /// Submit button label.
    pub submit_label: String,
}

/// One milestone of a love story timeline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoveStoryEvent {
    /// Free-form date label.
    pub date: String,
    /// Milestone title.
    pub title: String,
    /// Milestone description.
    pub description: String,
    /// Optional image url.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Love story timeline configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoveStoryConfig {
    /// Milestones in display order.
    pub events: Vec<LoveStoryEvent>,
    /// Accent color for the timeline line.
    pub accent_color: String,
}

/// Motion decoration configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DecorationConfig {
    /// Asset url (image or animated sprite).
    pub asset_url: String,
    /// Effect the decoration was authored for, shown as a preset in the editor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<LoopEffect>,
}

/// Lottie configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LottieConfig {
    /// Lottie JSON url.
    pub url: String,
    /// Replay at the end.
    #[serde(rename = "loop")]
    pub looping: bool,
    /// Playback speed multiplier.
    pub speed: f64,
}

impl Default for LottieConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            looping: true,
            speed: 1.0,
        }
    }
}

/// One positionable visual element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    /// Stable id.
    #[serde(default)]
    pub id: LayerId,
    /// Type tag plus the matching configuration payload.
    #[serde(flatten)]
    pub content: LayerContent,
    /// Left edge in canvas pixels.
    #[serde(default)]
    pub x: f64,
    /// Top edge in canvas pixels.
    #[serde(default)]
    pub y: f64,
    /// Width in pixels (`>= 0`).
    #[serde(default)]
    pub width: f64,
    /// Height in pixels (`>= 0`).
    #[serde(default)]
    pub height: f64,
    /// Rotation in degrees (unrestricted).
    #[serde(default)]
    pub rotation: f64,
    /// Uniform scale.
    #[serde(default = "one")]
    pub scale: f64,
    /// Mirror horizontally.
    #[serde(default)]
    pub flip_horizontal: bool,
    /// Mirror vertically.
    #[serde(default)]
    pub flip_vertical: bool,
    /// Opacity in `[0, 1]`.
    #[serde(default = "one")]
    pub opacity: f64,
    /// Stacking order within the section.
    #[serde(default)]
    pub z_index: i32,
    /// Locked layers ignore drag gestures in the editor.
    #[serde(default)]
    pub is_locked: bool,
    /// Hidden layers are not rendered.
    #[serde(default = "yes")]
    pub is_visible: bool,
    /// Entrance/looping descriptor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationConfig>,
    /// Custom motion path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion_path_config: Option<MotionPathConfig>,
}

impl Layer {
    /// Create a layer with a fresh id, zero geometry and default paint.
    pub fn new(content: LayerContent) -> Self {
        Self {
            id: LayerId::generate(),
            content,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            scale: 1.0,
            flip_horizontal: false,
            flip_vertical: false,
            opacity: 1.0,
            z_index: 0,
            is_locked: false,
            is_visible: true,
            animation: None,
            motion_path_config: None,
        }
    }

    /// Layer discriminant.
    pub fn kind(&self) -> LayerKind {
        self.content.kind()
    }

    /// Whether the entrance of this layer waits for a content-ready signal.
    pub fn awaits_content(&self) -> bool {
        self.animation
            .as_ref()
            .and_then(|a| a.await_content)
            .unwrap_or_else(|| self.kind().awaits_content())
    }

    /// Unrotated bounding box in canvas coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Visual center of the layer.
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Clamp geometry and paint into their documented ranges.
    ///
    /// Returns `true` when any field changed.
    pub fn clamp_ranges(&mut self) -> bool {
        fn finite_or(v: f64, fallback: f64) -> f64 {
            if v.is_finite() { v } else { fallback }
        }

        let before = (
            self.x,
            self.y,
            self.width,
            self.height,
            self.rotation,
            self.scale,
            self.opacity,
        );
        self.x = finite_or(self.x, 0.0);
        self.y = finite_or(self.y, 0.0);
        self.width = finite_or(self.width, 0.0).max(0.0);
        self.height = finite_or(self.height, 0.0).max(0.0);
        self.rotation = finite_or(self.rotation, 0.0);
        self.scale = finite_or(self.scale, 1.0);
        self.opacity = finite_or(self.opacity, 1.0).clamp(0.0, 1.0);
        let after = (
            self.x,
            self.y,
            self.width,
            self.height,
            self.rotation,
            self.scale,
            self.opacity,
        );
        // NaN never compares equal, but every NaN was replaced above.
        before != after
    }

    /// Validate static invariants of this layer.
    pub fn validate(&self) -> SceneResult<()> {
        if self.id.is_blank() {
            return Err(SceneError::validation("layer id must be non-empty"));
        }
        if !(self.width >= 0.0 && self.height >= 0.0) {
            return Err(SceneError::validation(format!(
                "layer '{}' width/height must be >= 0",
                self.id
            )));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(SceneError::validation(format!(
                "layer '{}' opacity must be in [0, 1]",
                self.id
            )));
        }
        if let Some(mp) = &self.motion_path_config
            && mp.enabled
            && !(mp.duration.is_finite() && mp.duration > 0.0)
        {
            return Err(SceneError::animation(format!(
                "layer '{}' motion path duration must be > 0",
                self.id
            )));
        }
        Ok(())
    }
}

impl Document {
    /// Create an empty document with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Section by id.
    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| &s.id == id)
    }

    /// Section by id, mutably.
    pub fn section_mut(&mut self, id: &SectionId) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| &s.id == id)
    }

    /// Layer by id, searching every section.
    pub fn find_layer(&self, id: &LayerId) -> Option<(&Section, &Layer)> {
        self.sections
            .iter()
            .find_map(|s| s.element(id).map(|l| (s, l)))
    }

    /// Total number of layers across sections.
    pub fn layer_count(&self) -> usize {
        self.sections.iter().map(|s| s.elements.len()).sum()
    }

    /// Validate static invariants of the whole document.
    pub fn validate(&self) -> SceneResult<()> {
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            return Err(SceneError::validation("document zoom must be finite and > 0"));
        }
        let mut seen_sections = std::collections::HashSet::new();
        let mut seen_layers = std::collections::HashSet::new();
        for s in &self.sections {
            s.validate(self.canvas_size)?;
            if !seen_sections.insert(&s.id) {
                return Err(SceneError::validation(format!(
                    "duplicate section id '{}'",
                    s.id
                )));
            }
            for l in &s.elements {
                if !seen_layers.insert(&l.id) {
                    return Err(SceneError::validation(format!(
                        "duplicate layer id '{}'",
                        l.id
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/model.rs"]
mod tests;
