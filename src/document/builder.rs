use crate::{
    document::model::{
        AnimationConfig, Document, Layer, LayerContent, MotionPathConfig, PathPoint, Section,
        ZoomConfig,
    },
    foundation::core::{LayerId, SectionId, Vec2},
    foundation::error::{SceneError, SceneResult},
};

/// Builder for [`Document`](crate::Document).
pub struct DocumentBuilder {
    doc: Document,
}

impl DocumentBuilder {
    /// Create a builder for a new document.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            doc: Document::new(name),
        }
    }

    /// Set the record id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.doc.id = id.into();
        self
    }

    /// Set the public slug.
    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.doc.slug = slug.into();
        self
    }

    /// Set the viewport zoom and pan.
    pub fn viewport(mut self, zoom: f64, pan: Vec2) -> Self {
        self.doc.zoom = zoom;
        self.doc.pan = pan;
        self
    }

    /// Append a section, rejecting duplicate ids.
    pub fn section(mut self, section: Section) -> SceneResult<Self> {
        if self.doc.section(&section.id).is_some() {
            return Err(SceneError::validation(format!(
                "duplicate section id '{}'",
                section.id
            )));
        }
        self.doc.sections.push(section);
        Ok(self)
    }

    /// Build and validate the final document.
    pub fn build(self) -> SceneResult<Document> {
        self.doc.validate()?;
        Ok(self.doc)
    }
}

/// Builder for [`Section`](crate::Section) values.
pub struct SectionBuilder {
    section: Section,
}

impl SectionBuilder {
    /// Create a section builder with a fresh id.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            section: Section::new(title),
        }
    }

    /// Override the generated id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.section.id = SectionId(id.into());
        self
    }

    /// Set the background image url.
    pub fn background_url(mut self, url: impl Into<String>) -> Self {
        self.section.background_url = Some(url.into());
        self
    }

    /// Set the cinematic zoom configuration.
    pub fn zoom(mut self, cfg: ZoomConfig) -> Self {
        self.section.zoom_config = Some(cfg);
        self
    }

    /// Append a layer.
    pub fn layer(mut self, layer: Layer) -> Self {
        self.section.elements.push(layer);
        self
    }

    /// Finish the section.
    pub fn build(self) -> Section {
        self.section
    }
}

/// Builder for [`Layer`](crate::Layer) values.
pub struct LayerBuilder {
    layer: Layer,
}

impl LayerBuilder {
    /// Create a layer builder for the given payload.
    pub fn new(content: LayerContent) -> Self {
        Self {
            layer: Layer::new(content),
        }
    }

    /// Override the generated id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.layer.id = LayerId(id.into());
        self
    }

    /// Set the top-left position.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.layer.x = x;
        self.layer.y = y;
        self
    }

    /// Set the size.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.layer.width = width;
        self.layer.height = height;
        self
    }

    /// Set the stacking order.
    pub fn z(mut self, z_index: i32) -> Self {
        self.layer.z_index = z_index;
        self
    }

    /// Set the entrance/looping descriptor.
    pub fn animation(mut self, animation: AnimationConfig) -> Self {
        self.layer.animation = Some(animation);
        self
    }

    /// Enable a custom motion path.
    pub fn motion_path(mut self, points: Vec<PathPoint>, duration_ms: f64, looping: bool) -> Self {
        self.layer.motion_path_config = Some(MotionPathConfig {
            enabled: true,
            points,
            duration: duration_ms,
            looping,
        });
        self
    }

    /// Build and validate the final layer.
    pub fn build(self) -> SceneResult<Layer> {
        self.layer.validate()?;
        Ok(self.layer)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/builder.rs"]
mod tests;
