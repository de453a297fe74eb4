use std::collections::HashSet;

use crate::{
    document::model::{
        AnimationConfig, Document, Layer, LayerContent, MotionPathConfig, MusicRef, Section,
        ZoomConfig,
    },
    editor::history::History,
    foundation::config::EngineConfig,
    foundation::core::{LayerId, SectionId, Vec2},
};

/// Partial update of a layer. `None` leaves the field untouched.
///
/// The layer type is fixed at creation; a `content` payload of another type is rejected.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayerPatch {
    /// New left edge.
    pub x: Option<f64>,
    /// New top edge.
    pub y: Option<f64>,
    /// New width.
    pub width: Option<f64>,
    /// New height.
    pub height: Option<f64>,
    /// New rotation in degrees.
    pub rotation: Option<f64>,
    /// New scale.
    pub scale: Option<f64>,
    /// New opacity.
    pub opacity: Option<f64>,
    /// New stacking order.
    pub z_index: Option<i32>,
    /// Mirror horizontally.
    pub flip_horizontal: Option<bool>,
    /// Mirror vertically.
    pub flip_vertical: Option<bool>,
    /// Lock against editing.
    pub is_locked: Option<bool>,
    /// Show or hide.
    pub is_visible: Option<bool>,
    /// Replace the animation descriptor.
    pub animation: Option<AnimationConfig>,
    /// Replace the motion path.
    pub motion_path_config: Option<MotionPathConfig>,
    /// Replace the type-specific payload (same type only).
    pub content: Option<LayerContent>,
}

impl LayerPatch {
    fn apply(self, layer: &mut Layer) -> Result<(), String> {
        if let Some(content) = self.content {
            if content.kind() != layer.kind() {
                return Err(format!(
                    "cannot change type {} to {}",
                    layer.kind().as_str(),
                    content.kind().as_str()
                ));
            }
            layer.content = content;
        }
        macro_rules! set {
            ($($field:ident),* $(,)?) => {
                $(if let Some(v) = self.$field { layer.$field = v; })*
            };
        }
        set!(
            x,
            y,
            width,
            height,
            rotation,
            scale,
            opacity,
            z_index,
            flip_horizontal,
            flip_vertical,
            is_locked,
            is_visible,
        );
        if let Some(a) = self.animation {
            layer.animation = Some(a);
        }
        if let Some(mp) = self.motion_path_config {
            layer.motion_path_config = Some(mp);
        }
        layer.clamp_ranges();
        layer.validate().map_err(|e| e.to_string())
    }
}

/// Partial update of a section.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SectionPatch {
    /// New title.
    pub title: Option<String>,
    /// New background image url.
    pub background_url: Option<String>,
    /// New background color.
    pub background_color: Option<String>,
    /// Replace the zoom configuration.
    pub zoom_config: Option<ZoomConfig>,
    /// Show or hide.
    pub is_visible: Option<bool>,
}

/// In-memory document editor with snapshot undo/redo.
///
/// Every mutation is applied to a copy and swapped in whole, so a failed mutation never
/// leaves the document half-updated. References to missing sections or layers are logged
/// and ignored.
#[derive(Debug)]
pub struct Editor {
    doc: Document,
    history: History<Document>,
    selection: Option<LayerId>,
    config: EngineConfig,
}

impl Editor {
    /// Create an editor over `doc`.
    pub fn new(doc: Document, config: EngineConfig) -> Self {
        Self {
            doc,
            history: History::new(config.history_limit),
            selection: None,
            config,
        }
    }

    /// Current document snapshot.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consume the editor, returning the document.
    pub fn into_document(self) -> Document {
        self.doc
    }

    /// Replace the whole document, e.g. after a load. Clears history and selection.
    pub fn replace_document(&mut self, doc: Document) {
        self.doc = doc;
        self.history.clear();
        self.selection = None;
    }

    fn mutate(
        &mut self,
        op: &'static str,
        f: impl FnOnce(&mut Document) -> Result<(), String>,
    ) -> bool {
        let mut next = self.doc.clone();
        match f(&mut next) {
            Ok(()) => {
                let before = std::mem::replace(&mut self.doc, next);
                self.history.record(before);
                tracing::trace!(op, "mutation applied");
                true
            }
            Err(reason) => {
                tracing::warn!(op, %reason, "mutation ignored");
                false
            }
        }
    }

    fn owning_section(&self, layer_id: &LayerId) -> Option<SectionId> {
        self.doc
            .find_layer(layer_id)
            .map(|(section, _)| section.id.clone())
    }

    // ---- elements ----

    /// Append `layer` to a section; blank or clashing ids are replaced.
    pub fn add_element(&mut self, section_id: &SectionId, mut layer: Layer) -> Option<LayerId> {
        if layer.id.is_blank() || self.doc.find_layer(&layer.id).is_some() {
            layer.id = LayerId::generate();
        }
        layer.clamp_ranges();
        let id = layer.id.clone();
        self.mutate("add_element", |doc| {
            layer.validate().map_err(|e| e.to_string())?;
            let section = section_by_id(doc, section_id)?;
            section.elements.push(layer);
            Ok(())
        })
        .then_some(id)
    }

    /// Apply a partial update to one layer.
    pub fn update_element(
        &mut self,
        section_id: &SectionId,
        layer_id: &LayerId,
        patch: LayerPatch,
    ) -> bool {
        self.mutate("update_element", |doc| {
            let layer = layer_in(doc, section_id, layer_id)?;
            patch.apply(layer)
        })
    }

    /// Remove one layer.
    pub fn remove_element(&mut self, section_id: &SectionId, layer_id: &LayerId) -> bool {
        let removed = self.mutate("remove_element", |doc| {
            let section = section_by_id(doc, section_id)?;
            let idx = position_of(section, layer_id)?;
            section.elements.remove(idx);
            Ok(())
        });
        if removed && self.selection.as_ref() == Some(layer_id) {
            self.selection = None;
        }
        removed
    }

    /// Copy a layer with a fresh id, offset on both axes and stacked directly above the original.
    pub fn duplicate_element(
        &mut self,
        section_id: &SectionId,
        layer_id: &LayerId,
    ) -> Option<LayerId> {
        let offset = self.config.duplicate_offset;
        let new_id = LayerId::generate();
        let id = new_id.clone();
        self.mutate("duplicate_element", |doc| {
            let section = section_by_id(doc, section_id)?;
            let idx = position_of(section, layer_id)?;
            let original_z = section.elements[idx].z_index;
            for l in &mut section.elements {
                if l.z_index > original_z {
                    l.z_index += 1;
                }
            }
            let mut copy = section.elements[idx].clone();
            copy.id = new_id;
            copy.x += offset;
            copy.y += offset;
            copy.z_index = original_z + 1;
            section.elements.insert(idx + 1, copy);
            Ok(())
        })
        .then_some(id)
    }

    /// Set a layer's z-index to one above the highest in its section, itself included.
    pub fn bring_to_front(&mut self, layer_id: &LayerId) -> bool {
        self.restack("bring_to_front", layer_id, |zs| zs.iter().max().map(|z| z + 1))
    }

    /// Set a layer's z-index to one below the lowest in its section, itself included.
    pub fn send_to_back(&mut self, layer_id: &LayerId) -> bool {
        self.restack("send_to_back", layer_id, |zs| zs.iter().min().map(|z| z - 1))
    }

    fn restack(
        &mut self,
        op: &'static str,
        layer_id: &LayerId,
        pick: impl FnOnce(&[i32]) -> Option<i32>,
    ) -> bool {
        let Some(section_id) = self.owning_section(layer_id) else {
            tracing::warn!(op, layer = %layer_id, "mutation ignored: unknown layer");
            return false;
        };
        self.mutate(op, |doc| {
            let section = section_by_id(doc, &section_id)?;
            let zs: Vec<i32> = section.elements.iter().map(|l| l.z_index).collect();
            let z = pick(&zs).ok_or("section has no layers")?;
            let layer = section
                .element_mut(layer_id)
                .ok_or_else(|| format!("unknown layer '{layer_id}'"))?;
            layer.z_index = z;
            Ok(())
        })
    }

    // ---- sections ----

    /// Append a section.
    ///
    /// Blank or clashing section and layer ids are replaced and layer ranges clamped. A
    /// section that still fails validation, e.g. a zoom region outside the canvas, is
    /// rejected.
    pub fn add_section(&mut self, mut section: Section) -> Option<SectionId> {
        if section.id.is_blank() || self.doc.section(&section.id).is_some() {
            section.id = SectionId::generate();
        }
        let mut taken = HashSet::new();
        for layer in &mut section.elements {
            if layer.id.is_blank()
                || self.doc.find_layer(&layer.id).is_some()
                || !taken.insert(layer.id.clone())
            {
                tracing::debug!(layer = %layer.id, "replacing clashing layer id");
                layer.id = LayerId::generate();
                taken.insert(layer.id.clone());
            }
            layer.clamp_ranges();
        }
        let id = section.id.clone();
        self.mutate("add_section", |doc| {
            section
                .validate(doc.canvas_size)
                .map_err(|e| e.to_string())?;
            doc.sections.push(section);
            Ok(())
        })
        .then_some(id)
    }

    /// Remove a section and its layers.
    pub fn remove_section(&mut self, section_id: &SectionId) -> bool {
        let removed = self.mutate("remove_section", |doc| {
            let idx = doc
                .sections
                .iter()
                .position(|s| &s.id == section_id)
                .ok_or_else(|| format!("unknown section '{section_id}'"))?;
            doc.sections.remove(idx);
            Ok(())
        });
        if removed
            && let Some(sel) = &self.selection
            && self.doc.find_layer(sel).is_none()
        {
            self.selection = None;
        }
        removed
    }

    /// Copy a section with fresh section and layer ids, inserted after the original.
    pub fn duplicate_section(&mut self, section_id: &SectionId) -> Option<SectionId> {
        let new_id = SectionId::generate();
        let id = new_id.clone();
        self.mutate("duplicate_section", |doc| {
            let idx = doc
                .sections
                .iter()
                .position(|s| &s.id == section_id)
                .ok_or_else(|| format!("unknown section '{section_id}'"))?;
            let mut copy = doc.sections[idx].clone();
            copy.id = new_id;
            copy.title = format!("{} (copy)", copy.title);
            for l in &mut copy.elements {
                l.id = LayerId::generate();
            }
            doc.sections.insert(idx + 1, copy);
            Ok(())
        })
        .then_some(id)
    }

    /// Move the section at `from` to index `to`.
    pub fn reorder_sections(&mut self, from: usize, to: usize) -> bool {
        self.mutate("reorder_sections", |doc| {
            let n = doc.sections.len();
            if from >= n || to >= n {
                return Err(format!("section index out of range ({from} -> {to}, len {n})"));
            }
            if from == to {
                return Err("section already at target index".to_owned());
            }
            let s = doc.sections.remove(from);
            doc.sections.insert(to, s);
            Ok(())
        })
    }

    /// Apply a partial update to one section. Only the patched section is validated.
    pub fn update_section(&mut self, section_id: &SectionId, patch: SectionPatch) -> bool {
        self.mutate("update_section", |doc| {
            let canvas = doc.canvas_size;
            let section = section_by_id(doc, section_id)?;
            if let Some(title) = patch.title {
                section.title = title;
            }
            if let Some(url) = patch.background_url {
                section.background_url = Some(url);
            }
            if let Some(color) = patch.background_color {
                section.background_color = Some(color);
            }
            if let Some(visible) = patch.is_visible {
                section.is_visible = visible;
            }
            if let Some(zoom) = patch.zoom_config {
                section.zoom_config = Some(zoom);
            }
            section.validate(canvas).map_err(|e| e.to_string())
        })
    }

    /// Flip the visibility of a section.
    pub fn toggle_section_visibility(&mut self, section_id: &SectionId) -> bool {
        self.mutate("toggle_section_visibility", |doc| {
            let section = section_by_id(doc, section_id)?;
            section.is_visible = !section.is_visible;
            Ok(())
        })
    }

    // ---- canvas ----

    /// Set the editor viewport zoom.
    ///
    /// Viewport changes are not undoable, and undo/redo keep the current viewport.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        if !(zoom.is_finite() && zoom > 0.0) {
            tracing::warn!(zoom, "ignoring invalid zoom");
            return false;
        }
        self.doc.zoom = zoom;
        true
    }

    /// Set the editor viewport pan. Not undoable, like [`Editor::set_zoom`].
    pub fn set_pan(&mut self, pan: Vec2) {
        self.doc.pan = pan;
    }

    /// Set or clear the page background color.
    pub fn set_background_color(&mut self, color: Option<String>) -> bool {
        self.mutate("set_background_color", |doc| {
            doc.background_color = color;
            Ok(())
        })
    }

    /// Set or clear the background music.
    pub fn set_music(&mut self, music: Option<MusicRef>) -> bool {
        self.mutate("set_music", |doc| {
            doc.music = music;
            Ok(())
        })
    }

    // ---- selection ----

    /// Select a layer by id.
    pub fn select(&mut self, layer_id: &LayerId) -> bool {
        if self.doc.find_layer(layer_id).is_none() {
            tracing::warn!(layer = %layer_id, "cannot select unknown layer");
            return false;
        }
        self.selection = Some(layer_id.clone());
        true
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Selected layer id.
    pub fn selected(&self) -> Option<&LayerId> {
        self.selection.as_ref()
    }

    // ---- history ----

    /// Start a continuous gesture (e.g. a drag); its mutations undo as one step.
    pub fn begin_gesture(&mut self) -> bool {
        self.history.begin_gesture(self.doc.clone())
    }

    /// Finish the open gesture.
    pub fn commit_gesture(&mut self) -> bool {
        self.history.commit_gesture()
    }

    /// Restore the previous snapshot.
    pub fn undo(&mut self) -> bool {
        self.swap_history(History::undo)
    }

    /// Re-apply the next snapshot.
    pub fn redo(&mut self) -> bool {
        self.swap_history(History::redo)
    }

    /// Return `true` when an undo step is available.
    pub fn can_undo(&self) -> bool {
        self.history.undo_len() > 0 || self.history.in_gesture()
    }

    /// Return `true` when a redo step is available.
    pub fn can_redo(&self) -> bool {
        self.history.redo_len() > 0
    }

    fn swap_history(
        &mut self,
        step: fn(&mut History<Document>, Document) -> Result<Document, Document>,
    ) -> bool {
        let current = std::mem::take(&mut self.doc);
        let (zoom, pan) = (current.zoom, current.pan);
        let (mut doc, moved) = match step(&mut self.history, current) {
            Ok(doc) => (doc, true),
            Err(doc) => (doc, false),
        };
        doc.zoom = zoom;
        doc.pan = pan;
        self.doc = doc;
        if let Some(sel) = &self.selection
            && self.doc.find_layer(sel).is_none()
        {
            self.selection = None;
        }
        moved
    }
}

fn section_by_id<'a>(doc: &'a mut Document, id: &SectionId) -> Result<&'a mut Section, String> {
    doc.section_mut(id)
        .ok_or_else(|| format!("unknown section '{id}'"))
}

fn position_of(section: &Section, layer_id: &LayerId) -> Result<usize, String> {
    section
        .elements
        .iter()
        .position(|l| &l.id == layer_id)
        .ok_or_else(|| format!("unknown layer '{layer_id}' in section '{}'", section.id))
}

fn layer_in<'a>(
    doc: &'a mut Document,
    section_id: &SectionId,
    layer_id: &LayerId,
) -> Result<&'a mut Layer, String> {
    let section = section_by_id(doc, section_id)?;
    let idx = position_of(section, layer_id)?;
    Ok(&mut section.elements[idx])
}

#[cfg(test)]
#[path = "../../tests/unit/editor/store.rs"]
mod tests;
