//! Scene store and history management.

use crate::binding::{self, BindingState};
use crate::branding::BrandingRegistry;
use crate::config::EditorConfig;
use crate::document::{SceneDocument, StageInfo};
use crate::error::SceneResult;
use crate::geometry::{AspectRatio, Stage};
use crate::history::History;
use crate::shapes::{Element, ElementId, ElementSpec, ElementUpdate, FitMode};
use crate::snap::Guide;
use std::collections::HashSet;

/// Direction for [`Scene::reorder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderDirection {
    /// One layer towards the front.
    Forward,
    /// One layer towards the back.
    Backward,
    /// Topmost.
    ToFront,
    /// Bottommost.
    ToBack,
}

/// The single source of truth for the ordered element sequence.
///
/// Elements are kept in paint order (last is topmost). Every structural or
/// property change snapshots the whole sequence into a bounded undo history
/// first; selection changes do not.
#[derive(Debug, Clone)]
pub struct Scene {
    pub(crate) elements: Vec<Element>,
    history: History<Vec<Element>>,
    pub(crate) stage: Stage,
    aspect_ratio: AspectRatio,
    pub(crate) branding: BrandingRegistry,
    pub(crate) config: EditorConfig,
    /// Number of elements created through [`Scene::add_element`]; display
    /// numbering only, never used as an id.
    created: u64,
    /// Guides of the gesture in progress.
    pub(crate) guides: Vec<Guide>,
    /// Bound images whose pan toggle is on.
    pub(crate) pan_enabled: HashSet<ElementId>,
    /// Images bound by the drag in progress. They keep following the pointer
    /// on their own until the drop instead of dragging their frame along.
    pub(crate) drag_bound: HashSet<ElementId>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            elements: Vec::new(),
            history: History::new(config.history_depth),
            stage: config.stage(),
            aspect_ratio: AspectRatio::default(),
            branding: BrandingRegistry::default(),
            config,
            created: 0,
            guides: Vec::new(),
            pan_enabled: HashSet::new(),
            drag_bound: HashSet::new(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    pub fn branding(&self) -> &BrandingRegistry {
        &self.branding
    }

    /// Mutable access for the branding-management collaborator.
    pub fn branding_mut(&mut self) -> &mut BrandingRegistry {
        &mut self.branding
    }

    /// Elements in paint order (back to front).
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| &el.id == id)
    }

    fn index_of(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|el| &el.id == id)
    }

    /// The selected element, if any.
    pub fn selected(&self) -> Option<&Element> {
        self.elements.iter().find(|el| el.selected)
    }

    pub fn created_count(&self) -> u64 {
        self.created
    }

    /// Push the current state to the undo stack (call before making changes).
    fn push_undo(&mut self) {
        self.history.push(self.elements.clone());
    }

    /// Create an element with per-kind defaults and append it on top.
    pub fn add_element(&mut self, spec: ElementSpec) -> SceneResult<ElementId> {
        let element = Element::from_spec(spec, self.stage)?;
        let id = element.id.clone();
        self.push_undo();
        self.elements.push(element);
        self.created += 1;
        log::debug!("Added {} #{} ({})", self.elements[self.elements.len() - 1].element_type(), self.created, id);
        Ok(id)
    }

    /// Shallow-merge `update` onto the element with `id`.
    ///
    /// Unknown ids are ignored and return false. Derived size and fractional
    /// layout are recomputed after the merge.
    pub fn update_element(&mut self, id: &ElementId, update: ElementUpdate) -> bool {
        self.update_many(vec![(id.clone(), update)])
    }

    /// Apply several patches as one undoable step.
    ///
    /// Nothing is recorded when no patch changes its element, so repeated
    /// gesture ticks with the same input stay out of the history. A `frameId`
    /// naming something other than a free frame is dropped from its patch.
    pub fn update_many(&mut self, updates: Vec<(ElementId, ElementUpdate)>) -> bool {
        let stage = self.stage;
        let mut claimed = HashSet::new();
        let mut changed: Vec<(usize, Element)> = Vec::new();
        for (id, mut update) in updates {
            let Some(index) = self.index_of(&id) else {
                log::debug!("Ignoring update for unknown element {id}");
                continue;
            };
            let refused = match &update.frame_id {
                Some(Some(frame_id)) => {
                    let free = binding::find_frame(&self.elements, frame_id).is_some()
                        && !binding::is_frame_occupied(&self.elements, frame_id, &id);
                    let refused = !free || !claimed.insert(frame_id.clone());
                    if refused {
                        log::warn!("Refusing to bind {id} to {frame_id}: not a free frame");
                    }
                    refused
                }
                _ => false,
            };
            if refused {
                update.frame_id = None;
            }
            let mut element = self.elements[index].clone();
            update.apply_to(&mut element);
            element.normalize(stage);
            if element != self.elements[index] {
                changed.push((index, element));
            }
        }
        if changed.is_empty() {
            return false;
        }
        self.push_undo();
        for (index, element) in changed {
            self.elements[index] = element;
        }
        true
    }

    /// Delete the selected element. A deleted frame releases its image.
    pub fn delete_selected(&mut self) -> bool {
        let Some(index) = self.elements.iter().position(|el| el.selected) else {
            return false;
        };
        self.push_undo();
        let removed = self.elements.remove(index);
        if removed.is_frame() {
            for element in &mut self.elements {
                if element.frame_id() == Some(&removed.id) {
                    ElementUpdate::default().frame_id(None).apply_to(element);
                    log::debug!("Released image {} from deleted frame {}", element.id, removed.id);
                }
            }
        }
        self.pan_enabled.remove(&removed.id);
        true
    }

    /// Move an element in paint order. Returns false (and records nothing)
    /// when the element is unknown or already at the requested end.
    pub fn reorder(&mut self, id: &ElementId, direction: ReorderDirection) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let last = self.elements.len() - 1;
        let target = match direction {
            ReorderDirection::Forward if index < last => index + 1,
            ReorderDirection::Backward if index > 0 => index - 1,
            ReorderDirection::ToFront if index < last => last,
            ReorderDirection::ToBack if index > 0 => 0,
            _ => return false,
        };
        self.push_undo();
        match direction {
            ReorderDirection::Forward | ReorderDirection::Backward => {
                self.elements.swap(index, target)
            }
            ReorderDirection::ToFront | ReorderDirection::ToBack => {
                let element = self.elements.remove(index);
                self.elements.insert(target, element);
            }
        }
        true
    }

    /// Select one element (or none). Not recorded in history.
    pub fn select(&mut self, id: Option<&ElementId>) {
        for element in &mut self.elements {
            element.selected = Some(&element.id) == id;
        }
    }

    pub fn deselect_all(&mut self) {
        self.select(None);
    }

    pub fn toggle_visibility(&mut self, id: &ElementId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.push_undo();
        let element = &mut self.elements[index];
        element.visible = !element.visible;
        true
    }

    /// Change the stage dimensions without touching element geometry.
    pub fn set_stage_size(&mut self, width: f64, height: f64) {
        self.stage = Stage::new(width, height);
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: AspectRatio) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Replay every element's fractional layout on a new stage size.
    pub fn relayout_to_stage(&mut self, width: f64, height: f64) {
        let stage = Stage::new(width, height);
        self.push_undo();
        for element in &mut self.elements {
            element.apply_layout(stage);
            element.normalize(stage);
        }
        self.stage = stage;
    }

    /// Replace the whole sequence.
    ///
    /// Images naming a frame that is missing, or already taken by an earlier
    /// image, come in unbound.
    pub fn set_elements(&mut self, mut elements: Vec<Element>) {
        binding::release_invalid_bindings(&mut elements);
        self.push_undo();
        self.elements = elements;
        self.prune_image_state();
    }

    /// Forget pan toggles and drag bindings of images that are no longer
    /// bound.
    fn prune_image_state(&mut self) {
        let elements = &self.elements;
        let still_bound = |id: &ElementId| {
            elements
                .iter()
                .find(|el| &el.id == id)
                .is_some_and(|el| BindingState::of(el, elements).is_bound())
        };
        self.pan_enabled.retain(|id| still_bound(id));
        self.drag_bound.retain(|id| still_bound(id));
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.push_undo();
        self.elements.clear();
        self.pan_enabled.clear();
        self.drag_bound.clear();
        self.guides.clear();
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.elements);
        if undone {
            self.prune_image_state();
        }
        undone
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo(&mut self.elements);
        if redone {
            self.prune_image_state();
        }
        redone
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &History<Vec<Element>> {
        &self.history
    }

    /// Binding state of an image.
    pub fn binding_state(&self, image_id: &ElementId) -> BindingState {
        match self.get(image_id) {
            Some(image) => BindingState::of(image, &self.elements),
            None => BindingState::Unbound,
        }
    }

    /// Image hosted by a frame.
    pub fn bound_image(&self, frame_id: &ElementId) -> Option<&Element> {
        binding::bound_image(&self.elements, frame_id)
    }

    /// Change an image's fit mode, re-fitting it when bound.
    pub fn set_fit_mode(&mut self, image_id: &ElementId, mode: FitMode) -> bool {
        let Some(image) = self.get(image_id).filter(|el| el.is_image()) else {
            return false;
        };
        let mut update = match image.frame_id().and_then(|f| binding::find_frame(&self.elements, f)) {
            Some(frame) => binding::refit_update(image, frame, mode),
            None => ElementUpdate::default(),
        };
        update.fit_mode = Some(mode);
        self.update_element(image_id, update)
    }

    /// Explicitly release an image from its frame.
    pub fn detach_image(&mut self, image_id: &ElementId) -> bool {
        if !self.binding_state(image_id).is_bound() {
            return false;
        }
        self.pan_enabled.remove(image_id);
        self.update_element(image_id, ElementUpdate::default().frame_id(None))
    }

    /// Load a document: stage, elements (one undoable step) and branding.
    ///
    /// Branding entries are added on top of the current registry. Invalid
    /// frame bindings are released as in [`Scene::set_elements`].
    pub fn apply_document(&mut self, document: SceneDocument) -> SceneResult<()> {
        document.validate()?;
        let SceneDocument { elements, stage, branding } = document;

        self.stage = stage.stage();
        self.aspect_ratio = stage.aspect_ratio;
        self.set_elements(elements);
        if let Some(branding) = branding {
            self.branding.merge(&branding);
        }
        Ok(())
    }

    /// Snapshot the scene as a serializable document.
    pub fn to_document(&self) -> SceneDocument {
        SceneDocument {
            elements: self.elements.clone(),
            stage: StageInfo {
                width: self.stage.width,
                height: self.stage.height,
                aspect_ratio: self.aspect_ratio,
            },
            branding: Some(self.branding.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SceneError;
    use crate::shapes::{ElementKind, ElementType};

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn add(scene: &mut Scene, kind: ElementType) -> ElementId {
        scene.add_element(ElementSpec::Kind(kind)).unwrap()
    }

    fn add_image(scene: &mut Scene) -> ElementId {
        scene
            .add_element(ElementSpec::Image { src: "a.png".into(), width: 100.0, height: 100.0 })
            .unwrap()
    }

    #[test]
    fn test_scene_creation() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert_eq!(scene.stage(), Stage::new(1080.0, 1080.0));
        assert_eq!(scene.aspect_ratio(), AspectRatio::Square);
        assert!(!scene.can_undo());
    }

    #[test]
    fn test_add_element() {
        init();
        let mut scene = Scene::new();
        let id = add(&mut scene, ElementType::Rectangle);
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.get(&id).unwrap().element_type(), ElementType::Rectangle);
        assert!(scene.can_undo());
        assert_eq!(scene.created_count(), 1);
    }

    #[test]
    fn test_add_unsupported_kind() {
        let mut scene = Scene::new();
        let result = scene.add_element(ElementSpec::Kind(ElementType::Image));
        assert!(matches!(result, Err(SceneError::UnsupportedKind(_))));
        assert!(scene.is_empty());
        assert!(!scene.can_undo());
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut scene = Scene::new();
        add(&mut scene, ElementType::Circle);
        let past = scene.history().past_len();
        assert!(!scene.update_element(&ElementId::from("nope"), ElementUpdate::default().position(1.0, 1.0)));
        assert_eq!(scene.history().past_len(), past);
    }

    #[test]
    fn test_update_recomputes_layout() {
        let mut scene = Scene::new();
        let id = add(&mut scene, ElementType::Rectangle);
        scene.update_element(&id, ElementUpdate::default().position(540.0, 270.0));
        let el = scene.get(&id).unwrap();
        assert!((el.layout.x - 0.5).abs() < 1e-12);
        assert!((el.layout.y - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_update_syncs_radial_size() {
        let mut scene = Scene::new();
        let id = add(&mut scene, ElementType::Circle);
        let update = ElementUpdate { radius: Some(80.0), ..Default::default() };
        scene.update_element(&id, update);
        let el = scene.get(&id).unwrap();
        assert_eq!(el.width, 160.0);
        assert_eq!(el.height, 160.0);
    }

    #[test]
    fn test_z_order() {
        let mut scene = Scene::new();
        let a = add(&mut scene, ElementType::Rectangle);
        let b = add(&mut scene, ElementType::Circle);
        let c = add(&mut scene, ElementType::Star);

        assert!(scene.reorder(&a, ReorderDirection::Forward));
        assert_eq!(scene.elements()[1].id, a);
        assert!(scene.reorder(&a, ReorderDirection::ToFront));
        assert_eq!(scene.elements()[2].id, a);
        assert!(!scene.reorder(&a, ReorderDirection::Forward));
        assert!(scene.reorder(&c, ReorderDirection::ToBack));
        assert_eq!(scene.elements()[0].id, c);
        assert!(!scene.reorder(&c, ReorderDirection::Backward));
        assert_eq!(scene.elements()[1].id, b);
    }

    #[test]
    fn test_reorder_at_end_records_nothing() {
        let mut scene = Scene::new();
        let a = add(&mut scene, ElementType::Rectangle);
        let past = scene.history().past_len();
        assert!(!scene.reorder(&a, ReorderDirection::ToFront));
        assert_eq!(scene.history().past_len(), past);
    }

    #[test]
    fn test_select_not_in_history() {
        let mut scene = Scene::new();
        let a = add(&mut scene, ElementType::Rectangle);
        let past = scene.history().past_len();
        scene.select(Some(&a));
        assert_eq!(scene.selected().unwrap().id, a);
        scene.deselect_all();
        assert!(scene.selected().is_none());
        assert_eq!(scene.history().past_len(), past);
    }

    #[test]
    fn test_delete_selected() {
        let mut scene = Scene::new();
        let a = add(&mut scene, ElementType::Rectangle);
        assert!(!scene.delete_selected());
        scene.select(Some(&a));
        assert!(scene.delete_selected());
        assert!(scene.is_empty());
        assert!(scene.undo());
        assert!(scene.get(&a).is_some());
    }

    #[test]
    fn test_delete_frame_releases_image() {
        let mut scene = Scene::new();
        let frame = add(&mut scene, ElementType::Frame);
        let image = add_image(&mut scene);
        scene.update_element(&image, ElementUpdate::default().frame_id(Some(frame.clone())));
        assert!(scene.binding_state(&image).is_bound());
        scene.select(Some(&frame));
        scene.delete_selected();
        assert_eq!(scene.get(&image).unwrap().frame_id(), None);
    }

    #[test]
    fn test_update_refuses_occupied_frame() {
        init();
        let mut scene = Scene::new();
        let frame = add(&mut scene, ElementType::Frame);
        let first = add_image(&mut scene);
        let second = add_image(&mut scene);
        assert!(scene.update_element(&first, ElementUpdate::default().frame_id(Some(frame.clone()))));

        let past = scene.history().past_len();
        assert!(!scene.update_element(&second, ElementUpdate::default().frame_id(Some(frame.clone()))));
        assert_eq!(scene.history().past_len(), past);
        assert_eq!(scene.binding_state(&first), BindingState::Bound(frame.clone()));
        assert_eq!(scene.binding_state(&second), BindingState::Unbound);
        assert_eq!(scene.bound_image(&frame).unwrap().id, first);

        // The rest of the patch still applies.
        let update = ElementUpdate::default().frame_id(Some(frame)).position(5.0, 6.0);
        assert!(scene.update_element(&second, update));
        let el = scene.get(&second).unwrap();
        assert_eq!((el.x, el.y, el.frame_id()), (5.0, 6.0, None));
    }

    #[test]
    fn test_update_refuses_non_frame_target() {
        let mut scene = Scene::new();
        let rect = add(&mut scene, ElementType::Rectangle);
        let image = add_image(&mut scene);
        assert!(!scene.update_element(&image, ElementUpdate::default().frame_id(Some(rect))));
        assert!(!scene.update_element(&image, ElementUpdate::default().frame_id(Some("ghost".into()))));
        assert_eq!(scene.get(&image).unwrap().frame_id(), None);
    }

    #[test]
    fn test_batch_cannot_bind_two_images_to_one_frame() {
        let mut scene = Scene::new();
        let frame = add(&mut scene, ElementType::Frame);
        let a = add_image(&mut scene);
        let b = add_image(&mut scene);
        scene.update_many(vec![
            (a.clone(), ElementUpdate::default().frame_id(Some(frame.clone()))),
            (b.clone(), ElementUpdate::default().frame_id(Some(frame.clone()))),
        ]);
        assert_eq!(scene.binding_state(&a), BindingState::Bound(frame));
        assert_eq!(scene.binding_state(&b), BindingState::Unbound);
    }

    #[test]
    fn test_set_elements_releases_invalid_bindings() {
        init();
        let mut scene = Scene::new();
        let frame = add(&mut scene, ElementType::Frame);
        let a = add_image(&mut scene);
        let b = add_image(&mut scene);
        let mut elements = scene.elements().to_vec();
        for element in &mut elements[1..] {
            ElementUpdate::default().frame_id(Some(frame.clone())).apply_to(element);
        }
        let c = {
            let mut orphan = elements[2].clone();
            orphan.id = ElementId::generate();
            ElementUpdate::default().frame_id(Some("missing".into())).apply_to(&mut orphan);
            let id = orphan.id.clone();
            elements.push(orphan);
            id
        };

        scene.set_elements(elements);
        assert_eq!(scene.binding_state(&a), BindingState::Bound(frame));
        assert_eq!(scene.get(&b).unwrap().frame_id(), None);
        assert_eq!(scene.get(&c).unwrap().frame_id(), None);
    }

    #[test]
    fn test_undo_forgets_pan_of_unbound_image() {
        let mut scene = Scene::new();
        let frame = add(&mut scene, ElementType::Frame);
        let image = add_image(&mut scene);
        scene.update_element(&image, ElementUpdate::default().frame_id(Some(frame)));
        assert!(scene.toggle_image_pan(&image));

        assert!(scene.undo());
        assert_eq!(scene.binding_state(&image), BindingState::Unbound);
        assert!(!scene.is_pan_enabled(&image));
        assert!(scene.redo());
        assert!(scene.binding_state(&image).is_bound());
        assert!(!scene.is_pan_enabled(&image));
    }

    #[test]
    fn test_toggle_visibility_is_undoable() {
        let mut scene = Scene::new();
        let a = add(&mut scene, ElementType::Rectangle);
        assert!(scene.toggle_visibility(&a));
        assert!(!scene.get(&a).unwrap().visible);
        scene.undo();
        assert!(scene.get(&a).unwrap().visible);
    }

    #[test]
    fn test_undo_add_element() {
        let mut scene = Scene::new();
        add(&mut scene, ElementType::Rectangle);
        assert!(scene.undo());
        assert!(scene.is_empty());
        assert!(scene.can_redo());
        assert!(scene.redo());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_undo_clears_redo() {
        let mut scene = Scene::new();
        add(&mut scene, ElementType::Rectangle);
        scene.undo();
        add(&mut scene, ElementType::Circle);
        assert!(!scene.can_redo());
        assert!(!scene.redo());
    }

    #[test]
    fn test_undo_empty_stack() {
        let mut scene = Scene::new();
        assert!(!scene.undo());
        assert!(!scene.redo());
    }

    #[test]
    fn test_history_depth_from_config() {
        let config = EditorConfig { history_depth: 2, ..Default::default() };
        let mut scene = Scene::with_config(config);
        for _ in 0..5 {
            add(&mut scene, ElementType::Rectangle);
        }
        assert_eq!(scene.history().past_len(), 2);
        while scene.undo() {}
        assert_eq!(scene.len(), 3);
    }

    #[test]
    fn test_clear_and_set_elements() {
        let mut scene = Scene::new();
        add(&mut scene, ElementType::Rectangle);
        let snapshot = scene.elements().to_vec();
        scene.clear();
        assert!(scene.is_empty());
        scene.set_elements(snapshot.clone());
        assert_eq!(scene.elements(), snapshot.as_slice());
        scene.undo();
        assert!(scene.is_empty());
    }

    #[test]
    fn test_relayout_to_stage() {
        let mut scene = Scene::new();
        let id = add(&mut scene, ElementType::Ellipse);
        scene.relayout_to_stage(2160.0, 540.0);
        let el = scene.get(&id).unwrap();
        assert!((el.x - 200.0).abs() < 1e-9);
        assert!((el.y - 50.0).abs() < 1e-9);
        match el.kind {
            ElementKind::Ellipse { radius_x, radius_y } => {
                assert!((radius_x - 150.0).abs() < 1e-9);
                assert!((radius_y - 25.0).abs() < 1e-9);
            }
            _ => panic!("expected ellipse"),
        }
        assert_eq!(scene.stage(), Stage::new(2160.0, 540.0));
    }

    #[test]
    fn test_set_fit_mode_refits_bound_image() {
        let mut scene = Scene::new();
        let frame = add(&mut scene, ElementType::Frame);
        let image = add_image(&mut scene);
        scene.update_element(&image, ElementUpdate::default().frame_id(Some(frame.clone())));
        assert!(scene.set_fit_mode(&image, FitMode::Stretch));
        let el = scene.get(&image).unwrap();
        assert_eq!(el.layout_rect(), scene.get(&frame).unwrap().layout_rect());
        assert_eq!(el.as_image().unwrap().fit_mode, FitMode::Stretch);
    }

    #[test]
    fn test_detach_image() {
        let mut scene = Scene::new();
        let frame = add(&mut scene, ElementType::Frame);
        let image = add_image(&mut scene);
        assert!(!scene.detach_image(&image));
        scene.update_element(&image, ElementUpdate::default().frame_id(Some(frame)));
        assert!(scene.detach_image(&image));
        assert_eq!(scene.binding_state(&image), BindingState::Unbound);
    }

    #[test]
    fn test_document_round_trip() {
        let mut scene = Scene::new();
        add(&mut scene, ElementType::Arrow);
        scene.branding_mut().add_color("brand", "#123456");
        let json = scene.to_document().to_json().unwrap();

        let mut other = Scene::new();
        other.apply_document(SceneDocument::from_json(&json).unwrap()).unwrap();
        assert_eq!(other.len(), 1);
        assert_eq!(other.elements()[0].id, scene.elements()[0].id);
        assert_eq!(other.elements()[0].kind, scene.elements()[0].kind);
        assert_eq!(other.branding().color("brand"), Some("#123456"));
    }

    #[test]
    fn test_apply_document_drops_double_binding() {
        init();
        let json = r#"{
            "elements": [
                {"id": "f", "type": "frame", "width": 100, "height": 100},
                {"id": "i1", "type": "image", "frameId": "f"},
                {"id": "i2", "type": "image", "frameId": "f"},
                {"id": "i3", "type": "image", "frameId": "missing"}
            ],
            "stage": {"width": 1080, "height": 1920, "aspectRatio": "9:16"}
        }"#;
        let mut scene = Scene::new();
        scene.apply_document(SceneDocument::from_json(json).unwrap()).unwrap();
        assert_eq!(scene.get(&"i1".into()).unwrap().frame_id(), Some(&ElementId::from("f")));
        assert_eq!(scene.get(&"i2".into()).unwrap().frame_id(), None);
        assert_eq!(scene.get(&"i3".into()).unwrap().frame_id(), None);
        assert_eq!(scene.aspect_ratio(), AspectRatio::Portrait);
        assert_eq!(scene.stage().height, 1920.0);
    }
}
