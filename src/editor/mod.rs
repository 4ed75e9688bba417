//! # Layout Editor
//!
//! Owns the element list, the undo/redo history and the transient
//! interaction state (selection, drag, clipboard, zoom, filters, mode).
//!
//! Every mutation follows the same path: build the new element list, make it
//! current, push a history snapshot, queue one notification. Failed
//! operations queue an error notification and leave the list untouched.
//!
//! ```
//! use seatplan::config::EditorConfig;
//! use seatplan::editor::LayoutEditor;
//!
//! let mut editor = LayoutEditor::new(EditorConfig::default())?;
//! editor.add_seat(100, 100);
//! editor.add_area("entrance")?;
//! assert_eq!(editor.elements().len(), 2);
//!
//! editor.undo();
//! assert_eq!(editor.elements().len(), 1);
//! # Ok::<(), seatplan::error::SeatplanError>(())
//! ```

pub mod history;
pub mod ids;
pub mod mount;

pub use history::{History, HistoryEntry};
pub use ids::IdGenerator;
pub use mount::MountedEditor;

use std::collections::BTreeSet;

use crate::config::{EditorConfig, ZOOM_DEFAULT, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};
use crate::error::{Result, SeatplanError};
use crate::layout::{
    self, AMENITY_SIZE, AmenityAttributes, AreaAttributes, ElementAttributes, ElementKind,
    KindFilter, LayoutDocument, LayoutElement, LayoutStats, Point, Position, Pricing, SEAT_SIZE,
    SeatAttributes, Size, Zone, smart, templates,
};
use crate::notify::{Notification, Outbox};
use crate::shortcuts::EditorAction;
use crate::storage::LayoutStore;

/// Name given to a fresh layout.
pub const DEFAULT_LAYOUT_NAME: &str = "Untitled Layout";

/// Label of the bottom history entry.
pub const INITIAL_LABEL: &str = "Initial layout";

/// Canvas interaction mode. Clicking places seats in `Add` mode and picks
/// elements in `Drag` mode; only `Drag` mode moves elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Add,
    Drag,
}

/// An in-flight drag.
#[derive(Debug, Clone)]
struct DragState {
    id: String,
    /// Pointer minus element origin at pick-up.
    offset: Point,
    /// Position before the drag started.
    origin: Position,
}

/// Export file produced by [`LayoutEditor::export_layout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedLayout {
    pub file_name: String,
    pub contents: String,
}

pub struct LayoutEditor {
    config: EditorConfig,
    name: String,
    elements: Vec<LayoutElement>,
    history: History,
    selected: Option<String>,
    clipboard: Option<LayoutElement>,
    drag: Option<DragState>,
    mode: EditorMode,
    zoom_percent: u16,
    kind_filter: KindFilter,
    search: String,
    ids: IdGenerator,
    outbox: Outbox,
}

impl LayoutEditor {
    /// Empty editor. Fails if `config` does not validate.
    pub fn new(config: EditorConfig) -> Result<Self> {
        Self::with_ids(config, IdGenerator::new())
    }

    /// Empty editor drawing element ids from `ids`.
    pub fn with_ids(config: EditorConfig, ids: IdGenerator) -> Result<Self> {
        config.validate()?;
        let history = History::new(Vec::new(), INITIAL_LABEL, config.history_capacity);
        Ok(Self {
            config,
            name: DEFAULT_LAYOUT_NAME.to_string(),
            elements: Vec::new(),
            history,
            selected: None,
            clipboard: None,
            drag: None,
            mode: EditorMode::default(),
            zoom_percent: ZOOM_DEFAULT,
            kind_filter: KindFilter::All,
            search: String::new(),
            ids,
            outbox: Outbox::default(),
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn elements(&self) -> &[LayoutElement] {
        &self.elements
    }

    pub fn element(&self, id: &str) -> Option<&LayoutElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected(&self) -> Option<&LayoutElement> {
        self.selected.as_deref().and_then(|id| self.element(id))
    }

    pub fn clipboard(&self) -> Option<&LayoutElement> {
        self.clipboard.as_ref()
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn zoom_percent(&self) -> u16 {
        self.zoom_percent
    }

    pub fn kind_filter(&self) -> KindFilter {
        self.kind_filter
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn stats(&self) -> LayoutStats {
        LayoutStats::of(&self.elements)
    }

    /// Drain queued notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.outbox.take()
    }

    // ========================================================================
    // COMMIT PATH
    // ========================================================================

    fn commit(&mut self, elements: Vec<LayoutElement>, label: String, message: String) {
        tracing::debug!(action = %label, elements = elements.len(), "commit");
        self.history.push(elements.clone(), label);
        self.elements = elements;
        self.drop_stale_selection();
        self.outbox.success(message);
    }

    /// Queue `err` for the user and hand it back for the caller to return.
    fn fail(&mut self, err: SeatplanError) -> SeatplanError {
        self.outbox.error(err.to_string());
        err
    }

    fn drop_stale_selection(&mut self) {
        if let Some(id) = &self.selected {
            if !self.elements.iter().any(|e| &e.id == id) {
                self.selected = None;
            }
        }
    }

    fn snap_position(&self, x: f64, y: f64) -> Position {
        self.config.snap_position(x, y)
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    fn place(&mut self, element: LayoutElement, message: String) -> &LayoutElement {
        let label = format!("Add {}", element.kind());
        let mut next = self.elements.clone();
        next.push(element);
        self.commit(next, label, message);
        &self.elements[self.elements.len() - 1]
    }

    // ========================================================================
    // PLACEMENT
    // ========================================================================

    /// Place a seat at `(x, y)`, snapped to the grid.
    ///
    /// The seat number is `S` + (existing seat count + 1), so numbers freed by
    /// deletions are handed out again.
    pub fn add_seat(&mut self, x: i32, y: i32) -> &LayoutElement {
        self.cancel_drag();
        let seats = self
            .elements
            .iter()
            .filter(|e| e.kind() == ElementKind::Seat)
            .count();
        let number = format!("S{}", seats + 1);
        let element = LayoutElement {
            id: self.ids.next_unique(ElementKind::Seat, &self.elements),
            position: self.snap_position(f64::from(x), f64::from(y)),
            size: SEAT_SIZE,
            attributes: ElementAttributes::Seat(SeatAttributes {
                number: number.clone(),
                zone: Zone::Reading,
                features: BTreeSet::new(),
                pricing: Pricing::STANDARD,
            }),
        };
        self.place(element, format!("Added seat {}", number))
    }

    /// Place an area from the template registered under `area_type`.
    pub fn add_area(&mut self, area_type: &str) -> Result<&LayoutElement> {
        self.cancel_drag();
        let Some(template) = templates::area_by_key(area_type) else {
            tracing::warn!(key = area_type, "unknown area template");
            return Err(self.fail(SeatplanError::UnknownTemplate {
                kind: ElementKind::Area,
                key: area_type.to_string(),
            }));
        };
        let drop_at = templates::AREA_DROP_POSITION;
        let element = LayoutElement {
            id: self.ids.next_unique(ElementKind::Area, &self.elements),
            position: self.snap_position(f64::from(drop_at.x), f64::from(drop_at.y)),
            size: template.size,
            attributes: ElementAttributes::Area(AreaAttributes {
                name: template.name.to_string(),
                area_type: template.key.to_string(),
                color: template.color.to_string(),
            }),
        };
        Ok(self.place(element, format!("Added {}", template.name)))
    }

    /// Place an amenity from the template registered under `amenity_type`.
    pub fn add_amenity(&mut self, amenity_type: &str) -> Result<&LayoutElement> {
        self.cancel_drag();
        let Some(template) = templates::amenity_by_key(amenity_type) else {
            tracing::warn!(key = amenity_type, "unknown amenity template");
            return Err(self.fail(SeatplanError::UnknownTemplate {
                kind: ElementKind::Amenity,
                key: amenity_type.to_string(),
            }));
        };
        let drop_at = templates::AMENITY_DROP_POSITION;
        let element = LayoutElement {
            id: self.ids.next_unique(ElementKind::Amenity, &self.elements),
            position: self.snap_position(f64::from(drop_at.x), f64::from(drop_at.y)),
            size: AMENITY_SIZE,
            attributes: ElementAttributes::Amenity(AmenityAttributes {
                name: template.name.to_string(),
                amenity_type: template.key.to_string(),
                icon: template.icon.to_string(),
            }),
        };
        Ok(self.place(element, format!("Added {}", template.name)))
    }

    /// Canvas click. Adds a seat in add mode; picks the topmost visible
    /// element (or clears the selection) in drag mode. Returns the id of the
    /// added or selected element.
    pub fn click_canvas(&mut self, pointer: Point) -> Option<String> {
        match self.mode {
            EditorMode::Add => {
                // Out-of-range pointers saturate, then clamp onto the canvas.
                let seat = self.add_seat(pointer.x.round() as i32, pointer.y.round() as i32);
                Some(seat.id.clone())
            }
            EditorMode::Drag => {
                let hit = self.element_at(pointer).map(|e| e.id.clone());
                self.selected = hit.clone();
                hit
            }
        }
    }

    // ========================================================================
    // DRAG
    // ========================================================================

    pub fn set_mode(&mut self, mode: EditorMode) {
        if self.mode != mode {
            self.cancel_drag();
            self.mode = mode;
            tracing::debug!(?mode, "mode changed");
        }
    }

    /// Pick up `id` at `pointer`. No-op outside drag mode or for unknown ids.
    pub fn begin_drag(&mut self, id: &str, pointer: Point) -> bool {
        if self.mode != EditorMode::Drag {
            return false;
        }
        self.cancel_drag();
        let Some(element) = self.element(id) else {
            return false;
        };
        let origin = element.position;
        self.drag = Some(DragState {
            id: id.to_string(),
            offset: Point::new(
                pointer.x - f64::from(origin.x),
                pointer.y - f64::from(origin.y),
            ),
            origin,
        });
        self.selected = Some(id.to_string());
        true
    }

    /// Follow the pointer. Moves the element in place without touching
    /// history; returns the snapped position.
    pub fn update_drag(&mut self, pointer: Point) -> Option<Position> {
        let drag = self.drag.as_ref()?;
        let position = self.snap_position(pointer.x - drag.offset.x, pointer.y - drag.offset.y);
        let element = self.elements.iter_mut().find(|e| e.id == drag.id)?;
        element.position = position;
        Some(position)
    }

    /// Release. Commits one "Move <kind>" entry if the element moved.
    pub fn end_drag(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        let Some(element) = self.element(&drag.id) else {
            return false;
        };
        if element.position == drag.origin {
            return false;
        }
        let kind = element.kind();
        let message = format!(
            "Moved {} to ({}, {})",
            element.label(),
            element.position.x,
            element.position.y
        );
        let elements = self.elements.clone();
        self.commit(elements, format!("Move {}", kind), message);
        true
    }

    /// Abandon an in-flight drag, putting the element back where it was.
    pub fn cancel_drag(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        if let Some(element) = self.elements.iter_mut().find(|e| e.id == drag.id) {
            element.position = drag.origin;
        }
        true
    }

    // ========================================================================
    // SELECTION, CLIPBOARD, DELETE
    // ========================================================================

    /// Set the single selection. Unknown ids clear it.
    pub fn select(&mut self, id: Option<&str>) -> bool {
        self.selected = id
            .filter(|id| self.elements.iter().any(|e| e.id == *id))
            .map(str::to_string);
        self.selected.is_some()
    }

    /// Copy the selection into the clipboard. No-op without a selection.
    pub fn copy(&mut self) -> bool {
        let Some(element) = self.selected().cloned() else {
            return false;
        };
        self.outbox
            .info(format!("Copied {} {}", element.kind(), element.label()));
        self.clipboard = Some(element);
        true
    }

    /// Insert a copy of the clipboard, offset from the copied position.
    /// No-op with an empty clipboard.
    pub fn paste(&mut self) -> Option<&LayoutElement> {
        let mut element = self.clipboard.clone()?;
        self.cancel_drag();
        let kind = element.kind();
        let shifted = element.position.offset(self.config.paste_offset);
        element.id = self.ids.next_unique(kind, &self.elements);
        element.position = self.snap_position(f64::from(shifted.x), f64::from(shifted.y));
        let message = format!("Pasted {} {}", kind, element.label());

        let mut next = self.elements.clone();
        next.push(element);
        self.commit(next, format!("Paste {}", kind), message);
        self.elements.last()
    }

    /// Remove the selected element. No-op without a selection.
    pub fn delete_selected(&mut self) -> bool {
        self.cancel_drag();
        let Some(id) = self.selected.take() else {
            return false;
        };
        let Some(element) = self.element(&id) else {
            return false;
        };
        let label = format!("Delete {}", element.kind());
        let message = format!("Deleted {} {}", element.kind(), element.label());
        let next = self
            .elements
            .iter()
            .filter(|e| e.id != id)
            .cloned()
            .collect();
        self.commit(next, label, message);
        true
    }

    // ========================================================================
    // UNDO / REDO
    // ========================================================================

    /// Step back one entry. No-op at the bottom of the history.
    pub fn undo(&mut self) -> bool {
        self.cancel_drag();
        let Some((label, snapshot)) = self.history.undo() else {
            return false;
        };
        let message = format!("Undo: {}", label);
        self.elements = snapshot.to_vec();
        tracing::debug!(cursor = self.history.cursor(), "undo");
        self.drop_stale_selection();
        self.outbox.info(message);
        true
    }

    /// Step forward one entry. No-op at the top of the history.
    pub fn redo(&mut self) -> bool {
        self.cancel_drag();
        let Some(entry) = self.history.redo() else {
            return false;
        };
        let message = format!("Redo: {}", entry.action_label);
        self.elements = entry.elements.clone();
        tracing::debug!(cursor = self.history.cursor(), "redo");
        self.drop_stale_selection();
        self.outbox.info(message);
        true
    }

    /// Run a keyboard action.
    pub fn apply(&mut self, action: EditorAction) -> bool {
        match action {
            EditorAction::Undo => self.undo(),
            EditorAction::Redo => self.redo(),
            EditorAction::Copy => self.copy(),
            EditorAction::Paste => self.paste().is_some(),
            EditorAction::DeleteSelected => self.delete_selected(),
        }
    }

    // ========================================================================
    // WHOLESALE REPLACEMENT
    // ========================================================================

    /// Replace everything with the smart layout.
    pub fn generate_smart_layout(&mut self) {
        self.cancel_drag();
        let ids = &mut self.ids;
        let mut elements = smart::smart_layout(|kind| ids.next_id(kind));
        for element in &mut elements {
            element.position =
                self.snap_position(f64::from(element.position.x), f64::from(element.position.y));
        }
        let seats = elements
            .iter()
            .filter(|e| e.kind() == ElementKind::Seat)
            .count();
        self.selected = None;
        self.commit(
            elements,
            "Generate smart layout".to_string(),
            format!("Generated smart layout with {} seats", seats),
        );
    }

    fn replace_with(&mut self, doc: LayoutDocument, label: &str, message: String) {
        let mut elements = doc.elements;
        for element in &mut elements {
            element.position =
                self.snap_position(f64::from(element.position.x), f64::from(element.position.y));
        }
        if let Some(name) = doc.name.filter(|n| !n.trim().is_empty()) {
            self.name = name;
        }
        self.selected = None;
        self.commit(elements, label.to_string(), message);
    }

    /// Serialize the layout as a downloadable JSON file.
    pub fn export_layout(&mut self) -> Result<ExportedLayout> {
        self.cancel_drag();
        let doc = LayoutDocument::new(&self.name, self.elements.clone());
        let contents = match doc.to_json() {
            Ok(contents) => contents,
            Err(e) => return Err(self.fail(e)),
        };
        let file_name = layout::export_file_name(&self.name);
        tracing::info!(file = %file_name, elements = self.elements.len(), "layout exported");
        self.outbox.success(format!("Exported {}", file_name));
        Ok(ExportedLayout {
            file_name,
            contents,
        })
    }

    /// Replace the layout with an exported file's contents.
    ///
    /// Malformed input fails with [`SeatplanError::ImportParse`] and leaves
    /// the current layout as it was.
    pub fn import_layout(&mut self, contents: &str) -> Result<()> {
        self.cancel_drag();
        let doc = match LayoutDocument::from_json(contents) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(error = %e, "import rejected");
                return Err(self.fail(e));
            }
        };
        let count = doc.elements.len();
        tracing::info!(elements = count, "layout imported");
        self.replace_with(doc, "Import layout", format!("Imported {} elements", count));
        Ok(())
    }

    /// Write the layout to the storage slot.
    pub fn save_layout(&mut self, store: &mut dyn LayoutStore) -> Result<()> {
        self.cancel_drag();
        let doc = LayoutDocument::new(&self.name, self.elements.clone());
        let result = doc
            .to_json()
            .and_then(|json| store.save(&self.config.storage_key, &json));
        if let Err(e) = result {
            return Err(self.fail(e));
        }
        tracing::info!(key = %self.config.storage_key, "layout saved");
        self.outbox.success("Layout saved");
        Ok(())
    }

    /// Replace the layout with the storage slot's contents.
    ///
    /// Returns `Ok(false)` when nothing has been saved yet.
    pub fn load_layout(&mut self, store: &dyn LayoutStore) -> Result<bool> {
        self.cancel_drag();
        let contents = match store.load(&self.config.storage_key) {
            Ok(Some(contents)) => contents,
            Ok(None) => {
                self.outbox.info("No saved layout found");
                return Ok(false);
            }
            Err(e) => return Err(self.fail(e)),
        };
        let doc = match LayoutDocument::from_json(&contents) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(error = %e, "saved layout rejected");
                return Err(self.fail(e));
            }
        };
        tracing::info!(key = %self.config.storage_key, "layout loaded");
        let message = format!("Loaded {} elements", doc.elements.len());
        self.replace_with(doc, "Load layout", message);
        Ok(true)
    }

    /// Discard every element once `confirm` approves the prompt.
    ///
    /// An empty canvas is left alone without asking.
    pub fn clear_canvas(&mut self, confirm: impl FnOnce(&str) -> bool) -> bool {
        if self.elements.is_empty() {
            return false;
        }
        self.cancel_drag();
        let prompt = format!(
            "Clear all {} elements? Only Undo can bring them back.",
            self.elements.len()
        );
        if !confirm(&prompt) {
            return false;
        }
        self.selected = None;
        self.commit(
            Vec::new(),
            "Clear canvas".to_string(),
            "Canvas cleared".to_string(),
        );
        true
    }

    // ========================================================================
    // ELEMENT EDITS
    // ========================================================================

    /// Replace an element's attribute payload. The kind cannot change.
    pub fn update_attributes(&mut self, id: &str, attributes: ElementAttributes) -> Result<()> {
        self.cancel_drag();
        let Some(index) = self.index_of(id) else {
            return Err(self.fail(SeatplanError::ElementNotFound(id.to_string())));
        };
        let kind = self.elements[index].kind();
        if attributes.kind() != kind {
            return Err(self.fail(SeatplanError::KindMismatch {
                expected: kind,
                found: attributes.kind(),
            }));
        }
        let mut next = self.elements.clone();
        next[index].attributes = attributes;
        let message = format!("Updated {} {}", kind, next[index].label());
        self.commit(next, format!("Update {}", kind), message);
        Ok(())
    }

    /// Move a seat into `zone`, keeping its other attributes.
    pub fn set_seat_zone(&mut self, id: &str, zone: Zone) -> Result<()> {
        let Some(element) = self.element(id) else {
            return Err(self.fail(SeatplanError::ElementNotFound(id.to_string())));
        };
        let Some(seat) = element.as_seat() else {
            return Err(self.fail(SeatplanError::NotASeat(id.to_string())));
        };
        let mut seat = seat.clone();
        seat.zone = zone;
        self.update_attributes(id, ElementAttributes::Seat(seat))
    }

    /// Resize an area. Dimensions snap to the grid, one cell at minimum.
    pub fn resize_area(&mut self, id: &str, size: Size) -> Result<()> {
        self.cancel_drag();
        let Some(index) = self.index_of(id) else {
            return Err(self.fail(SeatplanError::ElementNotFound(id.to_string())));
        };
        if self.elements[index].kind() != ElementKind::Area {
            return Err(self.fail(SeatplanError::NotResizable(id.to_string())));
        }
        let grid = self.config.grid_size;
        let snapped = Size::new(
            self.config.snap_i32(size.width).max(grid),
            self.config.snap_i32(size.height).max(grid),
        );
        let mut next = self.elements.clone();
        next[index].size = snapped;
        let message = format!(
            "Resized {} to {}x{}",
            next[index].label(),
            snapped.width,
            snapped.height
        );
        self.commit(next, "Resize area".to_string(), message);
        Ok(())
    }

    /// Rename the layout. Blank names are ignored.
    pub fn set_name(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.name = name.to_string();
        true
    }

    // ========================================================================
    // VIEW STATE
    // ========================================================================

    pub fn zoom_in(&mut self) -> u16 {
        self.zoom_percent = (self.zoom_percent + ZOOM_STEP).min(ZOOM_MAX);
        self.zoom_percent
    }

    pub fn zoom_out(&mut self) -> u16 {
        self.zoom_percent = self.zoom_percent.saturating_sub(ZOOM_STEP).max(ZOOM_MIN);
        self.zoom_percent
    }

    pub fn reset_zoom(&mut self) -> u16 {
        self.zoom_percent = ZOOM_DEFAULT;
        self.zoom_percent
    }

    pub fn set_kind_filter(&mut self, filter: KindFilter) {
        self.kind_filter = filter;
    }

    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_string();
    }

    /// Elements passing the current kind filter and search text.
    pub fn visible(&self) -> Vec<&LayoutElement> {
        layout::visible_elements(&self.elements, self.kind_filter, &self.search)
    }

    /// Topmost visible element under `pointer`.
    pub fn element_at(&self, pointer: Point) -> Option<&LayoutElement> {
        layout::hit_test(&self.visible(), pointer)
    }
}
