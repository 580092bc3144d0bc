//! The drag-and-drop reducer.
//!
//! [`drag_end`] interprets a completed drag against the current
//! [`DesignerState`] and performs exactly one of: append a new element,
//! insert a new element before/after a target, move an existing element
//! before/after a target, or append an existing element. A drag that
//! ends outside any drop target is ignored.
//!
//! Moves are remove-then-reinsert: the insertion index is computed from
//! the pre-removal positions and clamped into the post-removal list.
//! A referenced element id that is not on the canvas fails fast with
//! `NotFound` and leaves the state unchanged.

use formsmith_core::error::{FormsmithError, FormsmithResult};
use formsmith_core::ids;
use formsmith_fields::element::ElementType;
use formsmith_fields::registry::construct;

use crate::state::DesignerState;

/// What is being dragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    /// A sidebar palette button for a new element.
    PaletteButton {
        /// The type of element the button creates.
        element_type: ElementType,
    },
    /// An element already placed on the canvas.
    CanvasElement {
        /// The id of the dragged element.
        element_id: String,
    },
}

/// Where the drag ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// The open canvas drop area.
    Canvas,
    /// The top half of an existing element.
    TopHalf {
        /// The id of the element whose top half was hit.
        element_id: String,
    },
    /// The bottom half of an existing element.
    BottomHalf {
        /// The id of the element whose bottom half was hit.
        element_id: String,
    },
}

/// A completed drag. `target` is `None` when the drag ended outside any
/// drop target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEndEvent {
    /// What was dragged.
    pub source: DragSource,
    /// Where it was dropped, if anywhere.
    pub target: Option<DropTarget>,
}

impl DragEndEvent {
    /// Creates a drag-end event with a drop target.
    pub fn new(source: DragSource, target: DropTarget) -> Self {
        Self {
            source,
            target: Some(target),
        }
    }

    /// Creates a drag-end event that ended outside any drop target.
    pub fn cancelled(source: DragSource) -> Self {
        Self {
            source,
            target: None,
        }
    }
}

/// The result of applying a drag-end event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// A new element was constructed and inserted.
    Inserted {
        /// The id of the new element.
        id: String,
        /// The index it was inserted at.
        index: usize,
    },
    /// An existing element was moved.
    Moved {
        /// The id of the moved element.
        id: String,
        /// The index it ended up at.
        index: usize,
    },
    /// The drag did not change the canvas.
    Ignored,
}

/// A source of fresh element ids.
///
/// The reducer asks the id source for an id whenever a palette drop
/// constructs a new element. Production code uses [`RandomIds`]; tests
/// substitute a deterministic source.
pub trait IdSource {
    /// Returns a fresh element id.
    fn next_id(&mut self) -> String;
}

/// The default id source: short random hex ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&mut self) -> String {
        ids::element_id()
    }
}

/// Applies a drag-end event to the designer state.
///
/// # Errors
///
/// Returns `NotFound` if the event references an element id that is not
/// on the canvas. The state is left unchanged in that case.
pub fn drag_end(
    state: &mut DesignerState,
    event: DragEndEvent,
    id_source: &mut impl IdSource,
) -> FormsmithResult<DropOutcome> {
    let Some(target) = event.target else {
        return Ok(DropOutcome::Ignored);
    };

    match (event.source, target) {
        // Palette button onto the open canvas: append a new element.
        (DragSource::PaletteButton { element_type }, DropTarget::Canvas) => {
            let instance = construct(element_type, id_source.next_id());
            let id = instance.id.clone();
            let index = state.len();
            state.add_element(index, instance);
            Ok(DropOutcome::Inserted { id, index })
        }

        // Palette button onto an element half: insert at the target's
        // index (top) or just after it (bottom).
        (DragSource::PaletteButton { element_type }, DropTarget::TopHalf { element_id }) => {
            insert_new(state, element_type, &element_id, 0, id_source)
        }
        (DragSource::PaletteButton { element_type }, DropTarget::BottomHalf { element_id }) => {
            insert_new(state, element_type, &element_id, 1, id_source)
        }

        // Canvas element onto another element half: remove, then insert
        // at the index computed from the pre-removal positions.
        (DragSource::CanvasElement { element_id }, DropTarget::TopHalf { element_id: over }) => {
            move_existing(state, &element_id, &over, 0)
        }
        (DragSource::CanvasElement { element_id }, DropTarget::BottomHalf { element_id: over }) => {
            move_existing(state, &element_id, &over, 1)
        }

        // Canvas element onto the open canvas: move it to the end.
        (DragSource::CanvasElement { element_id }, DropTarget::Canvas) => {
            let instance = state
                .remove_element(&element_id)
                .ok_or_else(|| FormsmithError::NotFound(format!("element {element_id}")))?;
            let index = state.len();
            state.add_element(index, instance);
            Ok(DropOutcome::Moved {
                id: element_id,
                index,
            })
        }
    }
}

/// Inserts a newly constructed element relative to the target element.
fn insert_new(
    state: &mut DesignerState,
    element_type: ElementType,
    over_id: &str,
    offset: usize,
    id_source: &mut impl IdSource,
) -> FormsmithResult<DropOutcome> {
    let over_index = state
        .element_index(over_id)
        .ok_or_else(|| FormsmithError::NotFound(format!("element {over_id}")))?;
    let instance = construct(element_type, id_source.next_id());
    let id = instance.id.clone();
    let index = over_index + offset;
    state.add_element(index, instance);
    Ok(DropOutcome::Inserted { id, index })
}

/// Moves an existing element relative to the target element.
///
/// The target index is read before the removal and clamped into the
/// post-removal list, so dragging an element onto its immediate
/// successor lands it after that successor.
fn move_existing(
    state: &mut DesignerState,
    active_id: &str,
    over_id: &str,
    offset: usize,
) -> FormsmithResult<DropOutcome> {
    let over_index = state
        .element_index(over_id)
        .ok_or_else(|| FormsmithError::NotFound(format!("element {over_id}")))?;
    let instance = state
        .remove_element(active_id)
        .ok_or_else(|| FormsmithError::NotFound(format!("element {active_id}")))?;
    let index = (over_index + offset).min(state.len());
    state.add_element(index, instance);
    Ok(DropOutcome::Moved {
        id: active_id.to_string(),
        index,
    })
}
