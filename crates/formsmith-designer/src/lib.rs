//! # formsmith-designer
//!
//! The designer canvas for the formsmith form builder: the in-memory
//! element list plus selection, and the drag-and-drop reducer that
//! interprets completed drags against it.
//!
//! ## Modules
//!
//! - [`state`] - [`DesignerState`]: placed elements and selection
//! - [`dnd`] - Drag events, drop outcomes, and the [`drag_end`] reducer

pub mod dnd;
pub mod state;

pub use dnd::{drag_end, DragEndEvent, DragSource, DropOutcome, DropTarget, IdSource, RandomIds};
pub use state::DesignerState;
