//! Designer state: the ordered element list and the current selection.
//!
//! All mutations happen synchronously in response to one designer event
//! at a time; there is no interior mutability and no locking. Array
//! position is render order.

use formsmith_core::error::{FormsmithError, FormsmithResult};
use formsmith_fields::element::FormElementInstance;

/// The in-memory state of the designer canvas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesignerState {
    elements: Vec<FormElementInstance>,
    selected: Option<String>,
}

impl DesignerState {
    /// Creates an empty designer state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole element list, clearing the selection.
    ///
    /// Used when opening a saved form in the builder.
    pub fn load(&mut self, elements: Vec<FormElementInstance>) {
        self.elements = elements;
        self.selected = None;
    }

    /// Returns the placed elements in render order.
    pub fn elements(&self) -> &[FormElementInstance] {
        &self.elements
    }

    /// Consumes the state, returning the element list.
    pub fn into_elements(self) -> Vec<FormElementInstance> {
        self.elements
    }

    /// Returns the number of placed elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the canvas is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the index of the element with the given id, if present.
    pub fn element_index(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    /// Inserts an element at the given index.
    ///
    /// The index is clamped to the current length, so any index at or
    /// past the end appends.
    pub fn add_element(&mut self, index: usize, instance: FormElementInstance) {
        let index = index.min(self.elements.len());
        self.elements.insert(index, instance);
    }

    /// Removes the element with the given id, returning it.
    ///
    /// Clears the selection if it pointed at the removed element.
    /// Returns `None` if no element has that id.
    pub fn remove_element(&mut self, id: &str) -> Option<FormElementInstance> {
        let index = self.element_index(id)?;
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        Some(self.elements.remove(index))
    }

    /// Replaces the element with the given id in place.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no element has that id.
    pub fn update_element(
        &mut self,
        id: &str,
        instance: FormElementInstance,
    ) -> FormsmithResult<()> {
        let index = self
            .element_index(id)
            .ok_or_else(|| FormsmithError::NotFound(format!("element {id}")))?;
        self.elements[index] = instance;
        Ok(())
    }

    /// Selects the element with the given id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no element has that id.
    pub fn select(&mut self, id: &str) -> FormsmithResult<()> {
        if self.element_index(id).is_none() {
            return Err(FormsmithError::NotFound(format!("element {id}")));
        }
        self.selected = Some(id.to_string());
        Ok(())
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Returns the id of the selected element, if any.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}
