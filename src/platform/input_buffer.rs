//=========================================================================
// Input Buffer
//
// Collects converted input events between two redraws, split into
// discrete and continuous categories. Acts as a transient event
// aggregator between the Platform and the logic thread.
//
// Responsibilities:
// - Store incoming platform events per frame
// - Deduplicate repeated consecutive discrete inputs (e.g., key repeat)
// - Coalesce continuous inputs (only the latest MouseMoved / Resized)
// - Hand both lists over via `drain()`
//
// Notes:
// The buffer is reset every time it is drained and keeps its capacity
// across frames.
//=========================================================================

//=== Standard Library Imports ============================================
use std::mem::discriminant;

//=== Internal Modules ====================================================
use crate::core::input::InputEvent;

//=== InputBuffer Struct ==================================================
//
// Internally maintains:
// - `discrete`: one-shot inputs in arrival order (e.g., KeyDown)
// - `continuous`: last-known event of each continuous kind
//
pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: Vec<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    //
    // Preallocates so typical frames never reallocate.
    //
    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 128;
        const CONTINUOUS_BASE: usize = 4;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: Vec::with_capacity(CONTINUOUS_BASE),
        }
    }

    //--- Continuous Event Handling ---------------------------------------
    //
    // The latest event always replaces any previous one of the same kind.
    //
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        let kind = discriminant(&event);
        match self.continuous.iter().position(|e| discriminant(e) == kind) {
            Some(index) => self.continuous[index] = event,
            None => self.continuous.push(event),
        }
    }

    //--- Discrete Event Handling -----------------------------------------
    //
    // Duplicate consecutive events are ignored to prevent flooding.
    //
    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns `(discrete, continuous)` and clears the buffer, or `None`
    // when nothing was collected.
    //
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }

        let discrete = self.discrete.drain(..).collect();
        let continuous = self.continuous.drain(..).collect();
        Some((discrete, continuous))
    }

    //--- Utilities --------------------------------------------------------
    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
