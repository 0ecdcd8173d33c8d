//! Drag state and handle geometry, independent of any document.

/// Tracks one handle through `down -> move* -> up` cycles.
///
/// `handle_x` is the handle's offset from the container's left edge and is
/// always within `[0, container width]`. `offset_x` is where inside the
/// handle the pointer went down; it is non-zero only while a drag started
/// by [`DragTracker::begin`] is in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragTracker {
    handle_x: f32,
    dragging: bool,
    offset_x: f32,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_x(&self) -> f32 {
        self.handle_x
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn offset_x(&self) -> f32 {
        self.offset_x
    }

    /// Clamp `x` to `[0, max]`. NaN and negative zero become `0.0`.
    pub fn clamp_handle_x(x: f32, max: f32) -> f32 {
        let max = if max > 0.0 { max } else { 0.0 };
        if x.is_nan() || x <= 0.0 {
            0.0
        } else if x >= max {
            max
        } else {
            x
        }
    }

    /// Store `x` clamped to `[0, max]` and return the stored value.
    pub fn set_handle_x(&mut self, x: f32, max: f32) -> f32 {
        self.handle_x = Self::clamp_handle_x(x, max);
        self.handle_x
    }

    pub fn set_dragging(&mut self, dragging: bool) -> bool {
        self.dragging = dragging;
        self.dragging
    }

    /// Start a drag grabbed `offset_x` pixels into the handle.
    ///
    /// A second `begin` while already dragging is ignored and zeroes the
    /// offset. Returns whether a new drag started.
    pub fn begin(&mut self, offset_x: f32) -> bool {
        if self.dragging {
            self.offset_x = 0.0;
            return false;
        }
        self.offset_x = offset_x;
        self.dragging = true;
        true
    }

    /// Finish the current drag. Returns whether one was in progress.
    pub fn end(&mut self) -> bool {
        let was_dragging = self.dragging;
        self.dragging = false;
        self.offset_x = 0.0;
        was_dragging
    }

    /// Handle position for a pointer at `page_x`, before clamping.
    pub fn pointer_to_handle_x(&self, page_x: f32, container_left: f32) -> f32 {
        page_x - container_left - self.offset_x
    }

    /// Flex basis left for the element after the handle.
    pub fn target_basis(&self, container_width: f32, handle_width: f32) -> f32 {
        (container_width - self.handle_x - handle_width).max(0.0)
    }
}
