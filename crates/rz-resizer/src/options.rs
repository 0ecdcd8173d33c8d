use std::borrow::Cow;

/// Default handle thickness in pixels.
pub const DEFAULT_HANDLE_WIDTH: f32 = 8.0;

/// Default CSS class of the handle element.
pub const DEFAULT_HANDLE_CLASS: &str = "rz-handle";

/// Configuration for a [`Resizer`](crate::Resizer).
#[derive(Debug, Clone, PartialEq)]
pub struct ResizerOptions {
    /// Handle (and ghost) thickness in pixels.
    pub width: f32,
    /// CSS class given to the handle; also stored in `data-rz-handle`.
    pub handle_class: Cow<'static, str>,
}

impl ResizerOptions {
    pub const DEFAULT: ResizerOptions = ResizerOptions {
        width: DEFAULT_HANDLE_WIDTH,
        handle_class: Cow::Borrowed(DEFAULT_HANDLE_CLASS),
    };

    pub fn new() -> Self {
        Self::DEFAULT
    }

    /// Set the handle thickness. Negative values become zero.
    pub fn width(mut self, width: f32) -> Self {
        self.width = width.max(0.0);
        self
    }

    pub fn handle_class(mut self, class: impl Into<Cow<'static, str>>) -> Self {
        self.handle_class = class.into();
        self
    }
}

impl Default for ResizerOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}
