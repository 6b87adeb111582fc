use tracing::trace;

use crate::foundation::core::Size;

/// Size observer for the chart container.
///
/// Only reports sizes that are measurable and different from the last reported one.
#[derive(Debug, Default)]
pub struct ViewportController {
    last: Option<Size>,
}

impl ViewportController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed an observed container size; returns it when it is a new renderable size.
    pub fn observe(&mut self, size: Size) -> Option<Size> {
        if !size.is_measured() {
            trace!(width = size.width, height = size.height, "unmeasured size ignored");
            return None;
        }
        if self.last == Some(size) {
            return None;
        }
        self.last = Some(size);
        Some(size)
    }

    /// Last size that was reported.
    pub fn current(&self) -> Option<Size> {
        self.last
    }
}

#[cfg(test)]
#[path = "../tests/unit/viewport.rs"]
mod tests;
