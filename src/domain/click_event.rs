//! Click event model for asynchronous click counting.

/// A resolution of a short ID, queued for the background click worker.
///
/// Resolution only enqueues the event; the counter update happens in
/// [`crate::domain::click_worker::run_click_worker`], off the request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub short_id: String,
}

impl ClickEvent {
    /// Creates a new click event for `short_id`.
    pub fn new(short_id: impl Into<String>) -> Self {
        Self {
            short_id: short_id.into(),
        }
    }
}
