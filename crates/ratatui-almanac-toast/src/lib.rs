//! Notification toasts for `ratatui-almanac`.
//!
//! [`lifecycle`] is the pure state machine: each toast walks
//! `Created → Visible → Closing → Closed` under guarded transitions, driven
//! by `tick(now)` and by the presentation layer's exit signal. [`view`]
//! paints the live toasts of a [`lifecycle::ToastStack`] into a buffer.
pub mod lifecycle;
pub mod view;
