//! Month calendar widget for `ratatui-almanac`.
//!
//! The widget is split the way the rest of the library is split: [`compose`]
//! derives plain per-cell/per-row state records from dates alone (no styles,
//! no buffers, fully unit-testable), and [`view`] folds those records into a
//! `ratatui` buffer, with cell painting overridable through a callback.
pub mod bindings;
pub mod compose;
pub mod view;
