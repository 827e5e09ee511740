//! Calendar widgets and notification toasts for `ratatui`.
//!
//! This is the facade crate: it re-exports `ratatui-almanac-core` and pulls
//! in the component crates behind cargo features.
//!
//! - `calendar`: [`calendar::view::CalendarView`] plus the pure month
//!   composition in [`calendar::compose`].
//! - `toast`: the [`toast::lifecycle::ToastStack`] state machine and
//!   [`toast::view::ToastStackView`].
//! - `crossterm`: conversion from `crossterm` events into this library's
//!   input model.
//!
//! The widgets are event-loop agnostic and read no ambient time; see the
//! crate examples for the intended app-loop shape.
pub use ratatui_almanac_core::clock;
pub use ratatui_almanac_core::date;
pub use ratatui_almanac_core::grid;
pub use ratatui_almanac_core::input;
pub use ratatui_almanac_core::keymap;
pub use ratatui_almanac_core::render;
pub use ratatui_almanac_core::theme;

#[cfg(feature = "crossterm")]
pub use ratatui_almanac_core::crossterm_input;

#[cfg(feature = "calendar")]
pub use ratatui_almanac_calendar as calendar;

#[cfg(feature = "toast")]
pub use ratatui_almanac_toast as toast;
