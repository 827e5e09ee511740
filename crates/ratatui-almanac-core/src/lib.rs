//! `ratatui-almanac-core` provides the date-handling building blocks for the
//! `ratatui-almanac` widgets.
//!
//! This crate is designed for **widget library authors** and apps that want
//! fine-grained control. The widgets themselves (calendar, toast stack) live in
//! separate feature-gated crates.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input + rendering from your app.
//! - No async runtime: all components run on the main thread.
//! - No ambient time reads: "today" and "now" are data you pass in, or come
//!   from an explicit [`clock::Clock`] you choose.
//!
//! ## Getting started
//!
//! Most users should depend on the facade crate `ratatui-almanac`. Use this
//! crate directly if you only need the date primitives.
//!
//! Useful entry points:
//! - [`date`]: pure calendar-date functions (rolling construction, deltas,
//!   pattern formatting).
//! - [`grid::MonthGrid`]: the fixed 6×7 month grid behind every calendar view.
//! - [`clock::Clock`]: injectable time source for deterministic tests.
pub mod theme;

pub mod clock;
pub mod date;
pub mod grid;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod input;
pub mod keymap;
pub mod render;
