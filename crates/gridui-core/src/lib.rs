//! **gridui-core** — grid-based terminal game framework (core types).
//!
//! Foundational types shared across the *gridui* crates: geometry
//! primitives, styled cells, a shared-buffer grid with frame diffing,
//! input events (including a fixed-rate tick), and the Elm-architecture
//! application loop.

pub mod app;
pub mod cell;
pub mod geom;
pub mod grid;
pub mod messages;
pub mod style;

pub use app::{App, AppConfig, Context, Driver, Effect, Model};
pub use cell::Cell;
pub use geom::{Point, Range};
pub use grid::{Frame, FrameCell, Grid, compute_frame};
pub use messages::{Key, ModMask, Msg, MouseAction};
pub use style::{AttrMask, Color, Style};
