//! Display abstraction and board renderer for Trainboard
//!
//! This crate provides:
//! - `DisplaySurface` trait: the pixel primitives the renderer needs from a
//!   panel driver (clear, rectangles, lines, text, optional glyph metrics)
//! - Column layout constants and the text-fitting helper
//! - `render_board`, which paints a departure window onto any surface
//!
//! # Architecture
//!
//! The renderer never talks to hardware. Panel drivers implement
//! `DisplaySurface` with their device-specific code; the renderer issues
//! explicit drawing calls with colors passed as parameters, so no pen or
//! font state lives on the surface. A recording mock surface makes the
//! whole crate testable on the host.

#![no_std]
#![deny(unsafe_code)]

pub mod board;
pub mod layout;
pub mod mock;
pub mod surface;

pub use board::{render_board, render_splash};
pub use layout::{fit_text, Column, CANVAS_H, CANVAS_W, COLUMNS};
pub use surface::{DisplaySurface, Rgb, BOARD_BG, BOARD_FG};
