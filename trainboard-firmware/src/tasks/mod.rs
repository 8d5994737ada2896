//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod clock;
pub mod render;

pub use clock::clock_task;
pub use render::render_task;
