//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, owned by `GameState`
//! - Every rate scaled by the caller's time scale
//! - Stable iteration order (hazards and keys in placement order)
//! - No rendering, audio or storage; those go through `GameHost`

pub mod geometry;
pub mod grid;
pub mod hazards;
pub mod host;
pub mod level;
pub mod ship;
pub mod state;
pub mod surface;
pub mod tick;
pub mod viewport;

pub use geometry::{LineSegment, Rect};
pub use grid::{GridPos, ObjectGrid};
pub use hazards::{Frame, Hazard};
pub use host::{GameHost, NullHost, RecordingHost, SoundEffect};
pub use level::{new_game, start_level};
pub use ship::Ship;
pub use state::{GamePhase, GameState};
pub use surface::{LandingPad, Surface, SurfaceContact};
pub use tick::{Action, TickInput, tick};
pub use viewport::Viewport;
