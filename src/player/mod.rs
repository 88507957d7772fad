//! Player module: ship state, keyboard input, movement, and the ship glyph.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | Bevy resources: `Ship` and the per-frame `ThrustInput` snapshot |
//! | [`control`] | Input systems and the per-frame integration step (accelerate, friction, clamp, move) |
//! | [`rendering`] | Ship outline and engine trail drawn through `DrawSurface` |
//!
//! All public items are re-exported at this level so that the rest of the crate
//! can use flat `crate::player::*` imports without knowing the sub-module layout.

pub mod control;
pub mod rendering;
pub mod state;

// ── Flat re-exports ───────────────────────────────────────────────────────────

pub use control::{keyboard_to_thrust_system, ship_motion_system, step_ship};
pub use rendering::{draw_ship, engine_trail, ship_outline};
pub use state::{Ship, ThrustInput};
