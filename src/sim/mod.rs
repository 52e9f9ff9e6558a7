//! Deterministic core
//!
//! All game logic lives here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - Time only enters through `advance(dt)`
//! - No rendering or platform dependencies

pub mod random;
pub mod session;
pub mod spin;
pub mod state;
pub mod wheel;

pub use random::{ease_out_cubic, generate_range, pick_random, shuffle};
pub use session::{Session, SessionEvent};
pub use spin::{
    SpinAnimator, SpinFrame, SpinTrajectory, compute_target_rotation, slice_index_under_pointer,
};
pub use state::{GameSnapshot, GameState, GameStatus};
pub use wheel::{WheelLayout, WheelOrder, WheelSlice, slice_center_angle, slice_index_at};
