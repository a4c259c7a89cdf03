//! Grid storage for per-plane occupancy.
//!
//! Uses Structure-of-Arrays (SoA) layout. Cell data is stored in separate
//! arrays for each field so occupancy scans and morphology passes only touch
//! the bytes they need.
//!
//! ## Memory Layout
//!
//! ```text
//! Traditional AoS:  [Cell₀] [Cell₁] [Cell₂] [Cell₃] ...
//!                    ↓       ↓       ↓       ↓
//!                   SNSNSNSN  (interleaved)
//!
//! Our SoA Layout:   States:   [S S S S S S S S S S S S|...]
//!                   Support:  [N N N N N N N N N N N N|...]
//! ```
//!
//! ## Key Types
//!
//! - [`GridPlane`]: storage with plane/cell coordinate conversion and
//!   occupancy queries
//! - [`CellState`]: `Free` / `Occupied`
//! - [`CellIndex`]: `(row, col)` address
//! - [`CellCounts`]: statistics per state

mod core;
mod types;

pub use self::core::GridPlane;
pub use types::{CellCounts, CellIndex, CellState};
