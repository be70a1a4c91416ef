//! Navigation logic.
//!
//! [`render`] turns entries into rows, [`filter`] decides which rows are
//! visible, [`state::NavigationState`] holds one panel's cursor, expansions
//! and filter, [`controller::Controller`] dispatches commands against it, and
//! [`registry`] keeps the single active panel.

pub mod controller;
pub mod filter;
pub mod registry;
pub mod render;
pub mod state;
