//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one unit of time per tick)
//! - Stable iteration order (storage order of bodies)
//! - No rendering, timing, or platform dependencies

pub mod boundary;
pub mod collision;
pub mod segment;
pub mod state;
pub mod tick;
pub mod vector;

pub use boundary::{Boundary, Edge, edges_of, square_vertices};
pub use collision::{
    Contact, NearestEdge, nearest_edge, reflect_velocity, rescale_to_speed, resolve,
    resolve_contact,
};
pub use segment::closest_point;
pub use state::{Body, BodyView, Color, SimulationState};
pub use tick::{step_body, tick};
