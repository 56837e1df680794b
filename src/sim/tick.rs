//! Fixed timestep simulation tick
//!
//! One tick rotates the boundary, freezes its edges, then resolves and
//! integrates every body against that snapshot. Bodies never see each other.

use super::boundary::Edge;
use super::collision::resolve_contact;
use super::state::{Body, SimulationState};

/// Resolve one body against the edges, then move it one time unit
///
/// Returns whether a contact was resolved.
pub fn step_body(body: &mut Body, edges: &[Edge]) -> bool {
    let contact = resolve_contact(body, edges);
    if let Some(contact) = &contact {
        log::trace!(
            "contact edge={} dist={:.3} push={:.3} v={:?} -> {:?}",
            contact.edge_index,
            contact.distance,
            contact.push_out,
            contact.velocity_before,
            contact.velocity_after
        );
    }

    // Explicit Euler, dt = 1 tick
    body.position += body.velocity;

    contact.is_some()
}

/// Advance the simulation state by one tick
///
/// Returns the number of bodies that had a contact resolved.
pub fn tick(state: &mut SimulationState) -> usize {
    state.tick_count += 1;
    state.boundary.rotate();

    let edges = state.boundary.edges();

    let mut contacts = 0;
    for body in &mut state.bodies {
        if step_body(body, &edges) {
            contacts += 1;
        }
    }

    contacts
}
