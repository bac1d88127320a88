//! Flat state vector shared by the gravity field and the integrator.
//!
//! For `n` bodies the vector holds `4*n` values, one block per body in the
//! order of the body list:
//!
//! ```text
//! [x_0, vx_0, y_0, vy_0, x_1, vx_1, y_1, vy_1, ...]
//! ```
use super::Body;
use super::super::constants::N_COMPONENTS_PER_BODY;
use super::super::integrator::IntegrationError;

#[inline]
pub fn x_index(body: usize) -> usize {
    N_COMPONENTS_PER_BODY*body
}

#[inline]
pub fn vx_index(body: usize) -> usize {
    N_COMPONENTS_PER_BODY*body + 1
}

#[inline]
pub fn y_index(body: usize) -> usize {
    N_COMPONENTS_PER_BODY*body + 2
}

#[inline]
pub fn vy_index(body: usize) -> usize {
    N_COMPONENTS_PER_BODY*body + 3
}

pub fn state_length(n_bodies: usize) -> usize {
    N_COMPONENTS_PER_BODY*n_bodies
}

/// Initial conditions to be passed to the integrator: `(x, vx, y, vy)` of every body in list order.
pub fn initial_state(bodies: &[Body]) -> Vec<f64> {
    let mut state = Vec::with_capacity(state_length(bodies.len()));
    for body in bodies.iter() {
        state.extend_from_slice(&[body.x, body.vx, body.y, body.vy]);
    }
    state
}

/// Rebuild the bodies (names and masses from `bodies`) at the positions/velocities stored in `state`.
pub fn unpack(bodies: &[Body], state: &[f64]) -> Result<Vec<Body>, IntegrationError> {
    check_length(bodies.len(), state)?;
    let unpacked = bodies.iter().zip(state.chunks_exact(N_COMPONENTS_PER_BODY))
        .map(|(body, block)| Body::new(&body.name, body.mass, block[0], block[2], block[1], block[3]))
        .collect();
    Ok(unpacked)
}

pub fn check_length(n_bodies: usize, state: &[f64]) -> Result<(), IntegrationError> {
    let expected = state_length(n_bodies);
    if state.len() != expected {
        return Err(IntegrationError::MalformedState { expected: expected, found: state.len() });
    }
    Ok(())
}
