use super::bodies::Body;
use super::bodies::state::{x_index, vx_index, y_index, vy_index, state_length};
use super::constants::{G, N_COMPONENTS_PER_BODY};
use super::integrator::{OdeSystem, IntegrationError};

/// Newtonian point-mass gravity for a fixed list of bodies.
///
/// Masses and body order are captured at construction time, the positions
/// and velocities come from the state vector passed to `derivatives`.
#[derive(Debug, Clone, PartialEq)]
pub struct GravityField {
    masses: Vec<f64>,
}

impl GravityField {
    pub fn new(bodies: &[Body]) -> GravityField {
        GravityField {
            masses: bodies.iter().map(|body| body.mass).collect(),
        }
    }

    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    pub fn n_bodies(&self) -> usize {
        self.masses.len()
    }

    /// First pair of bodies (`i < j`) sharing exactly the same position.
    pub fn coincident_pair(&self, state: &[f64]) -> Option<(usize, usize)> {
        let n_bodies = self.n_bodies().min(state.len()/N_COMPONENTS_PER_BODY);
        for i in 0..n_bodies {
            for j in i+1..n_bodies {
                if state[x_index(i)] == state[x_index(j)] && state[y_index(i)] == state[y_index(j)] {
                    return Some((i, j));
                }
            }
        }
        None
    }
}

impl OdeSystem for GravityField {
    fn dimension(&self) -> usize {
        state_length(self.n_bodies())
    }

    fn derivatives(&self, _t: f64, state: &[f64], derivatives: &mut [f64]) {
        let n_bodies = self.n_bodies();
        for i in 0..n_bodies {
            derivatives[x_index(i)] = state[vx_index(i)];
            derivatives[y_index(i)] = state[vy_index(i)];
            derivatives[vx_index(i)] = 0.;
            derivatives[vy_index(i)] = 0.;
        }

        // Each pair is visited once, the force on j is the opposite of the force on i
        for i in 0..n_bodies {
            let (x_i, y_i) = (state[x_index(i)], state[y_index(i)]);
            for j in i+1..n_bodies {
                let dx = x_i - state[x_index(j)];
                let dy = y_i - state[y_index(j)];
                let r2 = dx*dx + dy*dy;
                let r = r2.sqrt();
                let prefac = G/(r2*r);
                let prefac_mass_i = prefac*self.masses[i];
                let prefac_mass_j = prefac*self.masses[j];
                derivatives[vx_index(i)] -= prefac_mass_j*dx;
                derivatives[vy_index(i)] -= prefac_mass_j*dy;
                derivatives[vx_index(j)] += prefac_mass_i*dx;
                derivatives[vy_index(j)] += prefac_mass_i*dy;
            }
        }
    }

    fn non_finite_error(&self, t: f64, state: &[f64]) -> IntegrationError {
        match self.coincident_pair(state) {
            Some((first, second)) => IntegrationError::SingularGeometry { time: t, first: first, second: second },
            None => IntegrationError::NonFiniteDerivative { time: t },
        }
    }
}
