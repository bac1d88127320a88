use time::{OffsetDateTime, format_description};
use super::constants::{G, LOG_TIMESTAMP_FORMAT};
use super::bodies::Body;
use super::bodies::state::{x_index, vx_index, y_index, vy_index};

/// UTC time used to prefix log lines (e.g. `[INFO 2024.01.31 12:00:00 UTC]`).
pub fn timestamp() -> String {
    let now = OffsetDateTime::now_utc();
    match format_description::parse(LOG_TIMESTAMP_FORMAT) {
        Ok(format) => now.format(&format).unwrap_or_else(|_| now.unix_timestamp().to_string()),
        Err(_) => now.unix_timestamp().to_string(),
    }
}

pub fn compute_total_energy(masses: &[f64], state: &[f64]) -> f64 {
    let mut e_kin = 0.;
    let mut e_pot = 0.;

    // Kinetic energy
    for (i, mass) in masses.iter().enumerate() {
        e_kin += 0.5 * mass * (state[vx_index(i)].powi(2) + state[vy_index(i)].powi(2));
    }
    // Gravitational potential energy
    for (i, mass_a) in masses.iter().enumerate() {
        for (j, mass_b) in masses.iter().enumerate().skip(i+1) {
            let dx = state[x_index(i)] - state[x_index(j)];
            let dy = state[y_index(i)] - state[y_index(j)];
            e_pot -= G*mass_a*mass_b/(dx.powi(2) + dy.powi(2)).sqrt();
        }
    }

    e_kin + e_pot
}

pub fn compute_total_momentum(masses: &[f64], state: &[f64]) -> (f64, f64) {
    let mut momentum = (0., 0.);
    for (i, mass) in masses.iter().enumerate() {
        momentum.0 += mass*state[vx_index(i)];
        momentum.1 += mass*state[vy_index(i)];
    }
    momentum
}

/// Only the z component exists for a planar system.
pub fn compute_total_angular_momentum(masses: &[f64], state: &[f64]) -> f64 {
    let mut angular_momentum = 0.;
    for (i, mass) in masses.iter().enumerate() {
        angular_momentum += mass*(state[x_index(i)]*state[vy_index(i)] - state[y_index(i)]*state[vx_index(i)]);
    }
    angular_momentum
}

/// Position and velocity of the center of mass.
pub fn calculate_center_of_mass(bodies: &[Body]) -> ((f64, f64), (f64, f64)) {
    let mut center_of_mass_position = (0., 0.);
    let mut center_of_mass_velocity = (0., 0.);
    let mut center_of_mass_mass = 0.;

    for body in bodies.iter() {
        center_of_mass_position.0 += body.x*body.mass;
        center_of_mass_position.1 += body.y*body.mass;
        center_of_mass_velocity.0 += body.vx*body.mass;
        center_of_mass_velocity.1 += body.vy*body.mass;
        center_of_mass_mass += body.mass;
    }
    if center_of_mass_mass > 0. {
        center_of_mass_position.0 /= center_of_mass_mass;
        center_of_mass_position.1 /= center_of_mass_mass;
        center_of_mass_velocity.0 /= center_of_mass_mass;
        center_of_mass_velocity.1 /= center_of_mass_mass;
    }
    (center_of_mass_position, center_of_mass_velocity)
}

/// Shift positions and velocities so that the center of mass is at rest at the origin.
pub fn to_center_of_mass_frame(mut bodies: Vec<Body>) -> Vec<Body> {
    let (center_of_mass_position, center_of_mass_velocity) = calculate_center_of_mass(&bodies);
    for body in bodies.iter_mut() {
        body.x -= center_of_mass_position.0;
        body.y -= center_of_mass_position.1;
        body.vx -= center_of_mass_velocity.0;
        body.vy -= center_of_mass_velocity.1;
    }
    bodies
}

/// Speed of each body of a pair on a circular orbit of radius `separation` around their center of mass.
pub fn circular_orbit_speeds(mass_a: f64, mass_b: f64, separation: f64) -> (f64, f64) {
    let relative_speed = (G*(mass_a + mass_b)/separation).sqrt();
    let total_mass = mass_a + mass_b;
    (relative_speed*mass_b/total_mass, relative_speed*mass_a/total_mass)
}
