#![allow(dead_code)]
extern crate assert_approx_eq;

use self::assert_approx_eq::assert_approx_eq;
use orbits::{Body, Trajectory};
use orbits::constants::{G, TWO_PI};
use orbits::tools::circular_orbit_speeds;

/// Two equal masses on a circular orbit around the origin, separated along the x axis.
pub fn circular_pair(mass: f64, separation: f64) -> Vec<Body> {
    let (speed_a, speed_b) = circular_orbit_speeds(mass, mass, separation);
    vec![
        Body::new("a", mass, -0.5*separation, 0., 0., -speed_a),
        Body::new("b", mass, 0.5*separation, 0., 0., speed_b),
    ]
}

pub fn orbital_period(total_mass: f64, separation: f64) -> f64 {
    TWO_PI*(separation.powi(3)/(G*total_mass)).sqrt()
}

pub fn separation(trajectory: &Trajectory, sample: usize, first: usize, second: usize) -> f64 {
    let (x_a, y_a) = trajectory.position(sample, first);
    let (x_b, y_b) = trajectory.position(sample, second);
    ((x_b - x_a).powi(2) + (y_b - y_a).powi(2)).sqrt()
}

pub fn masses(bodies: &[Body]) -> Vec<f64> {
    bodies.iter().map(|body| body.mass).collect()
}

pub fn assert_position(trajectory: &Trajectory, sample: usize, body: usize, expected: (f64, f64), precision: f64) {
    let (x, y) = trajectory.position(sample, body);
    assert_approx_eq!(x, expected.0, precision);
    assert_approx_eq!(y, expected.1, precision);
}

/// Acceleration of every body computed with the straightforward double loop.
pub fn naive_accelerations(bodies: &[Body]) -> Vec<(f64, f64)> {
    let mut accelerations = vec![(0., 0.); bodies.len()];
    for (i, body) in bodies.iter().enumerate() {
        for (j, other) in bodies.iter().enumerate() {
            if i == j {
                continue;
            }
            let dx = body.x - other.x;
            let dy = body.y - other.y;
            let r3 = (dx*dx + dy*dy).powf(1.5);
            accelerations[i].0 -= G*other.mass*dx/r3;
            accelerations[i].1 -= G*other.mass*dy/r3;
        }
    }
    accelerations
}

pub fn scattered_bodies() -> Vec<Body> {
    vec![
        Body::new("alpha", 2.5, 0.3, -1.2, 0.1, 0.4),
        Body::new("beta", 0.7, -1.1, 0.8, -0.2, 0.),
        Body::new("gamma", 1.3, 2.0, 0.5, 0., -0.3),
        Body::new("delta", 0.01, -0.4, -2.2, 0.5, 0.1),
        Body::new("epsilon", 4.2, 1.5, 2.5, -0.1, -0.1),
    ]
}

pub fn temporary_path(filename: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("orbits-{}-{}", std::process::id(), filename))
}
