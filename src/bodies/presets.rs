//! Ready-to-run configurations in dimensionless units (G = 1).
use super::Body;
use super::super::constants::TWO_PI;
use super::super::tools::{circular_orbit_speeds, to_center_of_mass_frame};

#[derive(Debug, Clone)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub bodies: Vec<Body>,
    pub t_end: f64,
    pub samples: usize,
}

pub fn presets() -> Vec<Preset> {
    vec![two_body_circular(), figure_eight(), two_light_one_massive(), binary_with_planet()]
}

pub fn preset(name: &str) -> Option<Preset> {
    presets().into_iter().find(|preset| preset.name == name)
}

pub fn preset_names() -> Vec<&'static str> {
    presets().iter().map(|preset| preset.name).collect()
}

fn two_body_circular() -> Preset {
    let (mass_a, mass_b, separation) = (1., 1., 1.);
    let (speed_a, speed_b) = circular_orbit_speeds(mass_a, mass_b, separation);
    let orbital_period = TWO_PI*(separation*separation*separation/(mass_a + mass_b)).sqrt();
    Preset {
        name: "two-body-circular",
        description: "Two equal masses on a circular orbit around their center of mass",
        bodies: vec![
            Body::new("a", mass_a, -0.5*separation, 0., 0., -speed_a),
            Body::new("b", mass_b, 0.5*separation, 0., 0., speed_b),
        ],
        t_end: 3.*orbital_period,
        samples: 601,
    }
}

// Chenciner & Montgomery (2000), three equal masses chasing each other on a figure eight
fn figure_eight() -> Preset {
    let period = 6.32591398;
    Preset {
        name: "figure-eight",
        description: "Three equal masses on the figure-eight choreography",
        bodies: vec![
            Body::new("a", 1., 0.97000436, -0.24308753, 0.466203685, 0.43236573),
            Body::new("b", 1., -0.97000436, 0.24308753, 0.466203685, 0.43236573),
            Body::new("c", 1., 0., 0., -0.93240737, -0.86473146),
        ],
        t_end: 2.*period,
        samples: 1001,
    }
}

fn two_light_one_massive() -> Preset {
    let star_mass = 100.;
    let (inner_mass, inner_distance) = (0.01, 1.);
    let (outer_mass, outer_distance) = (0.01, 2.);
    let (_, inner_speed) = circular_orbit_speeds(star_mass, inner_mass, inner_distance);
    let (_, outer_speed) = circular_orbit_speeds(star_mass, outer_mass, outer_distance);
    let outer_period = TWO_PI*(outer_distance*outer_distance*outer_distance/(star_mass + outer_mass)).sqrt();
    Preset {
        name: "two-light-one-massive",
        description: "Two light bodies orbiting a massive one at different distances",
        bodies: to_center_of_mass_frame(vec![
            Body::new("massive", star_mass, 0., 0., 0., 0.),
            Body::new("inner", inner_mass, inner_distance, 0., 0., inner_speed),
            Body::new("outer", outer_mass, -outer_distance, 0., 0., -outer_speed),
        ]),
        t_end: 5.*outer_period,
        samples: 1001,
    }
}

fn binary_with_planet() -> Preset {
    let (star_mass, separation) = (1., 1.);
    let (speed_a, speed_b) = circular_orbit_speeds(star_mass, star_mass, separation);
    let (planet_mass, planet_distance) = (1e-3, 5.);
    let (_, planet_speed) = circular_orbit_speeds(2.*star_mass, planet_mass, planet_distance);
    let planet_period = TWO_PI*(planet_distance*planet_distance*planet_distance/(2.*star_mass + planet_mass)).sqrt();
    Preset {
        name: "binary-with-planet",
        description: "A light body on a wide orbit around a tight equal-mass binary",
        bodies: to_center_of_mass_frame(vec![
            Body::new("star_a", star_mass, -0.5*separation, 0., 0., -speed_a),
            Body::new("star_b", star_mass, 0.5*separation, 0., 0., speed_b),
            Body::new("planet", planet_mass, 0., planet_distance, -planet_speed, 0.),
        ]),
        t_end: 2.*planet_period,
        samples: 2001,
    }
}
