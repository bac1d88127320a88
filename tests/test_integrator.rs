extern crate orbits;
extern crate assert_approx_eq;

mod common;
use assert_approx_eq::assert_approx_eq;
use orbits::{Body, IntegrationError, IntegratorSettings, OutputGrid};
use orbits::bodies::state::initial_state;
use orbits::tools::{compute_total_energy, compute_total_momentum, compute_total_angular_momentum};

#[test]
fn initial_row_is_the_input() {
    let bodies = common::scattered_bodies();
    let trajectory = orbits::integrate(&bodies, 0., 1., 11).unwrap();
    let initial = trajectory.initial().unwrap();
    assert_eq!(initial.time, 0.);
    assert_eq!(initial.state, initial_state(&bodies));
    for (i, body) in bodies.iter().enumerate() {
        assert_eq!(trajectory.position(0, i), (body.x, body.y));
        assert_eq!(trajectory.velocity(0, i), (body.vx, body.vy));
    }
    assert_eq!(trajectory.bodies_at(&bodies, 0).unwrap(), bodies);
}

#[test]
fn two_body_conservation() {
    let bodies = common::circular_pair(1., 1.);
    let masses = common::masses(&bodies);
    let period = common::orbital_period(2., 1.);
    let trajectory = orbits::integrate(&bodies, 0., 3.*period, 301).unwrap();

    let initial = &trajectory.samples()[0].state;
    let initial_energy = compute_total_energy(&masses, initial);
    let initial_momentum = compute_total_momentum(&masses, initial);
    let initial_angular_momentum = compute_total_angular_momentum(&masses, initial);
    for sample in trajectory.samples() {
        let energy = compute_total_energy(&masses, &sample.state);
        let momentum = compute_total_momentum(&masses, &sample.state);
        assert!(((energy - initial_energy)/initial_energy).abs() < 1e-4);
        assert_approx_eq!(momentum.0, initial_momentum.0, 1e-10);
        assert_approx_eq!(momentum.1, initial_momentum.1, 1e-10);
        let angular_momentum = compute_total_angular_momentum(&masses, &sample.state);
        assert!(((angular_momentum - initial_angular_momentum)/initial_angular_momentum).abs() < 1e-4);
    }
}

#[test]
fn single_body_moves_in_a_straight_line() {
    let bodies = vec![Body::new("alone", 3., 1., -2., 0.5, 0.25)];
    let trajectory = orbits::integrate(&bodies, 0., 10., 21).unwrap();
    for (sample, time) in trajectory.times().iter().enumerate() {
        common::assert_position(&trajectory, sample, 0, (1. + 0.5*time, -2. + 0.25*time), 1e-12);
        let (vx, vy) = trajectory.velocity(sample, 0);
        assert_approx_eq!(vx, 0.5, 1e-15);
        assert_approx_eq!(vy, 0.25, 1e-15);
    }
}

#[test]
fn symmetric_pair_stays_symmetric() {
    let bodies = vec![
        Body::new("a", 1., -1., 0.2, 0.1, -0.4),
        Body::new("b", 1., 1., -0.2, -0.1, 0.4),
    ];
    let trajectory = orbits::integrate(&bodies, 0., 20., 201).unwrap();
    for sample in 0..trajectory.len() {
        let (x_a, y_a) = trajectory.position(sample, 0);
        let (x_b, y_b) = trajectory.position(sample, 1);
        assert_approx_eq!(x_a, -x_b, 1e-12);
        assert_approx_eq!(y_a, -y_b, 1e-12);
    }
}

#[test]
fn circular_orbit_closes_after_one_period() {
    let bodies = common::circular_pair(1., 1.);
    let period = common::orbital_period(2., 1.);
    assert_approx_eq!(period, 2.*orbits::constants::PI/2_f64.sqrt(), 1e-15);
    let trajectory = orbits::integrate(&bodies, 0., period, 101).unwrap();

    let last = trajectory.len() - 1;
    assert_approx_eq!(common::separation(&trajectory, last, 0, 1), 1., 1e-5);
    // Relative position back to (1, 0)
    let (x_a, y_a) = trajectory.position(last, 0);
    let (x_b, y_b) = trajectory.position(last, 1);
    assert_approx_eq!((y_b - y_a).atan2(x_b - x_a), 0., 1e-4);
    // Half a period later the bodies have swapped sides
    let (x_a, _) = trajectory.position(50, 0);
    assert_approx_eq!(x_a, 0.5, 1e-4);
    // Separation stays constant along the way
    for sample in 0..trajectory.len() {
        assert_approx_eq!(common::separation(&trajectory, sample, 0, 1), 1., 1e-5);
    }
}

#[test]
fn backward_integration_recovers_initial_conditions() {
    let bodies = common::circular_pair(1., 1.);
    let period = common::orbital_period(2., 1.);
    let settings = IntegratorSettings::with_tolerances(1e-10, 1e-12);
    let forward = orbits::integrate_with(&bodies, 0., 0.7*period, OutputGrid::Samples(2), &settings).unwrap();
    let moved = forward.bodies_at(&bodies, 1).unwrap();
    let backward = orbits::integrate_with(&moved, 0.7*period, 0., OutputGrid::Samples(8), &settings).unwrap();
    assert_eq!(backward.last().unwrap().time, 0.);
    for (i, body) in bodies.iter().enumerate() {
        common::assert_position(&backward, 7, i, (body.x, body.y), 1e-8);
    }
    assert!(backward.times().windows(2).all(|pair| pair[1] < pair[0]));
}

#[test]
fn coincident_bodies_fail() {
    let bodies = vec![
        Body::new("a", 1., 0.5, 0.5, 0., 0.),
        Body::new("b", 1., -1., 0., 0., 1.),
        Body::new("c", 2., 0.5, 0.5, 1., 0.),
    ];
    let expected = IntegrationError::SingularGeometry { time: 0., first: 0, second: 2 };
    assert_eq!(orbits::integrate(&bodies, 0., 1., 10).unwrap_err(), expected);
    // Even when no step is needed
    assert_eq!(orbits::integrate(&bodies, 0., 1., 1).unwrap_err(), expected);
}

#[test]
fn head_on_collision_fails() {
    let bodies = vec![
        Body::new("a", 1., -1., 0., 0., 0.),
        Body::new("b", 1., 1., 0., 0., 0.),
    ];
    // Free fall time is about 2.2
    let result = orbits::integrate(&bodies, 0., 5., 6);
    match result {
        Err(IntegrationError::StepSizeUnderflow { time, .. }) => assert!(time > 2. && time < 2.3),
        Err(IntegrationError::TooManySteps { .. }) | Err(IntegrationError::SingularGeometry { .. }) | Err(IntegrationError::NonFiniteDerivative { .. }) => {},
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn no_bodies() {
    let trajectory = orbits::integrate(&[], 0., 1., 5).unwrap();
    assert_eq!(trajectory.len(), 5);
    assert_eq!(trajectory.n_bodies(), 0);
    assert!(trajectory.samples().iter().all(|sample| sample.state.is_empty()));
}

#[test]
fn sample_counts() {
    let bodies = common::circular_pair(1., 1.);
    assert_eq!(orbits::integrate(&bodies, 0., 1., 0).unwrap_err(), IntegrationError::InvalidSampleCount(0));

    let trajectory = orbits::integrate(&bodies, 0., 1., 1).unwrap();
    assert_eq!(trajectory.times(), vec![0.]);
    assert_eq!(trajectory.stats().n_accepted_steps, 0);

    let trajectory = orbits::integrate(&bodies, 0., 2., 5).unwrap();
    assert_eq!(trajectory.times(), vec![0., 0.5, 1., 1.5, 2.]);
    assert_eq!(trajectory.path(1).len(), 5);
    assert_eq!(trajectory.path(1)[4], trajectory.position(4, 1));
}

#[test]
fn output_grids() {
    assert_eq!(OutputGrid::Step(0.5).times(0., 2.).unwrap(), vec![0., 0.5, 1., 1.5, 2.]);
    let times = OutputGrid::Step(0.3).times(0., 1.).unwrap();
    assert_eq!(times.len(), 4);
    assert_approx_eq!(times[1], 1./3., 1e-15);
    assert_eq!(times[3], 1.);
    assert_eq!(OutputGrid::Step(0.5).times(2., 0.).unwrap(), vec![2., 1.5, 1., 0.5, 0.]);
    assert_eq!(OutputGrid::Step(10.).times(0., 1.).unwrap(), vec![0., 1.]);

    assert_eq!(OutputGrid::Step(0.).times(0., 1.).unwrap_err(), IntegrationError::InvalidStep(0.));
    assert_eq!(OutputGrid::Step(-1.).times(0., 1.).unwrap_err(), IntegrationError::InvalidStep(-1.));
    assert!(matches!(OutputGrid::Samples(3).times(0., f64::INFINITY), Err(IntegrationError::InvalidTimeSpan { .. })));
}

#[test]
fn oversized_output_grids() {
    assert_eq!(OutputGrid::Step(1e-300).times(0., 1.).unwrap_err(), IntegrationError::InvalidStep(1e-300));
    assert_eq!(OutputGrid::Step(1e-12).times(0., 1.).unwrap_err(), IntegrationError::InvalidStep(1e-12));
    assert_eq!(OutputGrid::Step(f64::MIN_POSITIVE).times(-1e300, 1e300).unwrap_err(), IntegrationError::InvalidStep(f64::MIN_POSITIVE));
    assert_eq!(OutputGrid::Samples(usize::MAX).times(0., 1.).unwrap_err(), IntegrationError::InvalidSampleCount(usize::MAX));
    let bodies = common::circular_pair(1., 1.);
    assert_eq!(orbits::integrate_with(&bodies, 0., 1., OutputGrid::Step(1e-300), &IntegratorSettings::default()).unwrap_err(),
               IntegrationError::InvalidStep(1e-300));
    // Largest accepted grids still work
    assert_eq!(OutputGrid::Step(1e-6).times(0., 1.).unwrap().len(), 1_000_001);
}

#[test]
fn statistics_are_reported() {
    let bodies = common::circular_pair(1., 1.);
    let trajectory = orbits::integrate(&bodies, 0., 5., 11).unwrap();
    let stats = trajectory.stats();
    assert!(stats.n_accepted_steps >= 10);
    assert!(stats.n_evaluations > 12*stats.n_accepted_steps);
}

#[test]
fn trajectory_serialization() {
    let bodies = common::circular_pair(1., 1.);
    let trajectory = orbits::integrate(&bodies, 0., 1., 3).unwrap();
    let json_encoded = serde_json::to_string(&trajectory).unwrap();
    let decoded: orbits::Trajectory = serde_json::from_str(&json_encoded).unwrap();
    assert_eq!(decoded.len(), trajectory.len());
    assert_eq!(decoded.n_bodies(), 2);
    assert_eq!(decoded.stats(), trajectory.stats());
    for sample in 0..trajectory.len() {
        common::assert_position(&decoded, sample, 1, trajectory.position(sample, 1), 1e-15);
    }
}

#[test]
fn inconsistent_trajectory_is_rejected() {
    let stats = r#""stats": {"n_evaluations": 0, "n_accepted_steps": 0, "n_rejected_steps": 0}"#;
    let too_short = format!(r#"{{"n_bodies": 2, "samples": [{{"time": 0.0, "state": [0.0, 0.0, 0.0, 0.0]}}], {}}}"#, stats);
    let error = serde_json::from_str::<orbits::Trajectory>(&too_short).unwrap_err();
    assert!(error.to_string().contains("4 components, 8 expected"));

    let consistent = format!(r#"{{"n_bodies": 1, "samples": [{{"time": 0.0, "state": [1.0, 2.0, 3.0, 4.0]}}], {}}}"#, stats);
    let trajectory: orbits::Trajectory = serde_json::from_str(&consistent).unwrap();
    assert_eq!(trajectory.position(0, 0), (1., 3.));
    assert_eq!(trajectory.velocity(0, 0), (2., 4.));
}
