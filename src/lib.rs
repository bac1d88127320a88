pub mod constants;

pub mod bodies;
pub use self::bodies::Body;
pub use self::bodies::Preset;
pub use self::bodies::BodyError;

mod gravity;
pub use self::gravity::GravityField;

pub mod integrator;
pub use self::integrator::{integrate, integrate_with, OutputGrid, Trajectory, Sample};
pub use self::integrator::{IntegratorSettings, IntegrationError, OdeSystem, Stats};
pub use self::integrator::output;

pub mod tools;
