//// Physical constants
// Dimensionless units: masses, lengths and times are all expressed so that G is 1.
pub const G : f64 = 1.;
pub const PI : f64 = std::f64::consts::PI;
pub const TWO_PI : f64 = std::f64::consts::PI * 2.;

//// State vector layout
pub const N_COMPONENTS_PER_BODY : usize = 4; // x, vx, y, vy

//// Constants for the DOP853 integrator
pub const RELATIVE_TOLERANCE : f64 = 1e-6;      // Per component
pub const ABSOLUTE_TOLERANCE : f64 = 1e-10;     // Per component
pub const SAFETY_FACTOR : f64 = 0.9;            // Applied to the optimal step size proposed by the error estimate
pub const MIN_STEP_FACTOR : f64 = 0.3;          // The new step is at least this fraction of the previous one (scipy's dop853 dfactor)
pub const MAX_STEP_FACTOR : f64 = 6.;           // The new step is at most this multiple of the previous one
pub const STEP_STABILIZATION_BETA : f64 = 0.;   // Lund stabilization (0 disables it, 0.04 is a sensible non-zero value)
pub const MIN_ACCEPTED_ERROR : f64 = 1e-4;      // Floor for the error kept between accepted steps (stabilization)
pub const MAX_STEPS : usize = 100_000;          // Maximum number of attempted steps between two output times
pub const MAX_SAMPLES : usize = 10_000_000;     // Largest number of output times in a trajectory
pub const ROUNDING_UNIT : f64 = f64::EPSILON;   // Steps smaller than 10 times this (relative to the time) are considered an underflow

//// Output
pub const TIME_COLUMN : &str = "t";
pub const LOG_TIMESTAMP_FORMAT : &str = "[year].[month].[day] [hour]:[minute]:[second]";
