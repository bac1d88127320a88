use std::fs::File;
use std::io::{self, Write, BufWriter};
use std::path::{Path, PathBuf};
use csv::WriterBuilder;
use thiserror::Error;
use super::Trajectory;
use super::super::bodies::Body;
use super::super::constants::{TIME_COLUMN, N_COMPONENTS_PER_BODY};

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("couldn't create {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("couldn't write trajectory: {0}")]
    Csv(#[from] csv::Error),
    #[error("trajectory has {found} bodies but {expected} names were given")]
    BodyCountMismatch { expected: usize, found: usize },
}

/// Header of the tabular output: the time followed by the state vector components of every body.
pub fn column_names(bodies: &[Body]) -> Vec<String> {
    let mut columns = Vec::with_capacity(1 + N_COMPONENTS_PER_BODY*bodies.len());
    columns.push(TIME_COLUMN.to_string());
    for body in bodies.iter() {
        for component in ["x", "vx", "y", "vy"] {
            columns.push(format!("{}_{}", body.name, component));
        }
    }
    columns
}

/// One CSV row per sample (time first, then the state vector in its native order).
pub fn write_trajectory<W: Write>(writer: W, bodies: &[Body], trajectory: &Trajectory) -> Result<(), OutputError> {
    if bodies.len() != trajectory.n_bodies() {
        return Err(OutputError::BodyCountMismatch { expected: bodies.len(), found: trajectory.n_bodies() });
    }
    let mut csv_writer = WriterBuilder::new().from_writer(writer);
    csv_writer.write_record(column_names(bodies))?;
    for sample in trajectory.samples() {
        let mut record = Vec::with_capacity(1 + sample.state.len());
        record.push(sample.time.to_string());
        record.extend(sample.state.iter().map(|value| value.to_string()));
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn store_trajectory(output_path: &Path, bodies: &[Body], trajectory: &Trajectory) -> Result<(), OutputError> {
    let file = File::create(output_path).map_err(|source| OutputError::Io { path: output_path.to_path_buf(), source: source })?;
    write_trajectory(BufWriter::new(file), bodies, trajectory)
}
