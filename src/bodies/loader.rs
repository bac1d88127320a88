use std::fs::File;
use std::io::{self, Read, BufReader};
use std::path::{Path, PathBuf};
use serde::Deserialize;
use thiserror::Error;
use super::Body;
use super::super::tools::timestamp;

#[derive(Debug, Error)]
pub enum BodyError {
    #[error("couldn't read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid body configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("'{field}' value missing, unable to load body #{index}")]
    MissingField { index: usize, field: &'static str },
    #[error("body '{name}' has an invalid mass ({mass}), it must be a positive number")]
    InvalidMass { name: String, mass: f64 },
    #[error("body '{name}' has a non-finite '{field}' value")]
    NonFiniteValue { name: String, field: &'static str },
}

// Every field is optional so that a missing one can be reported by name
// instead of failing with a generic deserialization error.
#[derive(Debug, Deserialize)]
struct BodyEntry {
    name: Option<String>,
    mass: Option<f64>,
    x: Option<f64>,
    y: Option<f64>,
    vx: Option<f64>,
    vy: Option<f64>,
}

impl BodyEntry {
    fn into_body(self, index: usize) -> Result<Body, BodyError> {
        let name = self.name.ok_or(BodyError::MissingField { index: index, field: "name" })?;
        let mass = self.mass.ok_or(BodyError::MissingField { index: index, field: "mass" })?;
        let x = self.x.ok_or(BodyError::MissingField { index: index, field: "x" })?;
        let y = self.y.ok_or(BodyError::MissingField { index: index, field: "y" })?;
        let vx = self.vx.ok_or(BodyError::MissingField { index: index, field: "vx" })?;
        let vy = self.vy.ok_or(BodyError::MissingField { index: index, field: "vy" })?;

        if !mass.is_finite() || mass <= 0. {
            return Err(BodyError::InvalidMass { name: name, mass: mass });
        }
        for (field, value) in [("x", x), ("y", y), ("vx", vx), ("vy", vy)] {
            if !value.is_finite() {
                return Err(BodyError::NonFiniteValue { name: name, field: field });
            }
        }
        Ok(Body::new(&name, mass, x, y, vx, vy))
    }
}

/// Parse a JSON array of bodies, each one described by `name`, `mass`, `x`, `y`, `vx` and `vy`.
pub fn parse_bodies(json_encoded: &str, silent_mode: bool) -> Result<Vec<Body>, BodyError> {
    let entries: Vec<BodyEntry> = serde_json::from_str(json_encoded)?;
    let mut bodies = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let body = entry.into_body(index)?;
        if !silent_mode {
            println!("[INFO {} UTC] Loaded body: {}", timestamp(), body.name);
        }
        bodies.push(body);
    }
    Ok(bodies)
}

pub fn load_bodies(config_path: &Path, silent_mode: bool) -> Result<Vec<Body>, BodyError> {
    let file = File::open(config_path).map_err(|source| BodyError::Io { path: config_path.to_path_buf(), source: source })?;
    let mut json_encoded = String::new();
    BufReader::new(file).read_to_string(&mut json_encoded)
        .map_err(|source| BodyError::Io { path: config_path.to_path_buf(), source: source })?;
    parse_bodies(&json_encoded, silent_mode)
}
