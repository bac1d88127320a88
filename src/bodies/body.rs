use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Body {
    pub name: String,
    pub mass: f64,
    // Position and velocity in the (non-rotating) frame of the simulation
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

impl Body {
    pub fn new(name: &str, mass: f64, x: f64, y: f64, vx: f64, vy: f64) -> Body {
        Body {
            name: name.to_string(),
            mass: mass,
            x: x,
            y: y,
            vx: vx,
            vy: vy,
        }
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn velocity(&self) -> (f64, f64) {
        (self.vx, self.vy)
    }
}
