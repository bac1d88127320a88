mod body;
pub mod state;
pub mod loader;
pub mod presets;

pub use self::body::Body;
pub use self::loader::{BodyError, load_bodies, parse_bodies};
pub use self::presets::Preset;
