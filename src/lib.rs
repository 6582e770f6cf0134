//! A small hierarchical scene graph that drives a stylized orbital simulation.
//!
//! Every node in the graph owns a local transform. Once per frame the nodes are
//! animated with their `Motion` (spinning in place, or travelling along an ellipse),
//! and then the world transforms are composed from the roots down:
//!
//! ```rust,ignore
//! scene.tick(root, dt, true)?;
//! scene.update_world_matrix();
//! let world = scene.world_matrix(planet);
//! ```
//!
//! `Scene::advance` performs both passes in one call.

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;

pub extern crate cgmath;
extern crate inlinable_string;
extern crate serde_json;
extern crate smallvec;

pub mod utils;
pub mod errors;
pub mod math;
pub mod motion;
pub mod scene;
pub mod settings;
pub mod solar;
pub mod spatial;
pub mod time;

pub mod prelude {
    pub use crate::errors::{Error, Result};
    pub use crate::math::prelude::*;
    pub use crate::motion::prelude::*;
    pub use crate::scene::Scene;
    pub use crate::settings::{BodyParams, OrbitParams, Settings, SystemParams, TimeParams};
    pub use crate::solar::{Appearance, DrawItem, SolarSystem};
    pub use crate::spatial::prelude::*;
    pub use crate::time::FrameClock;
}

pub use crate::spatial::NodeId;
