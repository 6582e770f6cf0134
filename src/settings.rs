//! Functions for loading simulation settings.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use inlinable_string::InlinableString;

use crate::errors::*;

/// A structure containing configuration data for the simulation: how frame
/// intervals turn into time steps, and which bodies make up the system.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub time: TimeParams,
    #[serde(default)]
    pub system: SystemParams,
}

impl Settings {
    /// Loads settings from a utf-8 encoded json file.
    pub fn load<T>(path: T) -> Result<Settings>
    where
        T: AsRef<Path>,
    {
        let mut buf = String::new();
        let mut file = File::open(&path)?;
        file.read_to_string(&mut buf)?;

        info!("Loads settings from {:?}.", path.as_ref());
        Self::from_json(&buf)
    }

    /// Parses settings from json text.
    pub fn from_json(text: &str) -> Result<Settings> {
        Ok(serde_json::from_str(text)?)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimeParams {
    /// Frame intervals longer than `1 / min_fps` seconds are clamped. Zero disables
    /// the clamping.
    pub min_fps: u32,
    /// Number of previous intervals averaged into the time step. Zero disables
    /// the smoothing.
    pub time_smooth_step: u32,
    /// Multiplier from elapsed seconds to simulation time units. The default counts
    /// time in frames of a 60Hz display.
    pub time_scale: f32,
}

impl Default for TimeParams {
    fn default() -> Self {
        TimeParams {
            min_fps: 0,
            time_smooth_step: 0,
            time_scale: 60.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemParams {
    /// Number of segments of every orbit path polyline.
    pub orbit_path_steps: usize,
    /// Bodies attached to the root of the system.
    pub bodies: Vec<BodyParams>,
}

/// A celestial body. Its planet node spins with `spin` radians per tick, and has the
/// non-uniform `scale` baked into its initial transform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyParams {
    pub name: InlinableString,
    pub scale: [f32; 3],
    pub spin: f32,
    pub color: [f32; 4],
    pub color_mult: [f32; 4],
    #[serde(default)]
    pub orbit: Option<OrbitParams>,
    #[serde(default)]
    pub satellites: Vec<BodyParams>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrbitParams {
    pub semi_major: f32,
    pub semi_minor: f32,
    pub angular_speed: f32,
    #[serde(default)]
    pub center_offset: [f32; 3],
    #[serde(default)]
    pub phase: f32,
}

impl Default for SystemParams {
    fn default() -> Self {
        let moon = BodyParams {
            name: "moon".into(),
            scale: [0.1, 0.1, 0.1],
            spin: -0.01,
            color: [0.6, 0.6, 0.6, 1.0],
            color_mult: [0.1, 0.1, 0.1, 1.0],
            orbit: Some(OrbitParams {
                semi_major: 30.0,
                semi_minor: 25.0,
                angular_speed: 0.01,
                center_offset: [0.0, 0.0, 0.0],
                phase: 0.0,
            }),
            satellites: Vec::new(),
        };

        let earth = BodyParams {
            name: "earth".into(),
            scale: [0.5, 0.5, 0.5],
            spin: 0.5,
            color: [0.2, 0.5, 0.8, 1.0],
            color_mult: [0.8, 0.5, 0.2, 1.0],
            orbit: Some(OrbitParams {
                semi_major: 100.0,
                semi_minor: 85.0,
                angular_speed: 0.01,
                center_offset: [0.0, 0.0, 0.0],
                phase: 0.0,
            }),
            satellites: vec![moon],
        };

        let sun = BodyParams {
            name: "sun".into(),
            scale: [1.0, 1.0, 1.0],
            spin: 0.005,
            color: [0.6, 0.6, 0.0, 1.0],
            color_mult: [0.4, 0.4, 0.0, 1.0],
            orbit: None,
            satellites: vec![earth],
        };

        SystemParams {
            orbit_path_steps: 64,
            bodies: vec![sun],
        }
    }
}
