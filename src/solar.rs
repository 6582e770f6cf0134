//! Assembles a `Scene` of orbiting bodies from `SystemParams`.
//!
//! Every body becomes a planet node which spins in place and carries a sphere
//! drawable. A body with an orbit gets an invisible orbit-pivot node that travels
//! along the ellipse and carries the planet, plus a static orbit-path node with the
//! sampled ellipse for visualisation. Satellites hang under the pivot of their
//! primary, so they follow its orbit without inheriting its spin.

use inlinable_string::InlinableString;

use crate::errors::*;
use crate::math::prelude::*;
use crate::motion::{Ellipse, Motion, Orbit};
use crate::scene::Scene;
use crate::settings::{BodyParams, SystemParams};
use crate::utils::FastHashMap;
use crate::NodeId;

/// The drawable payload handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Appearance {
    /// A sphere, shaded with `color * color_mult`.
    Sphere {
        color: Color,
        color_mult: Color,
    },
    /// A closed polyline in the local space of the node.
    Path {
        points: Vec<Vector3<f32>>,
        color: Color,
    },
}

impl Appearance {
    /// The flat color to draw with.
    pub fn tint(&self) -> Color {
        match *self {
            Appearance::Sphere { color, color_mult } => color.modulate(color_mult),
            Appearance::Path { color, .. } => color,
        }
    }
}

/// A snapshot of what to draw for one node.
#[derive(Debug, Clone, Copy)]
pub struct DrawItem<'a> {
    pub node: NodeId,
    pub world_matrix: Matrix4<f32>,
    pub appearance: &'a Appearance,
}

pub struct SolarSystem {
    scene: Scene<Appearance>,
    root: NodeId,
    bodies: Vec<NodeId>,
    orbit_paths: Vec<NodeId>,
    names: FastHashMap<InlinableString, NodeId>,
}

impl SolarSystem {
    /// Builds the system. The world matrices are propagated once, so they are valid
    /// before the first frame.
    pub fn new(params: &SystemParams) -> Result<SolarSystem> {
        let mut scene: Scene<Appearance> = Scene::new();
        let root = scene.create_node(None, &[], Matrix4::identity(), None)?;

        let mut system = SolarSystem {
            scene,
            root,
            bodies: Vec::new(),
            orbit_paths: Vec::new(),
            names: FastHashMap::default(),
        };

        for body in &params.bodies {
            system.add_body(body, root, params.orbit_path_steps)?;
        }

        system.scene.update_world_matrix();

        info!(
            "Creates solar system with {} bodies and {} orbits.",
            system.bodies.len(),
            system.orbit_paths.len()
        );

        Ok(system)
    }

    fn add_body(&mut self, body: &BodyParams, anchor: NodeId, steps: usize) -> Result<()> {
        if self.names.contains_key(&body.name) {
            return Err(Error::DuplicateBodyName(body.name.clone()));
        }

        let orbit = match body.orbit {
            Some(ref v) => {
                let ellipse = Ellipse::new(v.semi_major, v.semi_minor)?;
                let orbit = Orbit::new(ellipse, v.angular_speed)
                    .with_center_offset(v.center_offset)
                    .with_phase(v.phase);
                Some(orbit)
            }
            None => None,
        };

        let [x, y, z] = body.scale;
        let color = Color::from(body.color);
        let appearance = Appearance::Sphere {
            color,
            color_mult: Color::from(body.color_mult),
        };

        let local = Matrix4::from_nonuniform_scale(x, y, z);
        let planet = self
            .scene
            .create_node(Motion::spin(body.spin), &[], local, appearance)?;

        let anchor = if let Some(orbit) = orbit {
            let pivot =
                self.scene
                    .create_node(Motion::from(orbit), &[planet], Matrix4::identity(), None)?;
            self.scene.attach(pivot, anchor)?;

            let offset = orbit.center_offset();
            let points = orbit
                .ellipse()
                .sample(steps)?
                .into_iter()
                .map(|v| v + offset)
                .collect();

            let appearance = Appearance::Path {
                points,
                color,
            };

            let path = self
                .scene
                .create_node(None, &[], Matrix4::identity(), appearance)?;
            self.scene.attach(path, anchor)?;
            self.orbit_paths.push(path);
            pivot
        } else {
            self.scene.attach(planet, anchor)?;
            anchor
        };

        debug!("Creates body {} as {}.", body.name, planet);
        self.bodies.push(planet);
        self.names.insert(body.name.clone(), planet);

        for satellite in &body.satellites {
            self.add_body(satellite, anchor, steps)?;
        }

        Ok(())
    }

    /// The root of the system, for ticking and propagation.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn scene(&self) -> &Scene<Appearance> {
        &self.scene
    }

    /// The planet nodes, in creation order.
    #[inline]
    pub fn bodies(&self) -> &[NodeId] {
        &self.bodies
    }

    /// The orbit-path nodes, in creation order.
    #[inline]
    pub fn orbit_paths(&self) -> &[NodeId] {
        &self.orbit_paths
    }

    /// Finds the planet node of the body with `name`. Names are unique within a
    /// system.
    #[inline]
    pub fn body(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).cloned()
    }

    /// Runs one frame of the simulation.
    pub fn advance(&mut self, dt: f32) -> Result<()> {
        self.scene.tick(self.root, dt, true)?;
        self.scene.update_world_matrix();
        Ok(())
    }

    /// Returns the bodies and then the orbit paths, with the world matrices of the
    /// last frame.
    pub fn draw_list(&self) -> Vec<DrawItem> {
        self.bodies
            .iter()
            .chain(self.orbit_paths.iter())
            .filter_map(|&node| {
                let world_matrix = self.scene.world_matrix(node)?;
                let appearance = self.scene.drawable(node)?;
                Some(DrawItem {
                    node,
                    world_matrix,
                    appearance,
                })
            })
            .collect()
    }
}
