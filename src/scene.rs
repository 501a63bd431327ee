//! Preset scenes: initial layout, pin mask and collider flags.

use crate::config::ClothConfig;
use crate::error::ClothError;
use crate::float::Float;
use crate::grid::ClothGrid;
use crate::vec::Vec3;

/// Named starting configurations, numbered as in the control panel (1–6).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scene {
    /// Hanging sheet held by its two top corners.
    #[default]
    Flag,
    /// Horizontal sheet held by all four corners.
    Hammock,
    /// Horizontal sheet held by a single corner.
    CornerDrape,
    /// Horizontal sheet held by its centre point (see [`PinMask::Center`]).
    CenterDrape,
    /// Horizontal sheet dropped onto the sphere.
    SphereDrape,
    /// Tilted sheet dropped onto the sphere so it slides off.
    SphereRamp,
}

/// Which points a scene anchors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PinMask {
    TopCorners,
    AllCorners,
    SingleCorner,
    /// Point `(density / 2, density / 2)`. Odd densities have no grid point
    /// at the geometric centre, so this rounds down to the one half a cell
    /// towards the first corner. At density 1 that is corner `(0, 0)` and
    /// the mask matches `SingleCorner`.
    Center,
    None,
}

impl PinMask {
    pub fn is_pinned(self, density: usize, i: usize, j: usize) -> bool {
        let edge = |v: usize| v == 0 || v == density;
        match self {
            PinMask::TopCorners => i == 0 && edge(j),
            PinMask::AllCorners => edge(i) && edge(j),
            PinMask::SingleCorner => i == 0 && j == 0,
            PinMask::Center => i == density / 2 && j == density / 2,
            PinMask::None => false,
        }
    }
}

/// A flat sheet tilted about the x axis.
///
/// Columns run along +x centred on the origin. Rows start at `height` and
/// descend at angle `tilt` from the horizontal: `0` lays the sheet flat
/// (rows along +z), `π/2` hangs it straight down.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Layout<F: Float> {
    pub height: F,
    pub tilt: F,
}

impl<F: Float> Layout<F> {
    pub fn flat(height: F) -> Self {
        Layout { height, tilt: F::zero() }
    }

    pub fn hanging(height: F) -> Self {
        Layout { height, tilt: F::pi() * F::half() }
    }

    pub fn position(&self, i: usize, j: usize, spacing: F, width: F) -> Vec3<F> {
        let half = width * F::half();
        let along = F::from_usize(i) * spacing;
        Vec3::new(
            F::from_usize(j) * spacing - half,
            self.height - along * self.tilt.sin(),
            (along - half) * self.tilt.cos(),
        )
    }
}

impl Scene {
    pub const ALL: [Scene; 6] = [
        Scene::Flag,
        Scene::Hammock,
        Scene::CornerDrape,
        Scene::CenterDrape,
        Scene::SphereDrape,
        Scene::SphereRamp,
    ];

    /// Control-panel number of this scene.
    pub fn id(self) -> u32 {
        match self {
            Scene::Flag => 1,
            Scene::Hammock => 2,
            Scene::CornerDrape => 3,
            Scene::CenterDrape => 4,
            Scene::SphereDrape => 5,
            Scene::SphereRamp => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Scene::Flag => "flag",
            Scene::Hammock => "hammock",
            Scene::CornerDrape => "corner drape",
            Scene::CenterDrape => "center drape",
            Scene::SphereDrape => "sphere drape",
            Scene::SphereRamp => "sphere ramp",
        }
    }

    pub fn pin_mask(self) -> PinMask {
        match self {
            Scene::Flag => PinMask::TopCorners,
            Scene::Hammock => PinMask::AllCorners,
            Scene::CornerDrape => PinMask::SingleCorner,
            Scene::CenterDrape => PinMask::Center,
            Scene::SphereDrape | Scene::SphereRamp => PinMask::None,
        }
    }

    /// Whether points collide with the sphere obstacle in this scene.
    pub fn uses_sphere(self) -> bool {
        matches!(self, Scene::SphereDrape | Scene::SphereRamp)
    }

    pub fn layout<F: Float>(self) -> Layout<F> {
        match self {
            Scene::Flag => Layout::hanging(F::from_f32(6.0)),
            Scene::Hammock | Scene::CornerDrape | Scene::CenterDrape => Layout::flat(F::two()),
            Scene::SphereDrape => Layout::flat(F::zero()),
            Scene::SphereRamp => Layout { height: F::from_f32(1.5), tilt: F::from_f32(0.3) },
        }
    }

    /// Build a fresh grid for this scene.
    ///
    /// Nothing is shared with any previous grid, so callers can swap the
    /// result in as a whole.
    pub fn build<F: Float>(self, density: usize, config: &ClothConfig<F>) -> Result<ClothGrid<F>, ClothError> {
        let spacing = config.spacing(density);
        let width = config.width;
        let layout = self.layout::<F>();
        let mask = self.pin_mask();
        let mut grid = ClothGrid::new(
            density,
            spacing,
            |i, j| layout.position(i, j, spacing, width),
            |i, j| mask.is_pinned(density, i, j),
        )?;
        let sphere = self.uses_sphere();
        for p in grid.points_mut() {
            p.sphere_collider = sphere;
        }
        Ok(grid)
    }
}

impl TryFrom<u32> for Scene {
    type Error = ClothError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Scene::ALL
            .iter()
            .copied()
            .find(|s| s.id() == id)
            .ok_or(ClothError::UnknownScene { id })
    }
}
