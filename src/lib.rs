//! Real-time mass-spring cloth simulation.
//!
//! `drape` advances a square grid of point masses joined by structural,
//! shear and flexion springs under gravity, drag and procedural wind, keeps
//! it out of a floor plane, a sphere obstacle and (optionally) itself, and
//! turns the result into double-sided triangle buffers ready to upload to a
//! renderer.
//!
//! # Features
//!
//! - **Two integrators**: semi-implicit Euler and position Verlet
//! - **Spring network**: three stiffness classes derived from one tensile parameter
//! - **Collisions**: floor, sphere, all-pairs self-collision
//! - **Surface mesh**: smoothed or flat normals, non-indexed `f32` buffers
//! - **Scenes**: six presets (flag, hammock, drapes, sphere drops)
//! - **Observable**: `StepObserver` hooks plus `tracing` events
//! - **`no_std` compatible**: Works in embedded and WASM environments

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod point;
pub mod spring;
pub mod grid;
pub mod config;
pub mod force;
pub mod integrator;
pub mod collision;
pub mod mesh;
pub mod scene;
pub mod cloth;
pub mod observer;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec3;
pub use point::Point;
pub use spring::{Spring, SpringKind, SpringNetwork};
pub use grid::{ClothGrid, MAX_DENSITY};
pub use config::{ClothConfig, Integrator, SpringStiffness};
pub use collision::{Floor, Sphere};
pub use mesh::{NormalMode, SurfaceMesh};
pub use scene::{Layout, PinMask, Scene};
pub use cloth::{Cloth, DEFAULT_DENSITY};
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::ClothError;
