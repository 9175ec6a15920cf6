#![warn(missing_docs)]
//! Core abstractions for driving a simulated environment with a policy.
//!
//! The environment, its dynamics and its renderer live elsewhere (typically in a
//! Python gym library, see `drive-py-gym-env`). This crate only defines the
//! interfaces used to talk to them and the loop that ties them together:
//!
//! * [`Env`] and [`Render`] - an environment handle with reset/step/render/close.
//! * [`Policy`] and [`ActionSpace`] - where actions come from. [`RandomPolicy`]
//!   samples the environment's own action space.
//! * [`Frame`] and [`FrameSink`] - a rendered RGB image and the place it is shown.
//! * [`Driver`] - runs episodes, displaying one frame per step.
//! * [`record`] - key/value records used for logging steps and episodes.
pub mod dummy;
pub mod error;
pub mod record;

mod base;
pub use base::{ActionSpace, Act, Env, Info, Obs, Policy, Render, Step};

mod frame;
pub use frame::{Frame, FrameSink};

mod random;
pub use random::RandomPolicy;

mod driver;
pub use driver::{DriveSummary, Driver, DriverConfig};
