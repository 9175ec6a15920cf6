//! Core functionalities.
mod env;
mod policy;
mod step;
pub use env::{Env, Render};
pub use policy::{ActionSpace, Policy};
use std::fmt::Debug;
pub use step::{Info, Step};

/// An observation of an environment.
///
/// The driving loop never looks inside an observation, it only hands it to
/// the [`Policy`].
pub trait Obs: Clone + Debug {}

/// An action of an environment.
pub trait Act: Clone + Debug {}
