//! Policy.
use super::{Act, Env};
use anyhow::Result;

/// A policy on an environment.
///
/// Policy is a mapping from an observation to an action.
/// The mapping can be either of deterministic or stochastic.
pub trait Policy<E: Env> {
    /// Sample an action given an observation.
    fn sample(&mut self, obs: &E::Obs) -> Result<E::Act>;
}

/// The set of valid actions of an environment.
///
/// The shape and meaning of the actions are defined by the environment;
/// implementors only need to know how to draw one at random.
pub trait ActionSpace<A: Act> {
    /// Draws an action uniformly at random.
    fn sample(&mut self) -> Result<A>;
}
