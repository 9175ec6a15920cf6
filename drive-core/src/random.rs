//! Random policy.
use crate::{ActionSpace, Env, Policy};
use anyhow::Result;

/// A policy that ignores observations and draws actions from an action space.
pub struct RandomPolicy<S> {
    space: S,
}

impl<S> RandomPolicy<S> {
    /// Creates a policy sampling from `space`.
    pub fn new(space: S) -> Self {
        Self { space }
    }
}

impl<E, S> Policy<E> for RandomPolicy<S>
where
    E: Env,
    S: ActionSpace<E::Act>,
{
    fn sample(&mut self, _obs: &E::Obs) -> Result<E::Act> {
        self.space.sample()
    }
}
