//! Momentum animation for Inertia.
//!
//! [`MomentumDecaySpec`] holds the pure per-frame physics; [`MomentumAnimation`]
//! runs it on the runtime's frame clock.

pub mod decay_spec;
pub mod momentum;

pub use decay_spec::MomentumDecaySpec;
pub use momentum::{MomentumAnimation, MomentumEnd, MomentumPhase};
