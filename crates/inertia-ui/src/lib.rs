//! Touch dispatch and momentum scrolling for Inertia lists.

pub mod dispatcher;
pub mod momentum_scroll;

pub use dispatcher::{HandlerRegistration, TouchDispatcher};
pub use momentum_scroll::{MomentumScrollConfig, MomentumScrollController, ScrollCallbacks};

pub use inertia_animation::{MomentumDecaySpec, MomentumEnd, MomentumPhase};
pub use inertia_foundation::{
    GestureConfig, HapticError, HapticFeedback, ItemId, ScrollContainer, ScrollError, ScrollState,
    TouchEvent, TouchPhase, TouchPoint, TouchRelease,
};
