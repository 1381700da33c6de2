//! Session state channel subscription.
//!
//! [`PhaseObserver::start`] connects to the client's websocket, subscribes to the
//! gameflow phase topic and hands back a [`PhaseSubscription`], a cancellable stream
//! of [`PhaseTransition`]s. Malformed frames are logged and skipped; losing the
//! channel ends the stream with a [`ConnectionError`](crate::ConnectionError).

mod frame;
mod subscription;
mod tracker;

pub use frame::{
    parse_phase_frame,
    subscribe_frame,
    topic,
    GAMEFLOW_PHASE_URI,
};
pub use subscription::{
    ChannelStream,
    Endpoint,
    PhaseObserver,
    PhaseSubscription,
};
pub use tracker::{
    ObserverState,
    PhaseTracker,
    PhaseTransition,
};
