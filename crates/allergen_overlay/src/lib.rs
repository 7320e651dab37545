//! Allergen overlay host: DOM surface, observer gate, and page session glue.
//!
//! This crate is an embedded library. The embedder owns the real DOM and
//! timers; it implements [`DomSurface`], forwards page lifecycle events to a
//! [`Session`], and calls [`Session::on_timer_tick`] on a fixed cadence
//! (50ms in the reference behavior).
mod dom;
mod port;
mod session;

pub use dom::{AnchorId, AnchorRef, DomSurface, ObserverGate, PauseGuard};
pub use port::ProductDataPort;
pub use session::{Session, SessionConfig};
