//! Domain events.
//!
//! Events are the facts aggregates emit when a command is accepted. They stay
//! in memory here — there is no event store or broker — but they keep the
//! same discipline: immutable, typed, versioned, business-timed.

pub mod event;

pub use event::Event;
