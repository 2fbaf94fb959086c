//! Output capture and selected-output data model for a callback-driven
//! geochemical engine.
//!
//! The engine reports through one dispatch entry ([`router::Router::dispatch`]);
//! the router fans each emission out to file sinks and to in-memory
//! structures: line buffers for diagnostics and dumps, and a typed
//! selected-output grid. [`Session`] owns all of it and exposes the query and
//! control surface.

pub mod capture;
pub mod config;
pub mod engine;
pub mod router;
pub mod selected_output;
pub mod session;
pub mod shared;
pub mod stop;

pub use engine::{Engine, EngineIo, SharedEngine};
pub use router::{Action, StreamKind};
pub use selected_output::{Cell, CellKind};
pub use session::Session;
pub use shared::CaptureError;
pub use stop::Stop;
