//! Request routing rules for the application shell.

mod gate;

pub use gate::{prefers_markdown, GateDecision, GateRequest, RouteGate};
