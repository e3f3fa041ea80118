//! Detection decoding and treatment-recommendation core for the DermaScan
//! client.
//!
//! The modules cover the wire shapes the detection service emits, the typed
//! side-channel decoder, the static treatment lookup with its resolver, and
//! the telemetry helpers the submission flow reports through.

pub mod detection;
pub mod prelude;
pub mod telemetry;
pub mod treatment;

pub use prelude::{Detection, SideChannel, TreatmentMap};
