//! Command-line inference for the asthma risk model.
//!
//! The scaler, classifier, and label encoders are fitted by an external
//! training job and exported as JSON artifacts; this crate loads them and
//! scores a single patient feature record per invocation.

pub mod artifacts;
pub mod error;
pub mod frame;
pub mod predict;
pub mod records;
