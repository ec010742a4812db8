//! Runtime glue: argument resolution, dispatch, the execution harness, and the
//! logging, configuration and error plumbing around them.

pub mod application;
pub mod args;
pub mod config;
pub mod dispatcher;
pub mod fatal;
pub mod harness;
pub mod telemetry;
