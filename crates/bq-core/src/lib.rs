//! Blind Quote Core Library
//!
//! This library provides the interactive side of quote preparation:
//! - Distribution balancer and its confirmation dialog protocol
//! - Printable quote and distribution workflows over a state store
//! - Operator notifications
//! - Configuration resolution, logging, and exit codes for the CLI
//!
//! The binary entry point is in `main.rs`.

pub mod config;
pub mod distribution;
pub mod exit_codes;
pub mod logging;
pub mod notify;
pub mod workflow;

pub use distribution::{
    DistributionBalancer, DistributionError, Field, ModalPresenter, ModalRequest, Split, SplitSink,
};
pub use workflow::{DistributionKind, MemoryStore, QuotePresenter, QuoteWorkflow, StateStore};
