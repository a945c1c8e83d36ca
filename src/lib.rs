//! HTTP gateway in front of Google Cloud Text-to-Speech.
//!
//! Requests flow through validation, a single provider call, optional
//! persistence (transient file, then Google Drive) and a JSON envelope.

pub mod controllers;
pub mod domain;
pub mod error;
pub mod infrastructure;
