//! Integration tests for Layer 1: Parser
//!
//! Tests for the metadata tree, both front ends and the dispatcher.

mod event_header;
mod helpers;
mod json;
mod tsdl;
