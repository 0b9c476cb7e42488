//! Integration tests for Layer 0: Model
//!
//! Tests for declarations, scopes and clocks.

mod clock;
mod declarations;
mod scope;
