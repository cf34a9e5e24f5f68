//! Adapter Implementations
//!
//! | Adapter | Description |
//! |---------|-------------|
//! | [`NullAdapter`] | Deterministic echo, supports probes and batches |

pub mod null;

pub use null::NullAdapter;
