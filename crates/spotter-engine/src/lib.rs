//! The engagement pipeline: decision dispatch, match resolution, and
//! notification fan-out, generic over any
//! [`spotter_core::store::EngagementStore`].
//!
//! The pipeline is one-way: commit in the UI first, then best-effort persist.
//! Backend failures are caught at the dispatcher boundary and reported as
//! data ([`DispatchOutcome::TransientFailure`]), never thrown back into the
//! gesture state machine.

pub mod dispatch;
pub mod fanout;
pub mod resolve;
pub mod session;

pub use dispatch::{DispatchOutcome, DispatchStage, Engine};
pub use session::{SessionDriver, SessionSignal};
