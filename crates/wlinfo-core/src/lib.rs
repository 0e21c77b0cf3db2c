// Author: Dustin Pilgrim
// License: MIT

pub mod aggregate;
pub mod engine;
pub mod error;
pub mod event;
pub mod record;
pub mod report;
pub mod store;
pub mod transport;

#[cfg(test)]
mod testing;

pub use aggregate::{ExtendedAggregator, OutputAggregator};
pub use engine::{Diagnostics, Engine, Options, Phase};
pub use error::{EngineError, Result, StoreError};
pub use event::{Event, ExtendedOutputEvent, Global, OutputEvent};
pub use record::{ExtendedOutputRecord, Geometry, OutputId, OutputRecord};
pub use report::{ExtendedReport, Joined, OutputReport, Report};
pub use store::{RecordStore, Slot};
pub use transport::{Transport, TransportError, EXTENDED_MANAGER_INTERFACE, OUTPUT_INTERFACE};
