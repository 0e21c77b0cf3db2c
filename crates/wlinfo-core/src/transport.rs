// Author: Dustin Pilgrim
// License: MIT

use crate::event::{Event, Global};
use crate::record::OutputId;

/// Interface name of the per-output global.
pub const OUTPUT_INTERFACE: &str = "wl_output";

/// Interface name of the extended-output-metadata manager global.
pub const EXTENDED_MANAGER_INTERFACE: &str = "zxdg_output_manager_v1";

pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// What the engine needs from a compositor connection.
///
/// Bind requests are only queued; they reach the compositor at the next
/// [`Transport::barrier`]. Events for bound objects must be tagged with the
/// [`OutputId`] the engine supplied when the object was created.
pub trait Transport {
    type Output;
    type Manager;
    type ExtendedOutput;

    /// Flush pending requests and block until every reply enqueued so far
    /// has been dispatched. Returns the dispatched events in delivery order.
    fn barrier(&mut self) -> Result<Vec<Event>, TransportError>;

    fn bind_output(&mut self, global: &Global, id: OutputId) -> Result<Self::Output, TransportError>;

    fn bind_manager(&mut self, global: &Global) -> Result<Self::Manager, TransportError>;

    fn extended_output(
        &mut self,
        manager: &Self::Manager,
        output: &Self::Output,
        id: OutputId,
    ) -> Result<Self::ExtendedOutput, TransportError>;

    fn release_output(&mut self, output: Self::Output);

    fn release_extended_output(&mut self, output: Self::ExtendedOutput);

    fn release_manager(&mut self, manager: Self::Manager);
}
