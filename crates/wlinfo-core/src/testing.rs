// Author: Dustin Pilgrim
// License: MIT

//! Scripted in-memory transport for engine tests.

use std::collections::VecDeque;

use crate::event::{Event, ExtendedOutputEvent, Global, OutputEvent};
use crate::record::OutputId;
use crate::transport::{Transport, TransportError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Barrier,
    BindOutput { name: u32, version: u32, id: OutputId },
    BindManager { name: u32, version: u32 },
    ExtendedOutput { output: u32, id: OutputId },
    ReleaseOutput(u32),
    ReleaseExtended(OutputId),
    ReleaseManager(u32),
}

/// Each barrier delivers the next scripted window; once the script runs
/// out, barriers deliver nothing.
#[derive(Debug, Default)]
pub struct FakeTransport {
    windows: VecDeque<Vec<Event>>,
    fail_at: Option<usize>,
    pub calls: Vec<Call>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window(mut self, events: Vec<Event>) -> Self {
        self.windows.push_back(events);
        self
    }

    /// Make the barrier with this zero-based index fail.
    pub fn fail_at_barrier(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    pub fn barriers(&self) -> usize {
        self.calls.iter().filter(|c| **c == Call::Barrier).count()
    }
}

impl Transport for FakeTransport {
    /// Outputs and the manager are identified by their registry name.
    type Output = u32;
    type Manager = u32;
    type ExtendedOutput = OutputId;

    fn barrier(&mut self) -> Result<Vec<Event>, TransportError> {
        if self.fail_at == Some(self.barriers()) {
            return Err("connection reset by compositor".into());
        }

        self.calls.push(Call::Barrier);
        Ok(self.windows.pop_front().unwrap_or_default())
    }

    fn bind_output(&mut self, global: &Global, id: OutputId) -> Result<u32, TransportError> {
        self.calls.push(Call::BindOutput {
            name: global.name,
            version: global.version,
            id,
        });
        Ok(global.name)
    }

    fn bind_manager(&mut self, global: &Global) -> Result<u32, TransportError> {
        self.calls.push(Call::BindManager {
            name: global.name,
            version: global.version,
        });
        Ok(global.name)
    }

    fn extended_output(
        &mut self,
        _manager: &u32,
        output: &u32,
        id: OutputId,
    ) -> Result<OutputId, TransportError> {
        self.calls.push(Call::ExtendedOutput {
            output: *output,
            id,
        });
        Ok(id)
    }

    fn release_output(&mut self, output: u32) {
        self.calls.push(Call::ReleaseOutput(output));
    }

    fn release_extended_output(&mut self, output: OutputId) {
        self.calls.push(Call::ReleaseExtended(output));
    }

    fn release_manager(&mut self, manager: u32) {
        self.calls.push(Call::ReleaseManager(manager));
    }
}

pub fn global(name: u32, interface: &str, version: u32) -> Event {
    Event::Global(Global {
        name,
        interface: interface.to_string(),
        version,
    })
}

pub fn out_event(id: u32, event: OutputEvent) -> Event {
    Event::Output {
        id: OutputId::new(id),
        event,
    }
}

pub fn ext_event(id: u32, event: ExtendedOutputEvent) -> Event {
    Event::Extended {
        id: OutputId::new(id),
        event,
    }
}
