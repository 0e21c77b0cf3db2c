// Author: Dustin Pilgrim
// License: MIT

//! Discovery and phase control.
//!
//! A run goes through three barrier-separated phases:
//!
//! 1. discovery: registry globals are read, outputs and the extended
//!    manager are bound, every output gets the next [`OutputId`];
//! 2. primary population: output events fill the output records;
//! 3. extended population: only when a manager was bound, one extended
//!    object is requested per output (in store order) and its events fill
//!    the extended records.
//!
//! The engine owns both stores for the whole run. Nothing outside it keeps
//! a record reference across a barrier.

use serde::Serialize;

use crate::aggregate::{ExtendedAggregator, OutputAggregator};
use crate::error::{EngineError, Result};
use crate::event::{Event, Global};
use crate::record::OutputId;
use crate::report::{Joined, Report};
use crate::transport::{EXTENDED_MANAGER_INTERFACE, OUTPUT_INTERFACE, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Discovered,
    Populated,
    Complete,
}

#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Upper bound on stored outputs. Outputs past it are counted and dropped.
    pub max_outputs: Option<usize>,

    /// Bind the extended-output manager when it is advertised.
    pub extended: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_outputs: None,
            extended: true,
        }
    }
}

/// Things that happened during a run without being errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    /// Globals with an interface we don't bind (or the manager when disabled).
    pub ignored_globals: usize,
    /// Globals advertised after discovery ended.
    pub late_globals: usize,
    pub removed_globals: usize,
    /// Outputs not stored because `max_outputs` was reached.
    pub dropped_outputs: usize,
    /// Manager globals that replaced an already bound manager.
    pub manager_rebinds: usize,
    /// Listener events for ids that have no record.
    pub stray_events: usize,
}

pub struct Engine<T: Transport> {
    transport: T,
    options: Options,
    phase: Phase,
    outputs: OutputAggregator<T::Output>,
    extended: ExtendedAggregator<T::ExtendedOutput>,
    manager: Option<T::Manager>,
    globals: Vec<Global>,
    diagnostics: Diagnostics,
}

impl<T: Transport> Engine<T> {
    pub fn new(transport: T, options: Options) -> Result<Self> {
        Ok(Self {
            transport,
            options,
            phase: Phase::Idle,
            outputs: OutputAggregator::new()?,
            extended: ExtendedAggregator::new()?,
            manager: None,
            globals: Vec::new(),
            diagnostics: Diagnostics::default(),
        })
    }

    /// Run all three phases.
    pub fn run(&mut self) -> Result<()> {
        self.discover()?;
        self.populate()?;
        self.populate_extended()
    }

    /// Phase 1: read the registry and bind what we care about.
    pub fn discover(&mut self) -> Result<()> {
        self.expect_phase(Phase::Idle)?;

        for event in self.barrier()? {
            match event {
                Event::Global(global) => self.on_global(global)?,
                Event::GlobalRemove { .. } => self.diagnostics.removed_globals += 1,
                Event::Output { .. } | Event::Extended { .. } => {
                    self.diagnostics.stray_events += 1
                }
            }
        }

        self.phase = Phase::Discovered;
        Ok(())
    }

    fn on_global(&mut self, global: Global) -> Result<()> {
        if global.interface == OUTPUT_INTERFACE {
            if self
                .options
                .max_outputs
                .is_some_and(|max| self.outputs.len() >= max)
            {
                self.diagnostics.dropped_outputs += 1;
            } else {
                let id = self.outputs.next_id();
                let handle = self
                    .transport
                    .bind_output(&global, id)
                    .map_err(EngineError::Transport)?;
                self.outputs.insert(handle)?;
            }
        } else if global.interface == EXTENDED_MANAGER_INTERFACE && self.options.extended {
            let manager = self
                .transport
                .bind_manager(&global)
                .map_err(EngineError::Transport)?;

            if let Some(previous) = self.manager.replace(manager) {
                self.transport.release_manager(previous);
                self.diagnostics.manager_rebinds += 1;
            }
        } else {
            self.diagnostics.ignored_globals += 1;
        }

        self.globals.push(global);
        Ok(())
    }

    /// Phase 2: let the bound outputs report their fields.
    pub fn populate(&mut self) -> Result<()> {
        self.expect_phase(Phase::Discovered)?;

        let events = self.barrier()?;
        self.dispatch(events);

        self.phase = Phase::Populated;
        Ok(())
    }

    /// Phase 3: request extended metadata for every output. Skipped without a manager.
    pub fn populate_extended(&mut self) -> Result<()> {
        self.expect_phase(Phase::Populated)?;

        if let Some(manager) = &self.manager {
            for output in self.outputs.iter() {
                let handle = self
                    .transport
                    .extended_output(manager, output.handle(), output.id())
                    .map_err(EngineError::Transport)?;
                self.extended.insert(output.id(), handle)?;
            }

            let events = self.barrier()?;
            self.dispatch(events);
        }

        self.phase = Phase::Complete;
        Ok(())
    }

    fn dispatch(&mut self, events: Vec<Event>) {
        for event in events {
            let landed = match event {
                Event::Output { id, event } => self.outputs.apply(id, event),
                Event::Extended { id, event } => self.extended.apply(id, event),
                Event::Global(_) => {
                    self.diagnostics.late_globals += 1;
                    continue;
                }
                Event::GlobalRemove { .. } => {
                    self.diagnostics.removed_globals += 1;
                    continue;
                }
            };

            if !landed {
                self.diagnostics.stray_events += 1;
            }
        }
    }

    fn barrier(&mut self) -> Result<Vec<Event>> {
        self.transport.barrier().map_err(EngineError::Transport)
    }

    fn expect_phase(&self, expected: Phase) -> Result<()> {
        if self.phase != expected {
            return Err(EngineError::PhaseOrder {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn has_manager(&self) -> bool {
        self.manager.is_some()
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Every global seen during discovery, in advertisement order.
    pub fn globals(&self) -> &[Global] {
        &self.globals
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn outputs(&self) -> &OutputAggregator<T::Output> {
        &self.outputs
    }

    pub fn extended(&self) -> &ExtendedAggregator<T::ExtendedOutput> {
        &self.extended
    }

    /// Outputs in store order, each with its extended record if one exists.
    pub fn joined(&self) -> impl Iterator<Item = Joined<'_, T::Output, T::ExtendedOutput>> {
        self.outputs.iter().map(|output| Joined {
            output,
            extended: self.extended.get(output.id()),
        })
    }

    pub fn report(&self) -> Report {
        Report::from_joined(self.joined())
    }

    /// Release every remote object and hand the transport back.
    ///
    /// Extended records go first, then outputs, then the manager. A final
    /// barrier lets the compositor acknowledge the destroyed objects.
    pub fn teardown(self) -> Result<T> {
        let Self {
            mut transport,
            outputs,
            extended,
            manager,
            ..
        } = self;

        extended.free(|handle| transport.release_extended_output(handle));
        outputs.free(|handle| transport.release_output(handle));

        if let Some(manager) = manager {
            transport.release_manager(manager);
        }

        transport.barrier().map_err(EngineError::Transport)?;
        Ok(transport)
    }

    /// Id the next discovered output would get.
    pub fn next_id(&self) -> OutputId {
        self.outputs.next_id()
    }
}
