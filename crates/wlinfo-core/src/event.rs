// Author: Dustin Pilgrim
// License: MIT

//! Tagged events delivered to the engine after each barrier.
//!
//! The transport turns protocol callbacks into these values and queues them;
//! the engine decides which record each one lands in.

use serde::{Deserialize, Serialize};

use crate::record::OutputId;

/// One global advertised by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Global {
    /// Registry name, only meaningful to the registry itself.
    pub name: u32,
    pub interface: String,
    pub version: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEvent {
    Name(String),
    Description(String),
    Scale(i32),
    Geometry {
        x: i32,
        y: i32,
        physical_width: i32,
        physical_height: i32,
        subpixel: u32,
        make: String,
        model: String,
        transform: u32,
    },
    /// Display modes are not tracked.
    Mode,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtendedOutputEvent {
    Name(String),
    Description(String),
    LogicalPosition { x: i32, y: i32 },
    LogicalSize { width: i32, height: i32 },
    /// Deprecated by the protocol.
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Global(Global),
    GlobalRemove { name: u32 },
    Output { id: OutputId, event: OutputEvent },
    Extended { id: OutputId, event: ExtendedOutputEvent },
}
