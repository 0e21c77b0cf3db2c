// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

use serde::{Deserialize, Serialize};

/// Engine-assigned identifier joining an output to its extended record.
///
/// Handed out as 0, 1, 2, ... in discovery order and never reused within a
/// run. Unrelated to the registry's global name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputId(u32);

impl OutputId {
    pub const FIRST: OutputId = OutputId(0);

    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for OutputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    /// Position in the compositor space.
    pub x: i32,
    pub y: i32,

    /// Physical size in millimeters.
    pub physical_width: i32,
    pub physical_height: i32,

    pub make: Option<String>,
    pub model: Option<String>,
}

/// Everything learned about one output through its own object.
#[derive(Debug)]
pub struct OutputRecord<H> {
    id: OutputId,
    handle: H,
    pub name: Option<String>,
    pub description: Option<String>,
    pub scale: i32,
    pub geometry: Geometry,
}

impl<H> OutputRecord<H> {
    pub fn new(id: OutputId, handle: H) -> Self {
        Self {
            id,
            handle,
            name: None,
            description: None,
            scale: 1,
            geometry: Geometry::default(),
        }
    }

    pub fn id(&self) -> OutputId {
        self.id
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Drop owned strings, then give back the remote handle for release.
    pub(crate) fn into_handle(self) -> H {
        let Self {
            handle,
            name,
            description,
            geometry,
            ..
        } = self;

        drop(name);
        drop(description);
        drop(geometry);
        handle
    }
}

/// Logical metadata for an output, from the extended-output stream.
#[derive(Debug)]
pub struct ExtendedOutputRecord<X> {
    id: OutputId,
    handle: X,
    pub name: Option<String>,
    pub description: Option<String>,
    pub logical_position: (i32, i32),
    pub logical_size: (i32, i32),
}

impl<X> ExtendedOutputRecord<X> {
    pub fn new(id: OutputId, handle: X) -> Self {
        Self {
            id,
            handle,
            name: None,
            description: None,
            logical_position: (0, 0),
            logical_size: (0, 0),
        }
    }

    pub fn id(&self) -> OutputId {
        self.id
    }

    pub fn handle(&self) -> &X {
        &self.handle
    }

    pub(crate) fn into_handle(self) -> X {
        let Self {
            handle,
            name,
            description,
            ..
        } = self;

        drop(name);
        drop(description);
        handle
    }
}
