// Author: Dustin Pilgrim
// License: MIT

//! Wayland side of the engine: wl_output plus xdg-output.
//!
//! Listener callbacks never touch records. They turn each protocol event
//! into a tagged [`Event`] and queue it; the engine drains the queue after
//! every roundtrip.

use wayland_client::{
    Connection, Dispatch, EventQueue, Proxy, QueueHandle,
    protocol::{wl_output, wl_registry},
};
use wayland_protocols::xdg::xdg_output::zv1::client::{zxdg_output_manager_v1, zxdg_output_v1};

use wlinfo_core::{
    Event, ExtendedOutputEvent, Global, OutputEvent, OutputId, Transport, TransportError,
};

/// Dispatch target for the event queue.
#[derive(Debug, Default)]
pub struct Collector {
    events: Vec<Event>,
}

pub struct WaylandTransport {
    _conn: Connection,
    queue: EventQueue<Collector>,
    qh: QueueHandle<Collector>,
    registry: wl_registry::WlRegistry,
    collector: Collector,
}

impl WaylandTransport {
    pub fn connect() -> Result<Self, String> {
        let conn = Connection::connect_to_env().map_err(|e| format!("wayland connect: {e}"))?;

        let queue = conn.new_event_queue();
        let qh = queue.handle();
        let registry = conn.display().get_registry(&qh, ());

        Ok(Self {
            _conn: conn,
            queue,
            qh,
            registry,
            collector: Collector::default(),
        })
    }
}

// Binding above what the generated bindings know is a protocol error.
fn clamp_version<I: Proxy>(advertised: u32) -> u32 {
    advertised.min(I::interface().version)
}

impl Transport for WaylandTransport {
    type Output = wl_output::WlOutput;
    type Manager = zxdg_output_manager_v1::ZxdgOutputManagerV1;
    type ExtendedOutput = zxdg_output_v1::ZxdgOutputV1;

    fn barrier(&mut self) -> Result<Vec<Event>, TransportError> {
        self.queue
            .roundtrip(&mut self.collector)
            .map_err(|e| format!("roundtrip: {e}"))?;

        Ok(std::mem::take(&mut self.collector.events))
    }

    fn bind_output(&mut self, global: &Global, id: OutputId) -> Result<Self::Output, TransportError> {
        let version = clamp_version::<wl_output::WlOutput>(global.version);
        eventline::debug!("bind wl_output name={} v{} as {}", global.name, version, id);

        Ok(self
            .registry
            .bind::<wl_output::WlOutput, _, _>(global.name, version, &self.qh, id))
    }

    fn bind_manager(&mut self, global: &Global) -> Result<Self::Manager, TransportError> {
        let version = clamp_version::<Self::Manager>(global.version);
        eventline::debug!("bind {} name={} v{}", global.interface, global.name, version);

        Ok(self
            .registry
            .bind::<Self::Manager, _, _>(global.name, version, &self.qh, ()))
    }

    fn extended_output(
        &mut self,
        manager: &Self::Manager,
        output: &Self::Output,
        id: OutputId,
    ) -> Result<Self::ExtendedOutput, TransportError> {
        Ok(manager.get_xdg_output(output, &self.qh, id))
    }

    fn release_output(&mut self, output: Self::Output) {
        // wl_output.release only exists from v3 on; older objects are just dropped.
        if output.version() >= 3 {
            output.release();
        }
    }

    fn release_extended_output(&mut self, output: Self::ExtendedOutput) {
        output.destroy();
    }

    fn release_manager(&mut self, manager: Self::Manager) {
        manager.destroy();
    }
}

impl Dispatch<wl_registry::WlRegistry, ()> for Collector {
    fn event(
        state: &mut Self,
        _registry: &wl_registry::WlRegistry,
        event: wl_registry::Event,
        _data: &(),
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
    ) {
        match event {
            wl_registry::Event::Global {
                name,
                interface,
                version,
            } => state.events.push(Event::Global(Global {
                name,
                interface,
                version,
            })),
            wl_registry::Event::GlobalRemove { name } => {
                state.events.push(Event::GlobalRemove { name })
            }
            _ => {}
        }
    }
}

impl Dispatch<wl_output::WlOutput, OutputId> for Collector {
    fn event(
        state: &mut Self,
        _output: &wl_output::WlOutput,
        event: wl_output::Event,
        id: &OutputId,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
    ) {
        let event = match event {
            wl_output::Event::Geometry {
                x,
                y,
                physical_width,
                physical_height,
                subpixel,
                make,
                model,
                transform,
            } => OutputEvent::Geometry {
                x,
                y,
                physical_width,
                physical_height,
                subpixel: u32::from(subpixel),
                make,
                model,
                transform: u32::from(transform),
            },
            wl_output::Event::Mode { .. } => OutputEvent::Mode,
            wl_output::Event::Done => OutputEvent::Done,
            wl_output::Event::Scale { factor } => OutputEvent::Scale(factor),
            wl_output::Event::Name { name } => OutputEvent::Name(name),
            wl_output::Event::Description { description } => OutputEvent::Description(description),
            _ => return,
        };

        state.events.push(Event::Output { id: *id, event });
    }
}

impl Dispatch<zxdg_output_manager_v1::ZxdgOutputManagerV1, ()> for Collector {
    fn event(
        _: &mut Self,
        _: &zxdg_output_manager_v1::ZxdgOutputManagerV1,
        _: zxdg_output_manager_v1::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
    }
}

impl Dispatch<zxdg_output_v1::ZxdgOutputV1, OutputId> for Collector {
    fn event(
        state: &mut Self,
        _output: &zxdg_output_v1::ZxdgOutputV1,
        event: zxdg_output_v1::Event,
        id: &OutputId,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
    ) {
        let event = match event {
            zxdg_output_v1::Event::LogicalPosition { x, y } => {
                ExtendedOutputEvent::LogicalPosition { x, y }
            }
            zxdg_output_v1::Event::LogicalSize { width, height } => {
                ExtendedOutputEvent::LogicalSize { width, height }
            }
            zxdg_output_v1::Event::Done => ExtendedOutputEvent::Done,
            zxdg_output_v1::Event::Name { name } => ExtendedOutputEvent::Name(name),
            zxdg_output_v1::Event::Description { description } => {
                ExtendedOutputEvent::Description(description)
            }
            _ => return,
        };

        state.events.push(Event::Extended { id: *id, event });
    }
}
