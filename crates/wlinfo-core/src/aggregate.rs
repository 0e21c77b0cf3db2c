// Author: Dustin Pilgrim
// License: MIT

//! Per-output aggregation of field updates.
//!
//! Each aggregator owns a [`RecordStore`] whose index equals the record's
//! [`OutputId`]. Updates overwrite the targeted field; nothing accumulates.

use crate::error::StoreError;
use crate::event::{ExtendedOutputEvent, OutputEvent};
use crate::record::{ExtendedOutputRecord, OutputId, OutputRecord};
use crate::store::RecordStore;

#[derive(Debug)]
pub struct OutputAggregator<H> {
    records: RecordStore<OutputRecord<H>>,
    next_id: OutputId,
}

impl<H> OutputAggregator<H> {
    pub fn new() -> Result<Self, StoreError> {
        Ok(Self {
            records: RecordStore::new()?,
            next_id: OutputId::FIRST,
        })
    }

    /// Id the next inserted record will receive.
    pub fn next_id(&self) -> OutputId {
        self.next_id
    }

    pub fn insert(&mut self, handle: H) -> Result<OutputId, StoreError> {
        let id = self.next_id;
        self.records.push(OutputRecord::new(id, handle))?;
        self.next_id = id.next();
        Ok(id)
    }

    pub fn get(&self, id: OutputId) -> Option<&OutputRecord<H>> {
        self.records.get(self.locate(id)?)
    }

    fn locate(&self, id: OutputId) -> Option<usize> {
        match self.records.get(id.index()) {
            Some(r) if r.id() == id => Some(id.index()),
            _ => self.records.position(|r| r.id() == id).map(|s| s.index()),
        }
    }

    /// Apply one update. Returns `false` when no record carries `id`.
    pub fn apply(&mut self, id: OutputId, event: OutputEvent) -> bool {
        let Some(record) = self.locate(id).and_then(|i| self.records.get_mut(i)) else {
            return false;
        };

        match event {
            OutputEvent::Name(name) => record.name = Some(name),
            OutputEvent::Description(description) => record.description = Some(description),
            OutputEvent::Scale(factor) => record.scale = factor,
            OutputEvent::Geometry {
                x,
                y,
                physical_width,
                physical_height,
                make,
                model,
                ..
            } => {
                let g = &mut record.geometry;
                g.x = x;
                g.y = y;
                g.physical_width = physical_width;
                g.physical_height = physical_height;
                g.make = Some(make);
                g.model = Some(model);
            }
            OutputEvent::Mode | OutputEvent::Done => {}
        }

        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutputRecord<H>> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Tear down every record in store order, handing each remote handle to `release`.
    pub fn free<F>(self, mut release: F)
    where
        F: FnMut(H),
    {
        self.records.free(|record| release(record.into_handle()));
    }
}

#[derive(Debug)]
pub struct ExtendedAggregator<X> {
    records: RecordStore<ExtendedOutputRecord<X>>,
}

impl<X> ExtendedAggregator<X> {
    pub fn new() -> Result<Self, StoreError> {
        Ok(Self {
            records: RecordStore::new()?,
        })
    }

    /// Store the extended record for output `id`.
    ///
    /// The caller must only pass ids of outputs that already exist.
    pub fn insert(&mut self, id: OutputId, handle: X) -> Result<(), StoreError> {
        self.records.push(ExtendedOutputRecord::new(id, handle))?;
        Ok(())
    }

    /// Index-aligned lookup, falling back to a scan if the stores diverged.
    pub fn get(&self, id: OutputId) -> Option<&ExtendedOutputRecord<X>> {
        self.records.get(self.locate(id)?)
    }

    fn locate(&self, id: OutputId) -> Option<usize> {
        match self.records.get(id.index()) {
            Some(r) if r.id() == id => Some(id.index()),
            _ => self.records.position(|r| r.id() == id).map(|s| s.index()),
        }
    }

    pub fn apply(&mut self, id: OutputId, event: ExtendedOutputEvent) -> bool {
        let Some(record) = self.locate(id).and_then(|i| self.records.get_mut(i)) else {
            return false;
        };

        match event {
            ExtendedOutputEvent::Name(name) => record.name = Some(name),
            ExtendedOutputEvent::Description(description) => {
                record.description = Some(description)
            }
            ExtendedOutputEvent::LogicalPosition { x, y } => record.logical_position = (x, y),
            ExtendedOutputEvent::LogicalSize { width, height } => {
                record.logical_size = (width, height)
            }
            ExtendedOutputEvent::Done => {}
        }

        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtendedOutputRecord<X>> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn free<F>(self, mut release: F)
    where
        F: FnMut(X),
    {
        self.records.free(|record| release(record.into_handle()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn geometry(make: &str, model: &str, x: i32) -> OutputEvent {
        OutputEvent::Geometry {
            x,
            y: 0,
            physical_width: 600,
            physical_height: 340,
            subpixel: 0,
            make: make.into(),
            model: model.into(),
            transform: 0,
        }
    }

    #[test]
    fn ids_follow_insertion_order() {
        let mut agg = OutputAggregator::new().unwrap();
        let ids: Vec<_> = ["a", "b", "c"]
            .into_iter()
            .map(|h| agg.insert(h).unwrap())
            .collect();

        assert_eq!(ids, vec![OutputId::new(0), OutputId::new(1), OutputId::new(2)]);
        assert_eq!(agg.next_id(), OutputId::new(3));
        assert_eq!(agg.get(OutputId::new(1)).map(|r| *r.handle()), Some("b"));
    }

    #[test]
    fn fresh_record_has_defaults() {
        let mut agg = OutputAggregator::new().unwrap();
        let id = agg.insert(()).unwrap();
        let r = agg.get(id).unwrap();

        assert_eq!(r.name, None);
        assert_eq!(r.description, None);
        assert_eq!(r.scale, 1);
        assert_eq!(r.geometry, Default::default());
    }

    #[test]
    fn later_updates_replace_earlier_ones() {
        let mut agg = OutputAggregator::new().unwrap();
        let id = agg.insert(()).unwrap();

        assert!(agg.apply(id, OutputEvent::Name("DP-1".into())));
        assert!(agg.apply(id, OutputEvent::Name("DP-2".into())));
        assert!(agg.apply(id, OutputEvent::Scale(2)));
        assert!(agg.apply(id, geometry("Dell", "U2720Q", 0)));
        assert!(agg.apply(id, geometry("LG", "27GN950", 1920)));

        let r = agg.get(id).unwrap();
        assert_eq!(r.name.as_deref(), Some("DP-2"));
        assert_eq!(r.scale, 2);
        assert_eq!(r.geometry.x, 1920);
        assert_eq!(r.geometry.make.as_deref(), Some("LG"));
        assert_eq!(r.geometry.model.as_deref(), Some("27GN950"));
    }

    #[test]
    fn mode_and_done_leave_record_untouched() {
        let mut agg = OutputAggregator::new().unwrap();
        let id = agg.insert(()).unwrap();

        assert!(agg.apply(id, OutputEvent::Mode));
        assert!(agg.apply(id, OutputEvent::Done));
        assert_eq!(agg.get(id).unwrap().scale, 1);
    }

    #[test]
    fn unknown_id_is_rejected() {
        let mut agg: OutputAggregator<()> = OutputAggregator::new().unwrap();
        assert!(!agg.apply(OutputId::new(4), OutputEvent::Scale(3)));

        let mut ext: ExtendedAggregator<()> = ExtendedAggregator::new().unwrap();
        assert!(!ext.apply(OutputId::new(0), ExtendedOutputEvent::Done));
    }

    #[test]
    fn extended_updates_land_by_id() {
        let mut ext = ExtendedAggregator::new().unwrap();
        ext.insert(OutputId::new(0), 'a').unwrap();
        ext.insert(OutputId::new(1), 'b').unwrap();

        ext.apply(OutputId::new(1), ExtendedOutputEvent::LogicalSize { width: 2560, height: 1440 });
        ext.apply(OutputId::new(1), ExtendedOutputEvent::LogicalPosition { x: 1920, y: 0 });
        ext.apply(OutputId::new(0), ExtendedOutputEvent::Name("eDP-1".into()));

        let one = ext.get(OutputId::new(1)).unwrap();
        assert_eq!(*one.handle(), 'b');
        assert_eq!(one.logical_size, (2560, 1440));
        assert_eq!(one.logical_position, (1920, 0));
        assert_eq!(one.name, None);

        let zero = ext.get(OutputId::new(0)).unwrap();
        assert_eq!(zero.name.as_deref(), Some("eDP-1"));
        assert_eq!(zero.logical_size, (0, 0));
    }

    #[test]
    fn extended_lookup_survives_misaligned_store() {
        let mut ext = ExtendedAggregator::new().unwrap();
        ext.insert(OutputId::new(2), ()).unwrap();

        assert!(ext.apply(OutputId::new(2), ExtendedOutputEvent::Description("x".into())));
        assert_eq!(
            ext.get(OutputId::new(2)).and_then(|r| r.description.clone()),
            Some("x".to_string())
        );
        assert!(ext.get(OutputId::new(0)).is_none());
    }

    #[test]
    fn free_returns_handles_in_order() {
        let mut agg = OutputAggregator::new().unwrap();
        for h in [7, 8, 9] {
            agg.insert(h).unwrap();
        }

        let mut released = Vec::new();
        agg.free(|h| released.push(h));
        assert_eq!(released, vec![7, 8, 9]);
    }
}
