// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

use crate::record::{ExtendedOutputRecord, Geometry, OutputId, OutputRecord};

/// An output record paired with its extended record, if any.
#[derive(Debug)]
pub struct Joined<'a, H, X> {
    pub output: &'a OutputRecord<H>,
    pub extended: Option<&'a ExtendedOutputRecord<X>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedReport {
    pub name: Option<String>,
    pub description: Option<String>,
    pub logical_width: i32,
    pub logical_height: i32,
    pub logical_x: i32,
    pub logical_y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputReport {
    pub id: OutputId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub scale: i32,
    pub extended: Option<ExtendedReport>,
    pub geometry: Geometry,
}

/// Read-only snapshot of a finished run, detached from any remote handle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub outputs: Vec<OutputReport>,
}

impl Report {
    pub fn from_joined<'a, H: 'a, X: 'a, I>(joined: I) -> Self
    where
        I: IntoIterator<Item = Joined<'a, H, X>>,
    {
        let outputs = joined.into_iter().map(OutputReport::from).collect();
        Self { outputs }
    }

    pub fn count(&self) -> usize {
        self.outputs.len()
    }
}

impl<H, X> From<Joined<'_, H, X>> for OutputReport {
    fn from(j: Joined<'_, H, X>) -> Self {
        let o = j.output;

        Self {
            id: o.id(),
            name: o.name.clone(),
            description: o.description.clone(),
            scale: o.scale,
            extended: j.extended.map(|x| ExtendedReport {
                name: x.name.clone(),
                description: x.description.clone(),
                logical_width: x.logical_size.0,
                logical_height: x.logical_size.1,
                logical_x: x.logical_position.0,
                logical_y: x.logical_position.1,
            }),
            geometry: o.geometry.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn snapshot_copies_both_records() {
        let mut out = OutputRecord::new(OutputId::new(3), ());
        out.name = Some("DP-2".into());
        out.scale = 2;
        out.geometry.make = Some("BOE".into());

        let mut ext = ExtendedOutputRecord::new(OutputId::new(3), ());
        ext.logical_size = (1440, 900);
        ext.logical_position = (0, 1080);

        let report = Report::from_joined([
            Joined {
                output: &out,
                extended: Some(&ext),
            },
            Joined {
                output: &out,
                extended: None,
            },
        ]);

        assert_eq!(report.count(), 2);
        assert_eq!(
            report.outputs[0],
            OutputReport {
                id: OutputId::new(3),
                name: Some("DP-2".into()),
                description: None,
                scale: 2,
                extended: Some(ExtendedReport {
                    name: None,
                    description: None,
                    logical_width: 1440,
                    logical_height: 900,
                    logical_x: 0,
                    logical_y: 1080,
                }),
                geometry: Geometry {
                    make: Some("BOE".into()),
                    ..Geometry::default()
                },
            }
        );
        assert_eq!(report.outputs[1].extended, None);
    }
}
