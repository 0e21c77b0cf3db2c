// Author: Dustin Pilgrim
// License: MIT

use std::fmt::Write;

use wlinfo_core::{Global, Report};

fn or_none(s: &Option<String>) -> &str {
    s.as_deref().unwrap_or("(none)")
}

pub fn render_text(report: &Report) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    for o in &report.outputs {
        let _ = writeln!(out, "Name: {}", or_none(&o.name));
        let _ = writeln!(out, "Description: {}", or_none(&o.description));
        let _ = writeln!(out, "Scale: {}", o.scale);

        if let Some(x) = &o.extended {
            let _ = writeln!(out, "XDG Information:");
            let _ = writeln!(out, "\tName: {}", or_none(&x.name));
            let _ = writeln!(out, "\tDescription: {}", or_none(&x.description));
            let _ = writeln!(out, "\tLogical Size: ({}, {})", x.logical_width, x.logical_height);
            let _ = writeln!(out, "\tLogical Position: ({}, {})", x.logical_x, x.logical_y);
        }

        let g = &o.geometry;
        let _ = writeln!(out, "Geometry:");
        let _ = writeln!(out, "\tPosition: ({}, {})", g.x, g.y);
        let _ = writeln!(out, "\tSize: ({}mm, {}mm)", g.physical_width, g.physical_height);
        let _ = writeln!(out, "\tModel: {}", or_none(&g.model));
        let _ = writeln!(out, "\tMaker: {}", or_none(&g.make));
        out.push('\n');
    }

    let _ = writeln!(out, "Number of Outputs: {}", report.count());
    out
}

pub fn render_json(report: &Report) -> Result<String, String> {
    serde_json::to_string_pretty(report).map_err(|e| format!("encode report: {e}"))
}

pub fn render_globals(globals: &[Global]) -> String {
    let mut out = String::new();
    for g in globals {
        let _ = writeln!(out, "{} version {}", g.interface, g.version);
    }
    out
}

pub fn render_globals_json(globals: &[Global]) -> Result<String, String> {
    serde_json::to_string_pretty(globals).map_err(|e| format!("encode globals: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use wlinfo_core::{ExtendedReport, Geometry, OutputId, OutputReport};

    fn laptop() -> OutputReport {
        OutputReport {
            id: OutputId::new(0),
            name: Some("eDP-1".into()),
            description: Some("BOE 0x095F".into()),
            scale: 2,
            extended: Some(ExtendedReport {
                name: Some("eDP-1".into()),
                description: None,
                logical_width: 1440,
                logical_height: 900,
                logical_x: 0,
                logical_y: 0,
            }),
            geometry: Geometry {
                x: 0,
                y: 0,
                physical_width: 290,
                physical_height: 180,
                make: Some("BOE".into()),
                model: Some("0x095F".into()),
            },
        }
    }

    #[test]
    fn text_report_with_extended_block() {
        let report = Report {
            outputs: vec![laptop()],
        };

        let expected = "Name: eDP-1\n\
                        Description: BOE 0x095F\n\
                        Scale: 2\n\
                        XDG Information:\n\
                        \tName: eDP-1\n\
                        \tDescription: (none)\n\
                        \tLogical Size: (1440, 900)\n\
                        \tLogical Position: (0, 0)\n\
                        Geometry:\n\
                        \tPosition: (0, 0)\n\
                        \tSize: (290mm, 180mm)\n\
                        \tModel: 0x095F\n\
                        \tMaker: BOE\n\
                        \n\
                        Number of Outputs: 1\n";

        assert_eq!(render_text(&report), expected);
    }

    #[test]
    fn text_report_without_extended_block() {
        let mut o = laptop();
        o.extended = None;
        o.name = None;

        let text = render_text(&Report { outputs: vec![o] });
        assert!(text.starts_with("Name: (none)\n"));
        assert!(!text.contains("XDG Information"));
        assert!(text.ends_with("Number of Outputs: 1\n"));
    }

    #[test]
    fn empty_report_only_counts() {
        assert_eq!(render_text(&Report::default()), "Number of Outputs: 0\n");
    }

    #[test]
    fn json_report_shape() {
        let report = Report {
            outputs: vec![laptop()],
        };
        let json = render_json(&report).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(v["outputs"][0]["id"], 0);
        assert_eq!(v["outputs"][0]["extended"]["logical_width"], 1440);
        assert_eq!(v["outputs"][0]["geometry"]["make"], "BOE");
        assert!(v["outputs"][0]["extended"]["description"].is_null());
    }

    #[test]
    fn globals_listing() {
        let globals = vec![
            Global {
                name: 1,
                interface: "wl_compositor".into(),
                version: 6,
            },
            Global {
                name: 2,
                interface: "wl_output".into(),
                version: 4,
            },
        ];

        assert_eq!(
            render_globals(&globals),
            "wl_compositor version 6\nwl_output version 4\n"
        );
    }
}
