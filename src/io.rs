//! Minimal stand-ins for an external parser and writer. Deliberately not
//! a DEF/LEF toolchain — they exist so the workspace is runnable end to
//! end without one.
//!
//! Line-oriented grammar:
//! ```text
//! CORE lbx lby ubx uby
//! TRACK x pitch offset
//! TRACK y pitch offset
//! PIN <id> <sink-x> <sink-y>   # repeat a PIN line per sink; omit sinks for a floating pin
//! PIN <id>                    # zero-sink pin
//! ```

use std::path::Path;

use crate::config::Parameters;
use crate::error::{PlacementError, Result};
use crate::geometry::{Core, Coordinate, Orientation};
use crate::netlist::{InstancePin, IoPin, Netlist};

pub struct ParsedDesign {
    pub core: Core,
    pub netlist: Netlist,
}

/// Parses the tiny line-oriented stand-in format described above.
pub fn parse_def(path: &Path) -> Result<ParsedDesign> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| PlacementError::ParseFailure(format!("cannot read {}: {e}", path.display())))?;

    let mut lb = None;
    let mut ub = None;
    let mut pitch_x = None;
    let mut pitch_y = None;
    let mut offset_x = None;
    let mut offset_y = None;
    let mut pins: Vec<IoPin> = Vec::new();

    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let tok: Vec<&str> = line.split_whitespace().collect();
        let bad = || {
            PlacementError::ParseFailure(format!("line {}: malformed token(s): {raw}", lineno + 1))
        };
        match tok.as_slice() {
            ["CORE", lbx, lby, ubx, uby] => {
                lb = Some(Coordinate::new(
                    lbx.parse().map_err(|_| bad())?,
                    lby.parse().map_err(|_| bad())?,
                ));
                ub = Some(Coordinate::new(
                    ubx.parse().map_err(|_| bad())?,
                    uby.parse().map_err(|_| bad())?,
                ));
            }
            ["TRACK", "x", pitch, offset] => {
                pitch_x = Some(pitch.parse().map_err(|_| bad())?);
                offset_x = Some(offset.parse().map_err(|_| bad())?);
            }
            ["TRACK", "y", pitch, offset] => {
                pitch_y = Some(pitch.parse().map_err(|_| bad())?);
                offset_y = Some(offset.parse().map_err(|_| bad())?);
            }
            ["PIN", id] => {
                let id: usize = id.parse().map_err(|_| bad())?;
                pins.push(IoPin::new(id, Vec::new()));
            }
            ["PIN", id, x, y] => {
                let id: usize = id.parse().map_err(|_| bad())?;
                let sink = InstancePin(Coordinate::new(
                    x.parse().map_err(|_| bad())?,
                    y.parse().map_err(|_| bad())?,
                ));
                match pins.iter_mut().find(|p| p.id == id) {
                    Some(p) => p.sinks.push(sink),
                    None => pins.push(IoPin::new(id, vec![sink])),
                }
            }
            _ => return Err(bad()),
        }
    }

    let (lb, ub) = match (lb, ub) {
        (Some(lb), Some(ub)) => (lb, ub),
        _ => return Err(PlacementError::ParseFailure("missing CORE line".into())),
    };
    let core = Core::new(
        lb,
        ub,
        pitch_x.unwrap_or(1),
        pitch_y.unwrap_or(1),
        offset_x.unwrap_or(0),
        offset_y.unwrap_or(0),
    )?;

    let mut netlist = Netlist::new();
    for pin in pins {
        netlist.add(pin);
    }

    Ok(ParsedDesign { core, netlist })
}

fn orientation_str(o: Orientation) -> &'static str {
    match o {
        Orientation::North => "N",
        Orientation::South => "S",
        Orientation::East => "E",
        Orientation::West => "W",
    }
}

/// Stands in for `WriterIOPins`: emits the final assignment in the same
/// line-oriented format, with the computed layer name recorded per pin
/// axis (horizontal-layer pins run on `verticalMetalLayer` tracks and
/// vice versa is an original-tool detail the core does not model; here
/// every pin just carries both layer names for the writer to pick from).
pub fn write_report(
    out_path: &Path,
    assignment: &[IoPin],
    parms: &Parameters,
) -> Result<()> {
    let mut out = String::new();
    out.push_str(&format!(
        "# layers: horizontal={} vertical={}\n",
        parms.horizontal_metal_layer_name(),
        parms.vertical_metal_layer_name()
    ));
    for pin in assignment {
        let pos = pin
            .pos
            .ok_or_else(|| PlacementError::ParseFailure(format!("pin {} has no position", pin.id)))?;
        let orient = pin
            .orientation
            .ok_or_else(|| PlacementError::ParseFailure(format!("pin {} has no orientation", pin.id)))?;
        out.push_str(&format!(
            "PIN {} {} {} {}\n",
            pin.id,
            pos.x,
            pos.y,
            orientation_str(orient)
        ));
    }
    std::fs::write(out_path, out)
        .map_err(|e| PlacementError::ParseFailure(format!("cannot write {}: {e}", out_path.display())))
}
