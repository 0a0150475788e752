use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::cloth::twist::Phase;
use crate::cloth::ClothMotion;
use crate::error::ClothError;
use crate::rotation::RotationSignal;

#[derive(Debug, Clone, Serialize)]
pub struct TraceRow {
    pub time: f32,
    pub angular_speed: f32,
    pub phase: Phase,
    pub twist: f32,
    pub energy: f32,
    pub relax: f32,
    pub radial_stretch: f32,
}

/// Collects the engine's scalar state frame by frame for later inspection.
#[derive(Debug, Clone, Default)]
pub struct TraceRecorder {
    name: String,
    rows: Vec<TraceRow>,
}

impl TraceRecorder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn record(&mut self, engine: &ClothMotion, signal: &RotationSignal) {
        let state = engine.state();
        self.rows.push(TraceRow {
            time: engine.simulation_time().0,
            angular_speed: *signal.angular_speed,
            phase: state.phase(),
            twist: state.twist,
            energy: state.oscillation.energy,
            relax: state.relax(),
            radial_stretch: engine.max_radial_stretch(),
        });
    }

    pub fn rows(&self) -> &[TraceRow] {
        &self.rows
    }

    /// Writes CSV or, for a `.json` path, a JSON array
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ClothError> {
        let path = path.as_ref();
        let mut file = File::create(path).map_err(ClothError::Trace)?;
        if path.extension().is_some_and(|extension| extension == "json") {
            let json = serde_json::to_string_pretty(&self.rows)
                .map_err(|error| ClothError::Trace(io::Error::other(error)))?;
            file.write_all(json.as_bytes()).map_err(ClothError::Trace)
        } else {
            self.write_csv(&mut file).map_err(ClothError::Trace)
        }
    }

    pub fn write_csv(&self, out: &mut impl Write) -> io::Result<()> {
        let now = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();
        writeln!(out, "# {}, Frames: {}, Created: {}", self.name, self.rows.len(), now)?;
        writeln!(out, "Time,AngularSpeed,Phase,Twist,Energy,Relax,RadialStretch")?;
        for row in &self.rows {
            writeln!(
                out,
                "{:.4},{:.4},{},{:.6},{:.6},{:.4},{:.4}",
                row.time, row.angular_speed, row.phase, row.twist, row.energy, row.relax, row.radial_stretch
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::GarmentMesh;
    use crate::units::FRAME_60;

    #[test]
    fn test_csv_layout() {
        let mut engine = ClothMotion::default();
        let mut mesh = GarmentMesh::skirt(3, 6, 1.0, 2.0);
        let mut trace = TraceRecorder::new("test");
        for signal in [RotationSignal::spinning(1.0), RotationSignal::still()] {
            engine.update(&mut mesh, &signal, FRAME_60);
            trace.record(&engine, &signal);
        }
        let mut out = Vec::new();
        trace.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("# test, Frames: 2"));
        assert!(lines[2].contains(",Driven,"));
        assert!(lines[3].contains(",Swinging,"));
    }
}
