use std::io::{self, Write};
use std::path::Path;

use crate::physics::vector::Vector3D;
use crate::sim::snapshot::HistoryEntry;

/// Write one body's trajectory window to CSV.
///
/// Columns: index, x, y, z (m), oldest point first.
pub fn write_trajectory<W: Write>(writer: &mut W, trajectory: &[Vector3D]) -> io::Result<()> {
    writeln!(writer, "index,x,y,z")?;
    for (i, p) in trajectory.iter().enumerate() {
        writeln!(writer, "{},{:.6e},{:.6e},{:.6e}", i, p.x, p.y, p.z)?;
    }
    Ok(())
}

/// Write the global step history to CSV, one row per body per step.
///
/// Columns: time, body, pos_x, pos_y, pos_z, vel_x, vel_y, vel_z,
///          acc_x, acc_y, acc_z
pub fn write_history<'a, W, I>(writer: &mut W, history: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a HistoryEntry>,
{
    writeln!(
        writer,
        "time,body,pos_x,pos_y,pos_z,vel_x,vel_y,vel_z,acc_x,acc_y,acc_z"
    )?;

    for entry in history {
        for b in &entry.bodies {
            writeln!(
                writer,
                "{:.1},{},{:.6e},{:.6e},{:.6e},{:.6e},{:.6e},{:.6e},{:.6e},{:.6e},{:.6e}",
                entry.time,
                b.name,
                b.position.x, b.position.y, b.position.z,
                b.velocity.x, b.velocity.y, b.velocity.z,
                b.acceleration.x, b.acceleration.y, b.acceleration.z,
            )?;
        }
    }

    Ok(())
}

/// Write the history CSV to a file at the given path.
pub fn write_history_file<'a, I>(path: impl AsRef<Path>, history: I) -> io::Result<()>
where
    I: IntoIterator<Item = &'a HistoryEntry>,
{
    let mut file = std::fs::File::create(path)?;
    write_history(&mut file, history)
}
