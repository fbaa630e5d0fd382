//! Gmsh MSH 2.2 ASCII writer.
//!
//! Node and element ids are 1-based. Every element carries two tags
//! (physical and elementary entity), both 1.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::MeshResult;
use crate::mesh::{CellKind, Mesh};

/// Gmsh element type id.
fn element_type(kind: CellKind) -> u8 {
    match kind {
        CellKind::Quad4 => 3,
        CellKind::Hex8 => 5,
        CellKind::Hex27 => 12,
    }
}

/// Saves `mesh` as a `.msh` file.
pub fn save_gmsh<P: AsRef<Path>>(mesh: &Mesh, path: P) -> MeshResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_gmsh(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes `mesh` in Gmsh 2.2 ASCII format.
pub fn write_gmsh<W: Write>(mesh: &Mesh, writer: &mut W) -> MeshResult<()> {
    writeln!(writer, "$MeshFormat")?;
    writeln!(writer, "2.2 0 8")?;
    writeln!(writer, "$EndMeshFormat")?;

    writeln!(writer, "$Nodes")?;
    writeln!(writer, "{}", mesh.point_count())?;
    for (i, p) in mesh.points().iter().enumerate() {
        writeln!(writer, "{} {} {} {}", i + 1, p.x, p.y, p.z)?;
    }
    writeln!(writer, "$EndNodes")?;

    let ty = element_type(mesh.kind());
    writeln!(writer, "$Elements")?;
    writeln!(writer, "{}", mesh.cell_count())?;
    for (i, cell) in mesh.cells().enumerate() {
        write!(writer, "{} {ty} 2 1 1", i + 1)?;
        for &id in cell {
            write!(writer, " {}", u64::from(id) + 1)?;
        }
        writeln!(writer)?;
    }
    writeln!(writer, "$EndElements")?;
    Ok(())
}
