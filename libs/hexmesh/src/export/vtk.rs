//! VTK legacy ASCII unstructured grid writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::MeshResult;
use crate::mesh::{CellKind, Mesh};

/// VTK position of each Gmsh-ordered Hex27 node.
const VTK_FROM_GMSH_HEX27: [usize; 27] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 11, 13, 9, 16, 18, 19, 17, 10, 12, 14, 15, 22, 23, 21, 24, 20, 25,
    26,
];

/// VTK cell type id.
fn cell_type(kind: CellKind) -> u8 {
    match kind {
        CellKind::Quad4 => 9,
        CellKind::Hex8 => 12,
        CellKind::Hex27 => 29,
    }
}

/// Saves `mesh` as a legacy `.vtk` file.
pub fn save_vtk<P: AsRef<Path>>(mesh: &Mesh, path: P) -> MeshResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_vtk(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes `mesh` in VTK legacy ASCII format.
pub fn write_vtk<W: Write>(mesh: &Mesh, writer: &mut W) -> MeshResult<()> {
    let kind = mesh.kind();
    let arity = kind.arity();

    writeln!(writer, "# vtk DataFile Version 3.0")?;
    writeln!(writer, "hexmesh {kind} mesh")?;
    writeln!(writer, "ASCII")?;
    writeln!(writer, "DATASET UNSTRUCTURED_GRID")?;

    writeln!(writer, "POINTS {} double", mesh.point_count())?;
    for p in mesh.points() {
        writeln!(writer, "{} {} {}", p.x, p.y, p.z)?;
    }

    writeln!(writer, "CELLS {} {}", mesh.cell_count(), mesh.cell_count() * (arity + 1))?;
    for cell in mesh.cells() {
        write!(writer, "{arity}")?;
        match kind {
            CellKind::Hex27 => {
                for &slot in &VTK_FROM_GMSH_HEX27 {
                    write!(writer, " {}", cell[slot])?;
                }
            }
            CellKind::Quad4 | CellKind::Hex8 => {
                for id in cell {
                    write!(writer, " {id}")?;
                }
            }
        }
        writeln!(writer)?;
    }

    writeln!(writer, "CELL_TYPES {}", mesh.cell_count())?;
    let ty = cell_type(kind);
    for _ in 0..mesh.cell_count() {
        writeln!(writer, "{ty}")?;
    }
    Ok(())
}
