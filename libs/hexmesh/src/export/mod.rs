//! # Mesh Export
//!
//! Element-order elevation and file serialization of the final mesh.
//!
//! ## Formats
//!
//! - **VTK** (`.vtk`): legacy ASCII unstructured grid
//! - **Gmsh** (`.msh`): MSH 2.2 ASCII
//!
//! The format is chosen from the file extension.
//!
//! ## Example
//!
//! ```rust
//! use hexmesh::export::MeshFormat;
//!
//! assert_eq!(MeshFormat::from_path("out/part.vtk"), Some(MeshFormat::Vtk));
//! assert_eq!(MeshFormat::from_path("part.MSH"), Some(MeshFormat::Gmsh));
//! assert_eq!(MeshFormat::from_path("part.stl"), None);
//! ```

mod elevate;
mod gmsh;
mod vtk;

#[cfg(test)]
mod tests;

pub use elevate::{elevate_to_hex27, HEX27_EDGES, HEX27_FACES};
pub use gmsh::{save_gmsh, write_gmsh};
pub use vtk::{save_vtk, write_vtk};

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// VTK legacy ASCII.
    Vtk,
    /// Gmsh MSH 2.2 ASCII.
    Gmsh,
}

impl MeshFormat {
    /// Detects the format from a file extension, case-insensitively.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "vtk" => Some(Self::Vtk),
            "msh" => Some(Self::Gmsh),
            _ => None,
        }
    }

    /// Canonical file extension.
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Vtk => "vtk",
            Self::Gmsh => "msh",
        }
    }
}

fn format_for(path: &Path) -> MeshResult<MeshFormat> {
    MeshFormat::from_path(path).ok_or_else(|| {
        MeshError::export(format!(
            "unsupported output extension '{}' (expected .vtk or .msh)",
            path.extension().and_then(|e| e.to_str()).unwrap_or("(none)")
        ))
    })
}

/// Returns the mesh at the requested element order.
///
/// # Errors
///
/// [`MeshError::NotImplemented`] for orders other than 1 and 2.
pub fn elevate_order(mesh: &Mesh, order: u32) -> MeshResult<Mesh> {
    match order {
        1 => Ok(mesh.clone()),
        2 => elevate_to_hex27(mesh),
        _ => Err(MeshError::not_implemented(format!(
            "element order {order} is not supported (use 1 or 2)"
        ))),
    }
}

/// Saves a mesh, detecting the format from the extension.
pub fn save_mesh<P: AsRef<Path>>(mesh: &Mesh, path: P) -> MeshResult<()> {
    let path = path.as_ref();
    match format_for(path)? {
        MeshFormat::Vtk => save_vtk(mesh, path),
        MeshFormat::Gmsh => save_gmsh(mesh, path),
    }
}

/// Writes the final mesh to `output` and, unless `output` already is a
/// `.msh` file, to a sibling `.msh` file. Parent directories are created.
///
/// Returns the written paths in order.
pub fn write_outputs(mesh: &Mesh, output: &Path, element_order: u32) -> MeshResult<Vec<PathBuf>> {
    let format = format_for(output)?;
    let mesh = elevate_order(mesh, element_order)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut written = vec![output.to_path_buf()];
    if format != MeshFormat::Gmsh {
        written.push(output.with_extension(MeshFormat::Gmsh.extension()));
    }
    for path in &written {
        save_mesh(&mesh, path)?;
        info!(
            path = %path.display(),
            kind = %mesh.kind(),
            nodes = mesh.point_count(),
            cells = mesh.cell_count(),
            "wrote mesh"
        );
    }
    Ok(written)
}

/// Default output location for a config file: `output/<stem>_o_grid.vtk`.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use hexmesh::export::default_output_path;
///
/// let out = default_output_path(Path::new("configs/shaft.yaml"));
/// assert_eq!(out, Path::new("output/shaft_o_grid.vtk"));
/// ```
pub fn default_output_path(config_path: &Path) -> PathBuf {
    let stem = config_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("mesh");
    Path::new("output").join(format!("{stem}_o_grid.{}", MeshFormat::Vtk.extension()))
}
