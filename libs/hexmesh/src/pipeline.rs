//! # Generation Pipeline
//!
//! Runs the stages in order and hands each mesh forward by value:
//!
//! ```text
//! analyze ─┬─ ring: orient → revolve → repair ───────────┬─ align → stitch → snap axis
//!          └─ core: o-grid → extrude → rotate → repair ──┘        │
//!                                                   permute → repair → export
//! ```

use std::path::{Path, PathBuf};

use config::constants::{
    ANGLE_TOLERANCE_DEG, MIN_CORE_REVOLVE_LAYERS, MIN_RADIAL_LAYERS, SUPPORTED_CORE_SWEEP_DEG,
};
use config::MeshGenConfig;
use tracing::{debug, info};

use crate::error::{MeshError, MeshResult};
use crate::export::{default_output_path, write_outputs, MeshFormat};
use crate::geometry::{
    analyze_geometry_and_split, AxisInfo, CadKernel, PolygonKernel, RingMesher, SplitResult,
};
use crate::mesh::Mesh;
use crate::ops::ogrid::{create_quarter_ogrid, extrude_core, interface_axial_positions, OGridParams};
use crate::ops::ring::{orient_quads_ccw, revolve_section, RevolveParams, StructuredRingMesher};
use crate::ops::stitch::{align_interface_layers, stitch_conformal, LayerAlignment, StitchReport};
use crate::ops::{fix_inverted_hexes, rotate_about_axial, snap_near_axis, AxisPermutation};

/// Statistics of one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    /// Interface radius between core and ring.
    pub r_core: f64,
    /// Coordinate roles detected in the profile.
    pub axes: AxisInfo,
    /// Axial node rows shared across the interface.
    pub interface_layers: usize,
    /// Hexahedra flipped after revolving the ring.
    pub ring_fixes: usize,
    /// Hexahedra flipped after extruding the core.
    pub core_fixes: usize,
    /// Hexahedra flipped after the output axis permutation.
    pub final_fixes: usize,
    /// Theta-layer pairing between core and ring.
    pub alignment: LayerAlignment,
    /// Interface node matching during the merge.
    pub stitch: StitchReport,
    /// Nodes snapped onto the axial axis.
    pub axis_snapped: usize,
    /// Nodes in the final mesh.
    pub nodes: usize,
    /// Hexahedra in the final mesh.
    pub elements: usize,
    /// Files written, empty for in-memory runs.
    pub written: Vec<PathBuf>,
}

/// Generates a mesh from a config file and a profile file with the built-in
/// polygon kernel and structured ring mesher.
///
/// `output` defaults to `output/<config-stem>_o_grid.vtk`.
///
/// # Errors
///
/// Any [`MeshError`]; nothing is written unless every stage succeeded.
pub fn generate(config_path: &Path, profile_path: &Path, output: Option<&Path>) -> MeshResult<GenerationReport> {
    let cfg = MeshGenConfig::load(config_path)?;
    let output = output.map_or_else(|| default_output_path(config_path), Path::to_path_buf);
    info!(
        config = %config_path.display(),
        profile = %profile_path.display(),
        output = %output.display(),
        "starting mesh generation"
    );
    let mesher = StructuredRingMesher::new(cfg.merge_decimals);
    generate_with(&cfg, &PolygonKernel, &mesher, profile_path, &output)
}

/// Generates and writes a mesh with injected collaborators.
pub fn generate_with<K, M>(
    cfg: &MeshGenConfig,
    kernel: &K,
    mesher: &M,
    profile_path: &Path,
    output: &Path,
) -> MeshResult<GenerationReport>
where
    K: CadKernel,
    M: RingMesher,
{
    ensure_supported(cfg)?;
    if MeshFormat::from_path(output).is_none() {
        return Err(MeshError::export(format!(
            "unsupported output path {} (expected .vtk or .msh)",
            output.display()
        )));
    }

    let split = analyze_geometry_and_split(kernel, mesher, profile_path, cfg)?;
    let (mesh, mut report) = build_mesh(cfg, &split)?;
    report.written = write_outputs(&mesh, output, cfg.element_order)?;
    Ok(report)
}

/// Rejects settings the structured core cannot honour before any work is done.
fn ensure_supported(cfg: &MeshGenConfig) -> MeshResult<()> {
    if cfg.element_order > 2 {
        return Err(MeshError::not_implemented(format!(
            "element order {} is not supported (use 1 or 2)",
            cfg.element_order
        )));
    }
    if (cfg.revolve_angle - SUPPORTED_CORE_SWEEP_DEG).abs() > ANGLE_TOLERANCE_DEG {
        return Err(MeshError::not_implemented(format!(
            "structured O-grid core supports only {SUPPORTED_CORE_SWEEP_DEG}° sweeps, got {}°",
            cfg.revolve_angle
        )));
    }
    // One angular division leaves the inner block without a lower edge.
    if cfg.revolve_layers < MIN_CORE_REVOLVE_LAYERS {
        return Err(MeshError::not_implemented(format!(
            "structured O-grid core needs at least {MIN_CORE_REVOLVE_LAYERS} angular layers, got {}",
            cfg.revolve_layers
        )));
    }
    Ok(())
}

/// Builds the final linear mesh from an analyzed profile without touching
/// the filesystem.
pub fn build_mesh(cfg: &MeshGenConfig, split: &SplitResult) -> MeshResult<(Mesh, GenerationReport)> {
    ensure_supported(cfg)?;
    let r_core = split.r_core;

    // Ring path.
    let mut section = split.ring_section();
    let reoriented = orient_quads_ccw(&mut section);
    let mut ring = revolve_section(
        &section,
        &RevolveParams {
            angle_deg: cfg.revolve_angle,
            layers: cfg.revolve_layers,
        },
    )?;
    let ring_fixes = fix_inverted_hexes(&mut ring, "ring_3d")?;
    debug!(reoriented, ring_fixes, "ring path done");

    // Core path.
    let a_interface = interface_axial_positions(&ring, r_core, cfg.interface_tolerance())?;
    info!(layers = a_interface.len(), "interface axial layers");

    let divisions = cfg.revolve_layers - 1;
    let n_lower = divisions / 2;
    let h_ref = split.a_top.eval(r_core) - split.a_bot.eval(r_core);
    let core_section = create_quarter_ogrid(&OGridParams {
        radius: r_core,
        n_lower,
        n_upper: divisions - n_lower,
        sweep_deg: cfg.revolve_angle,
        inner_ratio: cfg.core_inner_ratio,
        radial_layers: core_radial_layers(cfg, r_core),
        beta: cfg.radial_mapping_beta,
        flip_winding: h_ref > 0.0,
    });
    let mut core = extrude_core(&core_section.section, &a_interface, r_core, &split.a_bot, &split.a_top)?;
    if cfg.core_theta_offset_deg != 0.0 {
        rotate_about_axial(core.points_mut(), cfg.core_theta_offset_deg);
        debug!(degrees = cfg.core_theta_offset_deg, "rotated core");
    }
    let core_fixes = fix_inverted_hexes(&mut core, "core_3d")?;

    // Stitch.
    let tol_r = cfg.stitch_tolerance();
    let alignment = align_interface_layers(&mut core, &ring, r_core, cfg.revolve_angle, cfg.revolve_layers, tol_r);
    let (mut mesh, stitch) = stitch_conformal(core, ring, r_core, tol_r)?;
    let axis_snapped = snap_near_axis(mesh.points_mut(), cfg.axis_snap_tolerance());
    info!(
        matched = stitch.matched,
        unmatched = stitch.unmatched,
        axis_snapped,
        "stitch statistics"
    );

    // Output frame.
    let permutation = AxisPermutation::for_target(cfg.revolve_axis);
    permutation.apply(mesh.points_mut());
    let final_fixes = fix_inverted_hexes(&mut mesh, "final")?;

    info!(
        ring_fixes,
        core_fixes,
        final_fixes,
        nodes = mesh.point_count(),
        elements = mesh.cell_count(),
        "mesh generation complete"
    );
    let report = GenerationReport {
        r_core,
        axes: split.axes,
        interface_layers: a_interface.len(),
        ring_fixes,
        core_fixes,
        final_fixes,
        alignment,
        stitch,
        axis_snapped,
        nodes: mesh.point_count(),
        elements: mesh.cell_count(),
        written: Vec::new(),
    };
    Ok((mesh, report))
}

/// Explicit layer count, or enough layers to span the annulus at the target size.
fn core_radial_layers(cfg: &MeshGenConfig, r_core: f64) -> u32 {
    if cfg.core_radial_layers > 0 {
        return cfg.core_radial_layers;
    }
    let span = r_core * (1.0 - cfg.core_inner_ratio);
    MIN_RADIAL_LAYERS.max((span / cfg.mesh_size).ceil() as u32)
}
