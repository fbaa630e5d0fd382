//! Quad winding canonicalization.

use tracing::debug;

use crate::mesh::QuadMesh2d;

/// Reverses every clockwise quad so all quads have positive signed area.
///
/// Returns the number of flipped quads. A second pass flips nothing.
pub fn orient_quads_ccw(section: &mut QuadMesh2d) -> usize {
    let mut flipped = 0;
    for i in 0..section.quads.len() {
        if section.signed_area2(&section.quads[i]) < 0.0 {
            let [a, b, c, d] = section.quads[i];
            section.quads[i] = [a, d, c, b];
            flipped += 1;
        }
    }
    if flipped > 0 {
        debug!(flipped, total = section.quads.len(), "flipped quads to CCW orientation");
    }
    flipped
}
