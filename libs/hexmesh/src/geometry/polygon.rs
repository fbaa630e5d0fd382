//! # Polygon Profile Kernel
//!
//! A built-in [`CadKernel`] for planar profiles made of straight-edged faces.
//!
//! Profiles are JSON documents listing each face as a loop of 3D vertices:
//!
//! ```json
//! { "faces": [ { "name": "body", "vertices": [[0,0,0], [10,0,0], [10,2,0], [0,2,0]] } ] }
//! ```
//!
//! Fragmenting clips every face against the cut line inside the face plane.
//! Boundary curves are the polygon edges; an edge shared by two faces is one
//! curve.

use std::collections::HashMap;
use std::path::Path;

use config::constants::{CLIP_AREA_FRACTION, EPSILON, KERNEL_VERTEX_DECIMALS};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::kernel::{CadKernel, CurveId, CutLine, KernelSession, SurfaceId};
use super::Aabb;
use crate::error::{MeshError, MeshResult};

// =============================================================================
// DOCUMENT
// =============================================================================

/// One planar face of a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileFace {
    /// Optional label, only used in diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Closed vertex loop (the last vertex connects back to the first).
    pub vertices: Vec<DVec3>,
}

impl ProfileFace {
    /// Creates an unnamed face.
    pub fn new(vertices: Vec<DVec3>) -> Self {
        Self {
            name: None,
            vertices,
        }
    }
}

/// A profile made of planar polygonal faces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileDocument {
    /// Faces of the profile.
    pub faces: Vec<ProfileFace>,
}

impl ProfileDocument {
    /// Creates a document from faces.
    pub fn new(faces: Vec<ProfileFace>) -> Self {
        Self { faces }
    }

    /// Reads and validates a JSON profile file.
    pub fn load(path: impl AsRef<Path>) -> MeshResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content).map_err(|e| match e {
            MeshError::Geometry { message } => {
                MeshError::geometry(format!("{}: {message}", path.display()))
            }
            other => other,
        })
    }

    /// Parses and validates a JSON profile document.
    pub fn from_json_str(content: &str) -> MeshResult<Self> {
        let doc: Self = serde_json::from_str(content)
            .map_err(|e| MeshError::geometry(format!("invalid profile document: {e}")))?;
        doc.validate()?;
        Ok(doc)
    }

    /// Serializes the document as pretty JSON.
    pub fn to_json_string(&self) -> MeshResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| MeshError::export(format!("failed to serialize profile: {e}")))
    }

    /// Checks that there is at least one face and every face is a polygon
    /// with finite coordinates.
    pub fn validate(&self) -> MeshResult<()> {
        if self.faces.is_empty() {
            return Err(MeshError::geometry("profile has no faces"));
        }
        for (i, face) in self.faces.iter().enumerate() {
            let label = face.name.clone().unwrap_or_else(|| format!("#{i}"));
            if face.vertices.len() < 3 {
                return Err(MeshError::geometry(format!(
                    "face {label} has {} vertices, need at least 3",
                    face.vertices.len()
                )));
            }
            if !face.vertices.iter().all(|v| v.is_finite()) {
                return Err(MeshError::geometry(format!(
                    "face {label} has non-finite coordinates"
                )));
            }
        }
        Ok(())
    }
}

// =============================================================================
// KERNEL
// =============================================================================

/// Kernel reading [`ProfileDocument`] JSON files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolygonKernel;

impl CadKernel for PolygonKernel {
    type Session = PolygonSession;

    fn open(&self, path: &Path) -> MeshResult<PolygonSession> {
        let doc = ProfileDocument::load(path)?;
        Ok(PolygonSession::with_source(doc, path.display().to_string()))
    }
}

/// An open polygon profile.
///
/// Closing is logged when the session is dropped.
#[derive(Debug)]
pub struct PolygonSession {
    source: String,
    faces: Vec<Vec<DVec3>>,
    curves: Vec<[DVec3; 2]>,
    face_curves: Vec<Vec<CurveId>>,
}

impl PolygonSession {
    /// Opens an in-memory document.
    pub fn from_document(doc: ProfileDocument) -> MeshResult<Self> {
        doc.validate()?;
        Ok(Self::with_source(doc, "<memory>".to_string()))
    }

    fn with_source(doc: ProfileDocument, source: String) -> Self {
        let faces: Vec<Vec<DVec3>> = doc.faces.into_iter().map(|f| f.vertices).collect();
        debug!(source = %source, faces = faces.len(), "opened profile session");
        let mut session = Self {
            source,
            faces,
            curves: Vec::new(),
            face_curves: Vec::new(),
        };
        session.rebuild_curves();
        session
    }

    /// Number of faces currently in the session.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Vertex loop of one face.
    pub fn face(&self, surface: SurfaceId) -> MeshResult<&[DVec3]> {
        self.faces
            .get(surface)
            .map(Vec::as_slice)
            .ok_or_else(|| MeshError::geometry(format!("unknown surface {surface}")))
    }

    fn curve(&self, curve: CurveId) -> MeshResult<&[DVec3; 2]> {
        self.curves
            .get(curve)
            .ok_or_else(|| MeshError::geometry(format!("unknown curve {curve}")))
    }

    fn rebuild_curves(&mut self) {
        let mut lookup: HashMap<([i64; 3], [i64; 3]), CurveId> = HashMap::new();
        self.curves.clear();
        self.face_curves.clear();
        for face in &self.faces {
            let mut ids = Vec::with_capacity(face.len());
            for (i, &a) in face.iter().enumerate() {
                let b = face[(i + 1) % face.len()];
                let (ka, kb) = (vertex_key(a), vertex_key(b));
                if ka == kb {
                    continue;
                }
                let key = if ka <= kb { (ka, kb) } else { (kb, ka) };
                let next_id = self.curves.len();
                let id = *lookup.entry(key).or_insert(next_id);
                if id == next_id {
                    self.curves.push([a, b]);
                }
                ids.push(id);
            }
            self.face_curves.push(ids);
        }
    }
}

impl Drop for PolygonSession {
    fn drop(&mut self) {
        debug!(source = %self.source, "closing profile session");
    }
}

impl KernelSession for PolygonSession {
    fn bounds(&self) -> MeshResult<Aabb> {
        Aabb::from_points(self.faces.iter().flatten().copied())
            .ok_or_else(|| MeshError::geometry("profile has no vertices"))
    }

    fn fragment(&mut self, cut: &CutLine) -> MeshResult<Vec<SurfaceId>> {
        let before = self.faces.len();
        let mut pieces = Vec::with_capacity(before * 2);
        for face in &self.faces {
            match split_face(face, cut) {
                Some((a, b)) => {
                    pieces.push(a);
                    pieces.push(b);
                }
                None => pieces.push(face.clone()),
            }
        }
        self.faces = pieces;
        self.rebuild_curves();
        debug!(before, after = self.faces.len(), "fragmented profile by cut line");
        Ok((0..self.faces.len()).collect())
    }

    fn surface_bounds(&self, surface: SurfaceId) -> MeshResult<Aabb> {
        let face = self.face(surface)?;
        Aabb::from_points(face.iter().copied())
            .ok_or_else(|| MeshError::geometry(format!("surface {surface} is empty")))
    }

    fn surface_center_of_mass(&self, surface: SurfaceId) -> MeshResult<DVec3> {
        Ok(polygon_centroid(self.face(surface)?))
    }

    fn boundary_curves(&self, surface: SurfaceId) -> MeshResult<Vec<CurveId>> {
        self.face_curves
            .get(surface)
            .cloned()
            .ok_or_else(|| MeshError::geometry(format!("unknown surface {surface}")))
    }

    fn curve_bounds(&self, curve: CurveId) -> MeshResult<Aabb> {
        let [a, b] = *self.curve(curve)?;
        Ok(Aabb::new(a, b))
    }

    fn curve_point(&self, curve: CurveId, t: f64) -> MeshResult<DVec3> {
        let [a, b] = *self.curve(curve)?;
        Ok(a.lerp(b, t.clamp(0.0, 1.0)))
    }
}

// =============================================================================
// POLYGON HELPERS
// =============================================================================

fn vertex_key(v: DVec3) -> [i64; 3] {
    let scale = 10f64.powi(KERNEL_VERTEX_DECIMALS);
    let q = |x: f64| (x * scale).round() as i64;
    [q(v.x), q(v.y), q(v.z)]
}

/// Newell normal; its length is twice the polygon area.
fn newell_normal(vertices: &[DVec3]) -> DVec3 {
    let n = vertices.len();
    (0..n).fold(DVec3::ZERO, |acc, i| {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        acc + DVec3::new(
            (a.y - b.y) * (a.z + b.z),
            (a.z - b.z) * (a.x + b.x),
            (a.x - b.x) * (a.y + b.y),
        )
    })
}

fn diameter(vertices: &[DVec3]) -> f64 {
    Aabb::from_points(vertices.iter().copied())
        .map(|b| b.extent().length())
        .unwrap_or(0.0)
}

fn polygon_centroid(vertices: &[DVec3]) -> DVec3 {
    let normal = newell_normal(vertices);
    let mean = vertices.iter().copied().sum::<DVec3>() / vertices.len().max(1) as f64;
    let Some(unit) = normal.try_normalize() else {
        return mean;
    };
    let origin = vertices[0];
    let (weighted, total) = vertices
        .windows(2)
        .skip(1)
        .fold((DVec3::ZERO, 0.0), |(sum, area), w| {
            let a = 0.5 * (w[0] - origin).cross(w[1] - origin).dot(unit);
            (sum + (origin + w[0] + w[1]) / 3.0 * a, area + a)
        });
    if total.abs() <= EPSILON {
        mean
    } else {
        weighted / total
    }
}

/// Splits a face along the cut line, or `None` when the line misses it.
fn split_face(face: &[DVec3], cut: &CutLine) -> Option<(Vec<DVec3>, Vec<DVec3>)> {
    let direction = cut.end - cut.start;
    let side = newell_normal(face).cross(direction).try_normalize()?;
    let scale = diameter(face);
    let tol = EPSILON * scale.max(1.0);
    let signed: Vec<f64> = face.iter().map(|&v| (v - cut.start).dot(side)).collect();

    if signed.iter().all(|&s| s >= -tol) || signed.iter().all(|&s| s <= tol) {
        return None;
    }

    let min_area = CLIP_AREA_FRACTION * scale * scale;
    let positive = clip(face, &signed, 1.0, tol);
    let negative = clip(face, &signed, -1.0, tol);
    let keep = |piece: &[DVec3]| piece.len() >= 3 && 0.5 * newell_normal(piece).length() > min_area;
    (keep(&positive) && keep(&negative)).then_some((positive, negative))
}

/// Sutherland-Hodgman against one half-plane (`sign * s >= -tol`).
fn clip(face: &[DVec3], signed: &[f64], sign: f64, tol: f64) -> Vec<DVec3> {
    let n = face.len();
    let mut out: Vec<DVec3> = Vec::with_capacity(n + 2);
    let push = |p: DVec3, out: &mut Vec<DVec3>| {
        if out.last().map_or(true, |q| q.distance(p) > tol) {
            out.push(p);
        }
    };
    for i in 0..n {
        let j = (i + 1) % n;
        let (sc, sn) = (sign * signed[i], sign * signed[j]);
        let (cur_in, next_in) = (sc >= -tol, sn >= -tol);
        if cur_in {
            push(face[i], &mut out);
        }
        if cur_in != next_in {
            let t = sc / (sc - sn);
            push(face[i] + (face[j] - face[i]) * t, &mut out);
        }
    }
    if out.len() > 1 && out[0].distance(out[out.len() - 1]) <= tol {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rectangle() -> ProfileDocument {
        ProfileDocument::new(vec![ProfileFace::new(vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(10.0, 0.0, 0.0),
            DVec3::new(10.0, 2.0, 0.0),
            DVec3::new(0.0, 2.0, 0.0),
        ])])
    }

    fn vertical_cut(x: f64) -> CutLine {
        CutLine {
            start: DVec3::new(x, -1.0, 0.0),
            end: DVec3::new(x, 3.0, 0.0),
        }
    }

    #[test]
    fn test_parse_document() {
        let json = r#"{"faces":[{"name":"body","vertices":[[0,0,0],[1,0,0],[1,1,0]]}]}"#;
        let doc = ProfileDocument::from_json_str(json).unwrap();
        assert_eq!(doc.faces.len(), 1);
        assert_eq!(doc.faces[0].name.as_deref(), Some("body"));
        assert_eq!(doc.faces[0].vertices[1], DVec3::X);
    }

    #[test]
    fn test_rejects_degenerate_documents() {
        assert!(ProfileDocument::from_json_str(r#"{"faces":[]}"#).is_err());
        let two = r#"{"faces":[{"vertices":[[0,0,0],[1,0,0]]}]}"#;
        assert!(matches!(
            ProfileDocument::from_json_str(two),
            Err(MeshError::Geometry { .. })
        ));
        assert!(ProfileDocument::from_json_str("not json").is_err());
    }

    #[test]
    fn test_bounds_and_curves() {
        let session = PolygonSession::from_document(rectangle()).unwrap();
        let bounds = session.bounds().unwrap();
        assert_eq!(bounds.max, DVec3::new(10.0, 2.0, 0.0));
        assert_eq!(session.boundary_curves(0).unwrap().len(), 4);
        assert_eq!(session.curve_point(0, 0.5).unwrap(), DVec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_fragment_splits_face_in_two() {
        let mut session = PolygonSession::from_document(rectangle()).unwrap();
        let surfaces = session.fragment(&vertical_cut(1.0)).unwrap();
        assert_eq!(surfaces.len(), 2);

        let mut widths: Vec<f64> = surfaces
            .iter()
            .map(|&s| session.surface_bounds(s).unwrap().extent().x)
            .collect();
        widths.sort_by(f64::total_cmp);
        assert_relative_eq!(widths[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(widths[1], 9.0, epsilon = 1e-12);

        // 4 + 4 edges, the cut edge is shared.
        let total: usize = surfaces
            .iter()
            .map(|&s| session.boundary_curves(s).unwrap().len())
            .sum();
        assert_eq!(total, 8);
        assert_eq!(session.curves.len(), 7);
    }

    #[test]
    fn test_fragment_outside_keeps_face() {
        let mut session = PolygonSession::from_document(rectangle()).unwrap();
        let surfaces = session.fragment(&vertical_cut(20.0)).unwrap();
        assert_eq!(surfaces.len(), 1);
        assert_eq!(session.face(0).unwrap().len(), 4);
    }

    #[test]
    fn test_center_of_mass() {
        let session = PolygonSession::from_document(rectangle()).unwrap();
        let com = session.surface_center_of_mass(0).unwrap();
        assert_relative_eq!(com.x, 5.0, epsilon = 1e-12);
        assert_relative_eq!(com.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_kernel_open_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, rectangle().to_json_string().unwrap()).unwrap();
        let session = PolygonKernel.open(&path).unwrap();
        assert_eq!(session.face_count(), 1);

        let missing = PolygonKernel.open(&dir.path().join("missing.json"));
        assert!(matches!(missing, Err(MeshError::Io(_))));
    }
}
