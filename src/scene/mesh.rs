use glam::Vec3;
use std::collections::BTreeSet;

/// Triangle geometry shared between a node and all of its clones
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Build a mesh, filling in missing normals and texture coordinates
    pub fn new(
        positions: Vec<[f32; 3]>,
        normals: Option<Vec<[f32; 3]>>,
        uvs: Option<Vec<[f32; 2]>>,
        indices: Option<Vec<u32>>,
    ) -> Self {
        let vertex_count = positions.len();
        let indices = indices.unwrap_or_else(|| (0..vertex_count as u32).collect());
        let normals = match normals {
            Some(n) if n.len() == vertex_count => n,
            _ => compute_normals(&positions, &indices),
        };
        let uvs = match uvs {
            Some(uv) if uv.len() == vertex_count => uv,
            _ => vec![[0.0, 0.0]; vertex_count],
        };

        Self {
            positions,
            normals,
            uvs,
            indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Append another mesh, rebasing its indices
    pub fn merge(&mut self, other: &MeshData) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Unique triangle edges as a line list, for wireframe drawing
    pub fn wireframe_indices(&self) -> Vec<u32> {
        let edges: BTreeSet<(u32, u32)> = self
            .indices
            .chunks_exact(3)
            .flat_map(|t| [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])])
            .map(|(a, b)| (a.min(b), a.max(b)))
            .collect();

        edges.into_iter().flat_map(|(a, b)| [a, b]).collect()
    }
}

/// Area-weighted smooth vertex normals
pub fn compute_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut accumulated = vec![Vec3::ZERO; positions.len()];

    for triangle in indices.chunks_exact(3) {
        let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let v0 = Vec3::from_array(positions[a]);
        let v1 = Vec3::from_array(positions[b]);
        let v2 = Vec3::from_array(positions[c]);
        let face = (v1 - v0).cross(v2 - v0);
        accumulated[a] += face;
        accumulated[b] += face;
        accumulated[c] += face;
    }

    accumulated
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y).to_array())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> MeshData {
        MeshData::new(
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 0.0, -1.0],
                [0.0, 0.0, -1.0],
            ],
            None,
            None,
            Some(vec![0, 1, 2, 0, 2, 3]),
        )
    }

    #[test]
    fn test_missing_normals_are_computed() {
        let mesh = quad();
        for normal in &mesh.normals {
            assert_eq!(*normal, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn test_missing_indices_become_triangle_list() {
        let mesh = MeshData::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            None,
            None,
            None,
        );
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.uvs.len(), 3);
    }

    #[test]
    fn test_wireframe_dedups_shared_edge() {
        let mesh = quad();
        // Two triangles share the 0-2 diagonal: 5 unique edges
        assert_eq!(mesh.wireframe_indices().len(), 10);
    }

    #[test]
    fn test_merge_rebases_indices() {
        let mut mesh = quad();
        mesh.merge(&quad());

        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(&mesh.indices[6..], &[4, 5, 6, 4, 6, 7]);
    }
}
