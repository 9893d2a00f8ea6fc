use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use matrix_scene::scene::{compute_normals, Animator, Channel, MeshData, Node, Scene};
use std::f32::consts::PI;
use std::sync::Arc;

/// Latitude/longitude sphere with `segments` x `segments` quads
fn sphere(segments: u32) -> (Vec<[f32; 3]>, Vec<u32>) {
    let mut positions = Vec::new();
    for lat in 0..=segments {
        let phi = lat as f32 / segments as f32 * PI;
        for lon in 0..=segments {
            let theta = lon as f32 / segments as f32 * 2.0 * PI;
            positions.push([phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin()]);
        }
    }

    let row = segments + 1;
    let mut indices = Vec::new();
    for lat in 0..segments {
        for lon in 0..segments {
            let a = lat * row + lon;
            let b = a + row;
            indices.extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }
    (positions, indices)
}

fn bench_mesh_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh_build");
    for segments in [16u32, 64, 128] {
        let (positions, indices) = sphere(segments);
        group.bench_with_input(BenchmarkId::new("normals", segments), &segments, |b, _| {
            b.iter(|| black_box(compute_normals(&positions, &indices)))
        });

        let mesh = MeshData::new(positions.clone(), None, None, Some(indices.clone()));
        group.bench_with_input(BenchmarkId::new("wireframe", segments), &segments, |b, _| {
            b.iter(|| black_box(mesh.wireframe_indices()))
        });
    }
    group.finish();
}

/// Groups of mesh children, like the pill halves hanging from their group
fn populated_scene(groups: usize) -> (Scene, Vec<matrix_scene::scene::NodeId>) {
    let (positions, indices) = sphere(8);
    let mesh = Arc::new(MeshData::new(positions, None, None, Some(indices)));
    let mut scene = Scene::new();
    let mut ids = Vec::with_capacity(groups);

    for i in 0..groups {
        let group = scene.spawn(Node::group(format!("group{}", i)));
        scene.add(group);
        for half in 0..2 {
            let child = scene.spawn(Node::mesh(format!("half{}", half), Arc::clone(&mesh)));
            scene.add_child(group, child);
        }
        ids.push(group);
    }
    (scene, ids)
}

fn bench_scene_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_traversal");
    for size in [10usize, 100, 1000] {
        let (scene, _) = populated_scene(size);
        group.bench_with_input(BenchmarkId::new("renderables", size), &size, |b, _| {
            b.iter(|| black_box(scene.renderables()))
        });
    }
    group.finish();
}

fn bench_tweens(c: &mut Criterion) {
    let (mut scene, groups) = populated_scene(100);
    let mut animator = Animator::new();
    for id in &groups {
        animator.animate_loop(&scene, *id, Channel::RotationX, PI * 2.5, 2.0);
        animator.animate_loop(&scene, *id, Channel::RotationZ, PI * 2.0, 5.0);
    }

    c.bench_function("advance_200_tweens", |b| {
        b.iter(|| animator.advance(&mut scene, black_box(1.0 / 60.0)))
    });
}

criterion_group!(benches, bench_mesh_build, bench_scene_traversal, bench_tweens);
criterion_main!(benches);
