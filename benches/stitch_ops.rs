//! Benchmarks for stitching operations.

use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::Point3;
use suture::algo::bridge::bridge_loops;
use suture::algo::relax::{relax_seam, RelaxOptions};
use suture::mesh::{EditMesh, VertexId};
use suture::session::EditSession;

/// Two parallel edge rings: a body ring of `n` vertices at z=0 and a face
/// ring of `n / 2` vertices at z=0.5.
fn create_ring_pair(n: usize) -> (EditMesh<u32>, Vec<VertexId<u32>>, Vec<VertexId<u32>>) {
    let mut mesh = EditMesh::new();

    let mut body = Vec::with_capacity(n);
    for i in 0..n {
        let a = i as f64 / n as f64 * std::f64::consts::TAU;
        body.push(mesh.add_vertex(Point3::new(a.cos(), a.sin(), 0.0)));
    }
    for i in 0..n {
        mesh.insert_edge_if_absent(body[i], body[(i + 1) % n]);
    }

    let m = n / 2;
    let mut face = Vec::with_capacity(m);
    for i in 0..m {
        let a = i as f64 / m as f64 * std::f64::consts::TAU;
        face.push(mesh.add_vertex(Point3::new(0.9 * a.cos(), 0.9 * a.sin(), 0.5)));
    }
    for i in 0..m {
        mesh.insert_edge_if_absent(face[i], face[(i + 1) % m]);
    }

    (mesh, body, face)
}

fn bench_bridge(c: &mut Criterion) {
    let (mesh, body, face) = create_ring_pair(512);

    c.bench_function("bridge_rings_512", |b| {
        b.iter(|| {
            let mut m = mesh.clone();
            let mut session = EditSession::new(&mut m);
            bridge_loops(&mut session, &body, &face)
        });
    });
}

fn bench_relax(c: &mut Criterion) {
    let (mut mesh, body, face) = create_ring_pair(512);

    // Bench over an already-stitched seam
    let mut session = EditSession::new(&mut mesh);
    bridge_loops(&mut session, &body, &face);
    drop(session);

    let seam: Vec<VertexId<u32>> = body.iter().chain(face.iter()).copied().collect();
    let options = RelaxOptions::default().sequential();

    c.bench_function("relax_seam_768x3", |b| {
        b.iter(|| {
            let mut m = mesh.clone();
            let mut session = EditSession::new(&mut m);
            relax_seam(&mut session, &seam, &options);
        });
    });
}

criterion_group!(benches, bench_bridge, bench_relax);
criterion_main!(benches);
