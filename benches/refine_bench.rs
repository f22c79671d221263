use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use quad_refine::algs::meshgen::{structured_quad_grid, MeshGenOptions};
use quad_refine::refine::{refine_quad_mesh, RefineOptions, RefineSession};

fn bench_refine(c: &mut Criterion) {
    let mut group = c.benchmark_group("refine");

    for &(n, density) in &[(32, 0.05), (64, 0.05), (128, 0.02)] {
        let mesh = structured_quad_grid(n, n, [0.0, 0.0], [1.0, 1.0], MeshGenOptions::default())
            .expect("grid");
        let mut rng = SmallRng::seed_from_u64(42);
        let marked: Vec<usize> = (0..mesh.num_elements())
            .filter(|_| rng.r#gen::<f64>() < density)
            .collect();

        group.bench_with_input(
            BenchmarkId::new("single_step", format!("{n}x{n}")),
            &(mesh, marked),
            |b, (mesh, marked)| {
                b.iter(|| refine_quad_mesh(mesh, marked, 0, RefineOptions::default()).unwrap())
            },
        );
    }

    // three adaptive steps around one corner, so triple-groups get refined too
    let mesh = structured_quad_grid(48, 48, [0.0, 0.0], [1.0, 1.0], MeshGenOptions::default())
        .expect("grid");
    group.bench_function("adaptive_corner_3_steps", |b| {
        b.iter(|| {
            let mut session = RefineSession::new();
            let mut current = mesh.clone();
            for _ in 0..3 {
                let marked: Vec<usize> = (0..current.num_elements())
                    .filter(|&e| {
                        let [x, y] = current.coordinates[current.elements[e][0]];
                        x < 0.2 && y < 0.2
                    })
                    .collect();
                current = session.refine(&current, &marked).unwrap().mesh;
            }
            current
        })
    });

    group.finish();
}

criterion_group!(benches, bench_refine);
criterion_main!(benches);
