use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glyphraster::bench::{EdgeFunctionRasterizer, FrameBuffer, ScreenVertex, Triangle};
use glyphraster::math::vec2::IVec2;
use glyphraster::math::vec3::Vec3;
use glyphraster::{DepthMode, Mesh, RecordingDisplay, Renderer};

const GRID_WIDTH: u32 = 200;
const GRID_HEIGHT: u32 = 100;

fn triangle(points: [(i32, i32); 3]) -> Triangle {
    Triangle::new(points.map(|p| ScreenVertex::new(IVec2::from(p), 4.0, Vec3::FORWARD)))
}

fn small_triangle() -> Triangle {
    triangle([(10, 10), (20, 10), (10, 20)])
}

fn medium_triangle() -> Triangle {
    triangle([(10, 10), (90, 10), (10, 80)])
}

fn large_triangle() -> Triangle {
    triangle([(0, 0), (199, 0), (0, 99)])
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");
    let edge_fn = EdgeFunctionRasterizer::default();

    for mode in [DepthMode::DrawOrder, DepthMode::Nearest] {
        for (name, tri) in [
            ("small", small_triangle()),
            ("medium", medium_triangle()),
            ("large", large_triangle()),
        ] {
            group.bench_with_input(BenchmarkId::new(mode.to_string(), name), &tri, |b, tri| {
                let mut fb = FrameBuffer::new(GRID_WIDTH, GRID_HEIGHT, mode);
                b.iter(|| {
                    fb.clear();
                    edge_fn.fill_triangle(black_box(tri), &mut fb)
                });
            });
        }
    }

    group.finish();
}

fn benchmark_cube_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("cube_frame");

    for size in [50u32, 100, 200] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut renderer = Renderer::new(size, size, RecordingDisplay::new()).unwrap();
            renderer.create_projection_matrix(45f32.to_radians(), 0.01, 1000.0);
            renderer.create_view_matrix(0.0, 0.0, 5.0);
            let mut cube = Mesh::cube();
            cube.scale_by(Vec3::new(1.0, 0.8, 0.6));

            b.iter(|| {
                renderer.begin().unwrap();
                cube.rotate(Vec3::new(0.15, 0.25, 0.35));
                renderer.draw_mesh(black_box(&cube));
                renderer.display_mut().frames.clear();
                renderer.render().unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_single_triangle, benchmark_cube_frame);
criterion_main!(benches);
