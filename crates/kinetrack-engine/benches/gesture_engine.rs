//! Benchmarks for focus selection and swipe classification.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use kinetrack_core::{BodyId, CameraPoint, JointLabel, ScreenPoint, TrackedBody, TrackingState};
use kinetrack_engine::sampler::{HandWindow, HandWindows};
use kinetrack_engine::{select_focus, GestureClassifier};

fn create_test_bodies(count: usize) -> Vec<TrackedBody> {
    (0..count)
        .map(|i| {
            TrackedBody::new(BodyId(i as u64))
                .with_joint(
                    JointLabel::SpineBase,
                    CameraPoint::new(0.1 * i as f32, 0.0, 1.0 + 0.3 * i as f32),
                    TrackingState::Tracked,
                )
                .with_joint(
                    JointLabel::RightHand,
                    CameraPoint::new(0.3, 0.2, 1.0 + 0.3 * i as f32),
                    TrackingState::Tracked,
                )
        })
        .collect()
}

fn benchmark_focus_selection(c: &mut Criterion) {
    let bodies_6 = create_test_bodies(6);
    let bodies_2 = create_test_bodies(2);

    c.bench_function("select_focus_6_bodies", |b| {
        b.iter(|| select_focus(black_box(&bodies_6)))
    });

    c.bench_function("select_focus_2_bodies", |b| {
        b.iter(|| select_focus(black_box(&bodies_2)))
    });
}

fn benchmark_classification(c: &mut Criterion) {
    let classifier = GestureClassifier::new(300.0, 300.0);

    let qualifying = HandWindows {
        right: HandWindow {
            last: ScreenPoint::new(100.0, 400.0),
            current: ScreenPoint::new(450.0, 400.0),
        },
        left: HandWindow::default(),
    };

    let steady = HandWindows::default();

    c.bench_function("classify_qualifying_tick", |b| {
        b.iter(|| classifier.classify(black_box(&qualifying)))
    });

    c.bench_function("classify_steady_tick", |b| {
        b.iter(|| classifier.classify(black_box(&steady)))
    });
}

criterion_group!(benches, benchmark_focus_selection, benchmark_classification);
criterion_main!(benches);
