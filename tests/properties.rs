mod common;

use common::synthetic_shapes::triangle_points;
use shape_combo::{CanvasSize, ComboError, ComboParams, ComboPipeline, Point, ShapeInput, ShapeRole};

fn skewed_pair() -> (ShapeInput, ShapeInput) {
    let (src, src_extent) = triangle_points(3, 2, 16);
    // target: rotated by 90 degrees, stretched, and shifted into negative x
    let tgt: Vec<Point> = src
        .iter()
        .map(|p| Point::new(-2 * p.y + 10, p.x + 5))
        .collect();
    (
        ShapeInput::new(src, src_extent),
        ShapeInput::new(tgt, CanvasSize::new(24, 30)),
    )
}

#[test]
fn canvas_dominates_images_and_aligned_extrema() {
    let (source, target) = skewed_pair();
    let report = ComboPipeline::default()
        .process_with_diagnostics(source.clone(), target.clone())
        .expect("run should succeed");
    let canvas = report.result.canvas;
    let ext = report.trace.aligned_extrema;
    assert!(canvas.width >= source.extent.width.max(target.extent.width));
    assert!(canvas.height >= source.extent.height.max(target.extent.height));
    assert!(canvas.width as f64 >= (ext.max[0] + 2.0).ceil());
    assert!(canvas.height as f64 >= (ext.max[1] + 2.0).ceil());
    assert_eq!(canvas.first_outside(&report.result.source_points), None);
    assert_eq!(canvas.first_outside(&report.result.target_points), None);
    assert_eq!(report.result.source_points.len(), source.points.len());
    assert_eq!(report.result.target_points.len(), target.points.len());
}

#[test]
fn identical_inputs_and_seed_give_identical_runs() {
    let params = ComboParams {
        fallback_samples: 25,
        seed: 42,
        ..Default::default()
    };
    let pipeline = ComboPipeline::new(params);
    let (source, target) = skewed_pair();
    let first = pipeline
        .process(source.clone(), target.clone())
        .expect("first run");
    let second = pipeline.process(source, target).expect("second run");
    assert_eq!(first.source_samples, second.source_samples);
    assert_eq!(first.target_samples, second.target_samples);
    assert_eq!(first.canvas, second.canvas);
}

#[test]
fn one_pipeline_serves_parallel_runs() {
    let pipeline = ComboPipeline::new(ComboParams {
        fallback_samples: 20,
        ..Default::default()
    });
    let (source, target) = skewed_pair();
    let serial = pipeline
        .process(source.clone(), target.clone())
        .expect("serial run");
    let results: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..3)
            .map(|_| {
                let (src, tgt) = (source.clone(), target.clone());
                let pipeline = &pipeline;
                s.spawn(move || pipeline.process(src, tgt))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("worker panicked"))
            .collect()
    });
    for res in results {
        let res = res.expect("parallel run");
        assert_eq!(res.source_samples, serial.source_samples);
        assert_eq!(res.target_samples, serial.target_samples);
    }
}

#[test]
fn nothing_to_sample_is_insufficient() {
    let params = ComboParams {
        fallback_samples: 0,
        ..Default::default()
    };
    let (src, extent) = triangle_points(2, 2, 10);
    let err = ComboPipeline::new(params)
        .process(
            ShapeInput::new(src.clone(), extent),
            ShapeInput::new(src, extent),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        ComboError::InsufficientSamples {
            role: ShapeRole::Source,
            ..
        }
    ));
}

#[test]
fn collinear_shape_is_degenerate() {
    let (src, extent) = triangle_points(0, 0, 8);
    let line: Vec<Point> = (0..8).map(|i| Point::new(i, i)).collect();
    let err = ComboPipeline::default()
        .process(ShapeInput::new(src, extent), ShapeInput::new(line, extent))
        .unwrap_err();
    assert!(matches!(
        err,
        ComboError::DegenerateGeometry {
            role: ShapeRole::Target,
            ..
        }
    ));
}
