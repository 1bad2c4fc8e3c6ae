//! End-to-end tests for the resize step driven through the public
//! pipeline contract.

use ndarray::{Array3, array};
use preproc_defense::prelude::*;

fn gradient_image(height: usize, width: usize, channels: usize) -> Array3<f32> {
    Array3::from_shape_fn((height, width, channels), |(y, x, c)| {
        ((y * width + x) * channels + c) as f32 / (height * width * channels) as f32
    })
}

#[test]
fn detection_batch_end_to_end() {
    let resizer = ImageResizer::new(ImageResizerConfig {
        height: 50,
        width: 50,
        label_kind: LabelKind::ObjectDetection,
        clip_values: Some((0.0, 1.0)),
        ..Default::default()
    })
    .unwrap();

    let batch = vec![gradient_image(100, 200, 3), gradient_image(40, 40, 3)];
    let labels = Labels::Detection(vec![
        DetectionTargets::new(array![[20.0, 10.0, 60.0, 40.0]])
            .with_extra("labels", array![7.0].into_dyn()),
        DetectionTargets::new(array![[0.0, 0.0, 40.0, 40.0], [10.0, 10.0, 20.0, 30.0]]),
    ]);

    let (out, labels_out) = resizer.transform(&batch, Some(&labels)).unwrap();

    assert_eq!(out.dim(), (2, 50, 50, 3));
    assert!(out.iter().all(|&v| (0.0..=1.0).contains(&v)));

    let records = match labels_out {
        Some(Labels::Detection(records)) => records,
        other => panic!("expected detection labels, got {other:?}"),
    };
    assert_eq!(records.len(), 2);
    // (H=100, W=200) -> (50, 50): x scaled by 1/4, y scaled by 1/2.
    assert_eq!(records[0].boxes, array![[5.0, 5.0, 15.0, 20.0]]);
    assert_eq!(records[0].extras["labels"], array![7.0].into_dyn());
    // (H=40, W=40) -> (50, 50): both axes scaled by 5/4.
    assert_eq!(
        records[1].boxes,
        array![[0.0, 0.0, 50.0, 50.0], [12.5, 12.5, 25.0, 37.5]]
    );
}

#[test]
fn classification_batch_through_trait_object() {
    let step: Box<dyn Preprocessor> = Box::new(
        ImageResizer::new(ImageResizerConfig {
            height: 16,
            width: 16,
            apply_fit: true,
            apply_predict: true,
            ..Default::default()
        })
        .unwrap(),
    );

    assert_eq!(step.name(), "ImageResize");
    assert!(step.is_fitted());
    assert!(step.applies_at(PipelineStage::Fit));
    assert!(step.applies_at(PipelineStage::Predict));

    let labels = Labels::Classification(array![[1.0, 0.0], [0.0, 1.0]].into_dyn());
    let batch = vec![gradient_image(32, 24, 3), gradient_image(8, 8, 3)];

    let (out, labels_out) = step.transform(&batch, Some(&labels)).unwrap();
    assert_eq!(out.dim(), (2, 16, 16, 3));
    assert_eq!(labels_out, Some(labels));
}

#[test]
fn skipped_stage_is_a_host_decision() {
    // The step itself transforms regardless of stage; the host consults
    // applies_at before calling it.
    let step = ImageResizer::new(ImageResizerConfig {
        height: 8,
        width: 8,
        apply_fit: false,
        apply_predict: true,
        ..Default::default()
    })
    .unwrap();

    assert!(!step.applies_at(PipelineStage::Fit));
    let (out, _) = step.transform(&[gradient_image(4, 4, 1)], None).unwrap();
    assert_eq!(out.dim(), (1, 8, 8, 1));
}
