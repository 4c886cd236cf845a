use super::*;
use crate::test_utils::{blank_image, image_with_rect, paint_rect, png_bytes, DARK};

fn region(id: &str, x: i32, y: i32, width: u32, height: u32) -> ToolRegion {
    ToolRegion::new(id, Rect::new(x, y, width, height))
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_no_regions_gives_zero_confidence() {
    let img = blank_image(50, 50);
    let outcome = verify_presence_in(&img, &img, &[], &VerificationConfig::default()).unwrap();

    assert!(outcome.present_ids.is_empty());
    assert!(outcome.absent_ids.is_empty());
    assert_eq!(outcome.confidence_score, 0);
    assert_eq!(outcome.total(), 0);
    assert_eq!(outcome.completion_rate(), 100.0);
}

#[test]
fn test_tool_in_place_is_present() {
    let reference = blank_image(200, 200);
    let captured = image_with_rect(200, 200, 50, 50, 40, 40, DARK);

    let regions = [region("hammer", 50, 50, 40, 40)];
    let outcome =
        verify_presence_in(&captured, &reference, &regions, &VerificationConfig::default()).unwrap();

    assert_eq!(outcome.present_ids, vec!["hammer"]);
    assert!(outcome.absent_ids.is_empty());

    let report = &outcome.regions[0];
    assert_eq!(report.status, PresenceStatus::Present);
    // luma 255 vs 20
    assert!((report.average_difference - 235.0).abs() < 1e-9);
    assert!(report.contribution > 50.0);
    assert_eq!(report.contribution, 100.0);
    assert_eq!(outcome.confidence_score, 100);
}

#[test]
fn test_removed_tool_is_absent() {
    let reference = blank_image(200, 200);
    let captured = blank_image(200, 200);

    let regions = [region("wrench", 10, 10, 60, 20)];
    let outcome =
        verify_presence_in(&captured, &reference, &regions, &VerificationConfig::default()).unwrap();

    assert_eq!(outcome.absent_ids, vec!["wrench"]);
    assert_eq!(outcome.regions[0].status, PresenceStatus::Absent);
    assert_eq!(outcome.regions[0].average_difference, 0.0);
    assert_eq!(outcome.regions[0].contribution, 50.0);
    assert_eq!(outcome.confidence_score, 50);
    assert_eq!(outcome.missing_count(), 1);
    assert_eq!(outcome.completion_rate(), 0.0);
}

#[test]
fn test_mean_equal_to_threshold_is_absent() {
    let reference = blank_image(40, 40);
    let captured = image_with_rect(40, 40, 0, 0, 10, 10, [225, 225, 225, 255]);

    let regions = [region("a", 0, 0, 10, 10)];
    let outcome =
        verify_presence_in(&captured, &reference, &regions, &VerificationConfig::default()).unwrap();

    let report = &outcome.regions[0];
    assert!((report.average_difference - 30.0).abs() < 1e-9);
    assert_eq!(report.status, PresenceStatus::Absent);
    assert!(report.contribution.abs() < 1e-9);
}

#[test]
fn test_mixed_regions_partition_ids_in_input_order() {
    let reference = blank_image(300, 100);
    let mut captured = reference.clone();
    paint_rect(&mut captured, 10, 10, 50, 50, DARK);
    paint_rect(&mut captured, 210, 10, 50, 50, DARK);

    let regions = [
        region("r1", 10, 10, 50, 50),
        region("r2", 110, 10, 50, 50),
        region("r3", 210, 10, 50, 50),
        region("r4", 160, 60, 20, 20),
    ];
    let outcome =
        verify_presence_in(&captured, &reference, &regions, &VerificationConfig::default()).unwrap();

    assert_eq!(outcome.present_ids, vec!["r1", "r3"]);
    assert_eq!(outcome.absent_ids, vec!["r2", "r4"]);

    let ids: Vec<&str> = outcome.regions.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "r2", "r3", "r4"]);

    // (100 + 50 + 100 + 50) / 4
    assert_eq!(outcome.confidence_score, 75);
    assert_eq!(outcome.completion_rate(), 50.0);
}

#[test]
fn test_partially_visible_tool_scales_contribution() {
    let reference = blank_image(100, 100);
    // A quarter of the region darkened: mean 235 / 4 = 58.75.
    let captured = image_with_rect(100, 100, 0, 0, 10, 10, DARK);

    let regions = [region("a", 0, 0, 20, 20)];
    let outcome =
        verify_presence_in(&captured, &reference, &regions, &VerificationConfig::default()).unwrap();

    let report = &outcome.regions[0];
    assert!((report.average_difference - 58.75).abs() < 1e-9);
    assert_eq!(report.status, PresenceStatus::Present);
    assert!(report.contribution > 50.0 && report.contribution < 100.0);
    assert!((report.contribution - 58.75 / 30.0 * 50.0).abs() < 1e-9);
}

// ============================================================================
// Geometry edge cases
// ============================================================================

#[test]
fn test_region_outside_image_is_absent_with_zero_mean() {
    let img = image_with_rect(100, 100, 0, 0, 100, 100, DARK);
    let reference = blank_image(100, 100);

    let regions = [
        region("right", 150, 10, 20, 20),
        region("left", -50, 10, 20, 20),
        region("degenerate", 10, 10, 0, 20),
    ];
    let outcome =
        verify_presence_in(&img, &reference, &regions, &VerificationConfig::default()).unwrap();

    assert_eq!(outcome.absent_ids, vec!["right", "left", "degenerate"]);
    assert!(outcome.regions.iter().all(|r| r.average_difference == 0.0));
}

#[test]
fn test_region_is_clipped_to_image() {
    let reference = blank_image(100, 100);
    let captured = image_with_rect(100, 100, 90, 90, 10, 10, DARK);

    let regions = [region("corner", 90, 90, 40, 40)];
    let outcome =
        verify_presence_in(&captured, &reference, &regions, &VerificationConfig::default()).unwrap();

    // Only the in-bounds 10x10 part is averaged.
    assert!((outcome.regions[0].average_difference - 235.0).abs() < 1e-9);
    assert_eq!(outcome.present_ids, vec!["corner"]);
}

#[test]
fn test_bounds_scale_to_captured_size() {
    let reference = blank_image(400, 200);
    let captured = image_with_rect(800, 200, 200, 50, 100, 50, DARK);

    let regions = [region("a", 101, 50, 51, 50)];
    let outcome =
        verify_presence_in(&captured, &reference, &regions, &VerificationConfig::default()).unwrap();

    let report = &outcome.regions[0];
    assert_eq!(report.bounds, Rect::new(202, 50, 102, 50));
    assert_eq!(report.status, PresenceStatus::Present);
}

#[test]
fn test_downscaled_capture_floors_bounds() {
    let reference = blank_image(300, 300);
    let captured = blank_image(200, 200);

    let regions = [region("a", 100, 50, 31, 31)];
    let outcome =
        verify_presence_in(&captured, &reference, &regions, &VerificationConfig::default()).unwrap();

    // 2/3 scale: 66.67 -> 66, 33.33 -> 33, 20.67 -> 20
    assert_eq!(outcome.regions[0].bounds, Rect::new(66, 33, 20, 20));
    assert_eq!(outcome.absent_ids, vec!["a"]);
}

// ============================================================================
// Config and entry points
// ============================================================================

#[test]
fn test_non_positive_threshold_rejected() {
    let img = blank_image(10, 10);
    for threshold in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        let config = VerificationConfig::default().with_threshold(threshold);
        let result = verify_presence_in(&img, &img, &[], &config);
        assert!(
            matches!(result, Err(Error::InvalidConfig(_))),
            "threshold {threshold} accepted"
        );
    }
}

#[test]
fn test_lower_threshold_turns_faint_change_present() {
    let reference = blank_image(50, 50);
    let captured = image_with_rect(50, 50, 0, 0, 20, 20, [235, 235, 235, 255]);
    let regions = [region("a", 0, 0, 20, 20)];

    let strict = verify_presence_in(&captured, &reference, &regions, &VerificationConfig::default())
        .unwrap();
    assert_eq!(strict.absent_ids, vec!["a"]);

    let loose = VerificationConfig::default().with_threshold(10.0);
    let outcome = verify_presence_in(&captured, &reference, &regions, &loose).unwrap();
    assert_eq!(outcome.present_ids, vec!["a"]);
}

#[test]
fn test_encoded_entry_point_reports_roles() {
    let good = png_bytes(&blank_image(20, 20));
    let config = VerificationConfig::default();

    let err = verify_presence(b"nope", &good, &[], &config).unwrap_err();
    assert!(matches!(
        err,
        Error::Load {
            role: ImageRole::Captured,
            ..
        }
    ));

    let err = verify_presence(&good, b"nope", &[], &config).unwrap_err();
    assert!(matches!(
        err,
        Error::Load {
            role: ImageRole::Reference,
            ..
        }
    ));
}

#[test]
fn test_verification_is_idempotent() {
    let reference = blank_image(120, 80);
    let captured = image_with_rect(120, 80, 20, 20, 30, 30, DARK);
    let regions = [region("a", 20, 20, 30, 30), region("b", 70, 20, 30, 30)];
    let config = VerificationConfig::default();

    let first = verify_presence(&png_bytes(&captured), &png_bytes(&reference), &regions, &config)
        .unwrap();
    let second = verify_presence_in(&captured, &reference, &regions, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_outcome_serializes_snake_case_status() {
    let img = blank_image(10, 10);
    let outcome = verify_presence_in(
        &img,
        &img,
        &[region("a", 0, 0, 5, 5)],
        &VerificationConfig::default(),
    )
    .unwrap();

    let json = serde_json::to_string(&outcome).unwrap();
    assert!(json.contains("\"status\":\"absent\""));
    assert!(json.contains("\"confidence_score\":50"));
}
