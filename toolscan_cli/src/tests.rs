use std::path::{Path, PathBuf};

use clap::Parser;
use toolscan::{Connectivity, Dimensions, DiscoveryConfig, ImageRole, PixelBuffer, ResizePolicy};

use crate::discover::{DiscoverArgs, PREVIEW_FILE, REGIONS_FILE};
use crate::verify::VerifyArgs;
use crate::{Cli, Command};

const WHITE: [u8; 4] = [255, 255, 255, 255];
const DARK: [u8; 4] = [25, 25, 25, 255];

fn scene(blocks: &[(u32, u32, u32, u32)]) -> PixelBuffer {
    PixelBuffer::from_fn(Dimensions::new(300, 200), |x, y| {
        let inside = blocks
            .iter()
            .any(|&(bx, by, bw, bh)| x >= bx && x < bx + bw && y >= by && y < by + bh);
        if inside {
            DARK
        } else {
            WHITE
        }
    })
}

fn fresh_dir(name: &str) -> PathBuf {
    let dir = common::test_utils::test_output_path(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_png(path: &Path, image: &PixelBuffer) {
    std::fs::write(path, image.encode_png().unwrap()).unwrap();
}

#[test]
fn test_discover_flags_override_settings() {
    let cli = Cli::try_parse_from([
        "toolscan",
        "discover",
        "--empty",
        "empty.png",
        "--full",
        "full.png",
        "--min-area",
        "50",
        "--connectivity",
        "four",
        "--resize",
    ])
    .unwrap();

    let Command::Discover(args) = cli.command else {
        panic!("expected discover");
    };
    let config = args.apply(&DiscoveryConfig::default().with_threshold(40));
    assert_eq!(config.min_area, 50);
    assert_eq!(config.threshold, 40);
    assert_eq!(config.connectivity, Connectivity::Four);
    assert_eq!(config.resize_policy, ResizePolicy::ResizeToFirst);
}

#[test]
fn test_font_requires_overlay() {
    let result = Cli::try_parse_from([
        "toolscan",
        "verify",
        "--captured",
        "c.jpg",
        "--reference",
        "r.png",
        "--regions",
        "regions.json",
        "--font",
        "font.ttf",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_global_config_flag_after_subcommand() {
    let cli = Cli::try_parse_from([
        "toolscan",
        "verify",
        "--captured",
        "c.jpg",
        "--reference",
        "r.png",
        "--regions",
        "regions.json",
        "--threshold",
        "12",
        "--config",
        "settings.toml",
    ])
    .unwrap();

    assert_eq!(cli.config, Some(PathBuf::from("settings.toml")));
    let Command::Verify(args) = cli.command else {
        panic!("expected verify");
    };
    assert_eq!(args.threshold, Some(12.0));
}

#[test]
fn test_discover_then_verify_round_trip() {
    let dir = fresh_dir("cli_round_trip");
    let out = dir.join("out");

    let empty_path = dir.join("empty.png");
    let full_path = dir.join("full.png");
    let captured_path = dir.join("captured.png");
    write_png(&empty_path, &scene(&[]));
    write_png(&full_path, &scene(&[(30, 30, 60, 40), (180, 100, 50, 50)]));
    // Second tool taken out.
    write_png(&captured_path, &scene(&[(30, 30, 60, 40)]));

    let discover_args = DiscoverArgs {
        empty: empty_path.clone(),
        full: full_path,
        out: out.clone(),
        min_area: None,
        threshold: None,
        connectivity: None,
        resize: false,
    };
    let regions = crate::discover::run(&discover_args, &DiscoveryConfig::default()).unwrap();

    assert_eq!(regions.len(), 2);
    assert_eq!(regions[0].id, "tool-1");
    assert_eq!(regions[1].id, "tool-2");
    assert!(out.join(REGIONS_FILE).exists());
    assert!(out.join(PREVIEW_FILE).exists());
    assert!(out.join("mask_1.png").exists());
    assert!(out.join("mask_2.png").exists());

    let overlay_path = dir.join("overlay.jpg");
    let verify_args = VerifyArgs {
        captured: captured_path,
        reference: empty_path,
        regions: out.join(REGIONS_FILE),
        threshold: None,
        overlay: Some(overlay_path.clone()),
        font: None,
    };
    let outcome = crate::verify::run(&verify_args, &Default::default()).unwrap();

    assert_eq!(outcome.present_ids, vec!["tool-1"]);
    assert_eq!(outcome.absent_ids, vec!["tool-2"]);
    assert_eq!(outcome.completion_rate(), 50.0);
    assert_eq!(outcome.confidence_score, 75);

    let overlay = std::fs::read(&overlay_path).unwrap();
    assert_eq!(&overlay[..2], &[0xFF, 0xD8]);
}

#[test]
fn test_resized_discovery_preview_uses_empty_coordinates() {
    let dir = fresh_dir("cli_resized_preview");
    let out = dir.join("out");

    let empty_path = dir.join("empty.png");
    let full_path = dir.join("full.png");
    write_png(
        &empty_path,
        &PixelBuffer::new_filled(Dimensions::new(100, 100), WHITE),
    );
    let full = PixelBuffer::from_fn(Dimensions::new(200, 200), |x, y| {
        if (100..140).contains(&x) && (100..140).contains(&y) {
            DARK
        } else {
            WHITE
        }
    });
    write_png(&full_path, &full);

    let args = DiscoverArgs {
        empty: empty_path,
        full: full_path,
        out: out.clone(),
        min_area: Some(50),
        threshold: None,
        connectivity: None,
        resize: true,
    };
    let regions = crate::discover::run(&args, &DiscoveryConfig::default()).unwrap();
    assert_eq!(regions.len(), 1);
    let b = regions[0].bounds;
    assert!((b.x - 50).abs() <= 1, "x = {}", b.x);
    assert!((b.y - 50).abs() <= 1, "y = {}", b.y);

    let bytes = std::fs::read(out.join(PREVIEW_FILE)).unwrap();
    let preview = PixelBuffer::decode(&bytes, ImageRole::Full).unwrap();
    assert_eq!(preview.dimensions(), Dimensions::new(100, 100));

    let red = [255, 0, 0, 255];
    let mid_y = (b.y + b.height as i32 / 2) as u32;
    assert_eq!(preview.pixel(b.x as u32, mid_y), red);
    assert_eq!(preview.pixel(10, 10), WHITE);
}

#[test]
fn test_missing_input_reports_path() {
    let dir = fresh_dir("cli_missing_input");
    let args = DiscoverArgs {
        empty: dir.join("nope.png"),
        full: dir.join("nope2.png"),
        out: dir.join("out"),
        min_area: None,
        threshold: None,
        connectivity: None,
        resize: false,
    };

    let err = crate::discover::run(&args, &DiscoveryConfig::default()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("empty image"), "{msg}");
    assert!(msg.contains("nope.png"), "{msg}");
}
