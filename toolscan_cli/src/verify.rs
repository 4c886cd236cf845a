use std::path::{Path, PathBuf};

use ab_glyph::FontArc;
use anyhow::{Context, Result};
use clap::Args;
use common::SerdeFormat;
use toolscan::{
    render_overlay, verify_presence_in, ImageRole, OverlayStyle, ToolRegion, VerificationConfig,
    VerificationOutcome, OVERLAY_JPEG_QUALITY,
};

use crate::discover::{read_image, write_file};

#[derive(Args, Debug)]
pub(crate) struct VerifyArgs {
    /// New photo of the cabinet
    #[arg(long)]
    pub captured: PathBuf,

    /// Photo of the empty cabinet the regions were discovered on
    #[arg(long)]
    pub reference: PathBuf,

    /// Tool regions as written by `discover` (JSON)
    #[arg(long)]
    pub regions: PathBuf,

    /// Mean luma difference a region must exceed to count as occupied
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Write an annotated JPEG of the captured photo here
    #[arg(long)]
    pub overlay: Option<PathBuf>,

    /// TrueType/OpenType font for overlay labels
    #[arg(long, requires = "overlay")]
    pub font: Option<PathBuf>,
}

impl VerifyArgs {
    pub fn apply(&self, base: &VerificationConfig) -> VerificationConfig {
        let mut config = base.clone();
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        config
    }
}

pub(crate) fn run(args: &VerifyArgs, settings: &VerificationConfig) -> Result<VerificationOutcome> {
    let config = args.apply(settings);

    let captured = read_image(&args.captured, ImageRole::Captured)?;
    let reference = read_image(&args.reference, ImageRole::Reference)?;
    let regions = read_regions(&args.regions)?;

    let outcome = verify_presence_in(&captured, &reference, &regions, &config)?;

    if let Some(overlay_path) = &args.overlay {
        let style = match &args.font {
            Some(font_path) => OverlayStyle::with_font(load_font(font_path)?),
            None => OverlayStyle::default(),
        };

        // Draw where the regions were measured, in captured coordinates.
        let placed: Vec<ToolRegion> = regions
            .iter()
            .zip(&outcome.regions)
            .map(|(region, report)| ToolRegion {
                bounds: report.bounds,
                ..region.clone()
            })
            .collect();

        let overlay = render_overlay(&captured, &placed, &outcome.absent_ids, &style);
        write_file(overlay_path, &overlay.encode_jpeg(OVERLAY_JPEG_QUALITY)?)?;
        tracing::info!("Wrote overlay to {}", overlay_path.display());
    }

    let serialized = common::serde::serialize(&outcome, SerdeFormat::Json)?;
    print!("{}", String::from_utf8_lossy(&serialized));

    Ok(outcome)
}

fn read_regions(path: &Path) -> Result<Vec<ToolRegion>> {
    let serialized = std::fs::read(path)
        .with_context(|| format!("Failed to read regions file {}", path.display()))?;
    common::serde::deserialize(&serialized, SerdeFormat::Json)
        .with_context(|| format!("Failed to parse regions file {}", path.display()))
}

fn load_font(path: &Path) -> Result<FontArc> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read font {}", path.display()))?;
    FontArc::try_from_vec(bytes).with_context(|| format!("Invalid font file {}", path.display()))
}
