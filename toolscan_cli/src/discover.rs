use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use common::SerdeFormat;
use toolscan::{
    annotate_silhouettes, discover_silhouettes_in, Connectivity, DiscoveryConfig, ImageRole,
    PixelBuffer, ResizePolicy, ToolRegion,
};

pub(crate) const REGIONS_FILE: &str = "silhouettes.json";
pub(crate) const PREVIEW_FILE: &str = "preview.png";

#[derive(Args, Debug)]
pub(crate) struct DiscoverArgs {
    /// Photo of the empty cabinet
    #[arg(long)]
    pub empty: PathBuf,

    /// Photo of the same cabinet with every tool in place
    #[arg(long)]
    pub full: PathBuf,

    /// Directory for silhouettes.json, masks and the preview
    #[arg(short, long, default_value = "toolscan_out")]
    pub out: PathBuf,

    /// Minimum silhouette area in pixels
    #[arg(long)]
    pub min_area: Option<u32>,

    /// Luma difference a pixel must exceed to count as changed
    #[arg(long)]
    pub threshold: Option<u8>,

    /// Neighborhood used to join changed pixels
    #[arg(long, value_enum)]
    pub connectivity: Option<ConnectivityArg>,

    /// Resample the full photo when the sizes differ instead of failing
    #[arg(long)]
    pub resize: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum ConnectivityArg {
    Four,
    Eight,
}

impl From<ConnectivityArg> for Connectivity {
    fn from(arg: ConnectivityArg) -> Self {
        match arg {
            ConnectivityArg::Four => Connectivity::Four,
            ConnectivityArg::Eight => Connectivity::Eight,
        }
    }
}

impl DiscoverArgs {
    /// Command-line flags take precedence over the settings file.
    pub fn apply(&self, base: &DiscoveryConfig) -> DiscoveryConfig {
        let mut config = base.clone();
        if let Some(min_area) = self.min_area {
            config.min_area = min_area;
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(connectivity) = self.connectivity {
            config.connectivity = connectivity.into();
        }
        if self.resize {
            config.resize_policy = ResizePolicy::ResizeToFirst;
        }
        config
    }
}

pub(crate) fn run(args: &DiscoverArgs, settings: &DiscoveryConfig) -> Result<Vec<ToolRegion>> {
    let config = args.apply(settings);

    let empty = read_image(&args.empty, ImageRole::Empty)?;
    let full = read_image(&args.full, ImageRole::Full)?;

    let silhouettes = discover_silhouettes_in(&empty, &full, &config)?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("Failed to create output directory {}", args.out.display()))?;

    let regions: Vec<ToolRegion> = silhouettes
        .iter()
        .enumerate()
        .map(|(index, silhouette)| silhouette.to_tool_region(index))
        .collect();

    let regions_path = args.out.join(REGIONS_FILE);
    let serialized = common::serde::serialize(&regions, SerdeFormat::Json)?;
    write_file(&regions_path, &serialized)?;

    for (index, silhouette) in silhouettes.iter().enumerate() {
        if let Some(mask) = &silhouette.mask {
            let path = args.out.join(format!("mask_{}.png", index + 1));
            write_file(&path, &mask.encode_png()?)?;
        }
    }

    // Bounds are in empty-photo coordinates.
    let preview = annotate_silhouettes(&full.resize(empty.dimensions()), &silhouettes);
    write_file(&args.out.join(PREVIEW_FILE), &preview.encode_png()?)?;

    tracing::info!(
        "Wrote {} tool regions to {}",
        regions.len(),
        regions_path.display()
    );
    for region in &regions {
        println!("{}: {}", region.display_name(), region.bounds);
    }

    Ok(regions)
}

pub(crate) fn read_image(path: &Path, role: ImageRole) -> Result<PixelBuffer> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read {} image {}", role, path.display()))?;
    let image = PixelBuffer::decode(&bytes, role)
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    Ok(image)
}

pub(crate) fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}
