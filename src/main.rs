use clap::{Parser, Subcommand, ValueEnum};
use cropkit::backend::JpegQuality;
use cropkit::region::{AspectRatio, CropRegion, Unit, Viewport};
use cropkit::rust_backend::{RustBackend, supported_input_extensions};
use cropkit::session::CropSession;
use cropkit::{output, upload};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cropkit")]
#[command(about = "Crop an image region (selected in display coordinates) to a natural-pixel JPEG")]
#[command(long_about = "\
Crop an image region (selected in display coordinates) to a natural-pixel JPEG

The region is the rectangle a user drew over the *displayed* image, which may
be rendered smaller or larger than the file's true pixels. cropkit maps it back
onto the natural pixel grid (per-axis scale factors, so anisotropic display
scaling is handled) and re-encodes exactly that rectangle as JPEG — the full
original never needs to be uploaded.

Examples:

  # Print natural dimensions
  cropkit identify photo.jpg

  # Region drawn on an 800x450 on-screen preview of a 1600x900 photo
  cropkit export photo.jpg --region 40,22.5,720,405 --display 800x450 -o cover.jpg

  # Percent region, as the admin form submits it
  cropkit export photo.jpg --region-json '{\"x\":5,\"y\":5,\"width\":90,\"height\":90,\"unit\":\"percent\"}'

  # No region: the default centered 16:9 selection covering 90% of the width
  cropkit data-url photo.jpg")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print an image's natural pixel dimensions
    Identify { file: PathBuf },
    /// Crop and write a JPEG file
    Export {
        #[command(flatten)]
        args: ExportArgs,
        /// Output path (defaults to <source stem>.jpg in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Crop and print a base64 data URL for JSON submission payloads
    DataUrl {
        #[command(flatten)]
        args: ExportArgs,
    },
    /// List input formats with compiled-in decoders
    Formats,
}

#[derive(clap::Args, Clone)]
struct ExportArgs {
    /// Source image file
    file: PathBuf,

    /// Crop rectangle as x,y,width,height in --unit coordinates.
    /// Omitted: the default centered selection (90% of display width)
    #[arg(long)]
    region: Option<String>,

    /// Crop region as the JSON payload the admin UI submits
    #[arg(long, conflicts_with = "region")]
    region_json: Option<String>,

    /// Unit for --region values
    #[arg(long, value_enum, default_value = "pixel")]
    unit: UnitArg,

    /// Display size (WxH) the region was selected at.
    /// Omitted: the image's natural size (scale factor 1)
    #[arg(long)]
    display: Option<Viewport>,

    /// Locked aspect ratio for the default selection
    #[arg(long, default_value = "16:9")]
    aspect: AspectRatio,

    /// JPEG quality, 1-100
    #[arg(long, default_value_t = 90)]
    quality: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum UnitArg {
    Pixel,
    Percent,
}

impl From<UnitArg> for Unit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Pixel => Unit::Pixel,
            UnitArg::Percent => Unit::Percent,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Identify { file } => {
            let bytes = std::fs::read(&file)?;
            let dims = RustBackend::new().identify(&bytes)?;
            println!("{}", output::format_identify(&file, dims));
        }
        Command::Export { args, output: dest } => {
            let encoded = run_export(&args)?;
            let dest = dest.unwrap_or_else(|| PathBuf::from(&encoded.filename));
            std::fs::write(&dest, &encoded.bytes)?;
            println!("{}", output::format_export(&encoded, &dest));
        }
        Command::DataUrl { args } => {
            let encoded = run_export(&args)?;
            println!("{}", encoded.to_data_url());
        }
        Command::Formats => {
            for ext in supported_input_extensions() {
                println!("{ext}");
            }
        }
    }

    Ok(())
}

/// Load, select, and export per the command-line flags.
fn run_export(args: &ExportArgs) -> Result<upload::EncodedOutput, Box<dyn std::error::Error>> {
    let bytes = std::fs::read(&args.file)?;
    let backend = RustBackend::new();

    let viewport = match args.display {
        Some(viewport) => viewport,
        None => {
            let dims = backend.identify(&bytes)?;
            Viewport::new(dims.width as f64, dims.height as f64)
        }
    };

    let mut session =
        CropSession::new(backend, args.aspect).with_filename_stem(filename_stem(&args.file));
    session.load(&bytes, viewport)?;

    if let Some(json) = &args.region_json {
        let region: CropRegion = serde_json::from_str(json)?;
        session.set_region(region)?;
    } else if let Some(raw) = &args.region {
        session.set_region(parse_region(raw, args.unit.into())?)?;
    }

    Ok(session.export(JpegQuality::new(args.quality))?)
}

/// Parse `x,y,width,height` into a region with the given unit.
fn parse_region(raw: &str, unit: Unit) -> Result<CropRegion, String> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let [x, y, width, height] = parts.as_slice() else {
        return Err(format!("expected x,y,width,height, got '{raw}'"));
    };
    let parse = |s: &str| -> Result<f64, String> {
        s.parse::<f64>()
            .map_err(|_| format!("bad number '{s}' in region '{raw}'"))
    };
    Ok(CropRegion {
        x: parse(x)?,
        y: parse(y)?,
        width: parse(width)?,
        height: parse(height)?,
        unit,
    })
}

/// Filename stem for the suggested output name (`photo.jpg` -> `photo`).
fn filename_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("crop")
        .to_string()
}
