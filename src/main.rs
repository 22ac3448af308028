use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Level;

use snapdetect::acquire::{self, NoContentResolver, SourceUri};
use snapdetect::detection::{ContourDetector, DetectionAdapter};
use snapdetect::models::PipelineState;
use snapdetect::overlay;

#[derive(Parser)]
#[command(name = "snapdetect")]
#[command(about = "Detect and label objects in a picked image")]
struct Cli {
    /// Image to analyze: a plain path, file:// uri or content:// uri
    #[arg(value_name = "IMAGE")]
    image: String,

    /// Where to save the rendered overlay
    #[arg(short, long, value_name = "FILE", default_value = "detections.png")]
    output: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();

    let uri = SourceUri::parse(&args.image);
    let image = acquire::acquire(&uri, &NoContentResolver)?;

    let adapter = DetectionAdapter::new(Arc::new(ContourDetector::new()));
    let mut states = adapter.subscribe();
    adapter.calculate_image(image.clone());

    loop {
        states.changed().await?;
        let state = states.borrow_and_update().clone();
        match state {
            PipelineState::Loading => continue,
            PipelineState::Ok { items, .. } => {
                if items.is_empty() {
                    println!("Nothing found in the picture.");
                    break;
                }

                let font = overlay::load_label_font();
                let rendered = overlay::render_overlay(&image, &items, font.as_ref());
                rendered.save(&args.output)?;

                let top = &items[0];
                println!(
                    "{}% confident: {} (overlay saved to {})",
                    top.percentage,
                    top.label,
                    args.output.display()
                );
                break;
            }
            PipelineState::Error { message, .. } => {
                anyhow::bail!("detection failed: {message}");
            }
        }
    }

    Ok(())
}
