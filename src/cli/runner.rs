use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use glyphgen::{
    ModelConfig, PreviewRenderer, load_model_from_config, prepare_conditioning, render_and_save,
};

use super::args::CliArgs;

fn init_logging(debug: bool) {
    let default = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(args.log);

    let request = args.to_request();

    let conditioning = prepare_conditioning(request.glyph_instructions.as_deref());

    let config = ModelConfig::load(&request.config_path)?;
    let model = load_model_from_config(&config, &request.checkpoint_path, true)?;
    let mut renderer = PreviewRenderer::new(model, request.memory_mode);
    info!("Render tool loaded");

    let report = render_and_save(&request, &conditioning, &mut renderer, args.metadata)?;

    info!("Output directory: {:?}", report.output_dir);
    info!("Saved: {}", report.save.saved.len());
    info!("Failed: {}", report.save.failed);
    if let Some(reason) = &report.degraded {
        info!("Conditioning fell back to empty text: {}", reason);
    }

    Ok(())
}
