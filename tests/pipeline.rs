use std::io::Cursor;
use std::path::Path;

use glyphgen::{
    Error, GlyphRenderer, InferenceRequest, ModelConfig, PreviewRenderer, RenderRequest,
    RenderedImage, load_model_from_config, run,
};
use image::ImageFormat;
use ndarray::Array3;

const CONFIG: &str = "model:\n  target: cldm.cldm.ControlLDM\n  params:\n    image_size: 64\n";

fn preview_renderer(root: &Path) -> PreviewRenderer {
    let cfg_path = root.join("config.yaml");
    let ckpt_path = root.join("model.ckpt");
    std::fs::write(&cfg_path, CONFIG).unwrap();
    std::fs::write(&ckpt_path, b"weights").unwrap();

    let config = ModelConfig::load(&cfg_path).unwrap();
    let model = load_model_from_config(&config, &ckpt_path, false).unwrap();
    PreviewRenderer::new(model, glyphgen::MemoryMode::Offload)
}

fn jpg_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn writes_one_jpeg_per_sample_under_prompt_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let request = InferenceRequest {
        save_path: tmp.path().join("generated_images"),
        glyph_instructions: Some("https://github.com/AIGText/GlyphControl-release".into()),
        num_samples: 3,
        image_resolution: 64,
        ..Default::default()
    };
    let mut renderer = preview_renderer(tmp.path());

    let report = run(&request, &mut renderer, false).unwrap();

    let dir = tmp
        .path()
        .join("generated_images")
        .join("A sign that says 'APPLE'");
    assert_eq!(report.output_dir, dir);
    assert!(report.degraded.is_none());
    assert_eq!(report.save.failed, 0);
    assert_eq!(jpg_names(&dir), vec!["0.jpg", "1.jpg", "2.jpg"]);
    for name in jpg_names(&dir) {
        assert_eq!(image::image_dimensions(dir.join(name)).unwrap(), (64, 64));
    }
}

#[test]
fn rerun_into_existing_directory_succeeds() {
    let tmp = tempfile::tempdir().unwrap();
    let request = InferenceRequest {
        save_path: tmp.path().join("out"),
        num_samples: 2,
        image_resolution: 32,
        ..Default::default()
    };
    let mut renderer = preview_renderer(tmp.path());

    let first = run(&request, &mut renderer, false).unwrap();
    let second = run(&request, &mut renderer, true).unwrap();

    assert_eq!(first.output_dir, second.output_dir);
    assert_eq!(second.save.saved.len(), 2);
    assert_eq!(
        jpg_names(&second.output_dir),
        vec!["0.jpg", "1.jpg", "run.json"]
    );
}

#[test]
fn missing_instructions_still_render() {
    let tmp = tempfile::tempdir().unwrap();
    let request = InferenceRequest {
        save_path: tmp.path().to_path_buf(),
        prompt: "mugs/cups".into(),
        num_samples: 1,
        image_resolution: 16,
        ..Default::default()
    };
    let mut renderer = preview_renderer(tmp.path());

    let report = run(&request, &mut renderer, false).unwrap();
    assert_eq!(report.degraded.as_deref(), Some("no glyph instructions supplied"));
    assert_eq!(report.output_dir, tmp.path().join("mugs_cups"));
    assert!(tmp.path().join("mugs_cups").join("0.jpg").is_file());
}

/// Returns a mix of raw arrays and pre-encoded images.
struct Mixed;

impl GlyphRenderer for Mixed {
    type Error = Error;

    fn process(&mut self, req: &RenderRequest<'_>) -> glyphgen::Result<Vec<RenderedImage>> {
        let side = req.request.image_resolution;
        let png = image::RgbImage::from_pixel(side, side, image::Rgb([0, 128, 255]));
        let mut buf = Cursor::new(Vec::new());
        png.write_to(&mut buf, ImageFormat::Png)
            .map_err(glyphgen::Error::from)?;

        Ok(vec![
            RenderedImage::RawPixels(Array3::from_elem((side as usize, side as usize, 3), 7)),
            RenderedImage::Encoded {
                bytes: buf.into_inner(),
                format: ImageFormat::Png,
            },
        ])
    }
}

#[test]
fn encoded_results_use_their_own_save_path() {
    let tmp = tempfile::tempdir().unwrap();
    let request = InferenceRequest {
        save_path: tmp.path().to_path_buf(),
        image_resolution: 20,
        ..Default::default()
    };

    let report = run(&request, &mut Mixed, false).unwrap();
    assert_eq!(report.save.failed, 0);
    assert_eq!(jpg_names(&report.output_dir), vec!["0.jpg", "1.jpg"]);
    let encoded = report.output_dir.join("1.jpg");
    assert_eq!(image::image_dimensions(&encoded).unwrap(), (20, 20));
    assert_eq!(
        image::guess_format(&std::fs::read(&encoded).unwrap()).unwrap(),
        ImageFormat::Jpeg
    );
}

struct Failing;

impl GlyphRenderer for Failing {
    type Error = std::io::Error;

    fn process(&mut self, _req: &RenderRequest<'_>) -> Result<Vec<RenderedImage>, Self::Error> {
        Err(std::io::Error::other("sampler exploded"))
    }
}

#[test]
fn renderer_failure_is_fatal_and_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let request = InferenceRequest {
        save_path: tmp.path().join("out"),
        ..Default::default()
    };

    let err = run(&request, &mut Failing, false).unwrap_err();
    assert!(err.to_string().contains("sampler exploded"));
    assert!(!tmp.path().join("out").exists());
}
