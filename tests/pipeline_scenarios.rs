// End-to-end scenarios through the public pipeline API.

use scuba_pic_fix::config::{ExportConfig, ExportFormat, IngestConfig};
use scuba_pic_fix::{Channel, EditError, NullSink, PixelBuffer, RenderPipeline, ScaleFactors, image_io};

fn cast_image() -> PixelBuffer {
    PixelBuffer::filled(2, 2, [200, 100, 50, 255]).unwrap()
}

#[test]
fn auto_fix_neutralizes_uniform_cast() {
    let mut pipeline = RenderPipeline::new(NullSink);
    pipeline.on_load(cast_image());

    let factors = pipeline.auto_fix().unwrap();
    let target = (200.0 + 100.0 + 50.0) / 3.0;
    assert!((factors.r - target / 200.0).abs() < 1e-12);
    assert!((factors.g - target / 100.0).abs() < 1e-12);
    assert!((factors.b - target / 50.0).abs() < 1e-12);
    assert_eq!(pipeline.factors().unwrap(), factors);

    let frame = pipeline.export_frame().unwrap();
    for px in frame.pixels() {
        let (r, g, b) = (px[0] as i32, px[1] as i32, px[2] as i32);
        assert!((r - g).abs() <= 1 && (g - b).abs() <= 1, "unbalanced pixel {px:?}");
        assert_eq!(px[3], 255);
    }
}

#[test]
fn auto_fix_uses_original_not_adjusted_frame() {
    let mut first = RenderPipeline::new(NullSink);
    first.on_load(cast_image());
    let direct = first.auto_fix().unwrap();

    let mut second = RenderPipeline::new(NullSink);
    second.on_load(cast_image());
    second.set_factors(ScaleFactors::new(0.3, 2.7, 1.9)).unwrap();
    let after_manual = second.auto_fix().unwrap();

    assert_eq!(direct, after_manual);
    assert_eq!(first.export_frame().unwrap(), second.export_frame().unwrap());
}

#[test]
fn repeated_auto_fix_does_not_compound() {
    let mut pipeline = RenderPipeline::new(NullSink);
    pipeline.on_load(cast_image());
    let once = pipeline.auto_fix().unwrap();
    let frame = pipeline.export_frame().unwrap().clone();

    let twice = pipeline.auto_fix().unwrap();
    assert_eq!(once, twice);
    assert_eq!(pipeline.export_frame().unwrap(), &frame);
}

#[test]
fn negative_factor_is_rejected_without_side_effects() {
    let mut pipeline = RenderPipeline::new(NullSink);
    pipeline.on_load(cast_image());
    let frame = pipeline.export_frame().unwrap().clone();
    let revision = pipeline.revision();

    let err = pipeline
        .set_factors(ScaleFactors::new(-1.0, 1.0, 1.0))
        .unwrap_err();
    assert!(matches!(err, EditError::InvalidFactors { .. }));
    assert_eq!(pipeline.factors().unwrap(), ScaleFactors::NEUTRAL);
    assert_eq!(pipeline.export_frame().unwrap(), &frame);
    assert_eq!(pipeline.revision(), revision);
}

#[test]
fn same_factors_twice_give_identical_frames() {
    let mut pipeline = RenderPipeline::new(NullSink);
    pipeline.on_load(PixelBuffer::new(2, 1, vec![13, 77, 201, 255, 254, 3, 90, 40]).unwrap());

    let f = ScaleFactors::new(1.37, 0.81, 2.05);
    pipeline.set_factors(f).unwrap();
    let first = pipeline.export_frame().unwrap().clone();
    pipeline.set_factors(f).unwrap();
    assert_eq!(pipeline.export_frame().unwrap(), &first);
}

#[test]
fn black_channel_blocks_auto_fix_only() {
    let mut pipeline = RenderPipeline::new(NullSink);
    pipeline.on_load(PixelBuffer::filled(3, 2, [40, 60, 0, 255]).unwrap());

    match pipeline.auto_fix() {
        Err(EditError::DegenerateChannel(ch)) => assert_eq!(ch, Channel::Blue),
        other => panic!("expected degenerate blue channel, got {other:?}"),
    }
    pipeline.set_factors(ScaleFactors::new(1.0, 1.0, 2.0)).unwrap();
    assert_eq!(pipeline.factors().unwrap(), ScaleFactors::new(1.0, 1.0, 2.0));
}

#[test]
fn ingest_caps_width_and_export_encodes_jpeg() {
    let wide = image::RgbaImage::from_pixel(2400, 600, image::Rgba([180, 90, 45, 255]));
    let mut encoded = Vec::new();
    image::DynamicImage::ImageRgba8(wide)
        .write_to(&mut std::io::Cursor::new(&mut encoded), image::ImageFormat::Png)
        .unwrap();

    let buffer = image_io::decode_image(&encoded, &IngestConfig::default()).unwrap();
    assert_eq!((buffer.width(), buffer.height()), (1200, 300));

    let mut pipeline = RenderPipeline::new(NullSink);
    pipeline.on_load(buffer);
    pipeline.auto_fix().unwrap();

    let export = ExportConfig::default();
    let jpeg = image_io::encode_frame(pipeline.export_frame().unwrap(), export.format).unwrap();
    let decoded = image::load_from_memory(&jpeg).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1200, 300));
    assert_eq!(export.format, ExportFormat::Jpeg { quality: 90 });
}

#[test]
fn save_frame_writes_png_next_to_jpeg() {
    let dir = std::env::temp_dir().join(format!("scuba_pic_fix_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let frame = cast_image();
    let config = ExportConfig::default();

    let png_path = dir.join("out.png");
    image_io::save_frame(&frame, &png_path, &config).unwrap();
    let loaded = image_io::load_image(&png_path, &IngestConfig::default()).unwrap();
    assert_eq!(loaded, frame);

    let jpg_path = dir.join(&config.file_name);
    image_io::save_frame(&frame, &jpg_path, &config).unwrap();
    let bytes = std::fs::read(&jpg_path).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn configured_format_applies_without_extension() {
    let dir = std::env::temp_dir().join(format!("scuba_pic_fix_fmt_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let frame = cast_image();

    let png_config = ExportConfig {
        format: ExportFormat::Png,
        ..ExportConfig::default()
    };
    let png_path = dir.join("edited");
    image_io::save_frame(&frame, &png_path, &png_config).unwrap();
    let bytes = std::fs::read(&png_path).unwrap();
    assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    let loaded = image_io::decode_image(&bytes, &IngestConfig::default()).unwrap();
    assert_eq!(loaded, frame);

    let jpg_path = dir.join("edited_default");
    image_io::save_frame(&frame, &jpg_path, &ExportConfig::default()).unwrap();
    let bytes = std::fs::read(&jpg_path).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = image_io::load_image(
        std::path::Path::new("/nonexistent/scuba_pic_fix/input.jpg"),
        &IngestConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, EditError::Io(_)));
}
