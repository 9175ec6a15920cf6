use anyhow::Result;
use drive::viewer::{build_sink, DisplayConfig, DisplayKind, ImageFileSink};
use drive_core::{Frame, FrameSink};
use tempdir::TempDir;

fn frame(value: u8) -> Frame {
    Frame::new(160, 120, vec![value; 160 * 120 * 3]).unwrap()
}

#[test]
fn file_sink_overwrites_one_file() -> Result<()> {
    let dir = TempDir::new("viewer")?;
    let path = dir.path().join("frame.png");
    let mut sink = ImageFileSink::new(&path, 320, 240);

    sink.show(&frame(10))?;
    sink.show(&frame(200))?;

    let img = image::open(&path)?.to_rgb8();
    assert_eq!(img.dimensions(), (320, 240));
    assert!(img.get_pixel(0, 0).0.iter().all(|v| (199..=200).contains(v)));
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 1);
    Ok(())
}

#[test]
fn file_sink_keeps_numbered_frames() -> Result<()> {
    let dir = TempDir::new("viewer")?;
    let config = DisplayConfig {
        kind: DisplayKind::File,
        path: dir.path().join("duckie.png"),
        keep_frames: true,
        ..DisplayConfig::default()
    };
    let mut sink = build_sink(&config)?;

    for i in 0..3 {
        sink.clear()?;
        sink.show(&frame(i))?;
    }

    for i in 0..3 {
        let path = dir.path().join(format!("duckie_{:06}.png", i));
        assert!(path.exists(), "{} is missing", path.display());
    }
    Ok(())
}

#[test]
fn null_sink_accepts_frames() -> Result<()> {
    let config = DisplayConfig {
        kind: DisplayKind::None,
        ..DisplayConfig::default()
    };
    let mut sink = build_sink(&config)?;
    sink.show(&frame(0))?;
    Ok(())
}
