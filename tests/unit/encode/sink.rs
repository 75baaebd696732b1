use super::*;

fn frame(width: u32, height: u32, px: [u8; 4], premultiplied: bool) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: px.repeat((width * height) as usize),
        premultiplied,
    }
}

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps { num: 60, den: 1 },
    }
}

fn temp_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("windowsill_{tag}_{}", std::process::id()))
}

#[test]
fn in_memory_sink_captures_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg(2, 2)).unwrap();
    sink.push_frame(FrameIndex(4), &frame(2, 2, [1, 2, 3, 255], true))
        .unwrap();
    sink.push_frame(FrameIndex(5), &frame(2, 2, [4, 5, 6, 255], true))
        .unwrap();
    sink.end().unwrap();

    assert!(sink.is_ended());
    assert_eq!(sink.config(), Some(cfg(2, 2)));
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![4, 5]);
}

#[test]
fn unpremultiply_restores_straight_alpha() {
    let src = [64u8, 32, 0, 128, 9, 9, 9, 0, 1, 2, 3, 255];
    let mut dst = [0u8; 12];
    unpremultiply_rgba8(&mut dst, &src).unwrap();
    assert_eq!(&dst[0..4], &[128, 64, 0, 128]);
    assert_eq!(&dst[4..8], &[0, 0, 0, 0]);
    assert_eq!(&dst[8..12], &[1, 2, 3, 255]);
}

#[test]
fn unpremultiply_rejects_mismatched_buffers() {
    let mut dst = [0u8; 8];
    assert!(unpremultiply_rgba8(&mut dst, &[0u8; 4]).is_err());
}

#[test]
fn png_sink_writes_numbered_files() {
    let dir = temp_dir("png_sink");
    let _ = std::fs::remove_dir_all(&dir);

    let mut sink = PngSequenceSink::new(&dir).with_prefix("shot_");
    sink.begin(cfg(4, 2)).unwrap();
    sink.push_frame(FrameIndex(7), &frame(4, 2, [10, 20, 30, 255], true))
        .unwrap();
    sink.end().unwrap();

    let path = dir.join("shot_00007.png");
    assert_eq!(sink.frame_path(FrameIndex(7)), path);
    assert_eq!(sink.written(), 1);

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (4, 2));
    assert_eq!(img.get_pixel(3, 1).0, [10, 20, 30, 255]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn png_sink_rejects_size_mismatch_and_unstarted_pushes() {
    let dir = temp_dir("png_sink_mismatch");
    let mut sink = PngSequenceSink::new(&dir);
    assert!(sink
        .push_frame(FrameIndex(0), &frame(2, 2, [0, 0, 0, 255], false))
        .is_err());

    sink.begin(cfg(2, 2)).unwrap();
    assert!(sink
        .push_frame(FrameIndex(0), &frame(4, 4, [0, 0, 0, 255], false))
        .is_err());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn png_sink_rejects_empty_config() {
    let mut sink = PngSequenceSink::new(temp_dir("png_sink_empty"));
    assert!(sink.begin(cfg(0, 2)).is_err());
}
