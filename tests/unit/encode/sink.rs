use super::*;

#[test]
fn in_memory_sink_keeps_order() {
    let mut sink = InMemorySink::new();
    let canvas = Canvas::new(2, 2).unwrap();
    sink.begin(canvas, 2).unwrap();
    sink.push_frame(Duration::from_millis(0), &FrameRGBA::transparent(2, 2))
        .unwrap();
    sink.push_frame(Duration::from_millis(80), &FrameRGBA::transparent(2, 2))
        .unwrap();
    sink.end().unwrap();

    let times: Vec<u128> = sink.frames.iter().map(|(t, _)| t.as_millis()).collect();
    assert_eq!(times, vec![0, 80]);
    assert!(sink.ended);
    assert!(sink.last().is_some());
    assert!(
        sink.push_frame(Duration::ZERO, &FrameRGBA::transparent(2, 2))
            .is_err()
    );
}

#[test]
fn png_sequence_names_frames() {
    let dir = std::env::temp_dir().join(format!(
        "autograph_seq_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(Canvas::new(2, 2).unwrap(), 2).unwrap();
    for i in 0..2 {
        sink.push_frame(Duration::from_millis(i * 8), &FrameRGBA::transparent(2, 2))
            .unwrap();
    }
    sink.end().unwrap();

    assert_eq!(
        sink.written(),
        &[dir.join("frame_00000.png"), dir.join("frame_00001.png")]
    );
    assert!(sink.written().iter().all(|p| p.is_file()));
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn png_sequence_rejects_wrong_size_and_missing_begin() {
    let dir = std::env::temp_dir().join(format!("autograph_seq_bad_{}", std::process::id()));
    let mut sink = PngSequenceSink::new(&dir);
    assert!(
        sink.push_frame(Duration::ZERO, &FrameRGBA::transparent(2, 2))
            .is_err()
    );
    sink.begin(Canvas::new(2, 2).unwrap(), 1).unwrap();
    let err = sink
        .push_frame(Duration::ZERO, &FrameRGBA::transparent(3, 2))
        .unwrap_err();
    assert!(err.to_string().contains("size mismatch"));
    let _ = std::fs::remove_dir_all(dir);
}
