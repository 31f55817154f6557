use super::*;

#[test]
fn config_validation_catches_bad_values() {
    assert!(default_mp4_config("target/out.mp4", 0, 10, 30).validate().is_err());
    assert!(default_mp4_config("target/out.mp4", 11, 10, 30).validate().is_err());
    assert!(default_mp4_config("target/out.mp4", 10, 10, 0).validate().is_err());
    assert!(default_mp4_config("target/out.mp4", 2000, 500, 30).validate().is_ok());
}

#[test]
fn ffmpeg_args_describe_rgba_pipe_to_h264() {
    let cfg = default_mp4_config("target/runes.mp4", 2000, 500, 10);
    let args: Vec<String> = ffmpeg_args(&cfg)
        .into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    assert_eq!(args[0], "-y");
    let pos = |flag: &str| args.iter().position(|a| a == flag).unwrap();
    assert_eq!(args[pos("-s") + 1], "2000x500");
    assert_eq!(args[pos("-r") + 1], "10");
    assert_eq!(args[pos("-c:v") + 1], "libx264");
    assert_eq!(args[pos("-movflags") + 1], "+faststart");
    assert!(args.windows(2).any(|w| w == ["-pix_fmt", "yuv420p"]));
    assert_eq!(args.last().unwrap(), "target/runes.mp4");

    let keep = EncodeConfig {
        overwrite: false,
        ..cfg
    };
    assert_eq!(ffmpeg_args(&keep)[0], "-n");
}

#[test]
fn flatten_premul_over_white_produces_expected_rgb() {
    // Premultiplied white @ 50% => 128,128,128,128; over white stays white.
    let src = vec![128u8, 128, 128, 128];
    let mut dst = vec![0u8; 4];
    flatten_over_background(&mut dst, &src, true, [255, 255, 255, 255]).unwrap();
    assert_eq!(dst, vec![255u8, 255, 255, 255]);
}

#[test]
fn flatten_straight_over_black_produces_expected_rgb() {
    let src = vec![255u8, 0, 0, 128];
    let mut dst = vec![0u8; 4];
    flatten_over_background(&mut dst, &src, false, [0, 0, 0, 255]).unwrap();
    assert_eq!(dst, vec![128u8, 0, 0, 255]);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_over_background(&mut dst, &[0u8; 4], true, [0, 0, 0, 255]).is_err());
}

#[test]
fn mp4_sink_rejects_frames_before_begin() {
    let mut sink = Mp4Sink::new("target/never.mp4", [255, 255, 255, 255]);
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![255; 16],
        premultiplied: true,
    };
    assert!(matches!(
        sink.push_frame(1, &frame),
        Err(RuneError::Encode(_))
    ));
    assert!(sink.end().is_err());
}

/// Encoder around an arbitrary long-running process instead of ffmpeg.
#[cfg(unix)]
fn encoder_over_sleep() -> FfmpegEncoder {
    let mut child = Command::new("sleep")
        .arg("30")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    let stdin = child.stdin.take().unwrap();
    FfmpegEncoder {
        scratch: vec![0; 16],
        cfg: default_mp4_config("target/never.mp4", 2, 2, 10),
        bg_rgba: [255, 255, 255, 255],
        child,
        stdin: Some(stdin),
    }
}

#[cfg(unix)]
#[test]
fn unfinished_encoder_kills_and_reaps_its_process() {
    let started = std::time::Instant::now();
    let mut enc = encoder_over_sleep();
    enc.abort();
    assert!(enc.stdin.is_none());
    let status = enc.child.try_wait().unwrap();
    assert!(status.is_some_and(|s| !s.success()));
    assert!(started.elapsed() < std::time::Duration::from_secs(10));
    // Already reaped: dropping is a no-op.
    drop(enc);
}

#[cfg(unix)]
#[test]
fn dropping_an_unfinished_mp4_sink_returns_promptly() {
    let started = std::time::Instant::now();
    let sink = Mp4Sink {
        out_path: PathBuf::from("target/never.mp4"),
        overwrite: true,
        bg_rgba: [255, 255, 255, 255],
        encoder: Some(encoder_over_sleep()),
    };
    drop(sink);
    assert!(started.elapsed() < std::time::Duration::from_secs(10));
}
