use super::*;

fn cfg(width: u32, height: u32, fps: u32) -> EncodeConfig {
    EncodeConfig {
        canvas: Canvas::new(width, height),
        fps,
        background: Rgba8::rgb(255, 255, 255),
        out_path: PathBuf::from("target/encode_test/out.mp4"),
        overwrite: true,
    }
}

fn frame(data: Vec<u8>, premultiplied: bool) -> FrameRGBA {
    FrameRGBA {
        width: (data.len() / 4) as u32,
        height: 1,
        data,
        premultiplied,
    }
}

#[test]
fn config_validation_catches_bad_values() {
    assert!(cfg(0, 10, 30).validate().is_err());
    assert!(cfg(11, 10, 30).validate().is_err());
    assert!(cfg(10, 10, 0).validate().is_err());
    assert!(cfg(1000, 600, 60).validate().is_ok());
}

#[test]
fn args_describe_raw_rgba_input_and_target() {
    let c = cfg(1000, 600, 60);
    let args: Vec<String> = c
        .ffmpeg_args()
        .into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    assert_eq!(args[0], "-y");
    let size = args.iter().position(|a| a == "-s").unwrap();
    assert_eq!(args[size + 1], "1000x600");
    let rate = args.iter().position(|a| a == "-r").unwrap();
    assert_eq!(args[rate + 1], "60");
    assert_eq!(args.last().map(String::as_str), Some("target/encode_test/out.mp4"));
    assert_eq!(c.frame_len(), 1000 * 600 * 4);

    let keep = EncodeConfig {
        overwrite: false,
        ..c
    };
    assert_eq!(keep.ffmpeg_args()[0], OsString::from("-n"));
}

#[test]
fn flatten_premul_over_background() {
    // Premultiplied red at 50% over white.
    let mut dst = [0u8; 4];
    flatten_over(&mut dst, &frame(vec![128, 0, 0, 128], true), Rgba8::rgb(255, 255, 255))
        .unwrap();
    assert_eq!(dst, [255, 127, 127, 255]);
}

#[test]
fn flatten_straight_over_black() {
    let mut dst = [0u8; 4];
    flatten_over(&mut dst, &frame(vec![255, 0, 0, 128], false), Rgba8::rgb(0, 0, 0)).unwrap();
    assert_eq!(dst, [128, 0, 0, 255]);
}

#[test]
fn flatten_keeps_opaque_pixels() {
    let src = vec![255u8, 230, 240, 255, 1, 2, 3, 255];
    let mut dst = [0u8; 8];
    flatten_over(&mut dst, &frame(src.clone(), true), Rgba8::rgb(9, 9, 9)).unwrap();
    assert_eq!(dst.to_vec(), src);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = [0u8; 8];
    assert!(flatten_over(&mut dst, &frame(vec![0; 4], true), Rgba8::rgb(0, 0, 0)).is_err());
}
