use super::*;

#[test]
fn garbage_bytes_are_not_a_font() {
    let err = FontAsset::from_bytes(vec![0u8; 64]).unwrap_err();
    assert!(matches!(err, WindowsillError::Asset(_)));
}

#[test]
fn missing_font_file_names_the_path() {
    let path = std::env::temp_dir().join("windowsill_no_such_font.ttf");
    let err = FontAsset::from_path(&path).unwrap_err();
    assert!(format!("{err:#}").contains("windowsill_no_such_font.ttf"));
}

#[test]
fn unreadable_font_file_is_an_asset_error_naming_the_path() {
    let path = std::env::temp_dir().join(format!("windowsill_bad_font_{}.ttf", std::process::id()));
    std::fs::write(&path, b"not a font").unwrap();
    let err = FontAsset::from_path(&path).unwrap_err();
    let _ = std::fs::remove_file(&path);
    match err {
        WindowsillError::Asset(msg) => assert!(msg.contains("windowsill_bad_font_")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn brush_keeps_channels() {
    let brush = TextBrushRgba8::from(Rgba8 {
        r: 1,
        g: 2,
        b: 3,
        a: 4,
    });
    assert_eq!((brush.r, brush.g, brush.b, brush.a), (1, 2, 3, 4));
}
