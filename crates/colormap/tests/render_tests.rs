use colormap::*;

#[test]
fn test_c_output_layout() {
    let text = render(&Colormap::jet(), &RenderOptions::default()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 258);
    assert_eq!(lines[0], "uint8_t colormap[256][3] = {");
    assert_eq!(lines[1], "\t{127, 0, 0},");
    assert_eq!(lines[256], "\t{0, 0, 127}");
    assert_eq!(lines[257], "};");
    assert!(text.ends_with("};\n"));
    // every entry but the last carries a comma
    assert_eq!(lines[1..256].iter().filter(|l| l.ends_with("},")).count(), 255);
}

#[test]
fn test_rust_output_layout() {
    let options = RenderOptions::new(Language::Rust, ChannelOrder::Rgb);
    let text = render(&Colormap::jet(), &options).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 258);
    assert_eq!(lines[0], "pub const COLORMAP: [[u8; 3]; 256] = [");
    assert_eq!(lines[1], "    [0, 0, 127],");
    assert_eq!(lines[256], "    [127, 0, 0],");
    assert_eq!(lines[257], "];");
}

#[test]
fn test_custom_name() {
    let options = RenderOptions::new(Language::C, ChannelOrder::Bgr).with_name("jet_bgr");
    let text = render(&Colormap::jet(), &options).unwrap();
    assert!(text.starts_with("uint8_t jet_bgr[256][3] = {\n"));
}

#[test]
fn test_invalid_name() {
    let options = RenderOptions::new(Language::Rust, ChannelOrder::Bgr).with_name("jet map");
    assert_eq!(
        render(&Colormap::jet(), &options),
        Err(ColormapError::InvalidName("jet map".to_string()))
    );
}

#[test]
fn test_language_parse() {
    assert_eq!("C".parse::<Language>().unwrap(), Language::C);
    assert_eq!("rs".parse::<Language>().unwrap(), Language::Rust);
    assert!(matches!(
        "python".parse::<Language>(),
        Err(ColormapError::UnknownLanguage(_))
    ));
}
