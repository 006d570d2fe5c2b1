use {base::Vec2, depthcam::*};

fn intrinsics(size: Vec2<u32>, principal_point: Vec2<f32>, focal: f32) -> StreamIntrinsics {
    StreamIntrinsics {
        modality: Modality::Depth,
        format: PixelFormat::Z16,
        frame_rate: 30,
        resolution: size,
        principal_point,
        focal_length: Vec2::new(focal, focal),
        distortion: Distortion::default(),
    }
}

#[test]
fn test_pinhole_fov_640x480() {
    let fov = pinhole_fov(Vec2::new(640, 480), Vec2::new(600.0, 600.0));
    assert!((fov.x - 56.145).abs() < 0.01, "{}", fov.x);
    assert!((fov.y - 43.603).abs() < 0.01, "{}", fov.y);
}

#[test]
fn test_pinhole_fov_square_at_90_degrees() {
    // half width equal to the focal length subtends 45 degrees per side
    let fov = pinhole_fov(Vec2::new(200, 200), Vec2::new(100.0, 100.0));
    assert!((fov.x - 90.0).abs() < 1e-9);
    assert!((fov.y - 90.0).abs() < 1e-9);
}

#[test]
fn test_conventions_agree_at_pixel_center() {
    let size = Vec2::new(848u32, 480u32);
    let center = Vec2::new(423.5f32, 239.5);
    let focal = Vec2::new(615.0f32, 615.0);
    let pinhole = pinhole_fov(size, focal);
    let principal = principal_point_fov(size, center, focal);
    assert!((pinhole.x - principal.x).abs() < 1e-6);
    assert!((pinhole.y - principal.y).abs() < 1e-6);
}

#[test]
fn test_off_center_principal_point_narrows_fov() {
    // moving the optical axis off center always loses total angle
    let size = Vec2::new(640u32, 480u32);
    let focal = Vec2::new(600.0f32, 600.0);
    let centered = principal_point_fov(size, Vec2::new(319.5, 239.5), focal);
    let shifted = principal_point_fov(size, Vec2::new(339.5, 219.5), focal);
    assert!(shifted.x < centered.x);
    assert!(shifted.y < centered.y);
}

#[test]
fn test_field_of_view_dispatch() {
    let intrinsics = intrinsics(Vec2::new(640, 480), Vec2::new(330.0, 250.0), 600.0);
    assert_eq!(
        intrinsics.field_of_view(FovConvention::Pinhole),
        pinhole_fov(intrinsics.resolution, intrinsics.focal_length)
    );
    assert_eq!(
        intrinsics.field_of_view(FovConvention::PrincipalPoint),
        principal_point_fov(
            intrinsics.resolution,
            intrinsics.principal_point,
            intrinsics.focal_length
        )
    );
}

#[test]
fn test_simulated_lens_angles() {
    let mut configurator = StreamConfigurator::new(Box::new(SimulatedDevice::new()))
        .with_stream(StreamRequest::color(1280, 720, PixelFormat::Bgr8, 30))
        .unwrap()
        .with_stream(StreamRequest::depth(1280, 720, 30))
        .unwrap();
    let session = configurator.open().unwrap();
    let color = session
        .intrinsics(Modality::Color)
        .unwrap()
        .field_of_view(FovConvention::Pinhole);
    let depth = session
        .intrinsics(Modality::Depth)
        .unwrap()
        .field_of_view(FovConvention::Pinhole);
    assert!((color.x - 69.4).abs() < 0.01, "{}", color.x);
    assert!((depth.x - 87.0).abs() < 0.01, "{}", depth.x);
    assert!(depth.y < depth.x);
}

#[test]
fn test_convention_parse() {
    assert_eq!("pinhole".parse::<FovConvention>().unwrap(), FovConvention::Pinhole);
    assert_eq!(
        "Principal-Point".parse::<FovConvention>().unwrap(),
        FovConvention::PrincipalPoint
    );
    assert_eq!("sdk".parse::<FovConvention>().unwrap(), FovConvention::PrincipalPoint);
    assert!(matches!(
        "fisheye".parse::<FovConvention>(),
        Err(ConfigError::Parse(_))
    ));
}
