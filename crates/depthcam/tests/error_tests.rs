use depthcam::*;

#[test]
fn test_config_error_messages() {
    assert_eq!(
        ConfigError::DuplicateModality(Modality::Depth).to_string(),
        "a depth stream is already requested"
    );
    assert_eq!(
        ConfigError::ModalityNotRequested(Modality::Color).to_string(),
        "no color stream was requested"
    );
    assert!(
        ConfigError::SessionClosed(Modality::Infrared)
            .to_string()
            .contains("infrared")
    );
}

#[test]
fn test_device_error_messages() {
    assert_eq!(
        DeviceError::DeviceBusy("123".to_string()).to_string(),
        "device 123 is busy"
    );
    assert_eq!(
        DeviceError::AlreadyOpen.to_string(),
        "configuration was already opened"
    );
    assert!(
        DeviceError::UnsupportedConfiguration("depth 1x1".to_string())
            .to_string()
            .starts_with("unsupported configuration")
    );
}

#[test]
fn test_io_conversions() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
    assert!(matches!(DeviceError::from(io), DeviceError::Io(msg) if msg.contains("read-only")));

    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    assert!(matches!(ConfigError::from(io), ConfigError::Io(msg) if msg.contains("gone")));
}

#[test]
fn test_json_conversion() {
    let err = serde_json::from_str::<CaptureConfig>("[").unwrap_err();
    assert!(matches!(ConfigError::from(err), ConfigError::Parse(_)));
}

#[test]
fn test_errors_are_std_errors() {
    fn boxed<E: std::error::Error + Send + Sync + 'static>(e: E) -> Box<dyn std::error::Error> {
        Box::new(e)
    }
    assert_eq!(
        boxed(DeviceError::NotStreaming).to_string(),
        "session is not streaming"
    );
    assert_eq!(
        boxed(ConfigError::Parse("x".to_string())).to_string(),
        "parse error: x"
    );
}
