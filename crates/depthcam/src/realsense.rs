//! Intel RealSense backend on top of `realsense-rust`.
//!
//! librealsense2 pipelines have thread affinity: `start` and
//! `wait_for_frames` must be called from the same thread.

use {
    crate::*,
    base::Vec2,
    realsense_rust::{
        config::Config,
        context::Context,
        device::Device,
        frame::{ColorFrame, CompositeFrame, DepthFrame, FrameEx, InfraredFrame},
        kind::{Rs2CameraInfo, Rs2DistortionModel, Rs2Format, Rs2Option, Rs2StreamKind},
        pipeline::{ActivePipeline, InactivePipeline},
    },
    std::{collections::HashSet, ffi::CString, path::Path, time::Duration},
};

pub struct RealsenseDevice {
    context: Context,
    serial: Option<String>,
    pipeline: Option<ActivePipeline>,
}

// SAFETY: librealsense2 handles may move between threads; `&mut self` on every
// call keeps them from being used concurrently.
unsafe impl Send for RealsenseDevice {}

impl RealsenseDevice {
    /// Open the librealsense context; `serial` picks one device when several are attached.
    pub fn new(serial: Option<String>) -> Result<Self, DeviceError> {
        let context = Context::new().map_err(|e| DeviceError::Backend(e.to_string()))?;
        Ok(Self {
            context,
            serial,
            pipeline: None,
        })
    }

    fn find_device(&self) -> Result<Device, DeviceError> {
        let devices = self.context.query_devices(HashSet::new());
        let wanted = self.serial.as_deref();
        devices
            .into_iter()
            .find(|device| match wanted {
                Some(serial) => {
                    camera_info(device, Rs2CameraInfo::SerialNumber).as_deref() == Some(serial)
                }
                None => true,
            })
            .ok_or_else(|| match wanted {
                Some(serial) => {
                    DeviceError::DeviceUnavailable(format!("no RealSense device with serial {serial}"))
                }
                None => DeviceError::DeviceUnavailable("no RealSense device connected".to_string()),
            })
    }
}

fn camera_info(device: &Device, info: Rs2CameraInfo) -> Option<String> {
    device
        .info(info)
        .map(|value| value.to_string_lossy().into_owned())
}

fn stream_kind(modality: Modality) -> (Rs2StreamKind, Option<usize>) {
    match modality {
        Modality::Color => (Rs2StreamKind::Color, None),
        Modality::Depth => (Rs2StreamKind::Depth, None),
        Modality::Infrared => (Rs2StreamKind::Infrared, Some(1)),
    }
}

fn rs2_format(format: PixelFormat) -> Rs2Format {
    match format {
        PixelFormat::Bgr8 => Rs2Format::Bgr8,
        PixelFormat::Rgb8 => Rs2Format::Rgb8,
        PixelFormat::Yuyv => Rs2Format::Yuyv,
        PixelFormat::Z16 => Rs2Format::Z16,
        PixelFormat::Y8 => Rs2Format::Y8,
    }
}

fn distortion_model(model: Rs2DistortionModel) -> DistortionModel {
    match model {
        Rs2DistortionModel::BrownConrady => DistortionModel::BrownConrady,
        Rs2DistortionModel::BrownConradyModified => DistortionModel::ModifiedBrownConrady,
        Rs2DistortionModel::BrownConradyInverse => DistortionModel::InverseBrownConrady,
        Rs2DistortionModel::KannalaBrandt => DistortionModel::KannalaBrandt4,
        _ => DistortionModel::None,
    }
}

fn unsupported(error: impl std::fmt::Display) -> DeviceError {
    DeviceError::UnsupportedConfiguration(error.to_string())
}

fn negotiated_streams(
    pipeline: &ActivePipeline,
    requests: &[StreamRequest],
) -> Result<Negotiated, DeviceError> {
    let profile = pipeline.profile();
    let mut streams = Vec::with_capacity(requests.len());
    for request in requests {
        let (kind, index) = stream_kind(request.modality);
        let stream = profile
            .streams()
            .iter()
            .find(|s| s.kind() == kind && index.is_none_or(|i| s.index() == i))
            .ok_or_else(|| {
                DeviceError::UnsupportedConfiguration(format!(
                    "pipeline did not start the {} stream",
                    request.modality
                ))
            })?;
        let intrinsics = stream
            .intrinsics()
            .map_err(|e| DeviceError::Backend(e.to_string()))?;
        let distortion = intrinsics.distortion();
        streams.push(StreamIntrinsics {
            modality: request.modality,
            format: request.format,
            frame_rate: stream.framerate() as u32,
            resolution: Vec2::new(intrinsics.width() as u32, intrinsics.height() as u32),
            principal_point: Vec2::new(intrinsics.ppx(), intrinsics.ppy()),
            focal_length: Vec2::new(intrinsics.fx(), intrinsics.fy()),
            distortion: Distortion {
                model: distortion_model(distortion.model),
                coeffs: distortion.coeffs,
            },
        });
    }

    let depth_scale = if requests.iter().any(|r| r.modality == Modality::Depth) {
        profile
            .device()
            .sensors()
            .iter()
            .find_map(|sensor| sensor.get_option(Rs2Option::DepthUnits))
    } else {
        None
    };

    Ok(Negotiated {
        streams,
        depth_scale,
    })
}

fn frame_infos(frames: &CompositeFrame) -> Vec<FrameInfo> {
    let mut infos = Vec::new();
    for frame in frames.frames_of_type::<ColorFrame>() {
        infos.push(FrameInfo {
            modality: Modality::Color,
            frame_number: frame.frame_number(),
            timestamp_ms: frame.timestamp(),
            width: frame.width() as u32,
            height: frame.height() as u32,
        });
    }
    for frame in frames.frames_of_type::<DepthFrame>() {
        infos.push(FrameInfo {
            modality: Modality::Depth,
            frame_number: frame.frame_number(),
            timestamp_ms: frame.timestamp(),
            width: frame.width() as u32,
            height: frame.height() as u32,
        });
    }
    for frame in frames.frames_of_type::<InfraredFrame>() {
        infos.push(FrameInfo {
            modality: Modality::Infrared,
            frame_number: frame.frame_number(),
            timestamp_ms: frame.timestamp(),
            width: frame.width() as u32,
            height: frame.height() as u32,
        });
    }
    infos
}

impl CaptureDevice for RealsenseDevice {
    fn info(&self) -> Result<DeviceInfo, DeviceError> {
        let device = self.find_device()?;
        let serial = camera_info(&device, Rs2CameraInfo::SerialNumber)
            .ok_or_else(|| DeviceError::Backend("device reports no serial number".to_string()))?;
        Ok(DeviceInfo {
            name: camera_info(&device, Rs2CameraInfo::Name)
                .unwrap_or_else(|| "Intel RealSense".to_string()),
            serial,
            firmware: camera_info(&device, Rs2CameraInfo::FirmwareVersion),
            usb_type: camera_info(&device, Rs2CameraInfo::UsbTypeDescriptor),
        })
    }

    fn start(
        &mut self,
        requests: &[StreamRequest],
        record_to: Option<&Path>,
    ) -> Result<Negotiated, DeviceError> {
        if self.pipeline.is_some() {
            return Err(DeviceError::DeviceBusy(
                self.serial.clone().unwrap_or_default(),
            ));
        }
        let info = self.info()?;
        let serial = CString::new(info.serial).map_err(|e| DeviceError::Backend(e.to_string()))?;

        let mut config = Config::new();
        config
            .enable_device_from_serial(&serial)
            .map_err(unsupported)?
            .disable_all_streams()
            .map_err(unsupported)?;
        for request in requests {
            let (kind, index) = stream_kind(request.modality);
            config
                .enable_stream(
                    kind,
                    index,
                    request.size.x as usize,
                    request.size.y as usize,
                    rs2_format(request.format),
                    request.frame_rate as usize,
                )
                .map_err(unsupported)?;
        }
        if let Some(path) = record_to {
            config
                .enable_record_to_file(path)
                .map_err(|e| DeviceError::Io(e.to_string()))?;
        }

        let pipeline = InactivePipeline::try_from(&self.context)
            .map_err(|e| DeviceError::Backend(e.to_string()))?;
        // the SDK rejects combinations it cannot stream without saying why,
        // usually the USB link bandwidth
        let pipeline = pipeline.start(Some(config)).map_err(unsupported)?;
        let negotiated = negotiated_streams(&pipeline, requests);
        self.pipeline = Some(pipeline);
        negotiated
    }

    fn wait_for_frames(&mut self, timeout: Duration) -> Result<FrameSet, DeviceError> {
        let pipeline = self.pipeline.as_mut().ok_or(DeviceError::NotStreaming)?;
        let frames = pipeline
            .wait(Some(timeout))
            .map_err(|e| DeviceError::Backend(e.to_string()))?;
        Ok(FrameSet {
            frames: frame_infos(&frames),
        })
    }

    fn stop(&mut self) {
        if let Some(pipeline) = self.pipeline.take() {
            // stopping also finalizes the .bag recording
            let _inactive = pipeline.stop();
            log::debug!("realsense pipeline stopped");
        }
    }
}
