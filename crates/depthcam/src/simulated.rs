//! A software stand-in for a D400-series camera.
//!
//! Supports the same profile catalog a D435 advertises, synthesizes plausible
//! intrinsics from nominal lens angles and enforces the USB link budget.
//! Recording writes one JSON line per pulled frame set.

use {
    crate::*,
    base::Vec2,
    std::{
        fs::File,
        io::{BufWriter, Write},
        path::Path,
        sync::{
            Arc,
            atomic::{AtomicU64, AtomicUsize, Ordering},
        },
        time::Duration,
    },
};

const COLOR_SIZES: [(u32, u32); 4] = [(640, 480), (848, 480), (1280, 720), (1920, 1080)];
const STEREO_SIZES: [(u32, u32); 4] = [(640, 360), (640, 480), (848, 480), (1280, 720)];
const FRAME_RATES: [u32; 5] = [6, 15, 30, 60, 90];

// nominal horizontal lens field of view in degrees
const COLOR_LENS_HFOV: f64 = 69.4;
const STEREO_LENS_HFOV: f64 = 87.0;

// usable payload of the USB link in bytes per second
const USB3_BUDGET: u64 = 400_000_000;
const USB2_BUDGET: u64 = 36_000_000;

const DEPTH_SCALE: f32 = 0.001;
const DEFAULT_SIMULATED_RATE: u32 = 30;

static NEXT_SERIAL: AtomicU64 = AtomicU64::new(1);

/// Counters shared between a [`SimulatedDevice`] and the test observing it.
#[derive(Debug, Default)]
pub struct SimulatedStats {
    pub starts: AtomicUsize,
    pub stops: AtomicUsize,
    pub frame_sets: AtomicU64,
}

impl SimulatedStats {
    pub fn starts(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    pub fn frame_sets(&self) -> u64 {
        self.frame_sets.load(Ordering::SeqCst)
    }
}

struct Running {
    streams: Vec<StreamIntrinsics>,
    frame_number: u64,
    recorder: Option<BufWriter<File>>,
}

pub struct SimulatedDevice {
    info: DeviceInfo,
    connected: bool,
    usb3: bool,
    paced: bool,
    running: Option<Running>,
    stats: Arc<SimulatedStats>,
}

impl Default for SimulatedDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedDevice {
    /// A connected USB 3 device with a unique serial number.
    pub fn new() -> Self {
        let serial = format!("SIM{:09}", NEXT_SERIAL.fetch_add(1, Ordering::Relaxed));
        Self {
            info: DeviceInfo {
                name: "Intel RealSense D435 (simulated)".to_string(),
                serial,
                firmware: Some("5.16.0.1".to_string()),
                usb_type: Some("3.2".to_string()),
            },
            connected: true,
            usb3: true,
            paced: false,
            running: None,
            stats: Arc::new(SimulatedStats::default()),
        }
    }

    /// No hardware present; `info` fails with `DeviceUnavailable`.
    pub fn disconnected() -> Self {
        Self {
            connected: false,
            ..Self::new()
        }
    }

    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.info.serial = serial.into();
        self
    }

    /// Attach over USB 2, which cannot carry high bandwidth combinations.
    pub fn with_usb2(mut self) -> Self {
        self.usb3 = false;
        self.info.usb_type = Some("2.1".to_string());
        self
    }

    /// Sleep one frame interval per `wait_for_frames`, like real hardware.
    pub fn paced(mut self) -> Self {
        self.paced = true;
        self
    }

    pub fn stats(&self) -> Arc<SimulatedStats> {
        Arc::clone(&self.stats)
    }

    /// Whether the catalog lists this stream profile.
    pub fn supports(request: &StreamRequest) -> bool {
        if request.format.native_modality() != request.modality {
            return false;
        }
        let size = (request.size.x, request.size.y);
        let rate = request.frame_rate;
        if !FRAME_RATES.contains(&rate) {
            return false;
        }
        match request.modality {
            Modality::Color => {
                COLOR_SIZES.contains(&size) && rate <= 60 && (size != (1920, 1080) || rate <= 30)
            }
            Modality::Depth | Modality::Infrared => {
                STEREO_SIZES.contains(&size) && (rate < 90 || size.0 <= 848)
            }
        }
    }

    fn budget(&self) -> u64 {
        if self.usb3 { USB3_BUDGET } else { USB2_BUDGET }
    }

    fn synthesize(request: &StreamRequest) -> StreamIntrinsics {
        let (hfov, offset, model) = match request.modality {
            Modality::Color => (
                COLOR_LENS_HFOV,
                Vec2::new(1.25f32, -0.75),
                DistortionModel::InverseBrownConrady,
            ),
            Modality::Depth | Modality::Infrared => (
                STEREO_LENS_HFOV,
                Vec2::new(-0.5f32, 0.25),
                DistortionModel::BrownConrady,
            ),
        };
        let size = request.size;
        // square pixels: both axes share the focal length implied by the horizontal lens angle
        let focal = (size.x as f64 / 2.0) / (hfov.to_radians() / 2.0).tan();
        let center = size.map(|d| d as f32 / 2.0 - 0.5);
        StreamIntrinsics {
            modality: request.modality,
            format: request.format,
            frame_rate: request.frame_rate,
            resolution: size,
            principal_point: center.zip_with(offset, |c, o| c + o),
            focal_length: Vec2::new(focal as f32, focal as f32),
            distortion: Distortion {
                model,
                coeffs: [0.0; 5],
            },
        }
    }
}

impl CaptureDevice for SimulatedDevice {
    fn info(&self) -> Result<DeviceInfo, DeviceError> {
        if !self.connected {
            return Err(DeviceError::DeviceUnavailable(
                "no RealSense device connected".to_string(),
            ));
        }
        Ok(self.info.clone())
    }

    fn start(
        &mut self,
        requests: &[StreamRequest],
        record_to: Option<&Path>,
    ) -> Result<Negotiated, DeviceError> {
        if !self.connected {
            return Err(DeviceError::DeviceUnavailable(
                "no RealSense device connected".to_string(),
            ));
        }
        if self.running.is_some() {
            return Err(DeviceError::DeviceBusy(self.info.serial.clone()));
        }
        if let Some(request) = requests.iter().find(|r| !Self::supports(r)) {
            return Err(DeviceError::UnsupportedConfiguration(format!(
                "{} {}x{} {} @ {} fps is not offered by {}",
                request.modality,
                request.size.x,
                request.size.y,
                request.format,
                request.frame_rate,
                self.info.name
            )));
        }
        let bandwidth: u64 = requests.iter().map(StreamRequest::bandwidth).sum();
        if bandwidth > self.budget() {
            return Err(DeviceError::UnsupportedConfiguration(format!(
                "streams need {} MB/s but the USB {} link carries {} MB/s",
                bandwidth / 1_000_000,
                self.info.usb_type.as_deref().unwrap_or("?"),
                self.budget() / 1_000_000
            )));
        }

        let recorder = match record_to {
            Some(path) => Some(BufWriter::new(File::create(path)?)),
            None => None,
        };
        let streams: Vec<StreamIntrinsics> = requests.iter().map(Self::synthesize).collect();
        let depth_scale = requests
            .iter()
            .any(|r| r.modality == Modality::Depth)
            .then_some(DEPTH_SCALE);

        self.stats.starts.fetch_add(1, Ordering::SeqCst);
        self.running = Some(Running {
            streams: streams.clone(),
            frame_number: 0,
            recorder,
        });
        Ok(Negotiated {
            streams,
            depth_scale,
        })
    }

    fn wait_for_frames(&mut self, timeout: Duration) -> Result<FrameSet, DeviceError> {
        let paced = self.paced;
        let running = self.running.as_mut().ok_or(DeviceError::NotStreaming)?;

        // the composite set arrives at the rate of the slowest stream
        let rate = running
            .streams
            .iter()
            .map(|s| s.frame_rate)
            .min()
            .unwrap_or(DEFAULT_SIMULATED_RATE);
        let interval = Duration::from_secs_f64(1.0 / rate as f64);
        if paced {
            if interval > timeout {
                return Err(DeviceError::Backend(format!(
                    "frame didn't arrive within {:?}",
                    timeout
                )));
            }
            std::thread::sleep(interval);
        }

        running.frame_number += 1;
        let frames = running
            .streams
            .iter()
            .map(|s| FrameInfo {
                modality: s.modality,
                frame_number: running.frame_number,
                timestamp_ms: running.frame_number as f64 * 1000.0 / rate as f64,
                width: s.resolution.x,
                height: s.resolution.y,
            })
            .collect();
        let frame_set = FrameSet { frames };

        if let Some(recorder) = running.recorder.as_mut() {
            let line = serde_json::to_string(&frame_set)
                .map_err(|e| DeviceError::Backend(e.to_string()))?;
            writeln!(recorder, "{}", line)?;
        }
        self.stats.frame_sets.fetch_add(1, Ordering::SeqCst);
        Ok(frame_set)
    }

    fn stop(&mut self) {
        let Some(mut running) = self.running.take() else {
            return;
        };
        if let Some(recorder) = running.recorder.as_mut() {
            if let Err(error) = recorder.flush() {
                log::error!("failed to flush recording: {}", error);
            }
        }
        self.stats.stops.fetch_add(1, Ordering::SeqCst);
        log::debug!("simulated device {} stopped", self.info.serial);
    }
}
