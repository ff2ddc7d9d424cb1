// Opens the default camera and hands out RGB frames.
// A failed grab is reported as end-of-stream (`None`), which stops the viewer.

use crate::error::Error;

// Bring in nokhwa types for camera control.
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

use image::RgbImage;

/// Anything that yields color frames until it runs dry.
pub trait FrameSource {
    /// Next frame, or `None` once no more frames can be produced.
    fn read(&mut self) -> Option<RgbImage>;
    /// Give the device back. Calling it more than once is harmless.
    fn release(&mut self);
}

// A small wrapper around nokhwa::Camera so the viewer loop stays clean.
pub struct CameraCapture {
    cam: Camera,
    width: u32,
    height: u32,
    released: bool,
}

impl CameraCapture {
    /// Try to open camera `index` at a target resolution (falls back if not exact).
    pub fn new(index: u32, width: u32, height: u32, fps: u32) -> Result<Self, Error> {
        let idx = CameraIndex::Index(index);

        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            fps,
        );

        // Ask for RGB frames, closest to what we requested.
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(idx, req)
            .map_err(|e| Error::CameraInit(format!("Create camera: {e}")))?;

        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        // The actual stream might choose a slightly different resolution.
        let actual = cam.resolution();
        tracing::info!(index, width = actual.width(), height = actual.height(), "camera opened");

        Ok(Self {
            cam,
            width: actual.width(),
            height: actual.height(),
            released: false,
        })
    }

    /// Grab one frame and decode it to RGB (blocks until the camera delivers).
    pub fn next_frame(&mut self) -> Result<RgbImage, Error> {
        if self.released {
            return Err(Error::CameraFrame("camera already released".into()));
        }

        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        let decoded = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        // Rebuild from raw bytes so we own a plain `image::RgbImage`.
        let (w, h) = (decoded.width(), decoded.height());
        RgbImage::from_raw(w, h, decoded.into_raw())
            .ok_or_else(|| Error::CameraFrame(format!("Decoded buffer does not fit {w}x{h}")))
    }

    /// Report the actual resolution the camera is delivering.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl FrameSource for CameraCapture {
    fn read(&mut self) -> Option<RgbImage> {
        match self.next_frame() {
            Ok(frame) => Some(frame),
            Err(e) => {
                tracing::warn!("{e}; treating as end of stream");
                None
            }
        }
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(e) = self.cam.stop_stream() {
            tracing::warn!("Stop stream: {e}");
        }
        tracing::info!("camera released");
    }
}

impl Drop for CameraCapture {
    fn drop(&mut self) {
        self.release();
    }
}
