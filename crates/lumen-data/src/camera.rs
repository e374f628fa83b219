//! Video cameras and calibrated camera rigs.

use crate::geometry::Matrix4;
use crate::shared::Shared;

/// Where a camera's frames come from. Integer values are part of the
/// on-disk format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CameraSource {
    #[default]
    Unknown,
    Device,
    File,
    Stream,
}

impl CameraSource {
    pub fn as_int(self) -> i64 {
        match self {
            Self::Unknown => 0,
            Self::Device => 1,
            Self::File => 2,
            Self::Stream => 3,
        }
    }

    pub fn from_int(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Unknown),
            1 => Some(Self::Device),
            2 => Some(Self::File),
            3 => Some(Self::Stream),
            _ => None,
        }
    }
}

/// Frame pixel layout, following the usual video-frame format table.
/// Integer values are part of the on-disk format; `User` marks the start
/// of the application-defined range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CameraPixelFormat {
    #[default]
    Invalid,
    Argb32,
    Argb32Premultiplied,
    Rgb32,
    Rgb24,
    Rgb565,
    Rgb555,
    Argb8565Premultiplied,
    Bgra32,
    Bgra32Premultiplied,
    Bgr32,
    Bgr24,
    Bgr565,
    Bgr555,
    Bgra5658Premultiplied,
    Ayuv444,
    Ayuv444Premultiplied,
    Yuv444,
    Yuv420P,
    Yv12,
    Uyvy,
    Yuyv,
    Nv12,
    Nv21,
    Imc1,
    Imc2,
    Imc3,
    Imc4,
    Y8,
    Y16,
    Jpeg,
    CameraRaw,
    AdobeDng,
    User,
}

impl CameraPixelFormat {
    pub fn as_int(self) -> i64 {
        match self {
            Self::Invalid => 0,
            Self::Argb32 => 1,
            Self::Argb32Premultiplied => 2,
            Self::Rgb32 => 3,
            Self::Rgb24 => 4,
            Self::Rgb565 => 5,
            Self::Rgb555 => 6,
            Self::Argb8565Premultiplied => 7,
            Self::Bgra32 => 8,
            Self::Bgra32Premultiplied => 9,
            Self::Bgr32 => 10,
            Self::Bgr24 => 11,
            Self::Bgr565 => 12,
            Self::Bgr555 => 13,
            Self::Bgra5658Premultiplied => 14,
            Self::Ayuv444 => 15,
            Self::Ayuv444Premultiplied => 16,
            Self::Yuv444 => 17,
            Self::Yuv420P => 18,
            Self::Yv12 => 19,
            Self::Uyvy => 20,
            Self::Yuyv => 21,
            Self::Nv12 => 22,
            Self::Nv21 => 23,
            Self::Imc1 => 24,
            Self::Imc2 => 25,
            Self::Imc3 => 26,
            Self::Imc4 => 27,
            Self::Y8 => 28,
            Self::Y16 => 29,
            Self::Jpeg => 30,
            Self::CameraRaw => 31,
            Self::AdobeDng => 32,
            Self::User => 1000,
        }
    }

    pub fn from_int(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Invalid),
            1 => Some(Self::Argb32),
            2 => Some(Self::Argb32Premultiplied),
            3 => Some(Self::Rgb32),
            4 => Some(Self::Rgb24),
            5 => Some(Self::Rgb565),
            6 => Some(Self::Rgb555),
            7 => Some(Self::Argb8565Premultiplied),
            8 => Some(Self::Bgra32),
            9 => Some(Self::Bgra32Premultiplied),
            10 => Some(Self::Bgr32),
            11 => Some(Self::Bgr24),
            12 => Some(Self::Bgr565),
            13 => Some(Self::Bgr555),
            14 => Some(Self::Bgra5658Premultiplied),
            15 => Some(Self::Ayuv444),
            16 => Some(Self::Ayuv444Premultiplied),
            17 => Some(Self::Yuv444),
            18 => Some(Self::Yuv420P),
            19 => Some(Self::Yv12),
            20 => Some(Self::Uyvy),
            21 => Some(Self::Yuyv),
            22 => Some(Self::Nv12),
            23 => Some(Self::Nv21),
            24 => Some(Self::Imc1),
            25 => Some(Self::Imc2),
            26 => Some(Self::Imc3),
            27 => Some(Self::Imc4),
            28 => Some(Self::Y8),
            29 => Some(Self::Y16),
            30 => Some(Self::Jpeg),
            31 => Some(Self::CameraRaw),
            32 => Some(Self::AdobeDng),
            1000 => Some(Self::User),
            _ => None,
        }
    }
}

/// A monocular camera with pinhole intrinsics and its frame source.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub width: usize,
    pub height: usize,
    pub fx: f64,
    pub fy: f64,
    pub cx: f64,
    pub cy: f64,
    /// k1, k2, p1, p2, k3.
    pub distortion: [f64; 5],
    pub skew: f64,
    pub is_calibrated: bool,
    pub camera_id: String,
    pub max_frame_rate: f64,
    pub pixel_format: CameraPixelFormat,
    pub video_file: String,
    pub stream_url: String,
    pub source: CameraSource,
    pub scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            fx: 0.0,
            fy: 0.0,
            cx: 0.0,
            cy: 0.0,
            distortion: [0.0; 5],
            skew: 0.0,
            is_calibrated: false,
            camera_id: String::new(),
            max_frame_rate: 30.0,
            pixel_format: CameraPixelFormat::Invalid,
            video_file: String::new(),
            stream_url: String::new(),
            source: CameraSource::Unknown,
            scale: 1.0,
        }
    }
}

/// Calibrated cameras with their extrinsic transforms.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CameraSet {
    pub cameras: Vec<(Shared<Camera>, Option<Shared<Matrix4>>)>,
}

impl CameraSet {
    pub fn add_camera(&mut self, camera: Shared<Camera>) {
        self.cameras.push((camera, None));
    }

    pub fn set_extrinsic(&mut self, index: usize, matrix: Shared<Matrix4>) {
        if let Some(entry) = self.cameras.get_mut(index) {
            entry.1 = Some(matrix);
        }
    }

    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }
}
