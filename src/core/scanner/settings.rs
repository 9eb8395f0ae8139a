//! Tuning knobs forwarded to the external scanner.

use crate::error::CzkError;
use serde::{Deserialize, Serialize};

/// Allowed perceptual hash sizes for image scans
pub const HASH_SIZES: [u8; 4] = [8, 16, 32, 64];

/// Upper bound of the video similarity tolerance
pub const MAX_VIDEO_TOLERANCE: u8 = 20;

/// Image similarity preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ImageSimilarity {
    Minimal,
    VeryLow,
    Low,
    Medium,
    #[default]
    High,
    VeryHigh,
    None,
}

impl ImageSimilarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSimilarity::Minimal => "Minimal",
            ImageSimilarity::VeryLow => "VeryLow",
            ImageSimilarity::Low => "Low",
            ImageSimilarity::Medium => "Medium",
            ImageSimilarity::High => "High",
            ImageSimilarity::VeryHigh => "VeryHigh",
            ImageSimilarity::None => "None",
        }
    }
}

/// Image hash algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HashAlgorithm {
    Mean,
    #[default]
    Gradient,
    Blockhash,
    VertGradient,
    DoubleGradient,
    Median,
}

impl HashAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Mean => "Mean",
            HashAlgorithm::Gradient => "Gradient",
            HashAlgorithm::Blockhash => "Blockhash",
            HashAlgorithm::VertGradient => "VertGradient",
            HashAlgorithm::DoubleGradient => "DoubleGradient",
            HashAlgorithm::Median => "Median",
        }
    }
}

/// Resize filter applied before image hashing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ResizeFilter {
    #[default]
    Lanczos3,
    Nearest,
    Triangle,
    Faussian,
    Catmullrom,
}

impl ResizeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResizeFilter::Lanczos3 => "Lanczos3",
            ResizeFilter::Nearest => "Nearest",
            ResizeFilter::Triangle => "Triangle",
            ResizeFilter::Faussian => "Faussian",
            ResizeFilter::Catmullrom => "Catmullrom",
        }
    }
}

/// Settings for one scanner invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerSettings {
    pub image_similarity: ImageSimilarity,
    pub hash_size: u8,
    pub hash_algorithm: HashAlgorithm,
    pub image_filter: ResizeFilter,
    pub video_tolerance: u8,
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            image_similarity: ImageSimilarity::default(),
            hash_size: 32,
            hash_algorithm: HashAlgorithm::default(),
            image_filter: ResizeFilter::default(),
            video_tolerance: 10,
        }
    }
}

impl ScannerSettings {
    pub fn image_similarity(mut self, similarity: ImageSimilarity) -> Self {
        self.image_similarity = similarity;
        self
    }

    pub fn hash_size(mut self, size: u8) -> Self {
        self.hash_size = size;
        self
    }

    pub fn hash_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.hash_algorithm = algorithm;
        self
    }

    pub fn image_filter(mut self, filter: ResizeFilter) -> Self {
        self.image_filter = filter;
        self
    }

    pub fn video_tolerance(mut self, tolerance: u8) -> Self {
        self.video_tolerance = tolerance;
        self
    }

    pub fn validate(&self) -> Result<(), CzkError> {
        if !HASH_SIZES.contains(&self.hash_size) {
            return Err(CzkError::Config(format!(
                "Invalid hash size: {} (must be one of 8, 16, 32, 64)",
                self.hash_size
            )));
        }
        if self.video_tolerance > MAX_VIDEO_TOLERANCE {
            return Err(CzkError::Config(format!(
                "Video tolerance must be in range [0, {}], got {}",
                MAX_VIDEO_TOLERANCE, self.video_tolerance
            )));
        }
        Ok(())
    }
}
