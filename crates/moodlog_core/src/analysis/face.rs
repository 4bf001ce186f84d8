//! Facial emotion and age analysis over a local image file.
//!
//! # Invariants
//! - Only `jpg`, `jpeg` and `png` files are accepted.
//! - The result always holds at least one face; failures and "no face found"
//!   yield `FaceResult::neutral()`.

use super::{
    checked_extension, distribution_from_scores, ensure_non_empty_file, AnalyzerError,
    AnalyzerResult, LabelScore,
};
use crate::model::modality::{FaceObservation, FaceResult};
use log::{debug, warn};
use std::path::Path;

/// Image formats accepted by the face analyzer.
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Raw per-face model output.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFace {
    pub emotions: Vec<LabelScore>,
    pub age: Option<u32>,
}

/// Opaque face detector + expression/age estimator.
pub trait FaceModel {
    fn detect(&self, image_path: &Path) -> AnalyzerResult<Vec<RawFace>>;
}

/// Face analyzer owning its optional model handle.
#[derive(Default)]
pub struct FaceAnalyzer {
    model: Option<Box<dyn FaceModel>>,
}

impl FaceAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: Box<dyn FaceModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Analyzes one image; never fails.
    pub fn analyze(&self, image_path: &Path) -> FaceResult {
        match self.try_analyze(image_path) {
            Ok(result) => {
                debug!(
                    "event=face_analyze module=analysis status=ok faces={}",
                    result.faces.len()
                );
                result
            }
            Err(err) => {
                warn!(
                    "event=face_analyze module=analysis status=fallback error_code={} error={}",
                    err.code(),
                    err
                );
                FaceResult::neutral()
            }
        }
    }

    /// Analyzes one image and surfaces internal failures.
    ///
    /// Faces whose emotion scores carry no known label are dropped; an image
    /// with no usable face is reported as a model error.
    pub fn try_analyze(&self, image_path: &Path) -> AnalyzerResult<FaceResult> {
        checked_extension(image_path, SUPPORTED_IMAGE_EXTENSIONS)?;
        ensure_non_empty_file(image_path)?;

        let model = self
            .model
            .as_ref()
            .ok_or(AnalyzerError::Unavailable("face analysis model"))?;
        let faces = model
            .detect(image_path)?
            .into_iter()
            .filter_map(observation_from_raw)
            .collect::<Vec<_>>();

        if faces.is_empty() {
            return Err(AnalyzerError::Model("no face detected".to_string()));
        }
        Ok(FaceResult { faces })
    }
}

fn observation_from_raw(raw: RawFace) -> Option<FaceObservation> {
    let distribution = distribution_from_scores(&raw.emotions);
    if distribution.is_empty() {
        return None;
    }
    let dominant = distribution.dominant();
    Some(FaceObservation {
        emotion: dominant.label,
        emotion_confidence: dominant.confidence,
        distribution,
        age: raw.age,
    })
}

#[cfg(test)]
mod tests {
    use super::{FaceAnalyzer, FaceModel, RawFace};
    use crate::analysis::{AnalyzerError, AnalyzerResult, LabelScore};
    use crate::model::emotion::Emotion;
    use crate::model::modality::FaceResult;
    use std::io::Write;
    use std::path::Path;

    struct TwoFaces;

    impl FaceModel for TwoFaces {
        fn detect(&self, _image_path: &Path) -> AnalyzerResult<Vec<RawFace>> {
            Ok(vec![
                RawFace {
                    emotions: vec![LabelScore::new("happy", 0.81), LabelScore::new("surprise", 0.1)],
                    age: Some(27),
                },
                RawFace {
                    emotions: vec![LabelScore::new("sad", 0.6)],
                    age: None,
                },
            ])
        }
    }

    struct NoFaces;

    impl FaceModel for NoFaces {
        fn detect(&self, _image_path: &Path) -> AnalyzerResult<Vec<RawFace>> {
            Ok(Vec::new())
        }
    }

    fn image_file(suffix: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("create temp image file");
        file.write_all(&[0x89, b'P', b'N', b'G'])
            .expect("write temp image file");
        file
    }

    #[test]
    fn faces_keep_model_order_and_age() {
        let file = image_file(".png");
        let result = FaceAnalyzer::new()
            .with_model(Box::new(TwoFaces))
            .analyze(file.path());
        assert_eq!(result.faces.len(), 2);
        let first = result.first_face().unwrap();
        assert_eq!(first.emotion, Emotion::Happy);
        assert_eq!(first.emotion_confidence, 0.81);
        assert_eq!(first.age, Some(27));
    }

    #[test]
    fn no_detected_face_degrades_to_neutral_face() {
        let file = image_file(".jpeg");
        let analyzer = FaceAnalyzer::new().with_model(Box::new(NoFaces));
        assert!(matches!(
            analyzer.try_analyze(file.path()),
            Err(AnalyzerError::Model(_))
        ));
        assert_eq!(analyzer.analyze(file.path()), FaceResult::neutral());
    }

    #[test]
    fn unsupported_image_format_degrades_to_neutral() {
        let file = image_file(".gif");
        let analyzer = FaceAnalyzer::new().with_model(Box::new(TwoFaces));
        assert_eq!(analyzer.analyze(file.path()), FaceResult::neutral());
    }

    #[test]
    fn missing_model_degrades_to_neutral() {
        let file = image_file(".jpg");
        assert_eq!(FaceAnalyzer::new().analyze(file.path()), FaceResult::neutral());
    }
}
