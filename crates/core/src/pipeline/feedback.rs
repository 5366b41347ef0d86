//! Fixed user-feedback catalog, one message per gate condition.

use serde::Serialize;

use crate::color::cct::CctBand;
use crate::error::{AnalysisError, QualityRejection};
use crate::quality::exposure::Exposure;
use crate::quality::gate::QualityGrade;
use crate::uniformity::analyzer::ShadowSeverity;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Locale {
    En,
    Ko,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum FeedbackKey {
    SharpnessRejected,
    SharpnessWarning,
    SharpnessAcceptable,
    SharpnessOptimal,
    ExposureUnder,
    ExposureNormal,
    ExposureOver,
    AmbientTooWarm,
    AmbientWarm,
    AmbientNeutral,
    AmbientCool,
    AmbientTooCool,
    LowResolution,
    FaceNotDetected,
    MultipleFaces,
    FaceAngle,
    LowFrontality,
    InsufficientSkin,
    ProviderUnavailable,
    ShadowNone,
    ShadowMild,
    ShadowModerate,
    ShadowSevere,
    LowConfidence,
}

pub const ALL_KEYS: [FeedbackKey; 24] = [
    FeedbackKey::SharpnessRejected,
    FeedbackKey::SharpnessWarning,
    FeedbackKey::SharpnessAcceptable,
    FeedbackKey::SharpnessOptimal,
    FeedbackKey::ExposureUnder,
    FeedbackKey::ExposureNormal,
    FeedbackKey::ExposureOver,
    FeedbackKey::AmbientTooWarm,
    FeedbackKey::AmbientWarm,
    FeedbackKey::AmbientNeutral,
    FeedbackKey::AmbientCool,
    FeedbackKey::AmbientTooCool,
    FeedbackKey::LowResolution,
    FeedbackKey::FaceNotDetected,
    FeedbackKey::MultipleFaces,
    FeedbackKey::FaceAngle,
    FeedbackKey::LowFrontality,
    FeedbackKey::InsufficientSkin,
    FeedbackKey::ProviderUnavailable,
    FeedbackKey::ShadowNone,
    FeedbackKey::ShadowMild,
    FeedbackKey::ShadowModerate,
    FeedbackKey::ShadowSevere,
    FeedbackKey::LowConfidence,
];

impl FeedbackKey {
    pub fn message(self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.english(),
            Locale::Ko => self.korean(),
        }
    }

    fn english(self) -> &'static str {
        match self {
            FeedbackKey::SharpnessRejected => {
                "The photo is too blurry. Hold the camera steady and try again."
            }
            FeedbackKey::SharpnessWarning => {
                "The photo is slightly soft, which may reduce accuracy."
            }
            FeedbackKey::SharpnessAcceptable => "Photo sharpness is good.",
            FeedbackKey::SharpnessOptimal => "Photo sharpness is excellent.",
            FeedbackKey::ExposureUnder => {
                "The photo is a bit dark. Move to a brighter spot and retake."
            }
            FeedbackKey::ExposureNormal => "Exposure looks good.",
            FeedbackKey::ExposureOver => {
                "The photo is a bit bright. Step away from direct light."
            }
            FeedbackKey::AmbientTooWarm => {
                "The lighting is very warm, so colors may shift toward orange."
            }
            FeedbackKey::AmbientWarm => "The lighting is on the warm side.",
            FeedbackKey::AmbientNeutral => "The lighting is neutral, ideal for analysis.",
            FeedbackKey::AmbientCool => "The lighting is on the cool side.",
            FeedbackKey::AmbientTooCool => {
                "The lighting is very cool, so colors may shift toward blue."
            }
            FeedbackKey::LowResolution => {
                "The photo resolution is too low. Use a higher-resolution photo."
            }
            FeedbackKey::FaceNotDetected => {
                "No face was found. Face the camera directly and retake."
            }
            FeedbackKey::MultipleFaces => {
                "More than one face was detected. Photograph one person at a time."
            }
            FeedbackKey::FaceAngle => {
                "Your face is turned too far. Look straight at the camera."
            }
            FeedbackKey::LowFrontality => {
                "Face the camera more directly for an accurate reading."
            }
            FeedbackKey::InsufficientSkin => {
                "Not enough bare skin is visible. Remove anything covering the face."
            }
            FeedbackKey::ProviderUnavailable => {
                "Face analysis was unavailable, so an approximate result is shown."
            }
            FeedbackKey::ShadowNone => "Lighting is even across the face.",
            FeedbackKey::ShadowMild => "A slight shadow falls on one side of the face.",
            FeedbackKey::ShadowModerate => "One side of the face is noticeably shadowed.",
            FeedbackKey::ShadowSevere => {
                "A strong shadow covers one side. Face an even light source."
            }
            FeedbackKey::LowConfidence => {
                "Confidence in this result is low. Retake in even, neutral lighting."
            }
        }
    }

    fn korean(self) -> &'static str {
        match self {
            FeedbackKey::SharpnessRejected => {
                "사진이 너무 흐립니다. 카메라를 고정하고 다시 촬영해 주세요."
            }
            FeedbackKey::SharpnessWarning => {
                "사진이 약간 흐릿하여 정확도가 낮아질 수 있습니다."
            }
            FeedbackKey::SharpnessAcceptable => "사진 선명도가 양호합니다.",
            FeedbackKey::SharpnessOptimal => "사진 선명도가 매우 좋습니다.",
            FeedbackKey::ExposureUnder => {
                "사진이 다소 어둡습니다. 더 밝은 곳에서 다시 촬영해 주세요."
            }
            FeedbackKey::ExposureNormal => "노출이 적절합니다.",
            FeedbackKey::ExposureOver => {
                "사진이 다소 밝습니다. 직사광을 피해 주세요."
            }
            FeedbackKey::AmbientTooWarm => {
                "조명이 매우 따뜻하여 색이 주황빛으로 치우칠 수 있습니다."
            }
            FeedbackKey::AmbientWarm => "조명이 따뜻한 편입니다.",
            FeedbackKey::AmbientNeutral => "조명이 중립적이어서 분석에 적합합니다.",
            FeedbackKey::AmbientCool => "조명이 차가운 편입니다.",
            FeedbackKey::AmbientTooCool => {
                "조명이 매우 차가워 색이 푸른빛으로 치우칠 수 있습니다."
            }
            FeedbackKey::LowResolution => {
                "사진 해상도가 너무 낮습니다. 더 높은 해상도의 사진을 사용해 주세요."
            }
            FeedbackKey::FaceNotDetected => {
                "얼굴을 찾지 못했습니다. 카메라를 정면으로 바라보고 다시 촬영해 주세요."
            }
            FeedbackKey::MultipleFaces => {
                "여러 명의 얼굴이 감지되었습니다. 한 명씩 촬영해 주세요."
            }
            FeedbackKey::FaceAngle => {
                "얼굴이 너무 돌아가 있습니다. 카메라를 정면으로 봐 주세요."
            }
            FeedbackKey::LowFrontality => {
                "정확한 분석을 위해 얼굴을 좀 더 정면으로 향해 주세요."
            }
            FeedbackKey::InsufficientSkin => {
                "피부가 충분히 보이지 않습니다. 얼굴을 가리는 것을 치워 주세요."
            }
            FeedbackKey::ProviderUnavailable => {
                "얼굴 분석 기능을 사용할 수 없어 대략적인 결과를 표시합니다."
            }
            FeedbackKey::ShadowNone => "얼굴 전체에 조명이 고르게 비칩니다.",
            FeedbackKey::ShadowMild => "얼굴 한쪽에 옅은 그림자가 있습니다.",
            FeedbackKey::ShadowModerate => "얼굴 한쪽에 그림자가 뚜렷합니다.",
            FeedbackKey::ShadowSevere => {
                "한쪽 그림자가 강합니다. 균일한 조명을 바라봐 주세요."
            }
            FeedbackKey::LowConfidence => {
                "결과 신뢰도가 낮습니다. 균일하고 중립적인 조명에서 다시 촬영해 주세요."
            }
        }
    }

    pub fn for_sharpness(grade: QualityGrade) -> FeedbackKey {
        match grade {
            QualityGrade::Rejected => FeedbackKey::SharpnessRejected,
            QualityGrade::Warning => FeedbackKey::SharpnessWarning,
            QualityGrade::Acceptable => FeedbackKey::SharpnessAcceptable,
            QualityGrade::Optimal => FeedbackKey::SharpnessOptimal,
        }
    }

    pub fn for_exposure(exposure: Exposure) -> FeedbackKey {
        match exposure {
            Exposure::Underexposed => FeedbackKey::ExposureUnder,
            Exposure::Normal => FeedbackKey::ExposureNormal,
            Exposure::Overexposed => FeedbackKey::ExposureOver,
        }
    }

    pub fn for_cct_band(band: CctBand) -> FeedbackKey {
        match band {
            CctBand::TooWarm => FeedbackKey::AmbientTooWarm,
            CctBand::Warm => FeedbackKey::AmbientWarm,
            CctBand::Neutral => FeedbackKey::AmbientNeutral,
            CctBand::Cool => FeedbackKey::AmbientCool,
            CctBand::TooCool => FeedbackKey::AmbientTooCool,
        }
    }

    pub fn for_shadow(severity: ShadowSeverity) -> FeedbackKey {
        match severity {
            ShadowSeverity::None => FeedbackKey::ShadowNone,
            ShadowSeverity::Mild => FeedbackKey::ShadowMild,
            ShadowSeverity::Moderate => FeedbackKey::ShadowModerate,
            ShadowSeverity::Severe => FeedbackKey::ShadowSevere,
        }
    }

    /// Message key for a terminal rejection, when one applies.
    /// Cancellation and deadline errors are caller-driven and carry no
    /// retake advice.
    pub fn for_error(error: &AnalysisError) -> Option<FeedbackKey> {
        match error {
            AnalysisError::InvalidFrame { .. } => None,
            AnalysisError::ImageQualityRejected { reason, .. } => Some(match reason {
                QualityRejection::Blur => FeedbackKey::SharpnessRejected,
                QualityRejection::LowResolution => FeedbackKey::LowResolution,
                QualityRejection::Underexposed => FeedbackKey::ExposureUnder,
                QualityRejection::Overexposed => FeedbackKey::ExposureOver,
            }),
            AnalysisError::FaceNotDetected | AnalysisError::LandmarkCountMismatch { .. } => {
                Some(FeedbackKey::FaceNotDetected)
            }
            AnalysisError::MultipleFacesDetected { .. } => Some(FeedbackKey::MultipleFaces),
            AnalysisError::FaceAngleExceeded { .. } => Some(FeedbackKey::FaceAngle),
            AnalysisError::LowFrontality { .. } => Some(FeedbackKey::LowFrontality),
            AnalysisError::InsufficientSkinCoverage { .. } => {
                Some(FeedbackKey::InsufficientSkin)
            }
            AnalysisError::ProviderFailure { .. } | AnalysisError::ProviderTimeout { .. } => {
                Some(FeedbackKey::ProviderUnavailable)
            }
            AnalysisError::Cancelled | AnalysisError::DeadlineExceeded { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_key_in_both_locales() {
        for key in ALL_KEYS {
            assert!(!key.message(Locale::En).is_empty(), "{key:?} missing En");
            assert!(!key.message(Locale::Ko).is_empty(), "{key:?} missing Ko");
        }
    }

    #[test]
    fn test_locales_differ() {
        for key in ALL_KEYS {
            assert_ne!(
                key.message(Locale::En),
                key.message(Locale::Ko),
                "{key:?} not localized"
            );
        }
    }

    #[test]
    fn test_every_rejection_reason_has_a_message() {
        let rejections = [
            AnalysisError::FaceNotDetected,
            AnalysisError::MultipleFacesDetected { count: 2 },
            AnalysisError::LandmarkCountMismatch {
                count: 33,
                expected: 468,
            },
            AnalysisError::InsufficientSkinCoverage {
                best_coverage: 10.0,
                floor: 30.0,
            },
            AnalysisError::ProviderFailure {
                message: "down".into(),
            },
        ];
        for error in rejections {
            assert!(FeedbackKey::for_error(&error).is_some(), "{error}");
        }
    }

    #[test]
    fn test_caller_driven_exits_have_no_message() {
        assert_eq!(FeedbackKey::for_error(&AnalysisError::Cancelled), None);
        assert_eq!(
            FeedbackKey::for_error(&AnalysisError::DeadlineExceeded { stage: "geometry" }),
            None
        );
    }
}
