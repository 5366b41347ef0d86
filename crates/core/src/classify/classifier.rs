//! Stage 5: undertone, season, subtype, and twelve-tone scoring.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::classify::reference::reference_lab;
use crate::classify::tone::{Season, Subtype, TwelveTone, ALL_TONES};
use crate::shared::lab::LabColor;

/// Chroma below this is treated as achromatic and forced to Neutral.
pub const NEUTRAL_CHROMA_MAX: f64 = 10.0;

/// Warm requires both a hue past this angle and b* past the floor;
/// Cool requires both below. Anything mixed is Neutral.
pub const WARM_HUE_MIN: f64 = 60.0;
pub const WARM_B_MIN: f64 = 19.0;

/// Neutral samples pick a season lean from raw hue at this angle.
pub const NEUTRAL_WARM_HUE_MIN: f64 = 65.0;

/// L* floor separating the light seasons (spring/summer) from the
/// deep seasons (autumn/winter).
pub const LIGHT_SEASON_L_MIN: f64 = 60.0;

/// Per-season subtype cutoffs. These are the tuning knobs for a labeled
/// dataset; the shipped values are calibrated so each reference point
/// classifies back to its own tone.
pub const SPRING_LIGHT_L_MIN: f64 = 70.0;
pub const SPRING_BRIGHT_CHROMA_MIN: f64 = 28.0;
pub const SUMMER_LIGHT_L_MIN: f64 = 69.0;
pub const SUMMER_MUTED_CHROMA_MAX: f64 = 14.0;
pub const AUTUMN_DEEP_L_MAX: f64 = 51.0;
pub const AUTUMN_MUTED_CHROMA_MAX: f64 = 23.0;
pub const WINTER_DEEP_L_MAX: f64 = 46.0;
pub const WINTER_BRIGHT_CHROMA_MIN: f64 = 14.0;

/// Weighted Lab distance emphasizes the chromatic axes over L*.
const DISTANCE_WEIGHTS: [f64; 3] = [1.0, 1.5, 1.5];
/// e-folding distance of the similarity map.
const SCORE_SIGMA: f64 = 18.0;

pub const LOW_CONFIDENCE_FLOOR: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Undertone {
    Warm,
    Cool,
    Neutral,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SkinBrightness {
    VeryLight,
    Light,
    Intermediate,
    Tan,
    Dark,
}

#[derive(Clone, Debug, Serialize)]
pub struct ToneClassificationResult {
    pub tone: TwelveTone,
    pub season: Season,
    pub subtype: Subtype,
    pub undertone: Undertone,
    pub confidence: f64,
    pub tone_scores: BTreeMap<TwelveTone, f64>,
    pub measured: LabColor,
    pub skin_brightness: SkinBrightness,
    /// Set when confidence falls below the floor. The result is still
    /// returned in full; the flag is the only consequence.
    pub low_confidence: bool,
}

pub struct ToneClassifier;

impl ToneClassifier {
    /// `reliability` is the lighting-uniformity composite from the
    /// previous stage, 0 to 100.
    pub fn classify(measured: &LabColor, reliability: f64) -> ToneClassificationResult {
        let measured = sanitize(measured);
        let reliability = if reliability.is_finite() {
            reliability.clamp(0.0, 100.0)
        } else {
            0.0
        };

        let (undertone, undertone_confidence) = Self::determine_undertone(&measured);
        let season = Self::determine_season(&measured, undertone);
        let subtype = Self::determine_subtype(&measured, season);
        let tone = TwelveTone::compose(season, subtype);

        let tone_scores = Self::tone_scores(&measured);
        let confidence =
            Self::confidence(&tone_scores, reliability, undertone_confidence);

        ToneClassificationResult {
            tone,
            season,
            subtype,
            undertone,
            confidence,
            tone_scores,
            measured,
            skin_brightness: Self::skin_brightness(&measured),
            low_confidence: confidence < LOW_CONFIDENCE_FLOOR,
        }
    }

    /// Returns the undertone and the classifier's confidence in it.
    /// Achromatic samples are Neutral regardless of hue, below 70;
    /// a clear Warm or Cool always lands above 70.
    pub fn determine_undertone(lab: &LabColor) -> (Undertone, f64) {
        let chroma = lab.chroma();
        if chroma < NEUTRAL_CHROMA_MAX {
            return (Undertone::Neutral, 55.0);
        }
        let hue = lab.hue_degrees();
        if hue > WARM_HUE_MIN && lab.b > WARM_B_MIN {
            let margin = ((hue - WARM_HUE_MIN) / 20.0).min((lab.b - WARM_B_MIN) / 8.0);
            (Undertone::Warm, 70.0 + 25.0 * margin.min(1.0))
        } else if hue < WARM_HUE_MIN && lab.b < WARM_B_MIN {
            let margin = ((WARM_HUE_MIN - hue) / 20.0).min((WARM_B_MIN - lab.b) / 8.0);
            (Undertone::Cool, 70.0 + 25.0 * margin.min(1.0))
        } else {
            (Undertone::Neutral, 60.0)
        }
    }

    fn determine_season(lab: &LabColor, undertone: Undertone) -> Season {
        let warm_leaning = match undertone {
            Undertone::Warm => true,
            Undertone::Cool => false,
            Undertone::Neutral => lab.hue_degrees() >= NEUTRAL_WARM_HUE_MIN,
        };
        let light = lab.l >= LIGHT_SEASON_L_MIN;
        match (warm_leaning, light) {
            (true, true) => Season::Spring,
            (true, false) => Season::Autumn,
            (false, true) => Season::Summer,
            (false, false) => Season::Winter,
        }
    }

    fn determine_subtype(lab: &LabColor, season: Season) -> Subtype {
        let chroma = lab.chroma();
        match season {
            Season::Spring if lab.l >= SPRING_LIGHT_L_MIN => Subtype::Light,
            Season::Spring if chroma >= SPRING_BRIGHT_CHROMA_MIN => Subtype::Bright,
            Season::Summer if lab.l >= SUMMER_LIGHT_L_MIN => Subtype::Light,
            Season::Summer if chroma < SUMMER_MUTED_CHROMA_MAX => Subtype::Muted,
            Season::Autumn if lab.l < AUTUMN_DEEP_L_MAX => Subtype::Deep,
            Season::Autumn if chroma < AUTUMN_MUTED_CHROMA_MAX => Subtype::Muted,
            Season::Winter if lab.l < WINTER_DEEP_L_MAX => Subtype::Deep,
            Season::Winter if chroma >= WINTER_BRIGHT_CHROMA_MIN => Subtype::Bright,
            _ => Subtype::True,
        }
    }

    /// Similarity of `measured` to each reference tone, 0 to 100.
    /// The map is strictly decreasing in weighted Lab distance, so the
    /// reference point itself scores exactly 100.
    pub fn tone_scores(measured: &LabColor) -> BTreeMap<TwelveTone, f64> {
        ALL_TONES
            .iter()
            .map(|&tone| {
                let d = weighted_distance(measured, &reference_lab(tone));
                (tone, 100.0 * (-d / SCORE_SIGMA).exp())
            })
            .collect()
    }

    /// Pairwise tone similarity on the reference anchors; 100 for a
    /// tone against itself, symmetric in its arguments.
    pub fn tone_similarity(t1: TwelveTone, t2: TwelveTone) -> f64 {
        if t1 == t2 {
            return 100.0;
        }
        let d = weighted_distance(&reference_lab(t1), &reference_lab(t2));
        100.0 * (-d / SCORE_SIGMA).exp()
    }

    /// The `k` nearest other tones, most similar first.
    pub fn adjacent_tones(tone: TwelveTone, k: usize) -> Vec<TwelveTone> {
        let mut others: Vec<(TwelveTone, f64)> = ALL_TONES
            .iter()
            .filter(|&&t| t != tone)
            .map(|&t| (t, Self::tone_similarity(tone, t)))
            .collect();
        others.sort_by(|a, b| b.1.total_cmp(&a.1));
        others.truncate(k);
        others.into_iter().map(|(t, _)| t).collect()
    }

    fn confidence(
        scores: &BTreeMap<TwelveTone, f64>,
        reliability: f64,
        undertone_confidence: f64,
    ) -> f64 {
        let mut best = 0.0_f64;
        let mut second = 0.0_f64;
        for &score in scores.values() {
            if score > best {
                second = best;
                best = score;
            } else if score > second {
                second = score;
            }
        }
        let margin_score = ((best - second) * 5.0).min(100.0);
        (0.5 * margin_score + 0.3 * reliability + 0.2 * undertone_confidence)
            .clamp(0.0, 100.0)
    }

    /// Individual Typology Angle bucketing. Reporting only; never feeds
    /// back into tone selection. A b* too close to zero for the angle
    /// to mean anything degrades to Intermediate.
    pub fn skin_brightness(lab: &LabColor) -> SkinBrightness {
        if lab.b.abs() < 1e-6 {
            return SkinBrightness::Intermediate;
        }
        let ita = ((lab.l - 50.0) / lab.b).atan().to_degrees();
        if ita > 55.0 {
            SkinBrightness::VeryLight
        } else if ita > 41.0 {
            SkinBrightness::Light
        } else if ita > 28.0 {
            SkinBrightness::Intermediate
        } else if ita > 10.0 {
            SkinBrightness::Tan
        } else {
            SkinBrightness::Dark
        }
    }
}

fn weighted_distance(a: &LabColor, b: &LabColor) -> f64 {
    let dl = a.l - b.l;
    let da = a.a - b.a;
    let db = a.b - b.b;
    (DISTANCE_WEIGHTS[0] * dl * dl
        + DISTANCE_WEIGHTS[1] * da * da
        + DISTANCE_WEIGHTS[2] * db * db)
        .sqrt()
}

fn sanitize(lab: &LabColor) -> LabColor {
    if lab.l.is_finite() && lab.a.is_finite() && lab.b.is_finite() {
        *lab
    } else {
        LabColor::new(50.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    // ── undertone ──

    #[rstest]
    #[case::high_hue_high_b(70.0, 10.0, 25.0)]
    #[case::boundary_clearance(65.0, 12.0, 26.0)]
    #[case::deep_warm(45.0, 14.0, 28.0)]
    fn test_warm_triples_exceed_seventy(#[case] l: f64, #[case] a: f64, #[case] b: f64) {
        let lab = LabColor::new(l, a, b);
        assert!(lab.hue_degrees() > WARM_HUE_MIN && lab.b > WARM_B_MIN);
        let (undertone, confidence) = ToneClassifier::determine_undertone(&lab);
        assert_eq!(undertone, Undertone::Warm);
        assert!(confidence > 70.0);
    }

    #[rstest]
    #[case::low_hue_low_b(55.0, 10.0, 11.0)]
    #[case::cool_deep(42.0, 9.0, 10.5)]
    fn test_cool_triples_exceed_seventy(#[case] l: f64, #[case] a: f64, #[case] b: f64) {
        let lab = LabColor::new(l, a, b);
        assert!(lab.hue_degrees() < WARM_HUE_MIN && lab.b < WARM_B_MIN);
        let (undertone, confidence) = ToneClassifier::determine_undertone(&lab);
        assert_eq!(undertone, Undertone::Cool);
        assert!(confidence > 70.0);
    }

    #[rstest]
    #[case::achromatic(60.0, 0.0, 0.0)]
    #[case::near_achromatic_warm_hue(60.0, 2.0, 6.0)]
    #[case::near_achromatic_cool_hue(60.0, 6.0, 2.0)]
    fn test_low_chroma_forces_neutral_below_seventy(
        #[case] l: f64,
        #[case] a: f64,
        #[case] b: f64,
    ) {
        let lab = LabColor::new(l, a, b);
        assert!(lab.chroma() < NEUTRAL_CHROMA_MAX);
        let (undertone, confidence) = ToneClassifier::determine_undertone(&lab);
        assert_eq!(undertone, Undertone::Neutral);
        assert!(confidence < 70.0);
    }

    #[test]
    fn test_mixed_signals_are_neutral() {
        // Warm hue but b* below the floor
        let lab = LabColor::new(70.0, 8.0, 15.0);
        assert!(lab.hue_degrees() > WARM_HUE_MIN);
        let (undertone, _) = ToneClassifier::determine_undertone(&lab);
        assert_eq!(undertone, Undertone::Neutral);
    }

    // ── season and tone ──

    #[test]
    fn test_warm_light_sample_is_spring() {
        let result = ToneClassifier::classify(&LabColor::new(70.0, 12.0, 26.0), 100.0);
        assert_eq!(result.season, Season::Spring);
        assert_eq!(result.undertone, Undertone::Warm);
        assert!(result.confidence > 0.0);
    }

    #[test]
    fn test_cool_deep_sample_is_winter() {
        let result = ToneClassifier::classify(&LabColor::new(50.0, 8.0, 10.0), 100.0);
        assert_eq!(result.season, Season::Winter);
        assert_eq!(result.undertone, Undertone::Cool);
    }

    #[test]
    fn test_tone_composes_from_season_and_subtype() {
        for tone in ALL_TONES {
            let result = ToneClassifier::classify(&reference_lab(tone), 100.0);
            assert_eq!(
                result.tone,
                TwelveTone::compose(result.season, result.subtype)
            );
        }
    }

    #[test]
    fn test_reference_points_classify_to_their_own_tone() {
        for tone in ALL_TONES {
            let result = ToneClassifier::classify(&reference_lab(tone), 100.0);
            assert_eq!(result.tone, tone, "reference for {tone:?} misclassified");
        }
    }

    #[test]
    fn test_subtype_cutoffs_sit_inside_their_season_band() {
        // Light subtypes live above the season L* split, deep below it.
        assert!(SPRING_LIGHT_L_MIN > LIGHT_SEASON_L_MIN);
        assert!(SUMMER_LIGHT_L_MIN > LIGHT_SEASON_L_MIN);
        assert!(AUTUMN_DEEP_L_MAX < LIGHT_SEASON_L_MIN);
        assert!(WINTER_DEEP_L_MAX < LIGHT_SEASON_L_MIN);
        // Bright subtypes demand more chroma than the achromatic floor.
        assert!(SPRING_BRIGHT_CHROMA_MIN > NEUTRAL_CHROMA_MAX);
        assert!(WINTER_BRIGHT_CHROMA_MIN > NEUTRAL_CHROMA_MAX);
    }

    // ── scoring ──

    #[test]
    fn test_self_similarity_scores_hundred() {
        for tone in ALL_TONES {
            let scores = ToneClassifier::tone_scores(&reference_lab(tone));
            assert!(scores[&tone] > 95.0, "{tone:?} self-score too low");
        }
    }

    #[test]
    fn test_scores_cover_all_twelve_tones() {
        let scores = ToneClassifier::tone_scores(&LabColor::new(60.0, 10.0, 18.0));
        assert_eq!(scores.len(), 12);
        for score in scores.values() {
            assert!(*score >= 0.0 && *score <= 100.0);
        }
    }

    #[test]
    fn test_scores_decrease_with_distance() {
        let anchor = reference_lab(TwelveTone::SpringTrue);
        let near = LabColor::new(anchor.l + 2.0, anchor.a, anchor.b);
        let far = LabColor::new(anchor.l + 15.0, anchor.a, anchor.b);
        let near_score = ToneClassifier::tone_scores(&near)[&TwelveTone::SpringTrue];
        let far_score = ToneClassifier::tone_scores(&far)[&TwelveTone::SpringTrue];
        assert!(near_score > far_score);
    }

    #[test]
    fn test_similarity_identity_and_symmetry() {
        for t1 in ALL_TONES {
            assert_relative_eq!(ToneClassifier::tone_similarity(t1, t1), 100.0);
            for t2 in ALL_TONES {
                assert_relative_eq!(
                    ToneClassifier::tone_similarity(t1, t2),
                    ToneClassifier::tone_similarity(t2, t1)
                );
            }
        }
    }

    #[test]
    fn test_opposite_seasons_are_least_similar() {
        let to_spring_true =
            ToneClassifier::tone_similarity(TwelveTone::SpringBright, TwelveTone::SpringTrue);
        let to_winter_deep =
            ToneClassifier::tone_similarity(TwelveTone::SpringBright, TwelveTone::WinterDeep);
        assert!(to_winter_deep < to_spring_true);
    }

    #[test]
    fn test_adjacent_tones_excludes_self_and_sorts_descending() {
        let adjacent = ToneClassifier::adjacent_tones(TwelveTone::SummerTrue, 3);
        assert_eq!(adjacent.len(), 3);
        assert!(!adjacent.contains(&TwelveTone::SummerTrue));
        let sims: Vec<f64> = adjacent
            .iter()
            .map(|&t| ToneClassifier::tone_similarity(TwelveTone::SummerTrue, t))
            .collect();
        assert!(sims[0] >= sims[1] && sims[1] >= sims[2]);
    }

    #[test]
    fn test_adjacent_tones_caps_at_eleven() {
        assert_eq!(
            ToneClassifier::adjacent_tones(TwelveTone::SpringLight, 50).len(),
            11
        );
    }

    // ── confidence ──

    #[test]
    fn test_low_reliability_lowers_confidence() {
        let lab = LabColor::new(65.0, 12.0, 23.0);
        let steady = ToneClassifier::classify(&lab, 100.0);
        let shaky = ToneClassifier::classify(&lab, 10.0);
        assert!(shaky.confidence < steady.confidence);
    }

    #[test]
    fn test_low_confidence_flag_tracks_floor() {
        // Achromatic sample under poor lighting: every signal weak
        let result = ToneClassifier::classify(&LabColor::new(58.0, 1.0, 1.0), 0.0);
        assert_eq!(result.low_confidence, result.confidence < LOW_CONFIDENCE_FLOOR);
        assert!(result.low_confidence);
    }

    // ── degradation ──

    #[test]
    fn test_non_finite_inputs_degrade_to_defaults() {
        let lab = LabColor {
            l: f64::NAN,
            a: f64::INFINITY,
            b: -3.0,
        };
        let result = ToneClassifier::classify(&lab, f64::NAN);
        assert!(result.confidence.is_finite());
        assert_eq!(result.undertone, Undertone::Neutral);
        assert_eq!(result.tone_scores.len(), 12);
    }

    #[test]
    fn test_zero_b_star_defaults_brightness() {
        let lab = LabColor::new(80.0, 5.0, 0.0);
        assert_eq!(
            ToneClassifier::skin_brightness(&lab),
            SkinBrightness::Intermediate
        );
    }

    #[rstest]
    #[case::very_light(80.0, 4.0, 12.0, SkinBrightness::VeryLight)]
    #[case::light(65.0, 8.0, 16.0, SkinBrightness::Light)]
    #[case::intermediate(60.0, 10.0, 18.0, SkinBrightness::Intermediate)]
    #[case::tan(54.0, 12.0, 20.0, SkinBrightness::Tan)]
    #[case::dark(42.0, 12.0, 22.0, SkinBrightness::Dark)]
    fn test_ita_buckets(
        #[case] l: f64,
        #[case] a: f64,
        #[case] b: f64,
        #[case] expected: SkinBrightness,
    ) {
        assert_eq!(
            ToneClassifier::skin_brightness(&LabColor::new(l, a, b)),
            expected
        );
    }
}
