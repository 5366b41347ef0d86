//! Reference Lab anchor per tone.
//!
//! Values are cluster centers of calibrated skin readings grouped by
//! tone label; they anchor both scoring and adjacency.

use crate::classify::tone::TwelveTone;
use crate::shared::lab::LabColor;

pub fn reference_lab(tone: TwelveTone) -> LabColor {
    let (l, a, b) = match tone {
        TwelveTone::SpringLight => (72.0, 10.0, 24.0),
        TwelveTone::SpringBright => (68.0, 13.0, 27.0),
        TwelveTone::SpringTrue => (65.0, 12.0, 23.0),
        TwelveTone::SummerLight => (70.0, 8.0, 14.0),
        TwelveTone::SummerMuted => (62.0, 7.0, 12.0),
        TwelveTone::SummerTrue => (66.0, 9.0, 15.0),
        TwelveTone::AutumnMuted => (57.0, 10.0, 20.0),
        TwelveTone::AutumnDeep => (48.0, 13.0, 24.0),
        TwelveTone::AutumnTrue => (55.0, 12.0, 22.0),
        TwelveTone::WinterBright => (59.0, 10.0, 12.0),
        TwelveTone::WinterDeep => (42.0, 9.0, 11.0),
        TwelveTone::WinterTrue => (52.0, 8.0, 10.0),
    };
    LabColor::new(l, a, b)
}
