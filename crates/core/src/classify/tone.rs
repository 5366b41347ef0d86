//! The twelve-tone taxonomy: 4 seasons, each with 3 subtypes.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Subtype {
    Light,
    Bright,
    True,
    Muted,
    Deep,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TwelveTone {
    SpringLight,
    SpringBright,
    SpringTrue,
    SummerLight,
    SummerMuted,
    SummerTrue,
    AutumnMuted,
    AutumnDeep,
    AutumnTrue,
    WinterBright,
    WinterDeep,
    WinterTrue,
}

pub const ALL_TONES: [TwelveTone; 12] = [
    TwelveTone::SpringLight,
    TwelveTone::SpringBright,
    TwelveTone::SpringTrue,
    TwelveTone::SummerLight,
    TwelveTone::SummerMuted,
    TwelveTone::SummerTrue,
    TwelveTone::AutumnMuted,
    TwelveTone::AutumnDeep,
    TwelveTone::AutumnTrue,
    TwelveTone::WinterBright,
    TwelveTone::WinterDeep,
    TwelveTone::WinterTrue,
];

impl TwelveTone {
    /// Total composition. A subtype the season does not carry collapses
    /// to the season's True tone, so composition never fails.
    pub fn compose(season: Season, subtype: Subtype) -> TwelveTone {
        match (season, subtype) {
            (Season::Spring, Subtype::Light) => TwelveTone::SpringLight,
            (Season::Spring, Subtype::Bright) => TwelveTone::SpringBright,
            (Season::Spring, _) => TwelveTone::SpringTrue,
            (Season::Summer, Subtype::Light) => TwelveTone::SummerLight,
            (Season::Summer, Subtype::Muted) => TwelveTone::SummerMuted,
            (Season::Summer, _) => TwelveTone::SummerTrue,
            (Season::Autumn, Subtype::Muted) => TwelveTone::AutumnMuted,
            (Season::Autumn, Subtype::Deep) => TwelveTone::AutumnDeep,
            (Season::Autumn, _) => TwelveTone::AutumnTrue,
            (Season::Winter, Subtype::Bright) => TwelveTone::WinterBright,
            (Season::Winter, Subtype::Deep) => TwelveTone::WinterDeep,
            (Season::Winter, _) => TwelveTone::WinterTrue,
        }
    }

    pub fn parse(self) -> (Season, Subtype) {
        match self {
            TwelveTone::SpringLight => (Season::Spring, Subtype::Light),
            TwelveTone::SpringBright => (Season::Spring, Subtype::Bright),
            TwelveTone::SpringTrue => (Season::Spring, Subtype::True),
            TwelveTone::SummerLight => (Season::Summer, Subtype::Light),
            TwelveTone::SummerMuted => (Season::Summer, Subtype::Muted),
            TwelveTone::SummerTrue => (Season::Summer, Subtype::True),
            TwelveTone::AutumnMuted => (Season::Autumn, Subtype::Muted),
            TwelveTone::AutumnDeep => (Season::Autumn, Subtype::Deep),
            TwelveTone::AutumnTrue => (Season::Autumn, Subtype::True),
            TwelveTone::WinterBright => (Season::Winter, Subtype::Bright),
            TwelveTone::WinterDeep => (Season::Winter, Subtype::Deep),
            TwelveTone::WinterTrue => (Season::Winter, Subtype::True),
        }
    }

    pub fn season(self) -> Season {
        self.parse().0
    }

    pub fn subtype(self) -> Subtype {
        self.parse().1
    }
}
