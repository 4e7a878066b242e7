//! Weighted catalog of pilars: the featured landmarks and essential themes a
//! good Tromsø trip should touch. Weights bias what the generators emphasise.

use super::preferences::Interest;
use super::season::Season;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PilarKind {
    Landmark,
    Theme,
}

/// A named, weighted landmark or theme.
#[derive(Debug, Clone, Copy)]
pub struct Pilar {
    pub name: &'static str,
    pub kind: PilarKind,
    /// Importance, 1 (nice to have) to 10 (must see)
    pub weight: u8,
    /// Seasons the pilar is relevant in; empty means year-round
    pub seasons: &'static [Season],
    /// Interest that raises the pilar's priority
    pub interest: Option<Interest>,
}

/// Bonus applied to a pilar's weight when it matches one of the traveller's interests.
const INTEREST_BONUS: u8 = 3;

const PILARS: &[Pilar] = &[
    Pilar {
        name: "Fjellheisen cable car to Storsteinen",
        kind: PilarKind::Landmark,
        weight: 10,
        seasons: &[],
        interest: Some(Interest::Photography),
    },
    Pilar {
        name: "Arctic Cathedral",
        kind: PilarKind::Landmark,
        weight: 9,
        seasons: &[],
        interest: Some(Interest::Culture),
    },
    Pilar {
        name: "Polaria Arctic aquarium",
        kind: PilarKind::Landmark,
        weight: 6,
        seasons: &[],
        interest: Some(Interest::Wildlife),
    },
    Pilar {
        name: "Polar Museum",
        kind: PilarKind::Landmark,
        weight: 6,
        seasons: &[],
        interest: Some(Interest::History),
    },
    Pilar {
        name: "Arctic-Alpine Botanic Garden",
        kind: PilarKind::Landmark,
        weight: 5,
        seasons: &[Season::Summer],
        interest: Some(Interest::Hiking),
    },
    Pilar {
        name: "Kvaløya and Ersfjordbotn",
        kind: PilarKind::Landmark,
        weight: 8,
        seasons: &[],
        interest: Some(Interest::Fjords),
    },
    Pilar {
        name: "Northern lights chase",
        kind: PilarKind::Theme,
        weight: 10,
        seasons: &[Season::Winter, Season::PolarNight],
        interest: Some(Interest::Aurora),
    },
    Pilar {
        name: "Midnight sun",
        kind: PilarKind::Theme,
        weight: 9,
        seasons: &[Season::Summer],
        interest: Some(Interest::Photography),
    },
    Pilar {
        name: "Arctic seafood and local produce",
        kind: PilarKind::Theme,
        weight: 8,
        seasons: &[],
        interest: Some(Interest::Dining),
    },
    Pilar {
        name: "Sami culture and reindeer",
        kind: PilarKind::Theme,
        weight: 7,
        seasons: &[],
        interest: Some(Interest::Culture),
    },
    Pilar {
        name: "Whale watching",
        kind: PilarKind::Theme,
        weight: 7,
        seasons: &[Season::PolarNight],
        interest: Some(Interest::Wildlife),
    },
    Pilar {
        name: "Husky sledding",
        kind: PilarKind::Theme,
        weight: 7,
        seasons: &[Season::Winter, Season::PolarNight],
        interest: Some(Interest::Wildlife),
    },
    Pilar {
        name: "Mountain hiking",
        kind: PilarKind::Theme,
        weight: 6,
        seasons: &[Season::Summer],
        interest: Some(Interest::Hiking),
    },
    Pilar {
        name: "Arctic sauna and sea bathing",
        kind: PilarKind::Theme,
        weight: 5,
        seasons: &[],
        interest: Some(Interest::Wellness),
    },
    Pilar {
        name: "Storgata bars and microbreweries",
        kind: PilarKind::Theme,
        weight: 4,
        seasons: &[],
        interest: Some(Interest::Nightlife),
    },
];

impl Pilar {
    pub fn applies_to(&self, season: Season) -> bool {
        self.seasons.is_empty() || self.seasons.contains(&season)
    }
}

/// Pilars relevant for `season` and `kind`, ordered by effective weight
/// (interest matches get a bonus). Ties keep catalog order.
pub fn ranked_pilars(season: Season, kind: PilarKind, interests: &[Interest]) -> Vec<&'static Pilar> {
    let mut ranked: Vec<&'static Pilar> = PILARS
        .iter()
        .filter(|p| p.kind == kind && p.applies_to(season))
        .collect();
    ranked.sort_by_key(|p| std::cmp::Reverse(effective_weight(p, interests)));
    ranked
}

/// Featured landmarks for the season, most important first.
pub fn featured_landmarks(season: Season, interests: &[Interest]) -> Vec<&'static Pilar> {
    ranked_pilars(season, PilarKind::Landmark, interests)
}

/// Essential themes for the season, most important first.
pub fn essential_themes(season: Season, interests: &[Interest]) -> Vec<&'static Pilar> {
    ranked_pilars(season, PilarKind::Theme, interests)
}

fn effective_weight(pilar: &Pilar, interests: &[Interest]) -> u8 {
    match pilar.interest {
        Some(i) if interests.contains(&i) => pilar.weight.saturating_add(INTEREST_BONUS),
        _ => pilar.weight,
    }
}
