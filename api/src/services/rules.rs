//! Deterministic rule-based itinerary generator.
//!
//! Builds a full plan from fixed content tables keyed on season, transport,
//! pace and budget. No I/O and no randomness: the same preferences always
//! produce the same plan. This is the guaranteed fallback when the model path
//! is unavailable.

use chrono::{Days, NaiveDate};

use super::catalog::{essential_themes, featured_landmarks};
use super::plan::{Activity, ActivityDuration, AuroraForecast, DayPlan, Dining, TripPlan};
use super::preferences::{Budget, Difficulty, Interest, Transport, TripPreferences};
use super::season::Season;

/// A fixed catalog entry that becomes an [`Activity`].
struct Venue {
    title: &'static str,
    description: &'static str,
    location: &'static str,
    cost: u32,
    duration: Duration,
    booking_required: bool,
}

enum Duration {
    Minutes(u32),
    Text(&'static str),
}

/// Morning and afternoon venues for one day of the rotation.
struct DaySlot {
    morning: Venue,
    afternoon: Venue,
}

const WELCOME: Venue = Venue {
    title: "Welcome walk around the harbour",
    description: "Get your bearings along Storgata, the harbour front and Stortorget square",
    location: "Stortorget, Tromsø sentrum",
    cost: 0,
    duration: Duration::Minutes(90),
    booking_required: false,
};

const FJELLHEISEN: Venue = Venue {
    title: "Fjellheisen cable car",
    description: "Ride up to Storsteinen, 421 m above the city, for the view over Tromsøya and the fjords",
    location: "Solliveien 12, Tromsdalen",
    cost: 420,
    duration: Duration::Minutes(120),
    booking_required: false,
};

const ARCTIC_CATHEDRAL: Venue = Venue {
    title: "Arctic Cathedral",
    description: "Visit the landmark triangular church and its great glass mosaic",
    location: "Hans Nilsens vei 41, Tromsdalen",
    cost: 80,
    duration: Duration::Minutes(60),
    booking_required: false,
};

const POLARIA: Venue = Venue {
    title: "Polaria",
    description: "Arctic aquarium with bearded seals and a panoramic film about Svalbard",
    location: "Hjalmar Johansens gate 12",
    cost: 320,
    duration: Duration::Minutes(120),
    booking_required: false,
};

const POLAR_MUSEUM: Venue = Venue {
    title: "Polar Museum",
    description: "Trapping, hunting and expedition history in an 1830s harbour warehouse",
    location: "Søndre Tollbodgate 11",
    cost: 100,
    duration: Duration::Minutes(90),
    booking_required: false,
};

const TROMSO_MUSEUM: Venue = Venue {
    title: "Tromsø Museum",
    description: "Sami culture, northern lights science and natural history of the north",
    location: "Lars Thøringsvei 10",
    cost: 100,
    duration: Duration::Minutes(90),
    booking_required: false,
};

const BOTANIC_GARDEN: Venue = Venue {
    title: "Arctic-Alpine Botanic Garden",
    description: "Stroll among mountain flora from around the world in flower under the midnight sun",
    location: "Stakkevollvegen 200",
    cost: 0,
    duration: Duration::Minutes(90),
    booking_required: false,
};

const TELEGRAFBUKTA: Venue = Venue {
    title: "Telegrafbukta beach walk",
    description: "Coastal path and sandy beach at the southern tip of the island",
    location: "Telegrafbukta, Tromsøya",
    cost: 0,
    duration: Duration::Minutes(90),
    booking_required: false,
};

const HUSKY_SLEDDING: Venue = Venue {
    title: "Husky sledding",
    description: "Drive your own dog team through the snowy Tromsdalen valley",
    location: "Tromsø Villmarkssenter, Kvaløya",
    cost: 1900,
    duration: Duration::Text("4 hours"),
    booking_required: true,
};

const REINDEER_CAMP: Venue = Venue {
    title: "Reindeer feeding and Sami culture",
    description: "Feed reindeer and hear joik and stories in a lavvu by the fire",
    location: "Tromsø Arctic Reindeer, Kvaløya",
    cost: 1650,
    duration: Duration::Minutes(180),
    booking_required: true,
};

const WHALE_CRUISE: Venue = Venue {
    title: "Whale watching fjord cruise",
    description: "Look for humpbacks and orcas following the herring into the fjords",
    location: "Departs Prostneset quay",
    cost: 1800,
    duration: Duration::Text("7 hours"),
    booking_required: true,
};

const SUMMER_ROTATION: &[DaySlot] = &[
    DaySlot {
        morning: POLAR_MUSEUM,
        afternoon: FJELLHEISEN,
    },
    DaySlot {
        morning: ARCTIC_CATHEDRAL,
        afternoon: BOTANIC_GARDEN,
    },
    DaySlot {
        morning: POLARIA,
        afternoon: TELEGRAFBUKTA,
    },
    DaySlot {
        morning: TROMSO_MUSEUM,
        afternoon: FJELLHEISEN,
    },
];

const WINTER_ROTATION: &[DaySlot] = &[
    DaySlot {
        morning: POLAR_MUSEUM,
        afternoon: FJELLHEISEN,
    },
    DaySlot {
        morning: HUSKY_SLEDDING,
        afternoon: ARCTIC_CATHEDRAL,
    },
    DaySlot {
        morning: POLARIA,
        afternoon: REINDEER_CAMP,
    },
    DaySlot {
        morning: TROMSO_MUSEUM,
        afternoon: TELEGRAFBUKTA,
    },
];

const POLAR_NIGHT_ROTATION: &[DaySlot] = &[
    DaySlot {
        morning: POLAR_MUSEUM,
        afternoon: ARCTIC_CATHEDRAL,
    },
    DaySlot {
        morning: WHALE_CRUISE,
        afternoon: POLARIA,
    },
    DaySlot {
        morning: REINDEER_CAMP,
        afternoon: FJELLHEISEN,
    },
    DaySlot {
        morning: HUSKY_SLEDDING,
        afternoon: TROMSO_MUSEUM,
    },
];

const SUMMER_DRIVE: Venue = Venue {
    title: "Scenic drive to Sommarøy",
    description: "Drive across Kvaløya to the white beaches and turquoise water of Sommarøy",
    location: "Sommarøy, via Fv862",
    cost: 300,
    duration: Duration::Text("4-5 hours"),
    booking_required: false,
};

const WINTER_DRIVE: Venue = Venue {
    title: "Fjord drive to Ersfjordbotn",
    description: "Blue-hour drive to the mountain-ringed Ersfjord on Kvaløya",
    location: "Ersfjordbotn, Kvaløya",
    cost: 200,
    duration: Duration::Text("3 hours"),
    booking_required: false,
};

const SUMMER_HIKE: Venue = Venue {
    title: "Hike to Fløya",
    description: "Continue on foot from Storsteinen to the 671 m Fløya summit",
    location: "Trailhead at Storsteinen",
    cost: 0,
    duration: Duration::Minutes(180),
    booking_required: false,
};

const WINTER_HIKE: Venue = Venue {
    title: "Guided snowshoe hike",
    description: "Snowshoe through birch forest on Tromsøya with a local guide",
    location: "Meet at Tromsø Tourist Information, Samuel Arnesens gate 5",
    cost: 650,
    duration: Duration::Minutes(150),
    booking_required: true,
};

const AURORA_SELF_DRIVE: Venue = Venue {
    title: "Self-drive aurora hunt",
    description: "Drive away from the city lights to a dark-sky spot and wait for the northern lights",
    location: "Ersfjordbotn, Kvaløya",
    cost: 250,
    duration: Duration::Text("4-5 hours"),
    booking_required: false,
};

const AURORA_GUIDED: Venue = Venue {
    title: "Guided aurora chase",
    description: "Minibus tour that follows the clear skies, with hot drinks and photos included",
    location: "Pick-up at Sjøgata 7",
    cost: 1290,
    duration: Duration::Text("6-7 hours"),
    booking_required: true,
};

const WELCOME_TIME: &str = "09:00";
const ACTIVE_EXTRA_TIME: &str = "12:30";
const AFTERNOON_TIME: &str = "14:30";
const EVENING_TIME: &str = "20:00";

const AURORA_BEST_TIME: &str = "22:00-01:00";
const POLAR_NIGHT_AURORA_PROBABILITY: u8 = 70;
const WINTER_AURORA_PROBABILITY: u8 = 60;

/// Lunch venues by budget, alternated by day.
fn lunch_venues(budget: Budget) -> [&'static str; 2] {
    match budget {
        Budget::Low => ["Smørtorget Café", "Kaffebønna Stortorget"],
        Budget::Medium => ["Mathallen Tromsø", "Risø Mat & Kaffebar"],
        Budget::High => ["Fiskekompaniet", "Mathallen Tromsø"],
    }
}

/// Dinner venues by budget, alternated by day.
fn dinner_venues(budget: Budget) -> [&'static str; 2] {
    match budget {
        Budget::Low => ["Yonas Pizzeria", "Burgr"],
        Budget::Medium => ["Bardus Bistro", "Full Steam"],
        Budget::High => ["Emma's Drømmekjøkken", "Smak"],
    }
}

impl Venue {
    fn to_activity(&self, time: &str) -> Activity {
        Activity {
            time: time.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            location: self.location.to_string(),
            cost: self.cost,
            duration: match self.duration {
                Duration::Minutes(m) => ActivityDuration::Minutes(m),
                Duration::Text(t) => ActivityDuration::Text(t.to_string()),
            },
            booking_required: self.booking_required,
        }
    }
}

fn rotation(season: Season) -> &'static [DaySlot] {
    match season {
        Season::Summer => SUMMER_ROTATION,
        Season::Winter => WINTER_ROTATION,
        Season::PolarNight => POLAR_NIGHT_ROTATION,
    }
}

/// Generate a complete plan from fixed content tables.
pub fn generate_rule_based(
    preferences: &TripPreferences,
    season: Season,
    start_date: NaiveDate,
) -> TripPlan {
    let interests: Vec<Interest> = preferences.interests.iter().copied().collect();
    let themes = essential_themes(season, &interests);
    let slots = rotation(season);

    let days: Vec<DayPlan> = (0..u32::from(preferences.days))
        .map(|index| {
            let theme = themes
                .get(index as usize % themes.len().max(1))
                .map(|p| p.name)
                .unwrap_or("Tromsø highlights");
            build_day(preferences, season, start_date, index, theme, slots)
        })
        .collect();

    let total_cost = days.iter().map(DayPlan::cost).sum();

    TripPlan {
        summary: build_summary(preferences, season, total_cost),
        days,
        total_cost,
        safety_notes: safety_notes(preferences, season),
        packing_list: packing_list(preferences, season),
        recommendations: recommendations(preferences, season, &interests),
    }
}

fn build_day(
    preferences: &TripPreferences,
    season: Season,
    start_date: NaiveDate,
    index: u32,
    theme: &str,
    slots: &[DaySlot],
) -> DayPlan {
    let slot = &slots[index as usize % slots.len()];
    let date = start_date
        .checked_add_days(Days::new(u64::from(index)))
        .unwrap_or(NaiveDate::MAX);
    let is_first = index == 0;
    let is_last = index + 1 == u32::from(preferences.days);

    let mut activities = Vec::with_capacity(5);
    if is_first {
        activities.push(WELCOME.to_activity(WELCOME_TIME));
    }
    let morning_time = if is_first { "10:30" } else { "10:00" };
    activities.push(slot.morning.to_activity(morning_time));

    if preferences.difficulty == Difficulty::Active {
        let hike = match season {
            Season::Summer => &SUMMER_HIKE,
            Season::Winter | Season::PolarNight => &WINTER_HIKE,
        };
        activities.push(hike.to_activity(ACTIVE_EXTRA_TIME));
    }

    // Every second day a car swaps the afternoon for a fjord drive
    let afternoon = if preferences.transport == Transport::Car && index % 2 == 1 {
        match season {
            Season::Summer => &SUMMER_DRIVE,
            Season::Winter | Season::PolarNight => &WINTER_DRIVE,
        }
    } else {
        &slot.afternoon
    };
    activities.push(afternoon.to_activity(AFTERNOON_TIME));

    let aurora = if season.has_aurora() {
        let chase = match preferences.transport {
            Transport::Car => &AURORA_SELF_DRIVE,
            Transport::NoCar => &AURORA_GUIDED,
        };
        activities.push(chase.to_activity(EVENING_TIME));
        Some(aurora_forecast(season, preferences.transport))
    } else {
        None
    };

    let alternate = index as usize % 2;
    let dining = Dining {
        lunch: Some(lunch_venues(preferences.budget)[alternate].to_string()),
        dinner: Some(dinner_venues(preferences.budget)[alternate].to_string()),
    };

    let theme = if is_first {
        format!("Arrival & {}", theme)
    } else if is_last {
        format!("Farewell & {}", theme)
    } else {
        theme.to_string()
    };

    DayPlan {
        day: index + 1,
        date,
        theme,
        activities,
        dining,
        aurora,
    }
}

fn aurora_forecast(season: Season, transport: Transport) -> AuroraForecast {
    let probability = match season {
        Season::PolarNight => POLAR_NIGHT_AURORA_PROBABILITY,
        _ => WINTER_AURORA_PROBABILITY,
    };
    let location = match transport {
        Transport::Car => "Ersfjordbotn, Kvaløya",
        Transport::NoCar => "Wherever the guide finds clear skies, often the Skibotn valley",
    };
    AuroraForecast {
        probability,
        best_time: AURORA_BEST_TIME.to_string(),
        location: location.to_string(),
    }
}

fn build_summary(preferences: &TripPreferences, season: Season, total_cost: u64) -> String {
    let pace = match preferences.difficulty {
        Difficulty::Easy => "relaxed",
        Difficulty::Moderate => "balanced",
        Difficulty::Active => "active",
    };
    let nights = if season.has_aurora() {
        " Every evening ends with a northern lights outing."
    } else {
        ""
    };
    format!(
        "A {}-day {} itinerary in Tromsø for {} travellers at a {} pace, focused on {}. \
         Activities are estimated at {} NOK per person in total.{}",
        preferences.days,
        season.info().name,
        preferences.group_size(),
        pace,
        preferences.interest_list(),
        total_cost,
        nights
    )
}

fn safety_notes(preferences: &TripPreferences, season: Season) -> Vec<String> {
    let mut notes = vec![
        "Save the emergency number 112 and check the forecast on yr.no before heading out."
            .to_string(),
    ];

    match season {
        Season::Summer => notes.push(
            "The midnight sun makes it easy to lose track of time: tell someone your plans before late hikes."
                .to_string(),
        ),
        Season::Winter | Season::PolarNight => notes.push(
            "Pavements are often icy: wear shoe spikes (brodder) in the city.".to_string(),
        ),
    }
    if season == Season::PolarNight {
        notes.push(
            "Daylight lasts only a few hours: plan outdoor activities around midday and wear reflective gear after dark."
                .to_string(),
        );
    }

    match (preferences.transport, season.has_aurora()) {
        (Transport::Car, true) => notes.push(
            "Drive on winter tyres, never stop on the road shoulder to watch the aurora, and look out for reindeer and moose."
                .to_string(),
        ),
        (Transport::Car, false) => notes.push(
            "Watch for reindeer on roads outside the city and use the passing places on narrow roads."
                .to_string(),
        ),
        (Transport::NoCar, _) => notes.push(
            "City buses run less often in the evening and on Sundays: check the timetable before excursions."
                .to_string(),
        ),
    }

    if preferences.has_interest(Interest::Hiking) {
        notes.push(if season.has_aurora() {
            "Check avalanche warnings on varsom.no before any mountain hike.".to_string()
        } else {
            "Stick to marked trails and carry extra layers: weather changes fast above the tree line."
                .to_string()
        });
    }
    if preferences.has_interest(Interest::Photography) && season.has_aurora() {
        notes.push(
            "Keep spare camera batteries in an inside pocket: the cold drains them quickly."
                .to_string(),
        );
    }
    if preferences.has_interest(Interest::Aurora) && season.has_aurora() {
        notes.push(
            "Dress for hours of standing still at -15°C or colder on aurora nights.".to_string(),
        );
    }

    notes
}

fn packing_list(preferences: &TripPreferences, season: Season) -> Vec<String> {
    let mut items: Vec<&str> = vec![
        "Passport or ID",
        "Phone charger and power bank",
        "Reusable water bottle",
        "Waterproof jacket",
    ];

    match season {
        Season::Summer => items.extend([
            "Sleep mask for the midnight sun",
            "Mosquito repellent",
            "Sunglasses",
            "Warm mid-layer for cool evenings",
        ]),
        Season::Winter | Season::PolarNight => items.extend([
            "Thermal base layers",
            "Insulated winter boots",
            "Shoe spikes",
            "Warm hat, mittens and neck gaiter",
            "Hand warmers",
        ]),
    }
    if season == Season::PolarNight {
        items.extend(["Headlamp", "Reflective band or vest"]);
    }

    if preferences.has_interest(Interest::Photography) {
        items.extend(["Spare camera batteries", "Tripod"]);
    }
    if preferences.has_interest(Interest::Hiking) {
        items.extend(["Hiking boots", "Daypack"]);
    }
    if preferences.has_interest(Interest::Wellness) {
        items.push("Swimwear for sauna and sea bathing");
    }
    if preferences.transport == Transport::Car {
        items.push("Driving licence");
    }

    items.into_iter().map(str::to_string).collect()
}

fn recommendations(
    preferences: &TripPreferences,
    season: Season,
    interests: &[Interest],
) -> Vec<String> {
    let mut recs = Vec::new();

    let landmarks: Vec<&str> = featured_landmarks(season, interests)
        .iter()
        .take(3)
        .map(|p| p.name)
        .collect();
    if !landmarks.is_empty() {
        recs.push(format!("Don't miss: {}.", landmarks.join(", ")));
    }

    let themes: Vec<&str> = essential_themes(season, interests)
        .iter()
        .take(2)
        .map(|p| p.name)
        .collect();
    if !themes.is_empty() {
        recs.push(format!("Make time for: {}.", themes.join(" and ")));
    }

    recs.push(
        match preferences.budget {
            Budget::Low => {
                "Buy a multi-day bus ticket and pick up lunch at supermarkets to stretch the budget."
            }
            Budget::Medium => "Book popular tours a few days ahead: prices rise close to departure.",
            Budget::High => {
                "Consider a private guide for aurora nights and a tasting menu at Emma's Drømmekjøkken."
            }
        }
        .to_string(),
    );

    recs.push(
        match season {
            Season::Summer => "Enjoy the late evenings: the cable car runs until after midnight in summer.",
            Season::Winter => "Book aurora outings early in the trip so there are spare nights if it clouds over.",
            Season::PolarNight => "Use the midday twilight, around 11:00-13:00, for landscape photos.",
        }
        .to_string(),
    );

    recs
}
