//! Template corpus: the synthesizer's vocabulary.
//!
//! A process-wide, read-only registry of phrase pools grouped by the
//! narrative role they fill. Phrases carry `{name}` placeholders that the
//! synthesizer interpolates with qualitative labels and raw counts.
//! Configuration data, not runtime state — nothing here is ever mutated.

use rand::seq::IndexedRandom;
use rand::Rng;

/// Narrative role a phrase fills in the assembled report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    ReportHeader,
    Opener,
    MorningPhenomena,
    MiddayPhenomena,
    EveningPhenomena,
    PrecipitationLine,
    WindLine,
    Advisory,
    TemperatureLine,
    PressureLine,
    CountsLine,
    ConfidenceLine,
    Closing,
    Aside,
    EasterEgg,
    EvidenceHeader,
}

/// Every placeholder key a template may carry.
pub const PLACEHOLDER_KEYS: &[&str] = &[
    "place",
    "precip",
    "wind",
    "pressure",
    "temp",
    "confidence",
    "count_24h",
    "count_72h",
    "count_7d",
    "advice",
];

const REPORT_HEADER: &[&str] = &[
    "☁️ Civic weather report: {place}",
    "☁️ Public-signal forecast for {place}",
    "☁️ Street weather bulletin — {place}",
];

const OPENER: &[&str] = &[
    "Here's how the public sky reads right now.",
    "The instruments have been out all week; this is what they caught.",
    "A quick look out the civic window.",
    "Conditions over the square, as observed from open sources.",
    "Barometers checked, feeds read, report follows.",
];

const MORNING_PHENOMENA: &[&str] = &[
    "Morning: a {precip} chance of fresh announcement drizzle.",
    "Early hours bring {precip} odds of new mentions condensing.",
    "Morning outlook: announcement moisture in the air is {precip}.",
    "At sunrise, expect a {precip} likelihood of new signals on the wires.",
];

const MIDDAY_PHENOMENA: &[&str] = &[
    "Midday: headline gusts running {wind}.",
    "Through the day, expect {wind} turbulence in the feeds.",
    "Daytime brings {wind} crosswinds of coverage.",
    "Around noon the newsstream churns at a {wind} clip.",
];

const EVENING_PHENOMENA: &[&str] = &[
    "Evening: the mood settles toward {temp}.",
    "By nightfall the public temperature reads {temp}.",
    "Evenings close out {temp}, as these things tend to.",
    "After dark, sentiment tends to settle — tonight it reads {temp}.",
];

const PRECIPITATION_LINE: &[&str] = &[
    "Chance of local \"precipitation\" (rally announcements and mentions): {precip}.",
    "Announcement rainfall probability sits at {precip}.",
    "Mention showers: {precip} likelihood over the next stretch.",
    "The gauge for announcement drizzle reads {precip}.",
];

const WIND_LINE: &[&str] = &[
    "Headline gusts: {wind} — recommended to {advice}.",
    "Winds of coverage are {wind}; best to {advice}.",
    "Feed turbulence measures {wind}, so {advice}.",
    "Gusts off the newswire: {wind}. Advisory: {advice}.",
];

const ADVISORY: &[&str] = &[
    "keep the umbrella of critical thinking handy",
    "avoid reading the feed on an empty stomach",
    "verify sources before resharing",
    "button up the coat of common sense",
    "pack a scarf of patience for the comment sections",
    "carry a flashlight of primary sources",
];

const TEMPERATURE_LINE: &[&str] = &[
    "🌡 Public-opinion temperature: {temp}.",
    "🌡 The civic thermometer reads {temp}.",
    "🌡 Mood temperature is {temp} at the moment.",
    "🌡 Composite temperature of the conversation: {temp}.",
];

const PRESSURE_LINE: &[&str] = &[
    "🌍 International pressure: {pressure}.",
    "🌍 Cross-border attention registers {pressure}.",
    "🌍 Barometric reading from foreign desks: {pressure}.",
    "🌍 Outside-origin pressure on the story: {pressure}.",
];

const COUNTS_LINE: &[&str] = &[
    "📊 Signals in the news: 24h={count_24h}, 72h={count_72h}, 7d={count_7d}.",
    "📊 Raw signal counts — day: {count_24h}, three days: {count_72h}, week: {count_7d}.",
    "📊 The tally: {count_24h} in the last day, {count_72h} over three, {count_7d} across the week.",
];

const CONFIDENCE_LINE: &[&str] = &[
    "Reading confidence: {confidence} (more signals, steadier needle).",
    "The needle's steadiness is {confidence} on current volume.",
    "Confidence in this reading: {confidence}.",
    "Forecast confidence sits at {confidence}, scaled to signal volume.",
];

const CLOSING: &[&str] = &[
    "Take care of yourself: even noisy weather doesn't cancel the light.",
    "Whatever blows through, the square is still yours in the morning.",
    "Dress for the conditions, not the forecast.",
    "Storms pass. Neighborhoods stay.",
    "Keep dry, keep kind, and check back tomorrow.",
];

const ASIDE: &[&str] = &[
    "(The instruments are metaphorical. The news is not.)",
    "(No actual meteorology was harmed in making this report.)",
    "(Readings drift; so do headlines.)",
    "(Calibrated against open sources only.)",
];

const EASTER_EGG: &[&str] = &[
    "Seagulls were observed circling the press room. Interpret freely.",
    "A lone umbrella opened somewhere near city hall. Coincidence, probably.",
    "Forecasting rig powered entirely by reheated coffee.",
];

const EVIDENCE_HEADER: &[&str] = &[
    "Signals from open sources:",
    "What the instruments picked up:",
    "Supporting readings:",
];

/// Surface-variation synonym swaps applied by the lexical mutation pass.
/// None of these may contain a qualitative label — the pass varies
/// phrasing, never facts.
pub const SYNONYM_SWAPS: &[(&str, &str)] = &[
    ("signals", "mentions"),
    ("the feeds", "the timelines"),
    ("newswire", "wire services"),
    ("at the moment", "right now"),
    ("headlines", "front pages"),
];

/// The candidate phrases for a slot.
pub fn pool(slot: Slot) -> &'static [&'static str] {
    match slot {
        Slot::ReportHeader => REPORT_HEADER,
        Slot::Opener => OPENER,
        Slot::MorningPhenomena => MORNING_PHENOMENA,
        Slot::MiddayPhenomena => MIDDAY_PHENOMENA,
        Slot::EveningPhenomena => EVENING_PHENOMENA,
        Slot::PrecipitationLine => PRECIPITATION_LINE,
        Slot::WindLine => WIND_LINE,
        Slot::Advisory => ADVISORY,
        Slot::TemperatureLine => TEMPERATURE_LINE,
        Slot::PressureLine => PRESSURE_LINE,
        Slot::CountsLine => COUNTS_LINE,
        Slot::ConfidenceLine => CONFIDENCE_LINE,
        Slot::Closing => CLOSING,
        Slot::Aside => ASIDE,
        Slot::EasterEgg => EASTER_EGG,
        Slot::EvidenceHeader => EVIDENCE_HEADER,
    }
}

/// Uniformly sample one phrase for a slot.
pub fn sample(slot: Slot, rng: &mut impl Rng) -> &'static str {
    pool(slot)
        .choose(rng)
        .copied()
        .unwrap_or("")
}

/// Interpolate `{name}` placeholders. Unknown placeholders are left as-is.
pub fn fill(template: &str, values: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (key, value) in values {
        out = out.replace(&format!("{{{key}}}"), value);
    }
    out
}

/// Every slot, for corpus-wide integrity tests.
pub const ALL_SLOTS: &[Slot] = &[
    Slot::ReportHeader,
    Slot::Opener,
    Slot::MorningPhenomena,
    Slot::MiddayPhenomena,
    Slot::EveningPhenomena,
    Slot::PrecipitationLine,
    Slot::WindLine,
    Slot::Advisory,
    Slot::TemperatureLine,
    Slot::PressureLine,
    Slot::CountsLine,
    Slot::ConfidenceLine,
    Slot::Closing,
    Slot::Aside,
    Slot::EasterEgg,
    Slot::EvidenceHeader,
];

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Words the leveling functions can emit. No template or synonym swap
    /// may contain one as a standalone token, or the mutation pass could
    /// masquerade as a fact change.
    const LEVEL_WORDS: &[&str] = &[
        "low",
        "moderate",
        "high",
        "cool",
        "warm",
        "hot",
        "scorching",
    ];

    fn tokens(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_lowercase())
            .collect()
    }

    #[test]
    fn every_pool_is_non_empty() {
        for slot in ALL_SLOTS {
            assert!(!pool(*slot).is_empty(), "empty pool for {slot:?}");
        }
    }

    #[test]
    fn every_placeholder_is_a_known_key() {
        for slot in ALL_SLOTS {
            for phrase in pool(*slot) {
                let mut rest = *phrase;
                while let Some(start) = rest.find('{') {
                    let tail = &rest[start + 1..];
                    let end = tail.find('}').expect("unbalanced placeholder");
                    let key = &tail[..end];
                    assert!(
                        PLACEHOLDER_KEYS.contains(&key),
                        "unknown placeholder {{{key}}} in {phrase:?}"
                    );
                    rest = &tail[end + 1..];
                }
            }
        }
    }

    #[test]
    fn no_template_hardcodes_a_level_word() {
        for slot in ALL_SLOTS {
            for phrase in pool(*slot) {
                for token in tokens(phrase) {
                    assert!(
                        !LEVEL_WORDS.contains(&token.as_str()),
                        "level word {token:?} hardcoded in {phrase:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn synonym_swaps_carry_no_level_words() {
        for (from, to) in SYNONYM_SWAPS {
            for token in tokens(from).iter().chain(tokens(to).iter()) {
                assert!(
                    !LEVEL_WORDS.contains(&token.as_str()),
                    "level word {token:?} in swap ({from:?}, {to:?})"
                );
            }
        }
    }

    #[test]
    fn sample_draws_from_the_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let phrase = sample(Slot::Advisory, &mut rng);
            assert!(pool(Slot::Advisory).contains(&phrase));
        }
    }

    #[test]
    fn fill_interpolates_and_ignores_unknowns() {
        let out = fill(
            "Gusts are {wind} over {place}; {unknown} stays.",
            &[
                ("wind", "brisk".to_string()),
                ("place", "Tallinn".to_string()),
            ],
        );
        assert_eq!(out, "Gusts are brisk over Tallinn; {unknown} stays.");
    }
}
