//! Narrative synthesis: metrics + representative observations → report text.
//!
//! Message generation is sampling from a generative grammar layered over
//! numeric-to-qualitative mapping. One injected randomness source drives
//! every draw, so a seeded rng replays byte-identically and two requests
//! never share phrasing by accident. The draws, in order:
//!
//!   1. voice mode (weighted)
//!   2. phrase per included slot (uniform per pool)
//!   3. inclusion of optional sections (independent Bernoulli)
//!   4. time-of-day trio order (shuffle + evening-last bias)
//!   5. lexical mutation pass over the assembled text
//!
//! Facts — which qualitative labels and counts appear — depend only on the
//! metric set, never on the draws.

use civicweather_common::{MetricSet, Observation};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::corpus::{self, Slot, SYNONYM_SWAPS};
use crate::shaping::{clamp01, level, temperature_tier};

/// Rendering style. Gates which optional sections appear and how the
/// time-of-day trio is ordered; the reported facts are identical across
/// modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceMode {
    /// Facts only, minimal garnish.
    Concise,
    /// Full arc: opener, time-of-day trio, asides.
    Narrative,
    /// Trio in fixed clock order, no editorializing.
    Detached,
}

/// Mode selection weights. Must sum to 1.0.
const MODE_WEIGHTS: &[(VoiceMode, f64)] = &[
    (VoiceMode::Narrative, 0.5),
    (VoiceMode::Concise, 0.3),
    (VoiceMode::Detached, 0.2),
];

/// Knobs for the synthesizer's randomness. Defaults are production values;
/// tests pin probabilities to 0.0 or 1.0 to force sections on or off.
#[derive(Debug, Clone)]
pub struct SynthesizerOptions {
    /// Force a voice mode instead of sampling one.
    pub mode: Option<VoiceMode>,
    pub opener_probability: f64,
    pub confidence_probability: f64,
    pub aside_probability: f64,
    pub easter_egg_probability: f64,
    pub evidence_probability: f64,
    /// Chance the narrative trio gets shuffled at all.
    pub trio_shuffle_probability: f64,
    /// After a shuffle, chance the evening section is pulled back to the
    /// end — the arc ends on a calming note more often than not.
    pub evening_last_bias: f64,
    /// Per-synonym-pair chance in the lexical mutation pass.
    pub mutation_probability: f64,
    /// Most evidence items ever rendered.
    pub evidence_cap: usize,
}

impl Default for SynthesizerOptions {
    fn default() -> Self {
        Self {
            mode: None,
            opener_probability: 0.7,
            confidence_probability: 0.6,
            aside_probability: 0.3,
            easter_egg_probability: 0.07,
            evidence_probability: 0.85,
            trio_shuffle_probability: 0.75,
            evening_last_bias: 0.8,
            mutation_probability: 0.2,
            evidence_cap: 5,
        }
    }
}

/// Compose a report for a place from its scored metrics and the
/// representative observations backing them (caller supplies these sorted
/// by recency, most recent first).
pub fn synthesize(
    place: &str,
    metrics: &MetricSet,
    representative: &[Observation],
    options: &SynthesizerOptions,
    rng: &mut impl Rng,
) -> String {
    // The scorer clamps everything; re-clamp at this boundary anyway
    // rather than trusting the producer.
    let precipitation = clamp01(metrics.precipitation);
    let wind = clamp01(metrics.wind);
    let pressure = clamp01(metrics.pressure);
    let temperature = clamp01(metrics.temperature);
    let confidence = clamp01(metrics.confidence);

    let values: Vec<(&str, String)> = vec![
        ("place", place.to_string()),
        ("precip", level(precipitation).to_string()),
        ("wind", level(wind).to_string()),
        ("pressure", level(pressure).to_string()),
        ("temp", temperature_tier(temperature).to_string()),
        ("confidence", level(confidence).to_string()),
        ("count_24h", metrics.count_24h.to_string()),
        ("count_72h", metrics.count_72h.to_string()),
        ("count_7d", metrics.count_7d.to_string()),
        ("advice", corpus::sample(Slot::Advisory, rng).to_string()),
    ];

    let mode = options.mode.unwrap_or_else(|| sample_mode(rng));
    debug!(?mode, place, "Synthesizing report");

    let mut sections: Vec<String> = Vec::new();

    sections.push(render(Slot::ReportHeader, &values, rng));

    if mode != VoiceMode::Detached && rng.random_bool(options.opener_probability) {
        sections.push(render(Slot::Opener, &values, rng));
    }

    if mode != VoiceMode::Concise {
        sections.extend(trio_sections(mode, options, &values, rng));
    }

    sections.push(render(Slot::PrecipitationLine, &values, rng));
    sections.push(render(Slot::WindLine, &values, rng));
    sections.push(render(Slot::TemperatureLine, &values, rng));
    sections.push(render(Slot::PressureLine, &values, rng));
    sections.push(render(Slot::CountsLine, &values, rng));

    if rng.random_bool(options.confidence_probability) {
        sections.push(render(Slot::ConfidenceLine, &values, rng));
    }

    if mode == VoiceMode::Narrative && rng.random_bool(options.aside_probability) {
        sections.push(render(Slot::Aside, &values, rng));
    }

    if mode != VoiceMode::Detached && rng.random_bool(options.easter_egg_probability) {
        sections.push(render(Slot::EasterEgg, &values, rng));
    }

    sections.push(render(Slot::Closing, &values, rng));

    if !representative.is_empty() && rng.random_bool(options.evidence_probability) {
        sections.push(evidence_block(
            representative,
            options.evidence_cap,
            rng,
        ));
    }

    let assembled = sections.join("\n\n").trim().to_string();
    mutate(assembled, options.mutation_probability, rng)
}

/// Sample a phrase for a slot and interpolate the report values into it.
fn render(slot: Slot, values: &[(&str, String)], rng: &mut impl Rng) -> String {
    corpus::fill(corpus::sample(slot, rng), values)
}

fn sample_mode(rng: &mut impl Rng) -> VoiceMode {
    let draw: f64 = rng.random_range(0.0..1.0);
    let mut cumulative = 0.0;
    for (mode, weight) in MODE_WEIGHTS {
        cumulative += weight;
        if draw < cumulative {
            return *mode;
        }
    }
    // Floating-point slack on the last band.
    MODE_WEIGHTS[MODE_WEIGHTS.len() - 1].0
}

/// Morning/midday/evening phenomena lines. Narrative mode may shuffle
/// them, with the evening section biased back toward last position;
/// detached mode keeps clock order.
fn trio_sections(
    mode: VoiceMode,
    options: &SynthesizerOptions,
    values: &[(&str, String)],
    rng: &mut impl Rng,
) -> Vec<String> {
    let slots = [
        Slot::MorningPhenomena,
        Slot::MiddayPhenomena,
        Slot::EveningPhenomena,
    ];
    let mut lines: Vec<(Slot, String)> = slots
        .iter()
        .map(|slot| (*slot, corpus::fill(corpus::sample(*slot, rng), values)))
        .collect();

    if mode == VoiceMode::Narrative && rng.random_bool(options.trio_shuffle_probability) {
        lines.shuffle(rng);
        if rng.random_bool(options.evening_last_bias) {
            if let Some(pos) = lines.iter().position(|(s, _)| *s == Slot::EveningPhenomena) {
                let evening = lines.remove(pos);
                lines.push(evening);
            }
        }
    }

    lines.into_iter().map(|(_, line)| line).collect()
}

/// Bullet list of up to `cap` representative items, in supplied order.
fn evidence_block(representative: &[Observation], cap: usize, rng: &mut impl Rng) -> String {
    let header = corpus::sample(Slot::EvidenceHeader, rng);
    let bullets: Vec<String> = representative
        .iter()
        .take(cap)
        .map(|o| format!("• {}\n  {}", o.headline, o.locator))
        .collect();
    format!("{header}\n{}", bullets.join("\n"))
}

/// Lexical mutation pass: small-probability global synonym substitutions.
/// The swap table carries no qualitative labels, so this can vary surface
/// phrasing but never the reported facts.
fn mutate(mut text: String, probability: f64, rng: &mut impl Rng) -> String {
    for (from, to) in SYNONYM_SWAPS {
        if rng.random_bool(probability) {
            text = text.replace(from, to);
        }
    }
    text
}
