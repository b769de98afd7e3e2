#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure classifier that maps dye colors onto a fixed nickname palette.

use better_turrets_core::{Hsv, Rgb};

/// Samples darker than this value collapse into the near-black entry.
pub const DARK_VALUE_CUTOFF: f32 = 0.20;
/// Samples less saturated than this carry no usable hue.
pub const MIN_SATURATION: f32 = 0.08;
/// Largest weighted distance still accepted as a match.
pub const MATCH_THRESHOLD: f32 = 0.22;

const HUE_WEIGHT: f32 = 1.1;
const SATURATION_WEIGHT: f32 = 0.15;
const VALUE_WEIGHT: f32 = 0.2;

/// Nickname assigned to near-black samples.
pub const NEAR_BLACK_NAME: &str = "Shredder";

/// Palette color paired with the nickname it stands for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaletteEntry {
    /// Reference color of the entry.
    pub color: Rgb,
    /// Nickname handed out for samples matching the color.
    pub name: &'static str,
}

impl PaletteEntry {
    const fn new(red: f32, green: f32, blue: f32, name: &'static str) -> Self {
        Self {
            color: Rgb::new(red, green, blue),
            name,
        }
    }
}

/// Reference dye palette.
pub const PALETTE: [PaletteEntry; 9] = [
    PaletteEntry::new(0.85, 0.10, 0.10, "Raphael"),
    PaletteEntry::new(0.10, 0.40, 0.90, "Leonardo"),
    PaletteEntry::new(0.60, 0.20, 0.80, "Donatello"),
    PaletteEntry::new(0.95, 0.50, 0.10, "Michelangelo"),
    PaletteEntry::new(0.20, 0.70, 0.20, "Mutagen"),
    PaletteEntry::new(0.05, 0.05, 0.05, NEAR_BLACK_NAME),
    PaletteEntry::new(0.55, 0.35, 0.18, "Splinter"),
    PaletteEntry::new(0.95, 0.85, 0.15, "April"),
    PaletteEntry::new(0.95, 0.60, 0.80, "Pinky"),
];

/// Matches color samples against a palette in HSV space.
#[derive(Clone, Debug)]
pub struct ColorClassifier {
    entries: Vec<(Hsv, &'static str)>,
    near_black: &'static str,
}

impl Default for ColorClassifier {
    fn default() -> Self {
        Self::new(&PALETTE, NEAR_BLACK_NAME)
    }
}

impl ColorClassifier {
    /// Builds a classifier over `palette`, treating `near_black` as the dark sentinel.
    ///
    /// The sentinel entry is excluded from distance matching; dark samples reach it
    /// through the value cutoff alone.
    #[must_use]
    pub fn new(palette: &[PaletteEntry], near_black: &'static str) -> Self {
        let entries = palette
            .iter()
            .filter(|entry| entry.name != near_black)
            .map(|entry| (entry.color.to_hsv(), entry.name))
            .collect();
        Self {
            entries,
            near_black,
        }
    }

    /// Returns the palette nickname closest to `sample`, or `None` when nothing is close enough.
    #[must_use]
    pub fn classify(&self, sample: Rgb) -> Option<&'static str> {
        let hsv = sample.to_hsv();

        if hsv.value() < DARK_VALUE_CUTOFF {
            return Some(self.near_black);
        }

        if hsv.saturation() < MIN_SATURATION {
            return None;
        }

        let mut best: Option<(f32, &'static str)> = None;
        for (reference, name) in &self.entries {
            let score = distance(&hsv, reference);
            if best.map_or(true, |(best_score, _)| score < best_score) {
                best = Some((score, *name));
            }
        }

        best.filter(|(score, _)| *score <= MATCH_THRESHOLD)
            .map(|(_, name)| name)
    }
}

fn distance(sample: &Hsv, reference: &Hsv) -> f32 {
    sample.hue_distance(reference) * HUE_WEIGHT
        + (sample.saturation() - reference.saturation()).abs() * SATURATION_WEIGHT
        + (sample.value() - reference.value()).abs() * VALUE_WEIGHT
}
