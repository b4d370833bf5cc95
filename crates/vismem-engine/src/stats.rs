//! Aggregate cinematographic statistics over a scene's shot list.

use std::collections::HashSet;

use vismem_models::{CameraHeightTendency, CoverageStyle, PacingLevel, ShotDescriptor};

/// Maximum number of dominant values retained per category.
const DOMINANT_LIMIT: usize = 3;

/// Extract the most frequent values from an iterator, frequency descending.
///
/// Ties keep first-encountered order: the tally walks values in original
/// order and the sort is stable, so two values with equal counts come out in
/// the order they were first seen. At most three values are returned.
pub fn dominant_values<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(v, _)| v.as_str() == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value.to_string(), 1)),
        }
    }

    // sort_by is stable, so equal counts retain discovery order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(DOMINANT_LIMIT)
        .map(|(v, _)| v)
        .collect()
}

/// Classify the scene's camera-height tendency.
///
/// Each shot's free-text height is bucketed by case-insensitive substring
/// match ("low"/"bajo" vs "high"/"alto"/"overhead", anything else neutral).
/// If no bucket reaches half the shots the tendency is mixed; ties at the
/// maximum resolve low, then high, then neutral.
pub fn camera_height_tendency(shots: &[ShotDescriptor]) -> CameraHeightTendency {
    let mut low = 0usize;
    let mut high = 0usize;
    let mut neutral = 0usize;

    for shot in shots {
        let height = shot.camera_height.to_lowercase();
        if height.contains("low") || height.contains("bajo") {
            low += 1;
        } else if height.contains("high") || height.contains("alto") || height.contains("overhead")
        {
            high += 1;
        } else {
            neutral += 1;
        }
    }

    let total = low + high + neutral;
    if total == 0 {
        return CameraHeightTendency::Neutral;
    }

    let max = low.max(high).max(neutral);
    if (max as f64) / (total as f64) < 0.5 {
        return CameraHeightTendency::Mixed;
    }

    if low == max {
        CameraHeightTendency::Low
    } else if high == max {
        CameraHeightTendency::High
    } else {
        CameraHeightTendency::Neutral
    }
}

/// Classify how fragmented the scene's coverage is.
///
/// The fragmentation ratio is distinct shot types over shot count. Handheld
/// or documental shot types combined with a ratio above 0.6 classify as
/// documentary before the plain ratio thresholds are consulted.
pub fn coverage_style(shots: &[ShotDescriptor]) -> CoverageStyle {
    let distinct: HashSet<&str> = shots.iter().map(|s| s.shot_type.as_str()).collect();
    let fragmentation_ratio = distinct.len() as f64 / shots.len().max(1) as f64;

    let has_handheld = shots.iter().any(|s| {
        let shot_type = s.shot_type.to_lowercase();
        shot_type.contains("handheld") || shot_type.contains("documental")
    });

    if has_handheld && fragmentation_ratio > 0.6 {
        CoverageStyle::Documentary
    } else if fragmentation_ratio > 0.7 {
        CoverageStyle::Fragmented
    } else if fragmentation_ratio < 0.3 {
        CoverageStyle::Clean
    } else {
        CoverageStyle::Mixed
    }
}

/// Classify cutting speed from the unrounded average shot duration.
///
/// Evaluated in order, first match wins. The inverse relationship is
/// intentional: shorter shots mean faster cutting.
pub fn pacing_level(average_duration_sec: f64) -> PacingLevel {
    if average_duration_sec > 8.0 {
        PacingLevel::Slow
    } else if average_duration_sec > 4.0 {
        PacingLevel::Moderate
    } else if average_duration_sec > 2.0 {
        PacingLevel::Fast
    } else {
        PacingLevel::Frenetic
    }
}

/// Round to 2 decimals for storage.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
