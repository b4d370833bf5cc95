//! Forbidden/recommended pattern generation for the next scene.

use vismem_models::ConstraintSet;

/// Generate the patterns the next scene must avoid.
///
/// Forbids the single top lens and the top movement (unless that movement is
/// "static" — absence of movement is a neutral default, not a pattern to
/// break). When the prior scene's forbidden lenses intersect this scene's
/// dominant lenses, an escalation reason is appended; the lens and movement
/// lists themselves are never extended by escalation.
pub fn generate_forbidden_next(
    dominant_lenses: &[String],
    dominant_movements: &[String],
    prior_forbidden: Option<&ConstraintSet>,
) -> ConstraintSet {
    let mut forbidden = ConstraintSet::default();

    if let Some(top_lens) = dominant_lenses.first() {
        forbidden.lenses.push(top_lens.clone());
        forbidden
            .reasons
            .push(format!("Lens {} dominated this scene", top_lens));
    }

    if let Some(top_movement) = dominant_movements.first() {
        if top_movement != "static" {
            forbidden.movements.push(top_movement.clone());
            forbidden
                .reasons
                .push(format!("Movement {} was overused", top_movement));
        }
    }

    if let Some(prior) = prior_forbidden {
        let repeated: Vec<&str> = dominant_lenses
            .iter()
            .filter(|lens| prior.lenses.contains(*lens))
            .map(|lens| lens.as_str())
            .collect();

        if !repeated.is_empty() {
            forbidden.reasons.push(format!(
                "Lens pattern {} repeated across scenes - break it",
                repeated.join(", ")
            ));
        }
    }

    forbidden
}

/// Generate the patterns the next scene should lean into.
///
/// The emotional delta is accepted for forward compatibility but no branch
/// depends on it yet.
pub fn generate_recommended_next(
    dominant_lenses: &[String],
    dominant_movements: &[String],
    _emotional_delta: &str,
) -> ConstraintSet {
    let mut recommended = ConstraintSet::default();

    if let Some(mm) = dominant_lenses.first().and_then(|l| parse_lens_mm(l)) {
        if mm > 50 {
            recommended.lenses = vec![
                "24mm".to_string(),
                "28mm".to_string(),
                "35mm".to_string(),
            ];
            recommended
                .reasons
                .push("Contrast from long lens with wider angle".to_string());
        } else if mm < 35 {
            recommended.lenses = vec!["50mm".to_string(), "85mm".to_string()];
            recommended
                .reasons
                .push("Contrast from wide lens with tighter framing".to_string());
        }
        // 35-50mm: no strong opinion in the middle range
    }

    if dominant_movements.iter().any(|m| m == "static") {
        recommended.movements = vec!["dolly".to_string(), "tracking".to_string()];
        recommended
            .reasons
            .push("Add movement after static scene".to_string());
    } else if dominant_movements
        .iter()
        .any(|m| m.contains("tracking") || m.contains("dolly"))
    {
        recommended.movements = vec!["static".to_string(), "subtle".to_string()];
        recommended
            .reasons
            .push("Calm down after active camera work".to_string());
    }

    recommended
}

/// Parse the numeric focal length from a lens label such as "85mm".
///
/// Returns None when the label has no leading digits (e.g. "anamorphic").
fn parse_lens_mm(label: &str) -> Option<u32> {
    let digits: String = label.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}
