//! Lineage analysis: discipline resolution and affinity detection.
//!
//! Ancestor records carry up to three discipline sources of differing
//! reliability. Resolution is an ordered pipeline over those sources, and
//! every affinity query in the crate funnels through the same routine so
//! discipline detection cannot diverge between call sites.

use serde::{Deserialize, Serialize};

use crate::ancestry::Ancestor;
use crate::constants::AFFINITY_REQUIRED;
use crate::numbers::ratio_percent;

/// Cheap boolean affinity signal consumed by the trait assigner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AffinitySummary {
    pub affinity: bool,
    pub discipline: Option<String>,
    pub count: u32,
}

/// One tallied discipline in a detailed report, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisciplineCount {
    pub discipline: String,
    pub count: u32,
}

/// Diagnostic affinity breakdown for breeding-preview tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AffinityReport {
    pub affinity: bool,
    pub discipline: Option<String>,
    pub dominant_count: u32,
    pub total_analyzed: u32,
    pub total_with_disciplines: u32,
    pub discipline_breakdown: Vec<DisciplineCount>,
    /// Dominant share of discipline-resolving ancestors, rounded percent.
    pub affinity_strength: u32,
}

/// Presentational tier derived from `affinity_strength`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffinityStrengthTier {
    None,
    Emerging,
    Established,
    Dominant,
}

impl AffinityReport {
    #[must_use]
    pub const fn strength_tier(&self) -> AffinityStrengthTier {
        match self.affinity_strength {
            0 => AffinityStrengthTier::None,
            1..=39 => AffinityStrengthTier::Emerging,
            40..=74 => AffinityStrengthTier::Established,
            _ => AffinityStrengthTier::Dominant,
        }
    }
}

/// Target-discipline probe result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecificAffinity {
    pub has_affinity: bool,
    pub count: u32,
    pub required: u32,
    pub percentage: u32,
}

/// Resolve an ancestor's discipline from whichever source is available.
/// Priority: direct tag, then the best proficiency score, then the most
/// frequent competition discipline; `None` when every source is empty.
#[must_use]
pub fn resolve_discipline(ancestor: &Ancestor) -> Option<&str> {
    resolve_from_tag(ancestor)
        .or_else(|| resolve_from_scores(ancestor))
        .or_else(|| resolve_from_history(ancestor))
}

fn resolve_from_tag(ancestor: &Ancestor) -> Option<&str> {
    ancestor.discipline.as_deref().filter(|d| !d.is_empty())
}

/// Best score wins; a tie keeps the earliest entry.
fn resolve_from_scores(ancestor: &Ancestor) -> Option<&str> {
    let mut best: Option<(&str, f32)> = None;
    for entry in &ancestor.discipline_scores {
        match best {
            Some((_, score)) if entry.score <= score => {}
            _ => best = Some((entry.discipline.as_str(), entry.score)),
        }
    }
    best.map(|(discipline, _)| discipline)
}

/// Most frequent competition discipline wins; a tie keeps the discipline
/// seen first in the history.
fn resolve_from_history(ancestor: &Ancestor) -> Option<&str> {
    let mut tallies: Vec<(&str, u32)> = Vec::new();
    for record in &ancestor.competition_history {
        match tallies
            .iter_mut()
            .find(|(discipline, _)| *discipline == record.discipline)
        {
            Some((_, count)) => *count += 1,
            None => tallies.push((record.discipline.as_str(), 1)),
        }
    }
    let mut best: Option<(&str, u32)> = None;
    for (discipline, count) in tallies {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((discipline, count)),
        }
    }
    best.map(|(discipline, _)| discipline)
}

struct LineageTally {
    breakdown: Vec<DisciplineCount>,
    dominant: Option<(String, u32)>,
    total_analyzed: u32,
    total_with_disciplines: u32,
}

/// Single pass over the lineage. The dominant discipline is the first one
/// to reach the maximal count in lineage order (strict-greater running
/// argmax), which is the documented tie-break.
fn tally_lineage(lineage: &[Ancestor]) -> LineageTally {
    let mut breakdown: Vec<DisciplineCount> = Vec::new();
    let mut dominant: Option<(String, u32)> = None;
    let mut total_with_disciplines = 0_u32;

    for ancestor in lineage {
        let Some(resolved) = resolve_discipline(ancestor) else {
            continue;
        };
        total_with_disciplines += 1;
        let count = match breakdown
            .iter_mut()
            .find(|entry| entry.discipline == resolved)
        {
            Some(entry) => {
                entry.count += 1;
                entry.count
            }
            None => {
                breakdown.push(DisciplineCount {
                    discipline: resolved.to_string(),
                    count: 1,
                });
                1
            }
        };
        if dominant.as_ref().is_none_or(|(_, best)| count > *best) {
            dominant = Some((resolved.to_string(), count));
        }
    }

    LineageTally {
        breakdown,
        dominant,
        total_analyzed: u32::try_from(lineage.len()).unwrap_or(u32::MAX),
        total_with_disciplines,
    }
}

/// Aggregate discipline frequency across a lineage and report whether any
/// discipline reaches the affinity threshold. An empty lineage reports no
/// affinity without error.
#[must_use]
pub fn check_lineage_affinity(lineage: &[Ancestor]) -> AffinitySummary {
    let tally = tally_lineage(lineage);
    match tally.dominant {
        Some((discipline, count)) => AffinitySummary {
            affinity: count >= AFFINITY_REQUIRED,
            discipline: Some(discipline),
            count,
        },
        None => AffinitySummary::default(),
    }
}

/// Same tally as [`check_lineage_affinity`] with the full diagnostic
/// breakdown attached.
#[must_use]
pub fn check_lineage_affinity_detailed(lineage: &[Ancestor]) -> AffinityReport {
    let tally = tally_lineage(lineage);
    let (discipline, dominant_count) = match tally.dominant {
        Some((discipline, count)) => (Some(discipline), count),
        None => (None, 0),
    };
    AffinityReport {
        affinity: dominant_count >= AFFINITY_REQUIRED,
        discipline,
        dominant_count,
        total_analyzed: tally.total_analyzed,
        total_with_disciplines: tally.total_with_disciplines,
        discipline_breakdown: tally.breakdown,
        affinity_strength: ratio_percent(dominant_count, tally.total_with_disciplines),
    }
}

/// Count ancestors resolving to exactly the given discipline. A zero
/// `required` is treated as already satisfied.
#[must_use]
pub fn check_specific_affinity(
    lineage: &[Ancestor],
    discipline: &str,
    required: u32,
) -> SpecificAffinity {
    let count = lineage
        .iter()
        .filter(|ancestor| resolve_discipline(ancestor) == Some(discipline))
        .count();
    let count = u32::try_from(count).unwrap_or(u32::MAX);
    let percentage = if required == 0 {
        100
    } else {
        ratio_percent(count, required)
    };
    SpecificAffinity {
        has_affinity: count >= required,
        count,
        required,
        percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ancestry::{CompetitionRecord, DisciplineScore};

    fn scored(id: &str, scores: &[(&str, f32)]) -> Ancestor {
        Ancestor {
            discipline_scores: scores
                .iter()
                .map(|(discipline, score)| DisciplineScore {
                    discipline: (*discipline).to_string(),
                    score: *score,
                })
                .collect(),
            ..Ancestor::new(id, id)
        }
    }

    fn competed(id: &str, disciplines: &[&str]) -> Ancestor {
        Ancestor {
            competition_history: disciplines
                .iter()
                .enumerate()
                .map(|(placement, discipline)| CompetitionRecord {
                    discipline: (*discipline).to_string(),
                    placement: u32::try_from(placement).unwrap() + 1,
                })
                .collect(),
            ..Ancestor::new(id, id)
        }
    }

    #[test]
    fn resolution_prefers_direct_tag() {
        let mut ancestor = scored("a1", &[("Dressage", 90.0)]);
        ancestor.discipline = Some("Racing".to_string());
        assert_eq!(resolve_discipline(&ancestor), Some("Racing"));
    }

    #[test]
    fn empty_tag_falls_through_to_scores() {
        let mut ancestor = scored("a1", &[("Dressage", 90.0)]);
        ancestor.discipline = Some(String::new());
        assert_eq!(resolve_discipline(&ancestor), Some("Dressage"));
    }

    #[test]
    fn score_resolution_breaks_ties_by_first_entry() {
        let ancestor = scored("a1", &[("Eventing", 70.0), ("Racing", 70.0)]);
        assert_eq!(resolve_discipline(&ancestor), Some("Eventing"));

        let ancestor = scored("a2", &[("Eventing", 65.0), ("Racing", 70.0)]);
        assert_eq!(resolve_discipline(&ancestor), Some("Racing"));
    }

    #[test]
    fn history_resolution_breaks_ties_by_first_seen() {
        let ancestor = competed("a1", &["Racing", "Dressage", "Dressage", "Racing"]);
        assert_eq!(resolve_discipline(&ancestor), Some("Racing"));

        let ancestor = competed("a2", &["Racing", "Dressage", "Dressage"]);
        assert_eq!(resolve_discipline(&ancestor), Some("Dressage"));
    }

    #[test]
    fn sourceless_ancestor_resolves_to_none() {
        assert_eq!(resolve_discipline(&Ancestor::new("a1", "Blank")), None);
    }

    #[test]
    fn tally_dominant_is_first_to_reach_max() {
        // A B B A: B reaches count 2 first, so B is dominant.
        let lineage = vec![
            Ancestor::tagged("a1", "a1", "Racing"),
            Ancestor::tagged("a2", "a2", "Dressage"),
            Ancestor::tagged("a3", "a3", "Dressage"),
            Ancestor::tagged("a4", "a4", "Racing"),
        ];
        let summary = check_lineage_affinity(&lineage);
        assert_eq!(summary.discipline.as_deref(), Some("Dressage"));
        assert_eq!(summary.count, 2);
        assert!(!summary.affinity);
    }

    #[test]
    fn detailed_report_counts_sources_separately() {
        let lineage = vec![
            Ancestor::tagged("a1", "a1", "Racing"),
            scored("a2", &[("Racing", 88.0), ("Dressage", 70.0)]),
            competed("a3", &["Racing", "Racing", "Dressage"]),
            Ancestor::new("a4", "Blank"),
        ];
        let report = check_lineage_affinity_detailed(&lineage);
        assert!(report.affinity);
        assert_eq!(report.discipline.as_deref(), Some("Racing"));
        assert_eq!(report.dominant_count, 3);
        assert_eq!(report.total_analyzed, 4);
        assert_eq!(report.total_with_disciplines, 3);
        assert_eq!(report.affinity_strength, 100);
        assert_eq!(report.discipline_breakdown.len(), 1);
        assert_eq!(report.strength_tier(), AffinityStrengthTier::Dominant);
    }

    #[test]
    fn detailed_report_on_empty_lineage_is_all_zero() {
        let report = check_lineage_affinity_detailed(&[]);
        assert!(!report.affinity);
        assert!(report.discipline.is_none());
        assert_eq!(report.affinity_strength, 0);
        assert_eq!(report.strength_tier(), AffinityStrengthTier::None);
    }

    #[test]
    fn specific_affinity_handles_zero_required() {
        let probe = check_specific_affinity(&[], "Racing", 0);
        assert!(probe.has_affinity);
        assert_eq!(probe.percentage, 100);
    }
}
