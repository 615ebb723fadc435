use affinity::core::models::assignment::{
    FiveRoleAssignment, ScoredCombination, SevenRoleAssignment,
};
use affinity::core::models::universe::Universe;
use affinity::core::scoring::ScoreBreakdown;
use affinity::core::tables::{ScoreKey, Tables};
use std::fmt::Write;

pub fn format_combination(universe: &Universe, combination: &ScoredCombination) -> String {
    let [parent, gp1, gp2, c1, c2] = combination.assignment.names(universe);
    format!(
        "parent {parent} | grandparents {gp1}, {gp2} | chromos {c1}, {c2} | score {}",
        combination.score
    )
}

pub fn format_ranking(universe: &Universe, ranking: &[ScoredCombination]) -> String {
    let width = ranking.len().to_string().len();
    ranking
        .iter()
        .enumerate()
        .map(|(i, combination)| {
            format!(
                "{:>width$}. {}\n",
                i + 1,
                format_combination(universe, combination)
            )
        })
        .collect()
}

/// One line per term of the seven-role score, labelled with the entities involved.
pub fn format_breakdown(
    universe: &Universe,
    assignment: FiveRoleAssignment,
    breakdown: &ScoreBreakdown,
) -> String {
    let seven = SevenRoleAssignment::from(assignment);
    let pairs = [
        (seven.target, seven.parent1),
        (seven.target, seven.parent2),
        (seven.parent1, seven.parent2),
    ];
    let triples = [
        (seven.target, seven.parent1, seven.grandparent1),
        (seven.target, seven.parent1, seven.grandparent2),
        (seven.target, seven.parent2, seven.grandparent3),
        (seven.target, seven.parent2, seven.grandparent4),
    ];

    let mut out = String::new();
    for ((a, b), score) in pairs.into_iter().zip(breakdown.pair_terms) {
        let _ = writeln!(
            out,
            "  pair   {} + {}: {}",
            universe.name(a),
            universe.name(b),
            score
        );
    }
    for ((a, b, c), score) in triples.into_iter().zip(breakdown.triple_terms) {
        let _ = writeln!(
            out,
            "  triple {} + {} + {}: {}",
            universe.name(a),
            universe.name(b),
            universe.name(c),
            score
        );
    }
    let _ = writeln!(
        out,
        "  pairs {} + triples {} = {}",
        breakdown.pair_sum(),
        breakdown.triple_sum(),
        breakdown.total()
    );
    out
}

fn key_label(universe: &Universe, key: &ScoreKey) -> String {
    key.members()
        .into_iter()
        .map(|id| universe.name(id))
        .collect::<Vec<_>>()
        .join(" + ")
}

fn strongest(
    universe: &Universe,
    entries: impl Iterator<Item = (ScoreKey, i64)>,
    show: usize,
) -> Vec<String> {
    let mut entries: Vec<_> = entries.collect();
    entries.sort_by(|(ka, sa), (kb, sb)| sb.cmp(sa).then_with(|| ka.cmp(kb)));
    entries
        .into_iter()
        .take(show)
        .map(|(key, score)| format!("    {:>6}  {}", score, key_label(universe, &key)))
        .collect()
}

/// Table sizes plus the `show` highest-scoring pair and triple entries.
pub fn format_table_summary(tables: &Tables, show: usize) -> String {
    let universe = tables.universe();
    let mut out = String::new();
    let _ = writeln!(out, "Entities:       {}", universe.len());
    let _ = writeln!(out, "Pair entries:   {}", tables.pair_entries());
    let _ = writeln!(out, "Triple entries: {}", tables.triple_entries());

    if show > 0 {
        let _ = writeln!(out, "  Strongest pairs:");
        for line in strongest(universe, tables.pairs().iter(), show) {
            let _ = writeln!(out, "{line}");
        }
        let _ = writeln!(out, "  Strongest triples:");
        for line in strongest(universe, tables.triples().iter(), show) {
            let _ = writeln!(out, "{line}");
        }
    }
    out
}

/// Every entity sharing a non-zero pair score with `entity`, strongest first.
pub fn format_partners(tables: &Tables, entity: &str) -> Option<String> {
    let universe = tables.universe();
    if !universe.contains(entity) {
        return None;
    }
    let mut partners: Vec<(&str, i64)> = universe
        .names()
        .iter()
        .filter(|other| other.as_str() != entity)
        .map(|other| (other.as_str(), tables.pair_score(entity, other)))
        .filter(|&(_, score)| score != 0)
        .collect();
    partners.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut out = String::new();
    let _ = writeln!(out, "Partners of {entity} ({}):", partners.len());
    for (other, score) in partners {
        let _ = writeln!(out, "    {score:>6}  {other}");
    }
    Some(out)
}
