//! Pareto ranking: dominance, non-dominated fronts and crowding distance.
//!
//! All objectives are minimised. Functions accept any row type that views as
//! `&[f64]`, so `[f64; 2]` objective rows work directly.

/// `a` dominates `b`: no worse in every objective, strictly better in one.
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    let mut strictly_better = false;
    for (x, y) in a.iter().zip(b) {
        if x > y {
            return false;
        }
        if x < y {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Fast non-dominated sort.
///
/// Returns the fronts in order; `fronts[0]` is front 1 (the non-dominated
/// set). Members of each front are listed in ascending index order. Every
/// index appears in exactly one front.
pub fn assign_fronts<R: AsRef<[f64]>>(objectives: &[R]) -> Vec<Vec<usize>> {
    let n = objectives.len();

    // Individuals dominated by p, and how many dominate p.
    let mut dominated: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut domination_count = vec![0usize; n];

    let mut current = Vec::new();
    for p in 0..n {
        let obj_p = objectives[p].as_ref();
        for q in 0..n {
            if p == q {
                continue;
            }
            let obj_q = objectives[q].as_ref();
            if dominates(obj_p, obj_q) {
                dominated[p].push(q);
            } else if dominates(obj_q, obj_p) {
                domination_count[p] += 1;
            }
        }
        if domination_count[p] == 0 {
            current.push(p);
        }
    }

    let mut fronts = Vec::new();
    while !current.is_empty() {
        let mut next = Vec::new();
        for &p in &current {
            for &q in &dominated[p] {
                domination_count[q] -= 1;
                if domination_count[q] == 0 {
                    next.push(q);
                }
            }
        }
        next.sort_unstable();
        fronts.push(current);
        current = next;
    }

    let mut seen = vec![false; n];
    for &i in fronts.iter().flatten() {
        assert!(!seen[i], "individual {i} assigned to more than one front");
        seen[i] = true;
    }
    assert!(
        seen.iter().all(|&s| s),
        "front assignment left individuals unranked"
    );

    fronts
}

/// Per-individual front numbers (starting at 1) for `n` individuals.
pub fn flatten_fronts(fronts: &[Vec<usize>], n: usize) -> Vec<usize> {
    let mut ranks = vec![0; n];
    for (k, members) in fronts.iter().enumerate() {
        for &i in members {
            ranks[i] = k + 1;
        }
    }
    ranks
}

/// Crowding distance of every individual over the whole matrix.
///
/// Computed globally, not per front. For each objective the individuals are
/// sorted by value (ties keep index order); the minimum and maximum get
/// infinite distance and every interior individual accumulates
/// `(next - previous) / (max - min)`. An objective with zero range adds
/// nothing to interior distances.
pub fn crowding_distance<R: AsRef<[f64]>>(objectives: &[R]) -> Vec<f64> {
    let n = objectives.len();
    let mut distances = vec![0.0; n];
    let Some(first) = objectives.first() else {
        return distances;
    };

    for m in 0..first.as_ref().len() {
        let value = |i: usize| objectives[i].as_ref()[m];

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| value(a).total_cmp(&value(b)));

        let lowest = order[0];
        let highest = order[n - 1];
        let range = value(highest) - value(lowest);

        distances[lowest] = f64::INFINITY;
        distances[highest] = f64::INFINITY;

        if range > 0.0 {
            for w in order.windows(3) {
                distances[w[1]] += (value(w[2]) - value(w[0])) / range;
            }
        }
    }

    distances
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_dominance() {
        assert!(dominates(&[1.0, 1.0], &[2.0, 2.0]));
        assert!(!dominates(&[2.0, 2.0], &[1.0, 1.0]));

        // Trade-off: neither dominates
        assert!(!dominates(&[1.0, 2.0], &[2.0, 1.0]));
        assert!(!dominates(&[2.0, 1.0], &[1.0, 2.0]));

        // Equal vectors do not dominate each other
        assert!(!dominates(&[1.0, 1.0], &[1.0, 1.0]));

        // Better in one, equal in the other
        assert!(dominates(&[1.0, 2.0], &[1.0, 3.0]));
    }

    #[test]
    fn test_assign_fronts() {
        let objectives = [[1.0, 1.0], [2.0, 2.0], [1.0, 2.0], [2.0, 1.0], [3.0, 3.0]];
        let fronts = assign_fronts(&objectives);
        assert_eq!(fronts, vec![vec![0], vec![2, 3], vec![1], vec![4]]);
        assert_eq!(flatten_fronts(&fronts, 5), vec![1, 3, 2, 2, 4]);
    }

    #[test]
    fn test_trade_off_front() {
        let objectives = [[1.0, 4.0], [2.0, 3.0], [3.0, 2.0], [4.0, 1.0]];
        assert_eq!(assign_fronts(&objectives), vec![vec![0, 1, 2, 3]]);
    }

    #[test]
    fn test_duplicates_share_front() {
        let objectives = [[1.0, 1.0], [1.0, 1.0], [2.0, 2.0]];
        assert_eq!(assign_fronts(&objectives), vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn test_empty_population() {
        let objectives: Vec<[f64; 2]> = Vec::new();
        assert!(assign_fronts(&objectives).is_empty());
        assert!(crowding_distance(&objectives).is_empty());
    }

    #[test]
    fn test_crowding_distance_values() {
        let objectives = [[0.0, 4.0], [1.0, 3.0], [2.0, 2.0], [4.0, 0.0]];
        let distances = crowding_distance(&objectives);
        assert_eq!(distances[0], f64::INFINITY);
        assert_eq!(distances[3], f64::INFINITY);
        assert!((distances[1] - 1.0).abs() < 1e-12);
        assert!((distances[2] - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_crowding_distance_constant_objective() {
        let objectives = [[1.0, 5.0], [2.0, 5.0], [3.0, 5.0], [4.0, 5.0]];
        let distances = crowding_distance(&objectives);
        assert!(distances.iter().all(|d| !d.is_nan()));
        assert_eq!(distances[0], f64::INFINITY);
        assert_eq!(distances[3], f64::INFINITY);
    }

    #[test]
    fn test_crowding_distance_small_populations() {
        assert_eq!(crowding_distance(&[[1.0, 2.0]]), vec![f64::INFINITY]);
        assert_eq!(
            crowding_distance(&[[1.0, 2.0], [2.0, 1.0]]),
            vec![f64::INFINITY, f64::INFINITY]
        );
    }

    fn objective_matrix(rows: std::ops::Range<usize>) -> impl Strategy<Value = Vec<[f64; 2]>> {
        prop::collection::vec([-100.0f64..100.0, -100.0f64..100.0], rows)
    }

    proptest! {
        #[test]
        fn prop_fronts_partition_population(objectives in objective_matrix(0..40)) {
            let fronts = assign_fronts(&objectives);
            let mut members: Vec<usize> = fronts.iter().flatten().copied().collect();
            members.sort_unstable();
            prop_assert_eq!(members, (0..objectives.len()).collect::<Vec<_>>());
            prop_assert!(fronts.iter().all(|f| !f.is_empty()));

            // Nobody is dominated by a member of its own or a later front.
            let ranks = flatten_fronts(&fronts, objectives.len());
            for p in 0..objectives.len() {
                for q in 0..objectives.len() {
                    if dominates(&objectives[p], &objectives[q]) {
                        prop_assert!(ranks[p] < ranks[q]);
                    }
                }
            }
        }

        #[test]
        fn prop_crowding_boundaries_infinite(objectives in objective_matrix(1..40)) {
            let distances = crowding_distance(&objectives);
            prop_assert_eq!(distances.len(), objectives.len());
            for m in 0..2 {
                let min = objectives.iter().map(|o| o[m]).fold(f64::INFINITY, f64::min);
                let max = objectives.iter().map(|o| o[m]).fold(f64::NEG_INFINITY, f64::max);
                // Some individual at each extreme carries infinite distance.
                for extreme in [min, max] {
                    prop_assert!(objectives
                        .iter()
                        .zip(&distances)
                        .any(|(o, d)| o[m] == extreme && d.is_infinite()));
                }
            }
            prop_assert!(distances.iter().all(|d| *d >= 0.0));
        }
    }
}
