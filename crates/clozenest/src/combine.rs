//! Combination generator for synthesized wrapper clozes.
//!
//! Given the distinct labels of a note in first-seen order, choose which groups
//! of them get a new enclosing cloze. The output is deterministic and bounded by
//! a budget on the total cloze count (`existing + synthesized`):
//!
//! 1. contiguous suffixes, longest first excluded: lengths `n - 1` down to 2;
//! 2. then, for each size from 2 to `n - 1`, every combination ordered by the
//!    spread of its members' positions, ties broken by their mean position;
//! 3. finally the full set, whenever `n > 1`, even if that exceeds the budget
//!    by one.
//!
//! Generation stops as soon as `output + n >= limit`. Duplicates (by exact
//! sequence) are skipped.
//!
//! ```
//! use clozenest::combine::generate_combinations;
//!
//! let combos = generate_combinations(&[1, 2, 3, 4], 8);
//! assert_eq!(
//!     combos,
//!     vec![vec![3, 4], vec![2, 3, 4], vec![1, 2], vec![2, 3], vec![1, 2, 3, 4]]
//! );
//! ```

/// Generate the wrapper combinations for `keys` under `limit`.
///
/// Members of each combination keep their relative order from `keys`. The
/// wrapper created for the combination at position `p` gets index
/// `p + keys.len() + 1`.
pub fn generate_combinations<T: Clone + PartialEq>(keys: &[T], limit: usize) -> Vec<Vec<T>> {
    let n = keys.len();
    let mut out: Vec<Vec<T>> = Vec::new();
    let exhausted = |out: &Vec<Vec<T>>| out.len() + n >= limit;

    for start in (1..n.saturating_sub(1)).rev() {
        if exhausted(&out) {
            break;
        }
        push_unique(&mut out, keys[start..].to_vec());
    }

    'sizes: for size in 2..n {
        if exhausted(&out) {
            break;
        }
        for positions in ranked(n, size) {
            if exhausted(&out) {
                break 'sizes;
            }
            push_unique(&mut out, positions.iter().map(|&p| keys[p].clone()).collect());
        }
    }

    if n > 1 {
        push_unique(&mut out, keys.to_vec());
    }

    out
}

fn push_unique<T: PartialEq>(out: &mut Vec<Vec<T>>, combo: Vec<T>) {
    if !out.contains(&combo) {
        out.push(combo);
    }
}

/// All `size`-combinations of `0..n`, ordered by variance of the positions,
/// then by their mean.
///
/// Both sorts are stable and applied to the lexicographic enumeration: first by
/// mean, then by variance. Within one size both statistics order the same way
/// as integer keys (`sum` for the mean, `size * sum_sq - sum^2` for the
/// variance), so no floating point is involved.
fn ranked(n: usize, size: usize) -> Vec<Vec<usize>> {
    let mut combos = lexicographic(n, size);
    combos.sort_by_key(|c| c.iter().sum::<usize>());
    combos.sort_by_key(|c| spread(c));
    combos
}

fn spread(positions: &[usize]) -> u128 {
    let k = positions.len() as u128;
    let sum: u128 = positions.iter().map(|&p| p as u128).sum();
    let sum_sq: u128 = positions.iter().map(|&p| (p as u128) * (p as u128)).sum();
    k * sum_sq - sum * sum
}

fn lexicographic(n: usize, size: usize) -> Vec<Vec<usize>> {
    let mut all = Vec::new();
    if size == 0 || size > n {
        return all;
    }

    let mut current: Vec<usize> = (0..size).collect();
    loop {
        all.push(current.clone());

        // Rightmost position that can still advance.
        let Some(i) = (0..size).rev().find(|&i| current[i] < n - size + i) else {
            return all;
        };
        current[i] += 1;
        for j in i + 1..size {
            current[j] = current[j - 1] + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_inputs() {
        assert!(generate_combinations::<u32>(&[], 8).is_empty());
        assert!(generate_combinations(&[1], 8).is_empty());
        assert_eq!(generate_combinations(&[1, 2], 8), vec![vec![1, 2]]);
    }

    #[test]
    fn test_three_keys() {
        // Suffix (2,3), then size 2 ordered: (1,2), (2,3) dup, (1,3).
        assert_eq!(
            generate_combinations(&["a", "b", "c"], 8),
            vec![vec!["b", "c"], vec!["a", "b"], vec!["a", "c"], vec!["a", "b", "c"]]
        );
    }

    #[test]
    fn test_full_combination_is_always_last() {
        for n in 2..9 {
            let keys: Vec<usize> = (1..=n).collect();
            let combos = generate_combinations(&keys, 8);
            assert_eq!(combos.last(), Some(&keys));
        }
    }

    #[test]
    fn test_budget() {
        for n in 1..9 {
            let keys: Vec<usize> = (1..=n).collect();
            let combos = generate_combinations(&keys, 8);
            let before_full = combos.len() - usize::from(n > 1);
            assert!(before_full + n <= 8 || before_full == 0, "n = {n}");
            assert!(combos.len() + n <= 9 || combos.len() == 1, "n = {n}");
        }
    }

    #[test]
    fn test_budget_already_spent() {
        let keys: Vec<u32> = (1..=9).collect();
        assert_eq!(generate_combinations(&keys, 8), vec![keys.clone()]);
    }

    #[test]
    fn test_larger_limit() {
        let combos = generate_combinations(&[1, 2, 3, 4], 10);
        assert_eq!(
            combos,
            vec![
                vec![3, 4],
                vec![2, 3, 4],
                vec![1, 2],
                vec![2, 3],
                vec![1, 3],
                vec![2, 4],
                vec![1, 2, 3, 4],
            ]
        );
    }

    #[test]
    fn test_ranked_order() {
        assert_eq!(
            ranked(4, 2),
            vec![
                vec![0, 1],
                vec![1, 2],
                vec![2, 3],
                vec![0, 2],
                vec![1, 3],
                vec![0, 3],
            ]
        );
    }

    #[test]
    fn test_lexicographic() {
        assert_eq!(
            lexicographic(4, 3),
            vec![vec![0, 1, 2], vec![0, 1, 3], vec![0, 2, 3], vec![1, 2, 3]]
        );
        assert!(lexicographic(2, 3).is_empty());
    }
}
