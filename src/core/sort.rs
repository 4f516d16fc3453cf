//! In-place unstable sorting with an O(n log n) worst case.
//!
//! Pattern-defeating quicksort (Peters, <https://arxiv.org/pdf/2106.05123.pdf>)
//! without the BlockQuicksort partitioning. Short ranges use insertion sort,
//! ranges that keep partitioning badly fall back to heapsort.

/// Ranges at or below this length are insertion sorted.
const MAX_INSERTION: usize = 12;
/// Ranges at or above this length pick the pivot with Tukey's ninther.
const SHORTEST_NINTHER: usize = 50;
/// Swap count reported by a fully descending ninther sample.
const MAX_SWAPS: usize = 4 * 3;
/// Adjacent out-of-order pairs fixed before giving up on a presorted range.
const PARTIAL_MAX_STEPS: usize = 5;
/// Partial insertion sort never shifts inside shorter ranges.
const SHORTEST_SHIFTING: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortedHint {
    Unknown,
    Increasing,
    Decreasing,
}

/// Sorts `v` in ascending order.
pub fn sort<T: Ord>(v: &mut [T]) {
    sort_by(v, |a, b| a < b);
}

/// Sorts `v` using `is_less` as a strict weak ordering.
pub fn sort_by<T, F>(v: &mut [T], mut is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    let n = v.len();
    if n < 2 {
        return;
    }
    let limit = n.ilog2();
    pdqsort(v, 0, n, limit, &mut is_less);
}

/// Sorts `v[a..b]`. `limit` is the number of imbalanced partitions tolerated
/// before switching to heapsort.
fn pdqsort<T, F>(v: &mut [T], mut a: usize, mut b: usize, mut limit: u32, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let mut was_balanced = true;
    let mut was_partitioned = true;

    loop {
        let length = b - a;

        if length <= MAX_INSERTION {
            insertion_sort(v, a, b, is_less);
            return;
        }

        if limit == 0 {
            heapsort(v, a, b, is_less);
            return;
        }

        if !was_balanced {
            break_patterns(v, a, b);
            limit -= 1;
        }

        let (mut pivot, mut hint) = choose_pivot(v, a, b, is_less);
        if hint == SortedHint::Decreasing {
            v[a..b].reverse();
            // The pivot sat `pivot - a` after the start; it now sits that far before the end.
            pivot = (b - 1) - (pivot - a);
            hint = SortedHint::Increasing;
        }

        if was_balanced
            && was_partitioned
            && hint == SortedHint::Increasing
            && partial_insertion_sort(v, a, b, is_less)
        {
            return;
        }

        // v[a - 1] is an earlier pivot no greater than anything in range. A pivot
        // equal to it means a run of duplicates: split off everything equal.
        if a > 0 && !is_less(&v[a - 1], &v[pivot]) {
            a = partition_equal(v, a, b, pivot, is_less);
            continue;
        }

        let (mid, already_partitioned) = partition(v, a, b, pivot, is_less);
        was_partitioned = already_partitioned;

        let (left_len, right_len) = (mid - a, b - mid);
        let balance_threshold = length / 8;
        if left_len < right_len {
            was_balanced = left_len >= balance_threshold;
            pdqsort(v, a, mid, limit, is_less);
            a = mid + 1;
        } else {
            was_balanced = right_len >= balance_threshold;
            pdqsort(v, mid + 1, b, limit, is_less);
            b = mid;
        }
    }
}

fn insertion_sort<T, F>(v: &mut [T], a: usize, b: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    for i in a + 1..b {
        let mut j = i;
        while j > a && is_less(&v[j], &v[j - 1]) {
            v.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Restores the max-heap property below `root` in the heap `v[first..first + hi]`.
fn sift_down<T, F>(v: &mut [T], mut root: usize, hi: usize, first: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    loop {
        let mut child = 2 * root + 1;
        if child >= hi {
            return;
        }
        if child + 1 < hi && is_less(&v[first + child], &v[first + child + 1]) {
            child += 1;
        }
        if !is_less(&v[first + root], &v[first + child]) {
            return;
        }
        v.swap(first + root, first + child);
        root = child;
    }
}

fn heapsort<T, F>(v: &mut [T], a: usize, b: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let first = a;
    let hi = b - a;

    for i in (0..hi / 2).rev() {
        sift_down(v, i, hi, first, is_less);
    }

    for i in (1..hi).rev() {
        v.swap(first, first + i);
        sift_down(v, 0, i, first, is_less);
    }
}

/// Hoare partition of `v[a..b]` around `v[pivot]`.
///
/// Afterwards everything left of the returned index is `< p` and everything
/// right of it is `>= p`, with `p` itself at the index. The flag reports
/// whether no element had to move.
fn partition<T, F>(v: &mut [T], a: usize, b: usize, pivot: usize, is_less: &mut F) -> (usize, bool)
where
    F: FnMut(&T, &T) -> bool,
{
    v.swap(a, pivot);
    let (mut i, mut j) = (a + 1, b - 1);

    while i <= j && is_less(&v[i], &v[a]) {
        i += 1;
    }
    while i <= j && is_less(&v[a], &v[j]) {
        j -= 1;
    }
    if i > j {
        v.swap(j, a);
        return (j, true);
    }
    v.swap(i, j);
    i += 1;
    j -= 1;

    loop {
        while i <= j && is_less(&v[i], &v[a]) {
            i += 1;
        }
        while i <= j && is_less(&v[a], &v[j]) {
            j -= 1;
        }
        if i > j {
            break;
        }
        v.swap(i, j);
        i += 1;
        j -= 1;
    }
    v.swap(j, a);
    (j, false)
}

/// Moves every element equal to `v[pivot]` to the front of `v[a..b]` and
/// returns where the greater elements start. No element may be smaller than
/// the pivot.
fn partition_equal<T, F>(v: &mut [T], a: usize, b: usize, pivot: usize, is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    v.swap(a, pivot);
    let (mut i, mut j) = (a + 1, b - 1);

    loop {
        while i <= j && !is_less(&v[a], &v[i]) {
            i += 1;
        }
        while i <= j && is_less(&v[a], &v[j]) {
            j -= 1;
        }
        if i > j {
            break;
        }
        v.swap(i, j);
        i += 1;
        j -= 1;
    }
    i
}

/// Fixes a few adjacent inversions; true if `v[a..b]` ends up sorted.
fn partial_insertion_sort<T, F>(v: &mut [T], a: usize, b: usize, is_less: &mut F) -> bool
where
    F: FnMut(&T, &T) -> bool,
{
    let mut i = a + 1;
    for _ in 0..PARTIAL_MAX_STEPS {
        while i < b && !is_less(&v[i], &v[i - 1]) {
            i += 1;
        }

        if i == b {
            return true;
        }

        if b - a < SHORTEST_SHIFTING {
            return false;
        }

        v.swap(i, i - 1);

        // Shift the smaller element left.
        if i - a >= 2 {
            let mut j = i - 1;
            while j > a && is_less(&v[j], &v[j - 1]) {
                v.swap(j, j - 1);
                j -= 1;
            }
        }
        // Shift the greater element right.
        if b - i >= 2 {
            let mut j = i + 1;
            while j < b && is_less(&v[j], &v[j - 1]) {
                v.swap(j, j - 1);
                j += 1;
            }
        }
    }
    false
}

/// Swaps three elements around the middle with pseudo-random partners.
fn break_patterns<T>(v: &mut [T], a: usize, b: usize) {
    let length = b - a;
    if length < 8 {
        return;
    }

    let mut random = XorShift(length as u64);
    let modulus = 1usize << (usize::BITS - length.leading_zeros());

    let mid = a + (length / 4) * 2;
    for idx in mid - 1..=mid + 1 {
        let mut other = (random.next() as usize) & (modulus - 1);
        if other >= length {
            other -= length;
        }
        v.swap(idx, a + other);
    }
}

/// Picks a pivot index in `v[a..b]` and classifies the sampled order.
///
/// Median of three quartile samples, upgraded to Tukey's ninther on long ranges.
fn choose_pivot<T, F>(v: &[T], a: usize, b: usize, is_less: &mut F) -> (usize, SortedHint)
where
    F: FnMut(&T, &T) -> bool,
{
    let l = b - a;
    let mut swaps = 0;
    let mut i = a + l / 4;
    let mut j = a + l / 4 * 2;
    let mut k = a + l / 4 * 3;

    if l >= 8 {
        if l >= SHORTEST_NINTHER {
            i = median_adjacent(v, i, &mut swaps, is_less);
            j = median_adjacent(v, j, &mut swaps, is_less);
            k = median_adjacent(v, k, &mut swaps, is_less);
        }
        j = median(v, i, j, k, &mut swaps, is_less);
    }

    match swaps {
        0 => (j, SortedHint::Increasing),
        MAX_SWAPS => (j, SortedHint::Decreasing),
        _ => (j, SortedHint::Unknown),
    }
}

/// Orders two indices so that `v[x] <= v[y]`.
fn order2<T, F>(v: &[T], a: usize, b: usize, swaps: &mut usize, is_less: &mut F) -> (usize, usize)
where
    F: FnMut(&T, &T) -> bool,
{
    if is_less(&v[b], &v[a]) {
        *swaps += 1;
        (b, a)
    } else {
        (a, b)
    }
}

fn median<T, F>(v: &[T], a: usize, b: usize, c: usize, swaps: &mut usize, is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let (a, b) = order2(v, a, b, swaps, is_less);
    let (b, _) = order2(v, b, c, swaps, is_less);
    let (_, b) = order2(v, a, b, swaps, is_less);
    b
}

fn median_adjacent<T, F>(v: &[T], a: usize, swaps: &mut usize, is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    median(v, a - 1, a, a + 1, swaps, is_less)
}

/// Marsaglia xorshift, seeded from the range length so runs are reproducible.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 17;
        self.0 ^= self.0 << 5;
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_sorted<T: Ord>(v: &[T]) -> bool {
        v.windows(2).all(|w| w[0] <= w[1])
    }

    /// Sorts a copy and counts comparisons.
    fn count_comparisons(input: &[u32]) -> (Vec<u32>, usize) {
        let mut v = input.to_vec();
        let mut comparisons = 0;
        sort_by(&mut v, |a, b| {
            comparisons += 1;
            a < b
        });
        (v, comparisons)
    }

    #[test]
    fn test_sort_small_inputs() {
        let mut empty: [u8; 0] = [];
        sort(&mut empty);

        let mut one = [7];
        sort(&mut one);
        assert_eq!(one, [7]);

        let mut runes: Vec<char> = "abc123".chars().collect();
        sort(&mut runes);
        assert_eq!(runes.iter().collect::<String>(), "123abc");
    }

    #[test]
    fn test_sort_matches_std() {
        let mut state = 0x9E37_79B9_7F4A_7C15u64;
        for len in [13, 49, 50, 51, 100, 1000, 4096] {
            let mut v: Vec<u32> = (0..len)
                .map(|_| {
                    state ^= state << 7;
                    state ^= state >> 9;
                    (state % 500) as u32
                })
                .collect();
            let mut expected = v.clone();
            expected.sort_unstable();
            sort(&mut v);
            assert_eq!(v, expected, "length {len}");
        }
    }

    #[test]
    fn test_sort_patterns() {
        let n = 2000u32;
        let patterns: Vec<(&str, Vec<u32>)> = vec![
            ("ascending", (0..n).collect()),
            ("descending", (0..n).rev().collect()),
            ("all_equal", vec![42; n as usize]),
            ("organ_pipe", (0..n / 2).chain((0..n / 2).rev()).collect()),
            ("sawtooth", (0..n).map(|i| i % 17).collect()),
            ("two_values", (0..n).map(|i| i % 2).collect()),
            (
                "ascending_one_swap",
                (0..n).map(|i| if i == 10 { n } else { i }).collect(),
            ),
        ];
        for (name, input) in patterns {
            let (sorted, _) = count_comparisons(&input);
            assert!(is_sorted(&sorted), "{name} not sorted");
            let mut expected = input.clone();
            expected.sort_unstable();
            assert_eq!(sorted, expected, "{name} is not a permutation");
        }
    }

    #[test]
    fn test_presorted_input_is_linear() {
        let input: Vec<u32> = (0..10_000).collect();
        let (_, comparisons) = count_comparisons(&input);
        assert!(comparisons < 3 * input.len(), "{comparisons} comparisons");
    }

    #[test]
    fn test_heapsort_fallback() {
        let mut v: Vec<i32> = (0..200).rev().chain(0..200).collect();
        let len = v.len();
        heapsort(&mut v, 0, len, &mut |a: &i32, b: &i32| a < b);
        assert!(is_sorted(&v));
    }

    #[test]
    fn test_zero_budget_still_sorts() {
        let mut v: Vec<u32> = (0..500).map(|i| (i * 7919) % 503).collect();
        let len = v.len();
        pdqsort(&mut v, 0, len, 0, &mut |a: &u32, b: &u32| a < b);
        assert!(is_sorted(&v));
    }

    #[test]
    fn test_partition_equal_splits_duplicates() {
        let mut v = vec![3, 5, 3, 3, 9, 3, 4, 3];
        let len = v.len();
        let mid = partition_equal(&mut v, 0, len, 0, &mut |a: &i32, b: &i32| a < b);
        assert_eq!(mid, 5);
        assert!(v[..mid].iter().all(|&x| x == 3));
        assert!(v[mid..].iter().all(|&x| x > 3));
    }

    #[test]
    fn test_choose_pivot_hints() {
        let ascending: Vec<u32> = (0..100).collect();
        let (_, hint) = choose_pivot(&ascending, 0, 100, &mut |a: &u32, b: &u32| a < b);
        assert_eq!(hint, SortedHint::Increasing);

        let descending: Vec<u32> = (0..100).rev().collect();
        let (_, hint) = choose_pivot(&descending, 0, 100, &mut |a: &u32, b: &u32| a < b);
        assert_eq!(hint, SortedHint::Decreasing);
    }

    #[test]
    fn test_xorshift_sequence() {
        let mut r = XorShift(1);
        assert_eq!(r.next(), 270369);
    }
}
