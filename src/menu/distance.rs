/// Levenshtein distance counted in `char`s, so a Hangul syllable is one unit.
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // two rolling rows of the DP table
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod distance_tests {
    use super::distance;

    #[test]
    fn identical_strings_are_zero() {
        for s in ["", "a", "김치찌개", "pasta carbonara"] {
            assert_eq!(distance(s, s), 0);
        }
    }

    #[test]
    fn empty_side_counts_every_char() {
        assert_eq!(distance("", "abc"), 3);
        assert_eq!(distance("라멘", ""), 2);
    }

    #[test]
    fn symmetric() {
        let pairs = [("kitten", "sitting"), ("김치찌게", "김치찌개"), ("초밥", "스시롤")];
        for (a, b) in pairs {
            assert_eq!(distance(a, b), distance(b, a));
        }
        assert_eq!(distance("kitten", "sitting"), 3);
    }

    #[test]
    fn hangul_is_measured_per_syllable() {
        // one syllable differs, though it is three bytes in UTF-8
        assert_eq!(distance("김치찌게", "김치찌개"), 1);
        assert_eq!(distance("된장찌개", "김치찌개"), 2);
    }

    #[test]
    fn triangle_inequality_on_samples() {
        let words = ["라멘", "라면", "냉면", "김치찌개", "김치볶음밥", "", "pizza", "pasta"];
        for a in words {
            for b in words {
                for c in words {
                    assert!(distance(a, c) <= distance(a, b) + distance(b, c));
                }
            }
        }
    }
}
