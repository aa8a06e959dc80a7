use super::normalizer::normalize;
use std::collections::HashMap;

/// Dice-Sørensen coefficient over adjacent-character pairs of the normalized inputs.
///
/// Equal normalized inputs score 1.0, including two empty strings and two
/// identical single characters. Otherwise an input without any bigram scores 0.0.
/// Bigrams are counted as a multiset, so "aaaa" vs "aa" is 2*1/(3+1) = 0.5.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);
    if a == b {
        return 1.0;
    }

    let a_bigrams = bigrams(&a);
    let b_bigrams = bigrams(&b);
    if a_bigrams.is_empty() || b_bigrams.is_empty() {
        return 0.0;
    }

    let mut remaining: HashMap<(char, char), usize> = HashMap::new();
    for pair in &b_bigrams {
        *remaining.entry(*pair).or_insert(0) += 1;
    }

    let mut shared = 0usize;
    for pair in &a_bigrams {
        if let Some(count) = remaining.get_mut(pair) {
            if *count > 0 {
                *count -= 1;
                shared += 1;
            }
        }
    }

    let score = (2 * shared) as f64 / (a_bigrams.len() + b_bigrams.len()) as f64;
    score.clamp(0.0, 1.0)
}

fn bigrams(text: &str) -> Vec<(char, char)> {
    let chars: Vec<char> = text.chars().collect();
    chars.windows(2).map(|w| (w[0], w[1])).collect()
}
