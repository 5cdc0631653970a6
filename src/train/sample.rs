use log::warn;

/// One next-token example: predict `target` after reading `prefix`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sample {
    pub prefix: Vec<usize>,
    pub target: usize,
}

/// Every `(prefix, next token)` pair of every sequence.
///
/// Prefixes longer than `max_prefix` keep only their trailing `max_prefix` tokens.
/// Sequences shorter than two tokens contribute nothing.
pub fn build_samples(sequences: &[Vec<usize>], max_prefix: usize) -> Vec<Sample> {
    let max_prefix = max_prefix.max(1);
    let mut truncated = 0usize;
    let mut samples = Vec::new();
    for tokens in sequences {
        for i in 0..tokens.len().saturating_sub(1) {
            let end = i + 1;
            let start = end.saturating_sub(max_prefix);
            if start > 0 {
                truncated += 1;
            }
            samples.push(Sample {
                prefix: tokens[start..end].to_vec(),
                target: tokens[end],
            });
        }
    }
    if truncated > 0 {
        warn!("{truncated} prefixes truncated to the last {max_prefix} tokens");
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_position_predicts_the_next_token() {
        let samples = build_samples(&[vec![3, 1, 4, 1]], 16);
        assert_eq!(
            samples,
            vec![
                Sample { prefix: vec![3], target: 1 },
                Sample { prefix: vec![3, 1], target: 4 },
                Sample { prefix: vec![3, 1, 4], target: 1 },
            ]
        );
    }

    #[test]
    fn short_sequences_are_skipped() {
        assert!(build_samples(&[vec![], vec![7]], 4).is_empty());
        assert_eq!(build_samples(&[vec![7], vec![1, 2]], 4).len(), 1);
    }

    #[test]
    fn long_prefixes_keep_trailing_window() {
        let samples = build_samples(&[vec![0, 1, 2, 3, 4]], 2);
        assert_eq!(samples.len(), 4);
        assert!(samples.iter().all(|s| s.prefix.len() <= 2));
        assert_eq!(samples[3], Sample { prefix: vec![2, 3], target: 4 });
    }
}
