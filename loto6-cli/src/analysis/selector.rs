use std::collections::BTreeSet;

use anyhow::{Result, bail};
use rand::Rng;
use rand::rngs::StdRng;

use loto6_data::models::{Draw, PICK_COUNT, Prediction};
use loto6_data::rules::RuleConfig;

use super::pairs::{flatten_pairs, top_pairs};
use super::{count_frequencies, hot_numbers};

/// 有効なヒューリスティックで候補集合を作り、そこから一様に6個抽出する。
/// draws[0] = 最新の抽選。
pub fn select_candidates(
    draws: &[Draw],
    rules: &RuleConfig,
    rng: &mut StdRng,
) -> Result<Prediction> {
    if draws.is_empty() {
        bail!("履歴が空です。予測には1件以上の抽選結果が必要です");
    }

    let previous = draws[0].numbers;
    let mut candidates: BTreeSet<u8> = BTreeSet::new();

    if rules.use_previous_numbers {
        // 前回の数字の先頭から設定個数（並びは行のまま）
        for &n in previous.iter().take(rules.previous_number_count) {
            candidates.insert(n);
        }
    }

    if rules.use_common_pairs {
        let pairs = top_pairs(draws, rules.common_pair_limit);
        for n in flatten_pairs(&pairs) {
            candidates.insert(n);
        }
    }

    let mut zone_picks = Vec::new();
    if rules.use_zone_distribution {
        for zone in &rules.zones {
            let pick = rng.random_range(zone[0]..=zone[1]);
            zone_picks.push(pick);
            candidates.insert(pick);
        }
    }

    let excluded_hot = if rules.exclude_hot_numbers {
        let freq = count_frequencies(draws);
        hot_numbers(&freq, rules.hot_count)
    } else {
        Vec::new()
    };

    let mut pool: Vec<u8> = candidates
        .iter()
        .copied()
        .filter(|n| !excluded_hot.contains(n))
        .collect();

    // 抽出前に必ず検査する。足りないまま抽出に進んではいけない
    if pool.len() < PICK_COUNT {
        bail!(
            "候補が{}個しかありません（{}個必要）。ルール設定を見直してください",
            pool.len(),
            PICK_COUNT
        );
    }

    let mut predicted = [0u8; PICK_COUNT];
    for slot in predicted.iter_mut() {
        let idx = rng.random_range(0..pool.len());
        *slot = pool.remove(idx);
    }
    predicted.sort();

    Ok(Prediction {
        predicted,
        previous,
        zone_picks,
        excluded_hot,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::make_test_draws;
    use loto6_data::models::{NUMBER_MAX, NUMBER_MIN};
    use rand::SeedableRng;

    fn rules_off() -> RuleConfig {
        RuleConfig {
            use_previous_numbers: false,
            previous_number_count: 2,
            use_common_pairs: false,
            common_pair_limit: 20,
            use_zone_distribution: false,
            zones: vec![],
            exclude_hot_numbers: false,
            hot_count: 3,
        }
    }

    fn single_draw(numbers: [u8; 6]) -> Vec<Draw> {
        vec![Draw {
            date: "2024/01/01".to_string(),
            numbers,
        }]
    }

    #[test]
    fn test_empty_history_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = select_candidates(&[], &RuleConfig::default(), &mut rng).unwrap_err();
        assert!(err.to_string().contains("履歴"));
    }

    #[test]
    fn test_no_heuristics_reports_insufficient() {
        let mut rng = StdRng::seed_from_u64(1);
        let draws = make_test_draws(10);
        let err = select_candidates(&draws, &rules_off(), &mut rng).unwrap_err();
        assert!(err.to_string().contains("候補"));
    }

    #[test]
    fn test_small_pool_reports_insufficient() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut rules = rules_off();
        rules.use_previous_numbers = true;
        rules.previous_number_count = 2;
        let err = select_candidates(&make_test_draws(5), &rules, &mut rng).unwrap_err();
        assert!(err.to_string().contains("候補"));
    }

    #[test]
    fn test_exact_pool_of_six_is_returned_sorted() {
        let mut rules = rules_off();
        rules.use_previous_numbers = true;
        rules.previous_number_count = 6;

        let draws = single_draw([1, 2, 3, 4, 5, 6]);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let prediction = select_candidates(&draws, &rules, &mut rng).unwrap();
            assert_eq!(prediction.predicted, [1, 2, 3, 4, 5, 6]);
        }
    }

    #[test]
    fn test_predicted_six_distinct_sorted_in_range() {
        let draws = make_test_draws(30);
        let rules = RuleConfig::default();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let prediction = select_candidates(&draws, &rules, &mut rng).unwrap();
            let p = prediction.predicted;
            for &n in &p {
                assert!((NUMBER_MIN..=NUMBER_MAX).contains(&n));
            }
            for i in 1..p.len() {
                assert!(p[i - 1] < p[i], "非昇順または重複: {:?}", p);
            }
        }
    }

    #[test]
    fn test_previous_always_first_record() {
        let mut draws = make_test_draws(12);
        draws[0].numbers = [41, 3, 17, 29, 8, 35];

        let mut rules = rules_off();
        rules.use_common_pairs = true;
        rules.common_pair_limit = 50;

        let mut rng = StdRng::seed_from_u64(7);
        let prediction = select_candidates(&draws, &rules, &mut rng).unwrap();
        // ヒューリスティックの組み合わせに関係なく前回の数字は先頭レコード
        assert_eq!(prediction.previous, [41, 3, 17, 29, 8, 35]);
    }

    #[test]
    fn test_excluded_hot_never_predicted() {
        // 21件で全数字が均等に3回ずつ → ホットは同数タイで [1, 2, 3]
        let draws = make_test_draws(21);
        let mut rules = rules_off();
        rules.use_common_pairs = true;
        rules.common_pair_limit = 500;
        rules.exclude_hot_numbers = true;
        rules.hot_count = 3;

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let prediction = select_candidates(&draws, &rules, &mut rng).unwrap();
            assert_eq!(prediction.excluded_hot, vec![1, 2, 3]);
            for n in prediction.excluded_hot {
                assert!(!prediction.predicted.contains(&n));
            }
        }
    }

    #[test]
    fn test_dominant_pairs_fill_the_pool() {
        // (3,7) 4回 > (12,20) 3回 > (25,40) 2回、その他のペアは全て1回になるよう
        // 残りの数字を使い捨てで埋める
        let reserved = [3u8, 7, 12, 20, 25, 40];
        let mut fillers = (1..=NUMBER_MAX).filter(|n| !reserved.contains(n));
        let mut draws = Vec::new();
        let plan = [((3u8, 7u8), 4), ((12, 20), 3), ((25, 40), 2)];
        for ((a, b), repeats) in plan {
            for _ in 0..repeats {
                let mut numbers = [a, b, 0, 0, 0, 0];
                for slot in numbers.iter_mut().skip(2) {
                    *slot = fillers.next().unwrap();
                }
                draws.push(Draw {
                    date: "2024/01/01".to_string(),
                    numbers,
                });
            }
        }

        let mut rules = rules_off();
        rules.use_common_pairs = true;
        rules.common_pair_limit = 3;

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let prediction = select_candidates(&draws, &rules, &mut rng).unwrap();
            // プールは上位3ペアの構成数字ちょうど6個
            assert_eq!(prediction.predicted, [3, 7, 12, 20, 25, 40]);
        }
    }

    #[test]
    fn test_zone_picks_within_zones() {
        let mut rules = rules_off();
        rules.use_zone_distribution = true;
        rules.zones = vec![[1, 5], [6, 10], [11, 15], [16, 20], [21, 25], [26, 30]];

        let draws = make_test_draws(10);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let prediction = select_candidates(&draws, &rules, &mut rng).unwrap();

            assert_eq!(prediction.zone_picks.len(), 6);
            for (pick, zone) in prediction.zone_picks.iter().zip(&rules.zones) {
                assert!(*pick >= zone[0] && *pick <= zone[1]);
            }

            // ゾーンが互いに素なのでプールはちょうど6個 → 予測はその昇順
            let mut expected = prediction.zone_picks.clone();
            expected.sort();
            assert_eq!(prediction.predicted.to_vec(), expected);
        }
    }

    #[test]
    fn test_exclusion_disabled_leaves_excluded_empty() {
        let draws = make_test_draws(21);
        let mut rules = rules_off();
        rules.use_common_pairs = true;
        rules.common_pair_limit = 500;

        let mut rng = StdRng::seed_from_u64(3);
        let prediction = select_candidates(&draws, &rules, &mut rng).unwrap();
        assert!(prediction.excluded_hot.is_empty());
    }
}
