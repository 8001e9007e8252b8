pub mod pairs;
pub mod selector;

use loto6_data::models::{Draw, NUMBER_MAX, NumberStats};

pub const POOL_SIZE: usize = NUMBER_MAX as usize;

/// 全履歴に対する数字ごとの出現回数。index 0 = 数字1。
pub fn count_frequencies(draws: &[Draw]) -> Vec<u32> {
    let mut freq = vec![0u32; POOL_SIZE];
    for draw in draws {
        for &n in &draw.numbers {
            let idx = (n - 1) as usize;
            if idx < freq.len() {
                freq[idx] += 1;
            }
        }
    }
    freq
}

/// 出現回数上位 count 個（ホット数字）。同数なら小さい数字を優先。
/// 一度も出ていない数字はホットにならない。
pub fn hot_numbers(freq: &[u32], count: usize) -> Vec<u8> {
    let mut ranked: Vec<(u8, u32)> = freq
        .iter()
        .enumerate()
        .filter(|(_, &f)| f > 0)
        .map(|(i, &f)| ((i + 1) as u8, f))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.into_iter().take(count).map(|(n, _)| n).collect()
}

pub fn compute_stats(draws: &[Draw]) -> Vec<NumberStats> {
    let mut stats: Vec<NumberStats> = (1..=NUMBER_MAX)
        .map(|n| NumberStats {
            number: n,
            frequency: 0,
            gap: 0,
        })
        .collect();

    for (i, draw) in draws.iter().enumerate() {
        for &n in &draw.numbers {
            let idx = (n - 1) as usize;
            if idx < stats.len() {
                stats[idx].frequency += 1;
                if stats[idx].gap == 0 {
                    stats[idx].gap = i as u32;
                }
            }
        }
    }

    for stat in &mut stats {
        if stat.frequency == 0 {
            stat.gap = draws.len() as u32;
        }
    }

    stats
}

#[cfg(test)]
pub fn make_test_draws(n: usize) -> Vec<Draw> {
    (0..n)
        .map(|i| {
            let base = (i % 7) as u8;
            Draw {
                date: format!("2024/01/{:02}", (i % 28) + 1),
                numbers: [
                    base * 6 + 1,
                    base * 6 + 2,
                    base * 6 + 3,
                    base * 6 + 4,
                    base * 6 + 5,
                    base * 6 + 6,
                ],
            }
        })
        .collect()
}
