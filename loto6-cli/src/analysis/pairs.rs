use std::collections::HashMap;

use loto6_data::models::Draw;

/// 各抽選の6数字から作れる全ペア（昇順に正規化）の出現回数。
pub fn count_pairs(draws: &[Draw]) -> HashMap<(u8, u8), u32> {
    let mut counts = HashMap::new();
    for draw in draws {
        let mut numbers = draw.numbers;
        numbers.sort();
        for i in 0..numbers.len() {
            for j in (i + 1)..numbers.len() {
                *counts.entry((numbers[i], numbers[j])).or_insert(0u32) += 1;
            }
        }
    }
    counts
}

/// 出現回数上位 limit 件のペア。同数ならペアの昇順で安定させる。
pub fn top_pairs(draws: &[Draw], limit: usize) -> Vec<(u8, u8)> {
    let counts = count_pairs(draws);
    let mut ranked: Vec<((u8, u8), u32)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.into_iter().take(limit).map(|(pair, _)| pair).collect()
}

/// ペア集合を構成数字の集合に展開する（重複除去、昇順）。
pub fn flatten_pairs(pairs: &[(u8, u8)]) -> Vec<u8> {
    let mut numbers: Vec<u8> = pairs.iter().flat_map(|&(a, b)| [a, b]).collect();
    numbers.sort();
    numbers.dedup();
    numbers
}
