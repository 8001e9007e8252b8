use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};

use loto6_data::models::{Draw, NumberStats, Prediction};
use loto6_data::rules::RuleConfig;

pub fn format_numbers(numbers: &[u8]) -> String {
    if numbers.is_empty() {
        return "—".to_string();
    }
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

pub fn display_draws(draws: &[Draw]) {
    if draws.is_empty() {
        println!("表示する抽選結果がありません。");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["日付", "本数字"]);

    for draw in draws {
        let mut sorted = draw.numbers;
        sorted.sort();
        table.add_row(vec![&draw.date, &format_numbers(&sorted)]);
    }

    println!("{table}");
}

pub fn display_prediction(prediction: &Prediction) {
    println!("\n🎯 予測結果\n");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["項目", "数字"]);

    table.add_row(vec![
        Cell::new("予測数字"),
        Cell::new(format_numbers(&prediction.predicted)).fg(Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("前回の数字"),
        Cell::new(format_numbers(&prediction.previous)),
    ]);
    table.add_row(vec![
        Cell::new("ゾーン分散"),
        Cell::new(format_numbers(&prediction.zone_picks)),
    ]);
    table.add_row(vec![
        Cell::new("除外（ホット数字）"),
        Cell::new(format_numbers(&prediction.excluded_hot)).fg(Color::Red),
    ]);

    println!("{table}");
}

pub fn display_stats(stats: &[NumberStats], window: usize) {
    println!("\n📊 直近{}回の統計\n", window);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["数字", "出現回数", "間隔"]);

    let mut sorted = stats.to_vec();
    sorted.sort_by(|a, b| b.frequency.cmp(&a.frequency));

    for stat in &sorted {
        table.add_row(vec![
            &format!("{:2}", stat.number),
            &stat.frequency.to_string(),
            &stat.gap.to_string(),
        ]);
    }
    println!("{table}");
}

pub fn display_rules(rules: &RuleConfig) {
    println!("\n⚙️ 有効なルール設定\n");

    let on_off = |enabled: bool| if enabled { "有効" } else { "無効" };
    let zones = rules
        .zones
        .iter()
        .map(|z| format!("{}-{}", z[0], z[1]))
        .collect::<Vec<_>>()
        .join(", ");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["項目", "設定値"]);

    table.add_row(vec![
        "前回数字の引き継ぎ".to_string(),
        format!("{}（{}個）", on_off(rules.use_previous_numbers), rules.previous_number_count),
    ]);
    table.add_row(vec![
        "頻出ペア".to_string(),
        format!("{}（上位{}件）", on_off(rules.use_common_pairs), rules.common_pair_limit),
    ]);
    table.add_row(vec![
        "ゾーン分散".to_string(),
        format!(
            "{}（{}）",
            on_off(rules.use_zone_distribution),
            if zones.is_empty() { "ゾーンなし".to_string() } else { zones }
        ),
    ]);
    table.add_row(vec![
        "ホット数字の除外".to_string(),
        format!("{}（上位{}個）", on_off(rules.exclude_hot_numbers), rules.hot_count),
    ]);

    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_numbers() {
        assert_eq!(format_numbers(&[1, 12, 43]), " 1 - 12 - 43");
    }

    #[test]
    fn test_format_numbers_empty() {
        assert_eq!(format_numbers(&[]), "—");
    }
}
