use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::models::{NUMBER_MAX, NUMBER_MIN};

/// ヒューリスティックの有効/無効と各パラメータ。起動時に一度だけ読み込む。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    #[serde(default)]
    pub use_previous_numbers: bool,
    #[serde(default = "default_previous_number_count")]
    pub previous_number_count: usize,

    #[serde(default)]
    pub use_common_pairs: bool,
    #[serde(default = "default_common_pair_limit")]
    pub common_pair_limit: usize,

    #[serde(default)]
    pub use_zone_distribution: bool,
    #[serde(default)]
    pub zones: Vec<[u8; 2]>,

    #[serde(default)]
    pub exclude_hot_numbers: bool,
    #[serde(default = "default_hot_count")]
    pub hot_count: usize,
}

fn default_previous_number_count() -> usize {
    2
}

fn default_common_pair_limit() -> usize {
    20
}

fn default_hot_count() -> usize {
    3
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            use_previous_numbers: true,
            previous_number_count: 2,
            use_common_pairs: true,
            common_pair_limit: 20,
            use_zone_distribution: true,
            zones: vec![[1, 10], [11, 20], [21, 30], [31, 43]],
            exclude_hot_numbers: true,
            hot_count: 3,
        }
    }
}

pub fn load_rules(path: &Path) -> Result<RuleConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("ルール設定 {:?} を読めません", path))?;
    let rules: RuleConfig = serde_json::from_str(&text)
        .with_context(|| format!("ルール設定 {:?} の形式が不正です", path))?;
    validate_rules(&rules)?;
    Ok(rules)
}

pub fn validate_rules(rules: &RuleConfig) -> Result<()> {
    for zone in &rules.zones {
        let [low, high] = *zone;
        if low < NUMBER_MIN || high > NUMBER_MAX || low > high {
            bail!(
                "ゾーン [{}, {}] が不正です（{}-{} の範囲で low <= high）",
                low,
                high,
                NUMBER_MIN,
                NUMBER_MAX
            );
        }
    }
    Ok(())
}
