use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use encoding_rs::Encoding;

use crate::models::{Draw, validate_numbers};

pub const DATE_COLUMN: &str = "日付";
pub const NUMBER_COLUMNS: [&str; 6] = [
    "第1数字",
    "第2数字",
    "第3数字",
    "第4数字",
    "第5数字",
    "第6数字",
];

/// 履歴CSVを読み込む。先頭行 = 最新の抽選という並びを前提とする。
pub fn load_history(path: &Path, encoding_label: &str) -> Result<Vec<Draw>> {
    let bytes = fs::read(path).with_context(|| format!("{:?} を開けません", path))?;
    let text = decode(&bytes, encoding_label)?;
    parse_history(&text)
}

fn decode(bytes: &[u8], label: &str) -> Result<String> {
    let encoding = Encoding::for_label(label.as_bytes())
        .with_context(|| format!("不明なエンコーディング: '{}'", label))?;
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        bail!("エンコーディング '{}' でデコードできない文字があります", label);
    }
    Ok(text.into_owned())
}

pub fn parse_history(text: &str) -> Result<Vec<Draw>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers().context("ヘッダ行を読めません")?.clone();
    let date_idx = find_column(&headers, DATE_COLUMN)?;
    let mut number_idx = [0usize; 6];
    for (i, name) in NUMBER_COLUMNS.iter().enumerate() {
        number_idx[i] = find_column(&headers, name)?;
    }

    let mut draws = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let line = row + 2; // ヘッダが1行目
        let record = record.with_context(|| format!("{}行目を読めません", line))?;
        draws.push(parse_record(&record, date_idx, &number_idx, line)?);
    }

    if draws.is_empty() {
        bail!("履歴が空です。1件以上の抽選結果が必要です");
    }

    Ok(draws)
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .with_context(|| format!("必須列 '{}' が見つかりません", name))
}

fn parse_record(
    record: &csv::StringRecord,
    date_idx: usize,
    number_idx: &[usize; 6],
    line: usize,
) -> Result<Draw> {
    let date = record
        .get(date_idx)
        .with_context(|| format!("{}行目: 列が足りません", line))?
        .to_string();
    if date.is_empty() {
        bail!("{}行目: 日付が空です", line);
    }

    let mut numbers = [0u8; 6];
    for (i, &idx) in number_idx.iter().enumerate() {
        let s = record
            .get(idx)
            .with_context(|| format!("{}行目: 列が足りません", line))?;
        numbers[i] = s
            .parse::<u8>()
            .with_context(|| format!("{}行目: '{}' を数値として解釈できません", line, s))?;
    }
    validate_numbers(&numbers).with_context(|| format!("{}行目", line))?;

    Ok(Draw { date, numbers })
}
