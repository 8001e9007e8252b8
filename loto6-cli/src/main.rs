mod analysis;
mod display;
mod report;

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;

use loto6_data::loader::load_history;
use loto6_data::rules::load_rules;

use crate::analysis::compute_stats;
use crate::analysis::selector::select_candidates;
use crate::display::{display_draws, display_prediction, display_rules, display_stats};

#[derive(Parser)]
#[command(name = "loto6", about = "LOTO6 ヒューリスティック予測ツール")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 次回の6数字を予測する
    Predict {
        /// 抽選履歴CSVファイル
        #[arg(short, long)]
        file: PathBuf,

        /// CSVの文字エンコーディング
        #[arg(short, long, default_value = "shift_jis")]
        encoding: String,

        /// ルール設定ファイル
        #[arg(short, long, default_value = "rules.json")]
        rules: PathBuf,

        /// 再現用のシード
        #[arg(long)]
        seed: Option<u64>,

        /// PDFレポートの出力先
        #[arg(long)]
        report: Option<PathBuf>,

        /// レポート用フォント（TTF）
        #[arg(long, default_value = "fonts/ipaexg.ttf")]
        font: PathBuf,
    },

    /// 抽選履歴を一覧する
    History {
        /// 抽選履歴CSVファイル
        #[arg(short, long)]
        file: PathBuf,

        /// CSVの文字エンコーディング
        #[arg(short, long, default_value = "shift_jis")]
        encoding: String,

        /// 表示する件数
        #[arg(short, long, default_value = "10")]
        last: usize,
    },

    /// 数字ごとの出現回数と間隔を表示する
    Stats {
        /// 抽選履歴CSVファイル
        #[arg(short, long)]
        file: PathBuf,

        /// CSVの文字エンコーディング
        #[arg(short, long, default_value = "shift_jis")]
        encoding: String,

        /// 集計対象とする直近の件数
        #[arg(short, long, default_value = "100")]
        window: usize,
    },

    /// 有効なルール設定を表示する
    Rules {
        /// ルール設定ファイル
        #[arg(short, long, default_value = "rules.json")]
        rules: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Predict {
            file,
            encoding,
            rules,
            seed,
            report,
            font,
        } => cmd_predict(&file, &encoding, &rules, seed, report.as_deref(), &font),
        Command::History {
            file,
            encoding,
            last,
        } => cmd_history(&file, &encoding, last),
        Command::Stats {
            file,
            encoding,
            window,
        } => cmd_stats(&file, &encoding, window),
        Command::Rules { rules } => cmd_rules(&rules),
    }
}

fn cmd_predict(
    file: &Path,
    encoding: &str,
    rules_path: &Path,
    seed: Option<u64>,
    report_path: Option<&Path>,
    font: &Path,
) -> Result<()> {
    let rules = load_rules(rules_path)?;

    // レポートを出す場合はフォントの有無を計算前に確認する
    if report_path.is_some() && !font.exists() {
        bail!(
            "フォント {:?} が見つかりません。IPAexゴシック等のTTFを配置してください",
            font
        );
    }

    let draws = load_history(file, encoding)?;

    let mut rng: StdRng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let prediction = select_candidates(&draws, &rules, &mut rng)?;
    display_prediction(&prediction);

    if let Some(output) = report_path {
        report::render_report(&prediction, font, output)?;
        println!("\n📄 レポートを書き出しました: {}", output.display());
    }

    Ok(())
}

fn cmd_history(file: &Path, encoding: &str, last: usize) -> Result<()> {
    let draws = load_history(file, encoding)?;
    let shown = draws.len().min(last);
    display_draws(&draws[..shown]);
    Ok(())
}

fn cmd_stats(file: &Path, encoding: &str, window: usize) -> Result<()> {
    let draws = load_history(file, encoding)?;
    let effective = window.min(draws.len());
    let stats = compute_stats(&draws[..effective]);
    display_stats(&stats, effective);
    Ok(())
}

fn cmd_rules(path: &Path) -> Result<()> {
    let rules = load_rules(path)?;
    display_rules(&rules);
    Ok(())
}
