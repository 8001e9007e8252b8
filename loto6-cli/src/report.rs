use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use printpdf::{Mm, PdfDocument};

use loto6_data::models::Prediction;

use crate::display::format_numbers;

/// 予測結果をA4縦1ページのPDFに書き出す。日本語描画のため
/// 外部TTFフォント（IPAexゴシック等）を埋め込む。
pub fn render_report(prediction: &Prediction, font_path: &Path, output: &Path) -> Result<()> {
    let font_file = File::open(font_path)
        .with_context(|| format!("フォント {:?} を開けません", font_path))?;

    let (doc, page, layer) = PdfDocument::new("LOTO6予測レポート", Mm(210.0), Mm(297.0), "Layer 1");
    let font = doc
        .add_external_font(font_file)
        .context("フォントを登録できません")?;

    let current_layer = doc.get_page(page).get_layer(layer);

    let top = 280.0;
    let line_height = 10.0;

    current_layer.use_text("LOTO6予測レポート", 14.0, Mm(30.0), Mm(top), &font);

    let sections = [
        ("■ 予測数字", format_numbers(&prediction.predicted), 2.0),
        ("■ 前回の数字", format_numbers(&prediction.previous), 5.0),
        ("■ ゾーン分散", format_numbers(&prediction.zone_picks), 8.0),
        ("■ 除外（ホット数字）", format_numbers(&prediction.excluded_hot), 11.0),
    ];
    for (title, value, offset) in sections {
        current_layer.use_text(title, 12.0, Mm(30.0), Mm(top - line_height * offset), &font);
        current_layer.use_text(
            format!("→ {}", value),
            12.0,
            Mm(40.0),
            Mm(top - line_height * (offset + 1.0)),
            &font,
        );
    }

    let out_file = File::create(output)
        .with_context(|| format!("{:?} に書き込めません", output))?;
    doc.save(&mut BufWriter::new(out_file))
        .context("PDFの保存に失敗しました")?;

    Ok(())
}
