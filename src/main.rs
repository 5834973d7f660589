use anyhow::{bail, Result};
use std::path::Path;

use shisei::config::Config;
use shisei::metrics::evaluate;
use shisei::pose::{LandmarkSet, View, ViewSet};
use shisei::report::AnalysisDocument;

const CONFIG_PATH: &str = "config.toml";

/// 検出器の出力ファイルを1ビュー分読み込む
///
/// ファイルの中身は LandmarkSet のJSON、または検出失敗を表す null。
/// 読込不可・パース不可は警告してビュー欠落として扱う（致命エラーにしない）。
fn load_view(view: View, path: &str) -> Option<LandmarkSet> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Warning: [{}] {} を読み込めません: {}", view.as_str(), path, e);
            return None;
        }
    };
    match serde_json::from_str::<Option<LandmarkSet>>(&content) {
        Ok(landmarks) => landmarks,
        Err(e) => {
            eprintln!("Warning: [{}] {} のパースに失敗: {}", view.as_str(), path, e);
            None
        }
    }
}

struct Args {
    view_paths: [String; 4],
    height_cm: Option<f64>,
    output_dir: Option<String>,
}

/// Usage: shisei <front> <left> <right> <back> [height_cm] [output_dir]
///
/// 第5引数は数値なら身長、そうでなければ保存先ディレクトリと解釈する
fn parse_args() -> Result<Args> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 5 {
        bail!("Usage: shisei <front.json> <left.json> <right.json> <back.json> [height_cm] [output_dir]");
    }

    let view_paths = [
        args[1].clone(),
        args[2].clone(),
        args[3].clone(),
        args[4].clone(),
    ];

    let mut height_cm = None;
    let mut output_dir = None;
    if let Some(fifth) = args.get(5) {
        match fifth.parse::<f64>() {
            Ok(h) => {
                height_cm = Some(h);
                output_dir = args.get(6).cloned();
            }
            Err(_) => {
                // 数値でなければ保存先パス
                output_dir = Some(fifth.clone());
            }
        }
    }

    Ok(Args {
        view_paths,
        height_cm,
        output_dir,
    })
}

fn main() -> Result<()> {
    let args = parse_args()?;
    let config = Config::load_or_default(CONFIG_PATH);

    println!("=== Shisei 姿勢メトリクス解析 ({}) ===", env!("GIT_VERSION"));

    let mut views = ViewSet::default();
    let view_order = [View::Front, View::Left, View::Right, View::Back];
    for (view, path) in view_order.iter().zip(args.view_paths.iter()) {
        views.set(*view, load_view(*view, path));
    }
    println!("検出ビュー: {}/4", views.detected_count());

    // CLI引数の身長が設定ファイルより優先
    let height_cm = args.height_cm.or(config.analysis.user_height_cm);
    match height_cm {
        Some(h) => println!("身長: {} cm", h),
        None => println!("身長: 未指定（ピクセル単位で出力）"),
    }

    let analysis = evaluate(&views, height_cm);
    println!("算出メトリクス: {}/6", analysis.metrics.len());

    let doc = AnalysisDocument {
        landmarks: &views,
        metrics: &analysis.metrics,
        calibration: &analysis.calibration,
    };
    println!("{}", doc.to_json(config.analysis.pretty_json)?);

    // 保存先はCLI引数優先、なければ設定ファイルの値。どちらもなければ標準出力のみ
    let output_dir = args.output_dir.or_else(|| {
        Path::new(CONFIG_PATH)
            .exists()
            .then(|| config.analysis.output_dir.clone())
    });
    if let Some(dir) = output_dir {
        let path = doc.save(&dir, config.analysis.pretty_json)?;
        println!("解析結果を保存: {}", path.display());
    }

    Ok(())
}
