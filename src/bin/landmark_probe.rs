use anyhow::{bail, Result};

use shisei::metrics::VISIBILITY_THRESHOLD;
use shisei::pose::{LandmarkIndex, LandmarkSet};

/// 検出器出力ファイルの中身を確認するツール
///
/// Usage: landmark_probe <landmarks.json> [...]
fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        bail!("Usage: landmark_probe <landmarks.json> [...]");
    }

    for path in &args[1..] {
        println!("=== {} ===", path);
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("  読込エラー: {}", e);
                continue;
            }
        };
        let set: Option<LandmarkSet> = match serde_json::from_str(&content) {
            Ok(set) => set,
            Err(e) => {
                eprintln!("  パースエラー: {}", e);
                continue;
            }
        };

        let Some(set) = set else {
            println!("  検出なし (null)");
            continue;
        };

        println!("  ランドマーク数: {}/{}", set.len(), LandmarkIndex::COUNT);
        println!("  平均信頼度: {:.3}", set.average_visibility());
        println!(
            "  閾値{}超え: {}",
            VISIBILITY_THRESHOLD,
            set.count_visible(VISIBILITY_THRESHOLD)
        );

        // 未知のインデックスは検出モデルの語彙と合っていない可能性がある
        let unknown: Vec<u8> = set
            .iter()
            .filter(|(i, _)| LandmarkIndex::from_index(*i).is_none())
            .map(|(i, _)| i)
            .collect();
        if !unknown.is_empty() {
            println!("  未知のインデックス: {:?}", unknown);
        }
    }

    Ok(())
}
