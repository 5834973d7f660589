use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisConfig {
    /// 解析結果の保存先ディレクトリ
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// 被写体の身長（cm）。CLI引数が優先される
    #[serde(default)]
    pub user_height_cm: Option<f64>,
    /// JSONを整形して出力するか
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
}

fn default_output_dir() -> String {
    "output".to_string()
}
fn default_pretty_json() -> bool {
    true
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            user_height_cm: None,
            pretty_json: default_pretty_json(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// 設定ファイルがなければデフォルトを使う
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_default()
    }
}
