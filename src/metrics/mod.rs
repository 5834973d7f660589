pub mod engine;
pub mod rules;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use engine::{evaluate, PostureAnalysis};

/// ランドマーク採用の信頼度閾値。これ以下のランドマークを使う規則は棄却される
pub const VISIBILITY_THRESHOLD: f64 = 0.5;

/// 胸椎後弯の信頼度ペナルティ。
/// 本来の脊椎中点ランドマークの代わりに肩・腰の合成中点を使う近似のため、
/// 経験的な係数 0.7 を掛ける（臨床的な検証値ではない）
pub const KYPHOSIS_MIDPOINT_PENALTY: f64 = 0.7;

/// メトリクス名（出力JSONのキー）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricName {
    CraniovertebralAngle,
    ForwardHeadPosture,
    ShoulderHeightDelta,
    ThoracicKyphosis,
    KneeValgusVarus,
    FootProgressionAngle,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::CraniovertebralAngle => "craniovertebral_angle",
            MetricName::ForwardHeadPosture => "forward_head_posture",
            MetricName::ShoulderHeightDelta => "shoulder_height_delta",
            MetricName::ThoracicKyphosis => "thoracic_kyphosis",
            MetricName::KneeValgusVarus => "knee_valgus_varus",
            MetricName::FootProgressionAngle => "foot_progression_angle",
        }
    }
}

/// メトリクスの単位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Degrees,
    Mm,
}

/// 算出済みメトリクス
///
/// confidence は使用したランドマークの visibility から導出する（独自推定はしない）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub value: f64,
    pub unit: Unit,
    pub confidence: f64,
}

/// メトリクス名 → 値のマップ。算出できなかったメトリクスはキーごと存在しない
pub type MetricsReport = BTreeMap<MetricName, Metric>;
