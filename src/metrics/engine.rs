//! メトリクスエンジン。
//!
//! キャリブレーションを一度だけ解決し、6規則を独立に評価して
//! 算出できたものだけをレポートにまとめる。規則間に依存はない。
//! 値の丸め（小数1桁）はこの境界で一度だけ行う。confidence は丸めない。

use crate::calibration::{CalibrationContext, CalibrationRecord};
use crate::pose::ViewSet;

use super::{rules, Metric, MetricName, MetricsReport};

/// 1回の解析の最終成果物
#[derive(Debug, Clone, PartialEq)]
pub struct PostureAnalysis {
    pub metrics: MetricsReport,
    pub calibration: CalibrationRecord,
}

/// 値を小数1桁に丸める（レポート境界専用）
fn round_value(metric: Metric) -> Metric {
    Metric {
        value: (metric.value * 10.0).round() / 10.0,
        ..metric
    }
}

/// 4ビューの検出結果と任意の身長からメトリクスレポートを算出する
///
/// 入力がどれだけ欠けていても失敗しない。欠けた分のメトリクスが
/// レポートから欠落するだけで、同一入力には常に同一の結果を返す。
pub fn evaluate(views: &ViewSet, user_height_cm: Option<f64>) -> PostureAnalysis {
    let cal = CalibrationContext::resolve(views.front.as_ref(), user_height_cm);

    let mut metrics = MetricsReport::new();
    let mut add = |name: MetricName, metric: Option<Metric>| {
        if let Some(metric) = metric {
            metrics.insert(name, round_value(metric));
        }
    };

    if let Some(right) = &views.right {
        add(
            MetricName::CraniovertebralAngle,
            rules::craniovertebral_angle(right),
        );
        add(
            MetricName::ForwardHeadPosture,
            rules::forward_head_posture(right, &cal),
        );
        add(MetricName::ThoracicKyphosis, rules::thoracic_kyphosis(right));
    }

    if let Some(front) = &views.front {
        add(
            MetricName::ShoulderHeightDelta,
            rules::shoulder_height_delta(front, &cal),
        );
        add(MetricName::KneeValgusVarus, rules::knee_valgus_varus(front));
        add(
            MetricName::FootProgressionAngle,
            rules::foot_progression_angle(front),
        );
    }

    PostureAnalysis {
        metrics,
        calibration: cal.record(),
    }
}
