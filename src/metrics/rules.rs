//! 6つのメトリクス規則。
//!
//! 各規則は必要ビューのランドマーク集合（とmm系ならキャリブレーション）から
//! `Option<Metric>` を返す純関数。必要ランドマークの欠損・信頼度不足・
//! 幾何の退化はすべて None（＝レポートからの欠落）であり、エラーではない。
//! 値の丸めはここでは行わず、エンジン境界で一度だけ行う。

use crate::calibration::CalibrationContext;
use crate::geometry::{midpoint, triangle_angle};
use crate::pose::{Landmark, LandmarkIndex, LandmarkSet};

use super::{Metric, Unit, KYPHOSIS_MIDPOINT_PENALTY, VISIBILITY_THRESHOLD};

/// 信頼度ゲート: 閾値を超えるランドマークだけを通す
fn gated(set: &LandmarkSet, index: LandmarkIndex) -> Option<&Landmark> {
    set.get(index).filter(|lm| lm.is_visible(VISIBILITY_THRESHOLD))
}

/// 頭蓋椎骨角（CVA）: 右側面の耳-肩線の水平からの傾き
///
/// 90 - |atan2(dy, dx)| （正規化座標）。前方頭位の標準的な写真計測指標
pub fn craniovertebral_angle(right: &LandmarkSet) -> Option<Metric> {
    let ear = gated(right, LandmarkIndex::RightEar)?;
    let shoulder = gated(right, LandmarkIndex::RightShoulder)?;

    let dx = ear.x - shoulder.x;
    let dy = ear.y - shoulder.y;
    let angle = dy.atan2(dx).to_degrees();

    Some(Metric {
        value: 90.0 - angle.abs(),
        unit: Unit::Degrees,
        confidence: ear.visibility.min(shoulder.visibility),
    })
}

/// 前方頭位（FHP）: 右側面での耳-肩の水平ピクセル距離をmm換算
pub fn forward_head_posture(right: &LandmarkSet, cal: &CalibrationContext) -> Option<Metric> {
    let ear = gated(right, LandmarkIndex::RightEar)?;
    let shoulder = gated(right, LandmarkIndex::RightShoulder)?;

    let offset_px = (ear.x_px - shoulder.x_px).abs();

    Some(Metric {
        value: offset_px as f64 * cal.px_to_mm,
        unit: Unit::Mm,
        confidence: ear.visibility.min(shoulder.visibility),
    })
}

/// 肩の高さ差: 正面の左右肩の縦ピクセル差をmm換算
pub fn shoulder_height_delta(front: &LandmarkSet, cal: &CalibrationContext) -> Option<Metric> {
    let left = gated(front, LandmarkIndex::LeftShoulder)?;
    let right = gated(front, LandmarkIndex::RightShoulder)?;

    let delta_px = (left.y_px - right.y_px).abs();

    Some(Metric {
        value: delta_px as f64 * cal.px_to_mm,
        unit: Unit::Mm,
        confidence: left.visibility.min(right.visibility),
    })
}

/// 胸椎後弯（簡易）: 右側面の肩-腰線の中点を背中の代理点として
/// 肩-中点-腰の内角の180度からの不足分を取る。直線なら0
pub fn thoracic_kyphosis(right: &LandmarkSet) -> Option<Metric> {
    let shoulder = gated(right, LandmarkIndex::RightShoulder)?;
    let hip = gated(right, LandmarkIndex::RightHip)?;

    let mid_back = midpoint(shoulder.point(), hip.point());
    let angle = triangle_angle(shoulder.point(), mid_back, hip.point())?;

    Some(Metric {
        value: 180.0 - angle,
        unit: Unit::Degrees,
        confidence: shoulder.visibility.min(hip.visibility) * KYPHOSIS_MIDPOINT_PENALTY,
    })
}

/// 膝の内反/外反: 正面の左脚（腰-膝-足首）の直線からの偏差。まっすぐなら0
pub fn knee_valgus_varus(front: &LandmarkSet) -> Option<Metric> {
    let hip = gated(front, LandmarkIndex::LeftHip)?;
    let knee = gated(front, LandmarkIndex::LeftKnee)?;
    let ankle = gated(front, LandmarkIndex::LeftAnkle)?;

    let angle = triangle_angle(hip.point(), knee.point(), ankle.point())?;

    Some(Metric {
        value: 180.0 - angle,
        unit: Unit::Degrees,
        confidence: hip
            .visibility
            .min(knee.visibility)
            .min(ankle.visibility),
    })
}

/// 足の進行角: 正面の左かかと→左つま先線の前後軸からの角度
pub fn foot_progression_angle(front: &LandmarkSet) -> Option<Metric> {
    let heel = gated(front, LandmarkIndex::LeftHeel)?;
    let toe = gated(front, LandmarkIndex::LeftFootIndex)?;

    let dx = toe.x - heel.x;
    let dy = toe.y - heel.y;
    let angle = dx.atan2(dy).to_degrees();

    Some(Metric {
        value: angle.abs(),
        unit: Unit::Degrees,
        confidence: heel.visibility.min(toe.visibility),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::CalibrationMethod;

    /// 1000x1000画像相当のランドマーク。浮動小数の切り捨て揺れを避けるため
    /// ピクセル座標は四捨五入で与える
    fn lm(x: f64, y: f64, visibility: f64) -> Landmark {
        Landmark {
            x,
            y,
            z: 0.0,
            visibility,
            x_px: (x * 1000.0).round() as i32,
            y_px: (y * 1000.0).round() as i32,
        }
    }

    fn uncalibrated() -> CalibrationContext {
        CalibrationContext {
            px_to_mm: 1.0,
            user_height_cm: None,
            method: CalibrationMethod::Uncalibrated,
        }
    }

    fn set(pairs: &[(LandmarkIndex, Landmark)]) -> LandmarkSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_cva_example() {
        // 耳(0.40, 0.30)、肩(0.42, 0.50) → atan2(-0.20, -0.02) ≈ -95.7度 → CVA ≈ -5.7
        let right = set(&[
            (LandmarkIndex::RightEar, lm(0.40, 0.30, 0.9)),
            (LandmarkIndex::RightShoulder, lm(0.42, 0.50, 0.8)),
        ]);
        let metric = craniovertebral_angle(&right).unwrap();
        assert!((metric.value - (-5.71)).abs() < 0.01);
        assert_eq!(metric.unit, Unit::Degrees);
        assert!((metric.confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_cva_gate_rejects_low_visibility() {
        // 閾値ちょうど(0.5)も棄却
        let right = set(&[
            (LandmarkIndex::RightEar, lm(0.40, 0.30, 0.5)),
            (LandmarkIndex::RightShoulder, lm(0.42, 0.50, 0.9)),
        ]);
        assert!(craniovertebral_angle(&right).is_none());
        assert!(forward_head_posture(&right, &uncalibrated()).is_none());
    }

    #[test]
    fn test_cva_missing_joint() {
        let right = set(&[(LandmarkIndex::RightEar, lm(0.40, 0.30, 0.9))]);
        assert!(craniovertebral_angle(&right).is_none());
    }

    #[test]
    fn test_fhp_uses_pixel_offset_and_scale() {
        // 耳x=400px、肩x=350px → 50px * 1.7 = 85mm
        let right = set(&[
            (LandmarkIndex::RightEar, lm(0.40, 0.30, 0.9)),
            (LandmarkIndex::RightShoulder, lm(0.35, 0.50, 0.7)),
        ]);
        let cal = CalibrationContext {
            px_to_mm: 1.7,
            user_height_cm: Some(170.0),
            method: CalibrationMethod::UserProvided,
        };
        let metric = forward_head_posture(&right, &cal).unwrap();
        assert!((metric.value - 85.0).abs() < 1e-9);
        assert_eq!(metric.unit, Unit::Mm);
        assert!((metric.confidence - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_shoulder_delta_example() {
        // 左肩y=200px、右肩y=215px、px_to_mm=1.7 → 15 * 1.7 = 25.5mm
        let front = set(&[
            (LandmarkIndex::LeftShoulder, lm(0.40, 0.200, 0.9)),
            (LandmarkIndex::RightShoulder, lm(0.60, 0.215, 0.85)),
        ]);
        let cal = CalibrationContext {
            px_to_mm: 1.7,
            user_height_cm: Some(170.0),
            method: CalibrationMethod::UserProvided,
        };
        let metric = shoulder_height_delta(&front, &cal).unwrap();
        assert!((metric.value - 25.5).abs() < 1e-9);
        assert!((metric.confidence - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_kyphosis_straight_back_is_zero() {
        // 肩-腰が一直線 → 中点での内角180度 → 後弯0度
        let right = set(&[
            (LandmarkIndex::RightShoulder, lm(0.45, 0.30, 0.9)),
            (LandmarkIndex::RightHip, lm(0.45, 0.60, 0.8)),
        ]);
        let metric = thoracic_kyphosis(&right).unwrap();
        assert!(metric.value.abs() < 1e-6);
        // ペナルティ: min(0.9, 0.8) * 0.7
        assert!((metric.confidence - 0.8 * 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_kyphosis_degenerate_coincident_joints() {
        // 肩と腰が同一点 → 退化 → メトリクス欠落
        let right = set(&[
            (LandmarkIndex::RightShoulder, lm(0.45, 0.40, 0.9)),
            (LandmarkIndex::RightHip, lm(0.45, 0.40, 0.9)),
        ]);
        assert!(thoracic_kyphosis(&right).is_none());
    }

    #[test]
    fn test_knee_straight_leg_is_zero() {
        let front = set(&[
            (LandmarkIndex::LeftHip, lm(0.55, 0.50, 0.9)),
            (LandmarkIndex::LeftKnee, lm(0.55, 0.70, 0.8)),
            (LandmarkIndex::LeftAnkle, lm(0.55, 0.90, 0.7)),
        ]);
        let metric = knee_valgus_varus(&front).unwrap();
        assert!(metric.value.abs() < 1e-6);
    }

    #[test]
    fn test_knee_confidence_is_exact_min() {
        let front = set(&[
            (LandmarkIndex::LeftHip, lm(0.55, 0.50, 0.92)),
            (LandmarkIndex::LeftKnee, lm(0.57, 0.70, 0.64)),
            (LandmarkIndex::LeftAnkle, lm(0.55, 0.90, 0.81)),
        ]);
        let metric = knee_valgus_varus(&front).unwrap();
        assert_eq!(metric.confidence, 0.64);
    }

    #[test]
    fn test_knee_deviation_angle() {
        // 膝が外側に偏位した脚: 頂点の内角 < 180 → 偏差 > 0
        let front = set(&[
            (LandmarkIndex::LeftHip, lm(0.55, 0.50, 0.9)),
            (LandmarkIndex::LeftKnee, lm(0.60, 0.70, 0.9)),
            (LandmarkIndex::LeftAnkle, lm(0.55, 0.90, 0.9)),
        ]);
        let metric = knee_valgus_varus(&front).unwrap();
        assert!(metric.value > 1.0);
        assert!(metric.value < 90.0);
    }

    #[test]
    fn test_foot_progression_angle() {
        // かかと(0.50, 0.80)、つま先(0.55, 0.90) → |atan2(0.05, 0.10)| ≈ 26.57度
        let front = set(&[
            (LandmarkIndex::LeftHeel, lm(0.50, 0.80, 0.9)),
            (LandmarkIndex::LeftFootIndex, lm(0.55, 0.90, 0.8)),
        ]);
        let metric = foot_progression_angle(&front).unwrap();
        assert!((metric.value - 26.565).abs() < 0.01);
        assert_eq!(metric.unit, Unit::Degrees);
    }

    #[test]
    fn test_foot_progression_missing_toe() {
        let front = set(&[(LandmarkIndex::LeftHeel, lm(0.50, 0.80, 0.9))]);
        assert!(foot_progression_angle(&front).is_none());
    }
}
