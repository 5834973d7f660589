//! ピクセル→ミリメートル換算の解決。
//!
//! 正面ビューの鼻〜足首の縦ピクセル距離と申告身長から換算係数を求める。
//! 身長未指定・必要ランドマーク欠損・距離ゼロのいずれでも係数1にフォールバックし、
//! 全体の計算を失敗させることはない。角度メトリクスはこの係数を参照しない。

use serde::{Deserialize, Serialize};

use crate::pose::{LandmarkIndex, LandmarkSet};

/// フォールバック時の換算係数（ピクセル単位のまま出力される）
pub const UNCALIBRATED_PX_TO_MM: f64 = 1.0;

/// キャリブレーションの由来
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationMethod {
    /// 申告身長と正面ビューから換算係数を算出できた
    UserProvided,
    /// 係数1のままピクセル単位
    Uncalibrated,
}

/// 出力ドキュメントに載せるキャリブレーション記録
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationRecord {
    pub user_height_cm: Option<f64>,
    pub method: CalibrationMethod,
}

/// 解決済みのキャリブレーション。mm系メトリクス全てがこの1つの係数を共有する
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationContext {
    pub px_to_mm: f64,
    pub user_height_cm: Option<f64>,
    pub method: CalibrationMethod,
}

impl CalibrationContext {
    /// 正面ビューと身長（cm）から換算係数を解決する
    ///
    /// 鼻と足首（右足首優先、なければ左足首）の y_px 差を身長ピクセルとみなす。
    /// 0以下の身長は無効入力としてフォールバック扱い。
    pub fn resolve(front: Option<&LandmarkSet>, user_height_cm: Option<f64>) -> Self {
        let height = user_height_cm.filter(|h| *h > 0.0);

        if let (Some(height_cm), Some(front)) = (height, front) {
            let nose = front.get(LandmarkIndex::Nose);
            let ankle = front
                .get(LandmarkIndex::RightAnkle)
                .or_else(|| front.get(LandmarkIndex::LeftAnkle));

            if let (Some(nose), Some(ankle)) = (nose, ankle) {
                let body_height_px = (nose.y_px - ankle.y_px).abs();
                if body_height_px > 0 {
                    return Self {
                        px_to_mm: height_cm * 10.0 / body_height_px as f64,
                        user_height_cm,
                        method: CalibrationMethod::UserProvided,
                    };
                }
            }
        }

        Self {
            px_to_mm: UNCALIBRATED_PX_TO_MM,
            user_height_cm,
            method: CalibrationMethod::Uncalibrated,
        }
    }

    pub fn record(&self) -> CalibrationRecord {
        CalibrationRecord {
            user_height_cm: self.user_height_cm,
            method: self.method,
        }
    }
}
