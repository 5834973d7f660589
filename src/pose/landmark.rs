use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// MediaPipe Pose の 33 ランドマークインデックス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum LandmarkIndex {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl LandmarkIndex {
    pub const COUNT: usize = 33;

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Nose),
            1 => Some(Self::LeftEyeInner),
            2 => Some(Self::LeftEye),
            3 => Some(Self::LeftEyeOuter),
            4 => Some(Self::RightEyeInner),
            5 => Some(Self::RightEye),
            6 => Some(Self::RightEyeOuter),
            7 => Some(Self::LeftEar),
            8 => Some(Self::RightEar),
            9 => Some(Self::MouthLeft),
            10 => Some(Self::MouthRight),
            11 => Some(Self::LeftShoulder),
            12 => Some(Self::RightShoulder),
            13 => Some(Self::LeftElbow),
            14 => Some(Self::RightElbow),
            15 => Some(Self::LeftWrist),
            16 => Some(Self::RightWrist),
            17 => Some(Self::LeftPinky),
            18 => Some(Self::RightPinky),
            19 => Some(Self::LeftIndex),
            20 => Some(Self::RightIndex),
            21 => Some(Self::LeftThumb),
            22 => Some(Self::RightThumb),
            23 => Some(Self::LeftHip),
            24 => Some(Self::RightHip),
            25 => Some(Self::LeftKnee),
            26 => Some(Self::RightKnee),
            27 => Some(Self::LeftAnkle),
            28 => Some(Self::RightAnkle),
            29 => Some(Self::LeftHeel),
            30 => Some(Self::RightHeel),
            31 => Some(Self::LeftFootIndex),
            32 => Some(Self::RightFootIndex),
            _ => None,
        }
    }
}

/// 単一ランドマーク
///
/// x, y は画像サイズで正規化された座標 (0.0〜1.0)、z は奥行きの相対値。
/// x_px, y_px は検出時の画像サイズで変換したピクセル座標。
/// 画像サイズ自体は保持しないため、ピクセル空間の表現は x_px / y_px のみ。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// 検出信頼度 (0.0〜1.0)
    pub visibility: f64,
    pub x_px: i32,
    pub y_px: i32,
}

impl Landmark {
    /// 正規化座標と画像サイズからランドマークを構築
    /// ピクセル座標は切り捨て: x_px = trunc(x * width)
    pub fn from_normalized(x: f64, y: f64, z: f64, visibility: f64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            z,
            visibility,
            x_px: (x * width as f64) as i32,
            y_px: (y * height as f64) as i32,
        }
    }

    /// 信頼度が閾値を超えているか（閾値ちょうどは不可）
    pub fn is_visible(&self, threshold: f64) -> bool {
        self.visibility > threshold
    }

    /// 正規化座標の平面上の点
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// 1ビュー分のランドマーク集合（インデックス → ランドマーク）
///
/// 検出失敗はこの型の不在 (`Option::None`) で表す。空のマップと混同しない。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    landmarks: BTreeMap<u8, Landmark>,
}

impl LandmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: LandmarkIndex, landmark: Landmark) {
        self.landmarks.insert(index as u8, landmark);
    }

    pub fn get(&self, index: LandmarkIndex) -> Option<&Landmark> {
        self.landmarks.get(&(index as u8))
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Landmark)> {
        self.landmarks.iter().map(|(&i, lm)| (i, lm))
    }

    /// 全ランドマークの平均信頼度。空なら 0。
    pub fn average_visibility(&self) -> f64 {
        if self.landmarks.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.landmarks.values().map(|lm| lm.visibility).sum();
        sum / self.landmarks.len() as f64
    }

    /// 閾値を超えるランドマーク数
    pub fn count_visible(&self, threshold: f64) -> usize {
        self.landmarks
            .values()
            .filter(|lm| lm.is_visible(threshold))
            .count()
    }
}

impl FromIterator<(LandmarkIndex, Landmark)> for LandmarkSet {
    fn from_iter<T: IntoIterator<Item = (LandmarkIndex, Landmark)>>(iter: T) -> Self {
        let mut set = Self::new();
        for (index, landmark) in iter {
            set.insert(index, landmark);
        }
        set
    }
}
