use serde::{Deserialize, Serialize};

use super::LandmarkSet;

/// 撮影方向（同一被写体の4視点）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Front,
    Left,
    Right,
    Back,
}

impl View {
    pub const ALL: [View; 4] = [View::Front, View::Left, View::Right, View::Back];

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Front => "front",
            View::Left => "left",
            View::Right => "right",
            View::Back => "back",
        }
    }
}

/// 4ビュー分の検出結果
///
/// 各ビューは検出失敗・画像読込不可の場合 None。JSON では null になる。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewSet {
    pub front: Option<LandmarkSet>,
    pub left: Option<LandmarkSet>,
    pub right: Option<LandmarkSet>,
    pub back: Option<LandmarkSet>,
}

impl ViewSet {
    pub fn get(&self, view: View) -> Option<&LandmarkSet> {
        match view {
            View::Front => self.front.as_ref(),
            View::Left => self.left.as_ref(),
            View::Right => self.right.as_ref(),
            View::Back => self.back.as_ref(),
        }
    }

    pub fn set(&mut self, view: View, landmarks: Option<LandmarkSet>) {
        match view {
            View::Front => self.front = landmarks,
            View::Left => self.left = landmarks,
            View::Right => self.right = landmarks,
            View::Back => self.back = landmarks,
        }
    }

    /// 検出に成功したビュー数
    pub fn detected_count(&self) -> usize {
        View::ALL.iter().filter(|v| self.get(**v).is_some()).count()
    }
}
