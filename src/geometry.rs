//! 平面幾何カーネル。距離と三角形の頂点角のみ。
//! 現行メトリクスは奥行き z を使わないため、すべて xy 平面で計算する。

/// xy 平面上の点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 2点間のユークリッド距離
pub fn distance(p: Point, q: Point) -> f64 {
    let dx = q.x - p.x;
    let dy = q.y - p.y;
    (dx * dx + dy * dy).sqrt()
}

/// 2点の中点
pub fn midpoint(p: Point, q: Point) -> Point {
    Point::new((p.x + q.x) / 2.0, (p.y + q.y) / 2.0)
}

/// p2 を頂点とする角 p1-p2-p3 を度で返す（余弦定理）
///
/// 辺長が0になる退化形（2点が一致）は None。
/// 浮動小数の丸めで cos が [-1, 1] をはみ出すことがあるためクランプする。
/// 戻り値は [0, 180] の範囲。
pub fn triangle_angle(p1: Point, p2: Point, p3: Point) -> Option<f64> {
    let a = distance(p1, p2);
    let b = distance(p2, p3);
    let c = distance(p1, p3);

    if a * b == 0.0 {
        return None;
    }

    let cos_angle = (a * a + b * b - c * c) / (2.0 * a * b);
    Some(cos_angle.clamp(-1.0, 1.0).acos().to_degrees())
}
