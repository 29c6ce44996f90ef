// src/math/membership.rs

use serde::Deserialize;

/// 言語ラベル数（NB, NS, Z, PS, PB）
pub const LABEL_COUNT: usize = 5;

/// メンバーシップ関数の形状
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MembershipShape {
    Triangular,
    Trapezoidal,
}

/// ファジィ変数の論議領域
///
/// 5つの言語ラベルを等間隔に配置する。隣接ラベルのみが重なり、
/// 非隣接ラベルが同時に活性化することはない。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Universe {
    pub min: f64,
    pub max: f64,
}

impl Universe {
    /// ラベル中心の間隔
    pub fn step(&self) -> f64 {
        (self.max - self.min) / (LABEL_COUNT - 1) as f64
    }

    /// index番目のラベル中心
    pub fn center(&self, index: usize) -> f64 {
        self.min + index as f64 * self.step()
    }

    /// クリスプ値を論議領域内に収める
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }
}

/// 三角形メンバーシップ関数
///
/// # 引数
/// - `x`: クリスプ値
/// - `center`: ラベル中心
/// - `step`: ラベル中心の間隔
///
/// # 戻り値
/// - 帰属度 [0, 1]
pub fn triangular_membership(x: f64, center: f64, step: f64) -> f64 {
    (1.0 - (x - center).abs() / step).max(0.0)
}

/// 台形メンバーシップ関数（平坦部の幅は間隔の30%）
///
/// # 引数
/// - `x`: クリスプ値
/// - `center`: ラベル中心
/// - `step`: ラベル中心の間隔
///
/// # 戻り値
/// - 帰属度 [0, 1]
pub fn trapezoidal_membership(x: f64, center: f64, step: f64) -> f64 {
    let top = 0.3 * step;
    let a = center - step;
    let b = center - top;
    let c = center + top;
    let d = center + step;
    if x <= a || x >= d {
        0.0
    } else if x >= b && x <= c {
        1.0
    } else if x < b {
        (x - a) / (b - a)
    } else {
        (d - x) / (d - c)
    }
}

/// 形状に応じたメンバーシップ関数の評価
pub fn membership(shape: MembershipShape, x: f64, center: f64, step: f64) -> f64 {
    match shape {
        MembershipShape::Triangular => triangular_membership(x, center, step),
        MembershipShape::Trapezoidal => trapezoidal_membership(x, center, step),
    }
}

/// クリスプ値を5ラベルへファジィ化する
///
/// 論議領域の外側の値は境界に丸めてから評価するため、端のラベルは
/// 領域外で帰属度1を維持する。
///
/// # 引数
/// - `shape`: メンバーシップ関数の形状
/// - `universe`: 対象変数の論議領域
/// - `x`: クリスプ値
///
/// # 戻り値
/// - ラベルごとの帰属度（NB, NS, Z, PS, PB の順）
pub fn fuzzify(shape: MembershipShape, universe: Universe, x: f64) -> [f64; LABEL_COUNT] {
    let clamped = universe.clamp(x);
    let step = universe.step();
    let mut degrees = [0.0; LABEL_COUNT];
    for (index, degree) in degrees.iter_mut().enumerate() {
        *degree = membership(shape, clamped, universe.center(index), step);
    }
    degrees
}
