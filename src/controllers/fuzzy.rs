// src/controllers/fuzzy.rs

use crate::math::membership::{fuzzify, membership, MembershipShape, Universe, LABEL_COUNT};

/// 言語ラベル（Negative-Big … Positive-Big）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    NegativeBig,
    NegativeSmall,
    Zero,
    PositiveSmall,
    PositiveBig,
}

impl Label {
    /// 論議領域内でのラベル位置
    pub fn index(self) -> usize {
        match self {
            Label::NegativeBig => 0,
            Label::NegativeSmall => 1,
            Label::Zero => 2,
            Label::PositiveSmall => 3,
            Label::PositiveBig => 4,
        }
    }
}

/// 偏差の論議領域（m/s）
pub const ERROR_UNIVERSE: Universe = Universe {
    min: -1.0,
    max: 1.0,
};

/// 偏差微分の論議領域（m/s²）
pub const DERIVATIVE_UNIVERSE: Universe = Universe {
    min: -5.0,
    max: 5.0,
};

/// 出力（制御信号）の論議領域
pub const OUTPUT_UNIVERSE: Universe = Universe { min: 0.0, max: 1.0 };

/// 重心計算に使う格子点数
///
/// 格子は出力領域の中点0.5に対して対称であり、中立出力が正確に0.5になる。
pub const CENTROID_GRID_POINTS: usize = 201;

/// どのルールも発火しない場合の中立出力
pub const NEUTRAL_OUTPUT: f64 = 0.5;

/// ファジィルールベース（行: 偏差ラベル, 列: 偏差微分ラベル）
///
/// 5×5の全組み合わせに出力ラベルを割り当てた対角優位のテーブル。
/// 構築時に一度だけ定義され、呼び出しごとの解釈は行わない。
#[derive(Debug, Clone, PartialEq)]
pub struct RuleBase {
    table: [[Label; LABEL_COUNT]; LABEL_COUNT],
}

impl RuleBase {
    /// 標準ルールテーブル
    ///
    /// 大きな正の偏差と非負の微分は強い正の出力へ、の対角構造。
    pub fn standard() -> Self {
        use Label::{NegativeBig as NB, NegativeSmall as NS, PositiveBig as PB,
                    PositiveSmall as PS, Zero as Z};
        Self {
            table: [
                [NB, NB, NB, NS, Z],
                [NB, NB, NS, Z, PS],
                [NB, NS, Z, PS, PB],
                [NS, Z, PS, PB, PB],
                [Z, PS, PB, PB, PB],
            ],
        }
    }

    /// 前件ラベル対に対する出力ラベル
    pub fn output_label(&self, error_index: usize, derivative_index: usize) -> Label {
        self.table[error_index][derivative_index]
    }
}

impl Default for RuleBase {
    fn default() -> Self {
        Self::standard()
    }
}

/// Mamdani推論による制御の1ステップ（ステートレス）
///
/// ファジィ化 → min-AND推論 → max集約 → 重心法デファジィ化の
/// パイプラインを実行する。
///
/// # 引数
/// - `rules`: ルールベース
/// - `shape`: メンバーシップ関数の形状
/// - `error`: 偏差（m/s）
/// - `derror`: 偏差の微分（m/s²）
///
/// # 戻り値
/// - 制御信号 [0, 1]
pub fn fuzzy_step(rules: &RuleBase, shape: MembershipShape, error: f64, derror: f64) -> f64 {
    let error_degrees = fuzzify(shape, ERROR_UNIVERSE, error);
    let derivative_degrees = fuzzify(shape, DERIVATIVE_UNIVERSE, derror);

    // 推論: 各ルールの発火強度はmin、同一出力ラベルへの集約はmax
    let mut strengths = [0.0_f64; LABEL_COUNT];
    for (error_index, error_degree) in error_degrees.iter().enumerate() {
        for (derivative_index, derivative_degree) in derivative_degrees.iter().enumerate() {
            let firing = error_degree.min(*derivative_degree);
            if firing <= 0.0 {
                continue;
            }
            let output_index = rules.output_label(error_index, derivative_index).index();
            if firing > strengths[output_index] {
                strengths[output_index] = firing;
            }
        }
    }

    defuzzify(&strengths, shape)
}

/// 重心法（COG）によるデファジィ化
///
/// 出力メンバーシップ関数を発火強度で切り取った和集合を固定格子上で
/// 評価し、重み付き平均を取る。総帰属度がゼロの場合は中立出力へ
/// フォールバックする（設計上の縮退ケースであり、エラーではない）。
fn defuzzify(strengths: &[f64; LABEL_COUNT], shape: MembershipShape) -> f64 {
    let step = OUTPUT_UNIVERSE.step();
    let span = OUTPUT_UNIVERSE.max - OUTPUT_UNIVERSE.min;
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for grid_index in 0..CENTROID_GRID_POINTS {
        let x = OUTPUT_UNIVERSE.min
            + span * grid_index as f64 / (CENTROID_GRID_POINTS - 1) as f64;
        let mut degree: f64 = 0.0;
        for (label_index, strength) in strengths.iter().enumerate() {
            let clipped =
                membership(shape, x, OUTPUT_UNIVERSE.center(label_index), step).min(*strength);
            if clipped > degree {
                degree = clipped;
            }
        }
        numerator += degree * x;
        denominator += degree;
    }
    if denominator <= f64::EPSILON {
        return NEUTRAL_OUTPUT;
    }
    (numerator / denominator).clamp(0.0, 1.0)
}
