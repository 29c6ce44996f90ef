// src/math/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MathError {
    #[error("時間刻み dt がゼロ以下です（微分が定義できません）。")]
    ZeroTimeStep,
    // 他の数値計算エラーを追加可能
}
