// src/config/error.rs

use thiserror::Error;

use crate::math::MathError;

/// 静的な設定値の検査で検出されるエラー
///
/// シミュレーションループの開始前に検出され、ループ中には発生しない。
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("質量は正の値でなければなりません: {0} kg")]
    NonPositiveMass(f64),
    #[error("最大駆動力は正の値でなければなりません: {0} N")]
    NonPositiveTraction(f64),
    #[error("走行抵抗係数は負であってはなりません: {0}")]
    NegativeDragCoefficient(f64),
    #[error("時間刻み dt_s は正の有限値でなければなりません: {0} s")]
    NonPositiveTimeStep(f64),
    #[error("シミュレーション時間 duration_s は正の有限値でなければなりません: {0} s")]
    NonPositiveDuration(f64),
    #[error("目標速度 setpoint_kmh は正の有限値でなければなりません: {0} km/h")]
    NonPositiveSetpoint(f64),
    #[error("PIDゲインが有限値ではありません: kp={kp}, ki={ki}, kd={kd}")]
    NonFiniteGains { kp: f64, ki: f64, kd: f64 },
    #[error("数値計算エラー: {0}")]
    Math(#[from] MathError),
}
