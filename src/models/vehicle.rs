// src/models/vehicle.rs

use serde::Deserialize;

use crate::config::error::ConfigError;

/// 重力加速度（m/s²）
pub const GRAVITY: f64 = 9.81;

/// m/s から km/h への換算係数
pub const KMH_PER_MS: f64 = 3.6;

/// 車両の変種
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VehicleVariant {
    FastHighPower, // 大出力・低抵抗（スポーツカー相当）
    LightAgile,    // 軽量・高機動（二輪車相当）
    HeavyHighDrag, // 大質量・高抵抗（大型トラック相当）
}

/// 車両パラメータ
///
/// 変種ごとの固定テーブルから生成され、シミュレーション中は不変。
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleParameters {
    pub mass: f64,               // 質量（kg）
    pub max_traction_force: f64, // 最大駆動力（N）
    pub drag_linear: f64,        // 速度に比例する抵抗係数（N·s/m）
    pub drag_quadratic: f64,     // 速度の2乗に比例する抵抗係数（N·s²/m²）
    pub rolling_resistance: f64, // 転がり抵抗係数（無次元）
}

impl VehicleParameters {
    /// 変種ごとの固定パラメータテーブル
    pub fn for_variant(variant: VehicleVariant) -> Self {
        match variant {
            VehicleVariant::FastHighPower => Self {
                mass: 1400.0,
                max_traction_force: 8000.0,
                drag_linear: 15.0,
                drag_quadratic: 0.9,
                rolling_resistance: 0.010,
            },
            VehicleVariant::LightAgile => Self {
                mass: 300.0,
                max_traction_force: 2500.0,
                drag_linear: 8.0,
                drag_quadratic: 0.5,
                rolling_resistance: 0.012,
            },
            VehicleVariant::HeavyHighDrag => Self {
                mass: 15000.0,
                max_traction_force: 12000.0,
                drag_linear: 200.0,
                drag_quadratic: 4.0,
                rolling_resistance: 0.012,
            },
        }
    }

    /// パラメータの妥当性検査
    ///
    /// 非物理的な値（質量ゼロ以下など）は設定エラーとして弾く。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.mass > 0.0) {
            return Err(ConfigError::NonPositiveMass(self.mass));
        }
        if !(self.max_traction_force > 0.0) {
            return Err(ConfigError::NonPositiveTraction(self.max_traction_force));
        }
        for coefficient in [self.drag_linear, self.drag_quadratic, self.rolling_resistance] {
            if !(coefficient >= 0.0) {
                return Err(ConfigError::NegativeDragCoefficient(coefficient));
            }
        }
        Ok(())
    }
}

/// プラント状態（速度 m/s）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlantState {
    pub speed: f64,
}

impl PlantState {
    /// 停止状態
    pub fn at_rest() -> Self {
        Self { speed: 0.0 }
    }

    /// km/h 単位の速度（表示境界用）
    pub fn speed_kmh(&self) -> f64 {
        self.speed * KMH_PER_MS
    }
}

/// 走行抵抗力を計算する純粋関数
///
/// 転がり抵抗は停止中には働かない。抵抗力は速度に対し単調増加。
///
/// # 引数
/// - `speed`: 現在速度（m/s）
/// - `params`: 車両パラメータ
///
/// # 戻り値
/// - 走行抵抗力（N）
pub fn calculate_drag_force(speed: f64, params: &VehicleParameters) -> f64 {
    let mut force = params.drag_linear * speed + params.drag_quadratic * speed * speed;
    if speed > 0.0 {
        force += params.rolling_resistance * params.mass * GRAVITY;
    }
    force
}

/// 駆動力を計算する純粋関数
///
/// # 引数
/// - `control_signal`: 正規化制御信号 [0, 1]
/// - `params`: 車両パラメータ
///
/// # 戻り値
/// - 駆動力（N）
pub fn calculate_traction_force(control_signal: f64, params: &VehicleParameters) -> f64 {
    control_signal.clamp(0.0, 1.0) * params.max_traction_force
}

/// プラントを1ステップ前進させる純粋関数
///
/// `m·dv/dt = F_traction(u) − F_drag(v)` をオイラー法で積分する。
/// 強い抵抗で速度が負になる場合は物理境界として0に丸める。
///
/// # 引数
/// - `state`: 現在のプラント状態
/// - `control_signal`: 正規化制御信号 [0, 1]
/// - `dt`: 時間刻み（s）
/// - `params`: 車両パラメータ
///
/// # 戻り値
/// - 更新後のプラント状態
pub fn advance(
    state: PlantState,
    control_signal: f64,
    dt: f64,
    params: &VehicleParameters,
) -> PlantState {
    let traction = calculate_traction_force(control_signal, params);
    let drag = calculate_drag_force(state.speed, params);
    let acceleration = (traction - drag) / params.mass;
    PlantState {
        speed: (state.speed + acceleration * dt).max(0.0),
    }
}
