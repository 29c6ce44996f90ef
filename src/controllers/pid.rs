// src/controllers/pid.rs

use crate::config::parameters::PidGains;
use crate::math::MathError;

/// PID制御器の状態
///
/// `prev_error` は初回呼び出しまで `None` であり、初回の微分項は0になる
/// （ステップ1での微分スパイクを避ける）。
#[derive(Debug, Clone, PartialEq)]
pub struct PidState {
    pub integral: f64,           // 積分項の累積値（Ki込み）
    pub prev_error: Option<f64>, // 前回の偏差
}

impl PidState {
    pub fn new() -> Self {
        Self {
            integral: 0.0,
            prev_error: None,
        }
    }
}

impl Default for PidState {
    fn default() -> Self {
        Self::new()
    }
}

/// PID制御の1ステップ
///
/// 積分項はアンチワインドアップ付きで累積する: 累積後の未飽和出力が
/// 偏差と同方向に飽和する場合、その累積は破棄され積分項は凍結される。
///
/// # 引数
/// - `state`: 現在の制御器状態
/// - `gains`: PIDゲイン
/// - `error`: 偏差（目標速度 − 現在速度、m/s）
/// - `dt`: 時間刻み（s）
///
/// # 戻り値
/// - 更新後の制御器状態
/// - 制御信号 [0, 1]
pub fn pid_step(
    state: PidState,
    gains: &PidGains,
    error: f64,
    dt: f64,
) -> Result<(PidState, f64), MathError> {
    if dt <= 0.0 {
        return Err(MathError::ZeroTimeStep);
    }

    let proportional = gains.kp * error;
    let derivative = match state.prev_error {
        Some(prev) => gains.kd * (error - prev) / dt,
        None => 0.0,
    };

    let candidate = state.integral + gains.ki * error * dt;
    let mut raw = proportional + candidate + derivative;

    // アンチワインドアップ: 出力が偏差方向に飽和しているなら累積しない
    let integral = if (raw > 1.0 && error > 0.0) || (raw < 0.0 && error < 0.0) {
        raw = proportional + state.integral + derivative;
        state.integral
    } else {
        candidate
    };

    let new_state = PidState {
        integral,
        prev_error: Some(error),
    };
    Ok((new_state, raw.clamp(0.0, 1.0)))
}
