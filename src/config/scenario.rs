// src/config/scenario.rs

use serde::Deserialize;

use crate::config::error::ConfigError;
use crate::config::parameters::PidGains;
use crate::math::MembershipShape;
use crate::models::vehicle::{VehicleParameters, VehicleVariant};

/// 制御器の選択
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ControllerSelection {
    Pid,
    Fuzzy,
    Both,
}

/// シミュレーションシナリオ
#[derive(Debug, Deserialize, Clone)]
pub struct Scenario {
    pub vehicle_variant: VehicleVariant,
    pub controller_selection: ControllerSelection,
    pub setpoint_kmh: f64, // 目標速度（km/h）
    pub duration_s: f64,   // シミュレーション時間（s）
    pub dt_s: f64,         // 時間刻み（s）
    #[serde(default)]
    pub pid_gains: PidGains,
    #[serde(default = "default_membership_shape")]
    pub membership_shape: MembershipShape,
}

fn default_membership_shape() -> MembershipShape {
    MembershipShape::Triangular
}

impl Scenario {
    /// ループ開始前の妥当性検査
    ///
    /// ここを通過したシナリオはループ中にエラーを発生させない。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.dt_s.is_finite() || self.dt_s <= 0.0 {
            return Err(ConfigError::NonPositiveTimeStep(self.dt_s));
        }
        if !self.duration_s.is_finite() || self.duration_s <= 0.0 {
            return Err(ConfigError::NonPositiveDuration(self.duration_s));
        }
        if !self.setpoint_kmh.is_finite() || self.setpoint_kmh <= 0.0 {
            return Err(ConfigError::NonPositiveSetpoint(self.setpoint_kmh));
        }
        // PIDゲインはPID系列が走る場合のみ参照される
        if self.controller_selection != ControllerSelection::Fuzzy {
            self.pid_gains.validate()?;
        }
        VehicleParameters::for_variant(self.vehicle_variant).validate()?;
        Ok(())
    }
}
