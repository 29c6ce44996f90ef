// src/config/parameters.rs

use serde::Deserialize;

use crate::config::error::ConfigError;

/// PIDゲイン（単位は m/s 基準）
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct PidGains {
    pub kp: f64, // 比例ゲイン
    pub ki: f64, // 積分ゲイン
    pub kd: f64, // 微分ゲイン
}

impl Default for PidGains {
    fn default() -> Self {
        Self {
            kp: 0.5,
            ki: 0.1,
            kd: 0.05,
        }
    }
}

impl PidGains {
    /// ゲインの妥当性検査
    ///
    /// # 戻り値
    /// - 全ゲインが有限値であれば `Ok(())`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.kp.is_finite() && self.ki.is_finite() && self.kd.is_finite()) {
            return Err(ConfigError::NonFiniteGains {
                kp: self.kp,
                ki: self.ki,
                kd: self.kd,
            });
        }
        Ok(())
    }
}
