// src/simulation/mod.rs

pub mod csv;
pub mod framework;
pub mod load_parameters;

/// 1系列が使う制御器の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerKind {
    Pid,
    Fuzzy,
}

impl ControllerKind {
    /// CSVヘッダー等で使う系列名
    pub fn label(&self) -> &'static str {
        match self {
            ControllerKind::Pid => "pid",
            ControllerKind::Fuzzy => "fuzzy",
        }
    }
}

/// 1つの制御器系列の時系列
#[derive(Debug, Clone, PartialEq)]
pub struct BranchSeries {
    pub controller: ControllerKind,
    pub speed_kmh: Vec<f64>, // 測定速度（km/h）
    pub control: Vec<f64>,   // 制御信号 [0, 1]
}

/// シミュレーション結果
///
/// 全系列は同一の時刻・目標速度列で同期しており、系列ごとの
/// 速度・制御信号は独立したプラント状態から得られる。
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub time: Vec<f64>,         // 時刻（s）
    pub setpoint_kmh: Vec<f64>, // 目標速度（km/h）
    pub branches: Vec<BranchSeries>,
}
