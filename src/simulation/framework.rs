// src/simulation/framework.rs

use crate::config::error::ConfigError;
use crate::config::parameters::PidGains;
use crate::config::scenario::{ControllerSelection, Scenario};
use crate::controllers::fuzzy::{fuzzy_step, RuleBase};
use crate::controllers::pid::{pid_step, PidState};
use crate::math::{MathError, MembershipShape};
use crate::models::vehicle::{self, PlantState, VehicleParameters, KMH_PER_MS};
use crate::simulation::{BranchSeries, ControllerKind, SimulationResult};

/// 1系列分の内部状態
///
/// 系列ごとに独立したプラント状態と制御器状態を持つ。「両方」選択時も
/// 系列間で状態を共有しないため、公平な比較になる。
#[derive(Debug, Clone)]
struct Branch {
    kind: ControllerKind,
    plant: PlantState,
    pid: PidState,
    prev_error: Option<f64>, // 偏差微分の推定用（ファジィ系列）
}

impl Branch {
    fn new(kind: ControllerKind) -> Self {
        Self {
            kind,
            plant: PlantState::at_rest(),
            pid: PidState::new(),
            prev_error: None,
        }
    }
}

/// 選択に対応する系列の種別
fn selected_kinds(selection: ControllerSelection) -> Vec<ControllerKind> {
    match selection {
        ControllerSelection::Pid => vec![ControllerKind::Pid],
        ControllerSelection::Fuzzy => vec![ControllerKind::Fuzzy],
        ControllerSelection::Both => vec![ControllerKind::Pid, ControllerKind::Fuzzy],
    }
}

/// 1系列の1ステップ実行
///
/// 現在速度に対する制御信号を計算し、プラントを前進させる。
///
/// # 引数
/// - `branch`: 系列の内部状態（更新される）
/// - `setpoint`: 目標速度（m/s）
/// - `dt`: 時間刻み（s）
/// - `gains`: PIDゲイン
/// - `rules`: ファジィルールベース
/// - `shape`: メンバーシップ関数の形状
/// - `params`: 車両パラメータ
///
/// # 戻り値
/// - 記録用の（ステップ開始時の速度 km/h, 制御信号）
fn execute_branch_step(
    branch: &mut Branch,
    setpoint: f64,
    dt: f64,
    gains: &PidGains,
    rules: &RuleBase,
    shape: MembershipShape,
    params: &VehicleParameters,
) -> Result<(f64, f64), MathError> {
    let speed_kmh = branch.plant.speed_kmh();
    let error = setpoint - branch.plant.speed;

    let control = match branch.kind {
        ControllerKind::Pid => {
            let (next, control) = pid_step(branch.pid.clone(), gains, error, dt)?;
            branch.pid = next;
            control
        }
        ControllerKind::Fuzzy => {
            let derror = match branch.prev_error {
                Some(prev) => (error - prev) / dt,
                None => 0.0,
            };
            fuzzy_step(rules, shape, error, derror)
        }
    };

    branch.prev_error = Some(error);
    branch.plant = vehicle::advance(branch.plant, control, dt, params);
    Ok((speed_kmh, control))
}

/// シミュレーションの実行
///
/// 設定を検証してから固定ステップループを回し、同期した時系列を返す。
/// 検証を通過したシナリオではループ中のエラーは発生しない。
///
/// # 引数
/// - `scenario`: シミュレーションシナリオ
///
/// # 戻り値
/// - 時刻・目標速度・系列ごとの速度と制御信号の時系列
pub fn run_simulation(scenario: &Scenario) -> Result<SimulationResult, ConfigError> {
    scenario.validate()?;

    let params = VehicleParameters::for_variant(scenario.vehicle_variant);
    let rules = RuleBase::standard();
    let setpoint = scenario.setpoint_kmh / KMH_PER_MS;
    let steps = (scenario.duration_s / scenario.dt_s).floor() as usize;

    let mut branches: Vec<Branch> = selected_kinds(scenario.controller_selection)
        .into_iter()
        .map(Branch::new)
        .collect();

    let mut result = SimulationResult {
        time: Vec::with_capacity(steps + 1),
        setpoint_kmh: Vec::with_capacity(steps + 1),
        branches: branches
            .iter()
            .map(|branch| BranchSeries {
                controller: branch.kind,
                speed_kmh: Vec::with_capacity(steps + 1),
                control: Vec::with_capacity(steps + 1),
            })
            .collect(),
    };

    for step in 0..=steps {
        result.time.push(step as f64 * scenario.dt_s);
        result.setpoint_kmh.push(scenario.setpoint_kmh);
        for (branch, series) in branches.iter_mut().zip(result.branches.iter_mut()) {
            let (speed_kmh, control) = execute_branch_step(
                branch,
                setpoint,
                scenario.dt_s,
                &scenario.pid_gains,
                &rules,
                scenario.membership_shape,
                &params,
            )?;
            series.speed_kmh.push(speed_kmh);
            series.control.push(control);
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::VehicleVariant;

    fn scenario(
        variant: VehicleVariant,
        selection: ControllerSelection,
        setpoint_kmh: f64,
        duration_s: f64,
    ) -> Scenario {
        Scenario {
            vehicle_variant: variant,
            controller_selection: selection,
            setpoint_kmh,
            duration_s,
            dt_s: 0.1,
            pid_gains: PidGains::default(),
            membership_shape: MembershipShape::Triangular,
        }
    }

    fn branch<'a>(result: &'a SimulationResult, kind: ControllerKind) -> &'a BranchSeries {
        result
            .branches
            .iter()
            .find(|series| series.controller == kind)
            .unwrap()
    }

    #[test]
    fn test_invalid_scenario_is_rejected_before_the_loop() {
        let mut s = scenario(VehicleVariant::FastHighPower, ControllerSelection::Pid, 100.0, 30.0);
        s.dt_s = -0.1;
        assert!(matches!(
            run_simulation(&s),
            Err(ConfigError::NonPositiveTimeStep(_))
        ));
    }

    #[test]
    fn test_step_count_and_series_lengths() {
        let mut s = scenario(VehicleVariant::LightAgile, ControllerSelection::Both, 50.0, 2.0);
        s.dt_s = 0.5;
        let result = run_simulation(&s).unwrap();
        assert_eq!(result.time.len(), 5); // 0.0, 0.5, 1.0, 1.5, 2.0
        assert_eq!(result.time[4], 2.0);
        assert_eq!(result.setpoint_kmh.len(), 5);
        assert_eq!(result.branches.len(), 2);
        for series in &result.branches {
            assert_eq!(series.speed_kmh.len(), 5);
            assert_eq!(series.control.len(), 5);
        }
    }

    /// 全ステップで制御信号は[0,1]、速度は非負
    #[test]
    fn test_bounds_hold_at_every_step() {
        for variant in [
            VehicleVariant::FastHighPower,
            VehicleVariant::LightAgile,
            VehicleVariant::HeavyHighDrag,
        ] {
            let s = scenario(variant, ControllerSelection::Both, 90.0, 20.0);
            let result = run_simulation(&s).unwrap();
            for series in &result.branches {
                for &control in &series.control {
                    assert!((0.0..=1.0).contains(&control));
                }
                for &speed in &series.speed_kmh {
                    assert!(speed >= 0.0);
                }
            }
        }
    }

    /// シナリオA: 大出力車・PID・100 km/h・30秒で±2 km/hに収束、
    /// オーバーシュートは110 km/h以下
    #[test]
    fn test_scenario_fast_vehicle_pid_converges() {
        let s = scenario(VehicleVariant::FastHighPower, ControllerSelection::Pid, 100.0, 30.0);
        let result = run_simulation(&s).unwrap();
        let series = branch(&result, ControllerKind::Pid);
        let final_speed = *series.speed_kmh.last().unwrap();
        assert!((final_speed - 100.0).abs() <= 2.0, "final = {final_speed}");
        let peak = series.speed_kmh.iter().cloned().fold(0.0, f64::max);
        assert!(peak <= 110.0, "peak = {peak}");
    }

    /// シナリオB: 大型車・ファジィ・60 km/h・60秒で単調増加のまま
    /// ±3 km/hに到達
    #[test]
    fn test_scenario_heavy_vehicle_fuzzy_is_monotonic() {
        let s = scenario(VehicleVariant::HeavyHighDrag, ControllerSelection::Fuzzy, 60.0, 60.0);
        let result = run_simulation(&s).unwrap();
        let series = branch(&result, ControllerKind::Fuzzy);
        for window in series.speed_kmh.windows(2) {
            assert!(window[1] >= window[0] - 1e-9);
        }
        let final_speed = *series.speed_kmh.last().unwrap();
        assert!((final_speed - 60.0).abs() <= 3.0, "final = {final_speed}");
    }

    /// シナリオC: 軽量車・両制御器・80 km/h・20秒。時刻と目標速度は
    /// 共有され、速度・制御信号の系列は異なり、両者とも収束する
    #[test]
    fn test_scenario_both_controllers_run_independently() {
        let s = scenario(VehicleVariant::LightAgile, ControllerSelection::Both, 80.0, 20.0);
        let result = run_simulation(&s).unwrap();
        let pid = branch(&result, ControllerKind::Pid);
        let fuzzy = branch(&result, ControllerKind::Fuzzy);
        assert_ne!(pid.speed_kmh, fuzzy.speed_kmh);
        assert_ne!(pid.control, fuzzy.control);
        let pid_final = *pid.speed_kmh.last().unwrap();
        let fuzzy_final = *fuzzy.speed_kmh.last().unwrap();
        assert!((pid_final - 80.0).abs() <= 2.0, "pid final = {pid_final}");
        // ステートレスなファジィ制御器は小さな定常偏差を残す
        assert!((fuzzy_final - 80.0).abs() <= 4.0, "fuzzy final = {fuzzy_final}");
    }

    /// 同一シナリオの2回実行はビット単位で一致する
    #[test]
    fn test_runs_are_deterministic() {
        let s = scenario(VehicleVariant::HeavyHighDrag, ControllerSelection::Both, 70.0, 15.0);
        let first = run_simulation(&s).unwrap();
        let second = run_simulation(&s).unwrap();
        assert_eq!(first, second);
    }

    /// 台形メンバーシップでもシナリオBの性質は保たれる
    #[test]
    fn test_trapezoidal_shape_also_converges() {
        let mut s = scenario(VehicleVariant::HeavyHighDrag, ControllerSelection::Fuzzy, 60.0, 60.0);
        s.membership_shape = MembershipShape::Trapezoidal;
        let result = run_simulation(&s).unwrap();
        let series = branch(&result, ControllerKind::Fuzzy);
        let final_speed = *series.speed_kmh.last().unwrap();
        assert!((final_speed - 60.0).abs() <= 3.0, "final = {final_speed}");
    }
}
