// src/main.rs

use std::error::Error;
use std::io::Write;

use simulation::csv::*;
use simulation::framework::*;
use simulation::load_parameters::*;

mod config;
mod controllers;
mod math;
mod models;
mod simulation;

fn main() -> Result<(), Box<dyn Error>> {
    // シナリオの読み込み
    let scenario = load_scenario("config/scenario.yaml")?;

    // シミュレーションの実行（固定ステップループ）
    let result = run_simulation(&scenario)?;

    // CSV出力の設定
    let mut writer: Box<dyn Write> = setup_csv_output("output/simulation_results.csv", &result)?;

    // CSV行の作成と書き込み
    for index in 0..result.time.len() {
        let row = create_csv_row(&result, index);
        writer.write_all(row.as_bytes())?;
    }

    Ok(())
}
