// src/simulation/csv.rs

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;

use crate::simulation::SimulationResult;

/// CSV出力の設定とヘッダーの書き込み
pub fn setup_csv_output(
    path: &str,
    result: &SimulationResult,
) -> Result<Box<dyn Write>, Box<dyn Error>> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let output_file = File::create(path)?;
    let mut writer = BufWriter::new(output_file);
    write_csv_header(&mut writer, result)?;
    Ok(Box::new(writer))
}

/// CSVヘッダーの書き込み
pub fn write_csv_header<W: Write>(
    writer: &mut W,
    result: &SimulationResult,
) -> Result<(), std::io::Error> {
    let mut header = String::from("time(s),setpoint(km/h),");

    // 系列ごとのヘッダー
    for series in &result.branches {
        header.push_str(&format!(
            "{0}_speed(km/h),{0}_control,",
            series.controller.label()
        ));
    }

    header.push('\n');
    writer.write_all(header.as_bytes())?;
    Ok(())
}

/// CSV行の作成
pub fn create_csv_row(result: &SimulationResult, index: usize) -> String {
    let mut row = format!("{},{},", result.time[index], result.setpoint_kmh[index]);

    // 系列ごとの速度と制御信号
    for series in &result.branches {
        row.push_str(&format!(
            "{},{},",
            series.speed_kmh[index], series.control[index]
        ));
    }

    row.push('\n');
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{BranchSeries, ControllerKind};

    fn result() -> SimulationResult {
        SimulationResult {
            time: vec![0.0, 0.1],
            setpoint_kmh: vec![100.0, 100.0],
            branches: vec![
                BranchSeries {
                    controller: ControllerKind::Pid,
                    speed_kmh: vec![0.0, 2.0],
                    control: vec![1.0, 1.0],
                },
                BranchSeries {
                    controller: ControllerKind::Fuzzy,
                    speed_kmh: vec![0.0, 1.5],
                    control: vec![0.9, 0.9],
                },
            ],
        }
    }

    #[test]
    fn test_header_lists_each_branch() {
        let mut buffer = Vec::new();
        write_csv_header(&mut buffer, &result()).unwrap();
        let header = String::from_utf8(buffer).unwrap();
        assert_eq!(
            header,
            "time(s),setpoint(km/h),pid_speed(km/h),pid_control,fuzzy_speed(km/h),fuzzy_control,\n"
        );
    }

    #[test]
    fn test_row_contains_all_series_values() {
        let row = create_csv_row(&result(), 1);
        assert_eq!(row, "0.1,100,2,1,1.5,0.9,\n");
    }
}
