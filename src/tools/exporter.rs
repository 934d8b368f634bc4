//! 导出模块
//!
//! 把累加结果编码为固定输出格式，写入输入目录中唯一命名的新文件。

use super::constants::{formats, naming};
use super::run_log::RunLog;
use super::utils;
use crate::audio::{AudioBuffer, AudioCodec};
use crate::error::MergeResult;
use chrono::{DateTime, TimeZone};
use std::path::{Path, PathBuf};

/// 由时间戳和随机后缀组成输出文件路径
pub fn output_path_for<Tz: TimeZone>(dir: &Path, time: &DateTime<Tz>, suffix: &str) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    dir.join(utils::timestamped_file_name(
        naming::OUTPUT_PREFIX,
        time,
        suffix,
        formats::OUTPUT_FORMAT,
    ))
}

/// 生成输出文件路径（时间戳取导出时刻）
///
/// 候选文件已存在时重新生成随机后缀，保证不覆盖之前运行的结果。
pub fn generate_output_path(dir: &Path) -> PathBuf {
    let now = chrono::Local::now();
    let mut candidate = output_path_for(dir, &now, &utils::random_suffix());
    for _ in 1..naming::MAX_NAME_ATTEMPTS {
        if !candidate.exists() {
            break;
        }
        candidate = output_path_for(dir, &now, &utils::random_suffix());
    }
    candidate
}

/// 导出合并结果，返回写出的文件路径
pub fn export_merged(
    audio: &AudioBuffer,
    dir: &Path,
    codec: &dyn AudioCodec,
    log: &RunLog,
) -> MergeResult<PathBuf> {
    let output = generate_output_path(dir);
    codec.encode(audio, formats::OUTPUT_FORMAT, &output)?;
    log.info(format!(
        "合并音频已导出 / Merged audio exported to: {}",
        output.display()
    ));
    Ok(output)
}

/// 探测并报告输出文件时长，探测失败只记为警告
pub fn report_output_duration(output: &Path, codec: &dyn AudioCodec, log: &RunLog) {
    match codec.probe_duration(output) {
        Ok(Some(duration)) => log.info(format!(
            "输出时长 / Output duration: {duration:.2} s"
        )),
        Ok(None) => {}
        Err(e) => log.warn(format!(
            "无法探测输出时长 / Could not probe output duration: {e}"
        )),
    }
}
