//! 合并流程模块
//!
//! 串联工具检查、片段扫描、解码累加和导出四个阶段。

use super::cli::AppConfig;
use super::merger::{self, MergeSummary};
use super::run_log::RunLog;
use super::{exporter, scanner};
use crate::audio::{AudioCodec, ToolPaths};
use crate::error::MergeResult;
use std::path::PathBuf;

/// 一次完整运行的结果
#[derive(Debug, Clone)]
pub struct RunReport {
    /// 写出的合并文件
    pub output: PathBuf,
    /// 解码累加阶段统计
    pub summary: MergeSummary,
}

/// 解析并验证FFmpeg
pub fn check_tools(config: &AppConfig, log: &RunLog) -> MergeResult<ToolPaths> {
    let tools = ToolPaths::resolve(config.ffmpeg_path.as_deref())?;
    let version = tools.verify()?;
    log.info(format!("FFmpeg可用 / ffmpeg available: {version}"));

    if config.verbose {
        match tools.located_converter() {
            Some(path) => println!("   ffmpeg:  {}", path.display()),
            None => println!("   ffmpeg:  {}", tools.converter.display()),
        }
        println!("   ffprobe: {}", tools.probe.display());
    }

    Ok(tools)
}

/// 扫描、解码累加并导出目录中的片段
pub fn process_directory(
    config: &AppConfig,
    codec: &dyn AudioCodec,
    log: &RunLog,
) -> MergeResult<RunReport> {
    let fragments = scanner::scan_fragments(&config.input_dir)?;
    scanner::show_scan_results(config, &fragments);

    let summary = merger::merge_fragments(
        &fragments,
        codec,
        &config.source_format,
        log,
        config.verbose,
    );
    merger::show_merge_summary(&summary);

    // 全部失败时仍然导出（空音频），只给出警告
    if summary.all_failed() {
        log.warn("所有片段均解码失败，仍将导出空音频 / All fragments failed to decode; exporting empty audio");
    }

    let output = exporter::export_merged(&summary.audio, &config.input_dir, codec, log)?;
    exporter::report_output_duration(&output, codec, log);

    Ok(RunReport { output, summary })
}
