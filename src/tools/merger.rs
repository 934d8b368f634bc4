//! 解码与累加模块
//!
//! 按枚举顺序逐个解码片段并追加到内存累加器。单个片段失败只记录并跳过，
//! 不重试，也不影响已追加的内容。

use super::run_log::RunLog;
use super::utils;
use crate::audio::{AudioBuffer, AudioCodec};
use crate::error::MergeResult;
use std::path::{Path, PathBuf};

/// 解码失败的片段
#[derive(Debug, Clone, PartialEq)]
pub struct FailedFragment {
    pub name: String,
    pub reason: String,
}

/// 解码累加阶段的结果
#[derive(Debug, Clone)]
pub struct MergeSummary {
    /// 扫描到的片段总数
    pub total: usize,
    /// 成功合并的片段（按拼接顺序）
    pub merged: Vec<String>,
    /// 失败的片段（按处理顺序）
    pub failed: Vec<FailedFragment>,
    /// 累加后的音频
    pub audio: AudioBuffer,
}

impl MergeSummary {
    /// 所有片段均解码失败
    pub fn all_failed(&self) -> bool {
        self.merged.is_empty()
    }

    /// 成功率（百分比）
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.merged.len() as f64 / self.total as f64 * 100.0
        }
    }
}

/// 解码单个片段并追加到累加器
///
/// 任何错误都发生在修改累加器之前。
fn decode_into(
    accumulator: &mut AudioBuffer,
    codec: &dyn AudioCodec,
    path: &Path,
    source_format: &str,
) -> MergeResult<f64> {
    let decoded = codec.decode(path, source_format)?;
    accumulator.append(&decoded)?;
    Ok(decoded.duration_seconds())
}

/// 逐个解码片段并拼接
pub fn merge_fragments(
    fragments: &[PathBuf],
    codec: &dyn AudioCodec,
    source_format: &str,
    log: &RunLog,
    verbose: bool,
) -> MergeSummary {
    let mut summary = MergeSummary {
        total: fragments.len(),
        merged: Vec::with_capacity(fragments.len()),
        failed: Vec::new(),
        audio: AudioBuffer::empty(codec.pcm_spec()),
    };

    for (index, fragment) in fragments.iter().enumerate() {
        let name = utils::extract_filename_lossy(fragment);
        println!(
            "[PROCESSING] [{}/{}] 处理 / Processing: {name}",
            index + 1,
            fragments.len()
        );

        match decode_into(&mut summary.audio, codec, fragment, source_format) {
            Ok(duration) => {
                log.info(format!(
                    "已处理 / Processed {name} ({duration:.2} s)"
                ));
                summary.merged.push(name);
            }
            Err(e) => {
                log.error(format!("处理失败 / Failed to process {name}: {e}"));
                if verbose {
                    println!("      文件 / File: {}", fragment.display());
                }
                summary.failed.push(FailedFragment {
                    name,
                    reason: e.to_string(),
                });
            }
        }
    }

    summary
}

/// 显示解码累加阶段的统计信息
pub fn show_merge_summary(summary: &MergeSummary) {
    println!();
    println!("📊 片段处理完成 / Fragment processing finished");
    println!(
        "   成功合并 / Merged: {} / {}",
        summary.merged.len(),
        summary.total
    );
    println!("   成功率 / Success rate: {:.1}%", summary.success_rate());
    if !summary.failed.is_empty() {
        println!("   失败片段 / Failed: {}", summary.failed.len());
        for failed in &summary.failed {
            println!("      - {}", failed.name);
        }
    }
    println!(
        "   合并时长 / Merged duration: {:.2} s",
        summary.audio.duration_seconds()
    );
    println!();
}
