//! 编解码服务接口
//!
//! 解码/编码引擎本身不在本工具内实现，统一抽象为 `AudioCodec`，
//! 生产实现为 [`FfmpegCodec`](super::FfmpegCodec)。

use super::buffer::{AudioBuffer, PcmSpec};
use crate::error::MergeResult;
use std::path::Path;

/// 音频编解码器trait
pub trait AudioCodec {
    /// 解码输出的PCM参数（空累加器也使用此参数）
    fn pcm_spec(&self) -> PcmSpec;

    /// 按假定的源格式解码单个文件
    fn decode(&self, path: &Path, format: &str) -> MergeResult<AudioBuffer>;

    /// 将缓冲区编码为目标格式并写入 `output`（不得覆盖已有文件）
    fn encode(&self, buffer: &AudioBuffer, format: &str, output: &Path) -> MergeResult<()>;

    /// 探测已写出文件的时长（秒），`Ok(None)` 表示不支持
    fn probe_duration(&self, _path: &Path) -> MergeResult<Option<f64>> {
        Ok(None)
    }
}
