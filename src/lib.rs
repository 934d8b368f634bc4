//! MemoFusion 语音备忘录片段合并工具
//!
//! 将目录中导出的 `.dat` 音频片段（实际为 m4a 等编码音频）按文件名顺序
//! 解码、在内存中拼接，再重新编码为单个 MP3 文件。解码和编码交给外部的
//! FFmpeg 完成。
//!
//! ## 流程
//! - 配置解析：输入目录、FFmpeg路径、日志位置
//! - 工具检查：验证FFmpeg可调用
//! - 扫描与解码累加：单个片段失败只记录并跳过
//! - 导出：写入 `merged_audio_<时间戳>_<随机后缀>.mp3`

pub mod audio;
pub mod error;
pub mod tools;

// 重新导出核心类型
pub use audio::{AudioBuffer, AudioCodec, FfmpegCodec, PcmSpec, ToolPaths};
pub use error::{ErrorCategory, MergeError, MergeResult};
