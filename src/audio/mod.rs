//! 音频解码/编码模块
//!
//! 解码与编码由外部引擎完成，本模块只负责调用约定和内存累加。

pub mod buffer;
pub mod codec;
pub mod ffmpeg_bridge;

pub use buffer::{AudioBuffer, PcmSpec};
pub use codec::AudioCodec;
pub use ffmpeg_bridge::{FFMPEG_INSTALL_GUIDE, FfmpegCodec, ToolPaths, derive_probe_path};
