//! FFmpeg桥接编解码器
//!
//! 通过子进程调用FFmpeg完成片段解码（输出 s16le PCM 到管道）和合并结果编码
//! （从管道读入 PCM，写出目标格式）。工具路径作为显式的 [`ToolPaths`] 值传入，
//! 不使用任何进程级全局状态。

use super::buffer::{AudioBuffer, PcmSpec};
use super::codec::AudioCodec;
use crate::error::{self, MergeError, MergeResult};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

/// FFmpeg安装指南（跨平台）
pub const FFMPEG_INSTALL_GUIDE: &str = r#"
FFmpeg is required to decode and encode audio / 需要安装FFmpeg才能解码和编码音频

Installation / 安装方法:
  macOS:   brew install ffmpeg
  Windows: https://www.gyan.dev/ffmpeg/builds/
           或使用: winget install Gyan.FFmpeg
  Linux:
    - Ubuntu/Debian: sudo apt install ffmpeg
    - Fedora/RHEL:   sudo dnf install ffmpeg
    - Arch:          sudo pacman -S ffmpeg

Download / 下载: https://ffmpeg.org/download.html
Add it to your PATH or pass the executable with --ffmpeg / 加入PATH或通过 --ffmpeg 指定路径
"#;

/// 转码工具默认名称
pub const CONVERTER_NAME: &str = "ffmpeg";

/// 探测工具默认名称
pub const PROBE_NAME: &str = "ffprobe";

/// 所有片段统一解码到的PCM参数（44.1kHz 立体声）
pub const CANONICAL_PCM: PcmSpec = PcmSpec::new(44_100, 2);

/// 转码工具与探测工具的调用路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    /// ffmpeg
    pub converter: PathBuf,
    /// ffprobe
    pub probe: PathBuf,
    /// 是否由用户显式指定
    pub explicit: bool,
}

impl ToolPaths {
    /// 使用PATH中的默认工具名
    pub fn from_environment() -> Self {
        Self {
            converter: PathBuf::from(CONVERTER_NAME),
            probe: PathBuf::from(PROBE_NAME),
            explicit: false,
        }
    }

    /// 解析工具路径
    ///
    /// 显式路径必须指向存在的可执行文件，否则返回 `ToolNotFound`；
    /// 探测工具路径通过文件名替换推导，不做独立查找。
    pub fn resolve(explicit: Option<&Path>) -> MergeResult<Self> {
        match explicit {
            Some(path) => {
                if !is_executable_file(path) {
                    return Err(MergeError::ToolNotFound(path.to_path_buf()));
                }
                Ok(Self {
                    converter: path.to_path_buf(),
                    probe: derive_probe_path(path),
                    explicit: true,
                })
            }
            None => Ok(Self::from_environment()),
        }
    }

    /// 调用 `-version` 验证转码工具可用，返回版本信息首行
    pub fn verify(&self) -> MergeResult<String> {
        let output = Command::new(&self.converter)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                MergeError::ToolUnavailable(format!("{}: {e}", self.converter.display()))
            })?;

        if !output.status.success() {
            return Err(MergeError::ToolUnavailable(format!(
                "{} -version exited with {}: {}",
                self.converter.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string())
    }

    /// PATH模式下实际解析到的转码工具位置（仅用于显示）
    pub fn located_converter(&self) -> Option<PathBuf> {
        if self.explicit {
            Some(self.converter.clone())
        } else {
            which::which(&self.converter).ok()
        }
    }
}

/// 由转码工具路径推导探测工具路径
///
/// 对整个路径字符串做 `ffmpeg` → `ffprobe` 的全量替换（包括目录部分）。
/// 路径中不含 `ffmpeg` 时原样返回。
pub fn derive_probe_path(converter: &Path) -> PathBuf {
    match converter.to_str() {
        Some(s) => PathBuf::from(s.replace(CONVERTER_NAME, PROBE_NAME)),
        None => converter.to_path_buf(),
    }
}

/// 检查路径是否为可执行的普通文件
fn is_executable_file(path: &Path) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }

    #[cfg(not(unix))]
    {
        true
    }
}

/// FFmpeg编解码器
pub struct FfmpegCodec {
    tools: ToolPaths,
    spec: PcmSpec,
}

impl FfmpegCodec {
    pub fn new(tools: ToolPaths) -> Self {
        Self::with_spec(tools, CANONICAL_PCM)
    }

    pub fn with_spec(tools: ToolPaths, spec: PcmSpec) -> Self {
        Self { tools, spec }
    }
}

impl AudioCodec for FfmpegCodec {
    fn pcm_spec(&self) -> PcmSpec {
        self.spec
    }

    fn decode(&self, path: &Path, format: &str) -> MergeResult<AudioBuffer> {
        let output = Command::new(&self.tools.converter)
            .args(["-v", "error", "-f", format, "-i"])
            .arg(path)
            .args(["-f", "s16le", "-acodec", "pcm_s16le", "-ar"])
            .arg(self.spec.sample_rate.to_string())
            .arg("-ac")
            .arg(self.spec.channels.to_string())
            .arg("-")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| error::decoding_error("无法启动FFmpeg / Failed to spawn ffmpeg", e))?;

        if !output.status.success() {
            return Err(MergeError::DecodingError(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        AudioBuffer::from_s16le_bytes(self.spec, &output.stdout)
    }

    fn encode(&self, buffer: &AudioBuffer, format: &str, output: &Path) -> MergeResult<()> {
        let spec = buffer.spec();
        // -n: 目标文件已存在时拒绝覆盖
        let mut child = Command::new(&self.tools.converter)
            .args(["-v", "error", "-n", "-f", "s16le", "-ar"])
            .arg(spec.sample_rate.to_string())
            .arg("-ac")
            .arg(spec.channels.to_string())
            .args(["-i", "pipe:0", "-f", format])
            .arg(output)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| error::export_error("无法启动FFmpeg / Failed to spawn ffmpeg", e))?;

        // stdin 在独立线程写入，主线程同时读取 stderr，避免双方管道写满后互相阻塞
        let writer = child.stdin.take().map(|mut stdin| {
            let pcm = buffer.to_s16le_bytes();
            thread::spawn(move || stdin.write_all(&pcm))
        });

        let result = child
            .wait_with_output()
            .map_err(|e| error::export_error("等待FFmpeg失败 / Failed to wait for ffmpeg", e))?;

        // 写入失败（如管道提前关闭）时仍以FFmpeg的退出状态和错误输出为准
        let write_result = match writer {
            Some(handle) => handle.join().unwrap_or_else(|_| {
                Err(io::Error::other("PCM写入线程崩溃 / PCM writer thread panicked"))
            }),
            None => Ok(()),
        };

        if !result.status.success() {
            return Err(MergeError::ExportFailed(format!(
                "ffmpeg exited with {}: {}",
                result.status,
                String::from_utf8_lossy(&result.stderr).trim()
            )));
        }

        write_result.map_err(|e| error::export_error("写入PCM失败 / Failed to pipe PCM", e))
    }

    fn probe_duration(&self, path: &Path) -> MergeResult<Option<f64>> {
        let output = Command::new(&self.tools.probe)
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .output()?;

        if !output.status.success() {
            return Err(MergeError::ToolUnavailable(format!(
                "{} exited with {}: {}",
                self.tools.probe.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .and_then(|line| line.trim().parse::<f64>().ok()))
    }
}
