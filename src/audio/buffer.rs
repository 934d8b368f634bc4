//! 内存音频累加器
//!
//! 片段解码后的PCM样本（交错排列的16位整数）按枚举顺序依次追加，
//! 整个合并结果在导出前全部保留在内存中。

use crate::error::{MergeError, MergeResult};

/// PCM格式参数（交错 s16le）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmSpec {
    pub sample_rate: u32,
    pub channels: u16,
}

impl PcmSpec {
    pub const fn new(sample_rate: u32, channels: u16) -> Self {
        Self {
            sample_rate,
            channels,
        }
    }

    /// 获取声道数（usize类型）
    #[inline]
    pub fn channels_usize(&self) -> usize {
        self.channels as usize
    }
}

/// 只追加的音频缓冲区
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    spec: PcmSpec,
    samples: Vec<i16>,
}

impl AudioBuffer {
    /// 创建空缓冲区
    pub fn empty(spec: PcmSpec) -> Self {
        Self {
            spec,
            samples: Vec::new(),
        }
    }

    /// 由已解码样本创建缓冲区
    ///
    /// 样本数必须是声道数的整数倍，否则视为解码结果不完整。
    pub fn from_samples(spec: PcmSpec, samples: Vec<i16>) -> MergeResult<Self> {
        if spec.channels == 0 || spec.sample_rate == 0 {
            return Err(MergeError::DecodingError(format!(
                "无效的PCM参数 / Invalid PCM spec: {}Hz, {} channels",
                spec.sample_rate, spec.channels
            )));
        }
        if samples.len() % spec.channels_usize() != 0 {
            return Err(MergeError::DecodingError(format!(
                "样本数不是声道数的整数倍 / Sample count {} is not a multiple of {} channels",
                samples.len(),
                spec.channels
            )));
        }
        Ok(Self { spec, samples })
    }

    /// S16LE字节转样本（小端序），末尾不足一个样本的字节被丢弃
    pub fn from_s16le_bytes(spec: PcmSpec, bytes: &[u8]) -> MergeResult<Self> {
        let samples = bytes
            .chunks_exact(2)
            .map(|chunk| i16::from_le_bytes([chunk[0], chunk[1]]))
            .collect();
        Self::from_samples(spec, samples)
    }

    /// 追加另一个缓冲区（纯拼接，无交叉淡化、无间隙）
    ///
    /// PCM参数不一致时拒绝追加，累加器保持不变。
    pub fn append(&mut self, other: &AudioBuffer) -> MergeResult<()> {
        if other.spec != self.spec {
            return Err(MergeError::DecodingError(format!(
                "PCM参数不一致 / PCM spec mismatch: expected {}Hz/{}ch, got {}Hz/{}ch",
                self.spec.sample_rate,
                self.spec.channels,
                other.spec.sample_rate,
                other.spec.channels
            )));
        }
        self.samples.extend_from_slice(&other.samples);
        Ok(())
    }

    pub fn spec(&self) -> PcmSpec {
        self.spec
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 帧数（每帧包含所有声道各一个样本）
    pub fn frames(&self) -> u64 {
        (self.samples.len() / self.spec.channels_usize()) as u64
    }

    /// 获取持续时长（秒）
    pub fn duration_seconds(&self) -> f64 {
        self.frames() as f64 / self.spec.sample_rate as f64
    }

    /// 样本转S16LE字节（编码输入）
    pub fn to_s16le_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.samples.len() * 2);
        for sample in &self.samples {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }
        bytes
    }
}
