//! 플래시 메시지 모델
//!
//! 한 요청에서 쌓인 메시지는 세션에 저장되었다가 다음에 렌더링되는 페이지에서
//! 한 번만 보여지고 사라집니다.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
    Info,
}

/// 레벨별 메시지 묶음
///
/// 템플릿에는 `success`, `error`, `info` 배열로 전달됩니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlashBag {
    #[serde(default)]
    pub success: Vec<String>,
    #[serde(default)]
    pub error: Vec<String>,
    #[serde(default)]
    pub info: Vec<String>,
}

impl FlashBag {
    pub fn push(&mut self, level: FlashLevel, message: impl Into<String>) {
        let bucket = match level {
            FlashLevel::Success => &mut self.success,
            FlashLevel::Error => &mut self.error,
            FlashLevel::Info => &mut self.info,
        };
        bucket.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.success.is_empty() && self.error.is_empty() && self.info.is_empty()
    }
}
