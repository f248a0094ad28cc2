use serde::{Deserialize, Serialize};

/// 短码到目标地址的映射
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    pub token: String,
    pub target: String,
}

impl Mapping {
    pub fn new(token: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            target: target.into(),
        }
    }
}

/// 一页扫描结果，`next_cursor == 0` 表示扫描结束
#[derive(Debug, Clone, Default)]
pub struct ScanPage {
    pub next_cursor: u64,
    pub mappings: Vec<Mapping>,
}

impl ScanPage {
    pub fn is_last(&self) -> bool {
        self.next_cursor == 0
    }
}
