//! 민감 데이터 패턴 카탈로그 -- 이름 붙은 정규식과 키워드 게이트
//!
//! 카탈로그는 `{name, pattern, keywords?}` 객체 배열 형태의 JSON 문서에서
//! 로드됩니다. 기본 카탈로그는 크레이트에 내장되어 있으며, 테스트나 조립
//! 코드는 [`SensitiveCatalog::from_defs`]로 임의 카탈로그를 주입할 수
//! 있습니다 (프로세스 전역 싱글턴 없음).
//!
//! 개별 정규식 컴파일 실패는 경고 로그를 남기고 해당 항목만 건너뜁니다.
//! 카탈로그 로드 자체를 실패시키는 것은 JSON 문서 파싱 에러뿐입니다.
//!
//! # 아키텍처
//! - [`SensitivePatternDef`]: JSON에서 역직렬화되는 항목 정의
//! - [`PrecompiledPattern`]: 컴파일된 정규식 + 키워드 게이트
//! - [`detector`]: 라인 단위 탐지 (선언 순서, 첫 매치에서 중단)

pub mod detector;

pub use detector::{detect, SensitiveMatch};

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AggregatorError;

/// 크레이트에 내장된 기본 카탈로그 문서
const EMBEDDED_CATALOG: &str = include_str!("../../assets/sensitive_patterns.json");

/// 카탈로그 파일 최대 크기 (10MB)
const MAX_CATALOG_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// 민감 패턴 정의 -- 카탈로그 JSON의 한 항목
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivePatternDef {
    /// 항목 이름 (예: "AWS_Access_Key")
    pub name: String,
    /// 정규식 원본
    pub pattern: String,
    /// 키워드 게이트 -- 비어있지 않으면 이 중 하나가 라인에 부분 문자열로
    /// 존재해야 정규식이 평가됨
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// 컴파일된 민감 패턴
#[derive(Debug, Clone)]
pub struct PrecompiledPattern {
    /// 항목 이름
    pub name: String,
    /// 컴파일된 정규식
    pub regex: Regex,
    /// 키워드 게이트
    pub keywords: Vec<String>,
}

/// 민감 패턴 카탈로그
///
/// 선언 순서가 유지되는 불변 목록입니다. 구성 이후 잠금 없이 공유됩니다.
#[derive(Debug, Clone)]
pub struct SensitiveCatalog {
    patterns: Vec<PrecompiledPattern>,
}

impl SensitiveCatalog {
    /// 내장 카탈로그를 로드합니다.
    pub fn embedded() -> Result<Self, AggregatorError> {
        Self::from_json_str(EMBEDDED_CATALOG, "embedded")
    }

    /// 빈 카탈로그를 생성합니다.
    ///
    /// 탐지가 비활성화된 상태에서 카탈로그 로드가 실패한 경우 사용됩니다.
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// JSON 문자열에서 카탈로그를 로드합니다.
    pub fn from_json_str(json: &str, source_name: &str) -> Result<Self, AggregatorError> {
        let defs: Vec<SensitivePatternDef> =
            serde_json::from_str(json).map_err(|e| AggregatorError::Catalog {
                source_name: source_name.to_owned(),
                reason: e.to_string(),
            })?;
        Ok(Self::from_defs(defs))
    }

    /// 정의 목록에서 카탈로그를 생성합니다.
    ///
    /// 컴파일에 실패한 항목은 경고 로그를 남기고 건너뜁니다.
    pub fn from_defs(defs: Vec<SensitivePatternDef>) -> Self {
        let mut patterns = Vec::with_capacity(defs.len());
        for def in defs {
            match Regex::new(&def.pattern) {
                Ok(regex) => patterns.push(PrecompiledPattern {
                    name: def.name,
                    regex,
                    keywords: def.keywords,
                }),
                Err(e) => {
                    tracing::warn!(
                        name = %def.name,
                        error = %e,
                        "failed to compile sensitive pattern, skipping"
                    );
                }
            }
        }
        Self { patterns }
    }

    /// 파일에서 카탈로그를 로드합니다.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, AggregatorError> {
        let path = path.as_ref();

        let metadata =
            tokio::fs::metadata(path)
                .await
                .map_err(|e| AggregatorError::Catalog {
                    source_name: path.display().to_string(),
                    reason: format!("failed to read file metadata: {e}"),
                })?;

        if metadata.len() > MAX_CATALOG_FILE_SIZE {
            return Err(AggregatorError::Catalog {
                source_name: path.display().to_string(),
                reason: format!(
                    "file too large: {} bytes (max: {MAX_CATALOG_FILE_SIZE})",
                    metadata.len()
                ),
            });
        }

        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| AggregatorError::Catalog {
                    source_name: path.display().to_string(),
                    reason: format!("failed to read file: {e}"),
                })?;

        Self::from_json_str(&content, &path.display().to_string())
    }

    /// 컴파일된 패턴 목록을 선언 순서대로 반환합니다.
    pub fn patterns(&self) -> &[PrecompiledPattern] {
        &self.patterns
    }

    /// 카탈로그 항목 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// 카탈로그가 비어있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_loads() {
        let catalog = SensitiveCatalog::embedded().unwrap();
        assert!(!catalog.is_empty());
        // 내장 카탈로그의 모든 정규식이 컴파일되어야 함
        let names: Vec<&str> = catalog.patterns().iter().map(|p| p.name.as_str()).collect();
        assert!(names.contains(&"AWS_Access_Key"));
        assert!(names.contains(&"Private_Key_Block"));
    }

    #[test]
    fn embedded_catalog_preserves_declaration_order() {
        let catalog = SensitiveCatalog::embedded().unwrap();
        assert_eq!(catalog.patterns()[0].name, "AWS_Access_Key");
    }

    #[test]
    fn from_json_str_parses_entries() {
        let json = r#"[
            {"name": "K", "pattern": "secret_\\d+", "keywords": ["secret"]},
            {"name": "NoGate", "pattern": "open_secret"}
        ]"#;
        let catalog = SensitiveCatalog::from_json_str(json, "test").unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.patterns()[0].keywords, vec!["secret"]);
        // keywords 생략 시 빈 게이트
        assert!(catalog.patterns()[1].keywords.is_empty());
    }

    #[test]
    fn invalid_json_fails_load() {
        let result = SensitiveCatalog::from_json_str("not json", "test");
        assert!(result.is_err());
    }

    #[test]
    fn invalid_regex_is_skipped_not_fatal() {
        let json = r#"[
            {"name": "Broken", "pattern": "[unclosed"},
            {"name": "Good", "pattern": "ok_\\d+"}
        ]"#;
        let catalog = SensitiveCatalog::from_json_str(json, "test").unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.patterns()[0].name, "Good");
    }

    #[test]
    fn empty_catalog() {
        let catalog = SensitiveCatalog::empty();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }

    #[tokio::test]
    async fn from_file_loads_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patterns.json");
        std::fs::write(&path, r#"[{"name": "F", "pattern": "file_secret_\\d+"}]"#).unwrap();

        let catalog = SensitiveCatalog::from_file(&path).await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.patterns()[0].name, "F");
    }

    #[tokio::test]
    async fn from_file_missing_path_fails() {
        let result = SensitiveCatalog::from_file("/nonexistent/patterns.json").await;
        assert!(result.is_err());
    }
}
