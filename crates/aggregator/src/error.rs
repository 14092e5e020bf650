//! 집계 파이프라인 에러 타입
//!
//! [`AggregatorError`]는 집계 파이프라인 내부에서 발생하는 모든 에러를 표현합니다.
//! `From<AggregatorError> for LogsiftError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.

use logsift_core::error::{CatalogError, ConfigError, LogsiftError, PipelineError};

/// 집계 파이프라인 도메인 에러
///
/// 카탈로그 로딩, 설정 검증, 채널 통신, 생명주기 등
/// 파이프라인 내부의 구조적 에러 상황을 포괄합니다.
/// 엔트리 단위 실패(디코딩 실패, 멀티라인 초과)는 에러가 아니라
/// 로그를 남기고 건너뜁니다.
#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    /// 민감 패턴 카탈로그 로딩/파싱 실패
    #[error("catalog error: {source_name}: {reason}")]
    Catalog {
        /// 카탈로그 출처 (embedded, 파일 경로 등)
        source_name: String,
        /// 실패 사유
        reason: String,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 채널 통신 에러
    #[error("channel error: {0}")]
    Channel(String),

    /// 이미 실행 중인 집계기를 다시 시작함
    #[error("aggregator already running")]
    AlreadyRunning,
}

impl From<AggregatorError> for LogsiftError {
    fn from(err: AggregatorError) -> Self {
        match err {
            AggregatorError::Catalog {
                source_name,
                reason,
            } => CatalogError::Parse {
                source_name,
                reason,
            }
            .into(),
            AggregatorError::Config { field, reason } => {
                ConfigError::InvalidValue { field, reason }.into()
            }
            AggregatorError::Channel(reason) => PipelineError::ChannelSend(reason).into(),
            AggregatorError::AlreadyRunning => PipelineError::AlreadyRunning.into(),
        }
    }
}
