//! 집계 파이프라인 설정
//!
//! [`AggregatorConfig`]는 멀티라인 수집기와 집계기의 동작 파라미터를 정의합니다.
//!
//! # 사용 예시
//! ```ignore
//! use logsift_aggregator::config::AggregatorConfigBuilder;
//!
//! let config = AggregatorConfigBuilder::new()
//!     .multiline_timeout_ms(500)
//!     .patterns_per_level(128)
//!     .build()?;
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AggregatorError;

/// 집계 파이프라인 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// 멀티라인 플러시 타임아웃 (밀리초)
    ///
    /// 연속 라인이 이 시간 동안 도착하지 않으면 누적 중인 메시지를 방출합니다.
    pub multiline_timeout_ms: u64,
    /// 메시지당 최대 연속 라인 수 (초과분은 드롭되고 카운트됨)
    pub multiline_collector_limit: usize,
    /// 고신호 레벨당 유지할 최대 패턴 수 (초과분은 오버플로우 버킷으로 수렴)
    pub patterns_per_level: usize,
    /// 입력/내부 채널 용량 (백프레셔 지점)
    pub channel_capacity: usize,
    /// 민감 데이터 탐지 비활성화 여부
    pub disable_sensitive_detection: bool,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            multiline_timeout_ms: 1000,
            multiline_collector_limit: 100,
            patterns_per_level: 256,
            channel_capacity: 1024,
            disable_sensitive_detection: false,
        }
    }
}

impl AggregatorConfig {
    /// 멀티라인 타임아웃을 `Duration`으로 반환합니다.
    pub fn multiline_timeout(&self) -> Duration {
        Duration::from_millis(self.multiline_timeout_ms)
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), AggregatorError> {
        const MAX_TIMEOUT_MS: u64 = 3_600_000; // 1 hour
        const MAX_COLLECTOR_LIMIT: usize = 10_000;
        const MAX_PATTERNS_PER_LEVEL: usize = 1_000_000;
        const MAX_CHANNEL_CAPACITY: usize = 10_000_000;

        if self.multiline_timeout_ms == 0 || self.multiline_timeout_ms > MAX_TIMEOUT_MS {
            return Err(AggregatorError::Config {
                field: "multiline_timeout_ms".to_owned(),
                reason: format!("must be 1-{}", MAX_TIMEOUT_MS),
            });
        }

        if self.multiline_collector_limit == 0
            || self.multiline_collector_limit > MAX_COLLECTOR_LIMIT
        {
            return Err(AggregatorError::Config {
                field: "multiline_collector_limit".to_owned(),
                reason: format!("must be 1-{}", MAX_COLLECTOR_LIMIT),
            });
        }

        if self.patterns_per_level == 0 || self.patterns_per_level > MAX_PATTERNS_PER_LEVEL {
            return Err(AggregatorError::Config {
                field: "patterns_per_level".to_owned(),
                reason: format!("must be 1-{}", MAX_PATTERNS_PER_LEVEL),
            });
        }

        if self.channel_capacity == 0 || self.channel_capacity > MAX_CHANNEL_CAPACITY {
            return Err(AggregatorError::Config {
                field: "channel_capacity".to_owned(),
                reason: format!("must be 1-{}", MAX_CHANNEL_CAPACITY),
            });
        }

        Ok(())
    }
}

/// 집계 설정 빌더
#[derive(Default)]
pub struct AggregatorConfigBuilder {
    config: AggregatorConfig,
}

impl AggregatorConfigBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 멀티라인 플러시 타임아웃(밀리초)을 설정합니다.
    pub fn multiline_timeout_ms(mut self, ms: u64) -> Self {
        self.config.multiline_timeout_ms = ms;
        self
    }

    /// 메시지당 최대 연속 라인 수를 설정합니다.
    pub fn multiline_collector_limit(mut self, limit: usize) -> Self {
        self.config.multiline_collector_limit = limit;
        self
    }

    /// 레벨당 최대 패턴 수를 설정합니다.
    pub fn patterns_per_level(mut self, cap: usize) -> Self {
        self.config.patterns_per_level = cap;
        self
    }

    /// 채널 용량을 설정합니다.
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.config.channel_capacity = capacity;
        self
    }

    /// 민감 데이터 탐지를 비활성화합니다.
    pub fn disable_sensitive_detection(mut self, disable: bool) -> Self {
        self.config.disable_sensitive_detection = disable;
        self
    }

    /// 설정을 검증하고 `AggregatorConfig`를 생성합니다.
    pub fn build(self) -> Result<AggregatorConfig, AggregatorError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AggregatorConfig::default();
        config.validate().unwrap();
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config = AggregatorConfig {
            multiline_timeout_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_collector_limit() {
        let config = AggregatorConfig {
            multiline_collector_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_patterns_per_level() {
        let config = AggregatorConfig {
            patterns_per_level: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_oversized_values() {
        let config = AggregatorConfig {
            multiline_timeout_ms: 7_200_000,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AggregatorConfig {
            channel_capacity: usize::MAX,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn multiline_timeout_converts_to_duration() {
        let config = AggregatorConfig {
            multiline_timeout_ms: 250,
            ..Default::default()
        };
        assert_eq!(config.multiline_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn builder_creates_valid_config() {
        let config = AggregatorConfigBuilder::new()
            .multiline_timeout_ms(500)
            .multiline_collector_limit(10)
            .patterns_per_level(2)
            .channel_capacity(64)
            .disable_sensitive_detection(true)
            .build()
            .unwrap();
        assert_eq!(config.multiline_timeout_ms, 500);
        assert_eq!(config.patterns_per_level, 2);
        assert!(config.disable_sensitive_detection);
    }

    #[test]
    fn builder_rejects_invalid_config() {
        let result = AggregatorConfigBuilder::new().patterns_per_level(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn config_serialize_roundtrip() {
        let config = AggregatorConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: AggregatorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(
            deserialized.multiline_timeout_ms,
            config.multiline_timeout_ms
        );
        assert_eq!(deserialized.patterns_per_level, config.patterns_per_level);
    }
}
