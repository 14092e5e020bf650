#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`pattern`]: 토큰화, stable/variable 분류, 패턴 지문 및 약한 동치
//! - [`sensitive`]: 민감 패턴 카탈로그 (내장 JSON) 및 키워드 게이트 탐지
//! - [`collector`]: 멀티라인 수집기 (타임아웃 기반 상태 머신)
//! - [`aggregator`]: 전체 파이프라인 오케스트레이션 및 스냅샷 API
//! - [`config`]: 집계 파이프라인 설정
//! - [`error`]: 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! entry_tx -> ingest worker -> MultilineCollector -> aggregation worker
//!                |  (decode)        |  (조립)             |  (increment)
//!             Decoder          timeout/limit        RwLock<PatternStore>
//! ```

pub mod aggregator;
pub mod collector;
pub mod config;
pub mod error;
pub mod pattern;
pub mod sensitive;

// --- 주요 타입 re-export ---

// 집계기
pub use aggregator::{
    LogAggregator, LogAggregatorBuilder, MessageObserver, UNCLASSIFIED_HASH, UNCLASSIFIED_SAMPLE,
};

// 설정
pub use config::{AggregatorConfig, AggregatorConfigBuilder};

// 에러
pub use error::AggregatorError;

// 패턴
pub use pattern::{Pattern, Token, TokenKind};

// 민감 데이터
pub use sensitive::{detect, PrecompiledPattern, SensitiveCatalog, SensitiveMatch, SensitivePatternDef};

// 수집기
pub use collector::MultilineCollector;
