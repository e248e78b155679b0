//! # Caching Module
//!
//! 리포지토리 단건 조회 결과를 Redis에 캐싱합니다.
//!
//! - 키 형식: `{repository_name}:{id}` (매크로 생성 `cache_key()`)
//! - 만료: [`redis::DEFAULT_TTL_SECONDS`]
//! - 캐시 오류는 경고 로그만 남기고 요청을 실패시키지 않습니다.

pub mod redis;
