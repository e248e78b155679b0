//! DocAppoint 메인 애플리케이션
//!
//! Actix-web 서버를 구동하고 MongoDB, Redis, 싱글톤 서비스, 템플릿을 초기화합니다.
//! 세션 쿠키 로그인(로컬 + Google OAuth)과 역할별 라우트 그룹을 제공합니다.

use std::io;
use std::sync::Arc;
use actix_files::Files;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use docappoint::caching::redis::RedisClient;
use docappoint::config::{RateLimitConfig, ServerConfig};
use docappoint::core::registry::ServiceLocator;
use docappoint::db::Database;
use docappoint::handlers::not_found;
use docappoint::middlewares::{session_middleware, AuthMiddleware, MethodOverride};
use docappoint::repositories::create_all_indexes;
use docappoint::routes::{configure_all_routes, ROUTE_GROUPS};
use docappoint::utils::display_terminal::print_route_groups;
use docappoint::views;

#[actix_web::main]
async fn main() -> io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 DocAppoint 시작중...");

    views::init().map_err(|e| io::Error::other(e.to_string()))?;

    let (database, redis_client) = initialize_data_stores().await?;

    ServiceLocator::set(database);
    ServiceLocator::set(redis_client);

    ServiceLocator::initialize_all()
        .await
        .map_err(|e| io::Error::other(format!("서비스 초기화 실패: {}", e)))?;

    create_all_indexes()
        .await
        .map_err(|e| io::Error::other(format!("인덱스 생성 실패: {}", e)))?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server().await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 미들웨어는 바깥쪽부터 Rate Limiting → 경로 정규화 → 접근 로그 → 세션 → 메서드 오버라이드
/// → 세션 사용자 로드 순서로 실행됩니다.
async fn start_http_server() -> io::Result<()> {
    let bind_address = ServerConfig::bind_address();
    let base_url = format!("http://{}", bind_address);

    let rate_limit = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit.per_second)
        .burst_size(rate_limit.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit.per_second,
        rate_limit.burst_size
    );

    print_route_groups(&base_url, ROUTE_GROUPS);
    info!("🌐 서버가 {} 에서 실행중입니다", base_url);

    HttpServer::new(move || {
        App::new()
            .wrap(AuthMiddleware::optional())
            .wrap(MethodOverride)
            .wrap(session_middleware())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .wrap(Governor::new(&governor_conf))
            .service(Files::new("/static", "public"))
            .configure(configure_all_routes)
            .default_service(web::to(not_found))
    })
        .bind(&bind_address)?
        .workers(ServerConfig::workers())
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// `RUST_LOG`가 없으면 `info,actix_web=info`
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// MongoDB와 Redis 연결을 초기화합니다
async fn initialize_data_stores() -> io::Result<(Arc<Database>, Arc<RedisClient>)> {
    info!("📡 데이터베이스 연결 중...");

    let database = Database::new()
        .await
        .map_err(|e| io::Error::other(format!("데이터베이스 연결 실패: {}", e)))?;

    info!("✅ MongoDB 연결 성공 ({})", database.database_name());

    let redis_client = RedisClient::new()
        .await
        .map_err(|e| io::Error::other(format!("Redis 연결 실패: {}", e)))?;

    info!("✅ Redis 연결 성공");

    Ok((Arc::new(database), Arc::new(redis_client)))
}
