//! # 싱글톤 레지스트리
//!
//! `singleton_macro`의 `#[service]`, `#[repository]` 매크로가 생성하는 코드가
//! 참조하는 레지스트리 타입들을 정의합니다.
//!
//! ## 동작 방식
//!
//! ```text
//! 컴파일 타임
//!    ├─ #[service] 매크로    → ServiceRegistration 제출 (inventory)
//!    └─ #[repository] 매크로 → RepositoryRegistration 제출 (inventory)
//!
//! 런타임
//!    ├─ ServiceLocator::set()            → Database, RedisClient 수동 등록
//!    ├─ ServiceLocator::initialize_all() → 리포지토리 → 서비스 순서로 생성
//!    └─ ServiceLocator::get::<T>()       → Arc<T> 필드 주입 시 호출
//! ```
//!
//! ## 이름 규칙
//!
//! `UserRepository` 타입은 `user_repository`로 등록된 항목과,
//! `AppointmentService` 타입은 `appointment_service`로 등록된 항목과 매칭됩니다.
//! 여러 단어로 된 타입(`GoogleAuthService`)은 `name = "googleauth"`처럼
//! 붙여 쓴 소문자 이름으로 등록해야 합니다.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use crate::utils::display_terminal::{
    print_boxed_title, print_cache_initialized, print_final_summary, print_step_complete,
    print_step_start, print_sub_task,
};

/// 비즈니스 로직 서비스를 위한 공통 인터페이스
///
/// `#[service]` 매크로가 자동으로 구현합니다.
#[async_trait]
pub trait Service: Send + Sync {
    /// 서비스의 등록 이름 (`xxx_service`)
    fn name(&self) -> &str;

    /// 서비스 생성 직후 호출되는 초기화 훅
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 데이터 액세스 리포지토리를 위한 공통 인터페이스
///
/// `#[repository]` 매크로가 자동으로 구현합니다.
/// 매크로가 생성하는 `cache_key()`가 `name()`을 사용하므로
/// 리포지토리 모듈에서는 이 trait을 항상 import 해야 합니다.
#[async_trait]
pub trait Repository: Send + Sync {
    /// 리포지토리의 등록 이름 (`xxx_repository`)
    fn name(&self) -> &str;

    /// 연결된 MongoDB 컬렉션 이름
    fn collection_name(&self) -> &str;

    /// 리포지토리 생성 직후 호출되는 초기화 훅
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// `#[service]` 매크로가 제출하는 등록 정보
pub struct ServiceRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// `#[repository]` 매크로가 제출하는 등록 정보
pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

/// `user_service` → `user` 형태의 이름 → 등록정보 매핑
static SERVICE_NAME_CACHE: Lazy<HashMap<String, &'static ServiceRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<ServiceRegistration>()
        .map(|registration| (clean_registration_name(registration.name), registration))
        .collect();

    print_cache_initialized("Service", cache.len());
    cache
});

/// `user_repository` → `user` 형태의 이름 → 등록정보 매핑
static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, &'static RepositoryRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<RepositoryRegistration>()
        .map(|registration| (clean_registration_name(registration.name), registration))
        .collect();

    print_cache_initialized("Repository", cache.len());
    cache
});

fn clean_registration_name(name: &str) -> String {
    name.strip_suffix("_service")
        .or_else(|| name.strip_suffix("_repository"))
        .unwrap_or(name)
        .to_string()
}

/// `docappoint::services::users::user_service::UserService` → `UserService`
fn short_type_name(type_name: &str) -> &str {
    type_name.rsplit("::").next().unwrap_or(type_name)
}

/// 싱글톤 의존성 주입 컨테이너
///
/// - 각 타입당 하나의 인스턴스만 보관합니다.
/// - 첫 요청 시점에 등록된 생성자로 인스턴스를 만듭니다.
/// - 생성 중인 타입을 추적하여 순환 의존성을 조기에 발견합니다.
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    initializing: RwLock<HashSet<TypeId>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    fn cached<T: 'static + Send + Sync>(&self) -> Option<Arc<T>> {
        let instances = self.instances.read().unwrap_or_else(PoisonError::into_inner);
        instances
            .get(&TypeId::of::<T>())
            .and_then(|instance| instance.clone().downcast::<T>().ok())
    }

    /// 지정된 타입의 싱글톤 인스턴스를 가져옵니다.
    ///
    /// 매크로가 생성하는 `new()`에서 `Arc<T>` 필드마다 호출됩니다.
    ///
    /// # Panics
    ///
    /// - 순환 의존성 (A → B → A)
    /// - 레지스트리에 없는 타입
    /// - 등록된 타입과 요청 타입 불일치
    ///
    /// 모두 애플리케이션 조립 단계의 오류이므로 시작 시점에 즉시 실패시킵니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if let Some(instance) = LOCATOR.cached::<T>() {
            return instance;
        }

        {
            let mut initializing = LOCATOR.initializing.write().unwrap_or_else(PoisonError::into_inner);
            if !initializing.insert(type_id) {
                log::error!("❌ 순환 의존성 감지: {}", type_name);
                panic!("Circular dependency detected: {} is already being initialized", type_name);
            }
        }

        let instance = Self::construct::<T>(type_name);

        LOCATOR.initializing.write().unwrap_or_else(PoisonError::into_inner).remove(&type_id);
        LOCATOR
            .instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(type_id, instance.clone() as Arc<dyn Any + Send + Sync>);

        instance
    }

    fn construct<T: 'static + Send + Sync>(type_name: &str) -> Arc<T> {
        let short_name = short_type_name(type_name);

        let boxed = if let Some(entity) = short_name.strip_suffix("Repository") {
            REPOSITORY_NAME_CACHE
                .get(&entity.to_lowercase())
                .map(|registration| (registration.constructor)())
        } else if let Some(entity) = short_name.strip_suffix("Service") {
            SERVICE_NAME_CACHE
                .get(&entity.to_lowercase())
                .map(|registration| (registration.constructor)())
        } else {
            None
        };

        let Some(boxed) = boxed else {
            panic!(
                "Component not registered: {}. Use #[service]/#[repository] or ServiceLocator::set()",
                type_name
            );
        };

        match boxed.downcast::<Arc<T>>() {
            Ok(instance) => *instance,
            Err(_) => panic!("Type mismatch in ServiceLocator for {}", type_name),
        }
    }

    /// 매크로로 관리되지 않는 인프라 컴포넌트(Database, RedisClient)를 등록합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_name = std::any::type_name::<T>();
        log::info!("📦 Registering: {}", short_type_name(type_name));

        LOCATOR
            .instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 모든 리포지토리와 서비스를 미리 생성합니다.
    ///
    /// 리포지토리를 먼저, 서비스를 나중에 생성합니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        print_boxed_title("🔄 INITIALIZING SERVICE REGISTRY");

        let repo_registrations: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        let repo_count = repo_registrations.len();

        if repo_count > 0 {
            print_step_start(1, "Creating Repository instances");
            for registration in repo_registrations {
                let _instance = (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }
            print_step_complete(1, "Repository instances created", repo_count);
        }

        let service_registrations: Vec<_> = inventory::iter::<ServiceRegistration>().collect();
        let service_count = service_registrations.len();

        if service_count > 0 {
            print_step_start(2, "Creating Service instances");
            for registration in service_registrations {
                let _instance = (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }
            print_step_complete(2, "Service instances created", service_count);
        }

        print_final_summary(repo_count, service_count);
        Ok(())
    }
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

#[cfg(test)]
mod tests {
    use super::*;

    struct ClinicSettings {
        opening_hour: u8,
    }

    #[test]
    fn test_clean_registration_name() {
        assert_eq!(clean_registration_name("user_service"), "user");
        assert_eq!(clean_registration_name("appointment_repository"), "appointment");
        assert_eq!(clean_registration_name("googleauth_service"), "googleauth");
        assert_eq!(clean_registration_name("plain"), "plain");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(
            short_type_name("docappoint::services::users::user_service::UserService"),
            "UserService"
        );
        assert_eq!(short_type_name("Database"), "Database");
    }

    #[test]
    fn test_set_then_get_returns_same_instance() {
        let settings = Arc::new(ClinicSettings { opening_hour: 9 });
        ServiceLocator::set(settings.clone());

        let resolved = ServiceLocator::get::<ClinicSettings>();
        assert!(Arc::ptr_eq(&settings, &resolved));
        assert_eq!(resolved.opening_hour, 9);
    }
}
