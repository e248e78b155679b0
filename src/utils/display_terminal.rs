//! 터미널 출력 포맷팅 유틸리티
//!
//! 서버 기동 과정(레지스트리 초기화, 라우트 안내)을 박스와 단계 표시로 출력합니다.

const BOX_WIDTH: usize = 50;

pub fn print_boxed_title(title: &str) {
    let border = "═".repeat(BOX_WIDTH);

    println!("╔{}╗", border);
    println!("║{:^width$}║", title, width = BOX_WIDTH - 1);
    println!("╚{}╝", border);
}

pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

pub fn print_final_summary(repos: usize, services: usize) {
    println!();
    print_boxed_title("🎉 SERVICE REGISTRY INITIALIZED");
    println!("   📦 Repositories: {}", repos);
    println!("   🔧 Services: {}", services);
    println!("   🚀 Total Components: {}", repos + services);
    println!();
}

pub fn print_cache_initialized(cache_type: &str, count: usize) {
    println!("   ├─ {} Cache: {} entries loaded", cache_type, count);
}

/// 기동 직후 라우트 그룹 안내
pub fn print_route_groups(base_url: &str, groups: &[(&str, &str)]) {
    print_boxed_title("🩺 DOCAPPOINT READY");
    for (prefix, description) in groups {
        println!("   ├─ {}{:<10} {}", base_url, prefix, description);
    }
    println!();
}
