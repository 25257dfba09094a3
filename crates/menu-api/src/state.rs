use std::sync::Arc;

use menu_core::services::MenuService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub menu_service: Arc<MenuService>,
}

impl AppState {
    pub fn new(menu_service: MenuService) -> Self {
        Self {
            menu_service: Arc::new(menu_service),
        }
    }
}
