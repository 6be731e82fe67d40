pub mod about_service;
pub mod banner_service;
pub mod cache_service;
pub mod catalog_service;
pub mod contact_service;
pub mod decision_service;
pub mod interactive_service_service;
pub mod leadership_service;
pub mod news_service;
pub mod notification_service;
pub mod query;
pub mod statistics_service;
pub mod useful_link_service;
pub mod vacancy_service;
pub mod view_service;
