pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::dto::pagination::PageRequest;
use crate::error::Result;
use crate::services::{
    about_service::AboutService, banner_service::BannerService, cache_service::ResponseCache,
    catalog_service::CatalogService, contact_service::ContactService,
    decision_service::DecisionService, interactive_service_service::InteractiveServiceService,
    leadership_service::LeadershipService, news_service::NewsService,
    notification_service::NotificationService, statistics_service::StatisticsService,
    useful_link_service::UsefulLinkService, vacancy_service::VacancyService,
    view_service::ViewService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub cache: ResponseCache,
    pub banner_service: BannerService,
    pub statistics_service: StatisticsService,
    pub useful_link_service: UsefulLinkService,
    pub news_service: NewsService,
    pub about_service: AboutService,
    pub leadership_service: LeadershipService,
    pub catalog_service: CatalogService,
    pub vacancy_service: VacancyService,
    pub interactive_service_service: InteractiveServiceService,
    pub decision_service: DecisionService,
    pub contact_service: ContactService,
    pub view_service: ViewService,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config) -> Result<Self> {
        let primary = config.primary_language;

        let notification_service = NotificationService::new(&config)?;
        let view_service = ViewService::new(
            pool.clone(),
            config.view_hits_per_ip_limit,
            config.view_hit_window_days,
        );

        let banner_service = BannerService::new(pool.clone(), primary);
        let statistics_service = StatisticsService::new(pool.clone(), primary);
        let useful_link_service = UsefulLinkService::new(pool.clone(), primary);
        let news_service = NewsService::new(pool.clone(), primary, view_service.clone());
        let about_service = AboutService::new(pool.clone(), primary);
        let leadership_service = LeadershipService::new(pool.clone(), primary);
        let catalog_service = CatalogService::new(pool.clone(), primary);
        let vacancy_service = VacancyService::new(pool.clone(), primary);
        let interactive_service_service =
            InteractiveServiceService::new(pool.clone(), primary, view_service.clone());
        let decision_service = DecisionService::new(pool.clone(), primary, view_service.clone());
        let contact_service = ContactService::new(pool.clone(), primary, notification_service);

        Ok(Self {
            pool,
            cache: ResponseCache::new(config.cache_enabled),
            config: Arc::new(config),
            banner_service,
            statistics_service,
            useful_link_service,
            news_service,
            about_service,
            leadership_service,
            catalog_service,
            vacancy_service,
            interactive_service_service,
            decision_service,
            contact_service,
            view_service,
        })
    }

    pub fn page_request(&self, page: Option<i64>) -> PageRequest {
        PageRequest::new(page, self.config.page_size)
    }
}
