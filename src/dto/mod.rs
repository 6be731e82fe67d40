pub mod auth_dto;
pub mod catalog_dto;
pub mod common;
pub mod contact_dto;
pub mod content_dto;
pub mod leadership_dto;
pub mod news_dto;
pub mod pagination;
pub mod publication_dto;
pub mod vacancy_dto;
