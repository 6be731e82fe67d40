pub mod about;
pub mod banner;
pub mod catalog;
pub mod contact;
pub mod decision;
pub mod interactive_service;
pub mod job_vacancy;
pub mod leadership;
pub mod news;
pub mod statistics;
pub mod translation;
pub mod useful_link;
pub mod view_hit;
