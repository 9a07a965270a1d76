// Library for tests to access modules

pub mod ceph_api;
pub mod config;
pub mod error;
pub mod models;
pub mod overview;
pub mod routes;
pub mod services;
pub mod subscription;
pub mod workbench;
