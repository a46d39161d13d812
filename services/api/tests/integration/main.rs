mod access_test;
mod admin_test;
mod auth_test;
mod helpers;
mod ownership_test;
mod resource_test;
