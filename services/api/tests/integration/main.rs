mod create_user_test;
mod helpers;
mod router_test;
