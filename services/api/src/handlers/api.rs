/// Handler for `GET /api`.
pub async fn hello() -> &'static str {
    "Hello from Beavery backend!"
}
