pub const CALCULATE_ENDPOINT: &str = "http://127.0.0.1:5000/api/calculate";

pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred while calculating. Please try again.";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub endpoint: String,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: CALCULATE_ENDPOINT.to_owned(),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}
