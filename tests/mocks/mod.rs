mod mock_api_client;

pub use mock_api_client::MockApiClient;
