mod mock_card_api;
mod mock_platform;

#[allow(unused_imports)]
pub use mock_card_api::MockCardApi;
#[allow(unused_imports)]
pub use mock_platform::MockPlatform;
