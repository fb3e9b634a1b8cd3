// Interface adapters: HTTP session API client and address-bar token storage.

pub mod clients;
pub mod location;
pub mod protocol;

pub use clients::HttpSessionApi;
pub use location::UrlTokenLocation;
