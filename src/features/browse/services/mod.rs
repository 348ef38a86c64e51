mod browse_service;

pub use browse_service::BrowseService;
