pub mod image;
mod upload_service;

pub use upload_service::UploadService;
