mod browse_dto;

pub use browse_dto::{BrowseUploadDto, NotificationDto, PollResponseDto, SubjectListDto};
