mod upload_dto;

pub use upload_dto::{
    extension_of, is_audio_extension_allowed, is_image_extension_allowed, NewAudio, NewUpload,
    UploadFieldsDto, UploadFormDto, UploadResponseDto, ALLOWED_AUDIO_EXTENSIONS,
    ALLOWED_IMAGE_EXTENSIONS, MAX_AUDIO_SIZE, MAX_IMAGE_SIZE,
};
