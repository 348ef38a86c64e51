use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The slice of session state the client is allowed to see.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionViewDto {
    /// Subject label last browsed in this session, if any
    #[schema(example = "Phy.")]
    pub selected_subject: Option<String>,
}
