use serde::Deserialize;
use validator::Validate;

// Request de atualização de status de solicitação (somente admin)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRequestStatusRequest {
    #[validate(length(min = 1, message = "O status é obrigatório."))]
    pub status: String,
}
