use serde::{Deserialize, Serialize};

pub mod get_service_health {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct APIResponse {
        pub message: String,
    }
}
