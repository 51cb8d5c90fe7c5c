//! Profile endpoints.

use jobboard_models::{ApiResponse, Profile, ProfileUpdate};

use super::{into_envelope, into_unit_envelope};
use crate::client::ApiClient;

#[derive(Clone)]
pub struct ProfileService {
    client: ApiClient,
}

impl ProfileService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> ApiResponse<Profile> {
        let op = "get_profile";
        into_envelope(op, self.client.get(op, "/profile", &[]).await)
    }

    pub async fn update(&self, update: &ProfileUpdate) -> ApiResponse<Profile> {
        let op = "update_profile";
        into_envelope(op, self.client.put_json(op, "/profile", update).await)
    }

    pub async fn enable_two_factor(&self) -> ApiResponse<()> {
        let op = "enable_2fa";
        into_unit_envelope(op, self.client.post_empty(op, "/profile/2fa/enable").await)
    }

    pub async fn disable_two_factor(&self) -> ApiResponse<()> {
        let op = "disable_2fa";
        into_unit_envelope(op, self.client.post_empty(op, "/profile/2fa/disable").await)
    }
}
