use serde::{Deserialize, Serialize};

use crate::domain::models::user::Role;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,

    #[serde(rename = "https://hotel-booking.local/claims/email")]
    pub email: String,

    #[serde(rename = "https://hotel-booking.local/claims/role")]
    pub role: Role,

    #[serde(rename = "https://hotel-booking.local/claims/csrf")]
    pub csrf_token: String,
}

/// The authenticated caller, as established by a verified access token.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: String,
    pub email: String,
    pub role: Role,
}

impl From<&Claims> for Principal {
    fn from(claims: &Claims) -> Self {
        Principal {
            user_id: claims.sub.clone(),
            email: claims.email.clone(),
            role: claims.role,
        }
    }
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub csrf_token: String,
    pub user: UserProfile,
}

#[derive(Serialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}
