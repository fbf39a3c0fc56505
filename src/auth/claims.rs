use serde::{Deserialize, Serialize};

/// JWT payload: the authenticated identity plus issue/expiry timestamps.
/// Claims are readable by anyone holding the token; the signature only makes
/// them tamper-evident.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub username: String, // login name at issue time
    pub id: i64,          // user ID
    pub iat: usize,       // issued at (unix timestamp)
    pub exp: usize,       // expires at (unix timestamp)
}
