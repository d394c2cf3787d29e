use axum::{
    extract::Request,
    http::{HeaderMap, Method, StatusCode},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::env;

use crate::domain::authorization::ActorContext;
use crate::domain::value_objects::UserId;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // User ID
    exp: usize,  // Expiration time
    iat: usize,  // Issued at
    #[serde(default)]
    is_admin: bool,
}

/// Authentication middleware building an ActorContext from a bearer token.
///
/// Reads are public (the published site); every mutation requires a valid
/// token. A token on a read request still populates the actor so handlers
/// can widen visibility for admins.
pub async fn auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // Health endpoints are always open
    if request.uri().path().starts_with("/health") {
        return Ok(next.run(request).await);
    }

    let bearer = headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match bearer {
        Some(token) => {
            let actor = validate_jwt(token)?;
            request.extensions_mut().insert(actor);
            Ok(next.run(request).await)
        }
        None if request.method() == Method::GET => Ok(next.run(request).await),
        None => Err(StatusCode::UNAUTHORIZED),
    }
}

/// Validate a JWT and derive the actor
fn validate_jwt(token: &str) -> Result<ActorContext, StatusCode> {
    let jwt_secret = env::var("JWT_SECRET").map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let decoding_key = DecodingKey::from_secret(jwt_secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let token_data =
        decode::<Claims>(token, &decoding_key, &validation).map_err(|_| StatusCode::UNAUTHORIZED)?;

    let user_id = token_data
        .claims
        .sub
        .parse::<UserId>()
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    Ok(ActorContext::new(user_id, token_data.claims.is_admin))
}
