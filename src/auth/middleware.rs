use actix_web::{Error, FromRequest, HttpRequest, dev::Payload, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use crate::auth::jwt::{self, TokenVerifier};

/// The signed-in identity behind the current request.
///
/// Built from the `Authorization: Bearer <token>` header on every request;
/// handlers that need to know who is calling take it as an argument.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub access_token: String,
}

impl FromRequest for Session {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let bearer = BearerAuth::from_request(req, payload);
        let verifier = req.app_data::<web::Data<TokenVerifier>>().cloned();

        Box::pin(async move {
            let bearer = bearer.await.map_err(|_| {
                actix_web::error::ErrorUnauthorized("Authorization header must be: Bearer <token>")
            })?;

            let verifier = verifier.ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("Token verifier not configured")
            })?;

            let claims = jwt::validate_token(bearer.token(), verifier.get_ref())
                .await
                .map_err(|e| actix_web::error::ErrorUnauthorized(format!("Invalid token: {e}")))?;

            let user_id = claims
                .user_id()
                .map_err(actix_web::error::ErrorUnauthorized)?;

            Ok(Session {
                user_id,
                email: claims.email,
                access_token: bearer.token().to_string(),
            })
        })
    }
}
