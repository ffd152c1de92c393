use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use garde::Validate;
use kernel::model::auth::event::CreateToken;
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::AppJson,
    model::{
        auth::{AccessTokenResponse, DetailResponse, LoginRequest},
        user::{CreateUserRequest, UserResponse},
    },
};

pub async fn signup(
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    req.validate()?;

    registry
        .user_repository()
        .create(req.into())
        .await
        .map(|user| (StatusCode::CREATED, Json(user.into())))
}

pub async fn login(
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<LoginRequest>,
) -> AppResult<Json<AccessTokenResponse>> {
    let user_id = registry
        .auth_repository()
        .verify_user(&req.email, &req.password)
        .await?;
    let access_token = registry
        .auth_repository()
        .create_token(CreateToken::new(user_id))
        .await?;

    Ok(Json(AccessTokenResponse {
        user_id,
        access_token: access_token.0,
    }))
}

// サーバー側にセッションはないので、クライアントが保持する Cookie を消すだけ
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<DetailResponse>) {
    let mut cookie = Cookie::build(("access_token", "")).path("/").build();
    cookie.make_removal();

    (
        jar.add(cookie),
        Json(DetailResponse {
            detail: "Successfully logged out".into(),
        }),
    )
}
