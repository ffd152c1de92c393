use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
    RequestPartsExt,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use kernel::model::{
    auth::AccessToken, event::Event, id::UserId, registration::Registration, user::User,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

// リクエストの前処理を実行後、handler に渡す構造体を定義
pub struct AuthorizedUser {
    pub access_token: AccessToken,
    pub user: User,
}

impl AuthorizedUser {
    pub fn id(&self) -> UserId {
        self.user.id
    }

    pub fn is_organizer(&self) -> bool {
        self.user.is_organizer()
    }

    // 認証済みであることは extractor の時点で保証されている。
    // 以降はロール、所有者の順に確認し、それぞれ専用のメッセージで 403 を返す
    pub fn ensure_organizer(&self) -> AppResult<()> {
        if !self.is_organizer() {
            return Err(AppError::ForbiddenOperation(
                "Only organizers can manage events.".into(),
            ));
        }
        Ok(())
    }

    pub fn ensure_author_of(&self, event: &Event) -> AppResult<()> {
        if !event.is_authored_by(self.id()) {
            return Err(AppError::ForbiddenOperation(
                "You do not have permission to modify this event.".into(),
            ));
        }
        Ok(())
    }

    pub fn ensure_self(&self, user_id: UserId) -> AppResult<()> {
        if self.id() != user_id {
            return Err(AppError::ForbiddenOperation("Not allowed.".into()));
        }
        Ok(())
    }

    pub fn ensure_registrant_of(&self, registration: &Registration) -> AppResult<()> {
        if !registration.is_held_by(self.id()) {
            return Err(AppError::ForbiddenOperation(
                "You do not have permission to delete this registration.".into(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedUser {
    type Rejection = AppError;

    // handler メソッドの引数に AuthorizedUser を追加したときはこのメソッドが呼ばれる
    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        // HTTP ヘッダからアクセストークンを取り出す
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::UnauthorizedError)?;
        let access_token = AccessToken(bearer.token().to_string());

        // 署名と有効期限を検証し、トークンが示すユーザー ID を取り出す
        let user_id = registry
            .auth_repository()
            .fetch_user_id_from_token(&access_token)
            .await?
            .ok_or(AppError::UnauthorizedError)?;

        // ロールはトークンに載せず、毎回データベースから引き直す
        let user = registry
            .user_repository()
            .find_current_user(user_id)
            .await?
            .filter(|user| user.is_active)
            .ok_or(AppError::UnauthorizedError)?;

        Ok(Self { access_token, user })
    }
}

/// `axum::Json` と同じだが、不正なボディを 400 の `AppError` として返す。
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Path` と同じだが、読めない ID は JSON 付きの 404 になる。
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
