use crate::model::role::Role;
use derive_new::new;

// 予約時に自動作成されるクライアントはパスワード無し・未認証
#[derive(new, Debug, Clone)]
pub struct CreateClient {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
}
