use serde::Deserialize;

/// 访客登录只需要用户名
#[derive(Debug, Deserialize)]
pub struct VisitorLoginForm {
    #[serde(default)]
    pub username: String,
}
