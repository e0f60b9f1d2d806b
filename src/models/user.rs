use fake::faker::internet::en::{Password, Username};
use fake::Dummy;
use serde::Serialize;

// Сгенерированные логин и пароль в открытом виде.
// В базу уходит только bcrypt-хеш, открытый пароль возвращается в отчёте
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Dummy)]
pub struct NewUser {
    #[dummy(faker = "Username()")]
    pub username: String,
    #[dummy(faker = "Password(8..16)")]
    pub password: String,
}

impl NewUser {
    pub fn hash_password(&self, cost: u32) -> Result<String, bcrypt::BcryptError> {
        bcrypt::hash(&self.password, cost)
    }
}
