use cdmcore::client::Credentials;
use cdmcore::{AlertError, AlertResult};

pub const USER_VAR: &str = "SPACETRACK_USER";
pub const PASSWORD_VAR: &str = "SPACETRACK_PASSWORD";

/// Picks credentials from flags first, then from `lookup` (the environment).
///
/// An empty flag counts as missing and does not fall back to the environment.
pub fn resolve_credentials<F>(
    user_flag: Option<String>,
    password_flag: Option<String>,
    lookup: F,
) -> AlertResult<Credentials>
where
    F: Fn(&str) -> Option<String>,
{
    let user = user_flag
        .or_else(|| lookup(USER_VAR))
        .filter(|value| !value.is_empty());
    let password = password_flag
        .or_else(|| lookup(PASSWORD_VAR))
        .filter(|value| !value.is_empty());

    match (user, password) {
        (Some(user), Some(password)) => Credentials::new(user, password),
        (None, _) => Err(AlertError::Configuration(format!(
            "missing user (pass -u or set {})",
            USER_VAR
        ))),
        (_, None) => Err(AlertError::Configuration(format!(
            "missing password (pass -p or set {})",
            PASSWORD_VAR
        ))),
    }
}
